/// InputLayout trait and vertex input layout description
///
/// An input layout describes how the bytes of one vertex are split into the
/// attributes the vertex shader reads. Element *i* of the description feeds
/// shader input location *i*.

use crate::error::{Error, Result};

/// Vertex attribute format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum VertexFormat {
    R32_FLOAT,
    R32G32_FLOAT,
    R32G32B32_FLOAT,
    R32G32B32A32_FLOAT,
}

impl VertexFormat {
    /// Number of 32-bit float components
    pub fn component_count(&self) -> u32 {
        match self {
            VertexFormat::R32_FLOAT => 1,
            VertexFormat::R32G32_FLOAT => 2,
            VertexFormat::R32G32B32_FLOAT => 3,
            VertexFormat::R32G32B32A32_FLOAT => 4,
        }
    }

    /// Size in bytes of one attribute
    pub fn size_bytes(&self) -> u32 {
        self.component_count() * 4
    }
}

/// One attribute of the vertex input layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElement {
    /// Semantic name (e.g. "POSITION", "COLOR")
    pub semantic_name: String,
    /// Semantic index, distinguishes e.g. TEXCOORD0 from TEXCOORD1
    pub semantic_index: u32,
    /// Attribute format
    pub format: VertexFormat,
    /// Byte offset from the start of the vertex
    pub offset: u32,
}

impl InputElement {
    /// Element with semantic index 0
    pub fn new(semantic_name: impl Into<String>, format: VertexFormat, offset: u32) -> Self {
        Self {
            semantic_name: semantic_name.into(),
            semantic_index: 0,
            format,
            offset,
        }
    }

    /// First byte past this element, `None` if it lies beyond `u32::MAX`
    pub fn checked_end(&self) -> Option<u32> {
        self.offset.checked_add(self.format.size_bytes())
    }

    /// First byte past this element, saturating at `u32::MAX`
    pub fn end(&self) -> u32 {
        self.offset.saturating_add(self.format.size_bytes())
    }
}

/// Ordered list of input elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLayoutDesc {
    pub elements: Vec<InputElement>,
}

impl InputLayoutDesc {
    pub fn new(elements: Vec<InputElement>) -> Self {
        Self { elements }
    }

    /// Size in bytes of one vertex (end of the furthest element)
    pub fn stride(&self) -> u32 {
        self.elements.iter().map(InputElement::end).max().unwrap_or(0)
    }

    /// Check the description is self-consistent
    ///
    /// Rejects an empty list, elements ending past `u32::MAX`, empty semantic
    /// names, duplicated (semantic name, semantic index) pairs and
    /// overlapping byte ranges.
    pub fn validate(&self) -> Result<()> {
        if self.elements.is_empty() {
            return Err(Error::InvalidResource("Input layout has no elements".to_string()));
        }

        for (i, element) in self.elements.iter().enumerate() {
            if element.checked_end().is_none() {
                return Err(Error::InvalidResource(format!(
                    "Input element {} ({}) at offset {} ends past the addressable vertex size",
                    i, element.semantic_name, element.offset
                )));
            }
        }

        for (i, element) in self.elements.iter().enumerate() {
            if element.semantic_name.is_empty() {
                return Err(Error::InvalidResource(format!(
                    "Input element {} has an empty semantic name", i
                )));
            }

            for (j, other) in self.elements.iter().enumerate().skip(i + 1) {
                if element.semantic_name == other.semantic_name
                    && element.semantic_index == other.semantic_index
                {
                    return Err(Error::InvalidResource(format!(
                        "Input elements {} and {} share semantic {}{}",
                        i, j, element.semantic_name, element.semantic_index
                    )));
                }

                if element.offset < other.end() && other.offset < element.end() {
                    return Err(Error::InvalidResource(format!(
                        "Input elements {} ({}) and {} ({}) overlap",
                        i, element.semantic_name, j, other.semantic_name
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Input layout resource trait
///
/// Implemented by backend-specific layout objects created from a
/// description and the vertex shader blob it was validated against.
pub trait InputLayout: Send + Sync {
    /// Elements of this layout, in location order
    fn elements(&self) -> &[InputElement];

    /// Size in bytes of one vertex
    fn stride(&self) -> u32;
}

#[cfg(test)]
#[path = "input_layout_tests.rs"]
mod tests;
