/// Resource binding registry
///
/// Holds the active (slot, kind) -> resource bindings of one pipeline.
/// Binding is last-write-wins, nothing is ever evicted automatically, and
/// the registry never owns the resources it points at.
///
/// The registry is a plain single-threaded container: mutation takes
/// `&mut self`, callers sharing it across threads serialize access themselves.

use rustc_hash::FxHashMap;

use crate::binding::{BoundResource, ResourceDescriptor, ResourceKind};

#[derive(Debug, Default, Clone)]
pub struct BindingRegistry {
    entries: FxHashMap<ResourceDescriptor, BoundResource>,
}

impl BindingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Bind `resource` at `slot`
    ///
    /// The key is (slot, resource.kind()). A previous binding at that exact
    /// key is replaced without notice.
    pub fn bind(&mut self, slot: u32, resource: BoundResource) {
        let descriptor = ResourceDescriptor::new(slot, resource.kind());
        self.entries.insert(descriptor, resource);
    }

    /// Currently bound handle, `None` if nothing is bound at (slot, kind)
    pub fn lookup(&self, slot: u32, kind: ResourceKind) -> Option<&BoundResource> {
        self.entries.get(&ResourceDescriptor::new(slot, kind))
    }

    /// Remove the binding at (slot, kind); no-op if absent
    pub fn unbind(&mut self, slot: u32, kind: ResourceKind) {
        self.entries.remove(&ResourceDescriptor::new(slot, kind));
    }

    /// Whether something is bound at (slot, kind)
    pub fn contains(&self, slot: u32, kind: ResourceKind) -> bool {
        self.entries.contains_key(&ResourceDescriptor::new(slot, kind))
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every binding
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All bindings, ordered by slot then kind
    pub fn iter(&self) -> impl Iterator<Item = (ResourceDescriptor, &BoundResource)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(d, r)| (*d, r)).collect();
        entries.sort_unstable_by_key(|(descriptor, _)| *descriptor);
        entries.into_iter()
    }

    /// Descriptors whose resource has been destroyed by its owner
    ///
    /// Stale entries stay bound until explicitly unbound or overwritten.
    pub fn stale_descriptors(&self) -> Vec<ResourceDescriptor> {
        self.iter()
            .filter(|(_, resource)| resource.is_stale())
            .map(|(descriptor, _)| descriptor)
            .collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
