//! ObjectRegistry: dynamic client-side object id allocation.
//!
//! Real Wayland clients only ever get `wl_display` for free (id 1); every
//! other object — the registry, callbacks, the seat, the keyboard — is
//! allocated on demand by the client and bound to a kind so incoming events
//! can be routed back to the right handler.

pub const DISPLAY_ID: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Display,
    Registry,
    Callback,
    Seat,
    Keyboard,
}

pub struct ObjectRegistry {
    next_id: u32,
    objects: std::collections::HashMap<u32, ObjectKind>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        let mut objects = std::collections::HashMap::new();
        objects.insert(DISPLAY_ID, ObjectKind::Display);
        Self {
            next_id: DISPLAY_ID + 1,
            objects,
        }
    }

    /// Allocates a fresh object id of the given kind and records it.
    pub fn alloc(&mut self, kind: ObjectKind) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.insert(id, kind);
        id
    }

    pub fn kind_of(&self, id: u32) -> Option<ObjectKind> {
        self.objects.get(&id).copied()
    }

    /// Drops a resolved object (e.g. a callback once its `done` event fires)
    /// so later events addressed to the stale id are recognized as unknown.
    pub fn forget(&mut self, id: u32) {
        self.objects.remove(&id);
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_preregistered() {
        let registry = ObjectRegistry::new();
        assert_eq!(registry.kind_of(DISPLAY_ID), Some(ObjectKind::Display));
    }

    #[test]
    fn allocations_are_monotonic_and_never_collide() {
        let mut registry = ObjectRegistry::new();
        let a = registry.alloc(ObjectKind::Registry);
        let b = registry.alloc(ObjectKind::Callback);
        let c = registry.alloc(ObjectKind::Seat);
        assert!(a < b && b < c);
        assert_eq!(registry.kind_of(a), Some(ObjectKind::Registry));
        assert_eq!(registry.kind_of(b), Some(ObjectKind::Callback));
        assert_eq!(registry.kind_of(c), Some(ObjectKind::Seat));
    }

    #[test]
    fn forgotten_ids_resolve_to_unknown() {
        let mut registry = ObjectRegistry::new();
        let cb = registry.alloc(ObjectKind::Callback);
        registry.forget(cb);
        assert_eq!(registry.kind_of(cb), None);
    }
}
