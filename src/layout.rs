//! Tracks the set of layout names advertised by the current keymap and
//! which one is active, resolving the active group to a name and notifying
//! only on an actual change.

const UNKNOWN_LAYOUT: &str = "??";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutState {
    pub layouts: Vec<String>,
    pub group: u32,
}

impl LayoutState {
    /// Resolves the active group to a name: the group's own entry, or
    /// layout 0 if the group index is out of range, or `"??"` if there are
    /// no layouts at all.
    pub fn resolved_name(&self) -> &str {
        if self.layouts.is_empty() {
            return UNKNOWN_LAYOUT;
        }
        self.layouts
            .get(self.group as usize)
            .or_else(|| self.layouts.first())
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LAYOUT)
    }
}

/// Drives the `on_layout_change` callback, suppressing redundant
/// notifications when a `modifiers` event reports the same group again.
pub struct LayoutTracker<F: FnMut(&str)> {
    state: LayoutState,
    on_change: F,
}

impl<F: FnMut(&str)> LayoutTracker<F> {
    pub fn new(on_change: F) -> Self {
        Self {
            state: LayoutState::default(),
            on_change,
        }
    }

    /// A new keymap always notifies, even if the resolved name happens to
    /// be unchanged, since the underlying layout set has been replaced. The
    /// group is left untouched: a new keymap doesn't imply group 0, it's
    /// the compositor's own semantics that the active group survives a
    /// keymap change.
    pub fn on_keymap(&mut self, layouts: Vec<String>) {
        self.state.layouts = layouts;
        (self.on_change)(self.state.resolved_name());
    }

    /// A `modifiers` event notifies whenever the group itself changes, even
    /// if the resolved name happens to stay the same (e.g. an out-of-range
    /// group that keeps falling back to layout 0).
    pub fn on_modifiers(&mut self, group: u32) {
        if group == self.state.group {
            return;
        }
        self.state.group = group;
        (self.on_change)(self.state.resolved_name());
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_name_falls_back_to_index_zero_then_unknown() {
        let mut state = LayoutState {
            layouts: vec!["English (US)".to_string(), "German".to_string()],
            group: 1,
        };
        assert_eq!(state.resolved_name(), "German");

        state.group = 9;
        assert_eq!(state.resolved_name(), "English (US)");

        state.layouts.clear();
        assert_eq!(state.resolved_name(), "??");
    }

    #[test]
    fn keymap_always_notifies_even_with_same_result() {
        let mut calls = Vec::new();
        let mut tracker = LayoutTracker::new(|name: &str| calls.push(name.to_string()));
        tracker.on_keymap(vec!["us".to_string()]);
        tracker.on_keymap(vec!["us".to_string()]);
        assert_eq!(calls, vec!["us".to_string(), "us".to_string()]);
    }

    #[test]
    fn modifiers_only_notifies_on_actual_group_change() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let calls = Rc::new(RefCell::new(Vec::new()));
        let calls_inner = Rc::clone(&calls);
        let mut tracker =
            LayoutTracker::new(move |name: &str| calls_inner.borrow_mut().push(name.to_string()));
        tracker.on_keymap(vec!["us".to_string(), "de".to_string()]);
        calls.borrow_mut().clear();

        tracker.on_modifiers(0); // same group, no change
        assert!(calls.borrow().is_empty());

        tracker.on_modifiers(1);
        assert_eq!(*calls.borrow(), vec!["de".to_string()]);

        tracker.on_modifiers(1); // unchanged again
        assert_eq!(*calls.borrow(), vec!["de".to_string()]);
    }

    /// Per spec, notification is keyed on the group itself, not the resolved
    /// name: an out-of-range group that keeps falling back to the same
    /// layout 0 name still fires, because the group changed.
    #[test]
    fn modifiers_notifies_on_group_change_even_when_resolved_name_is_unchanged() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let calls = Rc::new(RefCell::new(Vec::new()));
        let calls_inner = Rc::clone(&calls);
        let mut tracker =
            LayoutTracker::new(move |name: &str| calls_inner.borrow_mut().push(name.to_string()));
        tracker.on_keymap(vec!["English (US)".to_string()]);
        calls.borrow_mut().clear();

        tracker.on_modifiers(1); // out of range, resolves to layouts[0] again
        tracker.on_modifiers(3); // still out of range, same resolved name

        assert_eq!(
            *calls.borrow(),
            vec!["English (US)".to_string(), "English (US)".to_string()]
        );
    }

    #[test]
    fn keymap_does_not_reset_the_active_group() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let calls = Rc::new(RefCell::new(Vec::new()));
        let calls_inner = Rc::clone(&calls);
        let mut tracker =
            LayoutTracker::new(move |name: &str| calls_inner.borrow_mut().push(name.to_string()));
        tracker.on_keymap(vec!["English (US)".to_string(), "German".to_string()]);
        tracker.on_modifiers(1);
        calls.borrow_mut().clear();

        tracker.on_keymap(vec![
            "English (US)".to_string(),
            "German".to_string(),
            "French".to_string(),
        ]);

        assert_eq!(tracker.state().group, 1);
        assert_eq!(*calls.borrow(), vec!["German".to_string()]);
    }
}
