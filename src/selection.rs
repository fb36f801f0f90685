//! Single-slot card selection.
//!
//! At most one card is active. Selection is one optional id rather than a
//! set, so activating a card implicitly deactivates any other.

/// The active card, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSelection {
    active: Option<String>,
}

impl CardSelection {
    /// No card active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `id`, or deactivate it if it is already the active card.
    ///
    /// Returns the id that is active afterwards.
    pub fn toggle(&mut self, id: &str) -> Option<&str> {
        if self.active.as_deref() == Some(id) {
            self.active = None;
            log::debug!("card {id} deactivated");
        } else {
            log::debug!("card {id} activated");
            self.active = Some(id.to_owned());
        }
        self.active.as_deref()
    }

    /// Deactivate whatever is active. Returns `true` if anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = self.active.take().is_some();
        if changed {
            log::debug!("card selection cleared");
        }
        changed
    }

    /// The active card id.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether `id` is the active card.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn toggle_activates_then_deactivates() {
        let mut sel = CardSelection::new();
        assert_eq!(sel.toggle("card-1"), Some("card-1"));
        assert!(sel.is_active("card-1"));
        assert_eq!(sel.toggle("card-1"), None);
        assert_eq!(sel.active(), None);
    }

    #[test]
    fn toggling_another_card_switches() {
        let mut sel = CardSelection::new();
        let _ = sel.toggle("card-1");
        assert_eq!(sel.toggle("card-2"), Some("card-2"));
        assert!(!sel.is_active("card-1"));
    }

    #[test]
    fn clear_reports_change() {
        let mut sel = CardSelection::new();
        assert!(!sel.clear());
        let _ = sel.toggle("card-3");
        assert!(sel.clear());
        assert_eq!(sel.active(), None);
    }

    fn card_id() -> impl Strategy<Value = String> {
        prop_oneof![Just("card-1"), Just("card-2"), Just("card-3")]
            .prop_map(str::to_owned)
    }

    proptest! {
        #[test]
        fn double_toggle_restores_state(
            history in proptest::collection::vec(card_id(), 0..8),
            id in card_id(),
        ) {
            let mut sel = CardSelection::new();
            for h in &history {
                let _ = sel.toggle(h);
            }
            let before = sel.clone();
            let _ = sel.toggle(&id);
            let _ = sel.toggle(&id);
            if before.active().is_none() || before.is_active(&id) {
                prop_assert_eq!(sel, before);
            } else {
                // The first toggle switched away from another card.
                prop_assert_eq!(sel.active(), None);
            }
        }

        #[test]
        fn clear_always_empties(
            history in proptest::collection::vec(card_id(), 0..8),
        ) {
            let mut sel = CardSelection::new();
            for h in &history {
                let _ = sel.toggle(h);
            }
            let _ = sel.clear();
            prop_assert_eq!(sel.active(), None);
        }
    }
}
