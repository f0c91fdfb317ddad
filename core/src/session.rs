//! Per-session widget state, keyed by widget id.
//!
//! The presentation layer owns one [`SessionState`] and passes it into its
//! view code; nothing here touches the generated tables.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionValue {
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    entries: HashMap<String, SessionValue>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A missing key, or a key holding text, reads as `false`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(SessionValue::Flag(true)))
    }

    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.entries.insert(key.into(), SessionValue::Flag(value));
    }

    /// Flips a flag and returns its new value.
    pub fn toggle(&mut self, key: &str) -> bool {
        let next = !self.flag(key);
        self.set_flag(key, next);
        next
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(SessionValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn set_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(key.into(), SessionValue::Text(value.into()));
    }

    pub fn remove(&mut self, key: &str) -> Option<SessionValue> {
        self.entries.remove(key)
    }

    /// Drops every key starting with `prefix`, e.g. one form's fields.
    pub fn remove_prefixed(&mut self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }
}

pub fn details_key(transmitter_id: &str) -> String {
    format!("show_details_{transmitter_id}")
}

pub fn plan_key(transmitter_id: &str) -> String {
    format!("plan_{transmitter_id}")
}

pub fn form_prefix(transmitter_id: &str) -> String {
    format!("maintenance_form_{transmitter_id}.")
}

pub fn form_field_key(transmitter_id: &str, field: &str) -> String {
    format!("{}{field}", form_prefix(transmitter_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_flag() {
        let mut session = SessionState::new();
        let key = details_key("FR-001");
        assert!(!session.flag(&key));
        assert!(session.toggle(&key));
        assert!(session.flag(&key));
        assert!(!session.toggle(&key));
        assert!(!session.flag(&key));
    }

    #[test]
    fn keys_do_not_collide_across_transmitters_or_widgets() {
        let mut session = SessionState::new();
        session.set_flag(details_key("FR-001"), true);
        assert!(!session.flag(&details_key("FR-002")));
        assert!(!session.flag(&plan_key("FR-001")));
        assert_ne!(form_field_key("FR-001", "notes"), form_field_key("FR-010", "notes"));
    }

    #[test]
    fn text_and_flag_values_are_distinct() {
        let mut session = SessionState::new();
        let key = form_field_key("FR-003", "notes");
        session.set_text(key.clone(), "replace feeder");
        assert_eq!(session.text(&key), Some("replace feeder"));
        assert!(!session.flag(&key));
        assert_eq!(
            session.remove(&key),
            Some(SessionValue::Text("replace feeder".into()))
        );
        assert!(session.text(&key).is_none());
    }

    #[test]
    fn remove_prefixed_clears_one_form() {
        let mut session = SessionState::new();
        session.set_text(form_field_key("FR-004", "notes"), "a");
        session.set_text(form_field_key("FR-004", "duration"), "2");
        session.set_text(form_field_key("FR-005", "notes"), "b");
        session.remove_prefixed(&form_prefix("FR-004"));
        assert_eq!(session.text(&form_field_key("FR-004", "notes")), None);
        assert_eq!(session.text(&form_field_key("FR-004", "duration")), None);
        assert_eq!(session.text(&form_field_key("FR-005", "notes")), Some("b"));
    }
}
