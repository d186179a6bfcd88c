//! Per-session intro flag
//!
//! The intro slideshow plays once per browser session. The flag is read at
//! startup and written once, when the intro is dismissed.

use std::collections::HashMap;
use tracing::debug;

/// Key the flag is stored under
pub const INTRO_SHOWN_KEY: &str = "introShown";

/// Session-scoped string storage supplied by the host
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process store, used by the API server and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Intro lifecycle: unseen → dismissed, never back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroState {
    shown: bool,
}

impl IntroState {
    /// Any stored value counts as shown
    pub fn read<S: SessionStore + ?Sized>(store: &S) -> Self {
        Self {
            shown: store.get(INTRO_SHOWN_KEY).is_some(),
        }
    }

    pub fn should_play(&self) -> bool {
        !self.shown
    }

    /// Mark the intro as seen; returns false if it already was
    pub fn dismiss<S: SessionStore + ?Sized>(&mut self, store: &mut S) -> bool {
        if self.shown {
            return false;
        }
        store.set(INTRO_SHOWN_KEY, "true");
        self.shown = true;
        debug!("Intro dismissed for this session");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_plays_intro() {
        let store = MemoryStore::default();
        assert!(IntroState::read(&store).should_play());
    }

    #[test]
    fn test_dismiss_once() {
        let mut store = MemoryStore::default();
        let mut intro = IntroState::read(&store);

        assert!(intro.dismiss(&mut store));
        assert!(!intro.should_play());
        assert_eq!(store.get(INTRO_SHOWN_KEY).as_deref(), Some("true"));

        assert!(!intro.dismiss(&mut store));
        assert!(!IntroState::read(&store).should_play());
    }

    #[test]
    fn test_any_stored_value_counts() {
        let mut store = MemoryStore::default();
        store.set(INTRO_SHOWN_KEY, "1");
        assert!(!IntroState::read(&store).should_play());
    }
}
