// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single slot naming the currently zoomed element.

/// Tracks which element, if any, is zoomed.
///
/// Empty at start, set on zoom-in, cleared on zoom-out. Cancel triggers use
/// it to find the session they should act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoomRegistry<K> {
    active: Option<K>,
}

impl<K> Default for ZoomRegistry<K> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<K: PartialEq> ZoomRegistry<K> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Record `key` as the zoomed element, returning the previous one.
    pub fn set(&mut self, key: K) -> Option<K> {
        self.active.replace(key)
    }

    /// Forget the zoomed element.
    pub fn clear(&mut self) -> Option<K> {
        self.active.take()
    }

    /// Forget the zoomed element only if it is `key`.
    pub fn clear_if(&mut self, key: &K) -> bool {
        if self.is_active(key) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// The zoomed element.
    pub fn active(&self) -> Option<&K> {
        self.active.as_ref()
    }

    /// Returns `true` if `key` is the zoomed element.
    pub fn is_active(&self, key: &K) -> bool {
        self.active.as_ref() == Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let registry = ZoomRegistry::<u32>::new();
        assert_eq!(registry.active(), None);
    }

    #[test]
    fn set_replaces_and_returns_previous() {
        let mut registry = ZoomRegistry::new();
        assert_eq!(registry.set(1), None);
        assert_eq!(registry.set(2), Some(1));
        assert!(registry.is_active(&2));
        assert!(!registry.is_active(&1));
    }

    #[test]
    fn clear_if_only_clears_matching_key() {
        let mut registry = ZoomRegistry::new();
        registry.set(7);
        assert!(!registry.clear_if(&3));
        assert_eq!(registry.active(), Some(&7));
        assert!(registry.clear_if(&7));
        assert_eq!(registry.clear(), None);
    }
}
