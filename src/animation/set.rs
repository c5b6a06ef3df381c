//! Named animation collection
//!
//! Keeps every active [`Animation2D`] of a host in one place and updates them
//! in insertion order, so the per-tick ordering is stable.

use rustc_hash::FxHashMap;

use super::sequencer::{Animation2D, AnimationDesc};
use crate::core::SharedTimeSource;

/// Ordered collection of named animations
#[derive(Debug, Default)]
pub struct AnimationSet {
    /// Animations in update order
    entries: Vec<(String, Animation2D)>,
    /// Name to index in `entries`
    lookup: FxHashMap<String, usize>,
}

impl AnimationSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an animation, replacing any existing one with the same name.
    ///
    /// A replaced animation keeps its position in the update order.
    pub fn insert(&mut self, name: impl Into<String>, animation: Animation2D) {
        let name = name.into();
        if let Some(&index) = self.lookup.get(&name) {
            log::debug!("Replacing animation '{name}'");
            self.entries[index].1 = animation;
            return;
        }
        self.lookup.insert(name.clone(), self.entries.len());
        self.entries.push((name, animation));
    }

    /// Build an animation from a description and add it
    pub fn insert_desc(
        &mut self,
        name: impl Into<String>,
        desc: AnimationDesc,
        source: SharedTimeSource,
    ) {
        self.insert(name, Animation2D::with_source(desc, source));
    }

    /// Look up an animation by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Animation2D> {
        self.lookup.get(name).map(|&index| &self.entries[index].1)
    }

    /// Look up an animation by name, mutably
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Animation2D> {
        let index = *self.lookup.get(name)?;
        Some(&mut self.entries[index].1)
    }

    /// Start one animation. Returns `false` if the name is unknown.
    pub fn start(&mut self, name: &str) -> bool {
        match self.get_mut(name) {
            Some(animation) => {
                animation.start();
                true
            }
            None => {
                log::warn!("Cannot start unknown animation '{name}'");
                false
            }
        }
    }

    /// Start every animation
    pub fn start_all(&mut self) {
        for (_, animation) in &mut self.entries {
            animation.start();
        }
    }

    /// Tick every animation in insertion order.
    ///
    /// Returns how many changed frame.
    pub fn update_all(&mut self) -> usize {
        self.entries
            .iter_mut()
            .map(|(_, animation)| animation.update())
            .filter(|&changed| changed)
            .count()
    }

    /// Current frame of a named animation
    #[must_use]
    pub fn current_frame(&self, name: &str) -> Option<u32> {
        self.get(name).map(Animation2D::current_frame)
    }

    /// Number of animations
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no animations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate animations in update order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Animation2D)> {
        self.entries
            .iter()
            .map(|(name, animation)| (name.as_str(), animation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use std::sync::Arc;

    #[test]
    fn test_update_all_in_order() {
        let clock = Arc::new(ManualClock::millis());
        let mut set = AnimationSet::new();
        set.insert_desc("walk", AnimationDesc::looping(4, 100), clock.clone());
        set.insert_desc("blink", AnimationDesc::once(2, 50), clock.clone());
        set.insert_desc("idle", AnimationDesc::looping(2, 0), clock.clone());
        set.start_all();

        clock.advance(50);
        assert_eq!(set.update_all(), 1);
        clock.advance(50);
        assert_eq!(set.update_all(), 1);

        assert_eq!(set.current_frame("walk"), Some(1));
        assert_eq!(set.current_frame("blink"), Some(1));
        assert!(set.get("blink").is_some_and(Animation2D::is_finished));
        assert_eq!(set.current_frame("idle"), Some(0));

        let names: Vec<&str> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["walk", "blink", "idle"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let clock = Arc::new(ManualClock::millis());
        let mut set = AnimationSet::new();
        set.insert_desc("a", AnimationDesc::looping(2, 10), clock.clone());
        set.insert_desc("b", AnimationDesc::looping(2, 10), clock.clone());
        set.insert_desc("a", AnimationDesc::looping(8, 10), clock.clone());

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("a").map(Animation2D::total_frames), Some(8));
        assert_eq!(set.iter().next().map(|(name, _)| name), Some("a"));
    }

    #[test]
    fn test_unknown_names() {
        let mut set = AnimationSet::new();
        assert!(set.is_empty());
        assert!(!set.start("missing"));
        assert!(set.get_mut("missing").is_none());
        assert_eq!(set.current_frame("missing"), None);
    }
}
