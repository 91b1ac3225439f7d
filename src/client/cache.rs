//! Single-slot rewards memo.
//!
//! The dashboard only ever shows one broadcaster's rewards at a time, so the
//! cache is one slot keyed by broadcaster id: switching broadcasters evicts,
//! switching back refetches.

use crate::models::Reward;

/// One `(broadcaster_id, rewards)` slot.
#[derive(Debug, Default)]
pub struct RewardsCache {
    slot: Option<(String, Vec<Reward>)>,
}

impl RewardsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached rewards, if they belong to this broadcaster.
    pub fn get(&self, broadcaster_id: &str) -> Option<&[Reward]> {
        match &self.slot {
            Some((id, rewards)) if id == broadcaster_id => Some(rewards),
            _ => None,
        }
    }

    /// Replace the slot with this broadcaster's rewards.
    pub fn store(&mut self, broadcaster_id: impl Into<String>, rewards: Vec<Reward>) {
        self.slot = Some((broadcaster_id.into(), rewards));
    }

    /// Drop the slot, forcing the next lookup to refetch.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache_misses() {
        let cache = RewardsCache::new();
        assert!(cache.get("27620241").is_none());
    }

    #[test]
    fn test_store_and_get() {
        let mut cache = RewardsCache::new();
        cache.store("27620241", vec![]);

        assert!(cache.get("27620241").is_some());
        assert!(cache.get("1234").is_none());
    }

    #[test]
    fn test_store_evicts_previous_broadcaster() {
        let mut cache = RewardsCache::new();
        cache.store("27620241", vec![]);
        cache.store("1234", vec![]);

        assert!(cache.get("27620241").is_none());
        assert!(cache.get("1234").is_some());
    }

    #[test]
    fn test_invalidate() {
        let mut cache = RewardsCache::new();
        cache.store("27620241", vec![]);
        cache.invalidate();

        assert!(cache.get("27620241").is_none());
    }
}
