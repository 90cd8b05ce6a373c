use std::collections::HashMap;

use crate::types::PlatformEmbeds;

/// Track id -> platform embeds. Filled while the music grid renders and read
/// when a platform is chosen. Cleared wholesale on every reload.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    embeds: HashMap<String, PlatformEmbeds>,
}

impl ContentStore {
    pub fn new() -> Self { Self::default() }

    /// Record a track's embeds. Returns true when an earlier entry with the
    /// same id was replaced.
    pub fn record(&mut self, track_id: &str, embeds: PlatformEmbeds) -> bool {
        self.embeds.insert(track_id.to_string(), embeds).is_some()
    }

    pub fn embeds_for(&self, track_id: &str) -> Option<&PlatformEmbeds> {
        self.embeds.get(track_id)
    }

    /// Embed markup for `track_id` on `platform_key`, if both are present.
    pub fn embed(&self, track_id: &str, platform_key: &str) -> Option<&str> {
        self.embeds
            .get(track_id)
            .and_then(|m| m.get(platform_key))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn reset(&mut self) { self.embeds.clear(); }

    pub fn len(&self) -> usize { self.embeds.len() }

    pub fn is_empty(&self) -> bool { self.embeds.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embeds(pairs: &[(&str, &str)]) -> PlatformEmbeds {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn lookup_requires_track_and_platform() {
        let mut s = ContentStore::new();
        s.record("t1", embeds(&[("spotify", "<iframe src=\"s\"></iframe>")]));
        assert_eq!(s.embed("t1", "spotify"), Some("<iframe src=\"s\"></iframe>"));
        assert_eq!(s.embed("t1", "apple"), None);
        assert_eq!(s.embed("t2", "spotify"), None);
    }

    #[test]
    fn empty_markup_counts_as_absent() {
        let mut s = ContentStore::new();
        s.record("t1", embeds(&[("boomplay", "")]));
        assert_eq!(s.embed("t1", "boomplay"), None);
    }

    #[test]
    fn last_write_wins_and_reset_clears() {
        let mut s = ContentStore::new();
        assert!(!s.record("t1", embeds(&[("spotify", "a")])));
        assert!(s.record("t1", embeds(&[("apple", "b")])));
        assert_eq!(s.embed("t1", "spotify"), None);
        assert_eq!(s.embed("t1", "apple"), Some("b"));
        s.reset();
        assert!(s.is_empty());
    }
}
