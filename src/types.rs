use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Title shown when an item has none.
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Music,
    Audiobooks,
    Videos,
}

impl Category {
    /// Render order used by the section loader.
    pub const ALL: [Category; 3] = [Category::Music, Category::Audiobooks, Category::Videos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Music => "music",
            Category::Audiobooks => "audiobooks",
            Category::Videos => "videos",
        }
    }

    /// Id of the grid surface that holds this category's cards.
    pub fn grid_id(&self) -> String {
        format!("{}-grid", self.as_str())
    }

    /// Label of the info action on a card of this category.
    pub fn info_label(&self) -> &'static str {
        match self {
            Category::Music => "Description",
            Category::Audiobooks | Category::Videos => "About",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "music" => Ok(Category::Music),
            "audiobooks" => Ok(Category::Audiobooks),
            "videos" => Ok(Category::Videos),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// A listening platform offered by the platform-selection modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Spotify,
    Boomplay,
    Audiomack,
    Apple,
}

impl Platform {
    /// Modal order.
    pub const ALL: [Platform; 4] = [Platform::Spotify, Platform::Boomplay, Platform::Audiomack, Platform::Apple];

    /// Key used in the document's `platforms` object.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Spotify => "spotify",
            Platform::Boomplay => "boomplay",
            Platform::Audiomack => "audiomack",
            Platform::Apple => "apple",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Spotify => "Spotify",
            Platform::Boomplay => "Boomplay",
            Platform::Audiomack => "Audiomack",
            Platform::Apple => "Apple Music",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Platform::Spotify => "fab fa-spotify",
            Platform::Boomplay => "fas fa-play",
            Platform::Audiomack => "fas fa-headphones",
            Platform::Apple => "fab fa-itunes-note",
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.key() == norm || p.name().to_ascii_lowercase() == norm)
            .ok_or_else(|| format!("unknown platform: {s}"))
    }
}

/// Platform key -> embeddable markup fragment.
pub type PlatformEmbeds = BTreeMap<String, String>;

/// One entry of the catalog document. Category-specific fields are simply
/// absent for the other categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<PlatformEmbeds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_url: Option<String>,
}

impl CatalogItem {
    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(UNTITLED)
    }

    /// Raw title lowercased; an absent title searches as "".
    pub fn search_title(&self) -> String {
        self.title.as_deref().unwrap_or_default().to_lowercase()
    }

    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Outbound link for the given category, if the item carries one.
    pub fn outbound_url(&self, category: Category) -> Option<&str> {
        let url = match category {
            Category::Music => None,
            Category::Audiobooks => self.listen_url.as_deref(),
            Category::Videos => self.watch_url.as_deref(),
        };
        non_empty(url)
    }
}

/// The fetched document. Absent arrays deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub music: Vec<CatalogItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub audiobooks: Vec<CatalogItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<CatalogItem>,
}

impl Catalog {
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn items(&self, category: Category) -> &[CatalogItem] {
        match category {
            Category::Music => &self.music,
            Category::Audiobooks => &self.audiobooks,
            Category::Videos => &self.videos,
        }
    }
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_arrays_default_to_empty() {
        let c = Catalog::from_json(r#"{"music":[{"id":"a"}]}"#).unwrap();
        assert_eq!(c.music.len(), 1);
        assert!(c.audiobooks.is_empty());
        assert!(c.videos.is_empty());
    }

    #[test]
    fn camel_case_fields_are_recognized() {
        let c = Catalog::from_json(
            r#"{"music":[{"id":"m1","downloadUrl":"d.mp3","lyrics":"a\nb","platforms":{"spotify":"<iframe></iframe>"}}],
                "audiobooks":[{"id":"b1","listenUrl":"https://l"}],
                "videos":[{"id":"v1","watchUrl":"https://w","extra":1}]}"#,
        )
        .unwrap();
        assert_eq!(c.music[0].download_url.as_deref(), Some("d.mp3"));
        assert_eq!(c.music[0].platforms.as_ref().unwrap()["spotify"], "<iframe></iframe>");
        assert_eq!(c.audiobooks[0].outbound_url(Category::Audiobooks), Some("https://l"));
        assert_eq!(c.videos[0].outbound_url(Category::Videos), Some("https://w"));
        assert_eq!(c.videos[0].outbound_url(Category::Audiobooks), None);
    }

    #[test]
    fn null_arrays_and_ids_fall_back_to_defaults() {
        let c = Catalog::from_json(r#"{"music":[{"id":null,"title":"A"}],"audiobooks":null,"videos":null}"#).unwrap();
        assert_eq!(c.music[0].id, "");
        assert!(c.audiobooks.is_empty());
        assert!(c.videos.is_empty());
    }

    #[test]
    fn title_defaults() {
        let item = CatalogItem { id: "x".into(), ..Default::default() };
        assert_eq!(item.display_title(), "Untitled");
        assert_eq!(item.search_title(), "");
        assert_eq!(item.display_description(), "");
        let item = CatalogItem { title: Some("Love Song".into()), ..Default::default() };
        assert_eq!(item.search_title(), "love song");
    }

    #[test]
    fn platform_parses_key_or_name() {
        assert_eq!("apple".parse::<Platform>().unwrap(), Platform::Apple);
        assert_eq!("Apple Music".parse::<Platform>().unwrap(), Platform::Apple);
        assert!("tidal".parse::<Platform>().is_err());
        assert_eq!("VIDEOS".parse::<Category>().unwrap(), Category::Videos);
    }
}
