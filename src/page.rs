//! Headless page model: the rendering surfaces the catalog is drawn onto.
//!
//! Every surface the interaction layer touches lives here as plain data, so
//! a rendered page can be inspected, driven by events and exported to HTML
//! without a browser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Category, Platform};

/// Text shown in every grid when the catalog could not be loaded.
pub const LOAD_FAILURE_NOTICE: &str = "Failed to load content. Please check content.json file.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Icon on the toggle control: the theme one would switch to.
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Theme::Light => "fas fa-moon",
            Theme::Dark => "fas fa-sun",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Position of a card: its grid and its index in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardRef {
    pub category: Category,
    pub index: usize,
}

/// What a card control does when activated. Each variant owns the data it
/// needs, captured when the card was rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    OpenInfo { title: String, description: String },
    OpenPlatforms,
    Download { url: String },
    Outbound { url: String },
}

impl CardAction {
    /// Stable name exported as the control's `data-action`.
    pub fn name(&self) -> &'static str {
        match self {
            CardAction::OpenInfo { .. } => "info",
            CardAction::OpenPlatforms => "platforms",
            CardAction::Download { .. } => "download",
            CardAction::Outbound { .. } => "outbound",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardButton {
    pub label: &'static str,
    pub icon: &'static str,
    pub style: ButtonStyle,
    pub action: CardAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Outline,
}

impl ButtonStyle {
    pub fn class(&self) -> &'static str {
        match self {
            ButtonStyle::Primary => "btn btn-primary",
            ButtonStyle::Secondary => "btn btn-secondary",
            ButtonStyle::Outline => "btn btn-outline",
        }
    }
}

/// Expandable panel under a music card: the embed slot plus optional lyrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardContent {
    pub embed_id: String,
    pub embed_html: String,
    pub lyrics: Option<Vec<String>>,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    /// Lowercased raw title, matched by the search filter.
    pub search_title: String,
    pub title: String,
    pub buttons: Vec<CardButton>,
    pub content: Option<CardContent>,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub category: Category,
    pub cards: Vec<Card>,
    pub notice: Option<String>,
}

impl Grid {
    fn new(category: Category) -> Self {
        Self { category, cards: Vec::new(), notice: None }
    }

    pub fn id(&self) -> String { self.category.grid_id() }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.notice = None;
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| !c.hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub tag: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Info,
    Platforms,
}

impl ModalKind {
    pub fn id(&self) -> &'static str {
        match self {
            ModalKind::Info => "infoModal",
            ModalKind::Platforms => "platformsModal",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoModal {
    pub title: String,
    pub body: String,
    pub open: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformModal {
    pub options: Vec<Platform>,
    /// Card whose Listen control opened the modal.
    pub target: Option<CardRef>,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub theme: Theme,
    pub search_query: String,
    pub tabs: Vec<Tab>,
    pub sections: Vec<Section>,
    pub grids: Vec<Grid>,
    pub info_modal: InfoModal,
    pub platform_modal: PlatformModal,
    /// Blocking message for the user, shown until dismissed.
    pub notice: Option<String>,
}

impl Default for Page {
    fn default() -> Self { Self::new(Theme::default(), Category::Music) }
}

impl Page {
    pub fn new(theme: Theme, active_tab: Category) -> Self {
        let tabs = Category::ALL
            .iter()
            .map(|c| Tab { tag: c.as_str().to_string(), label: tab_label(*c).to_string(), active: *c == active_tab })
            .collect();
        let sections = Category::ALL
            .iter()
            .map(|c| Section { id: c.as_str().to_string(), active: *c == active_tab })
            .collect();
        Self {
            theme,
            search_query: String::new(),
            tabs,
            sections,
            grids: Category::ALL.iter().map(|c| Grid::new(*c)).collect(),
            info_modal: InfoModal::default(),
            platform_modal: PlatformModal::default(),
            notice: None,
        }
    }

    pub fn grid(&self, category: Category) -> &Grid {
        &self.grids[grid_index(category)]
    }

    pub fn grid_mut(&mut self, category: Category) -> &mut Grid {
        &mut self.grids[grid_index(category)]
    }

    pub fn card(&self, at: CardRef) -> Option<&Card> {
        self.grid(at.category).cards.get(at.index)
    }

    pub fn card_mut(&mut self, at: CardRef) -> Option<&mut Card> {
        self.grid_mut(at.category).cards.get_mut(at.index)
    }

    /// First card rendered with `id` in `category`.
    pub fn find_card(&self, category: Category, id: &str) -> Option<CardRef> {
        self.grid(category)
            .cards
            .iter()
            .position(|c| c.id == id)
            .map(|index| CardRef { category, index })
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.grids.iter().flat_map(|g| g.cards.iter())
    }

    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.grids.iter_mut().flat_map(|g| g.cards.iter_mut())
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.tabs.iter().find(|t| t.active).map(|t| t.tag.as_str())
    }

    pub fn active_section(&self) -> Option<&str> {
        self.sections.iter().find(|s| s.active).map(|s| s.id.as_str())
    }
}

fn grid_index(category: Category) -> usize {
    match category {
        Category::Music => 0,
        Category::Audiobooks => 1,
        Category::Videos => 2,
    }
}

fn tab_label(category: Category) -> &'static str {
    match category {
        Category::Music => "Music",
        Category::Audiobooks => "Audiobooks",
        Category::Videos => "Videos",
    }
}
