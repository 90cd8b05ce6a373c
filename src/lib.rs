pub mod config;
pub mod error;
pub mod html;
pub mod interact;
pub mod loader;
pub mod page;
pub mod render;
pub mod source;
pub mod store;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::config::DeckConfig;
    pub use crate::error::{InteractError, LoadError};
    pub use crate::interact::{Activation, PlatformSelection};
    pub use crate::loader::LoadOutcome;
    pub use crate::page::{Card, CardAction, CardRef, ModalKind, Page, Theme};
    pub use crate::source::{CatalogSource, FileSource, HttpSource, StaticSource};
    pub use crate::store::ContentStore;
    pub use crate::types::{Catalog, CatalogItem, Category, Platform};
    pub use crate::Deck;
}

use crate::config::DeckConfig;
use crate::error::{InteractError, LoadError};
use crate::interact::{Activation, PlatformSelection};
use crate::loader::LoadOutcome;
use crate::page::{CardRef, ModalKind, Page, Theme};
use crate::source::{source_for, CatalogSource};
use crate::store::ContentStore;
use crate::types::{Category, Platform};

/// Library entry point. Owns the page and the content store; every event
/// goes through `&mut self`, so handlers never overlap.
pub struct Deck {
    page: Page,
    store: ContentStore,
    config: DeckConfig,
}

impl Deck {
    /// Empty page in the configured startup theme and tab. Nothing is
    /// fetched until [`Deck::load`].
    pub fn new(config: DeckConfig) -> Self {
        let page = Page::new(config.theme, config.default_tab);
        Self { page, store: ContentStore::new(), config }
    }

    pub fn page(&self) -> &Page { &self.page }
    pub fn store(&self) -> &ContentStore { &self.store }
    pub fn config(&self) -> &DeckConfig { &self.config }

    /// Source described by the config.
    pub fn configured_source(&self) -> Result<Box<dyn CatalogSource>, LoadError> {
        let c = &self.config;
        source_for(&c.content, c.base_url.as_deref(), &c.user_agent, c.fetch_timeout())
    }

    /// Single load attempt from the configured source. A location that
    /// cannot be turned into a source fails the load like a fetch error.
    pub async fn load(&mut self) -> LoadOutcome {
        match self.configured_source() {
            Ok(source) => self.load_from(source.as_ref()).await,
            Err(e) => loader::fail_load(&mut self.page, &mut self.store, e),
        }
    }

    /// Single load attempt from `source`. Replaces the rendered cards and the
    /// store wholesale.
    pub async fn load_from(&mut self, source: &dyn CatalogSource) -> LoadOutcome {
        loader::load_content(&mut self.page, &mut self.store, source).await
    }

    pub fn toggle_theme(&mut self) -> Theme { interact::toggle_theme(&mut self.page) }

    pub fn select_tab(&mut self, tag: &str) -> Result<(), InteractError> { interact::select_tab(&mut self.page, tag) }

    pub fn search(&mut self, query: &str) -> usize { interact::apply_search(&mut self.page, query) }

    pub fn open_info(&mut self, title: &str, description: &str) { interact::open_info(&mut self.page, title, description) }

    pub fn close_modal(&mut self, kind: ModalKind) { interact::close_modal(&mut self.page, kind) }

    pub fn dismiss_notice(&mut self) -> Option<String> { interact::dismiss_notice(&mut self.page) }

    pub fn activate(&mut self, at: CardRef, button: usize) -> Result<Activation, InteractError> {
        interact::activate(&mut self.page, at, button)
    }

    pub fn open_platforms(&mut self, at: CardRef) -> Result<(), InteractError> { interact::open_platforms(&mut self.page, at) }

    pub fn select_platform(&mut self, platform: Platform) -> Result<PlatformSelection, InteractError> {
        interact::select_platform(&mut self.page, &self.store, platform)
    }

    pub fn close_lyrics(&mut self, at: CardRef) -> Result<(), InteractError> { interact::close_lyrics(&mut self.page, at) }

    /// Open the platform modal for the first music card with `track_id` and
    /// pick `platform` in one step.
    pub fn listen(&mut self, track_id: &str, platform: Platform) -> Result<PlatformSelection, InteractError> {
        let at = self
            .page
            .find_card(Category::Music, track_id)
            .ok_or_else(|| InteractError::NotAMusicCard(track_id.to_string()))?;
        self.open_platforms(at)?;
        self.select_platform(platform)
    }

    /// Current page as a static HTML document.
    pub fn to_html(&self) -> String { html::render_page(&self.page) }
}
