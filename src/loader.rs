use tracing::{error, info};

use crate::error::LoadError;
use crate::page::{Page, LOAD_FAILURE_NOTICE};
use crate::render::render_section;
use crate::source::CatalogSource;
use crate::store::ContentStore;
use crate::types::{Catalog, Category};

/// Result of the single load attempt.
#[derive(Debug)]
pub enum LoadOutcome {
    Rendered { music: usize, audiobooks: usize, videos: usize },
    Failed(LoadError),
}

impl LoadOutcome {
    pub fn is_rendered(&self) -> bool { matches!(self, LoadOutcome::Rendered { .. }) }
}

/// Fetch the catalog once and render every section. On failure each grid
/// shows the failure notice instead. The store is reset either way.
pub async fn load_content(page: &mut Page, store: &mut ContentStore, source: &dyn CatalogSource) -> LoadOutcome {
    reset(page, store);
    match source.fetch().await {
        Ok(catalog) => render_catalog(page, store, &catalog),
        Err(e) => {
            error!(source = %source.describe(), error = %e, "failed to load catalog");
            show_failure(page);
            LoadOutcome::Failed(e)
        }
    }
}

/// Record a load that failed before any fetch could start (e.g. an invalid
/// content location). The page ends up exactly as after a failed fetch.
pub fn fail_load(page: &mut Page, store: &mut ContentStore, e: LoadError) -> LoadOutcome {
    reset(page, store);
    error!(error = %e, "failed to load catalog");
    show_failure(page);
    LoadOutcome::Failed(e)
}

/// Card positions from the previous render are meaningless after a reload.
fn reset(page: &mut Page, store: &mut ContentStore) {
    store.reset();
    page.platform_modal.target = None;
    page.platform_modal.open = false;
}

pub fn render_catalog(page: &mut Page, store: &mut ContentStore, catalog: &Catalog) -> LoadOutcome {
    for category in Category::ALL {
        render_section(page, store, category, catalog.items(category));
    }
    let (music, audiobooks, videos) = (catalog.music.len(), catalog.audiobooks.len(), catalog.videos.len());
    info!(music, audiobooks, videos, embeds = store.len(), "catalog rendered");
    LoadOutcome::Rendered { music, audiobooks, videos }
}

fn show_failure(page: &mut Page) {
    for grid in &mut page.grids {
        grid.cards.clear();
        grid.notice = Some(LOAD_FAILURE_NOTICE.to_string());
    }
}
