use std::collections::HashSet;

use tracing::{debug, warn};

use crate::page::{ButtonStyle, Card, CardAction, CardButton, CardContent, Page};
use crate::store::ContentStore;
use crate::types::{non_empty, CatalogItem, Category};

/// Replace the category's grid with one card per item, in input order.
/// Music items also get their platform embeds recorded in `store`.
pub fn render_section(page: &mut Page, store: &mut ContentStore, category: Category, items: &[CatalogItem]) {
    let grid = page.grid_mut(category);
    grid.clear();
    grid.cards.reserve(items.len());

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            warn!(category = %category, id = %item.id, "duplicate item id; later entry wins the embed store");
        }
        if category == Category::Music {
            store.record(&item.id, item.platforms.clone().unwrap_or_default());
        }
        grid.cards.push(build_card(category, item));
    }
    debug!(category = %category, cards = grid.cards.len(), "rendered section");
}

pub fn build_card(category: Category, item: &CatalogItem) -> Card {
    let mut buttons = vec![CardButton {
        label: category.info_label(),
        icon: "fas fa-info-circle",
        style: ButtonStyle::Secondary,
        action: CardAction::OpenInfo {
            title: item.title.clone().unwrap_or_default(),
            description: item.display_description().to_string(),
        },
    }];

    let content = match category {
        Category::Music => {
            buttons.push(CardButton {
                label: "Listen",
                icon: "fas fa-headphones",
                style: ButtonStyle::Outline,
                action: CardAction::OpenPlatforms,
            });
            if let Some(url) = non_empty(item.download_url.as_deref()) {
                buttons.push(CardButton {
                    label: "Download",
                    icon: "fas fa-download",
                    style: ButtonStyle::Primary,
                    action: CardAction::Download { url: url.to_string() },
                });
            }
            Some(CardContent {
                embed_id: embed_id(&item.id),
                embed_html: String::new(),
                lyrics: non_empty(item.lyrics.as_deref()).map(lyric_lines),
                visible: false,
            })
        }
        Category::Audiobooks | Category::Videos => {
            if let Some(url) = item.outbound_url(category) {
                let (label, icon) = match category {
                    Category::Audiobooks => ("Listen →", "fas fa-podcast"),
                    _ => ("Watch →", "fas fa-play-circle"),
                };
                buttons.push(CardButton {
                    label,
                    icon,
                    style: ButtonStyle::Outline,
                    action: CardAction::Outbound { url: url.to_string() },
                });
            }
            None
        }
    };

    Card {
        id: item.id.clone(),
        search_title: item.search_title(),
        title: item.display_title().to_string(),
        buttons,
        content,
        hidden: false,
    }
}

/// Id of the embed container reserved for a track.
pub fn embed_id(track_id: &str) -> String {
    format!("embed-{track_id}")
}

fn lyric_lines(lyrics: &str) -> Vec<String> {
    lyrics.split('\n').map(str::to_string).collect()
}
