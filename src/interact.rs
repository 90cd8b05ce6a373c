//! Event handlers over a rendered page. Each runs to completion and either
//! mutates the page or rejects the event without touching it.

use tracing::debug;

use crate::error::InteractError;
use crate::page::{Card, CardAction, CardRef, ModalKind, Page, Theme};
use crate::store::ContentStore;
use crate::types::Platform;

/// Flip the page theme; returns the new one.
pub fn toggle_theme(page: &mut Page) -> Theme {
    page.theme = page.theme.toggled();
    page.theme
}

/// Activate the tab tagged `tag` and its section, deactivating all others.
pub fn select_tab(page: &mut Page, tag: &str) -> Result<(), InteractError> {
    if !page.tabs.iter().any(|t| t.tag == tag) || !page.sections.iter().any(|s| s.id == tag) {
        return Err(InteractError::UnknownTab(tag.to_string()));
    }
    for tab in &mut page.tabs { tab.active = tab.tag == tag; }
    for section in &mut page.sections { section.active = section.id == tag; }
    Ok(())
}

/// Hide every card whose title does not contain the trimmed, lowercased
/// query. Returns the number of cards left visible.
pub fn apply_search(page: &mut Page, query: &str) -> usize {
    page.search_query = query.to_string();
    let term = query.trim().to_lowercase();
    let mut shown = 0;
    for card in page.cards_mut() {
        card.hidden = !card.search_title.contains(&term);
        if !card.hidden { shown += 1; }
    }
    shown
}

pub fn open_info(page: &mut Page, title: &str, description: &str) {
    page.info_modal.title = title.to_string();
    page.info_modal.body = description.to_string();
    page.info_modal.open = true;
}

pub fn close_modal(page: &mut Page, kind: ModalKind) {
    match kind {
        ModalKind::Info => page.info_modal.open = false,
        ModalKind::Platforms => page.platform_modal.open = false,
    }
}

pub fn dismiss_notice(page: &mut Page) -> Option<String> {
    page.notice.take()
}

/// Show the platform picker for the music card at `at`.
pub fn open_platforms(page: &mut Page, at: CardRef) -> Result<(), InteractError> {
    let card = page.card(at).ok_or(InteractError::NoSuchCard { category: at.category, index: at.index })?;
    if card.content.is_none() {
        return Err(InteractError::NotAMusicCard(card.id.clone()));
    }
    page.platform_modal.options = Platform::ALL.to_vec();
    page.platform_modal.target = Some(at);
    page.platform_modal.open = true;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformSelection {
    /// Markup was injected into the card's embed container.
    Embedded { track_id: String },
    /// No embed for that platform; the page notice was raised.
    Unavailable { notice: String },
}

/// Handle a click on one of the platform modal's options. Closes the modal
/// in both outcomes.
pub fn select_platform(page: &mut Page, store: &ContentStore, platform: Platform) -> Result<PlatformSelection, InteractError> {
    let target = page.platform_modal.target.ok_or(InteractError::NoTargetCard).and_then(|at| {
        page.card(at)
            .map(|card| (at, card.id.clone()))
            .ok_or(InteractError::NoSuchCard { category: at.category, index: at.index })
    });
    let (at, track_id) = match target {
        Ok(t) => t,
        Err(e) => {
            close_modal(page, ModalKind::Platforms);
            return Err(e);
        }
    };

    let outcome = match store.embed(&track_id, platform.key()) {
        Some(markup) => {
            let markup = markup.to_string();
            for (r, card) in indexed_cards_mut(page) {
                let Some(content) = card.content.as_mut() else { continue };
                if r == at {
                    content.embed_html = markup.clone();
                    content.visible = true;
                } else {
                    content.visible = false;
                }
            }
            debug!(track = %track_id, platform = platform.key(), "embed injected");
            PlatformSelection::Embedded { track_id }
        }
        None => {
            let notice = format!("No {} embed available for this track.", platform.name());
            page.notice = Some(notice.clone());
            PlatformSelection::Unavailable { notice }
        }
    };
    close_modal(page, ModalKind::Platforms);
    Ok(outcome)
}

/// Hide the content panel of the card at `at` (the lyrics close control).
pub fn close_lyrics(page: &mut Page, at: CardRef) -> Result<(), InteractError> {
    let card = page.card_mut(at).ok_or(InteractError::NoSuchCard { category: at.category, index: at.index })?;
    if card.content.is_none() {
        return Err(InteractError::NotAMusicCard(card.id.clone()));
    }
    if let Some(content) = card.content.as_mut() { content.visible = false; }
    Ok(())
}

/// What the host should do after a card control was activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Handled,
    /// Open `url` in a new browsing context.
    Navigate(String),
}

/// Run the action bound to button `button` of the card at `at`.
pub fn activate(page: &mut Page, at: CardRef, button: usize) -> Result<Activation, InteractError> {
    let action = page
        .card(at)
        .and_then(|c| c.buttons.get(button))
        .map(|b| b.action.clone())
        .ok_or(InteractError::NoSuchCard { category: at.category, index: at.index })?;
    match action {
        CardAction::OpenInfo { title, description } => {
            open_info(page, &title, &description);
            Ok(Activation::Handled)
        }
        CardAction::OpenPlatforms => open_platforms(page, at).map(|_| Activation::Handled),
        CardAction::Download { url } | CardAction::Outbound { url } => Ok(Activation::Navigate(url)),
    }
}

fn indexed_cards_mut(page: &mut Page) -> impl Iterator<Item = (CardRef, &mut Card)> {
    page.grids.iter_mut().flat_map(|g| {
        let category = g.category;
        g.cards.iter_mut().enumerate().map(move |(index, c)| (CardRef { category, index }, c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_section;
    use crate::types::{CatalogItem, Category, PlatformEmbeds};

    const SPOTIFY: &str = r#"<iframe src="https://open.spotify.com/embed/track/1"></iframe>"#;

    fn music(id: &str, title: &str, platforms: &[(&str, &str)]) -> CatalogItem {
        let platforms: PlatformEmbeds = platforms.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        CatalogItem { id: id.into(), title: Some(title.into()), platforms: Some(platforms), ..Default::default() }
    }

    fn fixture() -> (Page, ContentStore) {
        let mut page = Page::default();
        let mut store = ContentStore::new();
        render_section(
            &mut page,
            &mut store,
            Category::Music,
            &[music("t1", "Love Song", &[("spotify", SPOTIFY)]), music("t2", "Night Drive", &[("apple", "<iframe></iframe>")])],
        );
        render_section(
            &mut page,
            &mut store,
            Category::Videos,
            &[CatalogItem { id: "v1".into(), title: Some("Lovely Clip".into()), watch_url: Some("https://w".into()), ..Default::default() }],
        );
        (page, store)
    }

    fn at(category: Category, index: usize) -> CardRef { CardRef { category, index } }

    #[test]
    fn search_filters_case_insensitively() {
        let (mut page, _) = fixture();
        assert_eq!(apply_search(&mut page, ""), 3);
        assert_eq!(apply_search(&mut page, "  LOVE "), 2);
        assert!(page.grid(Category::Music).cards[1].hidden);
        assert!(!page.grid(Category::Videos).cards[0].hidden);
        assert_eq!(apply_search(&mut page, "zzz"), 0);
        assert!(page.cards().all(|c| c.hidden));
        assert_eq!(apply_search(&mut page, "   "), 3);
    }

    #[test]
    fn tab_selection_is_exclusive() {
        let (mut page, _) = fixture();
        select_tab(&mut page, "audiobooks").unwrap();
        assert_eq!(page.tabs.iter().filter(|t| t.active).count(), 1);
        assert_eq!(page.sections.iter().filter(|s| s.active).count(), 1);
        assert_eq!(page.active_tab(), Some("audiobooks"));
        assert_eq!(page.active_section(), Some("audiobooks"));

        let before = page.clone();
        assert_eq!(select_tab(&mut page, "podcasts"), Err(InteractError::UnknownTab("podcasts".into())));
        assert_eq!(page, before);
    }

    #[test]
    fn theme_toggles_both_ways() {
        let mut page = Page::default();
        assert_eq!(toggle_theme(&mut page), Theme::Dark);
        assert_eq!(page.theme.toggle_icon(), "fas fa-sun");
        assert_eq!(toggle_theme(&mut page), Theme::Light);
    }

    #[test]
    fn present_platform_injects_exact_markup() {
        let (mut page, store) = fixture();
        page.grid_mut(Category::Music).cards[1].content.as_mut().unwrap().visible = true;

        open_platforms(&mut page, at(Category::Music, 0)).unwrap();
        assert!(page.platform_modal.open);
        assert_eq!(page.platform_modal.options, Platform::ALL);

        let out = select_platform(&mut page, &store, Platform::Spotify).unwrap();
        assert_eq!(out, PlatformSelection::Embedded { track_id: "t1".into() });
        let cards = &page.grid(Category::Music).cards;
        let first = cards[0].content.as_ref().unwrap();
        assert_eq!(first.embed_html, SPOTIFY);
        assert!(first.visible);
        assert!(!cards[1].content.as_ref().unwrap().visible);
        assert!(!page.platform_modal.open);
        assert!(page.notice.is_none());
    }

    #[test]
    fn absent_platform_raises_notice_without_mutation() {
        let (mut page, store) = fixture();
        open_platforms(&mut page, at(Category::Music, 0)).unwrap();
        let grids_before = page.grids.clone();

        let out = select_platform(&mut page, &store, Platform::Apple).unwrap();
        let PlatformSelection::Unavailable { notice } = out else { panic!("expected notice") };
        assert!(notice.contains("Apple Music"));
        assert_eq!(page.notice.as_deref(), Some("No Apple Music embed available for this track."));
        assert_eq!(page.grids, grids_before);
        assert!(!page.platform_modal.open);
        assert_eq!(dismiss_notice(&mut page), Some(notice));
        assert!(page.notice.is_none());
    }

    #[test]
    fn platform_modal_requires_music_card() {
        let (mut page, store) = fixture();
        assert!(matches!(open_platforms(&mut page, at(Category::Videos, 0)), Err(InteractError::NotAMusicCard(_))));
        assert!(matches!(open_platforms(&mut page, at(Category::Music, 9)), Err(InteractError::NoSuchCard { .. })));
        assert_eq!(select_platform(&mut page, &store, Platform::Spotify), Err(InteractError::NoTargetCard));
    }

    #[test]
    fn stale_target_still_closes_modal() {
        let (mut page, store) = fixture();
        open_platforms(&mut page, at(Category::Music, 1)).unwrap();
        page.grid_mut(Category::Music).cards.truncate(1);
        assert_eq!(
            select_platform(&mut page, &store, Platform::Apple),
            Err(InteractError::NoSuchCard { category: Category::Music, index: 1 })
        );
        assert!(!page.platform_modal.open);
        assert!(page.notice.is_none());
    }

    #[test]
    fn activating_buttons_dispatches_typed_actions() {
        let (mut page, _) = fixture();
        assert_eq!(activate(&mut page, at(Category::Videos, 0), 0).unwrap(), Activation::Handled);
        assert!(page.info_modal.open);
        assert_eq!(page.info_modal.title, "Lovely Clip");
        close_modal(&mut page, ModalKind::Info);
        assert!(!page.info_modal.open);

        assert_eq!(activate(&mut page, at(Category::Videos, 0), 1).unwrap(), Activation::Navigate("https://w".into()));
        activate(&mut page, at(Category::Music, 1), 1).unwrap();
        assert_eq!(page.platform_modal.target, Some(at(Category::Music, 1)));
    }

    #[test]
    fn lyrics_close_hides_panel() {
        let (mut page, store) = fixture();
        open_platforms(&mut page, at(Category::Music, 0)).unwrap();
        select_platform(&mut page, &store, Platform::Spotify).unwrap();
        close_lyrics(&mut page, at(Category::Music, 0)).unwrap();
        assert!(!page.grid(Category::Music).cards[0].content.as_ref().unwrap().visible);
        assert!(close_lyrics(&mut page, at(Category::Videos, 0)).is_err());
    }
}
