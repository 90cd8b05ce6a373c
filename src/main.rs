mod cli;

use std::fs;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use mediadeck::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = DeckConfig::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.content = source;
    }

    match cli.command {
        Commands::Render { output, theme, tab, query } => {
            if let Some(theme) = theme {
                config.theme = theme.parse().map_err(|e: String| anyhow!(e))?;
            }
            if let Some(tab) = tab {
                config.default_tab = tab.parse().map_err(|e: String| anyhow!(e))?;
            }
            let mut deck = Deck::new(config);
            deck.load().await;
            if let Some(q) = query {
                deck.search(&q);
            }
            let html = deck.to_html();
            match output {
                Some(path) => {
                    fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "page written");
                }
                None => print!("{html}"),
            }
        }
        Commands::List { category, query } => {
            let only: Option<Category> = category.map(|c| c.parse().map_err(|e: String| anyhow!(e))).transpose()?;
            let mut deck = loaded_deck(config).await?;
            deck.search(query.as_deref().unwrap_or_default());
            for grid in &deck.page().grids {
                if only.is_some_and(|c| c != grid.category) { continue; }
                for card in grid.visible_cards() {
                    println!("{}\t{}\t{}", grid.category, card.id, card.title);
                }
            }
        }
        Commands::Embed { track_id, platform } => {
            let platform: Platform = platform.parse().map_err(|e: String| anyhow!(e))?;
            let mut deck = loaded_deck(config).await?;
            match deck.listen(&track_id, platform)? {
                PlatformSelection::Embedded { .. } => {
                    let card = deck
                        .page()
                        .find_card(Category::Music, &track_id)
                        .and_then(|at| deck.page().card(at))
                        .and_then(|c| c.content.as_ref())
                        .ok_or_else(|| anyhow!("track {track_id} has no embed panel"))?;
                    println!("{}", card.embed_html);
                }
                PlatformSelection::Unavailable { notice } => eprintln!("{notice}"),
            }
        }
    }
    Ok(())
}

async fn loaded_deck(config: DeckConfig) -> Result<Deck> {
    let mut deck = Deck::new(config);
    if let LoadOutcome::Failed(e) = deck.load().await {
        bail!("failed to load catalog: {e}");
    }
    Ok(deck)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("MEDIADECK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
