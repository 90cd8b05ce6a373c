use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Render and explore a media catalog page from the command line
#[derive(Parser)]
#[command(name = "mediadeck")]
#[command(about = "Render a media catalog into a searchable, tabbed page", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the user config dir, then built-in defaults)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog location: file path or http(s) URL. Overrides the config.
    #[arg(short, long, global = true, value_name = "LOC")]
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the catalog and export the page as HTML
    Render {
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Startup theme (light or dark)
        #[arg(long)]
        theme: Option<String>,
        /// Tab to activate (music, audiobooks, videos)
        #[arg(long)]
        tab: Option<String>,
        /// Apply a search filter before exporting
        #[arg(short, long)]
        query: Option<String>,
    },
    /// List the cards left visible by an optional search
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Search filter
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Pick a listening platform for a track and print the embed
    Embed {
        /// Track id
        track_id: String,
        /// Platform key or name (spotify, boomplay, audiomack, apple)
        platform: String,
    },
}
