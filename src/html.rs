//! Static HTML export of a [`Page`].
//!
//! All catalog text goes through [`escape_html`]; embed markup is the one
//! exception and is written verbatim, since it is meant to be live markup.
//! Card controls are emitted as `data-action` attributes instead of inline
//! handlers, so no item text ever lands inside script.

use std::fmt::Write;

use crate::page::{Card, CardAction, Grid, Page};

pub fn render_page(page: &Page) -> String {
    let mut out = String::with_capacity(4096);
    // fmt::Write for String never returns an error.
    write_page(&mut out, page).expect("writing to a String cannot fail");
    out
}

fn write_page(out: &mut String, page: &Page) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head><meta charset=\"UTF-8\"><title>Media Deck</title></head>")?;
    writeln!(out, "<body data-theme=\"{}\">", page.theme)?;
    writeln!(
        out,
        "<button id=\"themeToggle\"><i class=\"{}\"></i></button>",
        page.theme.toggle_icon()
    )?;
    writeln!(
        out,
        "<input id=\"searchInput\" type=\"search\" value=\"{}\">",
        escape_html(&page.search_query)
    )?;

    writeln!(out, "<nav class=\"tabs\">")?;
    for tab in &page.tabs {
        writeln!(
            out,
            "<button class=\"{}\" data-tab=\"{}\">{}</button>",
            active_class("tab-btn", tab.active),
            escape_html(&tab.tag),
            escape_html(&tab.label)
        )?;
    }
    writeln!(out, "</nav>")?;

    for (section, grid) in page.sections.iter().zip(&page.grids) {
        writeln!(out, "<section id=\"{}\" class=\"{}\">", escape_html(&section.id), active_class("section", section.active))?;
        write_grid(out, grid)?;
        writeln!(out, "</section>")?;
    }

    let info = &page.info_modal;
    writeln!(out, "<div id=\"infoModal\" class=\"modal\" style=\"display:{}\">", display(info.open, "flex"))?;
    writeln!(out, "<h3 id=\"infoTitle\">{}</h3>", escape_html(&info.title))?;
    writeln!(out, "<p id=\"infoBody\">{}</p>", escape_html(&info.body))?;
    writeln!(out, "</div>")?;

    let pm = &page.platform_modal;
    writeln!(out, "<div id=\"platformsModal\" class=\"modal\" style=\"display:{}\">", display(pm.open, "flex"))?;
    writeln!(out, "<div id=\"platformOptions\">")?;
    for p in &pm.options {
        writeln!(
            out,
            "<button class=\"platform-btn\" data-platform=\"{}\"><i class=\"{}\"></i> {}</button>",
            p.key(),
            p.icon(),
            p.name()
        )?;
    }
    writeln!(out, "</div>\n</div>")?;

    if let Some(notice) = &page.notice {
        writeln!(out, "<div class=\"notice\" role=\"alert\">{}</div>", escape_html(notice))?;
    }
    writeln!(out, "</body>\n</html>")
}

fn write_grid(out: &mut String, grid: &Grid) -> std::fmt::Result {
    writeln!(out, "<div id=\"{}\" class=\"card-grid\">", grid.id())?;
    if let Some(notice) = &grid.notice {
        writeln!(
            out,
            "<p style=\"text-align:center; padding:40px; color:var(--text-secondary);\">{}</p>",
            escape_html(notice)
        )?;
    }
    for card in &grid.cards {
        write_card(out, card)?;
    }
    writeln!(out, "</div>")
}

fn write_card(out: &mut String, card: &Card) -> std::fmt::Result {
    writeln!(
        out,
        "<div class=\"{}\" data-id=\"{}\" data-title=\"{}\">",
        active_class_named("card", "hidden", card.hidden),
        escape_html(&card.id),
        escape_html(&card.search_title)
    )?;
    writeln!(out, "<div class=\"card-header\">")?;
    writeln!(out, "<div class=\"card-title\">{}</div>", escape_html(&card.title))?;
    writeln!(out, "<div class=\"card-buttons\">")?;
    for b in &card.buttons {
        match &b.action {
            CardAction::Download { url } | CardAction::Outbound { url } => writeln!(
                out,
                "<a href=\"{}\" target=\"_blank\" class=\"{}\" data-action=\"{}\"><i class=\"{}\"></i> {}</a>",
                escape_html(url),
                b.style.class(),
                b.action.name(),
                b.icon,
                escape_html(b.label)
            )?,
            CardAction::OpenInfo { .. } | CardAction::OpenPlatforms => writeln!(
                out,
                "<button class=\"{}\" data-action=\"{}\"><i class=\"{}\"></i> {}</button>",
                b.style.class(),
                b.action.name(),
                b.icon,
                escape_html(b.label)
            )?,
        }
    }
    writeln!(out, "</div>\n</div>")?;

    if let Some(content) = &card.content {
        writeln!(out, "<div class=\"card-content\" style=\"display:{}\">", display(content.visible, "block"))?;
        writeln!(
            out,
            "<div class=\"embed-container\" id=\"{}\">{}</div>",
            escape_html(&content.embed_id),
            content.embed_html
        )?;
        if let Some(lines) = &content.lyrics {
            let body: Vec<String> = lines.iter().map(|l| escape_html(l)).collect();
            writeln!(
                out,
                "<div class=\"lyrics\"><button class=\"close-btn\" data-action=\"close-lyrics\">×</button>{}</div>",
                body.join("<br>")
            )?;
        }
        writeln!(out, "</div>")?;
    }
    writeln!(out, "</div>")
}

fn active_class(base: &str, active: bool) -> String {
    active_class_named(base, "active", active)
}

fn active_class_named(base: &str, flag: &str, on: bool) -> String {
    if on { format!("{base} {flag}") } else { base.to_string() }
}

fn display(open: bool, shown: &'static str) -> &'static str {
    if open { shown } else { "none" }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
