//! Display formatting functions for the UI

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Mass as shown in a grid cell
pub fn format_grid_mass(mass: f64) -> String {
    format!("{mass:.2}")
}

/// Mass as shown in the detail panel
pub fn format_detail_mass(mass: f64) -> String {
    format!("{mass:.5}")
}

/// Free amino acid mass in the composition list
pub fn format_residue_mass(mass: f64) -> String {
    format!("{mass:.3}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownBlock {
    Heading(String),
    Bullet(String),
    Text(String),
    Blank,
}

/// Flatten Markdown into plain blocks: headings and paragraphs become text,
/// bullet items are kept, inline emphasis and code markers are dropped.
pub fn flatten_markdown(text: &str) -> Vec<MarkdownBlock> {
    let mut blocks = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();

        let block = if line.is_empty() {
            MarkdownBlock::Blank
        } else if line.starts_with('#') {
            MarkdownBlock::Heading(strip_inline(line.trim_start_matches('#').trim()))
        } else if let Some(item) = ["- ", "* ", "+ "].iter().find_map(|marker| line.strip_prefix(*marker)) {
            MarkdownBlock::Bullet(strip_inline(item.trim()))
        } else {
            MarkdownBlock::Text(strip_inline(line))
        };

        if block == MarkdownBlock::Blank && matches!(blocks.last(), None | Some(MarkdownBlock::Blank)) {
            continue;
        }
        blocks.push(block);
    }

    while blocks.last() == Some(&MarkdownBlock::Blank) {
        blocks.pop();
    }

    blocks
}

fn strip_inline(text: &str) -> String {
    text.replace("**", "").replace("__", "").replace('`', "")
}

pub fn create_markdown_display(text: &str) -> Vec<Line<'static>> {
    flatten_markdown(text)
        .into_iter()
        .map(|block| match block {
            MarkdownBlock::Heading(heading) => Line::from(Span::styled(
                heading,
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )),
            MarkdownBlock::Bullet(item) => Line::from(vec![
                Span::styled("  • ", Style::default().fg(Color::Magenta)),
                Span::raw(item),
            ]),
            MarkdownBlock::Text(paragraph) => Line::from(Span::raw(paragraph)),
            MarkdownBlock::Blank => Line::from(""),
        })
        .collect()
}
