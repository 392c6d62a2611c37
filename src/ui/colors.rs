//! Color definitions for amino acids and grid cells

use ratatui::style::{Color, Modifier, Style};
use crate::peptide::Polarity;

/// Header color for an amino acid's side-chain class
pub fn get_polarity_color(polarity: Polarity) -> Color {
    match polarity {
        Polarity::Nonpolar => Color::Yellow,
        Polarity::Polar => Color::Green,
        Polarity::Basic => Color::Blue,
        Polarity::Acidic => Color::Red,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellState {
    pub selected: bool,
    pub under_cursor: bool,
    pub matched: bool,
    pub dimmed: bool,
}

pub fn get_cell_style(state: CellState) -> Style {
    let mut style = if state.selected {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if state.matched {
        Style::default().fg(Color::Black).bg(Color::LightYellow)
    } else if state.dimmed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    if state.under_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wins_over_match() {
        let style = get_cell_style(CellState { selected: true, matched: true, ..Default::default() });
        assert_eq!(style.bg, Some(Color::Cyan));
    }

    #[test]
    fn test_dimmed_cells() {
        let style = get_cell_style(CellState { dimmed: true, ..Default::default() });
        assert_eq!(style.fg, Some(Color::DarkGray));
        assert_eq!(style.bg, None);
    }
}
