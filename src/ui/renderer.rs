use std::ops::Range;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::{
    peptide::{AminoAcid, DipeptideRecord, PeptideType},
    ui::{
        create_markdown_display, format_detail_mass, format_grid_mass, format_residue_mass,
        get_cell_style, get_polarity_color, CellState,
    },
    App,
};

const ROW_HEADER_WIDTH: u16 = 9;
const CELL_WIDTH: u16 = 7;
const COLUMN_SPACING: u16 = 1;
const HEADER_HEIGHT: u16 = 2;
const DETAIL_PANEL_WIDTH: u16 = 48;

/// Screen areas for one frame: title, calculation basis, grid, optional detail panel, status bar.
struct ScreenLayout {
    title: Rect,
    basis: Rect,
    matrix: Rect,
    detail: Option<Rect>,
    status: Rect,
}

fn screen_layout(area: Rect, with_detail: bool) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    let (matrix, detail) = if with_detail {
        let main_split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(DETAIL_PANEL_WIDTH)])
            .split(chunks[2]);
        (main_split[0], Some(main_split[1]))
    } else {
        (chunks[2], None)
    };

    ScreenLayout { title: chunks[0], basis: chunks[1], matrix, detail, status: chunks[3] }
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let selected = app.selected_record();
    let layout = screen_layout(f.area(), selected.is_some());

    render_title(f, app, layout.title);
    render_calculation_basis(f, app, layout.basis);
    render_matrix(f, app, layout.matrix);
    if let (Some(record), Some(area)) = (selected, layout.detail) {
        render_detail_panel(f, app, record, area);
    }
    render_status_bar(f, app, layout.status);
}

/// Grid cell `(row, col)` drawn at terminal position `(column, row)` of a frame covering `area`.
pub fn cell_at(app: &App, area: Rect, column: u16, row: u16) -> Option<(usize, usize)> {
    let matrix = screen_layout(area, app.selected_record().is_some()).matrix;
    let window = matrix_window(app, matrix);

    let first_cell_x = matrix.x + 1 + ROW_HEADER_WIDTH + COLUMN_SPACING;
    let first_row_y = matrix.y + 1 + HEADER_HEIGHT;
    if column < first_cell_x || row < first_row_y || column >= matrix.right().saturating_sub(1) {
        return None;
    }

    let col = window.cols.start + ((column - first_cell_x) / (CELL_WIDTH + COLUMN_SPACING)) as usize;
    let r = window.rows.start + (row - first_row_y) as usize;
    (window.cols.contains(&col) && window.rows.contains(&r)).then_some((r, col))
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let (linear_style, cyclic_style) = match app.peptide_type {
        PeptideType::Linear => (Style::default().fg(Color::Green), Style::default().fg(Color::DarkGray)),
        PeptideType::Cyclic => (Style::default().fg(Color::DarkGray), Style::default().fg(Color::Yellow)),
    };

    let mut spans = vec![
        Span::styled("Dipeptide Mass Explorer", Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled(PeptideType::Linear.label(), linear_style),
        Span::raw(" / "),
        Span::styled(PeptideType::Cyclic.label(), cyclic_style),
        Span::raw("   Search: "),
        Span::styled(app.query.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled("_", Style::default().fg(Color::DarkGray)),
    ];

    if app.is_searching() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("{} matches", app.match_count()),
            Style::default().fg(Color::LightYellow),
        ));
    }

    let title_widget = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title_widget, area);
}

fn render_calculation_basis(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(app.peptide_type.calculation_basis(), Style::default().fg(Color::Blue))),
        Line::from(Span::styled(
            "Monoisotopic masses in Daltons: H (1.0078), C (12.0000), N (14.0031), O (15.9949), S (31.9721).",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().title("Calculation Basis").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

/// First index of a window of `visible` items that keeps `cursor` in view.
fn window_start(cursor: usize, visible: usize, total: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    cursor.saturating_sub(visible - 1).min(total - visible)
}

fn axis_header_cell(aa: &AminoAcid) -> Cell<'static> {
    let style = Style::default().fg(get_polarity_color(aa.polarity)).add_modifier(Modifier::BOLD);
    Cell::from(vec![
        Line::from(Span::styled(aa.one_letter.to_string(), style)),
        Line::from(Span::styled(aa.three_letter, Style::default().fg(Color::Gray))),
    ])
}

/// Rows and columns of the grid that fit in `area` around the cursor
struct MatrixWindow {
    rows: Range<usize>,
    cols: Range<usize>,
}

fn matrix_window(app: &App, area: Rect) -> MatrixWindow {
    let total = app.matrix.size();

    let inner_width = area.width.saturating_sub(2 + ROW_HEADER_WIDTH);
    let visible_cols = ((inner_width / (CELL_WIDTH + COLUMN_SPACING)) as usize).clamp(1, total.max(1));
    let inner_height = area.height.saturating_sub(2 + HEADER_HEIGHT);
    let visible_rows = (inner_height as usize).clamp(1, total.max(1));

    let col_start = window_start(app.cursor_col, visible_cols, total);
    let row_start = window_start(app.cursor_row, visible_rows, total);
    MatrixWindow {
        rows: row_start..(row_start + visible_rows).min(total),
        cols: col_start..(col_start + visible_cols).min(total),
    }
}

fn render_matrix(f: &mut Frame, app: &App, area: Rect) {
    let axis = app.matrix.amino_acids();
    let total = axis.len();
    let MatrixWindow { rows: row_range, cols: col_range } = matrix_window(app, area);

    let corner = Cell::from(vec![
        Line::from(Span::styled("N-Term", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(" C-Term", Style::default().fg(Color::Gray))),
    ]);
    let header_cells = std::iter::once(corner)
        .chain(axis[col_range.clone()].iter().map(axis_header_cell));
    let header = Row::new(header_cells).height(HEADER_HEIGHT);

    let searching = app.is_searching();
    let selected = app.selected_id.as_deref();

    let rows = app.matrix.rows()[row_range.clone()]
        .iter()
        .zip(row_range.clone())
        .map(|(row, r)| {
            let aa = &axis[r];
            let label = Cell::from(Line::from(vec![
                Span::styled(
                    format!("{} ", aa.one_letter),
                    Style::default().fg(get_polarity_color(aa.polarity)).add_modifier(Modifier::BOLD),
                ),
                Span::styled(aa.three_letter, Style::default().fg(Color::Gray)),
            ]));

            let cells = row[col_range.clone()].iter().zip(col_range.clone()).map(|(record, c)| {
                let matched = searching && app.is_match(record);
                let state = CellState {
                    selected: selected == Some(record.id.as_str()),
                    under_cursor: r == app.cursor_row && c == app.cursor_col,
                    matched,
                    dimmed: searching && !matched,
                };
                Cell::from(format_grid_mass(record.mass(app.peptide_type))).style(get_cell_style(state))
            });

            Row::new(std::iter::once(label).chain(cells))
        });

    let widths = std::iter::once(Constraint::Length(ROW_HEADER_WIDTH))
        .chain(std::iter::repeat(Constraint::Length(CELL_WIDTH)).take(col_range.len()));

    let title = format!(
        "{} Mass Matrix (rows {}-{}, cols {}-{} of {})",
        app.peptide_type.label(),
        row_range.start + 1,
        row_range.end,
        col_range.start + 1,
        col_range.end,
        total
    );

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(table, area);
}

fn render_detail_panel(f: &mut Frame, app: &App, record: &DipeptideRecord, area: Rect) {
    let peptide_type = app.peptide_type;
    let type_label = match peptide_type {
        PeptideType::Linear => "Linear Peptide",
        PeptideType::Cyclic => "Cyclic Dipeptide (DKP)",
    };

    let mut lines = vec![
        Line::from(Span::styled(type_label, Style::default().fg(Color::Cyan))),
        Line::from(Span::styled(
            record.display_name(peptide_type),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} - {}", record.aa1.name, record.aa2.name),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Monoisotopic Mass: "),
            Span::styled(
                format!("{} Da", format_detail_mass(record.mass(peptide_type))),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("Composition", Style::default().fg(Color::Cyan))),
        build_residue_line("N", record.aa1, "N-Term"),
        build_residue_line("C", record.aa2, "C-Term"),
        Line::from(""),
        Line::from(Span::styled("AI Analysis", Style::default().fg(Color::Magenta))),
    ];

    if !app.analysis.content.is_empty() {
        lines.extend(create_markdown_display(&app.analysis.content));
    } else if app.analysis.loading {
        lines.push(Line::from(Span::styled("Generating insight...", Style::default().fg(Color::Magenta))));
    } else {
        lines.push(Line::from(Span::styled(
            format!("Press Ctrl-A to analyze {}", record.display_name(peptide_type)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let wrapped_rows: usize = lines.iter().map(|line| line.width().div_ceil(inner_width).max(1)).sum();
    let max_scroll = u16::try_from(wrapped_rows.saturating_sub(1)).unwrap_or(u16::MAX);

    let title = if app.analysis_scroll > 0 { "Detail View (PgUp/PgDn)" } else { "Detail View" };
    let widget = Paragraph::new(lines)
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((app.analysis_scroll.min(max_scroll), 0));
    f.render_widget(widget, area);
}

fn build_residue_line(terminal: &'static str, aa: AminoAcid, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{terminal} "), Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        Span::styled(aa.name, Style::default().fg(Color::White)),
        Span::styled(
            format!("  {} | {}", aa.formula, format_residue_mass(aa.monoisotopic_mass)),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("  {label}"), Style::default().fg(Color::DarkGray)),
    ])
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = if app.has_selection() {
        "Type to search, Tab: linear/cyclic, arrows: move, Enter/click: select, Ctrl-A: analyze, PgUp/PgDn: scroll, Esc: close, Ctrl-C: quit"
    } else {
        "Type to search (e.g. 'Ala', 'A', '188.12'), Tab: linear/cyclic, arrows: move, Enter/click: select, Esc: clear, Ctrl-C: quit"
    };

    let status_widget = Paragraph::new(vec![Line::from(vec![
        Span::styled(status_text, Style::default().fg(Color::White)),
    ])])
    .block(Block::default().title("Status").borders(Borders::ALL));
    f.render_widget(status_widget, area);
}
