use log::{debug, info, trace, warn};

/// Rows moved per PageUp/PageDown in the analysis text.
pub const ANALYSIS_SCROLL_STEP: u16 = 10;

use crate::analysis::{AnalysisClient, AnalysisEvent, AnalysisStream};
use crate::peptide::{count_matches, is_match, DipeptideRecord, MassMatrix, PeptideType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisState {
    pub loading: bool,
    pub content: String,
}

pub struct App {
    pub matrix: &'static MassMatrix,
    pub query: String,
    pub peptide_type: PeptideType,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub selected_id: Option<String>,
    pub analysis: AnalysisState,
    pub analysis_scroll: u16,
    pub analysis_stream: Option<AnalysisStream>,
}

impl App {
    pub fn new() -> App {
        debug!("Creating new App instance");
        App {
            matrix: MassMatrix::standard(),
            query: String::new(),
            peptide_type: PeptideType::Linear,
            cursor_row: 0,
            cursor_col: 0,
            selected_id: None,
            analysis: AnalysisState::default(),
            analysis_scroll: 0,
            analysis_stream: None,
        }
    }

    pub fn on_key(&mut self, c: char) {
        self.query.push(c);
        trace!("Search query is now '{}'", self.query);
    }

    pub fn on_backspace(&mut self) {
        self.query.pop();
        trace!("Search query is now '{}'", self.query);
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn toggle_peptide_type(&mut self) {
        let next = self.peptide_type.toggle();
        info!("Toggling peptide type from {:?} to {:?}", self.peptide_type, next);
        self.peptide_type = next;
        self.reset_analysis();
    }

    pub fn move_cursor_up(&mut self) {
        let n = self.matrix.size();
        self.cursor_row = if self.cursor_row == 0 { n - 1 } else { self.cursor_row - 1 };
    }

    pub fn move_cursor_down(&mut self) {
        self.cursor_row = (self.cursor_row + 1) % self.matrix.size();
    }

    pub fn move_cursor_left(&mut self) {
        let n = self.matrix.size();
        self.cursor_col = if self.cursor_col == 0 { n - 1 } else { self.cursor_col - 1 };
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor_col = (self.cursor_col + 1) % self.matrix.size();
    }

    pub fn cursor_record(&self) -> Option<&'static DipeptideRecord> {
        self.matrix.get(self.cursor_row, self.cursor_col)
    }

    pub fn selected_record(&self) -> Option<&'static DipeptideRecord> {
        self.selected_id.as_deref().and_then(|id| self.matrix.find(id))
    }

    /// Select the cell under the cursor, opening the detail panel.
    pub fn select_current(&mut self) {
        let Some(record) = self.cursor_record() else {
            return;
        };

        if self.selected_id.as_deref() == Some(record.id.as_str()) {
            return;
        }

        info!("Selected dipeptide {}", record.id);
        self.selected_id = Some(record.id.clone());
        self.reset_analysis();
    }

    /// Move the cursor onto a cell and select it, as a mouse click does.
    pub fn select_cell(&mut self, row: usize, col: usize) {
        if self.matrix.get(row, col).is_none() {
            return;
        }
        self.cursor_row = row;
        self.cursor_col = col;
        self.select_current();
    }

    pub fn close_detail(&mut self) {
        if self.selected_id.take().is_some() {
            debug!("Detail panel closed");
        }
        self.reset_analysis();
    }

    pub fn has_selection(&self) -> bool {
        self.selected_id.is_some()
    }

    pub fn is_match(&self, record: &DipeptideRecord) -> bool {
        is_match(record, &self.query, self.peptide_type)
    }

    pub fn is_searching(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn match_count(&self) -> usize {
        count_matches(self.matrix, &self.query, self.peptide_type)
    }

    pub fn scroll_analysis_down(&mut self, rows: u16) {
        self.analysis_scroll = self.analysis_scroll.saturating_add(rows);
    }

    pub fn scroll_analysis_up(&mut self, rows: u16) {
        self.analysis_scroll = self.analysis_scroll.saturating_sub(rows);
    }

    /// Request an analysis of the selected record unless one is already shown or running.
    pub fn start_analysis(&mut self, client: &AnalysisClient) {
        let Some(record) = self.selected_record() else {
            warn!("Analysis requested with no dipeptide selected");
            return;
        };

        if self.analysis.loading || !self.analysis.content.is_empty() {
            debug!("Analysis for {} already present", record.id);
            return;
        }

        self.reset_analysis();
        self.analysis.loading = true;
        self.analysis_stream = Some(client.spawn_analysis(record, self.peptide_type));
    }

    /// Drain pending analysis events without blocking.
    pub fn check_analysis_progress(&mut self) {
        let Some(stream) = self.analysis_stream.as_ref() else {
            return;
        };

        let mut finished = None;
        while let Some(event) = stream.try_next() {
            match event {
                AnalysisEvent::Chunk(text) => self.analysis.content.push_str(&text),
                AnalysisEvent::Finished(outcome) => {
                    finished = Some(outcome);
                    break;
                }
            }
        }

        if let Some(outcome) = finished {
            info!("Analysis for {} finished: {outcome:?}", stream.record_id());
            self.analysis.loading = false;
            self.analysis_stream = None;
        }
    }

    fn reset_analysis(&mut self) {
        if let Some(stream) = self.analysis_stream.take() {
            debug!("Cancelling in-flight analysis for {}", stream.record_id());
            stream.cancel();
        }
        self.analysis = AnalysisState::default();
        self.analysis_scroll = 0;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MISSING_CREDENTIAL_MESSAGE;
    use crate::config::AnalysisConfig;
    use std::time::{Duration, Instant};

    fn offline_client() -> AnalysisClient {
        AnalysisClient::new(AnalysisConfig::default()).unwrap()
    }

    fn wait_for_analysis(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.analysis.loading && Instant::now() < deadline {
            app.check_analysis_progress();
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_cursor_wraps() {
        let mut app = App::new();
        app.move_cursor_up();
        app.move_cursor_left();
        assert_eq!((app.cursor_row, app.cursor_col), (19, 19));
        app.move_cursor_down();
        app.move_cursor_right();
        assert_eq!((app.cursor_row, app.cursor_col), (0, 0));
    }

    #[test]
    fn test_select_current() {
        let mut app = App::new();
        app.move_cursor_down();
        app.select_current();
        assert_eq!(app.selected_id.as_deref(), Some("Ala-Gly"));
        assert_eq!(app.selected_record().map(|r| r.aa1.name), Some("Alanine"));

        app.close_detail();
        assert!(!app.has_selection());
    }

    #[test]
    fn test_query_editing_and_matches() {
        let mut app = App::new();
        assert_eq!(app.match_count(), 0);

        for c in "Trp".chars() {
            app.on_key(c);
        }
        // Trp appears in one row and one column.
        assert_eq!(app.match_count(), 39);

        app.on_backspace();
        assert_eq!(app.query, "Tr");
        app.clear_query();
        assert!(!app.is_searching());
    }

    #[test]
    fn test_analysis_without_credential() {
        let mut app = App::new();
        let client = offline_client();

        app.start_analysis(&client);
        assert!(!app.analysis.loading);

        app.select_current();
        app.start_analysis(&client);
        assert!(app.analysis.loading);

        wait_for_analysis(&mut app);
        assert!(!app.analysis.loading);
        assert_eq!(app.analysis.content, MISSING_CREDENTIAL_MESSAGE);
        assert!(app.analysis_stream.is_none());
    }

    #[test]
    fn test_toggle_resets_analysis() {
        let mut app = App::new();
        app.select_current();
        app.analysis.content = "stale".to_string();

        app.toggle_peptide_type();
        assert_eq!(app.peptide_type, PeptideType::Cyclic);
        assert_eq!(app.analysis, AnalysisState::default());
        assert_eq!(app.selected_id.as_deref(), Some("Gly-Gly"));
    }

    #[test]
    fn test_new_selection_cancels_stream() {
        let mut app = App::new();
        let client = offline_client();
        app.select_current();
        app.start_analysis(&client);
        assert!(app.analysis_stream.is_some());

        app.move_cursor_right();
        app.select_current();
        assert!(app.analysis_stream.is_none());
        assert_eq!(app.analysis, AnalysisState::default());
        assert_eq!(app.selected_id.as_deref(), Some("Gly-Ala"));
    }

    #[test]
    fn test_select_cell() {
        let mut app = App::new();
        app.select_cell(1, 0);
        assert_eq!((app.cursor_row, app.cursor_col), (1, 0));
        assert_eq!(app.selected_id.as_deref(), Some("Ala-Gly"));

        app.select_cell(20, 0);
        assert_eq!(app.selected_id.as_deref(), Some("Ala-Gly"));
        assert_eq!((app.cursor_row, app.cursor_col), (1, 0));
    }

    #[test]
    fn test_analysis_scroll_resets_with_analysis() {
        let mut app = App::new();
        app.select_current();
        app.scroll_analysis_up(ANALYSIS_SCROLL_STEP);
        assert_eq!(app.analysis_scroll, 0);

        app.scroll_analysis_down(ANALYSIS_SCROLL_STEP);
        app.scroll_analysis_down(ANALYSIS_SCROLL_STEP);
        app.scroll_analysis_up(3);
        assert_eq!(app.analysis_scroll, 17);

        app.move_cursor_down();
        app.select_current();
        assert_eq!(app.analysis_scroll, 0);
    }
}
