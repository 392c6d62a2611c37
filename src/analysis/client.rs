use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use log::{debug, error, info, trace, warn};
use reqwest::blocking::Client;

use crate::analysis::error::AnalysisError;
use crate::analysis::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::analysis::prompt::{build_prompt, MISSING_CREDENTIAL_MESSAGE, RETRIEVAL_ERROR_MESSAGE, SYSTEM_INSTRUCTION};
use crate::analysis::sse::SseDecoder;
use crate::config::AnalysisConfig;
use crate::peptide::{DipeptideRecord, PeptideType};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// How a stream ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    Completed,
    Cancelled,
    Failed,
    MissingCredential,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisEvent {
    Chunk(String),
    Finished(StreamOutcome),
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    config: AnalysisConfig,
    http: Client,
}

impl AnalysisClient {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_http_client(config, http))
    }

    pub fn with_http_client(config: AnalysisConfig, http: Client) -> Self {
        AnalysisClient { config, http }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Stream an analysis on the current thread, calling `on_chunk` once per text fragment.
    pub fn stream_analysis<F>(&self, record: &DipeptideRecord, peptide_type: PeptideType, on_chunk: F) -> StreamOutcome
    where
        F: FnMut(&str),
    {
        self.stream_analysis_until(record, peptide_type, &AtomicBool::new(false), on_chunk)
    }

    /// Like `stream_analysis`, stopping early once `cancel` is set.
    pub fn stream_analysis_until<F>(
        &self,
        record: &DipeptideRecord,
        peptide_type: PeptideType,
        cancel: &AtomicBool,
        mut on_chunk: F,
    ) -> StreamOutcome
    where
        F: FnMut(&str),
    {
        let Some(api_key) = self.config.api_key.as_deref().filter(|_| self.config.has_credential()) else {
            warn!("Analysis requested for {} without an API key", record.id);
            on_chunk(MISSING_CREDENTIAL_MESSAGE);
            return StreamOutcome::MissingCredential;
        };

        info!("Requesting {:?} analysis for {} from {}", peptide_type, record.id, self.config.model);
        let prompt = build_prompt(record, peptide_type);

        match self.request_stream(api_key, &prompt, cancel, &mut on_chunk) {
            Ok(outcome) => {
                debug!("Analysis stream for {} ended: {outcome:?}", record.id);
                outcome
            }
            Err(e) => {
                error!("Analysis request for {} failed: {e}", record.id);
                on_chunk(RETRIEVAL_ERROR_MESSAGE);
                StreamOutcome::Failed
            }
        }
    }

    fn request_stream<F>(
        &self,
        api_key: &str,
        prompt: &str,
        cancel: &AtomicBool,
        on_chunk: &mut F,
    ) -> Result<StreamOutcome, AnalysisError>
    where
        F: FnMut(&str),
    {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.config.endpoint, self.config.model
        );
        let body = GenerateContentRequest::new(SYSTEM_INSTRUCTION, prompt);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Status { status: status.as_u16(), body });
        }

        let mut decoder = SseDecoder::new();
        let mut chunks = 0usize;

        for line in BufReader::new(response).lines() {
            if cancel.load(Ordering::Relaxed) {
                info!("Analysis stream cancelled after {chunks} chunks");
                return Ok(StreamOutcome::Cancelled);
            }

            if let Some(payload) = decoder.push_line(&line?) {
                chunks += deliver(&payload, on_chunk)?;
            }
        }

        if let Some(payload) = decoder.finish() {
            chunks += deliver(&payload, on_chunk)?;
        }

        debug!("Received {chunks} analysis chunks");
        Ok(StreamOutcome::Completed)
    }

    /// Run the analysis on a background thread; events arrive through the returned stream.
    pub fn spawn_analysis(&self, record: &DipeptideRecord, peptide_type: PeptideType) -> AnalysisStream {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        let client = self.clone();
        let record = record.clone();
        let record_id = record.id.clone();
        let thread_cancel = Arc::clone(&cancel);
        let thread_tx = tx.clone();

        let spawned = thread::Builder::new()
            .name("analysis".to_string())
            .spawn(move || {
                debug!("Background analysis thread started for {}", record.id);
                let outcome = client.stream_analysis_until(&record, peptide_type, &thread_cancel, |chunk| {
                    if thread_tx.send(AnalysisEvent::Chunk(chunk.to_string())).is_err() {
                        // Receiver gone, nobody is listening any more.
                        thread_cancel.store(true, Ordering::Relaxed);
                    }
                });
                let _ = thread_tx.send(AnalysisEvent::Finished(outcome));
                debug!("Background analysis thread completed");
            });

        if let Err(e) = spawned {
            error!("Failed to spawn analysis thread: {e}");
            let _ = tx.send(AnalysisEvent::Chunk(RETRIEVAL_ERROR_MESSAGE.to_string()));
            let _ = tx.send(AnalysisEvent::Finished(StreamOutcome::Failed));
        }

        AnalysisStream { record_id, peptide_type, receiver: rx, cancel }
    }
}

fn deliver<F>(payload: &str, on_chunk: &mut F) -> Result<usize, AnalysisError>
where
    F: FnMut(&str),
{
    let response: GenerateContentResponse = serde_json::from_str(payload)?;
    if let Some(err) = response.error {
        return Err(AnalysisError::Service(err.message));
    }

    let text = response.text();
    if text.is_empty() {
        return Ok(0);
    }

    trace!("Analysis chunk: {} bytes", text.len());
    on_chunk(&text);
    Ok(1)
}

/// Handle to an analysis running on a background thread. Dropping it cancels the request.
#[derive(Debug)]
pub struct AnalysisStream {
    record_id: String,
    peptide_type: PeptideType,
    receiver: Receiver<AnalysisEvent>,
    cancel: Arc<AtomicBool>,
}

impl AnalysisStream {
    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    pub fn peptide_type(&self) -> PeptideType {
        self.peptide_type
    }

    /// Next event if one is ready. A worker that vanished without finishing reports `Failed`.
    pub fn try_next(&self) -> Option<AnalysisEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(AnalysisEvent::Finished(StreamOutcome::Failed)),
        }
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

/// Blocks until the next event; ends after the worker finishes.
impl Iterator for AnalysisStream {
    type Item = AnalysisEvent;

    fn next(&mut self) -> Option<AnalysisEvent> {
        self.receiver.recv().ok()
    }
}

impl Drop for AnalysisStream {
    fn drop(&mut self) {
        self.cancel();
    }
}
