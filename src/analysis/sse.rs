//! Minimal server-sent events line decoder

/// Accumulates `data:` lines and yields an event payload at each blank line.
#[derive(Debug, Default)]
pub struct SseDecoder {
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line (without the trailing newline). Returns a payload when an event completes.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            return self.take();
        }

        // Comments start with ':' and other fields (event, id, retry) are not used.
        if let Some(value) = line.strip_prefix("data:") {
            let value = value.strip_prefix(' ').unwrap_or(value);
            self.data.push(value.to_string());
        }

        None
    }

    /// Flush a trailing event not terminated by a blank line.
    pub fn finish(&mut self) -> Option<String> {
        self.take()
    }

    fn take(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        let payload = self.data.join("\n");
        self.data.clear();
        Some(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &str) -> Vec<String> {
        let mut decoder = SseDecoder::new();
        let mut events: Vec<String> = input.lines().filter_map(|l| decoder.push_line(l)).collect();
        events.extend(decoder.finish());
        events
    }

    #[test]
    fn test_single_line_events() {
        let events = decode("data: {\"a\":1}\r\n\r\ndata: {\"a\":2}\r\n\r\n");
        assert_eq!(events, vec!["{\"a\":1}", "{\"a\":2}"]);
    }

    #[test]
    fn test_multi_line_event_and_comments() {
        let events = decode(": keep-alive\nevent: message\ndata: first\ndata:second\n\n");
        assert_eq!(events, vec!["first\nsecond"]);
    }

    #[test]
    fn test_unterminated_event_is_flushed() {
        assert_eq!(decode("data: tail"), vec!["tail"]);
        assert!(decode("\n\n").is_empty());
    }
}
