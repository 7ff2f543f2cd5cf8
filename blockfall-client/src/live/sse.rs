//! SSE wire-format parsing
//!
//! The live stream arrives as `text/event-stream` frames:
//!
//! ```text
//! id: 4f9d
//! event: play-sound
//! data: {"name":"line_clear"}
//!
//! ```
//!
//! Transport chunks can split a frame anywhere (including mid-line), so the
//! parser buffers bytes and emits frames as their terminating blank line
//! arrives. Comment lines (leading `:`) are keep-alives and never dispatch.

/// One complete wire frame
#[derive(Debug, Clone, PartialEq)]
pub struct SseFrame {
    /// Event name (`message` if the frame carried none)
    pub event: String,
    /// Data payload; multi-line data is joined with newlines
    pub data: String,
}

/// Incremental parser over transport chunks
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport chunk, returning any frames it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line_bytes: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line_bytes);
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if let Some(frame) = self.take_frame() {
                    frames.push(frame);
                }
            } else {
                self.handle_field(line);
            }
        }

        frames
    }

    /// Apply one non-blank line to the frame under construction.
    fn handle_field(&mut self, line: &str) {
        // Comment / keep-alive
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            // This client never resumes streams, so ids and retry hints are
            // accepted and ignored
            "id" | "retry" => {}
            _ => {}
        }
    }

    /// Finish the frame under construction, if it holds anything.
    ///
    /// A blank line after only comments dispatches nothing. A frame with an
    /// event name but no data lines dispatches with empty data (the loading
    /// events carry no payload).
    fn take_frame(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        let data = std::mem::take(&mut self.data);

        if event.is_none() && data.is_empty() {
            return None;
        }

        Some(SseFrame {
            event: event.unwrap_or_else(|| "message".to_string()),
            data: data.join("\n"),
        })
    }
}
