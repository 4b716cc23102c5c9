//! Text recording writer
//!
//! Writes a recording document to any byte sink.

use crate::replay::recording::Recording;
use std::io::{self, Write};

/// Writer for the text recording format
pub struct TextWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextWriter<W> {
    /// Create a new text writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a complete recording, optionally pretty-printed
    pub fn write_recording(&mut self, recording: &Recording, pretty: bool) -> io::Result<()> {
        let text = recording
            .to_json(pretty)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_empty() {
        let mut buffer = Vec::new();
        TextWriter::new(&mut buffer)
            .write_recording(&Recording::new(), false)
            .unwrap();
        assert_eq!(buffer, br#"{"schemaVersion":1,"frames":[]}"#);
    }
}
