//! Text recording reader
//!
//! Reads a recording document from any byte source.

use crate::replay::recording::{Recording, RecordingError};
use std::io::{self, Read};

/// Reader for the text recording format
pub struct TextReader<R: Read> {
    reader: R,
}

impl<R: Read> TextReader<R> {
    /// Create a new text reader
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read and validate a complete recording
    ///
    /// I/O failures come back as the outer error; a readable but invalid
    /// document comes back as the inner [`RecordingError`].
    pub fn read_recording(&mut self) -> io::Result<Result<Recording, RecordingError>> {
        let mut text = String::new();
        self.reader.read_to_string(&mut text)?;
        Ok(Recording::from_json(&text))
    }
}
