//! Listener lists for program events
//!
//! Each event kind has its own typed list of listeners; emitting calls them
//! in subscription order.

use crate::error::CollectError;
use std::io::{self, Write};

pub type HelpListener = Box<dyn FnMut(&mut dyn Write) -> io::Result<()>>;
pub type ErrorListener = Box<dyn FnMut(&CollectError)>;
pub type TextListener = Box<dyn FnMut(&str)>;
pub type FilesListener = Box<dyn FnMut(&str, &[String])>;

/// Subscribed listeners, one list per event kind
#[derive(Default)]
pub struct Events {
    pub(crate) help: Vec<HelpListener>,
    pub(crate) error: Vec<ErrorListener>,
    pub(crate) stdin: Vec<TextListener>,
    pub(crate) stdin_data: Vec<TextListener>,
    pub(crate) files: Vec<FilesListener>,
    pub(crate) files_data: Vec<TextListener>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Help listeners write after the generated help block
    pub fn emit_help(&mut self, out: &mut dyn Write) -> io::Result<()> {
        for listener in &mut self.help {
            listener(&mut *out)?;
        }
        Ok(())
    }

    pub fn emit_error(&mut self, error: &CollectError) {
        for listener in &mut self.error {
            listener(error);
        }
    }

    pub fn emit_stdin(&mut self, contents: &str) {
        for listener in &mut self.stdin {
            listener(contents);
        }
    }

    pub fn emit_stdin_data(&mut self, chunk: &str) {
        for listener in &mut self.stdin_data {
            listener(chunk);
        }
    }

    pub fn emit_files(&mut self, contents: &str, files: &[String]) {
        for listener in &mut self.files {
            listener(contents, files);
        }
    }

    pub fn emit_files_data(&mut self, body: &str) {
        for listener in &mut self.files_data {
            listener(body);
        }
    }

    /// Someone subscribed to standard input contents
    pub fn wants_stdin(&self) -> bool {
        !self.stdin.is_empty() || !self.stdin_data.is_empty()
    }

    /// Someone subscribed to file contents
    pub fn wants_files(&self) -> bool {
        !self.files.is_empty() || !self.files_data.is_empty()
    }
}
