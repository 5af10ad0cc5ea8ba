//! Terminal-backed surface.
//!
//! Output chunks stream to `out` (stdout in the binary). The loading indicator
//! and notices go to `err` so piping stdout captures only the commented code.
//! A terminal cannot take back text already printed, so replacing the output
//! starts the replacement on a fresh line instead of erasing.
//!
//! Successful output is written byte for byte. Only when `out` is an
//! interactive terminal does hiding the loading indicator end an unfinished
//! output line, so the prompt does not run into the last chunk.

use std::io::Write;

use tracing::{trace, warn};

use crate::surface::{BusyStateSink, InputSource, Notifier, OutputSink};

pub const LOADING_MESSAGE: &str = "Adding comments...";

pub struct TerminalSurface<O, E> {
    input: String,
    out: O,
    err: E,
    shown_len: usize,
    at_line_start: bool,
    trigger_enabled: bool,
    loading_visible: bool,
    scroll_position: usize,
    terminal_output: bool,
}

impl<O, E> TerminalSurface<O, E>
where
    O: Write,
    E: Write,
{
    pub fn new(out: O, err: E) -> Self {
        Self {
            input: String::new(),
            out,
            err,
            shown_len: 0,
            at_line_start: true,
            trigger_enabled: true,
            loading_visible: false,
            scroll_position: 0,
            terminal_output: false,
        }
    }

    /// Marks `out` as an interactive terminal.
    pub fn with_terminal_output(mut self, terminal_output: bool) -> Self {
        self.terminal_output = terminal_output;
        self
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn scroll_position(&self) -> usize {
        self.scroll_position
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_out(&mut self, text: &str) {
        if let Err(error) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
        {
            warn!(%error, "failed to write output");
        }
    }

    fn write_err_line(&mut self, text: &str) {
        if let Err(error) = writeln!(self.err, "{text}").and_then(|()| self.err.flush()) {
            warn!(%error, "failed to write status line");
        }
    }

    fn finish_line(&mut self) {
        if !self.at_line_start {
            self.write_out("\n");
            self.at_line_start = true;
        }
    }
}

impl<O, E> InputSource for TerminalSurface<O, E>
where
    O: Write,
    E: Write,
{
    fn input_text(&self) -> String {
        self.input.clone()
    }
}

impl<O, E> OutputSink for TerminalSurface<O, E>
where
    O: Write,
    E: Write,
{
    fn clear_output(&mut self) {
        self.finish_line();
        self.shown_len = 0;
        self.scroll_position = 0;
    }

    fn append_output(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        self.write_out(chunk);
        self.shown_len += chunk.len();
        self.at_line_start = chunk.ends_with('\n');
    }

    fn replace_output(&mut self, text: &str) {
        self.finish_line();
        self.write_out(text);
        self.shown_len = text.len();
        self.at_line_start = text.ends_with('\n');
        self.finish_line();
    }

    fn scroll_output_to(&mut self, position: usize) {
        trace!(position, shown = self.shown_len, "scroll output");
        self.scroll_position = position;
    }
}

impl<O, E> BusyStateSink for TerminalSurface<O, E>
where
    O: Write,
    E: Write,
{
    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
    }

    fn set_loading_visible(&mut self, visible: bool) {
        if visible && !self.loading_visible {
            self.write_err_line(LOADING_MESSAGE);
        }
        if !visible && self.loading_visible && self.terminal_output {
            self.finish_line();
        }
        self.loading_visible = visible;
    }
}

impl<O, E> Notifier for TerminalSurface<O, E>
where
    O: Write,
    E: Write,
{
    fn notify(&mut self, message: &str) {
        self.write_err_line(message);
    }
}
