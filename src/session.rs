//! Interactive line session.
//!
//! Lines accumulate into the input buffer until `/submit`, which plays the role
//! of the trigger control. End of input submits whatever is still buffered.

use std::io::{self, BufRead};

use crate::commands::{parse_slash_command, SlashCommand, HELP_TEXT};
use crate::surface::Notifier;

pub const INPUT_CLEARED: &str = "Input cleared";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Continue,
    Notice(String),
    Submit(String),
    Quit,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    lines: Vec<String>,
    should_exit: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Buffered input as it would be submitted now.
    pub fn pending_input(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\n")).collect()
    }

    pub fn on_line(&mut self, line: &str) -> SessionAction {
        let Some(command) = parse_slash_command(line) else {
            self.lines
                .push(line.trim_end_matches(['\r', '\n']).to_string());
            return SessionAction::Continue;
        };

        match command {
            SlashCommand::Submit => SessionAction::Submit(self.take_input()),
            SlashCommand::Clear => {
                self.lines.clear();
                SessionAction::Notice(INPUT_CLEARED.to_string())
            }
            SlashCommand::Help => SessionAction::Notice(HELP_TEXT.to_string()),
            SlashCommand::Quit => {
                self.should_exit = true;
                SessionAction::Quit
            }
            SlashCommand::Unknown(command) => {
                SessionAction::Notice(format!("Unknown command: {command}"))
            }
        }
    }

    pub fn on_end_of_input(&mut self) -> SessionAction {
        self.should_exit = true;
        if self.pending_input().trim().is_empty() {
            self.lines.clear();
            SessionAction::Quit
        } else {
            SessionAction::Submit(self.take_input())
        }
    }

    /// Reads lines until `/quit` or end of input, handing each submission to
    /// `submit` and each notice to `notifier`.
    pub fn drive<R, N, F>(&mut self, input: R, notifier: &mut N, mut submit: F) -> io::Result<()>
    where
        R: BufRead,
        N: Notifier + ?Sized,
        F: FnMut(&mut N, String),
    {
        let mut lines = input.lines();

        while !self.should_exit {
            let action = match lines.next() {
                Some(line) => self.on_line(&line?),
                None => self.on_end_of_input(),
            };

            match action {
                SessionAction::Continue | SessionAction::Quit => {}
                SessionAction::Notice(message) => notifier.notify(&message),
                SessionAction::Submit(code) => submit(&mut *notifier, code),
            }
        }

        Ok(())
    }

    fn take_input(&mut self) -> String {
        let input = self.pending_input();
        self.lines.clear();
        input
    }
}
