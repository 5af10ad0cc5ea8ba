#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Submit,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str =
    "Type or paste code, then /submit to comment it. Commands: /submit, /clear, /help, /quit";

/// Parses a whole input line as a slash command.
///
/// Only lines whose first non-blank character is `/` and whose first word is a
/// bare command name qualify, so code such as `// note` or `/* x */` stays input.
pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    let name = trimmed.strip_prefix('/')?;

    let command = name.split_whitespace().next().unwrap_or("");
    if command.is_empty() || !command.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }

    let parsed = match command {
        "submit" => SlashCommand::Submit,
        "clear" => SlashCommand::Clear,
        "help" => SlashCommand::Help,
        "quit" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(format!("/{command}")),
    };

    Some(parsed)
}
