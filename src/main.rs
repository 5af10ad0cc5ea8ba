use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use code_commenter::commands::HELP_TEXT;
use code_commenter::{
    logging, EnvConfig, Notifier, RequestController, Session, TerminalSurface, Transport,
};
use comment_api::CommentApiClient;
use tokio::runtime::Runtime;
use tracing::debug;

/// Send source code to a commenting server and stream the commented code back.
#[derive(Debug, Parser)]
#[command(name = "code-commenter", version)]
struct Cli {
    /// Source file to comment; `-` reads stdin. Omit for an interactive session.
    file: Option<PathBuf>,

    /// Server base URL. Overrides CODE_COMMENTER_BASE_URL.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

enum InputMode {
    File(PathBuf),
    Stdin,
    Interactive,
}

type Stdout = io::Stdout;
type Stderr = io::Stderr;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("code-commenter: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = EnvConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    logging::init(&config)?;

    let client =
        CommentApiClient::new(config.api_config()).context("failed to build HTTP client")?;
    debug!(endpoint = %client.normalized_endpoint(), "client ready");
    let controller = RequestController::new(client);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let mut surface = TerminalSurface::new(io::stdout(), io::stderr())
        .with_terminal_output(io::stdout().is_terminal());

    match input_mode(cli.file) {
        InputMode::File(path) => {
            let code = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(one_shot(&runtime, &controller, &mut surface, code))
        }
        InputMode::Stdin => {
            let mut code = String::new();
            io::stdin()
                .read_to_string(&mut code)
                .context("failed to read stdin")?;
            Ok(one_shot(&runtime, &controller, &mut surface, code))
        }
        InputMode::Interactive => {
            surface.notify(HELP_TEXT);
            Session::new()
                .drive(io::stdin().lock(), &mut surface, |surface, code| {
                    surface.set_input(code);
                    runtime.block_on(controller.cycle(surface));
                })
                .context("failed to read stdin")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn input_mode(file: Option<PathBuf>) -> InputMode {
    match file {
        Some(path) if path.as_os_str() == "-" => InputMode::Stdin,
        Some(path) => InputMode::File(path),
        None if io::stdin().is_terminal() => InputMode::Interactive,
        None => InputMode::Stdin,
    }
}

fn one_shot<T>(
    runtime: &Runtime,
    controller: &RequestController<T>,
    surface: &mut TerminalSurface<Stdout, Stderr>,
    code: String,
) -> ExitCode
where
    T: Transport,
{
    surface.set_input(code);
    if runtime.block_on(controller.cycle(surface)).is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
