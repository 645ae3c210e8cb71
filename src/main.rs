use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

use mpick::cli::{Cli, Command, InputArgs};
use mpick::config::{self, PickConfig};
use mpick::error::{parse_items, parse_unit, read_input};
use mpick::extract::extract_items;
use mpick::{invoke, logging, tui, Outcome, Request, NO_TERMINAL_MESSAGE};

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restore so the user gets their shell back
        let _ = tui::restore();
        default_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();
    install_panic_hook();

    let cli = Cli::parse();
    let log_guard = logging::init(cli.log_dir.as_deref());

    // Load config, apply CLI overrides (CLI wins)
    let mut config = config::load_config(cli.config.as_deref());
    if let Some(ref theme_name) = cli.theme {
        config.set_theme(theme_name);
    }

    if let Err(e) = run(&cli, config).await {
        eprintln!("mpick: {e:#}");
        // exit skips destructors; flush the file log first
        drop(log_guard);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: &Cli, mut config: PickConfig) -> Result<()> {
    let interactive = !cli.no_tui && tui::interactive_terminal_available();
    match &cli.command {
        Command::Extract(args) => {
            let text = read_input(&args.input)?;
            let items = extract_items(&text);
            write_output(args, &serde_json::to_string_pretty(&items)?)
        }
        Command::Resolve(args) => {
            let unit = parse_unit(&read_input(&args.input)?)?;
            let outcome = open(Request::Conflict(unit), interactive, &config).await?;
            write_output(args, &to_json(&outcome, !interactive)?)
        }
        Command::Walk {
            input,
            preview_chars,
            raw,
        } => {
            if let Some(n) = preview_chars.filter(|&n| n > 0) {
                config.ui.preview_chars = n;
            }
            let items = parse_items(&read_input(&input.input)?)?;
            let outcome = open(Request::Items(items), interactive, &config).await?;
            if *raw {
                return write_output(input, outcome.document().unwrap_or_default());
            }
            write_output(input, &to_json(&outcome, !interactive)?)
        }
    }
}

/// Without a terminal the request is answered with its cancelled fallback.
async fn open(request: Request, interactive: bool, config: &PickConfig) -> Result<Outcome> {
    if interactive {
        return invoke(request, config).await;
    }
    warn!("no interactive terminal, returning cancelled outcome");
    eprintln!("mpick: {NO_TERMINAL_MESSAGE}");
    Ok(Outcome::fallback(&request))
}

/// Pretty JSON, with the no-terminal guidance attached when it applies.
fn to_json<T: Serialize>(value: &T, no_terminal: bool) -> Result<String> {
    let mut json = serde_json::to_value(value)?;
    if no_terminal {
        if let Value::Object(ref mut map) = json {
            map.insert(
                "message".to_string(),
                Value::String(NO_TERMINAL_MESSAGE.to_string()),
            );
        }
    }
    Ok(serde_json::to_string_pretty(&json)?)
}

fn write_output(args: &InputArgs, text: &str) -> Result<()> {
    match args.output.as_deref() {
        Some(path) => write_file(path, text),
        None => {
            if !text.is_empty() {
                println!("{}", text.trim_end_matches('\n'));
            }
            Ok(())
        }
    }
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}
