//! City Letter Finder
//!
//! Command line entry point: one-shot search or interactive session.

use anyhow::Result;
use city_letter_finder::{
    cli::{Args, Command},
    config,
    flow::{PendingSearch, SearchFlow},
    render::ViewRenderer,
    WeatherApiClient,
};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Load configuration
    let config::LoadedSettings {
        mut settings,
        source,
    } = config::load(args.config.as_deref())?;
    args.apply_to(&mut settings);

    // Initialize logging
    let level = if settings.general.debug { "debug" } else { "warn" };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("Starting City Letter Finder v{}", city_letter_finder::VERSION);
    match source {
        Some(ref path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }
    settings.validate()?;
    info!("Using city API at {}", settings.api.base_url);

    let api = Arc::new(WeatherApiClient::from_settings(&settings)?);
    let mut flow = SearchFlow::new(api);
    let renderer = ViewRenderer::with_settings(&settings.ui)?;
    let view = View {
        renderer,
        json: args.json,
    };

    match args.letter() {
        Some(letter) => {
            flow.input(letter);
            flow.submit().await;
            view.show(&flow)?;
            Ok(if flow.state().has_results() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            interactive(&mut flow, &view).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

struct View {
    renderer: ViewRenderer,
    json: bool,
}

impl View {
    fn show(&self, flow: &SearchFlow) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(flow.state())?);
        } else {
            print!("{}", self.renderer.render(flow.state())?);
        }
        Ok(())
    }
}

/// Read one line per input; each line is validated and submitted
async fn interactive(flow: &mut SearchFlow, view: &View) -> Result<()> {
    println!("Type a letter and press Enter. :clear resets, :quit exits.");
    view.show(flow)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Clear => {
                flow.clear();
                view.show(flow)?;
            }
            Command::Search(text) => {
                flow.input(text);
                match flow.begin_submit() {
                    Some(pending) => {
                        view.show(flow)?;
                        if !await_search(flow, pending, &mut lines).await? {
                            break;
                        }
                        view.show(flow)?;
                    }
                    None => view.show(flow)?,
                }
            }
        }
    }

    Ok(())
}

/// Drive a search while still listening for `:clear` and `:quit`
///
/// Returns `false` when the session should end.
async fn await_search(
    flow: &mut SearchFlow,
    pending: PendingSearch,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool> {
    let run = pending.run();
    tokio::pin!(run);

    loop {
        tokio::select! {
            outcome = &mut run => {
                flow.apply(outcome);
                return Ok(true);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(false);
                };
                match Command::parse(&line) {
                    Command::Quit => return Ok(false),
                    Command::Clear => {
                        // Dropping `run` cancels both requests.
                        flow.clear();
                        return Ok(true);
                    }
                    Command::Search(_) => {
                        debug!("Ignoring input while a search is in flight");
                        println!("Search in progress; :clear to cancel it.");
                    }
                }
            }
        }
    }
}
