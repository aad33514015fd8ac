//! Command line arguments and interactive commands

use crate::config::Settings;
use clap::Parser;
use std::path::PathBuf;

/// Find how many cities start with a letter
#[derive(Debug, Parser)]
#[command(name = "city-letter-finder", version, about)]
pub struct Args {
    /// Letter to search for; starts an interactive session when omitted
    pub letter: Option<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override api.base_url
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override outgoing.request_timeout, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Print the final view state as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Positional letter with surrounding whitespace dropped, as in
    /// interactive mode
    pub fn letter(&self) -> Option<&str> {
        self.letter.as_deref().map(str::trim)
    }

    /// Apply command line overrides on top of loaded settings
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(ref url) = self.base_url {
            settings.api.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.outgoing.request_timeout = timeout;
        }
        if self.verbose {
            settings.general.debug = true;
        }
    }
}

/// One line typed in an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// New input, submitted right away
    Search(&'a str),
    Clear,
    Quit,
}

impl<'a> Command<'a> {
    /// Surrounding whitespace is dropped before the line is used as input.
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            ":clear" | ":c" => Command::Clear,
            ":quit" | ":q" => Command::Quit,
            text => Command::Search(text),
        }
    }
}
