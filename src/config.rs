// src/config.rs
use crate::constants::SESSION_ENV_VAR;
use crate::controller::ControllerSettings;
use crate::error::AppError;
use crate::output::OutputFormat;
use crate::types::{ListingLocation, PageSize, SessionId};
use clap::Parser;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Shop listing page to start from (e.g., "https://shop.example/fr/shop/page/2")
    pub listing_url: String,

    /// Items per page; defaults to the page size the listing declares
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Maximum number of "load more" requests to issue
    #[arg(long, default_value_t = 50)]
    pub max_loads: u32,

    /// Write the collected products to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Emit JSON instead of one line per product
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Keep each product's HTML in JSON output
    #[arg(long, default_value_t = false)]
    pub markup: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub location: ListingLocation,
    pub session: Option<SessionId>,
    pub settings: ControllerSettings,
    pub max_loads: u32,
    pub output_file: Option<PathBuf>,
    pub format: OutputFormat,
}

impl LoaderConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let session = std::env::var(SESSION_ENV_VAR).ok();
        Self::from_parts(cli, session)
    }

    fn from_parts(cli: CommandLineInput, session: Option<String>) -> Result<Self, AppError> {
        let location = ListingLocation::parse(&cli.listing_url)?;

        let session = match session {
            Some(raw) if !raw.trim().is_empty() => Some(SessionId::new(raw)?),
            _ => {
                log::debug!("{} not set; requests carry no session header", SESSION_ENV_VAR);
                None
            }
        };

        let page_size = cli.page_size.map(PageSize::new).transpose()?;

        if cli.max_loads == 0 {
            return Err(AppError::MissingConfiguration(
                "--max-loads must be at least 1".to_string(),
            ));
        }

        let format = match (cli.json, cli.markup) {
            (true, markup) => OutputFormat::Json { markup },
            (false, _) => OutputFormat::Lines,
        };

        Ok(Self {
            location,
            session,
            settings: ControllerSettings {
                page_size,
                ..ControllerSettings::default()
            },
            max_loads: cli.max_loads,
            output_file: cli.output.map(PathBuf::from),
            format,
        })
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            location: ListingLocation::parse("http://localhost:8069/shop")
                .expect("Default listing location should be valid"),
            session: None,
            settings: ControllerSettings::default(),
            max_loads: 50,
            output_file: None,
            format: OutputFormat::Lines,
        }
    }
}
