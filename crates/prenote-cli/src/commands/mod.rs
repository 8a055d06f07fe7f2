//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod parse;
pub mod query;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use prenote_core::{
    HassleScore, NotificationParser, ParsedNotificationRules, PrenoteConfig, PrenoteError,
};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

/// One airport's parse result and score, as written to JSON.
#[derive(Serialize)]
pub struct ParseOutput<'a> {
    pub parsed: &'a ParsedNotificationRules,
    pub hassle: &'a HassleScore,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("prenote")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PrenoteConfig> {
    if let Some(path) = config_path {
        return Ok(PrenoteConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config {}", default_path.display());
        Ok(PrenoteConfig::from_file(&default_path)?)
    } else {
        Ok(PrenoteConfig::default())
    }
}

/// Build the parser. A missing model credential is not fatal: complex text
/// then keeps its pattern rules with a warning.
pub fn build_parser(config: &PrenoteConfig, no_llm: bool) -> anyhow::Result<NotificationParser> {
    let parser = NotificationParser::from_config(config)?;

    if no_llm || !config.parser.use_llm_fallback {
        return Ok(parser.with_llm_fallback(false));
    }

    match config.model.build_extractor() {
        Ok(extractor) => Ok(parser.with_model(Arc::new(extractor))),
        Err(PrenoteError::Model(err)) => {
            warn!("Model fallback unavailable: {}", err);
            Ok(parser)
        }
        Err(err) => Err(err.into()),
    }
}
