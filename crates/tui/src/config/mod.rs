use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use clap::Parser;
use engine::{GroupDraft, NOTICE_TTL};
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/splitter.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub notice_ttl_secs: u64,
    pub tick_ms: u64,
    pub currency_symbol: String,
    pub date_format: String,
    pub log_level: String,
    pub log_file: Option<String>,
    /// Values the group form starts with. Still validated on submit.
    pub group: GroupPrefill,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notice_ttl_secs: NOTICE_TTL.as_secs(),
            tick_ms: 200,
            currency_symbol: "$".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            log_level: "info".to_string(),
            log_file: None,
            group: GroupPrefill::default(),
        }
    }
}

impl AppConfig {
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GroupPrefill {
    pub name: Option<String>,
    pub place: Option<String>,
    pub payers: Vec<String>,
    pub date: Option<String>,
}

impl GroupPrefill {
    pub fn to_draft(&self) -> GroupDraft {
        let mut draft = GroupDraft::default();
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(place) = &self.place {
            draft.place = place.clone();
        }
        if !self.payers.is_empty() {
            draft.payers = self.payers.clone();
        }
        if let Some(date) = &self.date {
            draft.date = date.clone();
        }
        draft
    }
}

#[derive(Debug, Parser)]
#[command(name = "splitter_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Seconds a validation message stays on screen.
    #[arg(long)]
    notice_ttl_secs: Option<u64>,
    /// Currency symbol shown next to amounts.
    #[arg(long)]
    currency_symbol: Option<String>,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<String>,
    /// Prefill the group name.
    #[arg(long)]
    group: Option<String>,
    /// Prefill the place.
    #[arg(long)]
    place: Option<String>,
    /// Prefill a payer (repeatable).
    #[arg(long = "payer")]
    payers: Vec<String>,
    /// Prefill the date (YYYY-MM-DD).
    #[arg(long)]
    date: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPLITTER_TUI"));
    let settings: AppConfig = builder.build()?.try_deserialize()?;

    let settings = apply_args(settings, args);
    check_date_format(&settings.date_format)?;
    Ok(settings)
}

/// Rejects strftime patterns chrono can't render.
fn check_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(AppError::DateFormat(format.to_string()));
    }
    Ok(())
}

fn apply_args(mut settings: AppConfig, args: Args) -> AppConfig {
    if let Some(ttl) = args.notice_ttl_secs {
        settings.notice_ttl_secs = ttl;
    }
    if let Some(symbol) = args.currency_symbol {
        settings.currency_symbol = symbol;
    }
    if let Some(level) = args.log_level {
        settings.log_level = level;
    }
    if let Some(file) = args.log_file {
        settings.log_file = Some(file);
    }
    if let Some(name) = args.group {
        settings.group.name = Some(name);
    }
    if let Some(place) = args.place {
        settings.group.place = Some(place);
    }
    if !args.payers.is_empty() {
        settings.group.payers = args.payers;
    }
    if let Some(date) = args.date {
        settings.group.date = Some(date);
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_file_values() {
        let args = Args::parse_from([
            "splitter_tui",
            "--notice-ttl-secs",
            "2",
            "--group",
            "Lunch",
            "--payer",
            "Alice",
            "--payer",
            "Bob",
        ]);
        let settings = apply_args(AppConfig::default(), args);
        assert_eq!(settings.notice_ttl(), Duration::from_secs(2));
        assert_eq!(settings.currency_symbol, "$");

        let draft = settings.group.to_draft();
        assert_eq!(draft.name, "Lunch");
        assert_eq!(draft.payers, vec!["Alice", "Bob"]);
        assert_eq!(draft.place, "");
    }

    #[test]
    fn date_format_is_validated() {
        assert!(check_date_format(&AppConfig::default().date_format).is_ok());
        assert!(check_date_format("%Y-%m-%d").is_ok());
        assert!(matches!(
            check_date_format("%Q"),
            Err(AppError::DateFormat(format)) if format == "%Q"
        ));
    }

    #[test]
    fn defaults_match_engine_ttl() {
        assert_eq!(AppConfig::default().notice_ttl(), NOTICE_TTL);
        assert_eq!(GroupPrefill::default().to_draft(), GroupDraft::default());
    }
}
