//! Parse command - extract requirements from one airport's text.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::info;

use prenote_core::{score_hassle, HassleScore, NotificationRule, ParsedNotificationRules};

use super::{build_parser, load_config, OutputFormat, ParseOutput};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Notification text
    #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
    text: Option<String>,

    /// Read the notification text from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Airport ICAO code
    #[arg(long, default_value = "ZZZZ")]
    icao: String,

    /// Source field identifier recorded with the result
    #[arg(long, default_value = "0")]
    source_field: i64,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Never escalate to the language model
    #[arg(long)]
    no_llm: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            fs::read_to_string(path)?
        }
        (None, None) => anyhow::bail!("Provide --text or --file"),
    };

    let parser = build_parser(&config, args.no_llm)?;
    let parsed = parser.parse(&args.icao, &text, args.source_field).await;
    let hassle = score_hassle(&parsed);

    info!("Parsed {} in {:?}", args.icao, start.elapsed());

    match args.format {
        OutputFormat::Json => {
            let output = ParseOutput {
                parsed: &parsed,
                hassle: &hassle,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print!("{}", format_text(&parsed, &hassle)),
    }

    Ok(())
}

fn format_text(parsed: &ParsedNotificationRules, hassle: &HassleScore) -> String {
    let mut output = String::new();

    output.push_str(&format!("Airport: {}\n", parsed.icao));
    output.push_str(&format!(
        "Hassle:  {} ({:.2})\n",
        style(hassle.level.label()).bold(),
        hassle.score
    ));
    output.push_str(&format!("Summary: {}\n", hassle.summary));

    if parsed.has_rules() {
        output.push_str("\nRules:\n");
        for (i, rule) in parsed.rules.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, describe(rule)));
        }
    }

    if !parsed.parse_warnings.is_empty() {
        output.push_str(&format!("\n{}\n", style("Warnings:").yellow()));
        for warning in &parsed.parse_warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}

fn describe(rule: &NotificationRule) -> String {
    let mut parts = vec![
        rule.rule_type.as_str().to_string(),
        rule.notification_type.as_str().to_string(),
    ];
    if let Some(hours) = rule.hours_notice {
        parts.push(format!("{}h", hours));
    }
    if let Some(span) = rule.day_span() {
        parts.push(span.label());
    }
    if rule.includes_holidays {
        parts.push("+HOL".to_string());
    }
    if let Some(time) = &rule.specific_time {
        parts.push(format!("before {}", time));
    }
    if rule.schengen_only {
        parts.push("schengen".to_string());
    } else if rule.non_schengen_only {
        parts.push("non-schengen".to_string());
    }

    let method = match rule.extraction_method {
        prenote_core::ExtractionMethod::Pattern => "pattern",
        prenote_core::ExtractionMethod::Model => "model",
    };
    format!("{} [{}, {:.2}]", parts.join(" "), method, rule.confidence)
}
