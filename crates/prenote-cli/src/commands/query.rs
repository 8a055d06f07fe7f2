//! Query command - filter persisted notification records.

use std::path::PathBuf;

use clap::Args;
use console::style;

use prenote_core::{load_records, resolve_day_span, NotificationInfo};

/// Arguments for the query command.
#[derive(Args)]
pub struct QueryArgs {
    /// JSON array of notification records
    #[arg(required = true)]
    input: PathBuf,

    /// Show the notice that applies on this day (e.g. "sat", "Monday")
    #[arg(long)]
    day: Option<String>,

    /// Maximum hours of notice
    #[arg(long)]
    max_hours: Option<u32>,

    /// Notification type (hours, h24, on_request, business_day, ...)
    #[arg(long = "type")]
    notification_type: Option<String>,

    /// Minimum easiness score (0-100)
    #[arg(long)]
    min_easiness: Option<u32>,
}

pub async fn run(args: QueryArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    if let Some(day) = &args.day {
        if resolve_day_span(day).is_none() {
            anyhow::bail!("Unknown day: {}", day);
        }
    }

    let records = load_records(&args.input)?;
    let total = records.len();

    let mut matches: Vec<NotificationInfo> = records
        .into_iter()
        .map(NotificationInfo::from)
        .filter(|info| {
            info.matches_criteria(
                args.max_hours,
                args.notification_type.as_deref(),
                args.min_easiness,
            )
        })
        .collect();

    matches.sort_by(|a, b| {
        b.get_easiness_score()
            .cmp(&a.get_easiness_score())
            .then_with(|| a.icao().cmp(b.icao()))
    });

    let notice_header = match &args.day {
        Some(day) => format!("NOTICE ({})", day),
        None => "MAX NOTICE".to_string(),
    };
    println!(
        "{:<6} {:<14} {:>8}  {}",
        "ICAO", "TYPE", "EASINESS", notice_header
    );

    for info in &matches {
        let notice = match &args.day {
            Some(day) => info.get_notice_for_day(day),
            None => info.get_max_notice_hours(),
        };
        println!(
            "{:<6} {:<14} {:>8}  {}",
            info.icao(),
            info.notification_type().as_str(),
            info.get_easiness_score(),
            notice.map(|h| format!("{}h", h)).unwrap_or_else(|| "-".to_string())
        );
    }

    println!();
    println!(
        "{} {} of {} airports match",
        style("ℹ").blue(),
        matches.len(),
        total
    );

    Ok(())
}
