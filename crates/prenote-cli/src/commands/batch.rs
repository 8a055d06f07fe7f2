//! Batch command - parse many airports concurrently.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::{stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::{debug, warn};

use prenote_core::{condense, score_hassle, HassleScore, ParsedNotificationRules};

use super::{build_parser, load_config, ParseOutput};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// CSV file with columns icao, source_field, text
    #[arg(required = true)]
    input: PathBuf,

    /// JSON lines output (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a summary CSV
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Also write condensed records for the query command
    #[arg(long)]
    records: Option<PathBuf>,

    /// Number of airports parsed concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Never escalate to the language model
    #[arg(long)]
    no_llm: bool,
}

#[derive(Debug, Deserialize)]
struct BatchRow {
    icao: String,
    #[serde(default)]
    source_field: i64,
    text: String,
}

/// Result for one airport.
struct AirportResult {
    index: usize,
    parsed: ParsedNotificationRules,
    hassle: HassleScore,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let (rows, skipped) = read_rows(&args.input)?;
    if rows.is_empty() {
        anyhow::bail!("No rows to process in {}", args.input.display());
    }

    eprintln!(
        "{} Found {} airports to process",
        style("ℹ").blue(),
        rows.len()
    );

    let parser = build_parser(&config, args.no_llm)?;

    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} airports")?
            .progress_chars("=>-"),
    );

    let mut results: Vec<AirportResult> = stream::iter(rows.into_iter().enumerate())
        .map(|(index, row)| {
            let parser = parser.clone();
            let pb = pb.clone();
            async move {
                let parsed = parser.parse(&row.icao, &row.text, row.source_field).await;
                let hassle = score_hassle(&parsed);
                pb.inc(1);
                AirportResult {
                    index,
                    parsed,
                    hassle,
                }
            }
        })
        .buffer_unordered(args.jobs.max(1))
        .collect()
        .await;

    pb.finish_and_clear();
    results.sort_by_key(|r| r.index);

    write_results(args.output.as_deref(), &results)?;

    if let Some(path) = &args.summary {
        write_summary(path, &results)?;
        eprintln!("{} Summary written to {}", style("✓").green(), path.display());
    }

    if let Some(path) = &args.records {
        let records: Vec<_> = results
            .iter()
            .map(|r| condense(&r.parsed, &r.hassle))
            .collect();
        fs::write(path, serde_json::to_string_pretty(&records)?)?;
        eprintln!("{} Records written to {}", style("✓").green(), path.display());
    }

    let warned = results
        .iter()
        .filter(|r| !r.parsed.parse_warnings.is_empty())
        .count();

    eprintln!();
    eprintln!(
        "{} Processed {} airports in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} with warnings, {} rows skipped",
        style(warned).yellow(),
        style(skipped).red()
    );

    Ok(())
}

/// Read all rows; malformed rows are skipped and counted.
fn read_rows(path: &Path) -> anyhow::Result<(Vec<BatchRow>, usize)> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    let mut skipped = 0;

    for (line, record) in reader.deserialize::<BatchRow>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => {
                warn!("Skipping row {}: {}", line + 1, e);
                skipped += 1;
            }
        }
    }

    Ok((rows, skipped))
}

fn write_results(output: Option<&Path>, results: &[AirportResult]) -> anyhow::Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };

    for result in results {
        let line = ParseOutput {
            parsed: &result.parsed,
            hassle: &result.hassle,
        };
        serde_json::to_writer(&mut writer, &line)?;
        writeln!(writer)?;
    }
    writer.flush()?;

    if let Some(path) = output {
        debug!("Wrote {} results to {}", results.len(), path.display());
    }
    Ok(())
}

fn write_summary(path: &Path, results: &[AirportResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "icao",
        "source_field",
        "rules",
        "level",
        "score",
        "max_hours_notice",
        "warnings",
        "summary",
    ])?;

    for result in results {
        let parsed = &result.parsed;
        let hassle = &result.hassle;
        wtr.write_record([
            parsed.icao.as_str(),
            &parsed.source_field_id.to_string(),
            &parsed.rules.len().to_string(),
            hassle.level.label(),
            &format!("{:.2}", hassle.score),
            &hassle
                .max_hours_notice
                .map(|h| h.to_string())
                .unwrap_or_default(),
            &parsed.parse_warnings.join(" | "),
            hassle.summary.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
