//! Report Output
//!
//! Writes run reports as JSON and renders the metric series as a text table.

use std::fs;
use std::path::Path;

use rumor_events::{RoundMetrics, RunOutcome, RunReport};

/// Write `reports` to `path` as pretty JSON, creating parent directories.
///
/// A single report is written as an object, several as an array.
pub fn write_reports(reports: &[RunReport], path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = match reports {
        [single] => serde_json::to_string_pretty(single),
        many => serde_json::to_string_pretty(many),
    }
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    fs::write(path, json)
}

/// Per-round counts, one row per round: `round heard L0 L1 ...`.
pub fn format_series_table(series: &[RoundMetrics]) -> String {
    let depth = series.first().map(|m| m.attained.len()).unwrap_or(0);
    let mut table = String::new();

    table.push_str(&format!("{:>6} {:>6}", "round", "heard"));
    for level in 0..depth {
        table.push_str(&format!(" {:>6}", format!("L{}", level)));
    }
    table.push('\n');

    for metrics in series {
        table.push_str(&format!("{:>6} {:>6}", metrics.round, metrics.heard));
        for count in &metrics.attained {
            table.push_str(&format!(" {:>6}", count));
        }
        table.push('\n');
    }

    table
}

/// One-line description of how a run ended.
pub fn describe_outcome(report: &RunReport) -> String {
    let agents = report.settings.agent_count;
    let depth = report.settings.knowledge_depth;
    match report.outcome {
        RunOutcome::Terminated { rounds } => format!(
            "All {} agents reached knowledge depth {} after {} rounds.",
            agents, depth, rounds
        ),
        RunOutcome::Stalled { rounds } => {
            let heard = report.metrics.last().map(|m| m.heard).unwrap_or(0);
            format!(
                "Stalled after {} rounds: {} of {} agents heard the rumor; depth {} is unreachable.",
                rounds, heard, agents, depth
            )
        }
        RunOutcome::RoundLimit { rounds } => {
            format!("Stopped at the round limit ({} rounds) before completion.", rounds)
        }
        RunOutcome::Aborted { rounds } => {
            format!("Aborted in round {}: the round could not be propagated.", rounds)
        }
    }
}
