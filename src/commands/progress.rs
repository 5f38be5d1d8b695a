use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use specseg::model::{Header, SpecRecord};
use specseg::outline::sorted_headers;
use specseg::progress::SectionProgressTracker;
use tracing::info;

use super::input::{load_headers, load_specs};
use crate::cli::ProgressArgs;
use crate::util::{now_utc_string, write_json_stdout};

#[derive(Debug, Clone, Serialize)]
pub struct ProgressRow {
    pub section_number: String,
    pub section_name: String,
    pub complete: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub generated_at: String,
    pub tracked: usize,
    pub completed: Vec<String>,
    pub rows: Vec<ProgressRow>,
}

pub fn build_report(headers: &[Header], specs: &[SpecRecord]) -> ProgressReport {
    let mut tracker = SectionProgressTracker::new(headers);
    let marked = tracker.mark_from_specs(specs);
    let completed = tracker.snapshot_complete();

    info!(
        headers = headers.len(),
        specs = specs.len(),
        sections_marked = marked,
        completed = completed.len(),
        "computed section progress"
    );

    let rows = sorted_headers(headers)
        .into_iter()
        .map(|header| ProgressRow {
            section_number: header.section_number.clone(),
            section_name: header.section_name.clone(),
            complete: tracker.is_complete(&header.section_number),
        })
        .collect();

    ProgressReport {
        generated_at: now_utc_string(),
        tracked: tracker.tracked_count(),
        completed: completed.into_iter().collect(),
        rows,
    }
}

pub fn run(args: ProgressArgs) -> Result<()> {
    let headers = load_headers(&args.headers)?;
    let specs = load_specs(&args.specs)?;
    let report = build_report(&headers, &specs);

    if args.json {
        return write_json_stdout(&report);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    for row in &report.rows {
        let mark = if row.complete { "x" } else { " " };
        writeln!(output, "[{mark}] {} {}", row.section_number, row.section_name)?;
    }
    writeln!(
        output,
        "{} of {} sections complete",
        report.rows.iter().filter(|row| row.complete).count(),
        report.rows.len()
    )?;
    output.flush()?;
    Ok(())
}
