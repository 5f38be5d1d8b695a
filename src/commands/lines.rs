use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use specseg::lines::extract_lines;

use super::input::load_fragments;
use crate::cli::LinesArgs;
use crate::util::{now_utc_string, write_json_stdout};

#[derive(Debug, Clone, Serialize)]
pub struct LinesReport {
    pub generated_at: String,
    pub document: String,
    pub line_count: usize,
    pub lines: Vec<String>,
}

pub fn build_report(args: &LinesArgs) -> Result<LinesReport> {
    let fragments = load_fragments(&args.document)?;
    let lines = extract_lines(&fragments);

    Ok(LinesReport {
        generated_at: now_utc_string(),
        document: args.document.display().to_string(),
        line_count: lines.len(),
        lines,
    })
}

pub fn run(args: LinesArgs) -> Result<()> {
    let report = build_report(&args)?;
    if args.json {
        return write_json_stdout(&report);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    for (index, line) in report.lines.iter().enumerate() {
        writeln!(output, "{index}\t{line}")?;
    }
    output.flush()?;
    Ok(())
}
