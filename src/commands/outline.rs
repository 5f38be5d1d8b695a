use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use specseg::model::Header;
use specseg::outline::{build_tree, sorted_headers};

use super::input::load_headers;
use crate::cli::OutlineArgs;
use crate::util::{now_utc_string, write_json_stdout};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineRow {
    pub depth: usize,
    pub section_number: String,
    pub section_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlineReport {
    pub generated_at: String,
    pub flat: bool,
    pub rows: Vec<OutlineRow>,
}

fn row(depth: usize, header: &Header) -> OutlineRow {
    OutlineRow {
        depth,
        section_number: header.section_number.clone(),
        section_name: header.section_name.clone(),
    }
}

pub fn build_rows(headers: &[Header], flat: bool) -> Vec<OutlineRow> {
    if flat {
        return sorted_headers(headers)
            .into_iter()
            .map(|header| row(header.section_number.split('.').count(), header))
            .collect();
    }

    build_tree(headers)
        .entries()
        .into_iter()
        .map(|entry| row(entry.depth, entry.header))
        .collect()
}

pub fn run(args: OutlineArgs) -> Result<()> {
    let headers = load_headers(&args.headers)?;
    let report = OutlineReport {
        generated_at: now_utc_string(),
        flat: args.flat,
        rows: build_rows(&headers, args.flat),
    };

    if args.json {
        return write_json_stdout(&report);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    for row in &report.rows {
        let indent = if report.flat {
            String::new()
        } else {
            "  ".repeat(row.depth.saturating_sub(1))
        };
        writeln!(output, "{indent}{} {}", row.section_number, row.section_name)?;
    }
    output.flush()?;
    Ok(())
}
