use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use specseg::model::SpecRecord;
use specseg::specs::{SortKey, filter_and_sort};

use super::input::load_specs;
use crate::cli::SpecsArgs;
use crate::util::{now_utc_string, write_json_stdout};

#[derive(Debug, Clone, Serialize)]
pub struct SpecsReport {
    pub generated_at: String,
    pub search: String,
    pub sort_key: SortKey,
    pub returned: usize,
    pub rows: Vec<SpecRecord>,
}

pub fn build_report(specs: &[SpecRecord], search: &str, sort_key: SortKey) -> SpecsReport {
    let rows = filter_and_sort(specs, search, sort_key)
        .into_iter()
        .cloned()
        .collect::<Vec<SpecRecord>>();

    SpecsReport {
        generated_at: now_utc_string(),
        search: search.to_string(),
        sort_key,
        returned: rows.len(),
        rows,
    }
}

pub fn run(args: SpecsArgs) -> Result<()> {
    let specs = load_specs(&args.specs)?;
    let report = build_report(&specs, &args.search, args.sort_key.key());

    if args.json {
        return write_json_stdout(&report);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(output, "Results: {}", report.returned)?;
    for row in &report.rows {
        writeln!(
            output,
            "{}\t{}\t{}\t{}",
            row.section_key().unwrap_or("-"),
            row.section_name,
            row.specification,
            row.domain
        )?;
    }
    output.flush()?;
    Ok(())
}
