use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use specseg::model::Fragment;
use specseg::window::{FragmentRow, VisibleRange, WindowedList};
use tracing::debug;

use super::input::load_fragments;
use crate::cli::WindowArgs;
use crate::config::EngineConfig;
use crate::util::write_json_stdout;

#[derive(Debug, Clone, Serialize)]
pub struct WindowReport {
    pub item_count: usize,
    pub row_height: f64,
    pub overscan: usize,
    pub scroll_offset: f64,
    pub viewport_height: f64,
    pub total_extent: f64,
    pub range: VisibleRange,
    pub rows: Vec<FragmentRow>,
}

pub fn build_report(
    fragments: Vec<Fragment>,
    args: &WindowArgs,
    config: &EngineConfig,
) -> WindowReport {
    let row_height = args.row_height.unwrap_or(config.row_height);
    let overscan = args.overscan.unwrap_or(config.overscan);

    let mut list = WindowedList::new(row_height, overscan);
    list.set_items(fragments);
    list.resize(args.viewport_height);
    list.scroll_to(args.scroll_offset);

    let range = list.visible_range();
    debug!(start = range.start, end = range.end, items = list.len(), "computed visible range");

    WindowReport {
        item_count: list.len(),
        row_height,
        overscan,
        scroll_offset: args.scroll_offset,
        viewport_height: args.viewport_height,
        total_extent: list.total_extent(),
        range,
        rows: list.fragment_rows(),
    }
}

pub fn run(args: WindowArgs, config: &EngineConfig) -> Result<()> {
    let fragments = load_fragments(&args.document)?;
    let report = build_report(fragments, &args, config);

    if args.json {
        return write_json_stdout(&report);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    writeln!(
        output,
        "Rows {}..{} of {} (extent {:.0}px)",
        report.range.start, report.range.end, report.item_count, report.total_extent
    )?;
    for row in &report.rows {
        writeln!(
            output,
            "{}\t{:.0}\t{}\t{}\t{}",
            row.index,
            row.top,
            row.badge,
            row.page_label,
            row.content.replace('\n', " / ")
        )?;
    }
    output.flush()?;
    Ok(())
}
