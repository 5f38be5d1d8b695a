use std::io::{self, Write};

use anyhow::{Result, bail};
use serde::Serialize;
use specseg::model::{MatchTier, SectionSpan};
use specseg::segment::FallbackPolicy;
use specseg::session::Session;
use tracing::{info, warn};

use super::input::{load_fragments, load_headers};
use crate::cli::SectionsArgs;
use crate::config::EngineConfig;
use crate::util::{now_utc_string, write_json_pretty, write_json_stdout};

#[derive(Debug, Clone, Serialize)]
pub struct SectionEntry {
    pub section_number: String,
    pub section_name: String,
    pub matched: bool,
    pub tier: Option<MatchTier>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionsReport {
    pub generated_at: String,
    pub revision: String,
    pub fallback: FallbackPolicy,
    pub low_confidence_count: usize,
    pub sections: Vec<SectionEntry>,
}

pub fn build_report(args: &SectionsArgs, config: &EngineConfig) -> Result<SectionsReport> {
    let fallback = args
        .fallback
        .map(|mode| mode.policy())
        .unwrap_or(config.fallback);
    let fragments = load_fragments(&args.document)?;
    let headers = load_headers(&args.headers)?;
    let session = Session::with_document(fragments, fallback).with_headers(headers);

    let spans: Vec<&SectionSpan> = match args.section.as_deref() {
        Some(section_number) => match session.section_text(section_number) {
            Some(span) => vec![span],
            None => bail!("unknown section number: {section_number}"),
        },
        None => session.prime_sections(),
    };

    let mut sections = Vec::with_capacity(spans.len());
    for span in spans {
        let header = session.header(&span.section_number);
        let section_name = header
            .map(|header| header.section_name.clone())
            .unwrap_or_default();
        if span.is_low_confidence() {
            warn!(
                section_number = %span.section_number,
                section_name = %section_name,
                fallback = ?fallback,
                "header start line not found; span is low confidence"
            );
        }
        sections.push(SectionEntry {
            section_number: span.section_number.clone(),
            section_name,
            matched: span.matched,
            tier: span.tier,
            text: span.text.clone(),
        });
    }

    let low_confidence_count = sections.iter().filter(|entry| !entry.matched).count();
    info!(
        revision = %session.revision(),
        lines = session.lines().len(),
        sections = sections.len(),
        low_confidence = low_confidence_count,
        "segmented document"
    );

    Ok(SectionsReport {
        generated_at: now_utc_string(),
        revision: session.revision().to_string(),
        fallback,
        low_confidence_count,
        sections,
    })
}

pub fn run(args: SectionsArgs, config: &EngineConfig) -> Result<()> {
    let report = build_report(&args, config)?;

    if let Some(path) = &args.output {
        write_json_pretty(path, &report)?;
        info!(path = %path.display(), "wrote section report");
    }

    if args.json {
        return write_json_stdout(&report);
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    for entry in &report.sections {
        let marker = if entry.matched { "" } else { " (unmatched)" };
        writeln!(
            output,
            "== {} {}{}",
            entry.section_number, entry.section_name, marker
        )?;
        if entry.text.is_empty() {
            writeln!(output, "(empty)")?;
        } else {
            writeln!(output, "{}", entry.text)?;
        }
        writeln!(output)?;
    }
    output.flush()?;
    Ok(())
}
