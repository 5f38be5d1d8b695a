use anyhow::Result;
use specseg::session::Session;
use tracing::{info, warn};

use super::input::{load_fragments, load_headers};
use crate::cli::StatusArgs;
use crate::config::EngineConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub revision: String,
    pub fragments: usize,
    pub lines: usize,
    pub headers: usize,
    pub matched: usize,
    pub low_confidence: usize,
}

pub fn summarize(session: &Session) -> StatusSummary {
    let spans = session.prime_sections();
    let matched = spans.iter().filter(|span| span.matched).count();

    StatusSummary {
        revision: session.revision().to_string(),
        fragments: session.fragments().len(),
        lines: session.lines().len(),
        headers: session.headers().len(),
        matched,
        low_confidence: spans.len() - matched,
    }
}

pub fn run(args: StatusArgs, config: &EngineConfig) -> Result<()> {
    let fragments = load_fragments(&args.document)?;
    let mut session = Session::with_document(fragments, config.fallback);

    match &args.headers {
        Some(path) => session = session.with_headers(load_headers(path)?),
        None => warn!("no headers supplied; section status unavailable"),
    }

    let summary = summarize(&session);
    info!(
        revision = %summary.revision,
        fragments = summary.fragments,
        lines = summary.lines,
        headers = summary.headers,
        matched = summary.matched,
        low_confidence = summary.low_confidence,
        "document status"
    );

    Ok(())
}
