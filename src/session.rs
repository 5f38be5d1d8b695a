//! Document state for one revision of (fragments, headers).
//!
//! Derived data (lines, located header starts, section spans, progress) is
//! owned here and is never patched in place across revisions: a new document
//! or a new header set produces a new `Session`.

use std::cell::OnceCell;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::lines::extract_lines;
use crate::matcher::LineMatch;
use crate::model::{Fragment, Header, SectionSpan, SpecRecord};
use crate::outline::{OutlineNode, build_tree, sorted_headers};
use crate::progress::SectionProgressTracker;
use crate::segment::{FallbackPolicy, Segmenter};

#[derive(Debug)]
pub struct Session {
    fragments: Arc<[Fragment]>,
    lines: Arc<[String]>,
    headers: Vec<Header>,
    header_index: HashMap<String, usize>,
    segmenter: Segmenter,
    starts: OnceCell<Vec<Option<LineMatch>>>,
    spans: Vec<OnceCell<SectionSpan>>,
    progress: SectionProgressTracker,
    revision: String,
}

impl Session {
    pub fn with_document(fragments: Vec<Fragment>, fallback: FallbackPolicy) -> Self {
        let lines = extract_lines(&fragments);
        Self::assemble(fragments.into(), lines.into(), Vec::new(), fallback)
    }

    /// Same document, new header set. Spans and progress start over.
    pub fn with_headers(&self, headers: Vec<Header>) -> Self {
        Self::assemble(
            Arc::clone(&self.fragments),
            Arc::clone(&self.lines),
            headers,
            self.segmenter.fallback(),
        )
    }

    fn assemble(
        fragments: Arc<[Fragment]>,
        lines: Arc<[String]>,
        headers: Vec<Header>,
        fallback: FallbackPolicy,
    ) -> Self {
        // First occurrence wins, so lookups agree with span identity.
        let mut header_index = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            header_index
                .entry(header.section_number.clone())
                .or_insert(index);
        }

        Self {
            revision: revision_fingerprint(&fragments, &headers),
            spans: headers.iter().map(|_| OnceCell::new()).collect(),
            progress: SectionProgressTracker::new(&headers),
            segmenter: Segmenter::new(fallback),
            starts: OnceCell::new(),
            header_index,
            fragments,
            lines,
            headers,
        }
    }

    pub fn revision(&self) -> &str {
        &self.revision
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn header(&self, section_number: &str) -> Option<&Header> {
        self.header_index
            .get(section_number)
            .map(|index| &self.headers[*index])
    }

    fn starts(&self) -> &[Option<LineMatch>] {
        self.starts
            .get_or_init(|| self.segmenter.locate_all(&self.lines, &self.headers))
    }

    /// Cached span for a section, computed on first request.
    pub fn section_text(&self, section_number: &str) -> Option<&SectionSpan> {
        let index = *self.header_index.get(section_number)?;
        Some(self.spans[index].get_or_init(|| {
            self.segmenter
                .span_from_starts(index, &self.headers, self.starts(), &self.lines)
        }))
    }

    /// Computes every span up front; returns them in header order.
    pub fn prime_sections(&self) -> Vec<&SectionSpan> {
        self.headers
            .iter()
            .filter_map(|header| self.section_text(&header.section_number))
            .collect()
    }

    pub fn outline(&self) -> OutlineNode {
        build_tree(&self.headers)
    }

    pub fn sorted_headers(&self) -> Vec<&Header> {
        sorted_headers(&self.headers)
    }

    pub fn mark_complete(&mut self, section_number: &str) {
        self.progress.mark_complete(section_number);
    }

    pub fn mark_from_specs(&mut self, specs: &[SpecRecord]) -> usize {
        self.progress.mark_from_specs(specs)
    }

    pub fn snapshot_complete(&self) -> BTreeSet<String> {
        self.progress.snapshot_complete()
    }

    pub fn progress(&self) -> &SectionProgressTracker {
        &self.progress
    }
}

fn revision_fingerprint(fragments: &[Fragment], headers: &[Header]) -> String {
    let mut hasher = Sha256::new();

    for fragment in fragments {
        hasher.update(fragment.kind.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(fragment.page.map(|page| page.to_string()).unwrap_or_default());
        hasher.update([0u8]);
        hasher.update(fragment.content.as_bytes());
        hasher.update([0xffu8]);
    }
    hasher.update([0xfeu8]);
    for header in headers {
        hasher.update(header.section_number.as_bytes());
        hasher.update([0u8]);
        hasher.update(header.section_name.as_bytes());
        hasher.update([0xffu8]);
    }

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchTier;

    fn document() -> Vec<Fragment> {
        vec![
            Fragment::text("1 Intro").on_page(1),
            Fragment::text("a"),
            Fragment::table("b\nc"),
            Fragment::text("2 Scope").on_page(2),
            Fragment::text("d"),
        ]
    }

    fn headers() -> Vec<Header> {
        vec![Header::new("1", "Intro"), Header::new("2", "Scope")]
    }

    #[test]
    fn new_document_has_no_headers_or_progress() {
        let session = Session::with_document(document(), FallbackPolicy::DocumentStart);

        assert_eq!(session.lines().len(), 6);
        assert!(session.headers().is_empty());
        assert!(session.section_text("1").is_none());
        assert!(session.snapshot_complete().is_empty());
    }

    #[test]
    fn section_text_is_cached_and_stable() {
        let session = Session::with_document(document(), FallbackPolicy::DocumentStart)
            .with_headers(headers());

        let first = session.section_text("1").expect("section 1 exists");
        assert_eq!(first.text, "1 Intro\na\nb\nc");
        let again = session.section_text("1").expect("section 1 exists");
        assert!(std::ptr::eq(first, again));
        assert_eq!(
            session.section_text("2").map(|span| span.text.as_str()),
            Some("2 Scope\nd")
        );
    }

    #[test]
    fn cached_spans_carry_the_located_tier() {
        let session = Session::with_document(document(), FallbackPolicy::DocumentStart)
            .with_headers(vec![Header::new("1", "Intro"), Header::new("7", "Absent")]);

        let intro = session.section_text("1").expect("section 1 exists");
        assert_eq!(intro.tier, Some(MatchTier::Combo));
        let absent = session.section_text("7").expect("section 7 exists");
        assert!(!absent.matched);
        assert_eq!(absent.tier, None);
    }

    #[test]
    fn prime_sections_returns_spans_in_header_order() {
        let session = Session::with_document(document(), FallbackPolicy::DocumentStart)
            .with_headers(headers());
        let spans = session.prime_sections();

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].section_number, "1");
        assert_eq!(spans[1].section_number, "2");
    }

    #[test]
    fn new_header_set_replaces_progress_and_spans() {
        let base = Session::with_document(document(), FallbackPolicy::DocumentStart);
        let mut first = base.with_headers(headers());
        first.mark_complete("1");
        assert_eq!(first.snapshot_complete().len(), 1);

        let second = first.with_headers(vec![Header::new("2", "Scope")]);
        assert!(second.snapshot_complete().is_empty());
        assert!(second.section_text("1").is_none());
        assert_eq!(
            second.section_text("2").map(|span| span.text.as_str()),
            Some("2 Scope\nd")
        );
        assert_ne!(first.revision(), second.revision());
        assert_eq!(first.lines(), second.lines());
    }

    #[test]
    fn revision_is_deterministic() {
        let a = Session::with_document(document(), FallbackPolicy::DocumentStart)
            .with_headers(headers());
        let b = Session::with_document(document(), FallbackPolicy::DocumentStart)
            .with_headers(headers());
        assert_eq!(a.revision(), b.revision());
        assert_eq!(a.revision().len(), 64);
    }

    #[test]
    fn specs_drive_progress() {
        let mut session = Session::with_document(document(), FallbackPolicy::DocumentStart)
            .with_headers(headers());
        let specs = vec![SpecRecord {
            section_number: Some("2".to_string()),
            specification: "M8 bolt".to_string(),
            ..SpecRecord::default()
        }];

        assert_eq!(session.mark_from_specs(&specs), 1);
        assert!(session.progress().is_complete("2"));
        assert!(!session.progress().is_complete("1"));
    }

    #[test]
    fn outline_and_listing_follow_headers() {
        let session = Session::with_document(document(), FallbackPolicy::DocumentStart)
            .with_headers(vec![Header::new("10", "Annex"), Header::new("2", "Scope")]);

        let listing = session
            .sorted_headers()
            .into_iter()
            .map(|header| header.section_number.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(listing, vec!["2", "10"]);
        assert_eq!(session.outline().entries().len(), 2);
        assert_eq!(session.header("10").map(|h| h.section_name.as_str()), Some("Annex"));
    }
}
