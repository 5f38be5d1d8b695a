use serde::{Deserialize, Serialize};

use crate::matcher::{HeaderLocator, LineMatch, TieredLocator};
use crate::model::{Header, SectionSpan};

/// What a span holds when its own header cannot be located.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Start at line 0 and run to the next located header.
    #[default]
    DocumentStart,
    /// Produce an empty span.
    Empty,
}

#[derive(Debug, Clone)]
pub struct Segmenter<L = TieredLocator> {
    locator: L,
    fallback: FallbackPolicy,
}

impl Segmenter<TieredLocator> {
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self::with_locator(TieredLocator, fallback)
    }
}

impl Default for Segmenter<TieredLocator> {
    fn default() -> Self {
        Self::new(FallbackPolicy::default())
    }
}

impl<L: HeaderLocator> Segmenter<L> {
    pub fn with_locator(locator: L, fallback: FallbackPolicy) -> Self {
        Self { locator, fallback }
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Located start of every header, in header order.
    pub fn locate_all(&self, lines: &[String], headers: &[Header]) -> Vec<Option<LineMatch>> {
        headers
            .iter()
            .map(|header| self.locator.locate_match(lines, header))
            .collect()
    }

    pub fn section_span(&self, target: &Header, headers: &[Header], lines: &[String]) -> SectionSpan {
        let target_start = self.locator.locate_match(lines, target);
        let others = headers
            .iter()
            .filter(|header| header.section_number != target.section_number)
            .map(|header| self.locator.locate(lines, header));
        self.span_between(target, target_start, others, lines)
    }

    /// Builds the span for `headers[target_index]` from starts produced by
    /// [`Segmenter::locate_all`] over the same headers and lines.
    pub fn span_from_starts(
        &self,
        target_index: usize,
        headers: &[Header],
        starts: &[Option<LineMatch>],
        lines: &[String],
    ) -> SectionSpan {
        let target = &headers[target_index];
        let others = headers
            .iter()
            .zip(starts.iter())
            .filter(|(header, _)| header.section_number != target.section_number)
            .map(|(_, start)| start.map(|found| found.line));
        self.span_between(target, starts[target_index], others, lines)
    }

    fn span_between(
        &self,
        target: &Header,
        target_start: Option<LineMatch>,
        others: impl Iterator<Item = Option<usize>>,
        lines: &[String],
    ) -> SectionSpan {
        let matched = target_start.is_some();
        let empty = SectionSpan {
            section_number: target.section_number.clone(),
            text: String::new(),
            matched,
            tier: target_start.and_then(|found| found.tier),
        };

        if lines.is_empty() {
            return empty;
        }
        if !matched && self.fallback == FallbackPolicy::Empty {
            return empty;
        }

        let start = target_start.map_or(0, |found| found.line);
        let mut end = lines.len();
        for other in others {
            let index = other.unwrap_or(0);
            if index > start && index < end {
                end = index;
            }
        }

        SectionSpan {
            text: lines[start..end].join("\n").trim().to_string(),
            ..empty
        }
    }
}

/// Text owned by `target`: from its start line up to the nearest later start
/// of any other header.
pub fn section_text(target: &Header, headers: &[Header], lines: &[String]) -> String {
    Segmenter::new(FallbackPolicy::DocumentStart).section_span(target, headers, lines).text
}
