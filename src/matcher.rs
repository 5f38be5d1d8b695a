//! Locating the line at which a header's section begins.
//!
//! Matching is tiered and always takes the first qualifying line in document
//! order:
//!
//! 1. the normalized line starts with `"<number> <name>"`;
//! 2. the line starts with the number and contains the name anywhere;
//! 3. the line contains the name anywhere.
//!
//! Failing all three, callers fall back to line 0.

use crate::model::{Header, MatchTier};
use crate::normalize::normalize;

/// A located start line and, for tiered strategies, the tier that hit.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LineMatch {
    pub line: usize,
    pub tier: Option<MatchTier>,
}

/// Strategy for finding a header's start line. `None` means no match.
pub trait HeaderLocator {
    fn locate(&self, lines: &[String], header: &Header) -> Option<usize>;

    fn locate_match(&self, lines: &[String], header: &Header) -> Option<LineMatch> {
        self.locate(lines, header)
            .map(|line| LineMatch { line, tier: None })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TieredLocator;

impl TieredLocator {
    pub fn locate_with_tier(&self, lines: &[String], header: &Header) -> Option<(usize, MatchTier)> {
        let normalized = lines.iter().map(|line| normalize(line)).collect::<Vec<String>>();
        locate_normalized(&normalized, header)
    }
}

impl HeaderLocator for TieredLocator {
    fn locate(&self, lines: &[String], header: &Header) -> Option<usize> {
        self.locate_with_tier(lines, header).map(|(index, _)| index)
    }

    fn locate_match(&self, lines: &[String], header: &Header) -> Option<LineMatch> {
        self.locate_with_tier(lines, header).map(|(line, tier)| LineMatch {
            line,
            tier: Some(tier),
        })
    }
}

/// Tiered search over lines that have already been normalized.
pub(crate) fn locate_normalized(normalized: &[String], header: &Header) -> Option<(usize, MatchTier)> {
    let combo = normalize(&header.label());
    let number = normalize(&header.section_number);
    let name = normalize(&header.section_name);

    if let Some(index) = normalized.iter().position(|line| line.starts_with(&combo)) {
        return Some((index, MatchTier::Combo));
    }

    if !number.is_empty()
        && let Some(index) = normalized
            .iter()
            .position(|line| line.starts_with(&number) && line.contains(&name))
    {
        return Some((index, MatchTier::NumberAndName));
    }

    if !name.is_empty()
        && let Some(index) = normalized.iter().position(|line| line.contains(&name))
    {
        return Some((index, MatchTier::Name));
    }

    None
}

/// Start line of `header`, or 0 when nothing matches.
pub fn find_start_line(lines: &[String], header: &Header) -> usize {
    TieredLocator.locate(lines, header).unwrap_or(0)
}
