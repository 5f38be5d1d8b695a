use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::model::{Header, SpecRecord};

/// Per-section "a specification was produced" flags.
///
/// The mapping belongs to one header collection; `reset` replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionProgressTracker {
    flags: Option<BTreeMap<String, bool>>,
}

impl SectionProgressTracker {
    pub fn new(headers: &[Header]) -> Self {
        let mut tracker = Self::default();
        tracker.reset(headers);
        tracker
    }

    pub fn reset(&mut self, headers: &[Header]) -> &BTreeMap<String, bool> {
        self.flags.insert(
            headers
                .iter()
                .map(|header| (header.section_number.clone(), false))
                .collect(),
        )
    }

    /// Unknown section numbers are accepted and recorded.
    pub fn mark_complete(&mut self, section_number: &str) {
        self.flags
            .get_or_insert_with(BTreeMap::new)
            .insert(section_number.to_string(), true);
    }

    /// Marks each distinct section of a result batch; returns how many.
    pub fn mark_from_specs(&mut self, specs: &[SpecRecord]) -> usize {
        let mut seen = HashSet::<&str>::new();
        for key in specs.iter().filter_map(SpecRecord::section_key) {
            if seen.insert(key) {
                self.mark_complete(key);
            }
        }
        seen.len()
    }

    pub fn is_complete(&self, section_number: &str) -> bool {
        self.flags
            .as_ref()
            .and_then(|flags| flags.get(section_number).copied())
            .unwrap_or(false)
    }

    pub fn snapshot_complete(&self) -> BTreeSet<String> {
        self.flags
            .iter()
            .flatten()
            .filter(|(_, complete)| **complete)
            .map(|(section, _)| section.clone())
            .collect()
    }

    pub fn tracked_count(&self) -> usize {
        self.flags.as_ref().map_or(0, BTreeMap::len)
    }
}
