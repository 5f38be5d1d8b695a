use serde::{Deserialize, Serialize};

use crate::collate::natural_cmp;
use crate::model::SpecRecord;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    SectionNumber,
    SectionName,
    Specification,
    Domain,
}

impl SortKey {
    fn value(self, record: &SpecRecord) -> &str {
        match self {
            Self::SectionNumber => record.section_key().unwrap_or_default(),
            Self::SectionName => &record.section_name,
            Self::Specification => &record.specification,
            Self::Domain => &record.domain,
        }
    }
}

fn haystack(record: &SpecRecord) -> String {
    [
        record.section_key().unwrap_or_default(),
        record.section_name.as_str(),
        record.specification.as_str(),
        record.domain.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Rows matching `search_term` (case-insensitive substring over all columns),
/// stably sorted by `sort_key` in numeric-aware order.
pub fn filter_and_sort<'a>(
    specs: &'a [SpecRecord],
    search_term: &str,
    sort_key: SortKey,
) -> Vec<&'a SpecRecord> {
    let term = search_term.to_lowercase();
    let mut rows = specs
        .iter()
        .filter(|record| term.is_empty() || haystack(record).contains(&term))
        .collect::<Vec<&SpecRecord>>();

    rows.sort_by(|a, b| {
        natural_cmp(
            &sort_key.value(a).to_lowercase(),
            &sort_key.value(b).to_lowercase(),
        )
    });
    rows
}
