use std::path::Path;

use anyhow::Result;
use specseg::model::{Fragment, FragmentPayload, Header, SpecRecord};
use specseg::outline::{duplicate_section_numbers, malformed_section_numbers};
use tracing::{info, warn};

use crate::util::read_json;

pub fn load_fragments(path: &Path) -> Result<Vec<Fragment>> {
    let payload: FragmentPayload = read_json(path)?;
    let fragments = payload.into_fragments();
    info!(path = %path.display(), fragments = fragments.len(), "loaded document fragments");
    Ok(fragments)
}

/// Loads headers and warns about numbers the outline cannot place cleanly.
pub fn load_headers(path: &Path) -> Result<Vec<Header>> {
    let headers: Vec<Header> = read_json(path)?;
    info!(path = %path.display(), headers = headers.len(), "loaded headers");

    for header in malformed_section_numbers(&headers)? {
        warn!(
            section_number = %header.section_number,
            section_name = %header.section_name,
            "section number is not dotted numeric"
        );
    }
    for number in duplicate_section_numbers(&headers) {
        warn!(section_number = %number, "duplicate section number");
    }

    Ok(headers)
}

pub fn load_specs(path: &Path) -> Result<Vec<SpecRecord>> {
    let specs: Vec<SpecRecord> = read_json(path)?;
    info!(path = %path.display(), specs = specs.len(), "loaded specification records");
    Ok(specs)
}
