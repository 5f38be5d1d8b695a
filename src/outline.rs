//! Hierarchical outline built from dotted section numbers.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use anyhow::{Context, Result};
use regex::Regex;

use crate::collate::natural_cmp;
use crate::model::Header;

/// Path segment ordered numerically, so `"2" < "10"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentKey(pub String);

impl Ord for SegmentKey {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for SegmentKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One dotted segment. `header` is set only on the node whose full path is
/// the header's section number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineNode {
    pub header: Option<Header>,
    pub children: BTreeMap<SegmentKey, OutlineNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry<'a> {
    pub depth: usize,
    pub header: &'a Header,
}

impl OutlineNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, segment: &str) -> Option<&OutlineNode> {
        self.children.get(&SegmentKey(segment.to_string()))
    }

    /// Pre-order walk of every node that carries a header, children in
    /// numeric order. Depth counts path segments, so top-level sections are 1.
    pub fn entries(&self) -> Vec<OutlineEntry<'_>> {
        let mut out = Vec::new();
        self.collect_entries(0, &mut out);
        out
    }

    fn collect_entries<'a>(&'a self, depth: usize, out: &mut Vec<OutlineEntry<'a>>) {
        for child in self.children.values() {
            if let Some(header) = &child.header {
                out.push(OutlineEntry {
                    depth: depth + 1,
                    header,
                });
            }
            child.collect_entries(depth + 1, out);
        }
    }
}

/// Builds the outline tree. Malformed numbers (empty segments, trailing
/// dots) still get a node; duplicates overwrite the earlier header.
pub fn build_tree(headers: &[Header]) -> OutlineNode {
    let mut root = OutlineNode::default();

    for header in headers {
        let mut node = &mut root;
        for part in header.section_number.split('.') {
            node = node
                .children
                .entry(SegmentKey(part.to_string()))
                .or_default();
        }
        node.header = Some(header.clone());
    }

    root
}

/// Headers in numeric order of their full section number.
pub fn sorted_headers(headers: &[Header]) -> Vec<&Header> {
    let mut sorted = headers.iter().collect::<Vec<&Header>>();
    sorted.sort_by(|a, b| natural_cmp(&a.section_number, &b.section_number));
    sorted
}

pub fn malformed_section_numbers(headers: &[Header]) -> Result<Vec<&Header>> {
    let pattern = Regex::new(r"^\d+(\.\d+)*$").context("failed to compile section number regex")?;
    Ok(headers
        .iter()
        .filter(|header| !pattern.is_match(&header.section_number))
        .collect())
}

pub fn duplicate_section_numbers(headers: &[Header]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for header in headers {
        let number = header.section_number.as_str();
        if !seen.insert(number) && !duplicates.contains(&number) {
            duplicates.push(number);
        }
    }
    duplicates
}
