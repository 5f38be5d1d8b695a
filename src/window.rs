//! Fixed-row-height list virtualization.
//!
//! Only rows inside `[start, end)` are materialized; the remaining rows exist
//! solely as reserved scroll extent (`item_count * row_height`).

use std::ops::Range;

use serde::Serialize;

use crate::model::Fragment;

pub const DEFAULT_ROW_HEIGHT: f64 = 72.0;
pub const DEFAULT_OVERSCAN: usize = 5;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Index range to materialize for the given scroll geometry. O(1).
///
/// Non-positive or non-finite row heights give an empty range; negative
/// offsets are treated as 0.
pub fn visible_range(
    item_count: usize,
    row_height: f64,
    scroll_offset: f64,
    viewport_height: f64,
    overscan: usize,
) -> VisibleRange {
    if item_count == 0 || !row_height.is_finite() || row_height <= 0.0 {
        return VisibleRange::default();
    }

    let scroll_offset = clamp_non_negative(scroll_offset);
    let viewport_height = clamp_non_negative(viewport_height);

    let first_row = (scroll_offset / row_height).floor() as usize;
    let last_row = ((scroll_offset + viewport_height) / row_height).ceil() as usize;

    let start = first_row.saturating_sub(overscan).min(item_count);
    let end = last_row.saturating_add(overscan).min(item_count);

    VisibleRange {
        start,
        end: end.max(start),
    }
}

pub fn total_extent(item_count: usize, row_height: f64) -> f64 {
    item_count as f64 * row_height
}

fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// A scrollable list that tracks its own scroll signals.
#[derive(Debug, Clone)]
pub struct WindowedList<T> {
    items: Vec<T>,
    row_height: f64,
    overscan: usize,
    scroll_offset: f64,
    viewport_height: f64,
}

impl<T> WindowedList<T> {
    pub fn new(row_height: f64, overscan: usize) -> Self {
        Self {
            items: Vec::new(),
            row_height,
            overscan,
            scroll_offset: 0.0,
            viewport_height: 0.0,
        }
    }

    /// Replaces the items and scrolls back to the top.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.scroll_offset = 0.0;
    }

    pub fn scroll_to(&mut self, scroll_offset: f64) {
        self.scroll_offset = scroll_offset;
    }

    pub fn resize(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_extent(&self) -> f64 {
        total_extent(self.items.len(), self.row_height)
    }

    pub fn visible_range(&self) -> VisibleRange {
        visible_range(
            self.items.len(),
            self.row_height,
            self.scroll_offset,
            self.viewport_height,
            self.overscan,
        )
    }

    /// `(index, top offset, item)` for each materialized row.
    pub fn rows(&self) -> impl Iterator<Item = (usize, f64, &T)> + '_ {
        let range = self.visible_range().as_range();
        let row_height = self.row_height;
        self.items[range.clone()]
            .iter()
            .zip(range)
            .map(move |(item, index)| (index, index as f64 * row_height, item))
    }
}

impl<T> Default for WindowedList<T> {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_HEIGHT, DEFAULT_OVERSCAN)
    }
}

/// Display form of one fragment row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentRow {
    pub index: usize,
    pub top: f64,
    pub badge: String,
    pub page_label: String,
    pub content: String,
}

impl FragmentRow {
    pub fn new(index: usize, top: f64, fragment: &Fragment) -> Self {
        Self {
            index,
            top,
            badge: fragment.kind.as_str().to_string(),
            page_label: match fragment.page {
                Some(page) if page > 0 => format!("Page {page}"),
                _ => "Page N/A".to_string(),
            },
            content: fragment.content.clone(),
        }
    }
}

impl WindowedList<Fragment> {
    pub fn fragment_rows(&self) -> Vec<FragmentRow> {
        self.rows()
            .map(|(index, top, fragment)| FragmentRow::new(index, top, fragment))
            .collect()
    }
}
