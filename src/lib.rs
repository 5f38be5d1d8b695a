//! Section segmentation for extracted documents.
//!
//! Given the ordered fragments of a document and the section headers detected
//! in it, this crate reconstructs the text span owned by each header, arranges
//! headers into a numerically ordered outline, tracks which sections already
//! have extracted specifications, and computes the row window a large
//! fragment list needs to materialize while scrolling.

pub mod collate;
pub mod lines;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod outline;
pub mod progress;
pub mod segment;
pub mod session;
pub mod specs;
pub mod window;
