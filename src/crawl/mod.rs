//! Crawl animation core.
//!
//! One content block scrolls upward at a constant speed and loops forever.
//! Nothing in here depends on the GUI: the app feeds frames, resizes and
//! content changes in, and applies the returned actions.

mod controller;
mod document;
mod frames;
mod geometry;
mod search;

pub use controller::{CrawlAction, CrawlController};
pub use document::{BlockKind, ContentChange, CrawlBlock, CrawlDocument, CrawlTint};
pub use geometry::CrawlSettings;
pub use search::{LayoutProbe, SearchLimits};
