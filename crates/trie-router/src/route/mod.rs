//! Route module for segment classification
//!
//! Contains the pure pattern parser used by registration.

pub mod pattern;

// Re-export commonly used types
pub use pattern::{classify_segment, SegmentKind};
