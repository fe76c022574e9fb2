//! Profiler pie chart: sample tree model, input parsers, and the layout
//! engine that turns one level of the tree into backend-agnostic draw
//! primitives.
//!
//! ```text
//!   JSON tree ──┐                                     ┌─▶ SVG
//!               ├─▶ ProfilerTree ─▶ PieLayoutEngine ─▶ RenderCommand[]
//!   collapsed ──┘   (PiePath)        (+ TextMeasurer)  └─▶ GPU / canvas…
//! ```

pub mod color;
pub mod config;
pub mod format;
pub mod layout;
pub mod measure;
pub mod model;
pub mod parsers;
pub mod source;
pub mod svg;

pub use config::{ConfigError, PieStyle};
pub use layout::{PieLayout, PieLayoutEngine};
pub use measure::{FixedAdvanceMeasurer, TextMeasurer};
pub use source::ProfilerSource;
