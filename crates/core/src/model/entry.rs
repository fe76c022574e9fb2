use f3pie_protocol::Rgb;
use serde::{Deserialize, Serialize};

use crate::color::color_for_name;

/// Name of the synthetic entry that covers time no child accounts for.
pub const UNSPECIFIED: &str = "unspecified";

/// One category of a profiler sample, as seen from its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilerEntry {
    pub name: String,
    /// Share of the parent's time, in percent.
    pub self_percent: f64,
    /// Share of the whole profile's time, in percent.
    pub global_percent: f64,
    pub color: Rgb,
}

impl ProfilerEntry {
    pub fn new(name: impl Into<String>, self_percent: f64, global_percent: f64, color: Rgb) -> Self {
        Self {
            name: name.into(),
            self_percent,
            global_percent,
            color,
        }
    }

    /// Build an entry whose color is derived from its name.
    pub fn named(name: impl Into<String>, self_percent: f64, global_percent: f64) -> Self {
        let name = name.into();
        let color = color_for_name(&name);
        Self::new(name, self_percent, global_percent, color)
    }

    pub fn is_unspecified(&self) -> bool {
        self.name == UNSPECIFIED
    }
}

/// Split a retrieved path into its root entry and the sibling list.
///
/// Returns `None` for an empty path.
pub fn split_root(mut entries: Vec<ProfilerEntry>) -> Option<(ProfilerEntry, Vec<ProfilerEntry>)> {
    if entries.is_empty() {
        return None;
    }
    let root = entries.remove(0);
    Some((root, entries))
}
