use std::fmt;

use super::entry::ProfilerEntry;
use super::tree::{PATH_SEPARATOR, ProfilerTree, split_path};

/// The path the chart opens on when the tree contains it.
pub const DEFAULT_PIE_PATH: &str = "root.gameRenderer.level.entities";

/// The chart's current position in a [`ProfilerTree`].
///
/// Always holds at least the root segment, and every segment after it
/// names an existing child of the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiePath {
    segments: Vec<String>,
}

impl PiePath {
    pub fn root(tree: &ProfilerTree) -> Self {
        Self {
            segments: vec![tree.root().name.clone()],
        }
    }

    /// Resolve a dotted path against `tree`, keeping the longest prefix that
    /// exists.
    pub fn parse(tree: &ProfilerTree, path: &str) -> Self {
        let wanted = split_path(path);
        let (_, matched) = tree.resolve(&wanted);
        if matched < wanted.len() {
            tracing::warn!(
                path,
                kept = matched,
                "profiler path does not exist, truncating"
            );
        }

        let mut segments = vec![tree.root().name.clone()];
        segments.extend(wanted.iter().skip(1).take(matched - 1).map(|s| (*s).to_string()));
        Self { segments }
    }

    pub fn default_for(tree: &ProfilerTree) -> Self {
        Self::parse(tree, DEFAULT_PIE_PATH)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The root entry followed by the sibling list for this path.
    pub fn entries(&self, tree: &ProfilerTree) -> Vec<ProfilerEntry> {
        let (node, _) = tree.resolve(&self.segments);
        let mut out = Vec::with_capacity(node.children.len() + 2);
        out.push(ProfilerEntry::named(self.to_string(), 100.0, node.global));
        out.extend(node.display_entries());
        out
    }

    /// Apply a chart selection.
    ///
    /// `0` steps up to the parent (never above the root). `n >= 1` descends
    /// into the n-th row of the current sibling list, unless that row is the
    /// `unspecified` remainder or does not exist. Returns whether the path
    /// changed.
    pub fn navigate(&mut self, tree: &ProfilerTree, index: usize) -> bool {
        if index == 0 {
            if self.segments.len() > 1 {
                self.segments.pop();
                return true;
            }
            return false;
        }

        let (node, _) = tree.resolve(&self.segments);
        let entries = node.display_entries();
        let Some(entry) = entries.get(index - 1) else {
            tracing::debug!(index, rows = entries.len(), "navigation index out of range");
            return false;
        };
        if entry.is_unspecified() || node.child(&entry.name).is_none() {
            return false;
        }
        self.segments.push(entry.name.clone());
        true
    }
}

impl fmt::Display for PiePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}
