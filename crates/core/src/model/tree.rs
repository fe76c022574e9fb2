use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::entry::{ProfilerEntry, UNSPECIFIED};

/// Separator between segments of a profiler path, e.g. `root.tick.entities`.
pub const PATH_SEPARATOR: char = '.';

/// A node of the profiler sample tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilerNode {
    pub name: String,
    /// Share of the parent's time, in percent.
    #[serde(default)]
    pub local: f64,
    /// Excluded from the chart, but still counted towards the parent's total.
    #[serde(default)]
    pub hidden_on_pie: bool,
    #[serde(default)]
    pub children: Vec<ProfilerNode>,
    /// Share of the whole tree's time, in percent. Filled in by
    /// [`ProfilerTree::new`].
    #[serde(skip)]
    pub global: f64,
}

impl ProfilerNode {
    pub fn new(name: impl Into<String>, local: f64) -> Self {
        Self {
            name: name.into(),
            local,
            hidden_on_pie: false,
            children: Vec::new(),
            global: 0.0,
        }
    }

    pub fn with_children(mut self, children: Vec<ProfilerNode>) -> Self {
        self.children = children;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden_on_pie = true;
        self
    }

    pub fn child(&self, name: &str) -> Option<&ProfilerNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// The chart's sibling list for this node.
    ///
    /// Visible children sorted heaviest first (ties broken by name), plus a
    /// trailing `unspecified` entry for whatever share the children leave
    /// uncovered.
    pub fn display_entries(&self) -> Vec<ProfilerEntry> {
        let mut visible: Vec<&ProfilerNode> =
            self.children.iter().filter(|c| !c.hidden_on_pie).collect();
        visible.sort_by(|a, b| {
            b.local
                .total_cmp(&a.local)
                .then_with(|| compare_names(&a.name, &b.name))
        });

        let consumed: f64 = visible.iter().map(|c| c.local).sum();
        let mut entries: Vec<ProfilerEntry> = visible
            .into_iter()
            .map(|c| ProfilerEntry::named(c.name.as_str(), c.local, c.global))
            .collect();

        if consumed < 100.0 {
            let remainder = 100.0 - consumed;
            entries.push(ProfilerEntry::named(
                UNSPECIFIED,
                remainder,
                self.global * (remainder / 100.0),
            ));
        }
        entries
    }

    fn annotate_globals(&mut self, global: f64) {
        self.global = global;
        for child in &mut self.children {
            let child_global = global * (child.local / 100.0);
            child.annotate_globals(child_global);
        }
    }
}

/// Case-insensitive name order, falling back to byte order so the sort
/// stays total.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// A profiler sample tree with global percentages resolved.
#[derive(Debug, Clone)]
pub struct ProfilerTree {
    root: ProfilerNode,
}

impl ProfilerTree {
    /// Takes ownership of `root`, forces its share to 100% and annotates
    /// every node with its global share.
    pub fn new(mut root: ProfilerNode) -> Self {
        root.local = 100.0;
        root.annotate_globals(100.0);
        Self { root }
    }

    pub fn root(&self) -> &ProfilerNode {
        &self.root
    }

    /// Walk `segments` from the root. The first segment names the root
    /// itself and is not matched; the walk stops at the first segment with
    /// no matching child.
    ///
    /// Returns the deepest node reached and the number of segments (root
    /// included) that matched.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> (&ProfilerNode, usize) {
        let mut node = &self.root;
        let mut matched = 1;
        for segment in segments.iter().skip(1) {
            let Some(next) = node.child(segment.as_ref()) else {
                break;
            };
            node = next;
            matched += 1;
        }
        (node, matched)
    }
}

/// Split a dotted path into segments. An empty path is the root alone.
pub fn split_path(path: &str) -> Vec<&str> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split(PATH_SEPARATOR).collect()
}

#[cfg(test)]
pub(crate) fn sample_tree() -> ProfilerTree {
    ProfilerTree::new(ProfilerNode::new("root", 0.0).with_children(vec![
        ProfilerNode::new("gameRenderer", 100.0).with_children(vec![
            ProfilerNode::new("level", 100.0).with_children(vec![
                ProfilerNode::new("entities", 100.0).with_children(vec![
                    ProfilerNode::new("entities", 52.8),
                    ProfilerNode::new("blockentities", 19.6),
                    ProfilerNode::new("destroyentities", 16.2),
                    ProfilerNode::new("prepare", 11.4).hidden(),
                ]),
            ]),
        ]),
    ]))
}
