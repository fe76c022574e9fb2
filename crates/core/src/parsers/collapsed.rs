use thiserror::Error;

use crate::model::{ProfilerNode, ProfilerTree};

/// Name given to the synthetic root when stacks start at different frames.
const SYNTHETIC_ROOT: &str = "root";

#[derive(Debug, Error)]
pub enum CollapsedParseError {
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("no valid stack lines found")]
    Empty,
}

/// Sample totals per call path, before conversion to percentages.
#[derive(Debug)]
struct Aggregate {
    name: String,
    total: f64,
    children: Vec<Aggregate>,
}

impl Aggregate {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            total: 0.0,
            children: Vec::new(),
        }
    }

    fn insert(&mut self, stack: &[&str], count: f64) {
        self.total += count;
        let Some((first, rest)) = stack.split_first() else {
            return;
        };
        let idx = match self.children.iter().position(|c| c.name == *first) {
            Some(idx) => idx,
            None => {
                self.children.push(Aggregate::new(first));
                self.children.len() - 1
            }
        };
        self.children[idx].insert(rest, count);
    }

    fn into_node(self, parent_total: f64) -> ProfilerNode {
        let local = if parent_total > 0.0 {
            self.total / parent_total * 100.0
        } else {
            0.0
        };
        let total = self.total;
        let children = self
            .children
            .into_iter()
            .map(|c| c.into_node(total))
            .collect();
        ProfilerNode::new(self.name, local).with_children(children)
    }
}

/// Parse Brendan Gregg's collapsed/folded stack format into a profiler tree.
///
/// Each line has the format: `stack_frame;stack_frame;... count`
/// where frames are separated by `;` and the count is the last whitespace-separated token.
/// A node's share of its parent is its sample count over the parent's;
/// samples that end at a node leave part of its share to `unspecified`.
///
/// Used by: `perf script | stackcollapse-perf.pl`, dtrace, FlameGraph tools.
pub fn parse_collapsed(data: &[u8]) -> Result<ProfilerTree, CollapsedParseError> {
    let text = std::str::from_utf8(data)?;
    let mut top = Aggregate::new(SYNTHETIC_ROOT);
    let mut samples = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Split into stack and count: "a;b;c 42"
        let (stack_str, count) = match line.rfind(' ') {
            Some(pos) => {
                let count_str = line[pos + 1..].trim();
                let count: f64 = count_str.parse().unwrap_or(1.0);
                (line[..pos].trim(), count)
            }
            None => continue,
        };

        if stack_str.is_empty() || !count.is_finite() || count <= 0.0 {
            continue;
        }

        let stack: Vec<&str> = stack_str
            .split(';')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        if stack.is_empty() {
            continue;
        }

        top.insert(&stack, count);
        samples += 1;
    }

    if samples == 0 {
        return Err(CollapsedParseError::Empty);
    }

    // A single shared outermost frame becomes the root itself.
    let root = if top.children.len() == 1 {
        top.children.remove(0).into_node(0.0)
    } else {
        top.into_node(0.0)
    };
    tracing::debug!(samples, root = %root.name, "parsed collapsed stacks");
    Ok(ProfilerTree::new(root))
}
