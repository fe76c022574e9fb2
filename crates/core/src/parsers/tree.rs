use thiserror::Error;

use crate::model::{ProfilerNode, ProfilerTree};

#[derive(Debug, Error)]
pub enum TreeParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("node {name:?} has an invalid share: {value}")]
    InvalidShare { name: String, value: f64 },
}

/// Parse a JSON profiler tree.
///
/// Each node is `{ "name": .., "local": .., "hiddenOnPie": .., "children": [..] }`
/// where `local` is the node's percentage of its parent. Only `name` is
/// required; the root's `local` is ignored.
pub fn parse_tree(data: &[u8]) -> Result<ProfilerTree, TreeParseError> {
    let root: ProfilerNode = serde_json::from_slice(data)?;
    for child in &root.children {
        check_shares(child)?;
    }
    Ok(ProfilerTree::new(root))
}

fn check_shares(node: &ProfilerNode) -> Result<(), TreeParseError> {
    if !node.local.is_finite() || node.local < 0.0 {
        return Err(TreeParseError::InvalidShare {
            name: node.name.clone(),
            value: node.local,
        });
    }
    node.children.iter().try_for_each(check_shares)
}
