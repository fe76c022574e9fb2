pub mod collapsed;
pub mod tree;

use crate::model::ProfilerTree;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("tree: {0}")]
    Tree(#[from] tree::TreeParseError),
    #[error("collapsed: {0}")]
    Collapsed(#[from] collapsed::CollapsedParseError),
    #[error("unable to detect format")]
    UnknownFormat,
}

/// Auto-detect the profile format and parse it.
///
/// Detection strategy:
/// 1. A JSON object with a `name` key is a profiler tree.
/// 2. Anything else is tried as collapsed stacks.
pub fn parse_auto(data: &[u8]) -> Result<ProfilerTree, ParseError> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        if value.get("name").is_some() {
            return Ok(tree::parse_tree(data)?);
        }
        // Valid JSON that is not a tree will not parse as stacks either.
        return Err(ParseError::UnknownFormat);
    }

    match collapsed::parse_collapsed(data) {
        Ok(tree) => Ok(tree),
        Err(collapsed::CollapsedParseError::Empty) => Err(ParseError::UnknownFormat),
        Err(e) => Err(e.into()),
    }
}
