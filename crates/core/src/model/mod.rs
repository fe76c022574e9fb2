pub mod entry;
pub mod path;
pub mod tree;

pub use entry::{ProfilerEntry, UNSPECIFIED, split_root};
pub use path::{DEFAULT_PIE_PATH, PiePath};
pub use tree::{PATH_SEPARATOR, ProfilerNode, ProfilerTree, split_path};
