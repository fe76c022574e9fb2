use crate::model::{PiePath, ProfilerEntry, ProfilerTree};

/// Supplies the entry list for one profiler path.
///
/// Element 0 of the returned list is the root entry for `path`; the rest
/// are its siblings in chart order.
pub trait ProfilerSource {
    fn get_path(&self, path: &str) -> Vec<ProfilerEntry>;
}

impl ProfilerSource for ProfilerTree {
    fn get_path(&self, path: &str) -> Vec<ProfilerEntry> {
        PiePath::parse(self, path).entries(self)
    }
}
