pub mod pie;

pub use pie::{MAX_STEPS, PieLayout, PieLayoutEngine, RowHitbox, SliceGeometry, tessellation_steps};
