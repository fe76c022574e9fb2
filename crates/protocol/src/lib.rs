pub mod color;
pub mod commands;
pub mod types;

pub use color::{Rgb, Rgba};
pub use commands::{EdgeSegment, LabelPlacement, Polygon, PolygonKind, RenderCommand, TextAlign};
pub use types::{Point, Rect, Vertex};
