use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};
use crate::types::{Point, Vertex};

/// How a polygon's vertex list is to be assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolygonKind {
    /// Four corners in winding order.
    Quad,
    /// The first vertex is the hub; every consecutive pair after it forms
    /// one triangle with the hub.
    Fan,
}

/// A filled polygon with a single uniform color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub kind: PolygonKind,
    pub vertices: Vec<Vertex>,
    pub color: Rgba,
}

impl Polygon {
    /// Number of triangles a renderer will emit for this polygon.
    pub fn triangle_count(&self) -> usize {
        match self.kind {
            PolygonKind::Quad => 2,
            PolygonKind::Fan => self.vertices.len().saturating_sub(2),
        }
    }
}

/// A short stroke along a slice's front rim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSegment {
    pub from: Vertex,
    pub to: Vertex,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Right,
}

/// A positioned text label.
///
/// `position` is always the top-left corner of the text: right-aligned
/// labels have already been shifted left by their measured width. `align`
/// records which edge the label is anchored to so renderers that re-measure
/// with a different font can keep the anchor stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    pub text: String,
    pub position: Point,
    pub color: Rgb,
    pub align: TextAlign,
}

/// A single, stateless render instruction.
///
/// Renderers consume a `Vec<RenderCommand>` sequentially; later commands
/// paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    FillPolygon(Polygon),
    DrawLine(EdgeSegment),
    DrawText(LabelPlacement),
}

impl From<Polygon> for RenderCommand {
    fn from(p: Polygon) -> Self {
        Self::FillPolygon(p)
    }
}

impl From<EdgeSegment> for RenderCommand {
    fn from(e: EdgeSegment) -> Self {
        Self::DrawLine(e)
    }
}

impl From<LabelPlacement> for RenderCommand {
    fn from(l: LabelPlacement) -> Self {
        Self::DrawText(l)
    }
}
