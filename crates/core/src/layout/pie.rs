use std::f64::consts::TAU;

use f3pie_protocol::{
    EdgeSegment, LabelPlacement, Point, Polygon, PolygonKind, Rect, RenderCommand, Rgb, Rgba,
    TextAlign, Vertex,
};

use crate::config::PieStyle;
use crate::format::format_percent;
use crate::measure::TextMeasurer;
use crate::model::{ProfilerEntry, UNSPECIFIED, split_root};
use crate::source::ProfilerSource;

/// Percent-units in a full turn.
const FULL_TURN_PERCENT: f64 = 100.0;

/// Upper bound on wedges per slice, whatever the step size.
pub const MAX_STEPS: u32 = 10_001;

/// One tessellated slice and its rim strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceGeometry {
    pub fan: Polygon,
    pub edges: Vec<EdgeSegment>,
    pub steps: u32,
    /// Angles in radians, counter-clockwise from the positive x axis before
    /// the screen flip.
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Clickable area of one sibling row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowHitbox {
    /// 1-based row number, as printed in the row's `[n]` prefix.
    pub number: usize,
    pub rect: Rect,
}

/// Everything needed to draw one frame of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    pub background: Polygon,
    pub slices: Vec<SliceGeometry>,
    pub labels: Vec<LabelPlacement>,
    pub rows: Vec<RowHitbox>,
}

impl PieLayout {
    fn background_only(background: Polygon) -> Self {
        Self {
            background,
            slices: Vec::new(),
            labels: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Flatten into paint order: background, each slice's fan followed by
    /// its rim, then all labels.
    pub fn to_commands(&self) -> Vec<RenderCommand> {
        let edge_count: usize = self.slices.iter().map(|s| s.edges.len()).sum();
        let mut commands =
            Vec::with_capacity(1 + self.slices.len() + edge_count + self.labels.len());
        commands.push(RenderCommand::FillPolygon(self.background.clone()));
        for slice in &self.slices {
            commands.push(RenderCommand::FillPolygon(slice.fan.clone()));
            commands.extend(slice.edges.iter().copied().map(RenderCommand::DrawLine));
        }
        commands.extend(self.labels.iter().cloned().map(RenderCommand::DrawText));
        commands
    }

    /// The row under `point`, as a 1-based row number.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.rows
            .iter()
            .find(|row| row.rect.contains(point))
            .map(|row| row.number)
    }
}

/// Number of wedges used to approximate a slice of `percent` percent-units.
///
/// Always in `1..=MAX_STEPS`. Non-finite or negative input counts as zero.
pub fn tessellation_steps(percent: f64, percent_per_step: f64) -> u32 {
    let percent = sanitize_percent(percent);
    let per_step = if percent_per_step.is_finite() && percent_per_step > 0.0 {
        percent_per_step
    } else {
        FULL_TURN_PERCENT
    };
    let wedges = (percent / per_step).ceil().min(f64::from(MAX_STEPS - 1));
    wedges as u32 + 1
}

/// Clamp a share into `0.0..=100.0`, mapping NaN to zero.
fn sanitize_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, FULL_TURN_PERCENT)
}

fn heading_text(name: &str) -> String {
    if name.is_empty() {
        "ROOT ".to_string()
    } else if name == UNSPECIFIED {
        format!("{name} ")
    } else {
        format!("[0] {name} ")
    }
}

fn row_text(index: usize, entry: &ProfilerEntry) -> String {
    if entry.is_unspecified() {
        format!("[?] {}", entry.name)
    } else {
        format!("[{}] {}", index + 1, entry.name)
    }
}

/// Turns a profiler entry list into pie overlay geometry.
///
/// The engine holds no per-frame state; `layout` is a pure function of its
/// arguments and can be called every frame.
#[derive(Debug, Clone, Default)]
pub struct PieLayoutEngine {
    style: PieStyle,
}

impl PieLayoutEngine {
    pub fn new(style: PieStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &PieStyle {
        &self.style
    }

    /// Fetch `path` from `source` and lay it out. An empty result draws the
    /// background panel alone.
    pub fn layout_path<S: ProfilerSource + ?Sized>(
        &self,
        source: &S,
        path: &str,
        center: Point,
        measurer: &dyn TextMeasurer,
    ) -> PieLayout {
        match split_root(source.get_path(path)) {
            Some((root, siblings)) => self.layout(&root, &siblings, center, measurer),
            None => {
                tracing::warn!(path, "profiler source returned no entries");
                PieLayout::background_only(self.background(center))
            }
        }
    }

    pub fn layout(
        &self,
        root: &ProfilerEntry,
        siblings: &[ProfilerEntry],
        center: Point,
        measurer: &dyn TextMeasurer,
    ) -> PieLayout {
        let background = self.background(center);
        if siblings.is_empty() {
            return PieLayout::background_only(background);
        }

        let raw_total: f64 = siblings.iter().map(|e| e.self_percent).sum();
        if raw_total.is_nan() || raw_total > FULL_TURN_PERCENT + 1e-6 {
            tracing::warn!(
                total = raw_total,
                entries = siblings.len(),
                "sibling shares exceed a full turn; later slices will overlap"
            );
        }

        let mut slices = Vec::with_capacity(siblings.len());
        let mut start_percent = 0.0;
        for entry in siblings {
            let percent = sanitize_percent(entry.self_percent);
            if percent != entry.self_percent {
                tracing::warn!(
                    name = %entry.name,
                    self_percent = entry.self_percent,
                    "clamped out-of-range share"
                );
            }
            slices.push(self.slice(center, start_percent, percent, entry.color));
            start_percent = (start_percent + percent).min(FULL_TURN_PERCENT);
        }

        let (labels, rows) = self.labels(root, siblings, center, measurer);

        tracing::debug!(
            entries = siblings.len(),
            swept = start_percent,
            labels = labels.len(),
            "laid out pie"
        );

        PieLayout {
            background,
            slices,
            labels,
            rows,
        }
    }

    fn background(&self, center: Point) -> Polygon {
        let s = &self.style;
        let left = center.x - s.panel_half_width;
        let right = center.x + s.panel_half_width;
        let top = center.y - s.panel_top;
        let bottom = center.y + s.panel_bottom;
        Polygon {
            kind: PolygonKind::Quad,
            vertices: vec![
                Vertex::new(left, top),
                Vertex::new(left, bottom),
                Vertex::new(right, bottom),
                Vertex::new(right, top),
            ],
            color: Rgba::new(0, 0, 0, s.panel_alpha),
        }
    }

    fn slice(&self, center: Point, start_percent: f64, percent: f64, color: Rgb) -> SliceGeometry {
        let steps = tessellation_steps(percent, self.style.percent_per_step);
        let radius_x = self.style.radius_x;
        let radius_y = self.style.radius_y();
        let fill = color.opaque();
        let rim = color.halved().opaque();

        let mut vertices = Vec::with_capacity(steps as usize + 2);
        vertices.push(Vertex::new(center.x, center.y));
        let mut edges = Vec::new();

        // Walk from the far edge of the slice back to its near edge.
        for i in (0..=steps).rev() {
            let angle = percent_to_angle(start_percent + percent * f64::from(i) / f64::from(steps));
            let x = angle.cos() * radius_x;
            let y = angle.sin() * radius_y;
            let boundary = Vertex::new(center.x + x, center.y - y);
            vertices.push(boundary);

            // y <= 0 lands on the near (lower) half of the ellipse once
            // flipped into screen space; only there is the rim visible.
            if y <= 0.0 {
                edges.push(EdgeSegment {
                    from: boundary,
                    to: Vertex::new(boundary.x, boundary.y + self.style.rim_depth),
                    color: rim,
                });
            }
        }

        SliceGeometry {
            fan: Polygon {
                kind: PolygonKind::Fan,
                vertices,
                color: fill,
            },
            edges,
            steps,
            start_angle: percent_to_angle(start_percent),
            end_angle: percent_to_angle(start_percent + percent),
        }
    }

    fn labels(
        &self,
        root: &ProfilerEntry,
        siblings: &[ProfilerEntry],
        center: Point,
        measurer: &dyn TextMeasurer,
    ) -> (Vec<LabelPlacement>, Vec<RowHitbox>) {
        let s = &self.style;
        let left_x = center.x - s.label_half_width;
        let right_edge = center.x + s.label_half_width;
        let local_edge = right_edge - s.local_percent_inset;

        let mut labels = Vec::with_capacity(2 + siblings.len() * 3);
        let mut rows = Vec::with_capacity(siblings.len());

        let heading_y = center.y - s.heading_offset;
        labels.push(left_aligned(heading_text(&root.name), left_x, heading_y, Rgb::WHITE));
        labels.push(right_aligned(
            format_percent(root.global_percent),
            right_edge,
            heading_y,
            Rgb::WHITE,
            measurer,
        ));

        for (i, entry) in siblings.iter().enumerate() {
            let y = center.y + s.legend_offset + i as f64 * s.row_height;
            labels.push(left_aligned(row_text(i, entry), left_x, y, entry.color));
            labels.push(right_aligned(
                format_percent(sanitize_percent(entry.self_percent)),
                local_edge,
                y,
                entry.color,
                measurer,
            ));
            labels.push(right_aligned(
                format_percent(entry.global_percent),
                right_edge,
                y,
                entry.color,
                measurer,
            ));
            rows.push(RowHitbox {
                number: i + 1,
                rect: Rect::new(left_x, y, right_edge - left_x, s.row_height),
            });
        }

        (labels, rows)
    }
}

fn percent_to_angle(percent: f64) -> f64 {
    percent * TAU / FULL_TURN_PERCENT
}

fn left_aligned(text: String, x: f64, y: f64, color: Rgb) -> LabelPlacement {
    LabelPlacement {
        text,
        position: Point::new(x, y),
        color,
        align: TextAlign::Left,
    }
}

fn right_aligned(
    text: String,
    right_edge: f64,
    y: f64,
    color: Rgb,
    measurer: &dyn TextMeasurer,
) -> LabelPlacement {
    let width = measurer.width(&text);
    let width = if width.is_finite() { width } else { 0.0 };
    LabelPlacement {
        position: Point::new(right_edge - width, y),
        text,
        color,
        align: TextAlign::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::FixedAdvanceMeasurer;

    const CENTER: Point = Point { x: 500.0, y: 400.0 };

    fn engine() -> PieLayoutEngine {
        PieLayoutEngine::default()
    }

    fn entry(name: &str, self_percent: f64, global_percent: f64, color: u32) -> ProfilerEntry {
        ProfilerEntry::new(name, self_percent, global_percent, Rgb::from_packed(color))
    }

    fn label_texts(layout: &PieLayout) -> Vec<&str> {
        layout.labels.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn steps_scale_with_share() {
        assert_eq!(tessellation_steps(100.0, 4.0), 26);
        assert_eq!(tessellation_steps(40.0, 4.0), 11);
        assert_eq!(tessellation_steps(25.0, 4.0), 8);
        assert_eq!(tessellation_steps(0.5, 4.0), 2);
        assert_eq!(tessellation_steps(0.0, 4.0), 1);
    }

    #[test]
    fn degenerate_shares_get_one_step() {
        assert_eq!(tessellation_steps(-3.0, 4.0), 1);
        assert_eq!(tessellation_steps(f64::NAN, 4.0), 1);
        assert_eq!(tessellation_steps(f64::NEG_INFINITY, 4.0), 1);
        assert_eq!(tessellation_steps(10.0, 0.0), 2);
    }

    #[test]
    fn tiny_step_size_is_capped() {
        assert_eq!(tessellation_steps(50.0, 1e-300), MAX_STEPS);
        assert_eq!(tessellation_steps(100.0, 0.01), MAX_STEPS);

        let style = PieStyle {
            percent_per_step: 1e-300,
            ..PieStyle::default()
        };
        let layout = PieLayoutEngine::new(style).layout(
            &entry("", 100.0, 100.0, 0),
            &[entry("a", 50.0, 50.0, 0), entry("b", 50.0, 50.0, 0)],
            CENTER,
            &FixedAdvanceMeasurer::default(),
        );
        for slice in &layout.slices {
            assert_eq!(slice.steps, MAX_STEPS);
            assert_eq!(slice.fan.vertices.len(), MAX_STEPS as usize + 2);
        }
    }

    #[test]
    fn empty_siblings_draw_only_the_panel() {
        let root = entry("tick", 100.0, 65.0, 0xFFFFFF);
        let layout = engine().layout(&root, &[], CENTER, &FixedAdvanceMeasurer::default());
        assert!(layout.slices.is_empty());
        assert!(layout.labels.is_empty());
        assert_eq!(layout.to_commands().len(), 1);
    }

    #[test]
    fn background_encloses_ring_and_labels() {
        let layout = engine().layout(
            &entry("", 100.0, 100.0, 0),
            &[entry("a", 100.0, 100.0, 0x123456)],
            CENTER,
            &FixedAdvanceMeasurer::default(),
        );
        let bg = &layout.background;
        assert_eq!(bg.kind, PolygonKind::Quad);
        assert_eq!(bg.color, Rgba::new(0, 0, 0, 200));
        assert_eq!(bg.vertices[0], Vertex::new(324.0, 288.0));
        assert_eq!(bg.vertices[2], Vertex::new(676.0, 720.0));
        assert!(matches!(
            layout.to_commands().first(),
            Some(RenderCommand::FillPolygon(p)) if p.kind == PolygonKind::Quad
        ));
    }

    #[test]
    fn fan_starts_at_center_and_walks_back() {
        let layout = engine().layout(
            &entry("", 100.0, 100.0, 0),
            &[entry("a", 25.0, 25.0, 0xFF0000)],
            CENTER,
            &FixedAdvanceMeasurer::default(),
        );
        let slice = &layout.slices[0];
        let v = &slice.fan.vertices;
        assert_eq!(v.len(), slice.steps as usize + 2);
        assert_eq!(v[0], Vertex::new(CENTER.x, CENTER.y));
        // Far edge: a quarter turn, straight up on screen.
        assert!((v[1].x - CENTER.x).abs() < 1e-9);
        assert!((v[1].y - (CENTER.y - 80.0)).abs() < 1e-9);
        // Near edge: angle zero, at the right of the ellipse.
        let last = v[v.len() - 1];
        assert!((last.x - (CENTER.x + 160.0)).abs() < 1e-9);
        assert!((last.y - CENTER.y).abs() < 1e-9);
        assert_eq!(slice.fan.color, Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn adjacent_slices_share_an_edge() {
        let siblings = [
            entry("a", 40.0, 40.0, 0xFF0000),
            entry("b", 25.0, 25.0, 0x00FF00),
            entry("c", 0.5, 0.5, 0x0000FF),
            entry("d", 30.0, 30.0, 0xFFFF00),
        ];
        let layout = engine().layout(
            &entry("", 100.0, 100.0, 0),
            &siblings,
            CENTER,
            &FixedAdvanceMeasurer::default(),
        );
        assert_eq!(layout.slices[0].start_angle, 0.0);
        for pair in layout.slices.windows(2) {
            assert!((pair[0].end_angle - pair[1].start_angle).abs() < 1e-12);
            // The next slice's near edge is the previous slice's far edge.
            let prev_far = pair[0].fan.vertices[1];
            let next_near = pair[1].fan.vertices[pair[1].fan.vertices.len() - 1];
            assert!((prev_far.x - next_near.x).abs() < 1e-9);
            assert!((prev_far.y - next_near.y).abs() < 1e-9);
        }
    }

    #[test]
    fn rim_only_on_front_facing_samples() {
        // Lower half of the chart on screen: angles from 50% to 100%.
        let siblings = [entry("back", 50.0, 50.0, 0x808080), entry("front", 50.0, 50.0, 0xFF8040)];
        let layout = engine().layout(
            &entry("", 100.0, 100.0, 0),
            &siblings,
            CENTER,
            &FixedAdvanceMeasurer::default(),
        );

        let back = &layout.slices[0];
        assert!(!back.edges.is_empty());
        assert!(back.edges.len() <= back.steps as usize + 1);

        // Both ends of the front slice sit on the horizontal axis, where
        // rounding decides the sign of y.
        let front = &layout.slices[1];
        assert!(front.edges.len() + 1 >= front.steps as usize);
        assert!(front.edges.len() <= front.steps as usize + 1);
        for edge in &front.edges {
            assert!(edge.from.y >= CENTER.y - 1e-9);
            assert_eq!(edge.to.x, edge.from.x);
            assert!((edge.to.y - edge.from.y - 10.0).abs() < 1e-9);
            assert_eq!(edge.color, Rgba::new(0x7F, 0x40, 0x20, 255));
        }
    }

    #[test]
    fn overfull_shares_do_not_run_away() {
        let siblings = [
            entry("a", 90.0, 90.0, 0),
            entry("b", 500.0, 500.0, 0),
            entry("c", f64::NAN, 0.0, 0),
            entry("d", -20.0, 0.0, 0),
        ];
        let layout = engine().layout(
            &entry("", 100.0, 100.0, 0),
            &siblings,
            CENTER,
            &FixedAdvanceMeasurer::default(),
        );
        assert_eq!(layout.slices.len(), 4);
        assert_eq!(layout.slices[1].steps, 26);
        assert_eq!(layout.slices[2].steps, 1);
        assert_eq!(layout.slices[3].steps, 1);
        assert!((layout.slices[2].start_angle - TAU).abs() < 1e-12);
        for slice in &layout.slices {
            assert!(slice.fan.vertices.iter().all(|v| v.x.is_finite() && v.y.is_finite()));
        }
    }

    #[test]
    fn self_column_shows_the_drawn_share() {
        let siblings = [
            entry("a", 150.0, 90.0, 0),
            entry("b", -20.0, 0.0, 0),
            entry("c", f64::NAN, 0.0, 0),
        ];
        let layout = engine().layout(
            &entry("", 100.0, 100.0, 0),
            &siblings,
            CENTER,
            &FixedAdvanceMeasurer::default(),
        );
        let texts = label_texts(&layout);
        assert_eq!(texts[3], "100.00%");
        assert_eq!(texts[6], "0.00%");
        assert_eq!(texts[9], "0.00%");
    }

    #[test]
    fn heading_variants() {
        assert_eq!(heading_text(""), "ROOT ");
        assert_eq!(heading_text("unspecified"), "unspecified ");
        assert_eq!(heading_text("tick"), "[0] tick ");
    }

    #[test]
    fn row_prefixes() {
        assert_eq!(row_text(0, &entry("render", 1.0, 1.0, 0)), "[1] render");
        assert_eq!(row_text(2, &entry("unspecified", 1.0, 1.0, 0)), "[?] unspecified");
    }

    #[test]
    fn two_entry_scenario() {
        let root = entry("tick", 100.0, 65.0, 0xFFFFFF);
        let siblings = [
            entry("render", 40.0, 40.0, 0xFF0000),
            entry("tick", 25.0, 25.0, 0x00FF00),
        ];
        let layout = engine().layout(&root, &siblings, CENTER, &FixedAdvanceMeasurer::default());

        assert_eq!(layout.slices.len(), 2);
        assert_eq!(layout.slices[0].steps, 11);
        assert_eq!(layout.slices[1].steps, 8);
        assert_eq!(
            label_texts(&layout),
            [
                "[0] tick ",
                "65.00%",
                "[1] render",
                "40.00%",
                "40.00%",
                "[2] tick",
                "25.00%",
                "25.00%",
            ]
        );

        // Rows stack downward from 100 units below the center.
        assert_eq!(layout.labels[2].position, Point::new(340.0, 500.0));
        assert_eq!(layout.labels[5].position.y, 508.0);
        assert_eq!(layout.labels[0].position, Point::new(340.0, 304.0));
        assert_eq!(layout.labels[2].color, Rgb::from_packed(0xFF0000));
        assert_eq!(layout.labels[0].color, Rgb::WHITE);
    }

    #[test]
    fn right_alignment_follows_measurer() {
        let root = entry("tick", 100.0, 65.0, 0xFFFFFF);
        let siblings = [entry("render", 40.0, 12.5, 0xFF0000)];

        let narrow = engine().layout(&root, &siblings, CENTER, &|t: &str| t.len() as f64);
        let wide = engine().layout(&root, &siblings, CENTER, &|t: &str| t.len() as f64 + 7.0);

        // "65.00%" heading percentage, right edge at center + 160.
        assert_eq!(narrow.labels[1].position.x, 660.0 - 6.0);
        assert_eq!(narrow.labels[1].align, TextAlign::Right);
        // Self percentage sits 50 units in from the right edge.
        assert_eq!(narrow.labels[3].position.x, 610.0 - 6.0);
        assert_eq!(narrow.labels[4].position.x, 660.0 - 6.0);

        for (n, w) in narrow.labels.iter().zip(&wide.labels) {
            let delta = n.position.x - w.position.x;
            match n.align {
                TextAlign::Right => assert_eq!(delta, 7.0),
                TextAlign::Left => assert_eq!(delta, 0.0),
            }
            assert_eq!(n.position.y, w.position.y);
        }
    }

    #[test]
    fn non_finite_measurements_fall_back_to_zero_width() {
        let root = entry("tick", 100.0, 65.0, 0xFFFFFF);
        let layout = engine().layout(
            &root,
            &[entry("a", 10.0, 10.0, 0)],
            CENTER,
            &|_: &str| f64::NAN,
        );
        assert_eq!(layout.labels[1].position.x, 660.0);
    }

    #[test]
    fn hit_test_maps_rows_to_numbers() {
        let root = entry("", 100.0, 100.0, 0);
        let siblings = [entry("a", 50.0, 50.0, 0), entry("b", 50.0, 50.0, 0)];
        let layout = engine().layout(&root, &siblings, CENTER, &FixedAdvanceMeasurer::default());
        assert_eq!(layout.hit_test(Point::new(400.0, 501.0)), Some(1));
        assert_eq!(layout.hit_test(Point::new(659.0, 508.0)), Some(2));
        assert_eq!(layout.hit_test(Point::new(400.0, 516.0)), None);
        assert_eq!(layout.hit_test(Point::new(100.0, 501.0)), None);
    }

    #[test]
    fn commands_keep_paint_order() {
        let root = entry("", 100.0, 100.0, 0);
        let siblings = [entry("a", 60.0, 60.0, 0xAA0000), entry("b", 40.0, 40.0, 0x00AA00)];
        let layout = engine().layout(&root, &siblings, CENTER, &FixedAdvanceMeasurer::default());
        let commands = layout.to_commands();

        let expected = 1
            + layout.slices.iter().map(|s| 1 + s.edges.len()).sum::<usize>()
            + layout.labels.len();
        assert_eq!(commands.len(), expected);

        let first_text = commands
            .iter()
            .position(|c| matches!(c, RenderCommand::DrawText(_)))
            .unwrap_or(commands.len());
        assert!(
            commands[first_text..]
                .iter()
                .all(|c| matches!(c, RenderCommand::DrawText(_)))
        );
        assert!(matches!(&commands[1], RenderCommand::FillPolygon(p) if p.kind == PolygonKind::Fan));
    }
}
