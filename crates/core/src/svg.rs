//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use f3pie_protocol::{RenderCommand, Rgba, TextAlign, Vertex};

/// Font size the label rows are spaced for.
const FONT_SIZE: f64 = 8.0;

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions. Nothing is
/// painted behind the commands, so the overlay composites over whatever
/// the document is placed on.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64) -> String {
    let mut svg = String::with_capacity(commands.len() * 120);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:'Minecraftia','Courier New',monospace;font-size:{FONT_SIZE}px">"#,
    ));

    for cmd in commands {
        match cmd {
            RenderCommand::FillPolygon(polygon) => {
                svg.push_str(&format!(
                    r#"<polygon points="{}" {}/>"#,
                    points_attr(&polygon.vertices),
                    paint_attrs("fill", polygon.color),
                ));
            }
            RenderCommand::DrawLine(edge) => {
                svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="1" {}/>"#,
                    edge.from.x,
                    edge.from.y,
                    edge.to.x,
                    edge.to.y,
                    paint_attrs("stroke", edge.color),
                ));
            }
            RenderCommand::DrawText(label) => {
                // Positions are already resolved to the left edge, so the
                // anchor is only a hint for consumers that re-measure.
                let role = match label.align {
                    TextAlign::Left => "left",
                    TextAlign::Right => "right",
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{}" dominant-baseline="hanging" data-align="{role}">{}</text>"#,
                    label.position.x,
                    label.position.y,
                    label.color.to_hex(),
                    escape_xml(&label.text),
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn points_attr(vertices: &[Vertex]) -> String {
    vertices
        .iter()
        .map(|v| format!("{},{}", v.x, v.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn paint_attrs(property: &str, color: Rgba) -> String {
    let hex = color.rgb().to_hex();
    if color.a == 255 {
        format!(r#"{property}="{hex}""#)
    } else {
        format!(r#"{property}="{hex}" {property}-opacity="{:.3}""#, color.opacity())
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
