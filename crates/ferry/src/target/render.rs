//! SVG rendering of a target [`Document`].

use std::collections::BTreeMap;

use log::debug;
use svg::node::{Text as SvgText, element as svg_element};

use ferry_core::{
    apply_connector_style,
    color::Color,
    geometry::{Bounds, Point},
};

use super::{Document, Master, Shape};

/// Space kept free around the content.
const MARGIN: f32 = 20.0;

const FONT_SIZE: f32 = 14.0;
const LINE_HEIGHT: f32 = 18.0;

impl Document {
    /// Renders the document to an SVG tree.
    ///
    /// Shapes without a position and connectors glued to such shapes are
    /// skipped, so call [`Document::arrange`] first.
    pub fn render_svg(&self) -> svg::Document {
        let bounds = self.bounds();
        let width = bounds.width() + 2.0 * MARGIN;
        let height = bounds.height() + 2.0 * MARGIN;

        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min_x() - MARGIN,
                    bounds.min_y() - MARGIN,
                    width,
                    height
                ),
            )
            .set("width", width)
            .set("height", height);

        let markers = self.render_marker_definitions();
        if let Some(markers) = markers {
            doc = doc.add(markers);
        }

        let mut shapes = svg_element::Group::new().set("data-layer", "shapes");
        let mut connectors = svg_element::Group::new().set("data-layer", "connectors");
        let mut skipped = 0;

        for shape in self.shapes() {
            if shape.master() == Master::Connector {
                match self.render_connector(shape) {
                    Some(group) => connectors = connectors.add(group),
                    None => skipped += 1,
                }
            } else {
                match shape.bounds() {
                    Some(bounds) => shapes = shapes.add(render_box(shape, bounds)),
                    None => skipped += 1,
                }
            }
        }

        if skipped > 0 {
            debug!(skipped_count = skipped; "Unplaced shapes left out of the SVG");
        }

        doc.add(shapes).add(connectors)
    }

    /// One arrowhead marker per color used by a directional connector.
    fn render_marker_definitions(&self) -> Option<svg_element::Definitions> {
        let colors: BTreeMap<String, Color> = self
            .shapes()
            .filter_map(Shape::style)
            .filter(|style| style.direction().is_directional())
            .map(|style| (style.marker_id(), style.color()))
            .collect();

        if colors.is_empty() {
            return None;
        }

        let defs = colors
            .into_iter()
            .fold(svg_element::Definitions::new(), |defs, (id, color)| {
                defs.add(arrow_marker(&id, color))
            });
        Some(defs)
    }

    fn render_connector(&self, connector: &Shape) -> Option<svg_element::Group> {
        let connection = connector.connection()?;
        let (from_id, from_point) = connection.from();
        let (to_id, to_point) = connection.to();

        let start = from_point.locate(self.shape(from_id)?.bounds()?);
        let end = to_point.locate(self.shape(to_id)?.bounds()?);

        let line = svg_element::Line::new()
            .set("x1", start.x())
            .set("y1", start.y())
            .set("x2", end.x())
            .set("y2", end.y());

        let line = match connector.style() {
            Some(style) => {
                let line = apply_connector_style!(line, style);
                if style.direction().is_directional() {
                    line.set("marker-end", format!("url(#{})", style.marker_id()))
                } else {
                    line
                }
            }
            None => line.set("stroke", &Color::default()),
        };

        let mut group = svg_element::Group::new()
            .set("id", format!("shape-{}", connector.id()))
            .add(line);

        if !connector.text().is_empty() {
            let anchor = start.midpoint(end).add_point(Point::new(0.0, -LINE_HEIGHT));
            group = group.add(render_text(connector.text(), anchor));
        }

        Some(group)
    }
}

fn render_box(shape: &Shape, bounds: Bounds) -> svg_element::Group {
    let top_left = bounds.min_point();
    let mut rect = svg_element::Rectangle::new()
        .set("x", top_left.x())
        .set("y", top_left.y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("fill", "white")
        .set("stroke", &Color::default());

    if shape.master() == Master::Actor {
        rect = rect.set("rx", 12.0);
    } else if shape.master().is_annotation() {
        rect = rect.set("stroke-dasharray", "4,2");
    }

    let mut group = svg_element::Group::new()
        .set("id", format!("shape-{}", shape.id()))
        .set("data-master", shape.master().to_string())
        .add(rect);

    if !shape.text().is_empty() {
        let lines = shape.text().len() as f32;
        let anchor = bounds
            .center()
            .add_point(Point::new(0.0, -(lines - 1.0) * LINE_HEIGHT / 2.0));
        group = group.add(render_text(shape.text(), anchor));
    }

    group
}

/// Centered text with one `tspan` per line, starting at `anchor`.
fn render_text(lines: &[String], anchor: Point) -> svg_element::Text {
    let mut text = svg_element::Text::new("")
        .set("x", anchor.x())
        .set("y", anchor.y())
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .set("font-family", "sans-serif")
        .set("font-size", FONT_SIZE);

    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { LINE_HEIGHT };
        let tspan = svg_element::TSpan::new("")
            .set("x", anchor.x())
            .set("dy", dy)
            .add(SvgText::new(line.as_str()));
        text = text.add(tspan);
    }

    text
}

fn arrow_marker(id: &str, color: Color) -> svg_element::Marker {
    svg_element::Marker::new()
        .set("id", id)
        .set("viewBox", "0 0 10 10")
        .set("refX", 9)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(
            svg_element::Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", &color),
        )
}

#[cfg(test)]
mod tests {
    use ferry_core::style::ConnectorStyle;

    use super::*;
    use crate::target::ConnectionPoint;

    fn two_actors_with(style: ConnectorStyle) -> Document {
        let mut document = Document::new();
        let a = document.add_shape(Master::Actor);
        document.shape_mut(a).unwrap().set_text(["User"]);
        let b = document.add_shape(Master::Object);
        document.shape_mut(b).unwrap().set_text(["svc:Service"]);

        let line = document.add_shape(Master::Connector);
        let shape = document.shape_mut(line).unwrap();
        shape.set_style(style);
        shape.set_text(["login(name:string)"]);
        document
            .connect(line, a, ConnectionPoint::Right, b, ConnectionPoint::Left)
            .unwrap();

        document.arrange();
        document
    }

    #[test]
    fn test_render_directional_connector() {
        let style = ConnectorStyle::message(Color::default(), 1.4);
        let svg = two_actors_with(style).render_svg().to_string();

        assert!(svg.contains("<marker"), "{svg}");
        assert!(svg.contains(&format!("url(#{})", style.marker_id())), "{svg}");
        assert!(svg.contains("login(name:string)"));
        assert!(svg.contains("svc:Service"));
        assert!(!svg.contains("stroke-dasharray=\"6,4\""));
    }

    #[test]
    fn test_render_dashed_connector_without_marker() {
        let style = ConnectorStyle::lifeline(Color::default(), 1.4, false);
        let svg = two_actors_with(style).render_svg().to_string();

        assert!(!svg.contains("<marker"), "{svg}");
        assert!(svg.contains("stroke-dasharray=\"6,4\""), "{svg}");
    }

    #[test]
    fn test_unarranged_shapes_are_skipped() {
        let mut document = Document::new();
        let a = document.add_shape(Master::Actor);
        document.shape_mut(a).unwrap().set_text(["Ghost"]);

        let svg = document.render_svg().to_string();
        assert!(!svg.contains("Ghost"), "{svg}");
    }

    #[test]
    fn test_annotation_boxes_are_dashed() {
        let mut document = Document::new();
        let guard = document.add_shape(Master::Constraint);
        document.shape_mut(guard).unwrap().set_text(["[valid]"]);
        document.add_shape(Master::Object);
        document.arrange();

        let svg = document.render_svg().to_string();
        assert_eq!(svg.matches("stroke-dasharray=\"4,2\"").count(), 1, "{svg}");
        assert!(svg.contains("stroke=\"black\""), "{svg}");
    }
}
