//! SVG rendering of a laid-out [`Graph`].
//!
//! Nodes are drawn as labelled rectangles and edges as plain lines along
//! their routed section. The view box covers the layout canvas plus every
//! node box, with a fixed margin around it.

use log::{debug, warn};
use svg::{
    Document,
    node::{
        Text as SvgText,
        element::{Group, Line, Rectangle, Text},
    },
};

use frlayout_core::{
    color::Color,
    geometry::{Bounds, Insets, Vector2},
    graph::Graph,
};

use crate::{config::StyleConfig, error::FrLayoutError};

const MARGIN: f64 = 20.0;
const FONT_SIZE: f64 = 12.0;
const DEFAULT_NODE_FILL: &str = "white";
const DEFAULT_STROKE: &str = "black";

/// Render `graph` as an SVG document string.
///
/// # Errors
///
/// Returns [`FrLayoutError::Export`] if a configured style color is invalid.
pub fn render(graph: &Graph, style: &StyleConfig) -> Result<String, FrLayoutError> {
    let node_fill = color_or(style.node_fill_color(), DEFAULT_NODE_FILL)?;
    let stroke = color_or(style.stroke_color(), DEFAULT_STROKE)?;
    let background = style
        .background_color()
        .map_err(FrLayoutError::Export)?
        .map(|color| color.to_string());

    let bounds = drawing_bounds(graph).add_padding(Insets::uniform(MARGIN));
    debug!(width = bounds.width(), height = bounds.height(); "SVG dimensions");

    let mut doc = Document::new()
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                bounds.min_x(),
                bounds.min_y(),
                bounds.width(),
                bounds.height()
            ),
        )
        .set("width", bounds.width())
        .set("height", bounds.height());

    if let Some(background) = background {
        doc = doc.add(
            Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("fill", background),
        );
    }

    let mut edges = Group::new()
        .set("class", "edges")
        .set("stroke", stroke.as_str());
    for edge in graph.edges() {
        let Some(section) = edge.section() else {
            warn!(
                source = edge.source().as_string(),
                target = edge.target().as_string();
                "Skipping edge without a route"
            );
            continue;
        };
        edges = edges.add(
            Line::new()
                .set("x1", section.start().x())
                .set("y1", section.start().y())
                .set("x2", section.end().x())
                .set("y2", section.end().y()),
        );
    }

    let mut nodes = Group::new().set("class", "nodes");
    for node in graph.nodes() {
        let position = node.position();
        let center = position.box_center(node.size());
        let label = Text::new("")
            .set("x", center.x())
            .set("y", center.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-size", FONT_SIZE)
            .add(SvgText::new(node.id().as_string()));
        let shape = Rectangle::new()
            .set("x", position.x())
            .set("y", position.y())
            .set("width", node.size().width())
            .set("height", node.size().height())
            .set("fill", node_fill.as_str())
            .set("stroke", stroke.as_str());
        nodes = nodes.add(Group::new().add(shape).add(label));
    }

    Ok(doc.add(edges).add(nodes).to_string())
}

fn color_or(
    configured: Result<Option<Color>, String>,
    fallback: &str,
) -> Result<String, FrLayoutError> {
    Ok(configured
        .map_err(FrLayoutError::Export)?
        .map_or_else(|| fallback.to_string(), |color| color.to_string()))
}

/// Canvas extended to cover every node box.
fn drawing_bounds(graph: &Graph) -> Bounds {
    graph.nodes().fold(
        Bounds::new_from_top_left(Vector2::zero(), graph.size()),
        |acc, node| acc.merge(&Bounds::new_from_top_left(node.position(), node.size())),
    )
}

#[cfg(test)]
mod tests {
    use frlayout_core::{
        geometry::Size,
        graph::{Edge, EdgeSection, Node},
        identifier::Id,
    };

    use super::*;

    fn routed_graph() -> Graph {
        let mut graph = Graph::new();
        graph.set_size(Size::new(500.0, 500.0));
        let mut a = Node::new(Id::new("svg_a"), Size::new(40.0, 20.0));
        a.set_position(Vector2::new(10.0, 10.0));
        let mut b = Node::new(Id::new("svg_b"), Size::new(40.0, 20.0));
        b.set_position(Vector2::new(490.0, 300.0));
        graph.add_node(a).unwrap();
        graph.add_node(b).unwrap();

        let mut edge = Edge::new(Id::new("svg_a"), Id::new("svg_b"));
        edge.set_section(EdgeSection::new(
            Vector2::new(30.0, 20.0),
            Vector2::new(510.0, 310.0),
        ));
        graph.add_edge(edge).unwrap();
        graph
    }

    #[test]
    fn test_render_contains_nodes_and_edges() {
        let svg = render(&routed_graph(), &StyleConfig::default()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.contains("svg_a"));
        assert!(svg.contains("svg_b"));
    }

    #[test]
    fn test_drawing_bounds_cover_overhanging_nodes() {
        let bounds = drawing_bounds(&routed_graph());
        assert_eq!(bounds.min_x(), 0.0);
        assert_eq!(bounds.min_y(), 0.0);
        assert_eq!(bounds.max_x(), 530.0);
        assert_eq!(bounds.max_y(), 500.0);
    }

    #[test]
    fn test_render_skips_unrouted_edges() {
        let mut graph = routed_graph();
        graph
            .add_edge(Edge::new(Id::new("svg_b"), Id::new("svg_a")))
            .unwrap();

        let svg = render(&graph, &StyleConfig::default()).unwrap();
        assert_eq!(svg.matches("<line").count(), 1);
    }

    #[test]
    fn test_render_rejects_invalid_color() {
        let style: StyleConfig = toml::from_str("node_fill_color = \"nope\"").unwrap();
        let result = render(&routed_graph(), &style);
        assert!(matches!(result, Err(FrLayoutError::Export(_))));
    }

    #[test]
    fn test_render_background() {
        let style: StyleConfig = toml::from_str("background_color = \"lavender\"").unwrap();
        let svg = render(&routed_graph(), &style).unwrap();
        assert_eq!(svg.matches("<rect").count(), 3);
    }
}
