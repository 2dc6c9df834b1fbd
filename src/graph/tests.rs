//! Unit tests for the graph layout subsystem

use super::*;

fn two_vertex_graph() -> (Graph, Handle, Handle, Handle) {
    let mut graph = Graph::new();
    let a = graph.add_vertex(Vertex::new("a"));
    let b = graph.add_vertex(Vertex::new("b"));
    let e = graph.add_edge(Edge::new(a, b));
    (graph, a, b, e)
}

#[test]
fn test_handles_are_unique_and_stable() {
    let (graph, a, b, e) = two_vertex_graph();
    assert_ne!(a, b);
    assert_ne!(b, e);
    assert_eq!(graph.vertex(a).unwrap().handle(), Some(a));
    assert_eq!(graph.edge(e).unwrap().source(), a);
    assert_eq!(graph.edge(e).unwrap().destination(), b);
}

#[test]
fn test_clear_yields_fresh_handles() {
    let (mut graph, a, _, _) = two_vertex_graph();
    graph.clear();
    assert!(graph.element(a).is_none());

    // Re-adding after clear() must hand out a handle never seen before.
    let a2 = graph.add_vertex(Vertex::new("a"));
    assert_ne!(a, a2);
    assert!(graph.vertex(a).is_none());
    assert!(graph.vertex(a2).is_some());
}

#[test]
fn test_attribute_value_extraction() {
    let line = r#"n1 [handle=1, label="a b", pos="54,36", shandle=9];"#;
    assert_eq!(attribute_value(line, "handle"), Some("1"));
    assert_eq!(attribute_value(line, "label"), Some("a b"));
    assert_eq!(attribute_value(line, "pos"), Some("54,36"));
    assert_eq!(attribute_value(line, "missing"), None);
    // `shandle` must not satisfy a search for `handle`.
    assert_eq!(attribute_value("x [shandle=9];", "handle"), None);
}

#[test]
fn test_attribute_value_stops_at_delimiters() {
    assert_eq!(attribute_value("graph [bb=\"0,0,10,20\", handle=0];", "bb"), Some("0,0,10,20"));
    assert_eq!(attribute_value("graph [handle=7];", "handle"), Some("7"));
}

#[test]
fn test_edge_spline_parse_strips_marker_and_restores_order() {
    let points = parse_spline("e,5,5 0,0 2,2 5,5").unwrap();
    assert_eq!(
        points,
        vec![Point::new(0.0, 0.0), Point::new(2.0, 2.0), Point::new(5.0, 5.0)]
    );
}

#[test]
fn test_edge_spline_parse_appends_distinct_endpoint() {
    let points = parse_spline("e,9,9 0,0 2,2 5,5").unwrap();
    assert_eq!(points.last(), Some(&Point::new(9.0, 9.0)));
    assert_eq!(points.first(), Some(&Point::new(0.0, 0.0)));
    assert_eq!(points.len(), 4);
}

#[test]
fn test_edge_spline_parse_rejects_garbage() {
    assert!(parse_spline("e,5,5 nonsense").is_none());
    assert!(parse_spline("").is_none());
}

#[test]
fn test_join_continuations() {
    let joined = join_continuations("a \\\nb\nc\n");
    assert_eq!(joined, vec!["a b".to_string(), "c".to_string()]);
}

#[test]
fn test_dot_serialization_carries_handles() {
    let (graph, a, b, e) = two_vertex_graph();
    let dot = graph.as_dot(LayoutEngine::Dot, false);
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains(&format!("n{a} [handle={a}")));
    assert!(dot.contains(&format!("n{b} [handle={b}")));
    assert!(dot.contains(&format!("n{a} -> n{b} [handle={e}")));
    // The anchor is only needed for engines without a fixed origin.
    assert!(!dot.contains("__origin__"));
    assert!(graph.as_dot(LayoutEngine::Neato, false).contains("__origin__"));
}

#[test]
fn test_dot_serialization_reversed_edge_swaps_endpoints() {
    let mut graph = Graph::new();
    let a = graph.add_vertex(Vertex::new("a"));
    let b = graph.add_vertex(Vertex::new("b"));
    let mut edge = Edge::new(a, b);
    edge.reverse();
    let e = graph.add_edge(edge);
    let dot = graph.as_dot(LayoutEngine::Dot, false);
    assert!(dot.contains(&format!("n{b} -> n{a} [handle={e}")));
}

#[test]
fn test_dot_serialization_nested_cluster() {
    let mut graph = Graph::new();
    let cluster = graph.add_subgraph(graph.root());
    let v = graph.add_vertex_to(cluster, Vertex::new("inner"));
    let dot = graph.as_dot(LayoutEngine::Dot, false);
    assert!(dot.contains(&format!("subgraph cluster{cluster} {{")));
    assert!(dot.contains(&format!("graph [handle={cluster}]")));
    assert!(dot.contains(&format!("n{v} [handle={v}")));
}

#[test]
fn test_dot_serialization_rank_groups() {
    let mut graph = Graph::new();
    let mut first = Vertex::new("first");
    first.set_rank(Rank::Min);
    let mut left = Vertex::new("left");
    left.set_rank(Rank::Same(1));
    let mut right = Vertex::new("right");
    right.set_rank(Rank::Same(1));
    let f = graph.add_vertex(first);
    let l = graph.add_vertex(left);
    let r = graph.add_vertex(right);
    let dot = graph.as_dot(LayoutEngine::Dot, false);
    assert!(dot.contains(&format!("{{ rank=min; n{f}; }}")));
    assert!(dot.contains(&format!("{{ rank=same; n{l}; n{r}; }}")));
}

#[test]
fn test_dot_serialization_sizes_in_inches() {
    let mut graph = Graph::new();
    let mut v = Vertex::new("sized");
    v.set_size(144.0, 72.0);
    graph.add_vertex(v);
    let dot = graph.as_dot(LayoutEngine::Dot, false);
    assert!(dot.contains("width=2, height=1, fixedsize=true"));
}

#[test]
fn test_dot_serialization_pins_positions_when_kept() {
    let mut graph = Graph::new();
    let mut v = Vertex::new("pinned");
    v.set_fixed_position(Point::new(30.0, 40.0));
    graph.add_vertex(v);
    let dot = graph.as_dot(LayoutEngine::Neato, false);
    assert!(dot.contains("pos=\"30,40!\""));
}

#[test]
fn test_parse_layout_output_vertex_positions() {
    let (mut graph, a, b, _) = two_vertex_graph();
    let output = format!(
        "digraph finstruct {{\n\
         graph [bb=\"0,0,200,100\", handle={root}];\n\
         n{a} [handle={a}, pos=\"54,36\"];\n\
         n{b} [handle={b}, pos=\"154,36\"];\n\
         }}\n",
        root = graph.root()
    );
    graph.parse_layout_output(&output).unwrap();
    assert_eq!(
        graph.vertex(a).unwrap().layout_position(),
        Some(Point::new(54.0, 36.0))
    );
    let bounds = graph.subgraph(graph.root()).unwrap().bounds().unwrap();
    assert_eq!(bounds.width(), 200.0);
    assert_eq!(bounds.height(), 100.0);
}

#[test]
fn test_parse_layout_output_subtracts_anchor_origin() {
    let (mut graph, a, _, _) = two_vertex_graph();
    let output = format!(
        "__origin__ [pos=\"10,10\"];\n\
         n{a} [handle={a}, pos=\"64,46\"];\n"
    );
    graph.parse_layout_output(&output).unwrap();
    assert_eq!(
        graph.vertex(a).unwrap().layout_position(),
        Some(Point::new(54.0, 36.0))
    );
}

#[test]
fn test_parse_layout_output_edge_path() {
    let (mut graph, _, _, e) = two_vertex_graph();
    let output = format!("n1 -> n2 [handle={e}, pos=\"e,5,5 0,0 2,2 5,5\"];\n");
    graph.parse_layout_output(&output).unwrap();
    assert_eq!(
        graph.edge(e).unwrap().layout_path().unwrap(),
        &[Point::new(0.0, 0.0), Point::new(2.0, 2.0), Point::new(5.0, 5.0)]
    );
}

#[test]
fn test_parse_layout_output_reversed_edge_path_reads_source_to_destination() {
    let mut graph = Graph::new();
    let a = graph.add_vertex(Vertex::new("a"));
    let b = graph.add_vertex(Vertex::new("b"));
    let mut edge = Edge::new(a, b);
    edge.reverse();
    let e = graph.add_edge(edge);
    // The engine laid the edge out destination-first; the stored path must
    // still run from this edge's source to its destination.
    let output = format!("n{b} -> n{a} [handle={e}, pos=\"e,0,0 5,5 2,2 0,0\"];\n");
    graph.parse_layout_output(&output).unwrap();
    assert_eq!(
        graph.edge(e).unwrap().layout_path().unwrap(),
        &[Point::new(0.0, 0.0), Point::new(2.0, 2.0), Point::new(5.0, 5.0)]
    );
}

#[test]
fn test_parse_layout_output_missing_position_is_an_error() {
    let (mut graph, a, _, _) = two_vertex_graph();
    let output = format!("n{a} [handle={a}, width=1];\n");
    let result = graph.parse_layout_output(&output);
    assert!(matches!(
        result,
        Err(LayoutError::MissingAttribute { attribute: "pos", .. })
    ));
}

#[test]
fn test_parse_layout_output_unknown_handle_is_an_error() {
    let mut graph = Graph::new();
    let result = graph.parse_layout_output("nX [handle=999, pos=\"1,1\"];\n");
    assert!(matches!(result, Err(LayoutError::UnknownHandle { handle: 999, .. })));
}

#[test]
fn test_parse_layout_output_ignores_lines_without_handles() {
    let mut graph = Graph::new();
    let output = "digraph finstruct {\nnode [label=\"\\N\"];\n}\n";
    assert!(graph.parse_layout_output(output).is_ok());
}

#[test]
fn test_attr_value_rendering() {
    assert_eq!(AttrValue::Text("filled".into()).to_string(), "filled");
    assert_eq!(AttrValue::Quoted("a \"b\"".into()).to_string(), "\"a \\\"b\\\"\"");
    assert_eq!(AttrValue::Number(2.5).to_string(), "2.5");
}

#[test]
fn test_attributes_set_replaces() {
    let mut attrs = Attributes::default();
    attrs.set("color", AttrValue::Text("red".into()));
    attrs.set("color", AttrValue::Text("blue".into()));
    assert_eq!(attrs.get("color"), Some(&AttrValue::Text("blue".into())));
}

#[test]
fn test_custom_attributes_are_serialized() {
    let mut graph = Graph::new();
    let mut v = Vertex::new("styled");
    v.attrs.set("shape", AttrValue::Text("box".into()));
    let h = graph.add_vertex(v);
    let dot = graph.as_dot(LayoutEngine::Dot, false);
    assert!(dot.contains(&format!("n{h} [handle={h}, label=\"styled\", shape=box];")));
}
