//! Graph Layout Subsystem
//! Attributed graph model, serialized to GraphViz dot and laid out by an
//! external layout engine (dot / neato / fdp) run as a subprocess.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Process-local identifier of a graph element, embedded into the dot text so
/// that engine output lines can be mapped back to their originating element.
pub type Handle = usize;

/// Points per inch. GraphViz expects node sizes in inches but reports
/// positions in points; all geometry in this module is kept in points.
const POINTS_PER_INCH: f64 = 72.0;

/// Name of the synthetic anchor node injected for engines whose output
/// coordinate origin is not guaranteed to be (0,0).
const ANCHOR_NAME: &str = "__origin__";

/// A 2D position in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box, as reported by the engine's `bb` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// An attribute value, typed at insertion time so that rendering to dot text
/// never has to guess about quoting.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Emitted verbatim (identifiers, keywords such as `true`).
    Text(String),
    /// Emitted in double quotes, with embedded quotes escaped.
    Quoted(String),
    /// Emitted via the shortest float representation.
    Number(f64),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{}", s),
            AttrValue::Quoted(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            AttrValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Ordered key/value attribute set shared by all graph elements.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    /// Set an attribute, replacing any previous value for the same key.
    pub fn set(&mut self, key: impl Into<String>, value: AttrValue) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append this set as `key=value` pairs to a dot attribute list.
    fn write_dot(&self, out: &mut String) {
        for (key, value) in &self.entries {
            out.push_str(", ");
            out.push_str(key);
            out.push('=');
            out.push_str(&value.to_string());
        }
    }
}

/// Extract the value of a named attribute out of a layout-engine output line.
///
/// Handles both `key=value` and `key="value"`; a bare value ends at the next
/// comma, closing bracket or whitespace.
pub fn attribute_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let mut search = 0;
    while let Some(found) = line[search..].find(key) {
        let start = search + found;
        let end = start + key.len();
        // The key must stand alone and be followed by '='.
        let preceded_ok = start == 0
            || matches!(
                line.as_bytes()[start - 1],
                b' ' | b'\t' | b'[' | b',' | b';'
            );
        if preceded_ok && line[end..].starts_with('=') {
            let rest = &line[end + 1..];
            if let Some(quoted) = rest.strip_prefix('"') {
                return quoted.split('"').next();
            }
            let stop = rest
                .find(|c: char| c == ',' || c == ']' || c == ';' || c.is_whitespace())
                .unwrap_or(rest.len());
            return Some(&rest[..stop]);
        }
        search = end;
    }
    None
}

// ============================================================================
// ELEMENTS
// ============================================================================

/// Rank constraint placing a vertex within the engine's layering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    /// First layer.
    Min,
    /// Last layer.
    Max,
    /// Same layer as every other vertex with the same group number.
    Same(u32),
}

/// A positioned, sized node.
#[derive(Debug, Clone, Default)]
pub struct Vertex {
    pub attrs: Attributes,
    handle: Option<Handle>,
    label: String,
    rank: Option<Rank>,
    /// Pin the vertex at `position` during layout (neato/fdp).
    fixed: bool,
    /// Fixed width/height in points.
    size: Option<(f64, f64)>,
    /// Initial position when `fixed`, post-layout position afterwards.
    position: Option<Point>,
}

impl Vertex {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn handle(&self) -> Option<Handle> {
        self.handle
    }

    pub fn set_rank(&mut self, rank: Rank) {
        self.rank = Some(rank);
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Some((width, height));
    }

    pub fn size(&self) -> Option<(f64, f64)> {
        self.size
    }

    /// Pin the vertex at the given position for engines that honor it.
    pub fn set_fixed_position(&mut self, pos: Point) {
        self.position = Some(pos);
        self.fixed = true;
    }

    /// Position computed by the last layout run (or the fixed position).
    pub fn layout_position(&self) -> Option<Point> {
        self.position
    }

    /// Store the position found in an engine output line.
    fn parse_layout_line(&mut self, line: &str, origin: Point) -> Result<(), LayoutError> {
        let pos = attribute_value(line, "pos").ok_or_else(|| LayoutError::MissingAttribute {
            attribute: "pos",
            line: line.to_string(),
        })?;
        let p = parse_point(pos.trim_end_matches('!')).ok_or_else(|| LayoutError::Malformed {
            what: "vertex position",
            line: line.to_string(),
        })?;
        self.position = Some(Point::new(p.x - origin.x, p.y - origin.y));
        Ok(())
    }
}

/// A directed connection between two vertices. Endpoints are references by
/// handle; vertices are freely shared between edges.
#[derive(Debug, Clone)]
pub struct Edge {
    pub attrs: Attributes,
    handle: Option<Handle>,
    source: Handle,
    destination: Handle,
    reversed: bool,
    path: Option<Vec<Point>>,
}

impl Edge {
    pub fn new(source: Handle, destination: Handle) -> Self {
        Self {
            attrs: Attributes::default(),
            handle: None,
            source,
            destination,
            reversed: false,
            path: None,
        }
    }

    pub fn handle(&self) -> Option<Handle> {
        self.handle
    }

    pub fn source(&self) -> Handle {
        self.source
    }

    pub fn destination(&self) -> Handle {
        self.destination
    }

    /// Treat the destination as the source during layout and arrow drawing.
    /// Does not change which vertices the edge references.
    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Spline control points computed by the last layout run, in
    /// source-to-destination order of this edge.
    pub fn layout_path(&self) -> Option<&[Point]> {
        self.path.as_deref()
    }

    /// Store the spline path found in an engine output line.
    fn parse_layout_line(&mut self, line: &str, origin: Point) -> Result<(), LayoutError> {
        let pos = attribute_value(line, "pos").ok_or_else(|| LayoutError::MissingAttribute {
            attribute: "pos",
            line: line.to_string(),
        })?;
        let mut points = parse_spline(pos).ok_or_else(|| LayoutError::Malformed {
            what: "edge spline",
            line: line.to_string(),
        })?;
        for p in &mut points {
            p.x -= origin.x;
            p.y -= origin.y;
        }
        // A reversed edge was laid out destination-first; flip the path so it
        // always reads in this edge's own source-to-destination order.
        if self.reversed {
            points.reverse();
        }
        self.path = Some(points);
        Ok(())
    }
}

/// A nesting scope: the root graph or a nested cluster.
#[derive(Debug, Clone, Default)]
pub struct Subgraph {
    pub attrs: Attributes,
    parent: Option<Handle>,
    vertices: Vec<Handle>,
    edges: Vec<Handle>,
    children: Vec<Handle>,
    bounds: Option<Bounds>,
}

impl Subgraph {
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Handle of the enclosing scope; `None` for the root.
    pub fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub fn vertices(&self) -> &[Handle] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Handle] {
        &self.edges
    }

    pub fn subgraphs(&self) -> &[Handle] {
        &self.children
    }

    fn parse_layout_line(&mut self, line: &str) -> Result<(), LayoutError> {
        let bb = attribute_value(line, "bb").ok_or_else(|| LayoutError::MissingAttribute {
            attribute: "bb",
            line: line.to_string(),
        })?;
        let nums: Vec<f64> = bb.split(',').filter_map(|n| n.trim().parse().ok()).collect();
        if nums.len() != 4 {
            return Err(LayoutError::Malformed {
                what: "bounding box",
                line: line.to_string(),
            });
        }
        self.bounds = Some(Bounds {
            min: Point::new(nums[0], nums[1]),
            max: Point::new(nums[2], nums[3]),
        });
        Ok(())
    }
}

enum Element {
    Vertex(Vertex),
    Edge(Edge),
    Scope(Subgraph),
}

/// Reference to a registered element, looked up by handle.
pub enum GraphElement<'a> {
    Vertex(&'a Vertex),
    Edge(&'a Edge),
    Subgraph(&'a Subgraph),
}

// ============================================================================
// LAYOUT ENGINES
// ============================================================================

/// The interchangeable external layout engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEngine {
    Dot,
    Neato,
    Fdp,
}

impl LayoutEngine {
    pub fn command(&self) -> &'static str {
        match self {
            LayoutEngine::Dot => "dot",
            LayoutEngine::Neato => "neato",
            LayoutEngine::Fdp => "fdp",
        }
    }

    /// Whether the engine honors pinned (`pos="x,y!"`) node positions.
    fn supports_pinning(&self) -> bool {
        !matches!(self, LayoutEngine::Dot)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dot" => Some(LayoutEngine::Dot),
            "neato" => Some(LayoutEngine::Neato),
            "fdp" => Some(LayoutEngine::Fdp),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("failed to run `{engine}`: {source}")]
    Spawn {
        engine: &'static str,
        source: std::io::Error,
    },
    #[error("`{engine}` failed: {stderr}")]
    Engine { engine: &'static str, stderr: String },
    #[error("missing `{attribute}` in layout output line: {line}")]
    MissingAttribute { attribute: &'static str, line: String },
    #[error("malformed {what} in layout output line: {line}")]
    Malformed { what: &'static str, line: String },
    #[error("layout output references unknown handle {handle}: {line}")]
    UnknownHandle { handle: Handle, line: String },
}

// ============================================================================
// GRAPH
// ============================================================================

/// Container owning the handle registry and the scope tree.
///
/// Elements are added to exactly one scope; their handles are unique within
/// the whole tree and stable until [`Graph::clear`] resets them. Handles are
/// allocated from a monotonic counter, so a cleared and re-added element
/// always receives a fresh handle.
pub struct Graph {
    elements: HashMap<Handle, Element>,
    next_handle: Handle,
    root: Handle,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        let mut graph = Self {
            elements: HashMap::new(),
            next_handle: 0,
            root: 0,
        };
        graph.root = graph.register(Element::Scope(Subgraph::default()));
        graph
    }

    /// Handle of the root scope.
    pub fn root(&self) -> Handle {
        self.root
    }

    fn register(&mut self, element: Element) -> Handle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.elements.insert(handle, element);
        handle
    }

    fn scope_mut(&mut self, handle: Handle) -> &mut Subgraph {
        match self.elements.get_mut(&handle) {
            Some(Element::Scope(s)) => s,
            _ => panic!("handle {handle} does not name a graph scope"),
        }
    }

    /// Add a vertex to the root scope.
    pub fn add_vertex(&mut self, vertex: Vertex) -> Handle {
        self.add_vertex_to(self.root, vertex)
    }

    /// Add a vertex to a nested scope.
    pub fn add_vertex_to(&mut self, scope: Handle, mut vertex: Vertex) -> Handle {
        vertex.handle = None;
        let handle = self.register(Element::Vertex(vertex));
        if let Some(Element::Vertex(v)) = self.elements.get_mut(&handle) {
            v.handle = Some(handle);
        }
        self.scope_mut(scope).vertices.push(handle);
        handle
    }

    /// Add an edge to the root scope. Both endpoints must be registered
    /// vertex handles.
    pub fn add_edge(&mut self, edge: Edge) -> Handle {
        self.add_edge_to(self.root, edge)
    }

    pub fn add_edge_to(&mut self, scope: Handle, mut edge: Edge) -> Handle {
        assert!(
            self.vertex(edge.source).is_some() && self.vertex(edge.destination).is_some(),
            "edge endpoints must be registered vertices"
        );
        edge.handle = None;
        let handle = self.register(Element::Edge(edge));
        if let Some(Element::Edge(e)) = self.elements.get_mut(&handle) {
            e.handle = Some(handle);
        }
        self.scope_mut(scope).edges.push(handle);
        handle
    }

    /// Add a nested cluster below the given scope, returning its handle.
    pub fn add_subgraph(&mut self, parent: Handle) -> Handle {
        let child = Subgraph {
            parent: Some(parent),
            ..Default::default()
        };
        let handle = self.register(Element::Scope(child));
        self.scope_mut(parent).children.push(handle);
        handle
    }

    pub fn element(&self, handle: Handle) -> Option<GraphElement<'_>> {
        self.elements.get(&handle).map(|e| match e {
            Element::Vertex(v) => GraphElement::Vertex(v),
            Element::Edge(e) => GraphElement::Edge(e),
            Element::Scope(s) => GraphElement::Subgraph(s),
        })
    }

    pub fn vertex(&self, handle: Handle) -> Option<&Vertex> {
        match self.elements.get(&handle) {
            Some(Element::Vertex(v)) => Some(v),
            _ => None,
        }
    }

    pub fn vertex_mut(&mut self, handle: Handle) -> Option<&mut Vertex> {
        match self.elements.get_mut(&handle) {
            Some(Element::Vertex(v)) => Some(v),
            _ => None,
        }
    }

    pub fn edge(&self, handle: Handle) -> Option<&Edge> {
        match self.elements.get(&handle) {
            Some(Element::Edge(e)) => Some(e),
            _ => None,
        }
    }

    pub fn subgraph(&self, handle: Handle) -> Option<&Subgraph> {
        match self.elements.get(&handle) {
            Some(Element::Scope(s)) => Some(s),
            _ => None,
        }
    }

    pub fn subgraph_mut(&mut self, handle: Handle) -> Option<&mut Subgraph> {
        match self.elements.get_mut(&handle) {
            Some(Element::Scope(s)) => Some(s),
            _ => None,
        }
    }

    /// All registered vertices, in handle order.
    pub fn vertices(&self) -> impl Iterator<Item = (Handle, &Vertex)> {
        let mut handles: Vec<Handle> = self
            .elements
            .iter()
            .filter_map(|(h, e)| matches!(e, Element::Vertex(_)).then_some(*h))
            .collect();
        handles.sort_unstable();
        handles.into_iter().map(move |h| {
            let Some(Element::Vertex(v)) = self.elements.get(&h) else {
                unreachable!()
            };
            (h, v)
        })
    }

    /// All registered edges, in handle order.
    pub fn edges(&self) -> impl Iterator<Item = (Handle, &Edge)> {
        let mut handles: Vec<Handle> = self
            .elements
            .iter()
            .filter_map(|(h, e)| matches!(e, Element::Edge(_)).then_some(*h))
            .collect();
        handles.sort_unstable();
        handles.into_iter().map(move |h| {
            let Some(Element::Edge(e)) = self.elements.get(&h) else {
                unreachable!()
            };
            (h, e)
        })
    }

    /// Drop every element and reset all handles. Elements added afterwards
    /// receive fresh handles; the old ones are never handed out again.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.root = self.register(Element::Scope(Subgraph::default()));
    }

    // ------------------------------------------------------------------
    // Dot serialization
    // ------------------------------------------------------------------

    /// Serialize the graph to the engine's textual input format.
    ///
    /// Every element line carries its handle as an attribute so output lines
    /// can be mapped back to the originating element. An anchor node at the
    /// origin is injected for engines whose output coordinate system does not
    /// start at (0,0).
    pub fn as_dot(&self, engine: LayoutEngine, keep_positions: bool) -> String {
        let pin = engine.supports_pinning();
        let mut out = String::new();
        out.push_str("digraph finstruct {\n");
        if pin {
            out.push_str(&format!(
                "{ANCHOR_NAME} [pos=\"0,0!\", shape=point, width=0.01, label=\"\"];\n"
            ));
        }
        self.write_scope(&mut out, self.root, pin && keep_positions);
        out.push_str("}\n");
        out
    }

    fn write_scope(&self, out: &mut String, scope: Handle, pin_positions: bool) {
        let Some(Element::Scope(s)) = self.elements.get(&scope) else {
            return;
        };
        let mut graph_attrs = format!("graph [handle={scope}");
        s.attrs.write_dot(&mut graph_attrs);
        graph_attrs.push_str("];\n");
        out.push_str(&graph_attrs);

        let mut rank_groups: HashMap<Rank, Vec<Handle>> = HashMap::new();
        for &vh in &s.vertices {
            let Some(Element::Vertex(v)) = self.elements.get(&vh) else {
                continue;
            };
            let mut line = format!("n{vh} [handle={vh}, label=\"{}\"", v.label);
            if let Some((w, h)) = v.size {
                line.push_str(&format!(
                    ", width={}, height={}, fixedsize=true",
                    w / POINTS_PER_INCH,
                    h / POINTS_PER_INCH
                ));
            }
            if let Some(pos) = v.position {
                if v.fixed || pin_positions {
                    line.push_str(&format!(", pos=\"{},{}!\"", pos.x, pos.y));
                }
            }
            v.attrs.write_dot(&mut line);
            line.push_str("];\n");
            out.push_str(&line);
            if let Some(rank) = v.rank {
                rank_groups.entry(rank).or_default().push(vh);
            }
        }

        let mut ranks: Vec<(Rank, Vec<Handle>)> = rank_groups.into_iter().collect();
        ranks.sort_by_key(|(r, _)| match r {
            Rank::Min => (0, 0),
            Rank::Max => (1, 0),
            Rank::Same(n) => (2, *n),
        });
        for (rank, members) in ranks {
            let keyword = match rank {
                Rank::Min => "min",
                Rank::Max => "max",
                Rank::Same(_) => "same",
            };
            out.push_str(&format!("{{ rank={keyword};"));
            for vh in members {
                out.push_str(&format!(" n{vh};"));
            }
            out.push_str(" }\n");
        }

        for &ch in &s.children {
            out.push_str(&format!("subgraph cluster{ch} {{\n"));
            self.write_scope(out, ch, pin_positions);
            out.push_str("}\n");
        }

        for &eh in &s.edges {
            let Some(Element::Edge(e)) = self.elements.get(&eh) else {
                continue;
            };
            let (from, to) = if e.reversed {
                (e.destination, e.source)
            } else {
                (e.source, e.destination)
            };
            let mut line = format!("n{from} -> n{to} [handle={eh}");
            e.attrs.write_dot(&mut line);
            line.push_str("];\n");
            out.push_str(&line);
        }
    }

    // ------------------------------------------------------------------
    // Layout invocation and output parsing
    // ------------------------------------------------------------------

    /// Run the external layout engine and store the resulting geometry on
    /// the registered elements.
    pub fn apply_layout(
        &mut self,
        engine: LayoutEngine,
        keep_positions: bool,
    ) -> Result<(), LayoutError> {
        let input = self.as_dot(engine, keep_positions);
        log::debug!("running {} on {} bytes of dot input", engine.command(), input.len());

        let mut child = Command::new(engine.command())
            .arg("-Tdot")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| LayoutError::Spawn {
                engine: engine.command(),
                source: e,
            })?;

        {
            let stdin = child.stdin.as_mut().expect("stdin was piped");
            stdin
                .write_all(input.as_bytes())
                .map_err(|e| LayoutError::Spawn {
                    engine: engine.command(),
                    source: e,
                })?;
        }

        let output = child.wait_with_output().map_err(|e| LayoutError::Spawn {
            engine: engine.command(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(LayoutError::Engine {
                engine: engine.command(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        self.parse_layout_output(&String::from_utf8_lossy(&output.stdout))
    }

    /// Parse the engine's annotated dot output and dispatch geometry to the
    /// elements named by the embedded handle attributes.
    fn parse_layout_output(&mut self, output: &str) -> Result<(), LayoutError> {
        let mut origin = Point::new(0.0, 0.0);
        for line in join_continuations(output) {
            let trimmed = line.trim();

            // The anchor defines the coordinate-system origin; subtract it
            // from every position parsed after it.
            if trimmed.starts_with(ANCHOR_NAME) {
                if let Some(pos) = attribute_value(trimmed, "pos") {
                    if let Some(p) = parse_point(pos.trim_end_matches('!')) {
                        origin = p;
                    }
                }
                continue;
            }

            let Some(handle_text) = attribute_value(trimmed, "handle") else {
                continue;
            };
            let handle: Handle =
                handle_text
                    .parse()
                    .map_err(|_| LayoutError::Malformed {
                        what: "handle",
                        line: trimmed.to_string(),
                    })?;

            let result = match self.elements.get_mut(&handle) {
                Some(Element::Vertex(v)) => v.parse_layout_line(trimmed, origin),
                Some(Element::Edge(e)) => e.parse_layout_line(trimmed, origin),
                Some(Element::Scope(s)) => s.parse_layout_line(trimmed),
                None => Err(LayoutError::UnknownHandle {
                    handle,
                    line: trimmed.to_string(),
                }),
            };
            if let Err(e) = result {
                log::error!("layout output parse failed: {e}");
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Join lines ending in the dot line-continuation marker.
fn join_continuations(output: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for line in output.lines() {
        if let Some(stripped) = line.strip_suffix('\\') {
            current.push_str(stripped);
        } else {
            current.push_str(line);
            lines.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn parse_point(text: &str) -> Option<Point> {
    let (x, y) = text.split_once(',')?;
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Parse an edge spline control-point list.
///
/// The engine lists the points back-to-front, with the final point carried up
/// front under an `e,`/`s,` direction marker; peel the marker, collect in
/// reverse and flip the result back into travel order.
fn parse_spline(text: &str) -> Option<Vec<Point>> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }
    let mut points = Vec::with_capacity(tokens.len());
    for token in tokens.iter().rev() {
        if let Some(marked) = token.strip_prefix("e,").or_else(|| token.strip_prefix("s,")) {
            let p = parse_point(marked)?;
            // The marked point is the path's endpoint; skip it when the
            // spline already ends there.
            if points.first() != Some(&p) {
                points.insert(0, p);
            }
        } else {
            points.push(parse_point(token)?);
        }
    }
    points.reverse();
    Some(points)
}
