//! Finstruct CLI - Offline layout preview for graph description files

mod graph;

use graph::{Edge, Graph, Handle, LayoutEngine, Vertex};
use std::collections::HashMap;
use std::env;
use std::fs;

fn vertex_handle(
    graph: &mut Graph,
    handles: &mut HashMap<String, Handle>,
    order: &mut Vec<(String, Handle)>,
    name: &str,
) -> Handle {
    if let Some(&handle) = handles.get(name) {
        return handle;
    }
    let mut vertex = Vertex::new(name);
    vertex.set_size(7.0 * name.len() as f64 + 18.0, 28.0);
    let handle = graph.add_vertex(vertex);
    handles.insert(name.to_string(), handle);
    order.push((name.to_string(), handle));
    handle
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Finstruct CLI - Graph Layout Preview");
        println!("Usage: finstruct-cli <file.graph> [dot|neato|fdp]");
        println!();
        println!("File format: one item per line, either `a -> b` (edge) or a");
        println!("bare vertex name; `#` starts a comment.");
        return;
    }

    let filename = &args[1];
    let engine = match args.get(2) {
        Some(name) => match LayoutEngine::from_name(name) {
            Some(engine) => engine,
            None => {
                eprintln!("❌ Unknown layout engine '{name}' (expected dot, neato or fdp)");
                return;
            }
        },
        None => LayoutEngine::Dot,
    };

    let content = match fs::read_to_string(filename) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("❌ Could not read file '{filename}': {e}");
            return;
        }
    };

    let mut graph = Graph::new();
    let mut handles: HashMap<String, Handle> = HashMap::new();
    let mut order: Vec<(String, Handle)> = Vec::new();
    let mut edges: Vec<(String, String, Handle)> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((from, to)) = line.split_once("->") {
            let (from, to) = (from.trim(), to.trim());
            if from.is_empty() || to.is_empty() {
                eprintln!("❌ Malformed edge line: {line}");
                return;
            }
            let a = vertex_handle(&mut graph, &mut handles, &mut order, from);
            let b = vertex_handle(&mut graph, &mut handles, &mut order, to);
            let handle = graph.add_edge(Edge::new(a, b));
            edges.push((from.to_string(), to.to_string(), handle));
        } else {
            vertex_handle(&mut graph, &mut handles, &mut order, line);
        }
    }

    if order.is_empty() {
        eprintln!("❌ '{filename}' contains no vertices");
        return;
    }

    match graph.apply_layout(engine, false) {
        Ok(()) => {
            println!(
                "✅ Laid out {} vertices and {} edges with {}:",
                order.len(),
                edges.len(),
                engine.command()
            );
            println!();
            for (name, handle) in &order {
                if let Some(pos) = graph.vertex(*handle).and_then(|v| v.layout_position()) {
                    println!("  {name}: ({:.1}, {:.1})", pos.x, pos.y);
                }
            }
            for (from, to, handle) in &edges {
                if let Some(path) = graph.edge(*handle).and_then(|e| e.layout_path()) {
                    let points: Vec<String> = path
                        .iter()
                        .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
                        .collect();
                    println!("  {from} -> {to}: {}", points.join(" "));
                }
            }
        }
        Err(e) => {
            eprintln!("❌ Layout failed: {e}");
        }
    }
}
