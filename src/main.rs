//! Finstruct GUI - Component Graph Editor
//! Interactive shell for browsing a runtime's component graph and applying
//! undoable structural edits through its administrative interface.

use eframe::egui;
use std::collections::HashMap;

mod actions;
mod graph;
mod model;

use actions::{AddInterfacePorts, ConnectPorts, DisconnectPorts, Edit};
use graph::{AttrValue, Edge, Graph, Handle, LayoutEngine, Point, Vertex};
use model::{InterfaceSet, InterfaceSpec, PortSpec, RemoteScope, SimulatedScope};

fn finstruct_icon() -> egui::IconData {
    // Simple generated icon (64x64): dark background + two connected nodes.
    // Avoids external assets and works cross-platform.
    let w: u32 = 64;
    let h: u32 = 64;
    let mut rgba = vec![0u8; (w * h * 4) as usize];

    let node_a = (20.0f32, 44.0f32);
    let node_b = (44.0f32, 20.0f32);
    let radius = 9.0;

    // Distance from a point to the segment between the two nodes.
    let segment_distance = |x: f32, y: f32| -> f32 {
        let (ax, ay) = node_a;
        let (bx, by) = node_b;
        let (dx, dy) = (bx - ax, by - ay);
        let t = (((x - ax) * dx + (y - ay) * dy) / (dx * dx + dy * dy)).clamp(0.0, 1.0);
        let (px, py) = (ax + t * dx, ay + t * dy);
        ((x - px) * (x - px) + (y - py) * (y - py)).sqrt()
    };

    for y in 0..h {
        for x in 0..w {
            let fx = x as f32;
            let fy = y as f32;

            // Base background.
            let mut r = 22u8;
            let mut g = 26u8;
            let mut b = 32u8;

            // Connecting edge.
            if segment_distance(fx, fy) < 3.0 {
                r = 120;
                g = 150;
                b = 190;
            }

            // Nodes, with a subtle vertical gradient.
            for (cx, cy) in [node_a, node_b] {
                let dx = fx - cx;
                let dy = fy - cy;
                if (dx * dx + dy * dy).sqrt() <= radius {
                    let t = (fy / (h as f32 - 1.0)).clamp(0.0, 1.0);
                    r = (90.0 + 60.0 * (1.0 - t)) as u8;
                    g = (170.0 - 30.0 * t) as u8;
                    b = (230.0 - 40.0 * t) as u8;
                }
            }

            let idx = ((y * w + x) * 4) as usize;
            rgba[idx] = r;
            rgba[idx + 1] = g;
            rgba[idx + 2] = b;
            rgba[idx + 3] = 255;
        }
    }

    egui::IconData { rgba, width: w, height: h }
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("Finstruct - Component Graph Editor")
            .with_icon(finstruct_icon()),
        ..Default::default()
    };

    eframe::run_native(
        "Finstruct",
        options,
        Box::new(|cc| Ok(Box::new(FinstructApp::new(cc)))),
    )
}

/// A demonstration runtime pair: camera/vision/control on the main runtime,
/// the motor controller on a second one reachable via its shared port.
fn demo_scope() -> SimulatedScope {
    let mut scope = SimulatedScope::new();
    let robot = scope.add_runtime("localhost:4444");
    let base = scope.add_runtime("base:4444");

    scope.add_group("/robot", robot);
    scope.add_port("/robot/camera/image", robot, "Image", false);
    scope.add_port("/robot/vision/image", robot, "Image", false);
    scope.add_port("/robot/vision/blobs", robot, "BlobList", false);
    scope.add_port("/robot/control/blobs", robot, "BlobList", false);
    scope.add_port("/robot/control/velocity", robot, "Velocity", false);
    scope.add_port("/base/motor/velocity", base, "Velocity", true);
    scope.set_interfaces(
        "/robot/control",
        robot,
        InterfaceSet {
            interfaces: vec![InterfaceSpec {
                name: "Sensor Input".to_string(),
                editable: true,
                ports: Vec::new(),
            }],
        },
    );

    // Start with the camera wired to vision.
    let a = scope.resolve("/robot/camera/image").expect("demo port").handle;
    let b = scope.resolve("/robot/vision/image").expect("demo port").handle;
    let _ = scope.connect(robot, a, b);
    scope.dispatch_events();
    scope
}

fn parent_path(path: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(index) => path[..index].to_string(),
    }
}

fn leaf_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Commands collected from UI closures and applied after the panels have been
/// drawn, so the closures stay free of model mutation.
enum UiCommand {
    Undo,
    Connect,
    Disconnect,
    Relayout,
    ExportDot,
    SubmitPorts,
}

struct FinstructApp {
    /// The (simulated) remote runtime scope all edits run against.
    scope: SimulatedScope,
    /// Graph mirror of the visible ports and connections.
    graph: Graph,
    /// Graph vertex handle → qualified port name.
    vertex_names: HashMap<Handle, String>,
    /// Qualified port name → graph vertex handle.
    port_vertices: HashMap<String, Handle>,
    /// Connections snapshot the graph was last built from.
    last_connections: Vec<(String, String)>,
    /// Port-name snapshot the graph was last built from.
    last_ports: Vec<String>,
    layout_engine: LayoutEngine,
    keep_positions: bool,
    /// Whether we must re-run the external layout engine.
    layout_dirty: bool,
    error_message: Option<String>,
    status: String,
    /// Applied edits, oldest first; the edit menu undoes from the back.
    history: Vec<Edit>,
    /// Selected qualified port names, oldest first (at most two).
    selected: Vec<String>,
    zoom: f32,
    pan_offset: egui::Vec2,

    // Add-ports dialog state
    show_add_ports_dialog: bool,
    add_ports_component: String,
    add_ports_interface: String,
    add_ports_name: String,
    add_ports_type: String,
}

impl FinstructApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            scope: demo_scope(),
            graph: Graph::new(),
            vertex_names: HashMap::new(),
            port_vertices: HashMap::new(),
            last_connections: Vec::new(),
            last_ports: Vec::new(),
            layout_engine: LayoutEngine::Dot,
            keep_positions: false,
            layout_dirty: true,
            error_message: None,
            status: "Connected to demo runtime".to_string(),
            history: Vec::new(),
            selected: Vec::new(),
            zoom: 1.0,
            pan_offset: egui::Vec2::ZERO,
            show_add_ports_dialog: false,
            add_ports_component: "/robot/control".to_string(),
            add_ports_interface: "Sensor Input".to_string(),
            add_ports_name: String::new(),
            add_ports_type: "Pose".to_string(),
        };
        app.rebuild_graph();
        app
    }

    /// Mirror the scope's ports and connections into the layout graph, one
    /// cluster per owning component.
    fn rebuild_graph(&mut self) {
        self.graph.clear();
        self.vertex_names.clear();
        self.port_vertices.clear();

        let mut clusters: HashMap<String, Handle> = HashMap::new();
        for element in self.scope.elements() {
            if element.kind.as_port().is_none() {
                continue;
            }
            let name = element.qualified_name;
            let component = parent_path(&name);
            let cluster = match clusters.get(&component) {
                Some(&cluster) => cluster,
                None => {
                    let cluster = self.graph.add_subgraph(self.graph.root());
                    if let Some(scope) = self.graph.subgraph_mut(cluster) {
                        scope.attrs.set(
                            "label",
                            AttrValue::Quoted(component.trim_start_matches('/').to_string()),
                        );
                    }
                    clusters.insert(component.clone(), cluster);
                    cluster
                }
            };

            let label = leaf_name(&name).to_string();
            let mut vertex = Vertex::new(&label);
            vertex.set_size(8.0 * label.len() as f64 + 22.0, 30.0);
            let handle = self.graph.add_vertex_to(cluster, vertex);
            self.vertex_names.insert(handle, name.clone());
            self.port_vertices.insert(name, handle);
        }

        self.last_connections = self.scope.connections();
        self.last_ports = self.port_vertices.keys().cloned().collect();
        self.last_ports.sort();
        for (a, b) in &self.last_connections {
            if let (Some(&ha), Some(&hb)) = (self.port_vertices.get(a), self.port_vertices.get(b)) {
                self.graph.add_edge(Edge::new(ha, hb));
            }
        }
        self.layout_dirty = true;
    }

    fn relayout(&mut self) {
        match self.graph.apply_layout(self.layout_engine, self.keep_positions) {
            Ok(()) => {
                self.error_message = None;
            }
            Err(e) => {
                // Previously computed geometry stays on screen.
                self.error_message = Some(format!("Layout failed: {e}"));
            }
        }
        self.layout_dirty = false;
    }

    /// Execute an edit against the scope, blocking (cooperatively) until its
    /// outcome is confirmed, and record it in the undo history.
    fn run_edit(&mut self, mut edit: Edit) {
        let timeout = edit.default_timeout();
        match edit.execute(&mut self.scope, timeout) {
            Ok(()) => {
                self.status = format!("Applied: {}", edit.menu_description());
                self.error_message = None;
                self.history.push(edit);
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
            }
        }
        self.selected.clear();
    }

    fn undo_last(&mut self) {
        let Some(mut edit) = self.history.pop() else {
            return;
        };
        let timeout = edit.default_timeout();
        // Undo is only defined for a confirmed-successful edit.
        if let Err(e) = edit.check_success(&mut self.scope, timeout) {
            self.error_message = Some(format!("Cannot undo: {e}"));
            return;
        }
        let mut undo = edit.undo_edit();
        let timeout = undo.default_timeout();
        match undo.execute(&mut self.scope, timeout) {
            Ok(()) => {
                self.status = format!("Undone: {}", edit.menu_description());
                self.error_message = None;
            }
            Err(e) => {
                self.error_message = Some(format!("Undo failed: {e}"));
            }
        }
    }

    fn connect_selected(&mut self) {
        if let [source, destination] = &self.selected[..] {
            let edit = Edit::new(ConnectPorts::new(source.clone(), destination.clone()));
            self.run_edit(edit);
        }
    }

    fn disconnect_selected(&mut self) {
        if let [source, destination] = &self.selected[..] {
            let edit = Edit::new(DisconnectPorts::new(source.clone(), destination.clone()));
            self.run_edit(edit);
        }
    }

    fn submit_add_ports(&mut self) {
        let component = self.add_ports_component.trim().to_string();
        let interface = self.add_ports_interface.trim().to_string();
        let name = self.add_ports_name.trim().to_string();
        let data_type = self.add_ports_type.trim().to_string();
        if name.is_empty() || data_type.is_empty() {
            self.error_message = Some("Port name and data type must not be empty".to_string());
            return;
        }

        let mut op = match AddInterfacePorts::new(&self.scope, component) {
            Ok(op) => op,
            Err(e) => {
                self.error_message = Some(e.to_string());
                return;
            }
        };
        match op.ports_to_add(&interface) {
            Ok(ports) => ports.push(PortSpec::new(name, data_type)),
            Err(e) => {
                self.error_message = Some(e.to_string());
                return;
            }
        }
        self.show_add_ports_dialog = false;
        self.add_ports_name.clear();
        self.run_edit(Edit::new(op));
    }

    fn export_dot(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("GraphViz dot", &["dot"])
            .set_file_name("finstruct.dot")
            .save_file()
        {
            let dot = self.graph.as_dot(self.layout_engine, false);
            match std::fs::write(&path, dot) {
                Ok(()) => self.status = format!("Exported {}", path.display()),
                Err(e) => self.error_message = Some(format!("Export failed: {e}")),
            }
        }
    }

    /// Components that currently expose at least one editable interface.
    fn editable_components(&self) -> Vec<String> {
        self.scope
            .elements()
            .into_iter()
            .filter(|e| e.kind.as_port().is_none())
            .map(|e| e.qualified_name)
            .filter(|name| {
                self.scope
                    .interfaces_of(name)
                    .map(|set| !set.editable_names().is_empty())
                    .unwrap_or(false)
            })
            .collect()
    }

    fn draw_graph(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

        if response.dragged() {
            self.pan_offset += response.drag_delta();
        }
        let scroll_delta = ui.ctx().input(|i| i.raw_scroll_delta);
        if response.hovered() && scroll_delta.y != 0.0 {
            self.zoom = (self.zoom + scroll_delta.y * 0.001).clamp(0.3, 3.0);
        }

        let rect = response.rect;
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(25, 28, 32));
        draw_grid(&painter, rect, self.zoom, self.pan_offset);

        // Graph coordinates are y-up with the origin at the lower left;
        // center the drawing on the root bounding box.
        let center = self
            .graph
            .subgraph(self.graph.root())
            .and_then(|s| s.bounds())
            .map(|b| Point::new((b.min.x + b.max.x) * 0.5, (b.min.y + b.max.y) * 0.5))
            .unwrap_or(Point::new(0.0, 0.0));
        let zoom = self.zoom;
        let pan = self.pan_offset;
        let transform = |p: Point| -> egui::Pos2 {
            rect.center()
                + egui::vec2(
                    (p.x - center.x) as f32 * zoom,
                    -((p.y - center.y) as f32) * zoom,
                )
                + pan
        };

        // Cluster outlines behind everything else.
        if let Some(root) = self.graph.subgraph(self.graph.root()) {
            for &cluster in root.subgraphs() {
                if let Some(bounds) = self.graph.subgraph(cluster).and_then(|s| s.bounds()) {
                    let top_left = transform(Point::new(bounds.min.x, bounds.max.y));
                    let bottom_right = transform(Point::new(bounds.max.x, bounds.min.y));
                    let cluster_rect = egui::Rect::from_two_pos(top_left, bottom_right);
                    painter.rect_stroke(
                        cluster_rect,
                        4.0,
                        egui::Stroke::new(1.0, egui::Color32::from_rgb(60, 70, 85)),
                    );
                }
            }
        }

        // Edges from engine-provided spline points.
        for (_, edge) in self.graph.edges() {
            if let Some(path) = edge.layout_path() {
                let points: Vec<egui::Pos2> = path.iter().copied().map(transform).collect();
                if points.len() >= 2 {
                    let color = egui::Color32::from_rgb(150, 160, 180);
                    painter.add(egui::Shape::line(
                        points.clone(),
                        egui::Stroke::new(2.0 * zoom, color),
                    ));
                    draw_arrow_head(&painter, &points, zoom, color);
                }
            }
        }

        // Ports on top; remember their screen boxes for click handling.
        let mut hit_boxes: Vec<(egui::Rect, String)> = Vec::new();
        for (handle, vertex) in self.graph.vertices() {
            let Some(pos) = vertex.layout_position() else {
                continue;
            };
            let Some(name) = self.vertex_names.get(&handle) else {
                continue;
            };
            let (width, height) = vertex.size().unwrap_or((80.0, 30.0));
            let box_rect = egui::Rect::from_center_size(
                transform(pos),
                egui::vec2(width as f32 * zoom, height as f32 * zoom),
            );
            let selected = self.selected.iter().any(|s| s == name);
            let fill = if selected {
                egui::Color32::from_rgb(70, 100, 150)
            } else {
                egui::Color32::from_rgb(45, 52, 64)
            };
            let stroke_color = if selected {
                egui::Color32::from_rgb(140, 180, 240)
            } else {
                egui::Color32::from_rgb(90, 100, 115)
            };
            painter.rect_filled(box_rect, 4.0, fill);
            painter.rect_stroke(box_rect, 4.0, egui::Stroke::new(1.5, stroke_color));
            painter.text(
                box_rect.center(),
                egui::Align2::CENTER_CENTER,
                vertex.label(),
                egui::FontId::proportional(12.0 * zoom),
                egui::Color32::from_rgb(220, 225, 230),
            );
            hit_boxes.push((box_rect, name.clone()));
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                if let Some((_, name)) = hit_boxes.iter().find(|(r, _)| r.contains(pointer)) {
                    self.toggle_selection(name.clone());
                }
            }
        }

        if self.graph.vertices().next().is_none() {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No ports in the current runtime view.",
                egui::FontId::proportional(16.0),
                egui::Color32::GRAY,
            );
        }
    }

    fn toggle_selection(&mut self, name: String) {
        if let Some(index) = self.selected.iter().position(|s| *s == name) {
            self.selected.remove(index);
        } else {
            self.selected.push(name);
            if self.selected.len() > 2 {
                self.selected.remove(0);
            }
        }
    }
}

impl eframe::App for FinstructApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Deliver pending runtime notifications once per frame.
        self.scope.dispatch_events();

        // Ports and connections change asynchronously as notifications come
        // in; keep the graph mirror in sync with the visible model.
        let ports: Vec<String> = self
            .scope
            .elements()
            .into_iter()
            .filter(|e| e.kind.as_port().is_some())
            .map(|e| e.qualified_name)
            .collect();
        if self.scope.connections() != self.last_connections || ports != self.last_ports {
            self.rebuild_graph();
        }

        let mut command: Option<UiCommand> = None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("📤 Export .dot…").clicked() {
                        command = Some(UiCommand::ExportDot);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    match self.history.last() {
                        Some(last) => {
                            if ui
                                .button(format!("↩ Undo {}", last.menu_description()))
                                .clicked()
                            {
                                command = Some(UiCommand::Undo);
                                ui.close_menu();
                            }
                        }
                        None => {
                            ui.label("Nothing to undo");
                        }
                    }
                    if self.history.len() > 1 {
                        ui.separator();
                        for edit in self.history.iter().rev().skip(1) {
                            ui.label(edit.menu_description());
                        }
                    }
                });

                ui.menu_button("Layout", |ui| {
                    for engine in [LayoutEngine::Dot, LayoutEngine::Neato, LayoutEngine::Fdp] {
                        if ui
                            .radio(self.layout_engine == engine, engine.command())
                            .clicked()
                        {
                            self.layout_engine = engine;
                            self.layout_dirty = true;
                            ui.close_menu();
                        }
                    }
                    ui.separator();
                    ui.checkbox(&mut self.keep_positions, "Keep positions");
                    if ui.button("Re-run layout").clicked() {
                        command = Some(UiCommand::Relayout);
                        ui.close_menu();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Component Graph");

            ui.horizontal_wrapped(|ui| {
                let two_selected = self.selected.len() == 2;
                if ui
                    .add_enabled(two_selected, egui::Button::new("🔗 Connect"))
                    .clicked()
                {
                    command = Some(UiCommand::Connect);
                }
                if ui
                    .add_enabled(two_selected, egui::Button::new("✂ Disconnect"))
                    .clicked()
                {
                    command = Some(UiCommand::Disconnect);
                }
                if ui.button("➕ Add ports…").clicked() {
                    self.show_add_ports_dialog = true;
                }

                ui.separator();

                // Zoom controls
                if ui.button("➖").clicked() {
                    self.zoom = (self.zoom - 0.1).max(0.3);
                }
                ui.label(format!("{:.0}%", self.zoom * 100.0));
                if ui.button("➕").clicked() {
                    self.zoom = (self.zoom + 0.1).min(3.0);
                }

                ui.separator();
                match self.selected.len() {
                    0 => ui.label("Click a port to select it"),
                    1 => ui.label(format!("Selected: {}", self.selected[0])),
                    _ => ui.label(format!(
                        "Selected: {} → {}",
                        self.selected[0], self.selected[1]
                    )),
                };
            });

            ui.separator();
            self.draw_graph(ui);
        });

        egui::TopBottomPanel::bottom("info_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Finstruct v0.1.0");
                ui.separator();
                ui.label("Scroll to zoom | Drag to pan");
                ui.separator();
                ui.label(format!(
                    "Ports: {} | Connections: {}",
                    self.vertex_names.len(),
                    self.last_connections.len()
                ));
                ui.separator();
                match &self.error_message {
                    Some(error) => {
                        ui.colored_label(egui::Color32::from_rgb(230, 110, 110), error);
                    }
                    None => {
                        ui.label(&self.status);
                    }
                }
            });
        });

        if self.show_add_ports_dialog {
            let mut open = self.show_add_ports_dialog;
            egui::Window::new("Add ports to interface")
                .open(&mut open)
                .resizable(false)
                .show(ctx, |ui| {
                    let components = self.editable_components();
                    egui::ComboBox::from_label("Component")
                        .selected_text(&self.add_ports_component)
                        .show_ui(ui, |ui| {
                            for component in components {
                                ui.selectable_value(
                                    &mut self.add_ports_component,
                                    component.clone(),
                                    component,
                                );
                            }
                        });

                    let interfaces: Vec<String> = self
                        .scope
                        .interfaces_of(&self.add_ports_component)
                        .map(|set| {
                            set.editable_names()
                                .into_iter()
                                .map(str::to_string)
                                .collect()
                        })
                        .unwrap_or_default();
                    egui::ComboBox::from_label("Interface")
                        .selected_text(&self.add_ports_interface)
                        .show_ui(ui, |ui| {
                            for interface in interfaces {
                                ui.selectable_value(
                                    &mut self.add_ports_interface,
                                    interface.clone(),
                                    interface,
                                );
                            }
                        });

                    ui.horizontal(|ui| {
                        ui.label("Port name:");
                        ui.text_edit_singleline(&mut self.add_ports_name);
                    });
                    ui.horizontal(|ui| {
                        ui.label("Data type:");
                        ui.text_edit_singleline(&mut self.add_ports_type);
                    });

                    if ui.button("Add").clicked() {
                        command = Some(UiCommand::SubmitPorts);
                    }
                });
            self.show_add_ports_dialog = open;
        }

        match command {
            Some(UiCommand::Undo) => self.undo_last(),
            Some(UiCommand::Connect) => self.connect_selected(),
            Some(UiCommand::Disconnect) => self.disconnect_selected(),
            Some(UiCommand::Relayout) => self.layout_dirty = true,
            Some(UiCommand::ExportDot) => self.export_dot(),
            Some(UiCommand::SubmitPorts) => self.submit_add_ports(),
            None => {}
        }

        if self.layout_dirty {
            self.relayout();
            ctx.request_repaint();
        }
    }
}

fn draw_grid(painter: &egui::Painter, rect: egui::Rect, zoom: f32, pan: egui::Vec2) {
    let spacing = 40.0 * zoom;
    if spacing < 8.0 {
        return;
    }
    let color = egui::Color32::from_rgb(32, 36, 42);
    let stroke = egui::Stroke::new(1.0, color);

    let mut x = rect.left() + (pan.x % spacing);
    while x < rect.right() {
        painter.line_segment([egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())], stroke);
        x += spacing;
    }
    let mut y = rect.top() + (pan.y % spacing);
    while y < rect.bottom() {
        painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], stroke);
        y += spacing;
    }
}

fn draw_arrow_head(painter: &egui::Painter, points: &[egui::Pos2], zoom: f32, color: egui::Color32) {
    let [.., from, to] = points else {
        return;
    };
    let dir = (*to - *from).normalized();
    if !dir.x.is_finite() || !dir.y.is_finite() {
        return;
    }
    let perp = egui::vec2(-dir.y, dir.x);
    let size = 8.0 * zoom;
    let left = *to - dir * size + perp * size * 0.5;
    let right = *to - dir * size - perp * size * 0.5;
    painter.add(egui::Shape::convex_polygon(
        vec![*to, left, right],
        color,
        egui::Stroke::NONE,
    ));
}
