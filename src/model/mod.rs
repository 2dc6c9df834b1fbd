//! Remote Component Model
//! Qualified-name view of a running runtime's framework elements, the
//! administrative interface used to mutate them, and a simulated in-process
//! scope used by the desktop shell's demo mode and the test suite.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};


/// Identifier of a remote runtime environment.
pub type RuntimeId = usize;

/// Handle of a framework element inside its runtime.
pub type RemoteHandle = usize;

/// Port-specific data of a resolved element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    /// Globally unique id, used to address the port in network-connect calls.
    pub uid: String,
    pub data_type: String,
    /// Whether the port is reachable from other runtimes.
    pub shared: bool,
}

/// Classification of a framework element, resolved once at lookup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Port(PortInfo),
    Group,
    Interface,
    Other,
}

impl ElementKind {
    pub fn as_port(&self) -> Option<&PortInfo> {
        match self {
            ElementKind::Port(info) => Some(info),
            _ => None,
        }
    }
}

/// A resolved framework element. Resolution results must not be cached across
/// edits; qualified names are re-resolved at execute and check time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteElement {
    pub qualified_name: String,
    pub handle: RemoteHandle,
    pub runtime: RuntimeId,
    pub kind: ElementKind,
}

// ============================================================================
// INTERFACE ANNOTATION DATA MODEL
// ============================================================================

/// Specification of one port inside an editable interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub create_options: Vec<String>,
}

impl PortSpec {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            create_options: Vec::new(),
        }
    }
}

/// A named, ordered collection of port specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSpec {
    pub name: String,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub ports: Vec<PortSpec>,
}

/// A component's full interface description, read and written atomically as a
/// whole through the annotation calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSet {
    pub interfaces: Vec<InterfaceSpec>,
}

impl InterfaceSet {
    pub fn interface(&self, name: &str) -> Option<&InterfaceSpec> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub fn interface_mut(&mut self, name: &str) -> Option<&mut InterfaceSpec> {
        self.interfaces.iter_mut().find(|i| i.name == name)
    }

    pub fn editable_names(&self) -> Vec<&str> {
        self.interfaces
            .iter()
            .filter(|i| i.editable)
            .map(|i| i.name.as_str())
            .collect()
    }
}

/// Parameters of a network-connect call, built from a resolved shared port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTarget {
    pub address: String,
    pub runtime: RuntimeId,
    pub handle: RemoteHandle,
    pub uid: String,
}

// ============================================================================
// SCOPE TRAIT
// ============================================================================

/// Live view of the remote component model plus the administrative interface
/// of every reachable runtime.
///
/// Every edit action receives a scope instead of reaching for global model
/// state, which keeps the actions testable against [`SimulatedScope`].
///
/// Administrative calls are atomic and individually consistent on the remote
/// side, but their effect only becomes visible to the model queries once the
/// corresponding change notification has been delivered by
/// [`dispatch_events`](RemoteScope::dispatch_events). Blocking waits are
/// implemented by pumping that method, never by suspending the thread that
/// notifications are delivered on.
pub trait RemoteScope {
    // --- model queries ---

    fn resolve(&self, qualified_name: &str) -> Option<RemoteElement>;

    /// Whether two ports are currently observed as connected.
    fn connected(&self, a: &str, b: &str) -> bool;

    /// Connection-policy check: `Ok` if the ports may be connected directly,
    /// otherwise the rejection reason.
    fn may_connect(
        &self,
        source: &str,
        destination: &str,
        both_directions: bool,
    ) -> Result<(), String>;

    /// The component's currently visible interface description.
    fn interfaces_of(&self, component: &str) -> Option<InterfaceSet>;

    /// Host address of a runtime, for network-connect calls.
    fn runtime_address(&self, runtime: RuntimeId) -> Option<String>;

    /// All currently known elements (for browsing views).
    fn elements(&self) -> Vec<RemoteElement>;

    /// All currently visible port connections, as qualified-name pairs.
    fn connections(&self) -> Vec<(String, String)>;

    // --- administrative interface ---

    fn connect(
        &mut self,
        runtime: RuntimeId,
        a: RemoteHandle,
        b: RemoteHandle,
    ) -> Result<(), String>;

    fn disconnect(
        &mut self,
        runtime: RuntimeId,
        a: RemoteHandle,
        b: RemoteHandle,
    ) -> Result<(), String>;

    /// Connect a local port to a shared port in another runtime. `reverse`
    /// marks the local port as the destination of the resulting edge.
    fn network_connect(
        &mut self,
        runtime: RuntimeId,
        local: RemoteHandle,
        target: &NetworkTarget,
        reverse: bool,
    ) -> Result<(), String>;

    /// Read a component's interface annotation as an opaque blob.
    fn get_annotation(
        &mut self,
        runtime: RuntimeId,
        component: RemoteHandle,
    ) -> Result<Vec<u8>, String>;

    /// Replace a component's interface annotation in one atomic write.
    fn set_annotation(
        &mut self,
        runtime: RuntimeId,
        component: RemoteHandle,
        data: &[u8],
    ) -> Result<(), String>;

    // --- event pump ---

    /// Deliver pending change notifications on the calling thread. Returns
    /// the number of notifications applied.
    fn dispatch_events(&mut self) -> usize;
}

// ============================================================================
// SIMULATED SCOPE
// ============================================================================

struct SimElement {
    handle: RemoteHandle,
    runtime: RuntimeId,
    kind: ElementKind,
}

enum SimEvent {
    Connected(String, String),
    Disconnected(String, String),
    InterfacesChanged { component: String, set: InterfaceSet },
}

struct QueuedEvent {
    event: SimEvent,
    /// Remaining dispatch rounds before the event becomes visible.
    ready_in: usize,
}

/// In-process implementation of [`RemoteScope`].
///
/// Administrative calls commit on the simulated runtime immediately but only
/// become visible to the model queries after the matching notification has
/// been dispatched; [`set_latency`](SimulatedScope::set_latency) controls how
/// many dispatch rounds that takes. This mirrors the eventual consistency of
/// a real runtime closely enough to exercise the edit actions' polling.
#[derive(Default)]
pub struct SimulatedScope {
    runtimes: Vec<String>,
    elements: HashMap<String, SimElement>,
    by_handle: HashMap<RemoteHandle, String>,
    connections: HashSet<(String, String)>,
    interfaces: HashMap<String, InterfaceSet>,
    annotations: HashMap<String, Vec<u8>>,
    pending: VecDeque<QueuedEvent>,
    vetoes: Vec<(String, String, String)>,
    latency: usize,
    next_handle: RemoteHandle,
}

fn ordered(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl SimulatedScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dispatch rounds before an administrative change becomes
    /// visible to the model queries.
    pub fn set_latency(&mut self, rounds: usize) {
        self.latency = rounds;
    }

    pub fn add_runtime(&mut self, address: impl Into<String>) -> RuntimeId {
        self.runtimes.push(address.into());
        self.runtimes.len() - 1
    }

    fn add_element(&mut self, path: &str, runtime: RuntimeId, kind: ElementKind) -> RemoteHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.elements.insert(
            path.to_string(),
            SimElement {
                handle,
                runtime,
                kind,
            },
        );
        self.by_handle.insert(handle, path.to_string());
        handle
    }

    pub fn add_group(&mut self, path: &str, runtime: RuntimeId) -> RemoteHandle {
        self.add_element(path, runtime, ElementKind::Group)
    }

    pub fn add_port(
        &mut self,
        path: &str,
        runtime: RuntimeId,
        data_type: &str,
        shared: bool,
    ) -> RemoteHandle {
        self.add_element(
            path,
            runtime,
            ElementKind::Port(PortInfo {
                uid: path.to_string(),
                data_type: data_type.to_string(),
                shared,
            }),
        )
    }

    /// Install a component's interface description, materializing the
    /// described interfaces and ports as child elements.
    pub fn set_interfaces(&mut self, component: &str, runtime: RuntimeId, set: InterfaceSet) {
        if !self.elements.contains_key(component) {
            self.add_element(component, runtime, ElementKind::Group);
        }
        self.annotations.insert(
            component.to_string(),
            serde_json::to_vec(&set).expect("interface set serializes"),
        );
        self.apply_interfaces(component, set);
    }

    /// Make the policy check reject a specific pair with the given reason.
    pub fn veto(&mut self, a: &str, b: &str, reason: &str) {
        self.vetoes
            .push((a.to_string(), b.to_string(), reason.to_string()));
    }

    /// Remove an element from the visible model, dropping its connections.
    pub fn remove(&mut self, path: &str) {
        if let Some(element) = self.elements.remove(path) {
            self.by_handle.remove(&element.handle);
        }
        self.connections.retain(|(a, b)| a != path && b != path);
        self.interfaces.remove(path);
    }

    /// Number of administrative changes not yet visible to model queries.
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    fn queue(&mut self, event: SimEvent) {
        self.pending.push_back(QueuedEvent {
            event,
            ready_in: self.latency,
        });
    }

    fn element_name(&self, runtime: RuntimeId, handle: RemoteHandle) -> Result<String, String> {
        let name = self
            .by_handle
            .get(&handle)
            .ok_or_else(|| format!("runtime {runtime} knows no element with handle {handle}"))?;
        Ok(name.clone())
    }

    fn apply_interfaces(&mut self, component: &str, set: InterfaceSet) {
        let Some(runtime) = self.elements.get(component).map(|e| e.runtime) else {
            return;
        };

        // Reconcile child elements with the new description: create what is
        // missing, drop interface-managed elements that are gone. Children of
        // the component that no interface manages are left untouched.
        let mut expected: HashSet<String> = HashSet::new();
        for iface in &set.interfaces {
            let iface_path = format!("{component}/{}", iface.name);
            expected.insert(iface_path.clone());
            if !self.elements.contains_key(&iface_path) {
                self.add_element(&iface_path, runtime, ElementKind::Interface);
            }
            for port in &iface.ports {
                let port_path = format!("{iface_path}/{}", port.name);
                expected.insert(port_path.clone());
                if !self.elements.contains_key(&port_path) {
                    self.add_element(
                        &port_path,
                        runtime,
                        ElementKind::Port(PortInfo {
                            uid: port_path.clone(),
                            data_type: port.data_type.clone(),
                            shared: false,
                        }),
                    );
                }
            }
        }

        if let Some(previous) = self.interfaces.get(component).cloned() {
            for iface in &previous.interfaces {
                let iface_path = format!("{component}/{}", iface.name);
                let prefix = format!("{iface_path}/");
                let stale: Vec<String> = self
                    .elements
                    .keys()
                    .filter(|path| {
                        (**path == iface_path || path.starts_with(&prefix))
                            && !expected.contains(*path)
                    })
                    .cloned()
                    .collect();
                for path in stale {
                    self.remove(&path);
                }
            }
        }

        self.interfaces.insert(component.to_string(), set);
    }

    fn apply(&mut self, event: SimEvent) {
        match event {
            SimEvent::Connected(a, b) => {
                if self.elements.contains_key(&a) && self.elements.contains_key(&b) {
                    self.connections.insert(ordered(&a, &b));
                }
            }
            SimEvent::Disconnected(a, b) => {
                self.connections.remove(&ordered(&a, &b));
            }
            SimEvent::InterfacesChanged { component, set } => {
                self.apply_interfaces(&component, set);
            }
        }
    }
}

impl RemoteScope for SimulatedScope {
    fn resolve(&self, qualified_name: &str) -> Option<RemoteElement> {
        self.elements.get(qualified_name).map(|e| RemoteElement {
            qualified_name: qualified_name.to_string(),
            handle: e.handle,
            runtime: e.runtime,
            kind: e.kind.clone(),
        })
    }

    fn connected(&self, a: &str, b: &str) -> bool {
        self.connections.contains(&ordered(a, b))
    }

    fn may_connect(
        &self,
        source: &str,
        destination: &str,
        _both_directions: bool,
    ) -> Result<(), String> {
        for (a, b, reason) in &self.vetoes {
            if (a == source && b == destination) || (a == destination && b == source) {
                return Err(reason.clone());
            }
        }
        let src = self
            .elements
            .get(source)
            .and_then(|e| e.kind.as_port())
            .ok_or_else(|| format!("`{source}` is not a connectable port"))?;
        let dst = self
            .elements
            .get(destination)
            .and_then(|e| e.kind.as_port())
            .ok_or_else(|| format!("`{destination}` is not a connectable port"))?;
        if src.data_type != dst.data_type {
            return Err(format!(
                "data types do not match: `{}` vs `{}`",
                src.data_type, dst.data_type
            ));
        }
        Ok(())
    }

    fn interfaces_of(&self, component: &str) -> Option<InterfaceSet> {
        self.interfaces.get(component).cloned()
    }

    fn runtime_address(&self, runtime: RuntimeId) -> Option<String> {
        self.runtimes.get(runtime).cloned()
    }

    fn elements(&self) -> Vec<RemoteElement> {
        let mut all: Vec<RemoteElement> = self
            .elements
            .iter()
            .map(|(path, e)| RemoteElement {
                qualified_name: path.clone(),
                handle: e.handle,
                runtime: e.runtime,
                kind: e.kind.clone(),
            })
            .collect();
        all.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
        all
    }

    fn connections(&self) -> Vec<(String, String)> {
        let mut all: Vec<(String, String)> = self.connections.iter().cloned().collect();
        all.sort();
        all
    }

    fn connect(
        &mut self,
        runtime: RuntimeId,
        a: RemoteHandle,
        b: RemoteHandle,
    ) -> Result<(), String> {
        let a = self.element_name(runtime, a)?;
        let b = self.element_name(runtime, b)?;
        self.queue(SimEvent::Connected(a, b));
        Ok(())
    }

    fn disconnect(
        &mut self,
        runtime: RuntimeId,
        a: RemoteHandle,
        b: RemoteHandle,
    ) -> Result<(), String> {
        let a = self.element_name(runtime, a)?;
        let b = self.element_name(runtime, b)?;
        self.queue(SimEvent::Disconnected(a, b));
        Ok(())
    }

    fn network_connect(
        &mut self,
        runtime: RuntimeId,
        local: RemoteHandle,
        target: &NetworkTarget,
        _reverse: bool,
    ) -> Result<(), String> {
        let local = self.element_name(runtime, local)?;
        let remote = self
            .elements
            .iter()
            .find(|(_, e)| {
                e.kind
                    .as_port()
                    .map(|p| p.uid == target.uid && p.shared)
                    .unwrap_or(false)
            })
            .map(|(path, _)| path.clone())
            .ok_or_else(|| format!("no shared port with uid `{}` at {}", target.uid, target.address))?;
        self.queue(SimEvent::Connected(local, remote));
        Ok(())
    }

    fn get_annotation(
        &mut self,
        runtime: RuntimeId,
        component: RemoteHandle,
    ) -> Result<Vec<u8>, String> {
        let name = self.element_name(runtime, component)?;
        self.annotations
            .get(&name)
            .cloned()
            .ok_or_else(|| format!("`{name}` carries no interface annotation"))
    }

    fn set_annotation(
        &mut self,
        runtime: RuntimeId,
        component: RemoteHandle,
        data: &[u8],
    ) -> Result<(), String> {
        let name = self.element_name(runtime, component)?;
        let set: InterfaceSet = serde_json::from_slice(data)
            .map_err(|e| format!("malformed interface annotation: {e}"))?;
        self.annotations.insert(name.clone(), data.to_vec());
        self.queue(SimEvent::InterfacesChanged {
            component: name,
            set,
        });
        Ok(())
    }

    fn dispatch_events(&mut self) -> usize {
        let mut ready = Vec::new();
        for queued in &mut self.pending {
            if queued.ready_in == 0 {
                continue;
            }
            queued.ready_in -= 1;
        }
        let mut remaining = VecDeque::new();
        while let Some(queued) = self.pending.pop_front() {
            if queued.ready_in == 0 {
                ready.push(queued.event);
            } else {
                remaining.push_back(queued);
            }
        }
        self.pending = remaining;
        let applied = ready.len();
        for event in ready {
            self.apply(event);
        }
        applied
    }
}
