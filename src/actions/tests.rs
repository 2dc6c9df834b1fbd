//! Unit tests for the undoable edit framework

use super::*;
use crate::model::{InterfaceSpec, RemoteHandle, RuntimeId, SimulatedScope};
use std::cell::Cell;
use std::rc::Rc;

const CAMERA: &str = "/robot/camera/image";
const VISION: &str = "/robot/vision/image";
const BLOB_OUT: &str = "/robot/vision/blobs";
const BLOB_IN: &str = "/robot/control/blobs";
const VELOCITY_OUT: &str = "/robot/control/velocity";
const VELOCITY_IN: &str = "/base/velocity";

fn demo_scope() -> SimulatedScope {
    let mut scope = SimulatedScope::new();
    let rt0 = scope.add_runtime("localhost:4444");
    let rt1 = scope.add_runtime("sensorhead:4444");
    scope.add_group("/robot", rt0);
    scope.add_port(CAMERA, rt0, "Image", false);
    scope.add_port(VISION, rt0, "Image", false);
    scope.add_port(BLOB_OUT, rt0, "Blobs", false);
    scope.add_port(BLOB_IN, rt0, "Blobs", false);
    scope.add_port(VELOCITY_OUT, rt0, "Velocity", false);
    scope.add_port(VELOCITY_IN, rt1, "Velocity", true);
    scope
}

fn control_scope() -> SimulatedScope {
    let mut scope = SimulatedScope::new();
    let rt = scope.add_runtime("localhost:4444");
    scope.set_interfaces(
        "/robot/control",
        rt,
        InterfaceSet {
            interfaces: vec![
                InterfaceSpec {
                    name: "Sensor Input".to_string(),
                    editable: true,
                    ports: vec![PortSpec::new("pose", "Pose")],
                },
                InterfaceSpec {
                    name: "Data Output".to_string(),
                    editable: false,
                    ports: vec![PortSpec::new("status", "Status")],
                },
            ],
        },
    );
    scope
}

// ----------------------------------------------------------------------------
// Test-only operations with scripted behavior
// ----------------------------------------------------------------------------

enum Probe {
    Never,
    Fails(&'static str),
    Succeeds,
}

struct ScriptedOp {
    name: &'static str,
    fail_execute: bool,
    probe: Probe,
    undo_fails: bool,
}

impl ScriptedOp {
    fn succeeding(name: &'static str) -> Self {
        Self {
            name,
            fail_execute: false,
            probe: Probe::Succeeds,
            undo_fails: false,
        }
    }

    fn failing_execute(name: &'static str) -> Self {
        Self {
            fail_execute: true,
            ..Self::succeeding(name)
        }
    }

    fn failing_check(name: &'static str) -> Self {
        Self {
            probe: Probe::Fails("confirmed wrong"),
            ..Self::succeeding(name)
        }
    }

    fn never_resolving(name: &'static str) -> Self {
        Self {
            probe: Probe::Never,
            ..Self::succeeding(name)
        }
    }

    fn with_failing_undo(name: &'static str) -> Self {
        Self {
            undo_fails: true,
            ..Self::succeeding(name)
        }
    }
}

impl EditOp for ScriptedOp {
    fn execute(&mut self, _scope: &mut dyn RemoteScope) -> Result<(), EditError> {
        if self.fail_execute {
            Err(EditError::Remote(format!("{} refused", self.name)))
        } else {
            Ok(())
        }
    }

    fn check_success(&mut self, _scope: &mut dyn RemoteScope) -> Option<Result<(), EditError>> {
        match self.probe {
            Probe::Never => None,
            Probe::Fails(reason) => Some(Err(EditError::Remote(reason.to_string()))),
            Probe::Succeeds => Some(Ok(())),
        }
    }

    fn invert(&self) -> Box<dyn EditOp> {
        if self.undo_fails {
            Box::new(ScriptedOp::failing_execute("undo"))
        } else {
            Box::new(ScriptedOp::succeeding("undo"))
        }
    }

    fn description(&self) -> String {
        self.name.to_string()
    }
}

struct CountingOp {
    probes: Rc<Cell<usize>>,
    resolve_after: usize,
}

impl EditOp for CountingOp {
    fn execute(&mut self, _scope: &mut dyn RemoteScope) -> Result<(), EditError> {
        Ok(())
    }

    fn check_success(&mut self, _scope: &mut dyn RemoteScope) -> Option<Result<(), EditError>> {
        self.probes.set(self.probes.get() + 1);
        if self.probes.get() >= self.resolve_after {
            Some(Ok(()))
        } else {
            None
        }
    }

    fn invert(&self) -> Box<dyn EditOp> {
        unimplemented!("never inverted in tests")
    }

    fn description(&self) -> String {
        "counting".to_string()
    }
}

/// Forwards to a [`SimulatedScope`] while recording administrative calls, so
/// tests can assert which runtime was asked to do what, and in which order.
struct RecordingScope {
    inner: SimulatedScope,
    calls: Vec<String>,
}

impl RecordingScope {
    fn new(inner: SimulatedScope) -> Self {
        Self {
            inner,
            calls: Vec::new(),
        }
    }
}

impl RemoteScope for RecordingScope {
    fn resolve(&self, qualified_name: &str) -> Option<crate::model::RemoteElement> {
        self.inner.resolve(qualified_name)
    }

    fn connected(&self, a: &str, b: &str) -> bool {
        self.inner.connected(a, b)
    }

    fn may_connect(&self, source: &str, destination: &str, both: bool) -> Result<(), String> {
        self.inner.may_connect(source, destination, both)
    }

    fn interfaces_of(&self, component: &str) -> Option<InterfaceSet> {
        self.inner.interfaces_of(component)
    }

    fn runtime_address(&self, runtime: RuntimeId) -> Option<String> {
        self.inner.runtime_address(runtime)
    }

    fn elements(&self) -> Vec<crate::model::RemoteElement> {
        self.inner.elements()
    }

    fn connections(&self) -> Vec<(String, String)> {
        self.inner.connections()
    }

    fn connect(&mut self, rt: RuntimeId, a: RemoteHandle, b: RemoteHandle) -> Result<(), String> {
        self.calls.push(format!("connect rt{rt} {a} {b}"));
        self.inner.connect(rt, a, b)
    }

    fn disconnect(&mut self, rt: RuntimeId, a: RemoteHandle, b: RemoteHandle) -> Result<(), String> {
        self.calls.push(format!("disconnect rt{rt} {a} {b}"));
        self.inner.disconnect(rt, a, b)
    }

    fn network_connect(
        &mut self,
        rt: RuntimeId,
        local: RemoteHandle,
        target: &NetworkTarget,
        reverse: bool,
    ) -> Result<(), String> {
        self.calls
            .push(format!("network_connect rt{rt} local={local} uid={} reverse={reverse}", target.uid));
        self.inner.network_connect(rt, local, target, reverse)
    }

    fn get_annotation(&mut self, rt: RuntimeId, c: RemoteHandle) -> Result<Vec<u8>, String> {
        self.inner.get_annotation(rt, c)
    }

    fn set_annotation(&mut self, rt: RuntimeId, c: RemoteHandle, data: &[u8]) -> Result<(), String> {
        self.calls.push(format!("set_annotation rt{rt} {c}"));
        self.inner.set_annotation(rt, c, data)
    }

    fn dispatch_events(&mut self) -> usize {
        self.inner.dispatch_events()
    }
}

// ----------------------------------------------------------------------------
// Edit lifecycle
// ----------------------------------------------------------------------------

#[test]
#[should_panic(expected = "success was never confirmed")]
fn test_undo_before_execute_panics() {
    let edit = Edit::new(ConnectPorts::new(CAMERA, VISION));
    let _ = edit.undo_edit();
}

#[test]
#[should_panic(expected = "success was never confirmed")]
fn test_undo_after_failure_panics() {
    let mut scope = demo_scope();
    let mut edit = Edit::new(ConnectPorts::new("/missing", VISION));
    let _ = edit.execute_async(&mut scope);
    let _ = edit.undo_edit();
}

#[test]
fn test_execute_records_attempt() {
    let mut scope = demo_scope();
    let mut edit = Edit::new(ConnectPorts::new(CAMERA, VISION));
    assert!(!edit.has_executed());
    edit.execute_async(&mut scope).unwrap();
    assert!(edit.has_executed());
    assert!(edit.outcome().is_none());
}

#[test]
fn test_check_success_async_caches_once_resolved() {
    let probes = Rc::new(Cell::new(0));
    let mut scope = demo_scope();
    let mut edit = Edit::new(CountingOp {
        probes: Rc::clone(&probes),
        resolve_after: 3,
    });
    edit.execute_async(&mut scope).unwrap();

    assert!(edit.check_success_async(&mut scope).is_none());
    assert!(edit.check_success_async(&mut scope).is_none());
    assert_eq!(edit.check_success_async(&mut scope), Some(Ok(())));
    // Resolved: the cached result is returned without re-probing.
    for _ in 0..5 {
        assert_eq!(edit.check_success_async(&mut scope), Some(Ok(())));
    }
    assert_eq!(probes.get(), 3);
}

#[test]
fn test_check_success_times_out() {
    let mut scope = demo_scope();
    // The notification never arrives within the deadline.
    scope.set_latency(100_000);
    let mut edit = Edit::new(ConnectPorts::new(CAMERA, VISION));
    edit.execute_async(&mut scope).unwrap();
    let err = edit
        .check_success(&mut scope, Duration::from_millis(30))
        .unwrap_err();
    assert!(matches!(err, EditError::Timeout(_)));
    // The timeout is the cached final outcome of this attempt.
    assert_eq!(edit.check_success_async(&mut scope), Some(Err(err)));
}

#[test]
fn test_execute_blocks_until_effect_propagates() {
    let mut scope = demo_scope();
    scope.set_latency(3);
    let mut edit = Edit::new(ConnectPorts::new(CAMERA, VISION));
    edit.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    assert!(scope.connected(CAMERA, VISION));
}

#[test]
fn test_menu_description_truncates_long_paths() {
    let edit = Edit::new(ConnectPorts::new("/sim/robot/vision/pipeline/blobs", "/a/b"));
    let label = edit.menu_description();
    assert_eq!(label, "Connect .../vision/pipeline/blobs to a/b");
}

// ----------------------------------------------------------------------------
// Connect / disconnect
// ----------------------------------------------------------------------------

#[test]
fn test_connect_same_runtime() {
    let mut scope = demo_scope();
    let mut edit = Edit::new(ConnectPorts::new(CAMERA, VISION));
    edit.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    assert!(scope.connected(CAMERA, VISION));
}

#[test]
fn test_connect_round_trip_restores_connectivity() {
    let mut scope = demo_scope();
    let mut connect = Edit::new(ConnectPorts::new(CAMERA, VISION));
    connect.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    assert!(scope.connected(CAMERA, VISION));

    let mut disconnect = connect.undo_edit();
    assert!(disconnect.menu_description().starts_with("Disconnect"));
    disconnect.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    assert!(!scope.connected(CAMERA, VISION));

    let mut reconnect = disconnect.undo_edit();
    reconnect.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    assert!(scope.connected(CAMERA, VISION));
}

#[test]
fn test_connect_names_every_unresolvable_side() {
    let mut scope = demo_scope();
    let mut edit = Edit::new(ConnectPorts::new("/missing/a", "/missing/b"));
    let err = edit.execute_async(&mut scope).unwrap_err();
    match err {
        EditError::Resolution(message) => {
            assert!(message.contains("/missing/a"));
            assert!(message.contains("/missing/b"));
        }
        other => panic!("expected a resolution error, got {other:?}"),
    }
}

#[test]
fn test_connect_rejects_non_port_elements() {
    let mut scope = demo_scope();
    let mut edit = Edit::new(ConnectPorts::new("/robot", VISION));
    let err = edit.execute_async(&mut scope).unwrap_err();
    assert!(matches!(err, EditError::Resolution(ref m) if m.contains("not a port")));
}

#[test]
fn test_connect_policy_rejection_performs_no_mutation() {
    let mut scope = demo_scope();
    scope.veto(CAMERA, VISION, "loop forbidden");
    let mut edit = Edit::new(ConnectPorts::new(CAMERA, VISION));
    let err = edit.execute_async(&mut scope).unwrap_err();
    assert_eq!(err, EditError::PolicyRejected("loop forbidden".to_string()));
    assert_eq!(scope.pending_events(), 0);
}

#[test]
fn test_cross_runtime_connect_uses_shared_destination() {
    let mut scope = RecordingScope::new(demo_scope());
    let mut edit = Edit::new(ConnectPorts::new(VELOCITY_OUT, VELOCITY_IN));
    edit.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    assert!(scope.inner.connected(VELOCITY_OUT, VELOCITY_IN));
    // The network connect is issued from the non-shared source's runtime.
    assert_eq!(scope.calls.len(), 1);
    assert!(scope.calls[0].starts_with("network_connect rt0"));
    assert!(scope.calls[0].contains(&format!("uid={VELOCITY_IN}")));
}

#[test]
fn test_cross_runtime_connect_prefers_destination_side() {
    let mut inner = demo_scope();
    // Both sides shared: the destination's side must be tried first.
    inner.remove(VELOCITY_OUT);
    inner.add_port(VELOCITY_OUT, 0, "Velocity", true);
    let mut scope = RecordingScope::new(inner);
    let mut edit = Edit::new(ConnectPorts::new(VELOCITY_OUT, VELOCITY_IN));
    edit.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    assert!(scope.calls[0].contains(&format!("uid={VELOCITY_IN}")));
}

#[test]
fn test_cross_runtime_connect_falls_back_to_shared_source() {
    let mut scope = RecordingScope::new(demo_scope());
    // Reverse direction: only the source side is shared.
    let mut edit = Edit::new(ConnectPorts::new(VELOCITY_IN, VELOCITY_OUT));
    edit.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    assert!(scope.inner.connected(VELOCITY_OUT, VELOCITY_IN));
    assert!(scope.calls[0].contains(&format!("uid={VELOCITY_IN}")));
    assert!(scope.calls[0].contains("reverse=true"));
}

#[test]
fn test_cross_runtime_connect_requires_a_shared_side() {
    let mut scope = SimulatedScope::new();
    let rt0 = scope.add_runtime("localhost:4444");
    let rt1 = scope.add_runtime("sensorhead:4444");
    scope.add_port("/a", rt0, "Velocity", false);
    scope.add_port("/b", rt1, "Velocity", false);
    let mut edit = Edit::new(ConnectPorts::new("/a", "/b"));
    let err = edit.execute_async(&mut scope).unwrap_err();
    assert!(matches!(err, EditError::PolicyRejected(ref m) if m.contains("shared")));
}

#[test]
fn test_disconnect_vacuous_success_when_endpoint_vanished() {
    let mut scope = demo_scope();
    let mut connect = Edit::new(ConnectPorts::new(CAMERA, VISION));
    connect.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();

    scope.remove(VISION);
    let mut disconnect = Edit::new(DisconnectPorts::new(CAMERA, VISION));
    // Nothing left to disconnect: vacuously successful, not an error.
    assert_eq!(
        disconnect.check_success_async(&mut scope),
        Some(Ok(()))
    );
}

#[test]
fn test_connect_check_fails_when_port_vanishes() {
    let mut scope = demo_scope();
    let mut edit = Edit::new(ConnectPorts::new(CAMERA, VISION));
    edit.execute_async(&mut scope).unwrap();
    scope.remove(VISION);
    match edit.check_success_async(&mut scope) {
        Some(Err(EditError::Resolution(m))) => assert!(m.contains(VISION)),
        other => panic!("expected a resolution failure, got {other:?}"),
    }
}

// ----------------------------------------------------------------------------
// Interface edits
// ----------------------------------------------------------------------------

#[test]
fn test_add_ports_requires_editable_interface() {
    let mut scope = SimulatedScope::new();
    let rt = scope.add_runtime("localhost:4444");
    scope.set_interfaces(
        "/robot/sink",
        rt,
        InterfaceSet {
            interfaces: vec![InterfaceSpec {
                name: "Data Output".to_string(),
                editable: false,
                ports: Vec::new(),
            }],
        },
    );
    assert!(matches!(
        AddInterfacePorts::new(&scope, "/robot/sink"),
        Err(EditError::PolicyRejected(_))
    ));
    assert!(matches!(
        AddInterfacePorts::new(&scope, "/missing"),
        Err(EditError::Resolution(_))
    ));
}

#[test]
fn test_add_ports_rejects_unknown_interface() {
    let scope = control_scope();
    let mut op = AddInterfacePorts::new(&scope, "/robot/control").unwrap();
    assert!(op.ports_to_add("Sensor Input").is_ok());
    assert!(matches!(
        op.ports_to_add("Data Output"),
        Err(EditError::Resolution(_))
    ));
    assert!(matches!(
        op.ports_to_add("No Such Interface"),
        Err(EditError::Resolution(_))
    ));
}

#[test]
fn test_add_ports_applies_and_materializes() {
    let mut scope = control_scope();
    let mut op = AddInterfacePorts::new(&scope, "/robot/control").unwrap();
    let ports = op.ports_to_add("Sensor Input").unwrap();
    ports.push(PortSpec::new("lidar", "PointCloud"));
    ports.push(PortSpec::new("imu", "Orientation"));

    let mut edit = Edit::new(op);
    edit.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();

    let set = scope.interfaces_of("/robot/control").unwrap();
    let interface = set.interface("Sensor Input").unwrap();
    assert!(interface.ports.iter().any(|p| p.name == "lidar"));
    assert!(interface.ports.iter().any(|p| p.name == "imu"));
    assert!(scope.resolve("/robot/control/Sensor Input/lidar").is_some());
}

#[test]
fn test_add_ports_duplicate_name_commits_nothing() {
    let mut scope = control_scope();
    let mut op = AddInterfacePorts::new(&scope, "/robot/control").unwrap();
    let ports = op.ports_to_add("Sensor Input").unwrap();
    ports.push(PortSpec::new("lidar", "PointCloud"));
    // `pose` already exists in the interface.
    ports.push(PortSpec::new("pose", "Pose"));

    let mut edit = Edit::new(op);
    let err = edit.execute_async(&mut scope).unwrap_err();
    assert!(matches!(err, EditError::PolicyRejected(ref m) if m.contains("pose")));
    // The working copy is discarded; no annotation write happened.
    assert_eq!(scope.pending_events(), 0);
    let set = scope.interfaces_of("/robot/control").unwrap();
    assert!(!set.interface("Sensor Input").unwrap().ports.iter().any(|p| p.name == "lidar"));
}

#[test]
fn test_add_ports_nothing_queued_is_a_noop_success() {
    let mut scope = control_scope();
    let op = AddInterfacePorts::new(&scope, "/robot/control").unwrap();
    let mut edit = Edit::new(op);
    edit.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    assert_eq!(scope.pending_events(), 0);
}

#[test]
fn test_add_ports_undo_restores_snapshot() {
    let mut scope = control_scope();
    let mut op = AddInterfacePorts::new(&scope, "/robot/control").unwrap();
    op.ports_to_add("Sensor Input")
        .unwrap()
        .push(PortSpec::new("lidar", "PointCloud"));
    let mut edit = Edit::new(op);
    edit.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    assert!(scope.resolve("/robot/control/Sensor Input/lidar").is_some());

    let mut undo = edit.undo_edit();
    undo.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    scope.dispatch_events();
    assert!(scope.resolve("/robot/control/Sensor Input/lidar").is_none());
    // The original port survived the round trip.
    assert!(scope
        .interfaces_of("/robot/control")
        .unwrap()
        .interface("Sensor Input")
        .unwrap()
        .ports
        .iter()
        .any(|p| p.name == "pose"));

    // The restore is itself invertible: redo brings the port back.
    let mut redo = undo.undo_edit();
    redo.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();
    scope.dispatch_events();
    assert!(scope.resolve("/robot/control/Sensor Input/lidar").is_some());
}

// ----------------------------------------------------------------------------
// Edit sequences
// ----------------------------------------------------------------------------

#[test]
fn test_sequence_failure_leaves_exact_executed_prefix() {
    let mut scope = demo_scope();
    let mut seq = EditSequence::new("Wire up vision");
    seq.push(Edit::new(ConnectPorts::new(CAMERA, VISION)));
    seq.push(Edit::new(ConnectPorts::new(BLOB_OUT, BLOB_IN)));
    seq.push(Edit::new(ConnectPorts::new("/missing", "/also/missing")));

    let err = EditOp::execute(&mut seq, &mut scope).unwrap_err();
    assert!(matches!(err, EditError::Resolution(_)));
    assert_eq!(seq.executed(), &[0, 1]);
    // Rollback undid the executed prefix.
    assert!(!scope.connected(CAMERA, VISION));
    assert!(!scope.connected(BLOB_OUT, BLOB_IN));
}

#[test]
fn test_sequence_without_rollback_keeps_applied_steps() {
    let mut scope = demo_scope();
    let mut seq = EditSequence::new("Wire up vision").without_rollback();
    seq.push(Edit::new(ConnectPorts::new(CAMERA, VISION)));
    seq.push(Edit::new(ConnectPorts::new("/missing", "/also/missing")));

    assert!(EditOp::execute(&mut seq, &mut scope).is_err());
    assert_eq!(seq.executed(), &[0]);
    while scope.dispatch_events() > 0 {}
    assert!(scope.connected(CAMERA, VISION));
}

#[test]
fn test_sequence_checkpoint_aborts_on_confirmed_failure() {
    let mut scope = demo_scope();
    let mut seq = EditSequence::new("Deploy pipeline");
    seq.push(Edit::new(ConnectPorts::new(CAMERA, VISION)));
    seq.push(Edit::new(ScriptedOp::failing_check("calibration")));
    seq.push_checkpoint();
    seq.push(Edit::new(ConnectPorts::new(BLOB_OUT, BLOB_IN)));

    let err = EditOp::execute(&mut seq, &mut scope).unwrap_err();
    assert!(matches!(err, EditError::Sequence(ref m) if m.contains("confirmed wrong")));
    assert_eq!(seq.executed(), &[0, 1]);
    // The step after the checkpoint never ran; the prefix was rolled back.
    assert!(!scope.connected(CAMERA, VISION));
    assert!(!scope.connected(BLOB_OUT, BLOB_IN));
}

#[test]
fn test_sequence_undetermined_wins_over_partial_failure() {
    let mut scope = demo_scope();
    let mut seq = EditSequence::new("Atomic status").without_rollback();
    seq.push(Edit::new(ScriptedOp::failing_check("step one")));
    seq.push(Edit::new(ScriptedOp::never_resolving("step two")));
    EditOp::execute(&mut seq, &mut scope).unwrap();
    // One step has already failed, but while another is undetermined the
    // aggregate stays undetermined.
    assert!(EditOp::check_success(&mut seq, &mut scope).is_none());
}

#[test]
fn test_sequence_aggregates_failures_once_all_resolved() {
    let mut scope = demo_scope();
    let mut seq = EditSequence::new("Status").without_rollback();
    seq.push(Edit::new(ScriptedOp::failing_check("step one")));
    seq.push(Edit::new(ScriptedOp::succeeding("step two")));
    EditOp::execute(&mut seq, &mut scope).unwrap();
    match EditOp::check_success(&mut seq, &mut scope) {
        Some(Err(EditError::Sequence(message))) => {
            assert!(message.contains("1 of 2"));
            assert!(message.contains("confirmed wrong"));
        }
        other => panic!("expected an aggregated failure, got {other:?}"),
    }
}

#[test]
fn test_sequence_undo_runs_in_reverse_order() {
    let mut scope = RecordingScope::new(demo_scope());
    let mut seq = EditSequence::new("Wire both");
    seq.push(Edit::new(ConnectPorts::new(CAMERA, VISION)));
    seq.push(Edit::new(ConnectPorts::new(BLOB_OUT, BLOB_IN)));
    let mut edit = Edit::new(seq);
    edit.execute(&mut scope, DEFAULT_TIMEOUT).unwrap();

    let mut undo = edit.undo_edit();
    undo.execute(&mut scope, 2 * DEFAULT_TIMEOUT).unwrap();
    assert!(!scope.inner.connected(CAMERA, VISION));
    assert!(!scope.inner.connected(BLOB_OUT, BLOB_IN));

    let disconnects: Vec<&String> = scope
        .calls
        .iter()
        .filter(|c| c.starts_with("disconnect"))
        .collect();
    assert_eq!(disconnects.len(), 2);
    // The second connection is undone first.
    let blob_handles = (
        scope.inner.resolve(BLOB_OUT).unwrap().handle,
        scope.inner.resolve(BLOB_IN).unwrap().handle,
    );
    assert!(disconnects[0].contains(&format!("{} {}", blob_handles.0, blob_handles.1)));
}

#[test]
fn test_sequence_rollback_failure_keeps_root_cause() {
    let mut scope = demo_scope();
    let mut seq = EditSequence::new("Risky");
    seq.push(Edit::new(ScriptedOp::with_failing_undo("step one")));
    seq.push(Edit::new(ScriptedOp::failing_execute("step two")));

    let err = EditOp::execute(&mut seq, &mut scope).unwrap_err();
    match err {
        EditError::RollbackWarning { source, warning } => {
            assert!(matches!(*source, EditError::Remote(ref m) if m.contains("step two")));
            assert!(warning.contains("undo"));
        }
        other => panic!("expected a rollback warning, got {other:?}"),
    }
}
