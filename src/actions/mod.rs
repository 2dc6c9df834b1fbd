//! Undoable Remote Edits
//! Execute/verify/undo state machine for structural edits applied through a
//! runtime's administrative interface. Edits are asynchronous: the remote
//! system is eventually consistent, so success is confirmed by polling the
//! model until it reflects the intended effect or a timeout expires.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::model::{
    InterfaceSet, NetworkTarget, PortInfo, PortSpec, RemoteElement, RemoteScope,
};

#[cfg(test)]
mod tests;

/// Default deadline for confirming an edit.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Interval between success probes while blocking.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Why an edit failed. Callers handle the kinds differently: a policy
/// rejection will fail again if retried verbatim, a timeout may not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A referenced remote entity no longer exists or is of the wrong kind.
    #[error("{0}")]
    Resolution(String),
    /// The edit is well-formed but disallowed by domain rules.
    #[error("{0}")]
    PolicyRejected(String),
    /// The administrative interface reported a failure.
    #[error("{0}")]
    Remote(String),
    /// Polling exceeded its deadline without a determined outcome.
    #[error("{0}: timed out waiting for the runtime; its logs may explain the discrepancy")]
    Timeout(String),
    /// Aggregated failure of a composite edit.
    #[error("{0}")]
    Sequence(String),
    /// The edit failed and rolling back the already-applied steps failed too.
    /// The root failure is never hidden by the rollback failure.
    #[error("{source} (rollback failed: {warning})")]
    RollbackWarning {
        source: Box<EditError>,
        warning: String,
    },
}

/// Operation-specific hooks of an edit. Implementations mutate remote state
/// in [`execute`](EditOp::execute) and report, without blocking, whether the
/// model reflects the effect yet in [`check_success`](EditOp::check_success):
/// `None` while the outcome is still undeterminable.
pub trait EditOp {
    /// Issue the remote mutation calls for this edit.
    fn execute(&mut self, scope: &mut dyn RemoteScope) -> Result<(), EditError>;

    /// Probe the model once. `Some(Ok(()))` when the intended effect is
    /// observable, `Some(Err(_))` when it is confirmed impossible or wrong,
    /// `None` while it may still be propagating.
    fn check_success(&mut self, scope: &mut dyn RemoteScope) -> Option<Result<(), EditError>>;

    /// Build the inverse operation. Only called once this edit's success has
    /// been confirmed.
    fn invert(&self) -> Box<dyn EditOp>;

    /// Short human-readable label for the edit menu.
    fn description(&self) -> String;

    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }
}

// ============================================================================
// EDIT LIFECYCLE
// ============================================================================

/// A single undoable remote edit: an [`EditOp`] plus its lifecycle state.
///
/// Lifecycle: unexecuted, then pending after [`execute_async`](Edit::execute_async),
/// then resolved to success or failure by the check calls. The resolved
/// outcome is cached; further checks never re-probe.
pub struct Edit {
    op: Box<dyn EditOp>,
    outcome: Option<Result<(), EditError>>,
    executed_at: Option<Instant>,
}

impl Edit {
    pub fn new(op: impl EditOp + 'static) -> Self {
        Self::from_boxed(Box::new(op))
    }

    pub fn from_boxed(op: Box<dyn EditOp>) -> Self {
        Self {
            op,
            outcome: None,
            executed_at: None,
        }
    }

    pub fn has_executed(&self) -> bool {
        self.executed_at.is_some()
    }

    /// The cached result, if the edit has resolved.
    pub fn outcome(&self) -> Option<&Result<(), EditError>> {
        self.outcome.as_ref()
    }

    pub fn menu_description(&self) -> String {
        self.op.description()
    }

    pub fn default_timeout(&self) -> Duration {
        self.op.timeout()
    }

    /// Start a new attempt: reset the result state, record the timestamp and
    /// issue the remote mutation. A synchronous failure resolves the edit
    /// immediately and is returned to the caller.
    pub fn execute_async(&mut self, scope: &mut dyn RemoteScope) -> Result<(), EditError> {
        self.outcome = None;
        self.executed_at = Some(Instant::now());
        log::debug!("executing edit: {}", self.op.description());
        match self.op.execute(scope) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.outcome = Some(Err(e.clone()));
                Err(e)
            }
        }
    }

    /// Non-blocking success check. Once a result is known it is cached and
    /// returned without re-probing.
    pub fn check_success_async(
        &mut self,
        scope: &mut dyn RemoteScope,
    ) -> Option<Result<(), EditError>> {
        if self.outcome.is_none() {
            self.outcome = self.op.check_success(scope);
        }
        self.outcome.clone()
    }

    /// Blocking success check. Probes every few milliseconds until the edit
    /// resolves or `timeout` elapses, pumping the scope's event dispatch in
    /// between so that the very notifications the probe depends on can
    /// arrive; an OS-level wait would starve them.
    pub fn check_success(
        &mut self,
        scope: &mut dyn RemoteScope,
        timeout: Duration,
    ) -> Result<(), EditError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(result) = self.check_success_async(scope) {
                return result;
            }
            if Instant::now() >= deadline {
                let error = EditError::Timeout(self.op.description());
                self.outcome = Some(Err(error.clone()));
                return Err(error);
            }
            if scope.dispatch_events() == 0 {
                std::thread::sleep(POLL_INTERVAL);
            }
        }
    }

    /// Execute and block until the outcome is confirmed.
    pub fn execute(
        &mut self,
        scope: &mut dyn RemoteScope,
        timeout: Duration,
    ) -> Result<(), EditError> {
        self.execute_async(scope)?;
        self.check_success(scope, timeout)
    }

    /// Derive the edit that reverses this one.
    ///
    /// # Panics
    ///
    /// Panics unless the edit has executed and its success has been
    /// confirmed; calling it earlier is a programming error, not a
    /// recoverable condition.
    pub fn undo_edit(&self) -> Edit {
        assert!(
            matches!(self.outcome, Some(Ok(()))),
            "undo requested for an edit whose success was never confirmed: {}",
            self.op.description()
        );
        Edit::from_boxed(self.op.invert())
    }
}

/// Shorten a qualified path to its last three components for menu labels.
fn short_name(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    if parts.len() <= 3 {
        parts.join("/")
    } else {
        format!(".../{}", parts[parts.len() - 3..].join("/"))
    }
}

// ============================================================================
// PORT CONNECTION EDITS
// ============================================================================

/// Resolve both endpoints of a connection edit, naming every side that could
/// not be resolved or is not a port.
fn resolve_ports(
    scope: &dyn RemoteScope,
    source: &str,
    destination: &str,
) -> Result<(RemoteElement, RemoteElement), EditError> {
    let src = scope.resolve(source);
    let dst = scope.resolve(destination);
    let missing: Vec<&str> = [(source, &src), (destination, &dst)]
        .iter()
        .filter(|(_, e)| e.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(EditError::Resolution(format!(
            "cannot resolve {}",
            missing
                .iter()
                .map(|n| format!("`{n}`"))
                .collect::<Vec<_>>()
                .join(" and ")
        )));
    }
    let (src, dst) = (src.expect("checked above"), dst.expect("checked above"));
    for element in [&src, &dst] {
        if element.kind.as_port().is_none() {
            return Err(EditError::Resolution(format!(
                "`{}` is not a port",
                element.qualified_name
            )));
        }
    }
    Ok((src, dst))
}

fn network_target(
    scope: &dyn RemoteScope,
    element: &RemoteElement,
    port: &PortInfo,
) -> Result<NetworkTarget, EditError> {
    let address = scope.runtime_address(element.runtime).ok_or_else(|| {
        EditError::Resolution(format!(
            "the runtime owning `{}` is no longer known",
            element.qualified_name
        ))
    })?;
    Ok(NetworkTarget {
        address,
        runtime: element.runtime,
        handle: element.handle,
        uid: port.uid.clone(),
    })
}

/// Connect two ports, by qualified name. Names are re-resolved at execute
/// time; they may have gone stale since the edit was constructed.
pub struct ConnectPorts {
    source: String,
    destination: String,
}

impl ConnectPorts {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl EditOp for ConnectPorts {
    fn execute(&mut self, scope: &mut dyn RemoteScope) -> Result<(), EditError> {
        let (src, dst) = resolve_ports(scope, &self.source, &self.destination)?;
        scope
            .may_connect(&self.source, &self.destination, false)
            .map_err(EditError::PolicyRejected)?;

        if src.runtime == dst.runtime {
            return scope
                .connect(src.runtime, src.handle, dst.handle)
                .map_err(EditError::Remote);
        }

        // Cross-runtime: a network connection needs a shared side. Try the
        // destination's shared side first, then the source's.
        let src_port = src.kind.as_port().expect("resolved as port").clone();
        let dst_port = dst.kind.as_port().expect("resolved as port").clone();
        let mut errors = Vec::new();
        if dst_port.shared {
            let target = network_target(scope, &dst, &dst_port)?;
            match scope.network_connect(src.runtime, src.handle, &target, false) {
                Ok(()) => return Ok(()),
                Err(e) => errors.push(e),
            }
        }
        if src_port.shared {
            let target = network_target(scope, &src, &src_port)?;
            match scope.network_connect(dst.runtime, dst.handle, &target, true) {
                Ok(()) => return Ok(()),
                Err(e) => errors.push(e),
            }
        }
        if errors.is_empty() {
            Err(EditError::PolicyRejected(format!(
                "neither `{}` nor `{}` is shared across runtimes",
                self.source, self.destination
            )))
        } else {
            Err(EditError::Remote(errors.join("; ")))
        }
    }

    fn check_success(&mut self, scope: &mut dyn RemoteScope) -> Option<Result<(), EditError>> {
        for name in [&self.source, &self.destination] {
            if scope.resolve(name).is_none() {
                return Some(Err(EditError::Resolution(format!(
                    "`{name}` vanished while the connection was propagating"
                ))));
            }
        }
        if scope.connected(&self.source, &self.destination) {
            Some(Ok(()))
        } else {
            None
        }
    }

    fn invert(&self) -> Box<dyn EditOp> {
        Box::new(DisconnectPorts::new(
            self.source.clone(),
            self.destination.clone(),
        ))
    }

    fn description(&self) -> String {
        format!(
            "Connect {} to {}",
            short_name(&self.source),
            short_name(&self.destination)
        )
    }
}

/// Disconnect two ports, by qualified name.
pub struct DisconnectPorts {
    source: String,
    destination: String,
}

impl DisconnectPorts {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl EditOp for DisconnectPorts {
    fn execute(&mut self, scope: &mut dyn RemoteScope) -> Result<(), EditError> {
        let (src, dst) = resolve_ports(scope, &self.source, &self.destination)?;
        if src.runtime == dst.runtime {
            return scope
                .disconnect(src.runtime, src.handle, dst.handle)
                .map_err(EditError::Remote);
        }
        // No network-level disconnect exists; ask both owning runtimes to
        // drop their end and fail only if neither accepted.
        let first = scope.disconnect(src.runtime, src.handle, dst.handle);
        let second = scope.disconnect(dst.runtime, dst.handle, src.handle);
        match (first, second) {
            (Err(a), Err(b)) => Err(EditError::Remote(format!("{a}; {b}"))),
            _ => Ok(()),
        }
    }

    fn check_success(&mut self, scope: &mut dyn RemoteScope) -> Option<Result<(), EditError>> {
        // A vanished endpoint means there is nothing left to disconnect.
        if scope.resolve(&self.source).is_none() || scope.resolve(&self.destination).is_none() {
            return Some(Ok(()));
        }
        if scope.connected(&self.source, &self.destination) {
            None
        } else {
            Some(Ok(()))
        }
    }

    fn invert(&self) -> Box<dyn EditOp> {
        Box::new(ConnectPorts::new(
            self.source.clone(),
            self.destination.clone(),
        ))
    }

    fn description(&self) -> String {
        format!(
            "Disconnect {} from {}",
            short_name(&self.source),
            short_name(&self.destination)
        )
    }
}

// ============================================================================
// INTERFACE EDITS
// ============================================================================

/// Add ports to a component's editable interfaces in one atomic annotation
/// write. Constructing the edit fails unless the component currently exposes
/// at least one editable interface.
pub struct AddInterfacePorts {
    component: String,
    /// Editable interface names observed at construction time.
    editable: Vec<String>,
    queued: Vec<(String, Vec<PortSpec>)>,
    /// Pre-edit interface description, kept for undo.
    snapshot: Option<InterfaceSet>,
    /// Nothing was queued; the edit succeeded without touching the runtime.
    noop: bool,
}

impl AddInterfacePorts {
    pub fn new(scope: &dyn RemoteScope, component: impl Into<String>) -> Result<Self, EditError> {
        let component = component.into();
        let set = scope.interfaces_of(&component).ok_or_else(|| {
            EditError::Resolution(format!("`{component}` does not exist or has no interfaces"))
        })?;
        let editable: Vec<String> = set
            .editable_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        if editable.is_empty() {
            return Err(EditError::PolicyRejected(format!(
                "`{component}` has no editable interface"
            )));
        }
        Ok(Self {
            component,
            editable,
            queued: Vec::new(),
            snapshot: None,
            noop: false,
        })
    }

    /// The pending list of ports to add under the named interface, created on
    /// first access. Fails if the component has no editable interface of that
    /// name.
    pub fn ports_to_add(&mut self, interface: &str) -> Result<&mut Vec<PortSpec>, EditError> {
        if !self.editable.iter().any(|n| n == interface) {
            return Err(EditError::Resolution(format!(
                "`{}` has no editable interface named `{interface}`",
                self.component
            )));
        }
        let index = match self.queued.iter().position(|(n, _)| n == interface) {
            Some(index) => index,
            None => {
                self.queued.push((interface.to_string(), Vec::new()));
                self.queued.len() - 1
            }
        };
        Ok(&mut self.queued[index].1)
    }
}

impl EditOp for AddInterfacePorts {
    fn execute(&mut self, scope: &mut dyn RemoteScope) -> Result<(), EditError> {
        if self.queued.iter().all(|(_, ports)| ports.is_empty()) {
            self.noop = true;
            return Ok(());
        }

        let component = scope.resolve(&self.component).ok_or_else(|| {
            EditError::Resolution(format!("`{}` no longer exists", self.component))
        })?;
        let blob = scope
            .get_annotation(component.runtime, component.handle)
            .map_err(EditError::Remote)?;
        let snapshot: InterfaceSet = serde_json::from_slice(&blob).map_err(|e| {
            EditError::Remote(format!(
                "malformed interface annotation on `{}`: {e}",
                self.component
            ))
        })?;

        // All edits go into a working copy; it is only committed once every
        // queued port has been validated.
        let mut working = snapshot.clone();
        for (interface_name, ports) in &self.queued {
            let interface = working.interface_mut(interface_name).ok_or_else(|| {
                EditError::Resolution(format!(
                    "interface `{interface_name}` is gone from `{}`",
                    self.component
                ))
            })?;
            for spec in ports {
                if interface.ports.iter().any(|p| p.name == spec.name) {
                    return Err(EditError::PolicyRejected(format!(
                        "a port named `{}` already exists in `{}/{interface_name}`",
                        spec.name, self.component
                    )));
                }
                interface.ports.push(spec.clone());
            }
        }

        let data = serde_json::to_vec(&working)
            .map_err(|e| EditError::Remote(format!("cannot encode interface annotation: {e}")))?;
        scope
            .set_annotation(component.runtime, component.handle, &data)
            .map_err(EditError::Remote)?;
        self.snapshot = Some(snapshot);
        Ok(())
    }

    fn check_success(&mut self, scope: &mut dyn RemoteScope) -> Option<Result<(), EditError>> {
        if self.noop {
            return Some(Ok(()));
        }
        let Some(set) = scope.interfaces_of(&self.component) else {
            return Some(Err(EditError::Resolution(format!(
                "`{}` vanished while the interface edit was propagating",
                self.component
            ))));
        };
        for (interface_name, ports) in &self.queued {
            let Some(interface) = set.interface(interface_name) else {
                return None;
            };
            for spec in ports {
                if !interface.ports.iter().any(|p| p.name == spec.name) {
                    return None;
                }
            }
        }
        Some(Ok(()))
    }

    fn invert(&self) -> Box<dyn EditOp> {
        Box::new(RestoreInterfaces::new(
            self.component.clone(),
            self.snapshot
                .clone()
                .expect("snapshot is recorded when the edit executes"),
        ))
    }

    fn description(&self) -> String {
        let count: usize = self.queued.iter().map(|(_, ports)| ports.len()).sum();
        format!(
            "Add {count} port{} to {}",
            if count == 1 { "" } else { "s" },
            short_name(&self.component)
        )
    }
}

/// Write a previously captured interface description back to a component in
/// one atomic annotation write. Generated as the inverse of
/// [`AddInterfacePorts`].
pub struct RestoreInterfaces {
    component: String,
    set: InterfaceSet,
    /// What the restore overwrote, making this edit itself invertible.
    replaced: Option<InterfaceSet>,
}

impl RestoreInterfaces {
    pub fn new(component: impl Into<String>, set: InterfaceSet) -> Self {
        Self {
            component: component.into(),
            set,
            replaced: None,
        }
    }
}

impl EditOp for RestoreInterfaces {
    fn execute(&mut self, scope: &mut dyn RemoteScope) -> Result<(), EditError> {
        let component = scope.resolve(&self.component).ok_or_else(|| {
            EditError::Resolution(format!("`{}` no longer exists", self.component))
        })?;
        let blob = scope
            .get_annotation(component.runtime, component.handle)
            .map_err(EditError::Remote)?;
        self.replaced = serde_json::from_slice(&blob).ok();

        let data = serde_json::to_vec(&self.set)
            .map_err(|e| EditError::Remote(format!("cannot encode interface annotation: {e}")))?;
        scope
            .set_annotation(component.runtime, component.handle, &data)
            .map_err(EditError::Remote)
    }

    fn check_success(&mut self, _scope: &mut dyn RemoteScope) -> Option<Result<(), EditError>> {
        // A single atomic write; the runtime applies it as-is.
        Some(Ok(()))
    }

    fn invert(&self) -> Box<dyn EditOp> {
        Box::new(RestoreInterfaces::new(
            self.component.clone(),
            self.replaced
                .clone()
                .expect("the replaced description is captured when the restore executes"),
        ))
    }

    fn description(&self) -> String {
        format!("Restore interfaces of {}", short_name(&self.component))
    }
}

// ============================================================================
// COMPOSITE EDITS
// ============================================================================

/// One entry of an [`EditSequence`]: an edit, or a checkpoint that blocks
/// until everything executed so far has confirmed success.
pub enum Step {
    Edit(Edit),
    Checkpoint,
}

/// Sequences edits with all-or-nothing semantics: if a step fails, the
/// already-executed prefix is rolled back (unless rollback is disabled) and
/// the root failure is surfaced, with any rollback failure appended as a
/// warning.
pub struct EditSequence {
    label: String,
    steps: Vec<Step>,
    /// Indices of the steps whose execute call succeeded, in execution
    /// order. Always a prefix of the edit steps in `steps`.
    executed: Vec<usize>,
    rollback_on_failure: bool,
}

impl EditSequence {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            steps: Vec::new(),
            executed: Vec::new(),
            rollback_on_failure: true,
        }
    }

    /// Disable automatic rollback; used for generated undo sequences so a
    /// failing rollback cannot recurse into further rollbacks.
    pub fn without_rollback(mut self) -> Self {
        self.rollback_on_failure = false;
        self
    }

    pub fn push(&mut self, edit: Edit) {
        self.steps.push(Step::Edit(edit));
    }

    /// Require every edit executed so far to confirm success before the
    /// sequence continues.
    pub fn push_checkpoint(&mut self) {
        self.steps.push(Step::Checkpoint);
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Indices of the steps that have been executed in the current attempt.
    pub fn executed(&self) -> &[usize] {
        &self.executed
    }

    /// Blockingly resolve every executed edit; aggregate failures.
    fn settle_executed(&mut self, scope: &mut dyn RemoteScope) -> Result<(), EditError> {
        let mut failures = Vec::new();
        for &index in &self.executed {
            let Step::Edit(edit) = &mut self.steps[index] else {
                continue;
            };
            let timeout = edit.default_timeout();
            if let Err(e) = edit.check_success(scope, timeout) {
                failures.push(format!("{}: {e}", edit.menu_description()));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(EditError::Sequence(format!(
                "{} of {} steps failed: {}",
                failures.len(),
                self.executed.len(),
                failures.join("; ")
            )))
        }
    }

    /// Undo the executed prefix in reverse order. Each executed edit is
    /// settled first; edits whose success cannot be confirmed have no defined
    /// inverse and are skipped.
    fn roll_back(&mut self, scope: &mut dyn RemoteScope) -> Result<(), EditError> {
        let mut undo = EditSequence::new(format!("Undo {}", self.label)).without_rollback();
        for &index in self.executed.iter().rev() {
            let Step::Edit(edit) = &mut self.steps[index] else {
                continue;
            };
            let timeout = edit.default_timeout();
            if edit.check_success(scope, timeout).is_ok() {
                undo.push(edit.undo_edit());
            }
        }
        if undo.is_empty() {
            return Ok(());
        }
        let timeout = undo.timeout();
        Edit::new(undo).execute(scope, timeout)
    }

    fn fail_and_roll_back(&mut self, scope: &mut dyn RemoteScope, original: EditError) -> EditError {
        if !self.rollback_on_failure {
            return original;
        }
        log::warn!("edit sequence `{}` failed, rolling back: {original}", self.label);
        match self.roll_back(scope) {
            Ok(()) => original,
            Err(warning) => EditError::RollbackWarning {
                source: Box::new(original),
                warning: warning.to_string(),
            },
        }
    }
}

impl EditOp for EditSequence {
    fn execute(&mut self, scope: &mut dyn RemoteScope) -> Result<(), EditError> {
        self.executed.clear();
        for index in 0..self.steps.len() {
            if matches!(self.steps[index], Step::Checkpoint) {
                if let Err(e) = self.settle_executed(scope) {
                    return Err(self.fail_and_roll_back(scope, e));
                }
                continue;
            }
            let result = match &mut self.steps[index] {
                Step::Edit(edit) => edit.execute_async(scope),
                Step::Checkpoint => unreachable!(),
            };
            match result {
                Ok(()) => self.executed.push(index),
                Err(e) => return Err(self.fail_and_roll_back(scope, e)),
            }
        }
        Ok(())
    }

    fn check_success(&mut self, scope: &mut dyn RemoteScope) -> Option<Result<(), EditError>> {
        // An undetermined step keeps the whole sequence undetermined, even
        // when another step has already failed: the aggregate is reported
        // atomically or not at all.
        let mut failures = Vec::new();
        let total = self.executed.len();
        for &index in &self.executed {
            let Step::Edit(edit) = &mut self.steps[index] else {
                continue;
            };
            match edit.check_success_async(scope) {
                None => return None,
                Some(Ok(())) => {}
                Some(Err(e)) => failures.push(format!("{}: {e}", edit.menu_description())),
            }
        }
        if failures.is_empty() {
            Some(Ok(()))
        } else {
            Some(Err(EditError::Sequence(format!(
                "{} of {total} steps failed: {}",
                failures.len(),
                failures.join("; ")
            ))))
        }
    }

    fn invert(&self) -> Box<dyn EditOp> {
        let mut undo = EditSequence::new(format!("Undo {}", self.label)).without_rollback();
        for &index in self.executed.iter().rev() {
            let Step::Edit(edit) = &self.steps[index] else {
                continue;
            };
            if matches!(edit.outcome(), Some(Ok(()))) {
                undo.push(edit.undo_edit());
            }
        }
        Box::new(undo)
    }

    fn description(&self) -> String {
        self.label.clone()
    }

    fn timeout(&self) -> Duration {
        let edits = self
            .steps
            .iter()
            .filter(|s| matches!(s, Step::Edit(_)))
            .count()
            .max(1);
        DEFAULT_TIMEOUT * edits as u32
    }
}
