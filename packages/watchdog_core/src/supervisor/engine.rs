use log::{info, warn};
use statig::blocking::IntoStateMachineExt as _;

use super::machine::{DispatchContext, SupervisorMachine};
use super::types::{ApplyStatus, SupervisorEvent, SupervisorSnapshot};

#[derive(Clone, Copy, Debug)]
pub struct TransitionResult {
    pub before: SupervisorSnapshot,
    pub after: SupervisorSnapshot,
    pub event: SupervisorEvent,
    pub status: ApplyStatus,
}

impl TransitionResult {
    pub fn applied(self) -> bool {
        matches!(self.status, ApplyStatus::Applied)
    }
}

/// Phase bookkeeping for the supervisor; performs no I/O of its own.
pub struct SupervisorEngine {
    machine: statig::blocking::StateMachine<SupervisorMachine>,
}

impl Default for SupervisorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SupervisorEngine {
    pub fn new() -> Self {
        Self {
            machine: SupervisorMachine::new(SupervisorSnapshot::default())
                .state_machine(),
        }
    }

    pub fn snapshot(&self) -> SupervisorSnapshot {
        self.machine.inner().snapshot
    }

    pub fn apply(&mut self, event: SupervisorEvent) -> TransitionResult {
        let before = self.snapshot();
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        let result = TransitionResult {
            before,
            after: self.snapshot(),
            event,
            status: context.status,
        };
        emit_transition(result);
        result
    }
}

fn emit_transition(result: TransitionResult) {
    if !result.applied() {
        warn!(
            "supervisor: rejected event={} in phase={}",
            result.event.as_str(),
            result.before.phase.as_str()
        );
        return;
    }
    info!(
        "WATCHDOG_EVENT {{\"from\":\"{}\",\"to\":\"{}\",\"trigger\":\"{}\",\"cycle\":{}}}",
        result.before.phase.as_str(),
        result.after.phase.as_str(),
        result.event.as_str(),
        result.after.cycle
    );
}
