use statig::prelude::*;

use super::types::{ApplyStatus, Phase, SupervisorEvent, SupervisorSnapshot};

#[derive(Clone, Copy, Debug)]
pub(super) struct SupervisorMachine {
    pub(super) snapshot: SupervisorSnapshot,
}

#[derive(Clone, Copy, Debug)]
pub(super) struct DispatchContext {
    pub(super) status: ApplyStatus,
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self {
            status: ApplyStatus::InvalidTransition,
        }
    }
}

impl SupervisorMachine {
    pub(super) fn new(snapshot: SupervisorSnapshot) -> Self {
        Self { snapshot }
    }

    fn enter(&mut self, context: &mut DispatchContext, phase: Phase) {
        self.snapshot.phase = phase;
        context.status = ApplyStatus::Applied;
    }
}

#[state_machine(initial = "State::idle()")]
impl SupervisorMachine {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &SupervisorEvent) -> Outcome<State> {
        match event {
            SupervisorEvent::Started => {
                self.enter(context, Phase::Connecting);
                Transition(State::connecting())
            }
            _ => Handled,
        }
    }

    #[state]
    fn connecting(
        &mut self,
        context: &mut DispatchContext,
        event: &SupervisorEvent,
    ) -> Outcome<State> {
        match event {
            SupervisorEvent::LinkUp => {
                self.enter(context, Phase::Monitoring);
                Transition(State::monitoring())
            }
            SupervisorEvent::Fault(kind) => {
                self.snapshot.last_fault = Some(*kind);
                self.enter(context, Phase::FaultBackoff);
                Transition(State::fault_backoff())
            }
            _ => Handled,
        }
    }

    #[state]
    fn monitoring(
        &mut self,
        context: &mut DispatchContext,
        event: &SupervisorEvent,
    ) -> Outcome<State> {
        match event {
            SupervisorEvent::Fault(kind) => {
                self.snapshot.last_fault = Some(*kind);
                self.enter(context, Phase::FaultBackoff);
                Transition(State::fault_backoff())
            }
            _ => Handled,
        }
    }

    #[state]
    fn fault_backoff(
        &mut self,
        context: &mut DispatchContext,
        event: &SupervisorEvent,
    ) -> Outcome<State> {
        match event {
            SupervisorEvent::BackoffElapsed => {
                self.snapshot.cycle = self.snapshot.cycle.wrapping_add(1);
                self.enter(context, Phase::Connecting);
                Transition(State::connecting())
            }
            _ => Handled,
        }
    }
}
