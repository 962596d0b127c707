//! Scripted doubles for the hardware seams. Every double appends to a shared
//! [`Trace`] so tests can assert on cross-component ordering.

use std::{cell::RefCell, collections::VecDeque, convert::Infallible, rc::Rc};

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::{
    config::LinkCredentials,
    error::{LinkDriverError, ProbeTransportError},
    indicator::{Indicator, IndicatorEvent},
    link::{AddressConfig, LinkDriver, LinkStatus},
    platform::DelayOps,
    probe::ProbeTransport,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TraceEntry {
    Delay(u32),
    Pin(&'static str, bool),
    SetActive(bool),
    Associate(&'static str),
    Disassociate,
    Status(LinkStatus),
    Probe(u32),
    Show(IndicatorEvent),
    LinkRetry,
}

#[derive(Clone, Default)]
pub(crate) struct Trace(Rc<RefCell<Vec<TraceEntry>>>);

impl Trace {
    pub(crate) fn push(&self, entry: TraceEntry) {
        self.0.borrow_mut().push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<TraceEntry> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub(crate) fn count(&self, predicate: impl Fn(&TraceEntry) -> bool) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|entry| predicate(entry))
            .count()
    }

    pub(crate) fn total_delay_ms(&self) -> u32 {
        self.0
            .borrow()
            .iter()
            .map(|entry| match entry {
                TraceEntry::Delay(ms) => *ms,
                _ => 0,
            })
            .sum()
    }
}

pub(crate) struct FakePin {
    name: &'static str,
    high: bool,
    trace: Trace,
}

impl FakePin {
    pub(crate) fn new(name: &'static str, trace: &Trace) -> Self {
        Self {
            name,
            high: false,
            trace: trace.clone(),
        }
    }

    pub(crate) fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.trace.push(TraceEntry::Pin(self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.trace.push(TraceEntry::Pin(self.name, true));
        Ok(())
    }
}

pub(crate) struct FakeDelay {
    trace: Trace,
}

impl FakeDelay {
    pub(crate) fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl DelayOps for FakeDelay {
    async fn delay_ms(&mut self, millis: u32) {
        self.trace.push(TraceEntry::Delay(millis));
    }
}

pub(crate) struct RecordingIndicator {
    trace: Trace,
}

impl RecordingIndicator {
    pub(crate) fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl Indicator for RecordingIndicator {
    async fn show(&mut self, event: IndicatorEvent) {
        self.trace.push(TraceEntry::Show(event));
    }

    async fn link_retry(&mut self) {
        self.trace.push(TraceEntry::LinkRetry);
    }
}

/// Link whose status answers come from a script; once the script runs out
/// every poll reports `fallback`.
pub(crate) struct ScriptedLink {
    statuses: VecDeque<LinkStatus>,
    fallback: LinkStatus,
    associate_error: Option<LinkDriverError>,
    trace: Trace,
}

impl ScriptedLink {
    pub(crate) fn new(trace: &Trace, fallback: LinkStatus) -> Self {
        Self {
            statuses: VecDeque::new(),
            fallback,
            associate_error: None,
            trace: trace.clone(),
        }
    }

    pub(crate) fn with_statuses(mut self, statuses: &[LinkStatus]) -> Self {
        self.statuses.extend(statuses.iter().copied());
        self
    }

    pub(crate) fn failing_associate(mut self, err: LinkDriverError) -> Self {
        self.associate_error = Some(err);
        self
    }

    pub(crate) fn always_up(trace: &Trace) -> Self {
        Self::new(trace, LinkStatus::AssociatedWithAddress)
    }
}

impl LinkDriver for ScriptedLink {
    async fn set_active(&mut self, active: bool) -> Result<(), LinkDriverError> {
        self.trace.push(TraceEntry::SetActive(active));
        Ok(())
    }

    async fn associate(&mut self, credentials: &LinkCredentials) -> Result<(), LinkDriverError> {
        self.trace.push(TraceEntry::Associate(credentials.identity()));
        match self.associate_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn disassociate(&mut self) -> Result<(), LinkDriverError> {
        self.trace.push(TraceEntry::Disassociate);
        Ok(())
    }

    fn link_status(&mut self) -> LinkStatus {
        let status = self.statuses.pop_front().unwrap_or(self.fallback);
        self.trace.push(TraceEntry::Status(status));
        status
    }

    fn address_config(&self) -> Option<AddressConfig> {
        Some(AddressConfig {
            address: [192, 168, 0, 42],
            prefix_len: 24,
            gateway: Some([192, 168, 0, 1]),
            dns: None,
        })
    }
}

pub(crate) const SCRIPT_EXHAUSTED: ProbeTransportError = ProbeTransportError("script exhausted");

/// Probe that replays outcomes and fails the transport once they run out, which
/// is how tests end an otherwise endless monitoring loop.
pub(crate) struct ScriptedProbe {
    outcomes: VecDeque<Result<bool, ProbeTransportError>>,
    trace: Trace,
}

impl ScriptedProbe {
    pub(crate) fn new(trace: &Trace, outcomes: &[Result<bool, ProbeTransportError>]) -> Self {
        Self {
            outcomes: outcomes.iter().copied().collect(),
            trace: trace.clone(),
        }
    }
}

impl ProbeTransport for ScriptedProbe {
    async fn probe(&mut self, _host: &str, timeout_ms: u32) -> Result<bool, ProbeTransportError> {
        self.trace.push(TraceEntry::Probe(timeout_ms));
        self.outcomes.pop_front().unwrap_or(Err(SCRIPT_EXHAUSTED))
    }
}
