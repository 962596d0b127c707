//! Probe-outcome hysteresis.
//!
//! A single reply re-energizes the relay; it only drops after `threshold`
//! consecutive misses. Between those points no command is issued and the relay
//! keeps whatever it was last told.

use crate::{indicator::IndicatorEvent, relay::RelayCommand};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeVerdict {
    pub misses: u32,
    pub command: Option<RelayCommand>,
    pub event: IndicatorEvent,
}

#[derive(Clone, Copy, Debug)]
pub struct LivenessMonitor {
    misses: u32,
    threshold: u8,
}

impl LivenessMonitor {
    pub const fn new(threshold: u8) -> Self {
        Self {
            misses: 0,
            threshold,
        }
    }

    pub const fn misses(&self) -> u32 {
        self.misses
    }

    pub fn on_probe(&mut self, success: bool) -> ProbeVerdict {
        let (misses, command) = decide(self.misses, success, self.threshold);
        self.misses = misses;
        ProbeVerdict {
            misses,
            command,
            event: if success {
                IndicatorEvent::ProbeOk
            } else {
                IndicatorEvent::ProbeFail
            },
        }
    }
}

/// `(previous misses, outcome) -> (misses, command)`.
pub const fn decide(previous: u32, success: bool, threshold: u8) -> (u32, Option<RelayCommand>) {
    if success {
        return (0, Some(RelayCommand::Energize));
    }
    let misses = previous.saturating_add(1);
    if misses >= threshold as u32 {
        (misses, Some(RelayCommand::DeEnergize))
    } else {
        (misses, None)
    }
}
