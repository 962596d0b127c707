use log::info;

use crate::{error::FaultKind, relay::RelayCommand};

/// Process-lifetime counters, owned by the supervisor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WatchdogCounters {
    pub connect_attempts: u32,
    pub connect_successes: u32,
    pub link_timeouts: u32,
    pub link_driver_faults: u32,
    pub probe_transport_faults: u32,
    pub probes_ok: u32,
    pub probes_missed: u32,
    pub relay_energized: u32,
    pub relay_de_energized: u32,
}

impl WatchdogCounters {
    pub fn record_connect_attempt(&mut self) {
        self.connect_attempts = self.connect_attempts.saturating_add(1);
    }

    pub fn record_connect_success(&mut self) {
        self.connect_successes = self.connect_successes.saturating_add(1);
    }

    pub fn record_probe(&mut self, success: bool) {
        let counter = if success {
            &mut self.probes_ok
        } else {
            &mut self.probes_missed
        };
        *counter = counter.saturating_add(1);
    }

    pub fn record_relay_transition(&mut self, command: RelayCommand) {
        let counter = match command {
            RelayCommand::Energize => &mut self.relay_energized,
            RelayCommand::DeEnergize => &mut self.relay_de_energized,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn record_fault(&mut self, kind: FaultKind) {
        let counter = match kind {
            FaultKind::LinkTimeout => &mut self.link_timeouts,
            FaultKind::LinkDriver => &mut self.link_driver_faults,
            FaultKind::ProbeTransport => &mut self.probe_transport_faults,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn faults(&self) -> u32 {
        self.link_timeouts
            .saturating_add(self.link_driver_faults)
            .saturating_add(self.probe_transport_faults)
    }

    pub fn log_summary(&self) {
        info!(
            "WATCHDOG_STATS connect={}/{} faults={} (timeout={} driver={} probe={}) probes ok={} missed={} relay on={} off={}",
            self.connect_successes,
            self.connect_attempts,
            self.faults(),
            self.link_timeouts,
            self.link_driver_faults,
            self.probe_transport_faults,
            self.probes_ok,
            self.probes_missed,
            self.relay_energized,
            self.relay_de_energized,
        );
    }
}
