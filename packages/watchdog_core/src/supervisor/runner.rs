use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use log::{debug, error, info, warn};

use super::engine::SupervisorEngine;
use super::types::{Phase, SupervisorEvent, SupervisorSnapshot};
use crate::{
    config::WatchdogConfig,
    error::Fault,
    indicator::{Indicator, IndicatorEvent},
    link::{LinkDriver, LinkManager},
    liveness::LivenessMonitor,
    platform::DelayOps,
    probe::ProbeTransport,
    relay::{RelayCommand, RelayOutput},
    telemetry::WatchdogCounters,
};

/// Top-level control loop. Owns every component for the life of the process.
pub struct Supervisor<L, P, R, I, D> {
    config: WatchdogConfig,
    link: LinkManager<L>,
    probe: P,
    relay: RelayOutput<R>,
    indicator: I,
    delay: D,
    engine: SupervisorEngine,
    counters: WatchdogCounters,
}

impl<L, P, R, I, D> Supervisor<L, P, R, I, D>
where
    L: LinkDriver,
    P: ProbeTransport,
    R: OutputPin<Error = Infallible>,
    I: Indicator,
    D: DelayOps,
{
    pub fn new(
        config: WatchdogConfig,
        link_driver: L,
        probe: P,
        relay: RelayOutput<R>,
        indicator: I,
        delay: D,
    ) -> Self {
        let config = config.sanitized();
        Self {
            link: LinkManager::new(link_driver, config.credentials, config.link),
            config,
            probe,
            relay,
            indicator,
            delay,
            engine: SupervisorEngine::new(),
            counters: WatchdogCounters::default(),
        }
    }

    pub fn snapshot(&self) -> SupervisorSnapshot {
        self.engine.snapshot()
    }

    pub fn counters(&self) -> &WatchdogCounters {
        &self.counters
    }

    pub fn relay(&self) -> &RelayOutput<R> {
        &self.relay
    }

    /// Runs forever; every fault ends in a backoff and a fresh connect.
    pub async fn run(mut self) -> Infallible {
        info!(
            "supervisor: watching {} via '{}'",
            self.config.target_host,
            self.config.credentials.identity()
        );
        loop {
            self.step().await;
        }
    }

    /// Performs the work of the current phase and returns the phase entered.
    ///
    /// In `Monitoring` this only returns once a fault ends the probe loop.
    pub async fn step(&mut self) -> Phase {
        match self.engine.snapshot().phase {
            Phase::Idle => self.start().await,
            Phase::Connecting => self.connect().await,
            Phase::Monitoring => {
                let fault = self.monitor().await;
                self.fail(fault);
            }
            Phase::FaultBackoff => self.back_off().await,
        }
        self.engine.snapshot().phase
    }

    async fn start(&mut self) {
        self.indicate(IndicatorEvent::Idle).await;
        self.command_relay(RelayCommand::DeEnergize);
        self.engine.apply(SupervisorEvent::Started);
    }

    async fn connect(&mut self) {
        self.counters.record_connect_attempt();
        let timeout_s = self.config.link.connect_timeout_s;
        match self
            .link
            .connect(timeout_s, &mut self.indicator, &mut self.delay)
            .await
        {
            Ok(()) => {
                self.counters.record_connect_success();
                self.indicate(IndicatorEvent::LinkUp).await;
                match self.link.address_config() {
                    Some(address) => info!(
                        "supervisor: connected to '{}' {}",
                        self.link.credentials().identity(),
                        address
                    ),
                    None => warn!(
                        "supervisor: connected to '{}' without address config",
                        self.link.credentials().identity()
                    ),
                }
                self.engine.apply(SupervisorEvent::LinkUp);
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Probe loop for one link session. A fresh monitor per session means a
    /// fault always discards the miss count.
    async fn monitor(&mut self) -> Fault {
        let mut monitor = LivenessMonitor::new(self.config.monitor.miss_threshold);
        let host = self.config.target_host;
        let policy = self.config.monitor;

        loop {
            let success = match self.probe.probe(host, policy.probe_timeout_ms).await {
                Ok(success) => success,
                Err(err) => return err.into(),
            };
            let verdict = monitor.on_probe(success);
            self.counters.record_probe(success);
            if success {
                info!("probe: reply from {}", host);
            } else {
                warn!("probe: no reply from {} misses={}", host, verdict.misses);
            }

            self.indicate(verdict.event).await;
            if let Some(command) = verdict.command {
                self.command_relay(command);
            }

            if success {
                self.delay.delay_ms(policy.probe_interval_ms).await;
            }
        }
    }

    async fn indicate(&mut self, event: IndicatorEvent) {
        debug!("indicator: {}", event.as_str());
        self.indicator.show(event).await;
    }

    async fn back_off(&mut self) {
        self.indicate(IndicatorEvent::Fault).await;
        info!("supervisor: backing off {}s", self.config.fault_backoff_s);
        self.delay.delay_s(self.config.fault_backoff_s).await;
        self.engine.apply(SupervisorEvent::BackoffElapsed);
    }

    // The relay keeps its last state through the backoff.
    fn fail(&mut self, fault: Fault) {
        error!("supervisor: {}", fault);
        self.counters.record_fault(fault.kind());
        self.counters.log_summary();
        self.engine.apply(SupervisorEvent::Fault(fault.kind()));
    }

    fn command_relay(&mut self, command: RelayCommand) {
        if self.relay.apply(command) {
            self.counters.record_relay_transition(command);
        }
    }
}
