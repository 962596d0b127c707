//! Supervisory control logic for the relay watchdog.
//!
//! Hardware is reached only through the traits in [`link`], [`probe`],
//! [`platform`] and `embedded_hal::digital::OutputPin`, so everything here runs
//! unchanged on the device and on the host.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod indicator;
pub mod link;
pub mod liveness;
pub mod platform;
pub mod probe;
pub mod relay;
pub mod supervisor;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use config::{LinkCredentials, LinkPolicy, MonitorPolicy, WatchdogConfig};
pub use error::{
    ConnectError, Fault, FaultKind, LinkDriverError, LinkTimeout, ProbeTransportError,
};
pub use indicator::{BlinkPattern, Indicator, IndicatorEvent, LedIndicator, NullIndicator};
pub use link::{AddressConfig, LinkDriver, LinkManager, LinkStatus};
pub use liveness::{LivenessMonitor, ProbeVerdict};
pub use platform::DelayOps;
pub use probe::ProbeTransport;
pub use relay::{RelayCommand, RelayOutput, RelayPolarity};
pub use supervisor::{Phase, Supervisor, SupervisorEngine, SupervisorEvent, SupervisorSnapshot};
pub use telemetry::WatchdogCounters;
