use core::fmt;

use log::{debug, info, warn};

use crate::{
    config::{LinkCredentials, LinkPolicy},
    error::{ConnectError, LinkDriverError, LinkTimeout},
    indicator::Indicator,
    platform::DelayOps,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStatus {
    Idle,
    Connecting,
    Associated,
    AssociatedWithAddress,
    Failed,
}

impl LinkStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Associated => "associated",
            Self::AssociatedWithAddress => "associated_with_address",
            Self::Failed => "failed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressConfig {
    pub address: [u8; 4],
    pub prefix_len: u8,
    pub gateway: Option<[u8; 4]>,
    pub dns: Option<[u8; 4]>,
}

impl fmt::Display for AddressConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ipv4(f, self.address)?;
        write!(f, "/{}", self.prefix_len)?;
        if let Some(gateway) = self.gateway {
            f.write_str(" gw=")?;
            write_ipv4(f, gateway)?;
        }
        if let Some(dns) = self.dns {
            f.write_str(" dns=")?;
            write_ipv4(f, dns)?;
        }
        Ok(())
    }
}

fn write_ipv4(f: &mut fmt::Formatter<'_>, octets: [u8; 4]) -> fmt::Result {
    write!(f, "{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
}

/// Radio association primitives.
///
/// `associate` only issues the request; completion is observed through
/// `link_status`. Issuing it again without `disassociate` first is allowed.
#[allow(async_fn_in_trait)]
pub trait LinkDriver {
    async fn set_active(&mut self, active: bool) -> Result<(), LinkDriverError>;
    async fn associate(&mut self, credentials: &LinkCredentials) -> Result<(), LinkDriverError>;
    async fn disassociate(&mut self) -> Result<(), LinkDriverError>;
    fn link_status(&mut self) -> LinkStatus;
    fn address_config(&self) -> Option<AddressConfig>;
}

/// Book-keeping for one `connect` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ConnectionAttempt {
    elapsed_ms: u32,
    round: u32,
    checks: u8,
}

impl ConnectionAttempt {
    fn begin_round(&mut self) {
        self.round += 1;
        self.checks = 0;
    }
}

pub struct LinkManager<L> {
    driver: L,
    credentials: LinkCredentials,
    policy: LinkPolicy,
}

impl<L: LinkDriver> LinkManager<L> {
    pub fn new(driver: L, credentials: LinkCredentials, policy: LinkPolicy) -> Self {
        Self {
            driver,
            credentials,
            policy,
        }
    }

    pub fn credentials(&self) -> &LinkCredentials {
        &self.credentials
    }

    pub fn address_config(&self) -> Option<AddressConfig> {
        self.driver.address_config()
    }

    /// Brings the link up or gives up once `timeout_s` of polling has elapsed.
    ///
    /// Returns as soon as the driver reports an acquired address. Time spent in
    /// poll sleeps is the only time counted against the budget, and the last
    /// sleep is shortened so the budget is never overrun.
    pub async fn connect<I, D>(
        &mut self,
        timeout_s: u32,
        indicator: &mut I,
        delay: &mut D,
    ) -> Result<(), ConnectError>
    where
        I: Indicator,
        D: DelayOps,
    {
        let budget_ms = timeout_s.saturating_mul(1_000);
        let mut attempt = ConnectionAttempt::default();

        loop {
            if attempt.elapsed_ms >= budget_ms {
                return Err(self.timed_out(timeout_s, attempt));
            }

            attempt.begin_round();
            info!(
                "link: associating identity={} round={}",
                self.credentials.identity(),
                attempt.round
            );
            self.driver.set_active(true).await?;
            self.driver.associate(&self.credentials).await?;

            while attempt.checks < self.policy.polls_per_round {
                attempt.checks += 1;
                let status = self.driver.link_status();
                if status == LinkStatus::AssociatedWithAddress {
                    info!(
                        "link: up round={} check={} elapsed_ms={}",
                        attempt.round, attempt.checks, attempt.elapsed_ms
                    );
                    return Ok(());
                }
                debug!(
                    "link: status={} round={} check={}",
                    status.as_str(),
                    attempt.round,
                    attempt.checks
                );

                let remaining_ms = budget_ms.saturating_sub(attempt.elapsed_ms);
                if remaining_ms == 0 {
                    return Err(self.timed_out(timeout_s, attempt));
                }
                let step_ms = self.policy.poll_interval_ms.min(remaining_ms);
                delay.delay_ms(step_ms).await;
                attempt.elapsed_ms += step_ms;
            }

            warn!(
                "link: round {} not associated after {} checks; retrying",
                attempt.round, attempt.checks
            );
            self.driver.disassociate().await?;
            indicator.link_retry().await;
        }
    }

    fn timed_out(&self, timeout_s: u32, attempt: ConnectionAttempt) -> ConnectError {
        warn!(
            "link: timeout identity={} rounds={} elapsed_ms={}",
            self.credentials.identity(),
            attempt.round,
            attempt.elapsed_ms
        );
        ConnectError::Timeout(LinkTimeout {
            timeout_s,
            identity: self.credentials.identity(),
        })
    }
}
