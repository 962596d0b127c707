// Runtime policy baselines. The firmware normally overrides these from the
// build-time config; `sanitized()` keeps any value inside a range the control
// loop can live with.
pub const CONNECT_TIMEOUT_DEFAULT_S: u32 = 5;
pub const POLL_INTERVAL_DEFAULT_MS: u32 = 1_000;
pub const POLLS_PER_ROUND_DEFAULT: u8 = 10;
pub const PROBE_TIMEOUT_DEFAULT_MS: u32 = 1_000;
pub const PROBE_INTERVAL_DEFAULT_MS: u32 = 1_000;
// Three consecutive misses before the relay drops.
pub const MISS_THRESHOLD_DEFAULT: u8 = 3;
pub const FAULT_BACKOFF_DEFAULT_S: u32 = 60;

pub const IDENTITY_MAX: usize = 32;
pub const SECRET_MAX: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkCredentials {
    identity: &'static str,
    secret: &'static str,
}

impl LinkCredentials {
    pub const fn new(identity: &'static str, secret: &'static str) -> Self {
        Self { identity, secret }
    }

    pub const fn identity(&self) -> &'static str {
        self.identity
    }

    pub const fn secret(&self) -> &'static str {
        self.secret
    }

    /// Open networks are joined without authentication.
    pub const fn is_open(&self) -> bool {
        self.secret.is_empty()
    }

    pub const fn is_valid(&self) -> bool {
        !self.identity.is_empty()
            && self.identity.len() <= IDENTITY_MAX
            && self.secret.len() <= SECRET_MAX
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkPolicy {
    pub connect_timeout_s: u32,
    pub poll_interval_ms: u32,
    pub polls_per_round: u8,
}

impl LinkPolicy {
    pub const fn defaults() -> Self {
        Self {
            connect_timeout_s: CONNECT_TIMEOUT_DEFAULT_S,
            poll_interval_ms: POLL_INTERVAL_DEFAULT_MS,
            polls_per_round: POLLS_PER_ROUND_DEFAULT,
        }
    }

    pub const fn sanitized(self) -> Self {
        Self {
            connect_timeout_s: clamp_u32(self.connect_timeout_s, 1, 600),
            poll_interval_ms: clamp_u32(self.poll_interval_ms, 50, 10_000),
            polls_per_round: clamp_u8(self.polls_per_round, 1, 64),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonitorPolicy {
    pub probe_timeout_ms: u32,
    pub probe_interval_ms: u32,
    pub miss_threshold: u8,
}

impl MonitorPolicy {
    pub const fn defaults() -> Self {
        Self {
            probe_timeout_ms: PROBE_TIMEOUT_DEFAULT_MS,
            probe_interval_ms: PROBE_INTERVAL_DEFAULT_MS,
            miss_threshold: MISS_THRESHOLD_DEFAULT,
        }
    }

    pub const fn sanitized(self) -> Self {
        Self {
            probe_timeout_ms: clamp_u32(self.probe_timeout_ms, 100, 30_000),
            probe_interval_ms: clamp_u32(self.probe_interval_ms, 0, 60_000),
            miss_threshold: clamp_u8(self.miss_threshold, 1, u8::MAX),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchdogConfig {
    pub target_host: &'static str,
    pub credentials: LinkCredentials,
    pub link: LinkPolicy,
    pub monitor: MonitorPolicy,
    pub fault_backoff_s: u32,
}

impl WatchdogConfig {
    pub const fn new(target_host: &'static str, credentials: LinkCredentials) -> Self {
        Self {
            target_host,
            credentials,
            link: LinkPolicy::defaults(),
            monitor: MonitorPolicy::defaults(),
            fault_backoff_s: FAULT_BACKOFF_DEFAULT_S,
        }
    }

    pub const fn sanitized(self) -> Self {
        Self {
            target_host: self.target_host,
            credentials: self.credentials,
            link: self.link.sanitized(),
            monitor: self.monitor.sanitized(),
            fault_backoff_s: clamp_u32(self.fault_backoff_s, 1, 3_600),
        }
    }
}

const fn clamp_u32(value: u32, min: u32, max: u32) -> u32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

const fn clamp_u8(value: u8, min: u8, max: u8) -> u8 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
