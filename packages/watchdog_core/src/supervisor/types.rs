use crate::error::FaultKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Connecting,
    Monitoring,
    FaultBackoff,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Monitoring => "monitoring",
            Self::FaultBackoff => "fault_backoff",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupervisorEvent {
    Started,
    LinkUp,
    Fault(FaultKind),
    BackoffElapsed,
}

impl SupervisorEvent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::LinkUp => "link_up",
            Self::Fault(kind) => kind.as_str(),
            Self::BackoffElapsed => "backoff_elapsed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyStatus {
    Applied,
    InvalidTransition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SupervisorSnapshot {
    pub phase: Phase,
    /// Number of completed fault backoffs.
    pub cycle: u32,
    pub last_fault: Option<FaultKind>,
}

impl Default for SupervisorSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            cycle: 0,
            last_fault: None,
        }
    }
}
