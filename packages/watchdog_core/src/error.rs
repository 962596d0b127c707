use core::fmt;

/// The link did not reach "associated with address" within the connect budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkTimeout {
    pub timeout_s: u32,
    pub identity: &'static str,
}

impl fmt::Display for LinkTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timeout after {} seconds when connecting to network '{}'",
            self.timeout_s, self.identity
        )
    }
}

/// The radio driver rejected an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkDriverError(pub &'static str);

impl fmt::Display for LinkDriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link driver error: {}", self.0)
    }
}

/// The probe could not be carried out at all. A probe that simply gets no
/// reply is `Ok(false)`, not this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeTransportError(pub &'static str);

impl fmt::Display for ProbeTransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "probe transport error: {}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectError {
    Timeout(LinkTimeout),
    Driver(LinkDriverError),
}

impl From<LinkDriverError> for ConnectError {
    fn from(err: LinkDriverError) -> Self {
        Self::Driver(err)
    }
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout(err) => err.fmt(f),
            Self::Driver(err) => err.fmt(f),
        }
    }
}

/// Everything the supervisor recovers from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    LinkTimeout(LinkTimeout),
    LinkDriver(LinkDriverError),
    ProbeTransport(ProbeTransportError),
}

impl Fault {
    pub const fn kind(&self) -> FaultKind {
        match self {
            Self::LinkTimeout(_) => FaultKind::LinkTimeout,
            Self::LinkDriver(_) => FaultKind::LinkDriver,
            Self::ProbeTransport(_) => FaultKind::ProbeTransport,
        }
    }
}

impl From<ConnectError> for Fault {
    fn from(err: ConnectError) -> Self {
        match err {
            ConnectError::Timeout(timeout) => Self::LinkTimeout(timeout),
            ConnectError::Driver(driver) => Self::LinkDriver(driver),
        }
    }
}

impl From<ProbeTransportError> for Fault {
    fn from(err: ProbeTransportError) -> Self {
        Self::ProbeTransport(err)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkTimeout(err) => err.fmt(f),
            Self::LinkDriver(err) => err.fmt(f),
            Self::ProbeTransport(err) => err.fmt(f),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultKind {
    LinkTimeout,
    LinkDriver,
    ProbeTransport,
}

impl FaultKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LinkTimeout => "link_timeout",
            Self::LinkDriver => "link_driver",
            Self::ProbeTransport => "probe_transport",
        }
    }
}
