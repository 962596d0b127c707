use crate::error::ProbeTransportError;

/// One reachability check against `host`.
///
/// `Ok(true)` means a reply arrived within `timeout_ms`, `Ok(false)` means it
/// did not. `Err` is reserved for the transport itself failing, including the
/// link going away underneath it.
#[allow(async_fn_in_trait)]
pub trait ProbeTransport {
    async fn probe(&mut self, host: &str, timeout_ms: u32) -> Result<bool, ProbeTransportError>;
}
