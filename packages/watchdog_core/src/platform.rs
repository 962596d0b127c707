/// Timed wait used by every suspension point of the control loop.
///
/// Implementations must not return before `millis` have passed on the device;
/// test doubles are free to return immediately and only record the request.
#[allow(async_fn_in_trait)]
pub trait DelayOps {
    async fn delay_ms(&mut self, millis: u32);

    async fn delay_s(&mut self, seconds: u32) {
        self.delay_ms(seconds.saturating_mul(1_000)).await;
    }
}
