use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

use crate::platform::DelayOps;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorEvent {
    Idle,
    LinkUp,
    ProbeOk,
    ProbeFail,
    Fault,
}

impl IndicatorEvent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::LinkUp => "link_up",
            Self::ProbeOk => "probe_ok",
            Self::ProbeFail => "probe_fail",
            Self::Fault => "fault",
        }
    }
}

/// Finite on/off pattern, played `repeat` times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkPattern {
    pub on_ms: u16,
    pub off_ms: u16,
    pub repeat: u8,
}

impl BlinkPattern {
    pub const LINK_UP: Self = Self::new(150, 150, 2);
    pub const PROBE_OK: Self = Self::new(5, 0, 1);
    pub const FAULT: Self = Self::new(100, 100, 20);
    pub const LINK_RETRY: Self = Self::new(50, 100, 3);

    pub const fn new(on_ms: u16, off_ms: u16, repeat: u8) -> Self {
        Self {
            on_ms,
            off_ms,
            repeat,
        }
    }

    pub const fn duration_ms(self) -> u32 {
        (self.on_ms as u32 + self.off_ms as u32) * self.repeat as u32
    }
}

/// Visual feedback sink for the control loop.
#[allow(async_fn_in_trait)]
pub trait Indicator {
    async fn show(&mut self, event: IndicatorEvent);

    /// Played by the link manager after a round of polls failed.
    async fn link_retry(&mut self);
}

/// Indicator that shows nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullIndicator;

impl Indicator for NullIndicator {
    async fn show(&mut self, _event: IndicatorEvent) {}

    async fn link_retry(&mut self) {}
}

/// Single LED driven through blink patterns.
pub struct LedIndicator<P, D> {
    pin: P,
    delay: D,
    current: IndicatorEvent,
}

impl<P, D> LedIndicator<P, D>
where
    P: OutputPin<Error = Infallible>,
    D: DelayOps,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            current: IndicatorEvent::Idle,
        }
    }

    pub fn current(&self) -> IndicatorEvent {
        self.current
    }

    pub fn release(self) -> P {
        self.pin
    }

    async fn play(&mut self, pattern: BlinkPattern) {
        for _ in 0..pattern.repeat {
            let _ = self.pin.set_high();
            self.delay.delay_ms(u32::from(pattern.on_ms)).await;
            let _ = self.pin.set_low();
            if pattern.off_ms > 0 {
                self.delay.delay_ms(u32::from(pattern.off_ms)).await;
            }
        }
    }
}

impl<P, D> Indicator for LedIndicator<P, D>
where
    P: OutputPin<Error = Infallible>,
    D: DelayOps,
{
    async fn show(&mut self, event: IndicatorEvent) {
        self.current = event;
        match event {
            IndicatorEvent::Idle => {
                let _ = self.pin.set_low();
            }
            IndicatorEvent::LinkUp => self.play(BlinkPattern::LINK_UP).await,
            IndicatorEvent::ProbeOk => self.play(BlinkPattern::PROBE_OK).await,
            // A miss is already visible as the missing probe-ok flash.
            IndicatorEvent::ProbeFail => {}
            IndicatorEvent::Fault => self.play(BlinkPattern::FAULT).await,
        }
    }

    async fn link_retry(&mut self) {
        self.play(BlinkPattern::LINK_RETRY).await;
    }
}
