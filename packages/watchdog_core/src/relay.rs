use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use log::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayCommand {
    Energize,
    DeEnergize,
}

impl RelayCommand {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Energize => "energize",
            Self::DeEnergize => "de_energize",
        }
    }
}

/// Which line level energizes the relay coil.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelayPolarity {
    ActiveHigh,
    ActiveLow,
}

impl RelayPolarity {
    pub const fn from_active_low(active_low: bool) -> Self {
        if active_low {
            Self::ActiveLow
        } else {
            Self::ActiveHigh
        }
    }

    pub const fn line_high_for(self, command: RelayCommand) -> bool {
        matches!(
            (self, command),
            (Self::ActiveHigh, RelayCommand::Energize) | (Self::ActiveLow, RelayCommand::DeEnergize)
        )
    }
}

pub struct RelayOutput<P> {
    pin: P,
    polarity: RelayPolarity,
    commanded: Option<RelayCommand>,
}

impl<P> RelayOutput<P>
where
    P: OutputPin<Error = Infallible>,
{
    /// Takes ownership of the pin without driving it.
    pub fn new(pin: P, polarity: RelayPolarity) -> Self {
        Self {
            pin,
            polarity,
            commanded: None,
        }
    }

    pub fn energize(&mut self) {
        self.apply(RelayCommand::Energize);
    }

    pub fn de_energize(&mut self) {
        self.apply(RelayCommand::DeEnergize);
    }

    /// Drives the line on every call; returns whether the logical state changed.
    pub fn apply(&mut self, command: RelayCommand) -> bool {
        let _ = if self.polarity.line_high_for(command) {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };

        if self.commanded == Some(command) {
            return false;
        }
        self.commanded = Some(command);
        info!("relay: {}", command.as_str());
        true
    }

    pub fn commanded(&self) -> Option<RelayCommand> {
        self.commanded
    }

    pub fn release(self) -> P {
        self.pin
    }
}
