use crate::constants::{EEG_POWER_BANDS, NO_CONTACT_SIGNAL_QUALITY};
use std::ops::Index;
use strum_macros::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// EEG frequency bands, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(usize)]
pub enum EegBand {
    #[strum(to_string = "Delta")]
    Delta = 0,
    #[strum(to_string = "Theta")]
    Theta = 1,
    #[strum(to_string = "Low Alpha")]
    LowAlpha = 2,
    #[strum(to_string = "High Alpha")]
    HighAlpha = 3,
    #[strum(to_string = "Low Beta")]
    LowBeta = 4,
    #[strum(to_string = "High Beta")]
    HighBeta = 5,
    #[strum(to_string = "Low Gamma")]
    LowGamma = 6,
    #[strum(to_string = "Mid Gamma")]
    MidGamma = 7,
}

impl EegBand {
    pub const ALL: [EegBand; EEG_POWER_BANDS] = [
        EegBand::Delta,
        EegBand::Theta,
        EegBand::LowAlpha,
        EegBand::HighAlpha,
        EegBand::LowBeta,
        EegBand::HighBeta,
        EegBand::LowGamma,
        EegBand::MidGamma,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Relative band powers from a single `0x83` field. Each value fits in 24 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EegPower([u32; EEG_POWER_BANDS]);

impl EegPower {
    pub fn new(values: [u32; EEG_POWER_BANDS]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[u32; EEG_POWER_BANDS] {
        &self.0
    }

    pub fn get(&self, band: EegBand) -> u32 {
        self.0[band.index()]
    }

    /// Bands paired with their values, in wire order
    pub fn iter(&self) -> impl Iterator<Item = (EegBand, u32)> + '_ {
        EegBand::ALL.iter().map(move |&band| (band, self.get(band)))
    }

    pub fn delta(&self) -> u32 {
        self.get(EegBand::Delta)
    }

    pub fn theta(&self) -> u32 {
        self.get(EegBand::Theta)
    }

    pub fn low_alpha(&self) -> u32 {
        self.get(EegBand::LowAlpha)
    }

    pub fn high_alpha(&self) -> u32 {
        self.get(EegBand::HighAlpha)
    }

    pub fn low_beta(&self) -> u32 {
        self.get(EegBand::LowBeta)
    }

    pub fn high_beta(&self) -> u32 {
        self.get(EegBand::HighBeta)
    }

    pub fn low_gamma(&self) -> u32 {
        self.get(EegBand::LowGamma)
    }

    pub fn mid_gamma(&self) -> u32 {
        self.get(EegBand::MidGamma)
    }
}

impl Index<EegBand> for EegPower {
    type Output = u32;

    fn index(&self, band: EegBand) -> &u32 {
        &self.0[band.index()]
    }
}

/// Latest decoded sample from the headset.
///
/// Scalar fields keep their previous value until a packet carries them again.
/// `eeg_power` is cleared at the start of every decode and only meaningful
/// while `has_power` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodedReading {
    pub signal_quality: u8,
    pub attention: u8,
    pub meditation: u8,
    pub eeg_power: EegPower,
    pub has_power: bool,
}

impl Default for DecodedReading {
    fn default() -> Self {
        Self {
            signal_quality: NO_CONTACT_SIGNAL_QUALITY,
            attention: 0,
            meditation: 0,
            eeg_power: EegPower::default(),
            has_power: false,
        }
    }
}

impl DecodedReading {
    /// Band powers, if the most recent packet carried them
    pub fn power(&self) -> Option<&EegPower> {
        self.has_power.then_some(&self.eeg_power)
    }

    /// Whether the headset reports any electrode contact at all
    pub fn has_contact(&self) -> bool {
        self.signal_quality < NO_CONTACT_SIGNAL_QUALITY
    }

    pub(crate) fn clear_power(&mut self) {
        self.eeg_power = EegPower::default();
        self.has_power = false;
    }
}
