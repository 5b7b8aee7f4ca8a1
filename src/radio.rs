//! Radio bring-up.
//!
//! The transmitter chip's register programming, SPI transport and reset/busy
//! handshaking belong to a radio driver crate. This module only names the two
//! calls the core needs from it, through the [`RadioControl`] trait, and
//! sequences them in [`bring_up`]:
//!
//! 1. configure the chip for an unmodulated carrier (FSK with zero deviation)
//! 2. switch it to direct mode, where the data pin keys the carrier
//!
//! Both happen exactly once, before the scheduler starts. Any failure is
//! fatal: the application should report the code and exit with
//! [`Error::exit_code`].

use crate::consts::{
    RADIO_BIT_RATE_KBPS, RADIO_CARRIER_MHZ, RADIO_FREQ_DEVIATION_KHZ, RADIO_POWER_DBM,
    RADIO_PREAMBLE_BITS, RADIO_RX_BANDWIDTH_KHZ, RADIO_TCXO_VOLTAGE,
};
use crate::error::{Error, RadioError};

/// Parameters handed to the radio driver at start-up.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct RadioConfig {
    /// Carrier frequency, in MHz.
    pub carrier_freq_mhz: f32,
    /// FSK bit rate used while configuring, in kbit/s.
    pub bit_rate_kbps: f32,
    /// Frequency deviation, in kHz.
    pub freq_deviation_khz: f32,
    /// Receiver bandwidth, in kHz.
    pub rx_bandwidth_khz: f32,
    /// Output power, in dBm.
    pub power_dbm: i8,
    /// Preamble length, in bits.
    pub preamble_length_bits: u16,
    /// TCXO reference voltage; 0.0 when the board has no TCXO.
    pub tcxo_voltage: f32,
    /// Use the LDO instead of the DC-DC regulator.
    pub use_ldo: bool,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            carrier_freq_mhz: RADIO_CARRIER_MHZ,
            bit_rate_kbps: RADIO_BIT_RATE_KBPS,
            freq_deviation_khz: RADIO_FREQ_DEVIATION_KHZ,
            rx_bandwidth_khz: RADIO_RX_BANDWIDTH_KHZ,
            power_dbm: RADIO_POWER_DBM,
            preamble_length_bits: RADIO_PREAMBLE_BITS,
            tcxo_voltage: RADIO_TCXO_VOLTAGE,
            use_ldo: false,
        }
    }
}

impl RadioConfig {
    /// Rejects values no radio driver could act on.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.carrier_freq_mhz.is_finite() && self.carrier_freq_mhz > 0.0) {
            return Err(Error::InvalidConfig("carrier_freq_mhz must be positive"));
        }
        if !(self.bit_rate_kbps.is_finite() && self.bit_rate_kbps > 0.0) {
            return Err(Error::InvalidConfig("bit_rate_kbps must be positive"));
        }
        if !(self.freq_deviation_khz.is_finite() && self.freq_deviation_khz >= 0.0) {
            return Err(Error::InvalidConfig("freq_deviation_khz must not be negative"));
        }
        if !(self.rx_bandwidth_khz.is_finite() && self.rx_bandwidth_khz > 0.0) {
            return Err(Error::InvalidConfig("rx_bandwidth_khz must be positive"));
        }
        if !(self.tcxo_voltage.is_finite() && self.tcxo_voltage >= 0.0) {
            return Err(Error::InvalidConfig("tcxo_voltage must not be negative"));
        }
        Ok(())
    }
}

/// The two radio-driver operations the transmitter depends on.
///
/// Implement this for your radio driver (e.g. an SX126x over SPI).
pub trait RadioControl {
    /// Programs carrier, rates, power and regulator settings.
    fn configure(&mut self, config: &RadioConfig) -> Result<(), RadioError>;

    /// Switches the chip to direct mode so its data pin keys the carrier.
    fn enable_direct_output(&mut self) -> Result<(), RadioError>;
}

/// Validates `config`, configures the radio, and enables direct output.
///
/// Call once before starting the scheduler.
///
/// # Errors
/// - [`Error::InvalidConfig`] if `config` does not validate; the radio is not touched
/// - [`Error::Radio`] with the driver's code if either call fails
pub fn bring_up<R: RadioControl>(radio: &mut R, config: &RadioConfig) -> Result<(), Error> {
    config.validate()?;

    info!("radio: configuring for {} MHz", config.carrier_freq_mhz);
    radio.configure(config).map_err(|e| {
        error!("radio: configure failed, code {}", e.code);
        e
    })?;

    radio.enable_direct_output().map_err(|e| {
        error!("radio: direct output failed, code {}", e.code);
        e
    })?;
    info!("radio: direct output enabled");
    Ok(())
}
