//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};
use pinetime_motd::ui::BatteryInfo;

pub struct BatteryStatus<'a> {
    /// Pin P0.12: High = battery, Low = charging
    pin_charge_indication: Input<'a, P0_12>,

    /// Saadc instance, channel 0 on P0.31
    saadc: Saadc<'a, 1>,

    /// Charging state
    charging: bool,

    /// Battery voltage in millivolts
    voltage: u16,
}

impl<'a> BatteryStatus<'a> {
    /// Initialize battery status
    pub async fn init(
        pin_charge_indication: Input<'a, P0_12>,
        saadc: Saadc<'a, 1>,
    ) -> Result<Self, Error> {
        let mut battery = Self {
            pin_charge_indication,
            saadc,
            charging: false,
            voltage: 0,
        };

        // Get initial state
        battery.charging = battery.pin_charge_indication.is_low();
        battery.voltage = battery.sample_voltage().await?;

        Ok(battery)
    }

    /// Return current state of the battery.
    ///
    /// This returns the stored value. To fetch current data, call `update()` first.
    pub fn info(&self) -> BatteryInfo {
        BatteryInfo {
            percent: self.percent(),
            charging: self.is_charging(),
        }
    }

    /// Return whether the watch is currently charging.
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Return the current battery charge in percent (0–100).
    pub fn percent(&self) -> u8 {
        // Use fixed data points and linear interpolation in between
        // to estimate battery capacity.
        (match self.voltage {
            0..=3449 => 0,
            3450..=3699 => (self.voltage - 3450) / 5,
            3700..=4199 => 50 + (self.voltage - 3700) / 10,
            _ => 100,
        }) as u8
    }

    /// Return the current battery voltage in millivolts.
    pub fn voltage(&self) -> u16 {
        self.voltage
    }

    /// Update the current battery status by reading information from the
    /// hardware. Return whether the charging state or percentage changed.
    pub async fn update(&mut self) -> Result<bool, Error> {
        let before = self.info();

        self.charging = self.pin_charge_indication.is_low();
        self.voltage = self.sample_voltage().await?;

        Ok(self.info() != before)
    }

    async fn sample_voltage(&mut self) -> Result<u16, Error> {
        let mut buf = [0; 1];
        self.saadc.sample(&mut buf).await;
        Self::convert_adc_measurement(buf[0])
    }

    /// Convert a 12 bit ADC measurement into a battery voltage in millivolts.
    fn convert_adc_measurement(raw_measurement: i16) -> Result<u16, Error> {
        match raw_measurement {
            0..=4095 => {
                // Keep as 32 bit for multiplication
                let adc_val = raw_measurement as u32;
                // Multiply by 2 * 1000 for mV and divide by (2 ^ 12 / 3.3V reference)
                Ok((adc_val * 2000 / 1241) as u16)
            }
            _ => Err(Error::InvalidMeasurement(raw_measurement)),
        }
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    InvalidMeasurement(i16),
}
