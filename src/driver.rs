use core::fmt;

use crate::constants::*;
use crate::error::Hx711Error;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

/// HX711 driver
///
/// Owns the DOUT and PD_SCK pins. The stored selection and the one latched
/// in the chip are kept in step: every method that clocks a conversion out
/// also sends the selection's trailing pulses.
pub struct Hx711<DOUT, PDSCK, DELAY> {
    dout: DOUT,
    pd_sck: PDSCK,
    delay: DELAY,
    selection: Selection,
}

impl<DOUT, PDSCK, DELAY, GpioError> Hx711<DOUT, PDSCK, DELAY>
where
    DOUT: InputPin<Error = GpioError>,
    PDSCK: OutputPin<Error = GpioError>,
    DELAY: DelayNs,
{
    /// Creates a new HX711 driver and programs `selection` into the chip.
    ///
    /// PD_SCK is driven low first, which wakes the chip if it was asleep.
    /// Programming the selection waits for a conversion, so this can fail
    /// with [`Hx711Error::DeviceNotReady`].
    pub fn new(
        dout: DOUT,
        pd_sck: PDSCK,
        delay: DELAY,
        selection: Selection,
    ) -> Result<Self, Hx711Error<GpioError>> {
        let mut hx711 = Hx711 {
            dout,
            pd_sck,
            delay,
            selection,
        };
        hx711.pd_sck.set_low().map_err(Hx711Error::Gpio)?;
        hx711.set_selection(selection)?;
        Ok(hx711)
    }

    /// Gives back the pins and the delay provider.
    pub fn release(self) -> (DOUT, PDSCK, DELAY) {
        (self.dout, self.pd_sck, self.delay)
    }

    /// DOUT low means a conversion is ready to be shifted out.
    pub fn is_ready(&mut self) -> Result<bool, Hx711Error<GpioError>> {
        self.dout.is_low().map_err(Hx711Error::Gpio)
    }

    /// Polls DOUT until the chip is ready or the timeout runs out
    fn wait_ready(&mut self) -> Result<(), Hx711Error<GpioError>> {
        let mut waited_us = 0;
        while !self.is_ready()? {
            if waited_us >= READY_TIMEOUT_US {
                log::error!("HX711 not ready after {} us", waited_us);
                return Err(Hx711Error::DeviceNotReady);
            }
            self.delay.delay_us(READY_POLL_US);
            waited_us += READY_POLL_US;
        }
        Ok(())
    }

    /// One PD_SCK pulse. Returns the DOUT level sampled while the clock is high.
    fn pulse(&mut self) -> Result<bool, Hx711Error<GpioError>> {
        self.pd_sck.set_high().map_err(Hx711Error::Gpio)?;
        self.delay.delay_ns(PULSE_WIDTH_NS);
        let bit = self.dout.is_high().map_err(Hx711Error::Gpio)?;
        self.pd_sck.set_low().map_err(Hx711Error::Gpio)?;
        self.delay.delay_ns(PULSE_WIDTH_NS);
        Ok(bit)
    }

    /// Sends the trailing pulses that latch the stored selection
    fn send_selection_pulses(&mut self) -> Result<(), Hx711Error<GpioError>> {
        for _ in 0..self.selection.pulses() {
            self.pulse()?;
        }
        Ok(())
    }

    /// Current selection
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Current input as `(label, gain)`, e.g. `("A", 128)`.
    pub fn channel(&self) -> (&'static str, u8) {
        (self.selection.label(), self.selection.gain())
    }

    /// Stores `selection` and programs it into the chip.
    ///
    /// Waits for a conversion, clocks the whole 24-bit result through and
    /// then sends the selection's pulses, so the next conversion uses it.
    pub fn set_selection(&mut self, selection: Selection) -> Result<(), Hx711Error<GpioError>> {
        self.selection = selection;

        if !self.is_ready()? {
            self.wait_ready()?;
        }

        for _ in 0..DATA_BITS {
            self.pulse()?;
        }
        self.send_selection_pulses()?;

        log::debug!("HX711 set to {}", selection);
        Ok(())
    }

    /// Like [`set_selection`](Self::set_selection), from a raw pulse code
    /// (1 = A/128, 3 = A/64, 2 = B/32).
    ///
    /// Unknown codes fail with [`Hx711Error::InvalidMode`] before any pin
    /// is touched and leave the stored selection as it was.
    pub fn set_selection_code(&mut self, code: u8) -> Result<(), Hx711Error<GpioError>> {
        let selection = Selection::from_pulses(code).ok_or(Hx711Error::InvalidMode(code))?;
        self.set_selection(selection)
    }

    /// Reads the next conversion as the raw 24-bit code.
    pub fn read_raw(&mut self) -> Result<u32, Hx711Error<GpioError>> {
        if !self.is_ready()? {
            self.wait_ready()?;
        }

        let mut raw = 0u32;
        for _ in 0..DATA_BITS {
            // msb first
            raw = (raw << 1) | u32::from(self.pulse()?);
        }
        self.send_selection_pulses()?;

        log::debug!("Raw data: {:06X}", raw);
        Ok(raw)
    }

    /// Reads the next conversion as a signed value in
    /// `-0x800000..=0x7FFFFF`.
    pub fn read(&mut self) -> Result<i32, Hx711Error<GpioError>> {
        let raw = self.read_raw()?;
        Ok(convert_from_twos_complement(raw))
    }

    /// Puts the chip to sleep by holding PD_SCK high for longer than 60 us.
    pub fn power_off(&mut self) -> Result<(), Hx711Error<GpioError>> {
        self.pd_sck.set_low().map_err(Hx711Error::Gpio)?;
        self.pd_sck.set_high().map_err(Hx711Error::Gpio)?;
        self.delay.delay_us(SLEEP_DELAY_US);
        log::debug!("HX711 powered down");
        Ok(())
    }

    /// Wakes the chip and programs the stored selection again.
    ///
    /// The chip comes out of reset on channel A, gain 128, so the stored
    /// selection is always resent, even when it is A/128.
    pub fn power_on(&mut self) -> Result<(), Hx711Error<GpioError>> {
        self.pd_sck.set_low().map_err(Hx711Error::Gpio)?;
        log::debug!("HX711 powered up");
        self.set_selection(self.selection)
    }
}

impl<DOUT, PDSCK, DELAY> fmt::Display for Hx711<DOUT, PDSCK, DELAY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HX711 on {}", self.selection)
    }
}

/// Interprets a 24-bit code as two's complement.
///
/// Bits above bit 23 are ignored.
pub fn convert_from_twos_complement(raw: u32) -> i32 {
    let raw = (raw & 0xFF_FFFF) as i32;
    if raw & (1 << (DATA_BITS - 1)) != 0 {
        raw - (1 << DATA_BITS)
    } else {
        raw
    }
}
