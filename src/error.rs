use core::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum Hx711Error<GpioError> {
    Gpio(GpioError),
    /// DOUT stayed high for the whole readiness timeout.
    DeviceNotReady,
    /// Selection code outside 1, 2, 3.
    InvalidMode(u8),
}

impl<GpioError: fmt::Debug> fmt::Display for Hx711Error<GpioError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hx711Error::Gpio(e) => write!(f, "GPIO error: {:?}", e),
            Hx711Error::DeviceNotReady => write!(f, "HX711 did not become ready in time"),
            Hx711Error::InvalidMode(code) => write!(
                f,
                "invalid selection code {} (expected 1 = A/128, 3 = A/64, 2 = B/32)",
                code
            ),
        }
    }
}

#[cfg(feature = "std")]
impl<GpioError: fmt::Debug> std::error::Error for Hx711Error<GpioError> {}
