use core::convert::Infallible;

use crate::clock::BoardClock;
use crate::hal;

/// Wrapper around USART0 that can be used for output formatting.
///
/// The port lives on the fixed-function RXD0/TXD0 pins (PD0/PD1).
pub struct Usart0 {
    p: hal::pac::USART0,
}

type Baudrate = avr_hal_generic::usart::Baudrate<BoardClock>;

impl Usart0 {
    /// Create new instance from raw hardware, running 8N1 at `baudrate`.
    #[must_use]
    pub fn new(p: hal::pac::USART0, baudrate: u32) -> Self {
        let baudrate = Baudrate::new(baudrate);
        p.ubrr0.write(|w| w.bits(baudrate.ubrr));
        p.ucsr0a.write(|w| w.u2x0().bit(baudrate.u2x));

        // Enable receiver and transmitter.
        p.ucsr0b.write(|w| w.txen0().set_bit().rxen0().set_bit());

        Self { p }
    }

    fn write_byte(&mut self, b: u8) {
        while self.p.ucsr0a.read().udre0().bit_is_clear() {}

        self.p.udr0.write(|w| w.bits(b));
    }
}

impl ufmt::uWrite for Usart0 {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for b in s.bytes() {
            self.write_byte(b);
        }
        Ok(())
    }
}
