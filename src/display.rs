use crate::hal;
use hal::pac::{PORTA, PORTC};

/// Segment patterns for the digits 0 to 9.
///
/// Bit n drives segment n of the common cathode display; bit 7 is the
/// decimal point and stays dark.
const SEVEN_SEG: [u8; 10] = [63, 6, 91, 79, 102, 109, 125, 7, 127, 111];

/// The side of the two-digit display driven by the next refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Right,
    Left,
}

impl Side {
    fn other(self) -> Self {
        match self {
            Side::Right => Side::Left,
            Side::Left => Side::Right,
        }
    }
}

/// Segment pattern for one side of `value`.
///
/// The ones digit shows on the right, the tens digit on the left. Values
/// past 99 wrap through the digit arithmetic, so the table is never indexed
/// out of range.
fn pattern(value: u8, side: Side) -> u8 {
    let digit = match side {
        Side::Right => value % 10,
        Side::Left => value / 10 % 10,
    };
    SEVEN_SEG[usize::from(digit)]
}

/// Alternation state of the multiplexer, kept apart from the port writes.
struct Mux {
    side: Side,
}

impl Mux {
    const fn new() -> Self {
        Self { side: Side::Right }
    }

    /// Pattern and select level for this refresh, switching sides for the
    /// next one.
    fn step(&mut self, value: u8) -> (u8, Side) {
        let side = self.side;
        self.side = side.other();
        (pattern(value, side), side)
    }
}

/// Two-digit seven segment display with its segment bus on PORTA and the
/// digit select line on PC0.
pub struct Display {
    segments: PORTA,
    select: PORTC,
    mux: Mux,
}

impl Display {
    /// Take over the display ports and configure them as outputs.
    #[must_use]
    pub fn new(segments: PORTA, select: PORTC) -> Self {
        // The whole of PORTA drives the segment lines.
        segments.ddra.write(|w| w.bits(0xFF));
        // PC0 picks the digit that sinks current.
        select.ddrc.write(|w| w.pc0().set_bit());

        Self {
            segments,
            select,
            mux: Mux::new(),
        }
    }

    /// Drive one digit of `value` and move to the other side.
    ///
    /// Called once per timer tick; alternating at that rate is fast enough
    /// for both digits to appear lit.
    pub fn refresh(&mut self, value: u8) {
        let (pattern, side) = self.mux.step(value);

        self.segments.porta.write(|w| w.bits(pattern));
        self.select.portc.modify(|_, w| w.pc0().bit(side == Side::Left));
    }
}

#[cfg(test)]
mod tests {
    use super::{pattern, Mux, Side, SEVEN_SEG};

    #[test]
    fn decode_table_matches_the_wiring() {
        assert_eq!(SEVEN_SEG, [63, 6, 91, 79, 102, 109, 125, 7, 127, 111]);
        assert_eq!(pattern(0, Side::Right), 63);
        assert_eq!(pattern(1, Side::Right), 6);
        assert_eq!(pattern(5, Side::Right), 109);
        assert_eq!(pattern(9, Side::Right), 111);
    }

    #[test]
    fn ones_digit_first_then_tens_then_back() {
        for value in 0..=99u8 {
            let mut mux = Mux::new();

            let (first, side) = mux.step(value);
            assert_eq!(first, SEVEN_SEG[usize::from(value % 10)]);
            assert_eq!(side, Side::Right);

            let (second, side) = mux.step(value);
            assert_eq!(second, SEVEN_SEG[usize::from(value / 10)]);
            assert_eq!(side, Side::Left);

            // A full two-call cycle lands back on the right digit.
            assert_eq!(mux.side, Side::Right);
        }
    }

    #[test]
    fn values_past_the_display_range_wrap() {
        let mut mux = Mux::new();
        let (ones, _) = mux.step(123);
        let (tens, _) = mux.step(123);
        assert_eq!(ones, SEVEN_SEG[3]);
        assert_eq!(tens, SEVEN_SEG[2]);
    }
}
