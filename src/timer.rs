use crate::{clock::BoardClock, clock::Clock, clock::TICK_RATE, hal};

/// Clock prescale factor for the tick timer.
const PRESCALE: u32 = 64;

/// Output compare threshold, one less than the counts per tick.
const COMPARE_MAX: u8 = (BoardClock::FREQ / PRESCALE / TICK_RATE - 1) as u8;

/// A millisecond timer using the `TC0` peripheral.
///
/// Triggers `TIMER0_COMPA` interrupt.
pub struct Timer;

impl Timer {
    /// Create a new timer instance.
    ///
    /// The created timer is running with 1 millisecond period. The counter
    /// clears itself on every compare match, so once started it needs no
    /// further attention. The compare interrupt only fires after interrupts
    /// are enabled globally, which is left to the caller.
    pub fn new(p: hal::pac::TC0) -> Self {
        // Clear the counter and set the compare value.
        // 8 MHz / 64 = 125 counts per millisecond, so compare at 124.
        p.tcnt0.write(|w| w.bits(0));
        p.ocr0a.write(|w| w.bits(COMPARE_MAX));

        // CTC mode with the clock divided by 64. This starts the timer.
        p.tccr0a.write(|w| w.wgm0().ctc());
        p.tccr0b.write(|w| w.cs0().prescale_64());

        // Enable the compare match interrupt and clear any stale flag
        // (the flag clears by writing a one to it).
        p.timsk0.write(|w| w.ocie0a().set_bit());
        p.tifr0.write(|w| w.ocf0a().set_bit());

        Self {}
    }
}

#[cfg(test)]
mod tests {
    use super::COMPARE_MAX;

    #[test]
    fn compare_threshold_gives_one_millisecond() {
        // 125 counts of the 125 kHz prescaled clock is exactly 1 ms.
        assert_eq!(COMPARE_MAX, 124);
    }
}
