use avr_device::interrupt::{self, CriticalSection, Mutex};
use core::cell::Cell;

/// Free-running millisecond counter.
///
/// Incremented once per timer compare match, from interrupt context only.
/// Wraps around after about 49 days.
struct Ticks {
    count: Cell<u32>,
}

impl Ticks {
    const fn new() -> Self {
        Self {
            count: Cell::new(0),
        }
    }

    fn advance(&self) {
        self.count.set(self.count.get().wrapping_add(1));
    }

    fn get(&self) -> u32 {
        self.count.get()
    }

    fn reset(&self) {
        self.count.set(0);
    }
}

static CLOCK_TICKS: Mutex<Ticks> = Mutex::new(Ticks::new());

/// Restart the count from zero.
///
/// Done while the timer is being set up, before interrupts are enabled.
pub fn reset(cs: CriticalSection) {
    CLOCK_TICKS.borrow(cs).reset();
}

/// Count one compare match event.
///
/// Called from the timer interrupt and nowhere else.
pub fn advance(cs: CriticalSection) {
    CLOCK_TICKS.borrow(cs).advance();
}

/// Milliseconds since the timer was armed.
///
/// The count is wider than anything the CPU can load in one instruction, so
/// the read runs with interrupts masked to keep the increment from landing
/// between two halves of it. The previous interrupt enable state is restored
/// on the way out, whatever it was.
pub fn millis() -> u32 {
    interrupt::free(|cs| CLOCK_TICKS.borrow(cs).get())
}

#[cfg(test)]
mod tests {
    use super::Ticks;
    use core::cell::Cell;

    #[test]
    fn counts_one_per_compare_match() {
        let ticks = Ticks::new();
        assert_eq!(ticks.get(), 0);

        for _ in 0..1000 {
            ticks.advance();
        }
        assert_eq!(ticks.get(), 1000);
    }

    #[test]
    fn never_decreases_between_reads() {
        let ticks = Ticks::new();
        let mut last = ticks.get();

        for _ in 0..100 {
            ticks.advance();
            let now = ticks.get();
            assert!(now > last);
            last = now;
        }
    }

    #[test]
    fn wraps_silently_at_u32_max() {
        let ticks = Ticks {
            count: Cell::new(u32::MAX),
        };
        ticks.advance();
        assert_eq!(ticks.get(), 0);
    }

    #[test]
    fn reset_starts_over() {
        let ticks = Ticks::new();
        ticks.advance();
        ticks.advance();
        ticks.reset();
        assert_eq!(ticks.get(), 0);
    }
}
