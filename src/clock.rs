use crate::hal;

pub use hal::clock::Clock;

/// Board clock rate.
pub type BoardClock = hal::clock::MHz8;

/// Timer ticks per second, i.e. one tick every millisecond.
pub const TICK_RATE: u32 = 1000;
