#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use avr_device::interrupt::{self, CriticalSection, Mutex};
use core::cell::{Cell, UnsafeCell};
use panic_halt as _;

use snake_board::{delay::Delay, display::Display, hal, ticks, timer::Timer, usart::Usart0};

use hal::prelude::*;

/// UART baud rate.
const BAUDRATE: u32 = 9600;

/// Length of a freshly spawned snake.
const START_LENGTH: u8 = 2;

/// How often the stand-in game logic grows the snake (ms).
const GROW_PERIOD: u32 = 500;

/// How often a report goes out over the serial port (ms).
const REPORT_PERIOD: u32 = 1000;

/// Current snake length. The game logic updates it; the timer interrupt
/// only reads it to drive the display.
static SNAKE_LENGTH: Mutex<Cell<u8>> = Mutex::new(Cell::new(START_LENGTH));

/// Display hardware, handed over to the timer interrupt at startup.
static DISPLAY: Mutex<UnsafeCell<Option<Display>>> = Mutex::new(UnsafeCell::new(None));

/// TIMER0 compare interrupt.
/// This interrupt is called every time TCNT0 reaches OCR0A and is reset back
/// to 0 (CTC mode). TIMER0 is set up so this happens once a millisecond.
#[avr_device::interrupt(atmega1284p)]
fn TIMER0_COMPA() {
    // SAFETY: We are inside a blocking interrupt.
    let cs = unsafe { CriticalSection::new() };

    ticks::advance(cs);

    let length = SNAKE_LENGTH.borrow(cs).get();

    // SAFETY: DISPLAY is written once in main before interrupts are enabled
    // and is exclusively used here afterwards.
    let display = unsafe { DISPLAY.borrow(cs).get().as_mut().unwrap() };
    if let Some(display) = display {
        display.refresh(length);
    }
}

#[hal::entry]
fn main() -> ! {
    let dp = hal::Peripherals::take().unwrap();

    let mut serial = Usart0::new(dp.USART0, BAUDRATE);

    let mut display = Display::new(dp.PORTA, dp.PORTC);
    let _timer = Timer::new(dp.TC0);

    // Power on check: 88 lights every segment, one side at a time.
    display.refresh(88);
    Delay::new().delay_ms(250u16);
    display.refresh(88);
    Delay::new().delay_ms(250u16);

    interrupt::free(|cs| {
        ticks::reset(cs);

        // SAFETY: interrupts are still off, nothing else can hold the cell.
        unsafe { *DISPLAY.borrow(cs).get() = Some(display) };
    });

    // Enable interrupts.
    unsafe {
        // SAFETY: Not inside a critical section and any non-atomic operations have been completed
        // at this point.
        avr_device::interrupt::enable();
    }

    let mut next_grow = GROW_PERIOD;
    let mut next_report = REPORT_PERIOD;

    loop {
        // Set sleep mode to IDLE and enable sleep.
        dp.CPU.smcr.modify(|_, w| w.sm().idle().se().set_bit());
        // Go to sleep until the next interrupt.
        avr_device::asm::sleep();
        // Disable sleep so we don't accidentally go to sleep.
        dp.CPU.smcr.modify(|_, w| w.se().clear_bit());

        let now = ticks::millis();

        // Stand-in for the game logic: grow the snake every half second,
        // starting over once the display range runs out.
        if now >= next_grow {
            next_grow += GROW_PERIOD;

            interrupt::free(|cs| {
                let length = SNAKE_LENGTH.borrow(cs);
                length.set(if length.get() >= 99 {
                    START_LENGTH
                } else {
                    length.get() + 1
                });
            });
        }

        if now >= next_report {
            next_report += REPORT_PERIOD;

            let length = interrupt::free(|cs| SNAKE_LENGTH.borrow(cs).get());
            ufmt::uwrite!(&mut serial, "MS, {}, LEN, {}\r\n", now, length).unwrap();
        }
    }
}
