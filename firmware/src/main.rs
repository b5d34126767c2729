#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// Panic handler
use panic_halt as _;

use embassy_executor::Spawner;
use heapless::spsc::Queue;
use static_cell::StaticCell;

use irtap_firmware::*;

// Static resources
static EDGE_EVENTS: EdgeEvents = EdgeEvents::new();
static LATCH: DecodedLatch = DecodedLatch::new();
static CLOCK: TickClock = TickClock::new();
static ACTION_QUEUE: StaticCell<Queue<Action, ACTION_QUEUE_SIZE>> = StaticCell::new();
static SERIAL: StaticCell<MockSerialPort> = StaticCell::new();
static DISPLAY: StaticCell<MockOledDisplay> = StaticCell::new();

/// Main firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    #[cfg(feature = "defmt")]
    defmt::info!("IR text entry firmware starting (core {})", VERSION);

    // Until a board HAL lands, hardware is mocked; edge events reach the
    // decoder through EDGE_EVENTS either way.
    let config = default_config();
    #[cfg(feature = "defmt")]
    defmt::info!(
        "config: debounce {}ms, repeat window {}ms, tick {}ms",
        config.debounce_ms,
        config.repeat_window_ms,
        config.tick_period_ms
    );

    let queue = ACTION_QUEUE.init(Queue::new());
    let (producer, consumer) = queue.split();

    let serial = SERIAL.init(MockSerialPort::new());
    let display = DISPLAY.init(MockOledDisplay::new());

    spawner.must_spawn(receiver_task(&EDGE_EVENTS, &LATCH, config));
    spawner.must_spawn(tick_task(&CLOCK, config.tick_period_ms));
    spawner.must_spawn(entry_task(&LATCH, &CLOCK, producer, config));
    spawner.must_spawn(io_task(consumer, serial, display));

    #[cfg(feature = "defmt")]
    defmt::info!("text entry ready");

    // Main supervision loop
    loop {
        embassy_time::Timer::after(Duration::from_secs(1)).await;
        #[cfg(feature = "defmt")]
        defmt::trace!("heartbeat");
    }
}
