#![no_std]

//! Firmware library exposing mock hardware and tasks for testing

pub use embassy_executor::Spawner;
pub use embassy_time::Duration;
pub use heapless::spsc::Queue;
pub use static_cell::StaticCell;

pub use tap_core::*;

// Re-export hardware implementations
pub use crate::mock_hardware::*;
pub use crate::tasks::*;

// Mock hardware module
pub mod mock_hardware {
    use tap_core::hal::{HalError, MessageDisplay, SerialLink};
    use tap_core::types::Edge;

    use crate::tasks::EdgeEvents;

    /// Display row showing text received over the link
    pub const RECEIVED_ROW: u8 = 0;

    /// Display row showing the in-progress message
    pub const MESSAGE_ROW: u8 = 1;

    /// Feed one classified edge from the receiver-pin interrupt
    ///
    /// A full channel drops the edge; the decoder recovers through the
    /// short-start guard on the next transmission.
    pub fn inject_edge(events: &EdgeEvents, edge: Edge) {
        events.try_send(edge).ok();
    }

    /// Receiver-pin interrupt handler (to be connected to the actual EXTI
    /// handler)
    pub fn handle_receiver_interrupt() {
        // In a real implementation, this would:
        // 1. Clear the pending edge interrupt flag
        // 2. Classify the edge from the pin level via EdgeInput
        // 3. inject_edge(&EDGE_EVENTS, edge)
    }

    /// Mock serial port implementation
    #[derive(Debug)]
    pub struct MockSerialPort {
        sent: heapless::Vec<u8, 128>,
        rx: heapless::Deque<u8, 64>,
    }

    impl MockSerialPort {
        pub fn new() -> Self {
            #[cfg(feature = "defmt")]
            defmt::info!("using mock serial port (for testing)");
            Self {
                sent: heapless::Vec::new(),
                rx: heapless::Deque::new(),
            }
        }

        /// Queue bytes as if they arrived from the far end
        pub fn feed(&mut self, bytes: &[u8]) {
            for &b in bytes {
                self.rx.push_back(b).ok();
            }
        }

        /// Everything transmitted so far (for testing)
        pub fn sent(&self) -> &[u8] {
            &self.sent
        }
    }

    impl Default for MockSerialPort {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SerialLink for MockSerialPort {
        type Error = HalError;

        fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
            #[cfg(feature = "defmt")]
            defmt::debug!("tx {} bytes", frame.len());
            self.sent
                .extend_from_slice(frame)
                .map_err(|_| HalError::SerialError)
        }

        fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
            Ok(self.rx.pop_front())
        }
    }

    /// Mock character display implementation
    #[derive(Debug)]
    pub struct MockOledDisplay {
        draws: u32,
    }

    impl MockOledDisplay {
        pub fn new() -> Self {
            #[cfg(feature = "defmt")]
            defmt::info!("using mock display (for testing)");
            Self { draws: 0 }
        }

        /// Number of draw requests handled (for testing)
        pub fn draws(&self) -> u32 {
            self.draws
        }
    }

    impl Default for MockOledDisplay {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MessageDisplay for MockOledDisplay {
        type Error = HalError;

        fn draw_glyph(&mut self, column: u8, row: u8, glyph: char) -> Result<(), Self::Error> {
            self.draws += 1;
            #[cfg(feature = "defmt")]
            defmt::trace!("draw '{}' at ({}, {})", glyph, column, row);
            let _ = (column, row, glyph);
            Ok(())
        }

        fn clear_row(&mut self, row: u8) -> Result<(), Self::Error> {
            #[cfg(feature = "defmt")]
            defmt::trace!("clear row {}", row);
            let _ = row;
            Ok(())
        }
    }
}

// Embassy tasks module
pub mod tasks {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_sync::channel::Channel;
    use embassy_time::Timer;
    use heapless::spsc::{Consumer, Producer};

    /// Edge events queued from the receiver-pin interrupt
    pub type EdgeEvents = Channel<CriticalSectionRawMutex, Edge, 16>;

    /// Capacity of the action queue between the input and I/O tasks
    pub const ACTION_QUEUE_SIZE: usize = 8;

    const POLL_INTERVAL: Duration = Duration::from_millis(5);

    /// Time allowed for the link to drain after a transmission
    const TX_DRAIN_DELAY: Duration = Duration::from_millis(3);

    /// Decodes queued edges and latches completed codes
    #[embassy_executor::task]
    pub async fn receiver_task(
        events: &'static EdgeEvents,
        latch: &'static DecodedLatch,
        config: KeypadConfig,
    ) {
        #[cfg(feature = "defmt")]
        defmt::info!("receiver task started");

        let mut decoder = PulseDecoder::new(config);
        let mut timer = InstantTimer::new();

        loop {
            let edge = events.receive().await;
            if let Some(code) = decoder.on_edge(edge, &mut timer) {
                latch.publish(code);
                #[cfg(feature = "defmt")]
                defmt::debug!("decoded {:x}", code);
            }
        }
    }

    /// Advances the global press clock once per tick period
    #[embassy_executor::task]
    pub async fn tick_task(clock: &'static TickClock, period_ms: u32) {
        loop {
            Timer::after(Duration::from_millis(period_ms as u64)).await;
            clock.tick(period_ms);
        }
    }

    /// Polls the latch, gates duplicates, and runs the text-entry machine
    #[embassy_executor::task]
    pub async fn entry_task(
        latch: &'static DecodedLatch,
        clock: &'static TickClock,
        mut producer: Producer<'static, Action, ACTION_QUEUE_SIZE>,
        config: KeypadConfig,
    ) {
        #[cfg(feature = "defmt")]
        defmt::info!("entry task started");

        let mut gate = RepeatGate::new(&config);
        let mut entry = TextEntry::new(&config);

        loop {
            if let Some(code) = latch.take() {
                let now = clock.now_ms();
                if gate.accept(now) {
                    entry.press(code, now, &mut producer);
                } else {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("debounced {:x}", code);
                }
            }
            Timer::after(POLL_INTERVAL).await;
        }
    }

    /// Carries out queued actions and echoes received messages
    #[embassy_executor::task]
    pub async fn io_task(
        mut consumer: Consumer<'static, Action, ACTION_QUEUE_SIZE>,
        serial: &'static mut MockSerialPort,
        display: &'static mut MockOledDisplay,
    ) {
        #[cfg(feature = "defmt")]
        defmt::info!("io task started");

        let mut inbox: Inbox<MESSAGE_CAPACITY> = Inbox::new();

        loop {
            while let Some(action) = consumer.dequeue() {
                match action {
                    Action::Draw { column, glyph } => {
                        if display.draw_glyph(column, MESSAGE_ROW, glyph).is_err() {
                            #[cfg(feature = "defmt")]
                            defmt::warn!("draw request dropped");
                        }
                    }
                    Action::ClearMessage => {
                        display.clear_row(MESSAGE_ROW).ok();
                    }
                    Action::Transmit(frame) => {
                        #[cfg(feature = "defmt")]
                        defmt::info!("message to be sent: {}", frame.as_str());
                        if serial.send(frame.as_bytes()).is_err() {
                            #[cfg(feature = "defmt")]
                            defmt::warn!("transmit failed, message dropped");
                        }
                        Timer::after(TX_DRAIN_DELAY).await;
                    }
                }
            }

            match inbox.poll(serial) {
                Ok(Some(msg)) => {
                    #[cfg(feature = "defmt")]
                    defmt::info!("received: {}", msg.as_str());
                    display.clear_row(RECEIVED_ROW).ok();
                    let mut column = HOME_COLUMN;
                    for glyph in msg.chars() {
                        display.draw_glyph(column, RECEIVED_ROW, glyph).ok();
                        column = column.saturating_add(1);
                    }
                }
                Ok(None) => {}
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("serial receive error");
                }
            }

            Timer::after(POLL_INTERVAL).await;
        }
    }
}

// Time driver for embassy
pub mod time_driver;
