//! Simple embassy time driver backed by the periodic system tick

use embassy_time_driver::{AlarmHandle, Driver};
use portable_atomic::{AtomicU32, Ordering};

/// Tick interrupt period, in embassy time units (1MHz tick rate)
const TICK_PERIOD_US: u64 = 40_000;

/// Simple time driver counting system tick periods
pub struct SysTickDriver {
    periods: AtomicU32,
}

impl SysTickDriver {
    const fn new() -> Self {
        Self {
            periods: AtomicU32::new(0),
        }
    }

    /// Increment the period count (called from the system tick interrupt)
    pub fn tick(&self) {
        self.periods.fetch_add(1, Ordering::Relaxed);
    }
}

impl Driver for SysTickDriver {
    fn now(&self) -> u64 {
        self.periods.load(Ordering::Relaxed) as u64 * TICK_PERIOD_US
    }

    unsafe fn allocate_alarm(&self) -> Option<AlarmHandle> {
        // For simplicity, we don't support alarms in this basic implementation
        None
    }

    fn set_alarm_callback(&self, _alarm: AlarmHandle, _callback: fn(*mut ()), _ctx: *mut ()) {
        // Not implemented
    }

    fn set_alarm(&self, _alarm: AlarmHandle, _timestamp: u64) -> bool {
        // Not implemented
        false
    }
}

// Export the driver
embassy_time_driver::time_driver_impl!(static DRIVER: SysTickDriver = SysTickDriver::new());

/// Advance driver time; called from the system tick interrupt handler
pub fn on_system_tick() {
    DRIVER.tick();
}
