//! Button task
//!
//! Polls the user button and advances the persisted state on each press.

use defmt::*;
use embassy_time::Timer;

use keepsake_drivers::input::KeyState;

use crate::report;
use crate::{Button, Store};

/// Idle time between button scans
const SCAN_INTERVAL_MS: u64 = 10;

/// Button task - one `update` per confirmed press
#[embassy_executor::task]
pub async fn button_task(store: &'static mut Store, mut button: Button) {
    info!("Button task started");

    loop {
        if button.scan() == KeyState::Down {
            match store.update(store.get()) {
                Ok(outcome) => {
                    report::log_save(outcome);
                    report::log_state(store);
                }
                Err(e) => warn!("Failed to save state: {:?}", e),
            }
        }

        Timer::after_millis(SCAN_INTERVAL_MS).await;
    }
}
