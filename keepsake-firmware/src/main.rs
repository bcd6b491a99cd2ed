//! Keepsake - state log demo firmware
//!
//! Recovers the persisted state record at boot and advances it on every
//! press of the user button, logging over RTT.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::Pull;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use keepsake_core::{LogConfig, StateStore};
use keepsake_drivers::input::{ButtonConfig, DebouncedButton};
use keepsake_hal_stm32g0::flash::{Stm32g0Flash, FLASH_PAGE_SIZE, STATE_PAGE_ADDR};
use keepsake_hal_stm32g0::gpio::ButtonPin;

mod report;
mod tasks;

/// Store over internal flash; writes mask interrupts
pub type Store = StateStore<CriticalSectionRawMutex, Stm32g0Flash<'static>>;

/// User button driver
pub type Button = DebouncedButton<ButtonPin<'static>, Delay>;

static STORE: StaticCell<Store> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Keepsake firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = LogConfig::new(STATE_PAGE_ADDR, FLASH_PAGE_SIZE);

    let flash = Stm32g0Flash::new_blocking(p.FLASH);
    let store = match StateStore::init(flash, config) {
        Ok(store) => STORE.init(store),
        Err(e) => {
            error!("State store init failed: {:?}", e);
            loop {
                Timer::after_secs(1).await;
            }
        }
    };

    report::log_boot(store.boot_outcome());
    report::log_state(store);

    // NUCLEO-G071RB user button: PC13, active low, external pull-up
    let pin = ButtonPin::new(p.PC13, Pull::None);
    let button = DebouncedButton::new(pin, Delay, ButtonConfig::default());

    spawner.spawn(tasks::button_task(store, button)).unwrap();
    info!("Ready, press the user button to advance state");
}
