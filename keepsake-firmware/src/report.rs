//! Diagnostic output for the state store

use defmt::*;

use keepsake_core::{BootOutcome, SaveOutcome};

use crate::Store;

/// Print the current record and where it lives
pub fn log_state(store: &Store) {
    let record = store.get();

    match store.last_slot_addr() {
        Some(addr) => info!("current addr: {:#010x}", addr),
        None => info!("current addr: none (page empty)"),
    }
    info!("color: {}", record.color);
    info!("seconds: {}", record.elapsed_seconds);
    info!("mode: {}", record.mode);
    info!("number: {}", record.sequence);
    info!("checksum: {:#04x}", record.checksum());
    debug!(
        "page: {}/{} slots used",
        store.slots_used(),
        store.config().slot_count()
    );
}

/// Describe how the store came up
pub fn log_boot(outcome: BootOutcome) {
    match outcome {
        BootOutcome::Recovered { addr, count } => {
            info!("Recovered state from {:#010x} ({} valid slots)", addr, count)
        }
        BootOutcome::ColdStart => info!("No valid state in flash, wrote defaults"),
        BootOutcome::Healed => warn!("Log cursor overran the page, page erased"),
    }
}

/// Describe what a save did
pub fn log_save(outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Unchanged => debug!("State unchanged, write skipped"),
        SaveOutcome::Appended { addr } => debug!("State appended at {:#010x}", addr),
        SaveOutcome::Wrapped { addr } => info!("Page full, erased and restarted at {:#010x}", addr),
    }
}
