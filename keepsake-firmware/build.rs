//! Build script for keepsake-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Checks that the linked image cannot overlap the state log page

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Base of the flash page reserved for the state log
const STATE_PAGE_ADDR: u64 = 0x0801_F800;

fn main() {
    setup_linker();
    validate_memory_map();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Fail the build if the FLASH region reaches into the state log page
fn validate_memory_map() {
    let memory_x = include_str!("memory.x");

    let line = memory_x
        .lines()
        .find(|l| l.trim_start().starts_with("FLASH"))
        .expect("memory.x has no FLASH region");

    let origin = field(line, "ORIGIN").expect("FLASH region has no ORIGIN");
    let length = field(line, "LENGTH").expect("FLASH region has no LENGTH");

    let end = origin + length;
    if end > STATE_PAGE_ADDR {
        panic!(
            "memory.x FLASH region ends at {:#010x}, overlapping the state log page at {:#010x}",
            end, STATE_PAGE_ADDR
        );
    }
}

/// Parse `NAME = value` from a MEMORY line, accepting hex and K/M suffixes
fn field(line: &str, name: &str) -> Option<u64> {
    let rest = &line[line.find(name)? + name.len()..];
    let value = rest
        .trim_start()
        .strip_prefix('=')?
        .trim_start()
        .split(|c: char| c == ',' || c.is_whitespace())
        .next()?;

    if let Some(hex) = value.strip_prefix("0x") {
        return u64::from_str_radix(hex, 16).ok();
    }
    if let Some(k) = value.strip_suffix('K') {
        return k.parse::<u64>().ok().map(|v| v * 1024);
    }
    if let Some(m) = value.strip_suffix('M') {
        return m.parse::<u64>().ok().map(|v| v * 1024 * 1024);
    }
    value.parse().ok()
}
