//! Board-agnostic core logic for the M5NS Nightscout monitor
//!
//! This crate turns the user-editable INI file on the SD card into the
//! strongly-typed configuration the rest of the firmware runs on:
//!
//! - Configuration type definitions and defaults
//! - Best-effort parsing of textual values
//! - Field-by-field resolution with range checks and unit conversion
//! - Open/validate/resolve loading with a typed fatal error
//! - Per-field diagnostics for the serial console
//!
//! Storage and console access go through the traits in `m5ns-hal`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
