//! M5NS Hardware Abstraction Layer
//!
//! This crate defines the traits through which the configuration core talks
//! to its external collaborators: the removable storage holding the INI
//! file, the section/key lookup over that file, and the serial console used
//! for diagnostics. Board support crates implement them; the core only ever
//! sees the traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (device firmware, tools)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  m5ns-core (config resolution)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  m5ns-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  SD card INI  │       │ MemorySource  │
//! │  (board)      │       │ (host/tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`storage::ConfigStorage`] - Opens the configuration source
//! - [`storage::SectionValueLookup`] - Validates it and resolves `(section, key)`
//! - [`console::LineSink`] - Write-only line-oriented text output

#![no_std]
#![deny(unsafe_code)]

pub mod console;
pub mod memory;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use console::LineSink;
pub use memory::{Entry, MemorySource, MemoryStorage};
pub use storage::{ConfigStorage, SectionValueLookup, SourceError, MAX_LINE_LEN};
