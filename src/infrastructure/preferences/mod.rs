//! Preference store adapters
//!
//! The file-backed store is `XdgConfigStore`, which keeps preferences in the
//! config file.

mod memory;

pub use memory::MemoryPreferenceStore;
