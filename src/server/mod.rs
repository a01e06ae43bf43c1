//! Accept loop and device-state ownership.

pub mod listener;
