//! Sensorlink - tiny HTTP front end for a sensor board
//!
//! Core library for request parsing, routing and the device-facing
//! dispatch loop.

pub mod config;
pub mod device;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
