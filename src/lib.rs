//! careview - address map and nurse card components on tui-dispatch
//!
//! The library exposes the store pieces and components so hosts and tests
//! can drive them without the terminal binary.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod geo;
pub mod messages;
pub mod reducer;
pub mod state;
pub mod telemetry;
