//! MPC Studio Bridge
//!
//! Sits between an Akai MPC Studio and a DAW: lights the pads and the full
//! level button, and forwards (or rewrites, or drops) every device message to
//! a virtual MIDI port the host listens on.

pub mod config;
pub mod midi;
pub mod mpc;
pub mod router;

pub use config::AppConfig;
pub use router::{Disposition, Router};
