//! Watch face library for the PineTime "message of the day" firmware.
//!
//! Everything in here is plain logic and drawing against
//! [`embedded_graphics::draw_target::DrawTarget`], so it can be tested on the
//! host. The binary (`main.rs`) adds the nRF52832 specific tasks and drivers.
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu
//! ```

// Tests need std for the test harness
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod time;
pub mod ui;
