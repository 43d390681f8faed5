//! STM32-V7 board firmware — infrared remote input.
//!
//! Target crate for the armfly STM32-V7 development board (STM32H743XI,
//! Cortex-M7). Decodes the NEC remote on PB8 and feeds validated key codes
//! into a static key-event channel consumed by the main loop.
//!
//! # Architecture
//!
//! ```text
//! Application (main.rs — key consumer, heartbeat, watchdog)
//!         ↓
//! IR integration (ir module — EXTI edge task, key channel, start/stop)
//!         ↓
//! Protocol core (ir-nec crate — pure NEC state machine, host-tested)
//!         ↓
//! Platform (Embassy STM32 HAL)
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for the STM32H7 target (embassy, defmt-rtt)
//! - `std` - Enable standard library (host tests)
//!
//! # Hardware target
//!
//! ```bash
//! cargo build --release --target thumbv7em-none-eabihf --features hardware
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
// Pedantic lints too noisy for firmware application code:
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod board;

#[cfg(feature = "hardware")]
pub mod ir;

pub use board::{BOARD_NAME, FIRMWARE_VERSION};
