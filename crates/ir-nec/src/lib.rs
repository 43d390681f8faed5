//! NEC infrared remote protocol decoder for the STM32-V7 board.
//!
//! Converts a stream of edge-to-edge pulse widths (10 µs units, as measured
//! by a timer input-capture channel on the IR receiver pin) into validated
//! 8-bit key codes. The crate is pure `no_std` logic with no hardware
//! dependencies, so the whole protocol state machine runs under host tests.
//!
//! # NEC frame format
//!
//! ```text
//! leader        9 ms low + 4.5 ms high          (repeat marker: 9 ms + 2.25 ms)
//! address low   8 bits   0 = 1.125 ms pair, 1 = 2.25 ms pair, LSB first
//! address high  8 bits
//! command       8 bits
//! ~command      8 bits   checksum: command + ~command == 0xFF
//! ```
//!
//! # Architecture
//!
//! ```text
//! timer capture edge (10 µs ticks)
//!         ↓
//! IrReceiver      — baseline sync, 16-bit wraparound width computation
//!         ↓
//! NecDecoder      — four-state pulse FSM, checksum gate, repeat filter
//!         ↓
//! KeySink         — non-blocking key-event queue (firmware: embassy channel)
//! ```
//!
//! All malformed input self-heals by resetting to leader detection; the
//! checksum gate is the only hard correctness guarantee (a corrupted press
//! may be dropped, but a wrong key is never forwarded).
//!
//! # Features
//!
//! - `std`: standard library support (host tests)
//! - `defmt`: `defmt::Format` derives on decoder types (hardware builds)

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)] // decoder accessors — callers decide

pub mod decoder;
pub mod keymap;
pub mod receiver;

pub use decoder::{DecodeState, NecConfig, NecDecoder};
pub use keymap::RemoteKey;
pub use receiver::{pulse_width, IrReceiver, KeySink};
