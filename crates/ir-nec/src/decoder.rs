//! NEC pulse-width state machine.
//!
//! One call to [`NecDecoder::pulse`] per electrical edge on the IR line; the
//! argument is the width of the pulse that just ended, in 10 µs units. At
//! most one key code is produced per call.
//!
//! # Timing windows (10 µs units, inclusive)
//!
//! | State           | Expects                 | Window                  |
//! |-----------------|-------------------------|-------------------------|
//! | `AwaitLeaderLow`  | leader low (~9 ms)      | 700 – 1100              |
//! | `AwaitLeaderHigh` | frame high (~4.5 ms)    | 313 – 600               |
//! |                 | repeat high (~2.25 ms)  | 150 – 250               |
//! | `AwaitBitLow`     | bit low (~0.56 ms)      | 10 – 100                |
//! | `AwaitBitPair`    | low+high total          | 92 – 132 → 0, 205 – 245 → 1 |
//!
//! A width between or outside the windows of the current state resets the
//! machine to leader detection. In the two bit states the offending pulse is
//! immediately re-offered to leader detection, so a single corrupted frame
//! cannot swallow the leader of the next one.

use core::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// Timing windows
// ---------------------------------------------------------------------------

/// Leader low pulse, nominal 9 ms.
const LEADER_LOW: RangeInclusive<u16> = 700..=1100;
/// Leader high pulse of a full data frame, nominal 4.5 ms.
const LEADER_HIGH: RangeInclusive<u16> = 313..=600;
/// Leader high pulse of a repeat marker, nominal 2.25 ms.
const REPEAT_HIGH: RangeInclusive<u16> = 150..=250;
/// Fixed-width low pulse preceding every data bit, nominal 0.56 ms.
const BIT_LOW: RangeInclusive<u16> = 10..=100;
/// low + high pair total encoding bit 0, nominal 1.125 ms.
const BIT0_TOTAL: RangeInclusive<u16> = 92..=132;
/// low + high pair total encoding bit 1, nominal 2.25 ms.
const BIT1_TOTAL: RangeInclusive<u16> = 205..=245;

/// Bits per NEC frame: address low, address high, command, ~command.
const FRAME_BITS: u8 = 32;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Decoder configuration.
///
/// The defaults match the board's stock remote handling: remote key codes
/// are offset past the on-board button codes, and a held button must stream
/// repeat markers for ~1 s (10 × 108 ms) before sustained-press repeats are
/// forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NecConfig {
    /// Added to the command byte of every emitted key code.
    pub key_base: u8,
    /// Number of repeat markers swallowed before repeats are forwarded.
    pub repeat_filter: u8,
    /// Forward sustained-press repeats at all.
    pub repeat_enabled: bool,
}

impl Default for NecConfig {
    fn default() -> Self {
        Self {
            key_base: 0x80,
            repeat_filter: 10,
            repeat_enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Position in the NEC frame grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeState {
    /// Waiting for the ~9 ms leader low pulse.
    #[default]
    AwaitLeaderLow,
    /// Leader low seen; waiting for the frame or repeat high pulse.
    AwaitLeaderHigh,
    /// Waiting for the fixed-width low pulse that precedes each bit.
    AwaitBitLow,
    /// Bit low seen; waiting for the variable high pulse completing the bit.
    AwaitBitPair,
}

/// NEC protocol decoder.
///
/// All state lives in the instance — no statics — so several independent
/// receivers can decode concurrently. One instance must only ever be fed
/// from a single capture context (see [`crate::IrReceiver`]).
#[derive(Debug, Clone)]
pub struct NecDecoder {
    config: NecConfig,
    state: DecodeState,
    /// {address low, address high, command, ~command}, filled as bits arrive.
    /// Persists across frames: the repeat path replays `frame[2]`.
    frame: [u8; 4],
    /// Byte under construction (bits shift in MSB-side, LSB transmitted first).
    byte: u8,
    /// Bits accumulated in the current frame, 0..=32.
    bit: u8,
    /// Saved low-pulse width of the bit pair in flight.
    low_width: u16,
    /// Consecutive repeat markers since the last accepted frame.
    repeat_count: u8,
}

impl NecDecoder {
    /// Create a decoder in the leader-detection state.
    pub const fn new(config: NecConfig) -> Self {
        Self {
            config,
            state: DecodeState::AwaitLeaderLow,
            frame: [0; 4],
            byte: 0,
            bit: 0,
            low_width: 0,
            repeat_count: 0,
        }
    }

    /// Current position in the frame grammar.
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Decoder configuration.
    pub fn config(&self) -> &NecConfig {
        &self.config
    }

    /// Return to leader detection, abandoning any frame in flight.
    ///
    /// The frame buffer and repeat counter are deliberately kept: the repeat
    /// path replays the last accepted command after a restart, matching the
    /// lifetime of the capture session rather than a single frame.
    pub fn reset(&mut self) {
        self.state = DecodeState::AwaitLeaderLow;
        self.byte = 0;
        self.bit = 0;
        self.low_width = 0;
    }

    /// Feed one pulse width (10 µs units). Returns a validated key code
    /// (command byte + key base) at most once per call.
    ///
    /// Runs in bounded time with no allocation or blocking — safe to call
    /// from the capture interrupt context.
    pub fn pulse(&mut self, width: u16) -> Option<u8> {
        // Mismatches in the bit states loop back so the same pulse is
        // re-evaluated as a potential new leader low.
        loop {
            match self.state {
                DecodeState::AwaitLeaderLow => {
                    if LEADER_LOW.contains(&width) {
                        self.state = DecodeState::AwaitLeaderHigh;
                        self.byte = 0;
                        self.bit = 0;
                    }
                    // Out-of-window pulses are stray edges; stay put.
                    return None;
                }
                DecodeState::AwaitLeaderHigh => {
                    self.state = DecodeState::AwaitLeaderLow;
                    if LEADER_HIGH.contains(&width) {
                        self.state = DecodeState::AwaitBitLow;
                    } else if REPEAT_HIGH.contains(&width) {
                        return self.repeat_marker();
                    }
                    // Dead band between the repeat and frame windows, or
                    // noise: abandon the frame, drop the pulse.
                    return None;
                }
                DecodeState::AwaitBitLow => {
                    if BIT_LOW.contains(&width) {
                        self.low_width = width;
                        self.state = DecodeState::AwaitBitPair;
                        return None;
                    }
                    self.reset();
                    continue; // re-offer as a potential leader low
                }
                DecodeState::AwaitBitPair => {
                    let total = self.low_width.saturating_add(width);
                    if BIT0_TOTAL.contains(&total) {
                        return self.push_bit(false);
                    }
                    if BIT1_TOTAL.contains(&total) {
                        return self.push_bit(true);
                    }
                    self.reset();
                    continue; // re-offer as a potential leader low
                }
            }
        }
    }

    /// Shift one decoded bit into the frame, LSB first.
    fn push_bit(&mut self, one: bool) -> Option<u8> {
        self.byte >>= 1;
        if one {
            self.byte |= 0x80;
        }
        self.bit = self.bit.saturating_add(1);

        if self.bit % 8 == 0 {
            let index = usize::from(self.bit / 8).saturating_sub(1);
            if let Some(slot) = self.frame.get_mut(index) {
                *slot = self.byte;
            }
            self.byte = 0;
        }

        if self.bit == FRAME_BITS {
            self.state = DecodeState::AwaitLeaderLow;
            return self.complete_frame();
        }
        self.state = DecodeState::AwaitBitLow;
        None
    }

    /// Validate a full 32-bit frame and emit its command.
    ///
    /// The checksum gate `command + ~command == 0xFF` (equivalently, the
    /// fourth byte is the bitwise complement of the third) is the sole hard
    /// guarantee against forwarding a wrong key.
    fn complete_frame(&mut self) -> Option<u8> {
        let command = self.frame[2];
        let inverted = self.frame[3];
        if inverted == !command {
            self.repeat_count = 0;
            Some(command.wrapping_add(self.config.key_base))
        } else {
            None
        }
    }

    /// Handle a repeat marker (9 ms low + 2.25 ms high).
    ///
    /// The first `repeat_filter` markers after a press are swallowed; every
    /// marker past the threshold replays the last accepted command.
    fn repeat_marker(&mut self) -> Option<u8> {
        if !self.config.repeat_enabled {
            return None;
        }
        if self.repeat_count >= self.config.repeat_filter {
            Some(self.frame[2].wrapping_add(self.config.key_base))
        } else {
            self.repeat_count = self.repeat_count.saturating_add(1);
            None
        }
    }
}

impl Default for NecDecoder {
    fn default() -> Self {
        Self::new(NecConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    /// Feed a leader pair and return the decoder ready for bit 1 of 32.
    fn after_leader() -> NecDecoder {
        let mut dec = NecDecoder::new(NecConfig {
            key_base: 0,
            ..NecConfig::default()
        });
        assert_eq!(dec.pulse(900), None);
        assert_eq!(dec.state(), DecodeState::AwaitLeaderHigh);
        assert_eq!(dec.pulse(450), None);
        assert_eq!(dec.state(), DecodeState::AwaitBitLow);
        dec
    }

    /// Feed one data bit as a correctly-timed low/high pair.
    fn feed_bit(dec: &mut NecDecoder, one: bool) -> Option<u8> {
        assert_eq!(dec.pulse(56), None);
        dec.pulse(if one { 169 } else { 56 })
    }

    #[test]
    fn leader_low_window_bounds() {
        for width in [700, 1100] {
            let mut dec = NecDecoder::default();
            dec.pulse(width);
            assert_eq!(dec.state(), DecodeState::AwaitLeaderHigh);
        }
        for width in [699, 1101, 0, 65535] {
            let mut dec = NecDecoder::default();
            dec.pulse(width);
            assert_eq!(dec.state(), DecodeState::AwaitLeaderLow);
        }
    }

    #[test]
    fn leader_high_dead_band_resets() {
        // Between the repeat window (ends 250) and the frame window (starts 313).
        let mut dec = NecDecoder::default();
        dec.pulse(900);
        assert_eq!(dec.pulse(280), None);
        assert_eq!(dec.state(), DecodeState::AwaitLeaderLow);
    }

    #[test]
    fn bit_pair_window_bounds() {
        // Inclusive endpoints of both windows, with a 56-tick low pulse:
        // high = total - 56.
        for total in [92u16, 132, 205, 245] {
            let mut dec = after_leader();
            assert_eq!(dec.pulse(56), None);
            assert_eq!(dec.pulse(total - 56), None);
            // One bit accepted: back in AwaitBitLow with 1 bit stored.
            assert_eq!(dec.state(), DecodeState::AwaitBitLow);
        }
        // Totals in the gap or outside reset to leader detection.
        for total in [91u16, 133, 204, 246, 400] {
            let mut dec = after_leader();
            assert_eq!(dec.pulse(56), None);
            assert_eq!(dec.pulse(total - 56), None);
            assert_eq!(dec.state(), DecodeState::AwaitLeaderLow);
        }
    }

    #[test]
    fn lsb_first_assembly_0x01() {
        let mut dec = after_leader();
        feed_bit(&mut dec, true);
        for _ in 0..7 {
            feed_bit(&mut dec, false);
        }
        assert_eq!(dec.frame[0], 0x01);
    }

    #[test]
    fn lsb_first_assembly_0x80() {
        let mut dec = after_leader();
        for _ in 0..7 {
            feed_bit(&mut dec, false);
        }
        feed_bit(&mut dec, true);
        assert_eq!(dec.frame[0], 0x80);
    }

    #[test]
    fn bad_bit_low_is_reoffered_as_leader() {
        let mut dec = after_leader();
        // A 900-tick pulse is invalid as a bit low but valid as a leader low:
        // the same pulse must restart leader detection, not be dropped.
        assert_eq!(dec.pulse(900), None);
        assert_eq!(dec.state(), DecodeState::AwaitLeaderHigh);
    }

    #[test]
    fn repeat_disabled_never_emits() {
        let mut dec = NecDecoder::new(NecConfig {
            key_base: 0,
            repeat_filter: 0,
            repeat_enabled: false,
        });
        for _ in 0..20 {
            assert_eq!(dec.pulse(900), None);
            assert_eq!(dec.pulse(200), None);
        }
    }

    #[test]
    fn reset_keeps_frame_and_repeat_count() {
        let mut dec = after_leader();
        for _ in 0..8 {
            feed_bit(&mut dec, true);
        }
        dec.reset();
        assert_eq!(dec.frame[0], 0xFF);
        assert_eq!(dec.state(), DecodeState::AwaitLeaderLow);
    }
}
