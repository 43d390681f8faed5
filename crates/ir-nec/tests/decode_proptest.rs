//! Property-based tests for the NEC decoder.
//! Verifies invariants hold for ALL inputs, not just fixed examples.
// Test file: unwrap/panic/arithmetic are intentional test mechanisms.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use ir_nec::{DecodeState, NecConfig, NecDecoder};

const LEADER: [u16; 2] = [930, 465];

fn frame_pulses(cmd: u8, inv: u8) -> Vec<u16> {
    let mut pulses = LEADER.to_vec();
    for byte in [0x00u8, 0xFF, cmd, inv] {
        for i in 0..8 {
            pulses.push(56);
            pulses.push(if byte >> i & 1 == 1 { 169 } else { 56 });
        }
    }
    pulses
}

fn decode_all(dec: &mut NecDecoder, pulses: &[u16]) -> Vec<u8> {
    pulses.iter().filter_map(|&w| dec.pulse(w)).collect()
}

proptest::proptest! {
    /// Checksum gate: a frame is forwarded iff the fourth byte complements
    /// the command byte, regardless of how the sum fails.
    #[test]
    fn checksum_gate_holds_for_all_pairs(cmd in 0u8..=255, inv in 0u8..=255) {
        let mut dec = NecDecoder::new(NecConfig { key_base: 0, ..NecConfig::default() });
        let keys = decode_all(&mut dec, &frame_pulses(cmd, inv));
        if u16::from(cmd) + u16::from(inv) == 0xFF {
            assert_eq!(keys, vec![cmd]);
        } else {
            assert_eq!(keys, Vec::<u8>::new(),
                "cmd {cmd:#04x} inv {inv:#04x} must not pass the checksum gate");
        }
    }

    /// Bit windows: any total in [92,132] decodes as 0, any in [205,245] as 1,
    /// verified through a full frame built from a single repeated bit value.
    #[test]
    fn bit_zero_window_accepts_all_totals(total in 92u16..=132) {
        let mut dec = NecDecoder::new(NecConfig { key_base: 0, ..NecConfig::default() });
        let mut pulses = LEADER.to_vec();
        for _ in 0..32 {
            pulses.push(56);
            pulses.push(total - 56);
        }
        // All-zero frame: cmd 0x00, inv 0x00 — fails the checksum, but every
        // bit must have been accepted for the FSM to reach the 32nd bit.
        assert_eq!(decode_all(&mut dec, &pulses), Vec::<u8>::new());
        assert_eq!(dec.state(), DecodeState::AwaitLeaderLow);
        // Next frame proves no desync was left behind.
        assert_eq!(decode_all(&mut dec, &frame_pulses(0x0A, 0xF5)), vec![0x0A]);
    }

    /// Totals in the dead band between the windows abort the frame.
    #[test]
    fn bit_dead_band_resets(total in 133u16..=204) {
        let mut dec = NecDecoder::new(NecConfig { key_base: 0, ..NecConfig::default() });
        let mut pulses = LEADER.to_vec();
        pulses.push(56);
        pulses.push(total - 56);
        assert_eq!(decode_all(&mut dec, &pulses), Vec::<u8>::new());
        assert_eq!(dec.state(), DecodeState::AwaitLeaderLow);
    }

    /// Noise robustness: arbitrary width streams never emit a key that did
    /// not pass the checksum gate, and never wedge the decoder — a valid
    /// frame afterwards always decodes.
    #[test]
    fn arbitrary_noise_self_heals(noise in proptest::collection::vec(0u16..=65535, 0..200)) {
        let mut dec = NecDecoder::new(NecConfig { key_base: 0, ..NecConfig::default() });
        let _ = decode_all(&mut dec, &noise);
        // Two frames: if the noise happened to end on a leader-low-shaped
        // pulse, the first frame's leader is consumed re-synchronizing (the
        // leader-high state drops one pulse on mismatch); the second frame
        // then always decodes cleanly.
        let mut keys = decode_all(&mut dec, &frame_pulses(0x5A, !0x5A));
        keys.extend(decode_all(&mut dec, &frame_pulses(0x5A, !0x5A)));
        assert!(keys.contains(&0x5A));
        assert_eq!(dec.state(), DecodeState::AwaitLeaderLow);
    }

    /// Wraparound width computation is exact for all counter pairs.
    #[test]
    fn pulse_width_matches_modular_difference(last in 0u16..=65535, delta in 0u16..=65535) {
        let now = last.wrapping_add(delta);
        assert_eq!(ir_nec::pulse_width(last, now), delta);
    }
}
