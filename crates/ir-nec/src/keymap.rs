//! Command-byte map for the NEC remote shipped with the board.
//!
//! The stock 21-key remote transmits address `0x00 0xFF`; the command bytes
//! below are what the handset actually sends (verified against the board
//! vendor's key table). Decoded keys are forwarded as
//! `command + NecConfig::key_base` so they share one key queue with the
//! on-board buttons without colliding.

/// A named key on the stock remote handset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteKey {
    /// CH- (channel down)
    ChannelDown,
    /// CH (channel)
    Channel,
    /// CH+ (channel up)
    ChannelUp,
    /// |<< (previous track)
    Previous,
    /// >>| (next track)
    Next,
    /// Play / pause
    PlayPause,
    /// VOL- (volume down)
    VolumeDown,
    /// VOL+ (volume up)
    VolumeUp,
    /// EQ (equalizer)
    Equalizer,
    /// 100+
    Hundred,
    /// 200+
    TwoHundred,
    /// Digit 0
    Digit0,
    /// Digit 1
    Digit1,
    /// Digit 2
    Digit2,
    /// Digit 3
    Digit3,
    /// Digit 4
    Digit4,
    /// Digit 5
    Digit5,
    /// Digit 6
    Digit6,
    /// Digit 7
    Digit7,
    /// Digit 8
    Digit8,
    /// Digit 9
    Digit9,
}

impl RemoteKey {
    /// The NEC command byte this key transmits.
    pub const fn command(self) -> u8 {
        match self {
            Self::ChannelDown => 0x45,
            Self::Channel => 0x46,
            Self::ChannelUp => 0x47,
            Self::Previous => 0x44,
            Self::Next => 0x40,
            Self::PlayPause => 0x43,
            Self::VolumeDown => 0x07,
            Self::VolumeUp => 0x15,
            Self::Equalizer => 0x09,
            Self::Hundred => 0x19,
            Self::TwoHundred => 0x0D,
            Self::Digit0 => 0x16,
            Self::Digit1 => 0x0C,
            Self::Digit2 => 0x18,
            Self::Digit3 => 0x5E,
            Self::Digit4 => 0x08,
            Self::Digit5 => 0x1C,
            Self::Digit6 => 0x5A,
            Self::Digit7 => 0x42,
            Self::Digit8 => 0x52,
            Self::Digit9 => 0x4A,
        }
    }

    /// Look up a key by its NEC command byte.
    pub const fn from_command(command: u8) -> Option<Self> {
        Some(match command {
            0x45 => Self::ChannelDown,
            0x46 => Self::Channel,
            0x47 => Self::ChannelUp,
            0x44 => Self::Previous,
            0x40 => Self::Next,
            0x43 => Self::PlayPause,
            0x07 => Self::VolumeDown,
            0x15 => Self::VolumeUp,
            0x09 => Self::Equalizer,
            0x19 => Self::Hundred,
            0x0D => Self::TwoHundred,
            0x16 => Self::Digit0,
            0x0C => Self::Digit1,
            0x18 => Self::Digit2,
            0x5E => Self::Digit3,
            0x08 => Self::Digit4,
            0x1C => Self::Digit5,
            0x5A => Self::Digit6,
            0x42 => Self::Digit7,
            0x52 => Self::Digit8,
            0x4A => Self::Digit9,
            _ => return None,
        })
    }

    /// Look up a key from a queued key code, undoing the key-base offset
    /// applied by the decoder.
    pub fn from_key_code(code: u8, key_base: u8) -> Option<Self> {
        Self::from_command(code.wrapping_sub(key_base))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    const ALL: [RemoteKey; 21] = [
        RemoteKey::ChannelDown,
        RemoteKey::Channel,
        RemoteKey::ChannelUp,
        RemoteKey::Previous,
        RemoteKey::Next,
        RemoteKey::PlayPause,
        RemoteKey::VolumeDown,
        RemoteKey::VolumeUp,
        RemoteKey::Equalizer,
        RemoteKey::Hundred,
        RemoteKey::TwoHundred,
        RemoteKey::Digit0,
        RemoteKey::Digit1,
        RemoteKey::Digit2,
        RemoteKey::Digit3,
        RemoteKey::Digit4,
        RemoteKey::Digit5,
        RemoteKey::Digit6,
        RemoteKey::Digit7,
        RemoteKey::Digit8,
        RemoteKey::Digit9,
    ];

    #[test]
    fn command_roundtrip() {
        for key in ALL {
            assert_eq!(RemoteKey::from_command(key.command()), Some(key));
        }
    }

    #[test]
    fn commands_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            for b in ALL.iter().skip(i + 1) {
                assert_ne!(a.command(), b.command());
            }
        }
    }

    #[test]
    fn key_code_undoes_base_offset() {
        let code = RemoteKey::PlayPause.command().wrapping_add(0x80);
        assert_eq!(
            RemoteKey::from_key_code(code, 0x80),
            Some(RemoteKey::PlayPause)
        );
        assert_eq!(RemoteKey::from_key_code(0xFF, 0x80), None);
    }
}
