//! Capture-side bookkeeping between the timer hardware and the decoder.
//!
//! The timer delivers the raw 16-bit capture count of every edge on the IR
//! line. [`IrReceiver`] turns consecutive counts into pulse widths
//! (wraparound-safe), absorbs the baseline edge after a (re)start, runs the
//! decoder, and forwards accepted key codes to a [`KeySink`].
//!
//! Everything here executes in the capture context: bounded time, no
//! allocation, no blocking. The sink must uphold the same contract.

use crate::decoder::{NecConfig, NecDecoder};

// ---------------------------------------------------------------------------
// Key sink
// ---------------------------------------------------------------------------

/// Non-blocking key-event sink.
///
/// Implementations must be safe to call from interrupt context — typically a
/// lock-free or critical-section queue. On the board this is an embassy
/// `Channel` sender using `try_send`.
pub trait KeySink {
    /// Enqueue a decoded key code. Returns `false` if the sink is full and
    /// the key was dropped (best-effort delivery; a dropped keypress is
    /// acceptable, a blocked capture context is not).
    fn put_key(&mut self, code: u8) -> bool;
}

impl<F: FnMut(u8) -> bool> KeySink for F {
    fn put_key(&mut self, code: u8) -> bool {
        self(code)
    }
}

// ---------------------------------------------------------------------------
// Width computation
// ---------------------------------------------------------------------------

/// Width in ticks between two captures of a free-running 16-bit counter.
///
/// Modular subtraction stays correct across counter overflow:
/// `pulse_width(65530, 5) == 11`.
pub fn pulse_width(last: u16, now: u16) -> u16 {
    now.wrapping_sub(last)
}

// ---------------------------------------------------------------------------
// Receiver
// ---------------------------------------------------------------------------

/// One IR receiver: decoder state plus capture bookkeeping, bound to a sink.
///
/// Owns all decode state for one receiver input. Feed it from exactly one
/// capture context via [`on_capture`](Self::on_capture); the decoder is a
/// strictly sequential automaton and edges must arrive in order.
#[derive(Debug)]
pub struct IrReceiver<S: KeySink> {
    decoder: NecDecoder,
    sink: S,
    last_capture: u16,
    /// Set once the baseline edge after start has been absorbed.
    primed: bool,
    running: bool,
}

impl<S: KeySink> IrReceiver<S> {
    /// Create a stopped receiver. Call [`start`](Self::start) to arm it.
    pub const fn new(config: NecConfig, sink: S) -> Self {
        Self {
            decoder: NecDecoder::new(config),
            sink,
            last_capture: 0,
            primed: false,
            running: false,
        }
    }

    /// Arm the receiver: reinitialize decode state and clear the capture
    /// baseline. The next edge is absorbed as a timing reference only.
    pub fn start(&mut self) {
        self.decoder.reset();
        self.last_capture = 0;
        self.primed = false;
        self.running = true;
    }

    /// Disarm the receiver. A partially decoded frame is abandoned; state is
    /// left inert until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the receiver is currently armed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Decoder state, for inspection.
    pub fn decoder(&self) -> &NecDecoder {
        &self.decoder
    }

    /// The bound sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the bound sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Process one edge, given the raw 16-bit capture count at the edge.
    ///
    /// The very first edge after [`start`](Self::start) only establishes the
    /// timing baseline and is never interpreted. The original board code
    /// absorbs it unconditionally, without a tolerance check; that behavior
    /// is preserved here but has not been validated against hardware traces
    /// where the first edge could itself be a leader edge.
    pub fn on_capture(&mut self, now: u16) {
        if !self.running {
            return;
        }
        if !self.primed {
            self.primed = true;
            self.last_capture = now;
            return;
        }
        let width = pulse_width(self.last_capture, now);
        self.last_capture = now;
        if let Some(code) = self.decoder.pulse(width) {
            self.sink.put_key(code);
        }
    }

    /// Process one edge, given a pre-computed pulse width in 10 µs units.
    ///
    /// For capture sources that deliver widths directly rather than raw
    /// counter values. Baseline absorption does not apply — the source
    /// already knows the elapsed time.
    pub fn on_pulse(&mut self, width: u16) {
        if !self.running {
            return;
        }
        if let Some(code) = self.decoder.pulse(width) {
            self.sink.put_key(code);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
