//! Hardware IR remote driver — EXTI edge task + static key channel.
//!
//! # Architecture
//!
//! A single static [`Channel`] carries decoded key codes from the edge task
//! to the application. [`IrRemote`] wraps the channel receiver and exposes
//! the arm/disarm surface.
//!
//! Call [`spawn_ir_task`] once at startup with the IR receiver pin (PB8,
//! EXTI8, both edges); the task owns the pin for the lifetime of the
//! program.
//!
//! # Capture timebase
//!
//! The NEC decoder consumes 10 µs pulse-width ticks from a free-running
//! 16-bit counter, exactly what the original timer-capture wiring produced.
//! Here the count is derived from the embassy-time instant at each edge:
//! truncating the 10 µs tick count to `u16` gives a counter that wraps at
//! the same 65536 modulus, and `IrReceiver` handles the wraparound with
//! modular subtraction. The 32.768 kHz tick quantizes edges to ~31 µs,
//! well inside every NEC tolerance window (the narrowest is 400 µs wide).
//!
//! # Overflow handling
//!
//! The channel send is non-blocking: if the consumer stalls and the channel
//! fills, keys are dropped rather than stalling the edge task. A dropped
//! keypress is acceptable; a blocked capture path is not.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::AnyPin;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::Instant;

use ir_nec::{IrReceiver, KeySink, NecConfig};

// ---------------------------------------------------------------------------
// Channel capacity
// ---------------------------------------------------------------------------

/// Depth of the static key-event channel.
pub(crate) const CHANNEL_DEPTH: usize = 16;

// ---------------------------------------------------------------------------
// Static channel (edge task producer, IrRemote consumer)
// ---------------------------------------------------------------------------

/// Global key-event channel shared between the edge task and the application.
///
/// CriticalSectionRawMutex: written from the edge task via `try_send`
/// (non-blocking, synchronous) and read from thread-mode tasks; ISR-safe on
/// single-core Cortex-M, and the critical-section window of a heapless queue
/// operation is tens of nanoseconds.
pub static KEY_CHANNEL: Channel<CriticalSectionRawMutex, u8, CHANNEL_DEPTH> = Channel::new();

/// Arm/disarm flag, set by [`IrRemote`], observed by the edge task.
static ARMED: AtomicBool = AtomicBool::new(false);

// ---------------------------------------------------------------------------
// Key sink — non-blocking channel producer
// ---------------------------------------------------------------------------

/// [`KeySink`] implementation over the static channel sender.
struct ChannelSink {
    tx: Sender<'static, CriticalSectionRawMutex, u8, CHANNEL_DEPTH>,
}

impl KeySink for ChannelSink {
    fn put_key(&mut self, code: u8) -> bool {
        match self.tx.try_send(code) {
            Ok(()) => true,
            Err(_) => {
                // Channel full — key dropped so the edge task never blocks.
                defmt::warn!("key channel full, dropped key {=u8:#x}", code);
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// IrRemote — consumer handle
// ---------------------------------------------------------------------------

/// Application handle for the IR remote: arm/disarm plus key consumption.
///
/// # Usage
/// ```no_run
/// use firmware::ir::{spawn_ir_task, IrRemote};
///
/// // In your main / init:
/// // spawn_ir_task(&spawner, ir_pin);
/// let remote = IrRemote::new();
/// remote.start();
/// // loop { let code = remote.next_key().await; ... }
/// ```
pub struct IrRemote {
    rx: Receiver<'static, CriticalSectionRawMutex, u8, CHANNEL_DEPTH>,
}

impl IrRemote {
    /// Create a handle backed by the static key channel.
    pub fn new() -> Self {
        Self {
            rx: KEY_CHANNEL.receiver(),
        }
    }

    /// Arm decoding. The edge task reinitializes the decoder on the next
    /// edge, so a frame in flight before `start` never leaks through.
    pub fn start(&self) {
        ARMED.store(true, Ordering::Release);
    }

    /// Disarm decoding. A partially decoded frame is abandoned.
    pub fn stop(&self) {
        ARMED.store(false, Ordering::Release);
    }

    /// Wait for the next decoded key code.
    pub async fn next_key(&self) -> u8 {
        self.rx.receive().await
    }

    /// Poll for a decoded key code (non-blocking).
    pub fn poll_key(&self) -> Option<u8> {
        self.rx.try_receive().ok()
    }
}

impl Default for IrRemote {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Edge task
// ---------------------------------------------------------------------------

/// Spawn the IR edge task.
///
/// Call once from `main` with the IR receiver pin configured for EXTI
/// (PB8 on this board). The task owns the pin for the program lifetime.
pub fn spawn_ir_task(spawner: &Spawner, pin: ExtiInput<'static, AnyPin>) {
    defmt::unwrap!(spawner.spawn(ir_task(pin)));
}

/// Free-running 16-bit capture count in 10 µs ticks.
///
/// Truncation to `u16` is the counter modulus (65536), not data loss:
/// `IrReceiver` computes widths with modular subtraction.
#[allow(clippy::cast_possible_truncation)]
fn capture_count() -> u16 {
    (Instant::now().as_micros() / 10) as u16
}

/// Embassy task: one decode step per electrical edge on the IR line.
#[embassy_executor::task]
async fn ir_task(mut pin: ExtiInput<'static, AnyPin>) {
    let mut receiver = IrReceiver::new(
        NecConfig::default(),
        ChannelSink {
            tx: KEY_CHANNEL.sender(),
        },
    );
    let mut was_armed = false;

    defmt::info!("IR edge task started (NEC, key base {=u8:#x})", NecConfig::default().key_base);

    loop {
        pin.wait_for_any_edge().await;
        let armed = ARMED.load(Ordering::Acquire);
        if armed != was_armed {
            was_armed = armed;
            if armed {
                receiver.start();
                defmt::debug!("IR decoding armed");
            } else {
                receiver.stop();
                defmt::debug!("IR decoding disarmed");
            }
        }
        receiver.on_capture(capture_count());
    }
}
