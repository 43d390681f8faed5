//! STM32-V7 IR Remote Firmware - Main Entry Point
//!
//! Hardware-only entry point for STM32H743XI.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::exti::{Channel, ExtiInput};
use embassy_stm32::gpio::{AnyPin, Input, Level, Output, Pull, Speed};
use embassy_time::{with_timeout, Duration};

use firmware::ir::{spawn_ir_task, IrRemote};
use ir_nec::{NecConfig, RemoteKey};

// RTT logging transport + panic handler
use defmt_rtt as _;
use panic_probe as _;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!(
        "{=str} firmware v{=str}",
        firmware::BOARD_NAME,
        firmware::FIRMWARE_VERSION
    );

    let p = embassy_stm32::init(firmware::board::build_embassy_config());

    // IWDG: must be fed every WATCHDOG_TIMEOUT_MS or the MCU resets. Catches
    // Embassy task deadlocks and runaway panic loops. Uses the 32 kHz LSI,
    // independent of the main PLL; once unleashed it cannot be stopped, so
    // the main loop MUST pet it at least once per interval.
    let mut watchdog = embassy_stm32::wdg::IndependentWatchdog::new(
        p.IWDG1,
        firmware::board::WATCHDOG_TIMEOUT_US,
    );
    watchdog.unleash();
    defmt::info!(
        "IWDG watchdog armed: timeout={=u32}ms",
        firmware::board::WATCHDOG_TIMEOUT_MS
    );

    // LED1 heartbeat (PB14, active low).
    let mut led = Output::new(p.PB14, Level::High, Speed::Low);

    // -----------------------------------------------------------------------
    // Wire IR edge task
    //
    // Pin assignment:
    //   PB8 = IR receiver data — active-low output of the 38 kHz
    //         demodulator, EXTI8 both-edge interrupt
    // -----------------------------------------------------------------------
    defmt::info!("Spawning IR edge task (NEC decoder on PB8)...");

    // Input::new().degrade() + EXTI channel.degrade() gives
    // ExtiInput<'static, AnyPin> compatible with the task signature.
    let ir_pin: ExtiInput<'static, AnyPin> =
        ExtiInput::new(Input::new(p.PB8, Pull::Up).degrade(), p.EXTI8.degrade());

    spawn_ir_task(&spawner, ir_pin);

    let remote = IrRemote::new();
    remote.start();
    defmt::info!("IR decoding armed");

    // Main loop: consume keys, blink LED1, feed the watchdog. The 1-second
    // timeout bounds each wait so the heartbeat keeps running with or
    // without remote activity.
    defmt::info!("Entering main loop");
    let key_base = NecConfig::default().key_base;

    loop {
        match with_timeout(Duration::from_secs(1), remote.next_key()).await {
            Ok(code) => match RemoteKey::from_key_code(code, key_base) {
                Some(key) => defmt::info!("key: {} ({=u8:#x})", key, code),
                None => defmt::info!("key: unmapped ({=u8:#x})", code),
            },
            Err(_) => {} // heartbeat interval elapsed without a key
        }
        led.toggle();
        watchdog.pet();
    }
}
