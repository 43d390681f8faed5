//! Board identity and clock configuration for the armfly STM32-V7.
//!
//! # Pin assignments used by this firmware
//!
//! | Signal        | MCU pin | Notes                                   |
//! |---------------|---------|-----------------------------------------|
//! | IR receiver   | PB8     | Active-low data from the 38 kHz demodulator, EXTI8 both-edge |
//! | LED1          | PB14    | Active-low, heartbeat                   |
//!
//! All constants here are pure data, fully host-testable; only
//! [`build_embassy_config`] touches HAL types and is hardware-gated.

/// Board name for the boot banner.
pub const BOARD_NAME: &str = "armfly STM32-V7 (STM32H743XI)";

/// Firmware version for the boot banner.
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// IWDG timeout. The main loop must pet the watchdog at least once per
/// interval; it runs a 1 s heartbeat, leaving comfortable margin.
pub const WATCHDOG_TIMEOUT_MS: u32 = 8_000;

/// IWDG timeout in microseconds, the unit the HAL constructor takes.
pub const WATCHDOG_TIMEOUT_US: u32 = 8_000_000;

/// Build the Embassy clock configuration.
///
/// HSI (64 MHz) / prediv(4) = 16 MHz → × mul(50) = 800 MHz VCO
/// PLL1_P = VCO / divp(2) = 400 MHz → system clock
///
/// The IR decode path needs no peripheral kernel clocks beyond the buses:
/// EXTI is clockless and the capture timebase is the embassy-time driver
/// (TIM2 on APB1).
///
/// Always call `embassy_stm32::init(build_embassy_config())` from `main.rs`.
#[cfg(feature = "hardware")]
pub fn build_embassy_config() -> embassy_stm32::Config {
    use embassy_stm32::rcc::*;

    let mut config = embassy_stm32::Config::default();

    // ── Oscillators ─────────────────────────────────────────────────────────
    // HSI: 64 MHz internal oscillator (no prescaler)
    config.rcc.hsi = Some(HSIPrescaler::DIV1);

    // ── PLL1: system clock ───────────────────────────────────────────────────
    config.rcc.pll1 = Some(Pll {
        source: PllSource::HSI,
        prediv: PllPreDiv::DIV4,
        mul: PllMul::MUL50,
        divp: Some(PllDiv::DIV2), // 400 MHz — system clock
        divq: None,
        divr: None,
    });

    // ── System clock + bus prescalers ────────────────────────────────────────
    config.rcc.sys = Sysclk::PLL1_P; // 400 MHz
    config.rcc.ahb_pre = AHBPrescaler::DIV2; // 200 MHz
    config.rcc.apb1_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.apb2_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.apb3_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.apb4_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.voltage_scale = VoltageScale::Scale1;

    config
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn watchdog_interval_exceeds_heartbeat() {
        // The main loop pets the watchdog on a 1 s cadence; the timeout must
        // leave real margin over it.
        assert!(WATCHDOG_TIMEOUT_MS >= 4_000);
    }

    #[test]
    fn board_name_identifies_the_mcu() {
        assert!(BOARD_NAME.contains("STM32H743"));
    }

    #[test]
    fn watchdog_units_agree() {
        assert_eq!(WATCHDOG_TIMEOUT_US, WATCHDOG_TIMEOUT_MS.checked_mul(1_000).unwrap());
    }
}
