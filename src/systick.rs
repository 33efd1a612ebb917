//! SysTick (Cortex-M4 コアの 24bit ダウンカウンタ)

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;

use crate::{board, Error};

/// RVR は 24bit
pub const RELOAD_MAX: u32 = 0x00FF_FFFF;

/// core_hz で動かして rate_hz ごとに 0 になるリロード値 (0 も 1 カウントなので - 1)
pub const fn reload_for(core_hz: u32, rate_hz: u32) -> Result<u32, Error> {
    if core_hz == 0 || rate_hz == 0 {
        return Err(Error::ZeroFrequency);
    }
    let ticks = core_hz / rate_hz;
    if ticks == 0 {
        return Err(Error::Unreachable);
    }
    if ticks - 1 > RELOAD_MAX {
        return Err(Error::ReloadOverflow);
    }
    Ok(ticks - 1)
}

// HSI 16 MHz で 1 ms
const ONE_MS_RELOAD: u32 = match reload_for(board::HSI_HZ, 1_000) {
    Ok(reload) => reload,
    Err(_) => panic!("1 ms reload does not fit"),
};

/// プロセッサクロック (HSI 16 MHz) で ms ミリ秒待つ。終わったら SysTick は止める
pub fn delay_ms(syst: &mut SYST, ms: u32) {
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(ONE_MS_RELOAD);
    syst.clear_current();
    syst.enable_counter();

    for _ in 0..ms {
        // COUNTFLAG (0 になると立ち、読むとクリアされる)
        while !syst.has_wrapped() {}
    }

    syst.disable_counter();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_millisecond_at_16mhz() {
        assert_eq!(reload_for(16_000_000, 1_000), Ok(16_000 - 1));
        assert_eq!(ONE_MS_RELOAD, 15_999);
    }

    #[test]
    fn one_hertz_fits_at_16mhz_only() {
        // 16 MHz なら 1 秒周期がぎりぎり 24bit に入る
        assert_eq!(reload_for(16_000_000, 1), Ok(15_999_999));
        assert_eq!(reload_for(168_000_000, 1), Err(Error::ReloadOverflow));
        // 外部クロック (HCLK / 8) なら 500 ms は入る
        assert_eq!(reload_for(168_000_000 / 8, 2), Ok(10_499_999));
    }

    #[test]
    fn reload_limits() {
        assert_eq!(reload_for(RELOAD_MAX + 1, 1), Ok(RELOAD_MAX));
        assert_eq!(reload_for(RELOAD_MAX + 2, 1), Err(Error::ReloadOverflow));
        assert_eq!(reload_for(0, 1), Err(Error::ZeroFrequency));
        assert_eq!(reload_for(1_000, 2_000), Err(Error::Unreachable));
    }
}
