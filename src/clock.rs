//! システムクロックの設定
//!
//! SYSCLK: HSE (ST-LINK 8 MHz, bypass) -> PLL -> 168 MHz
//! 180 MHz まで上げるには オーバードライブ (PWR_CR.ODEN) が必要なので 168 MHz で止めておく。

use stm32f4::stm32f429;

use crate::Error;

/// PLLCFGR の M / N / P
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PllConfig {
    pub m: u8,
    pub n: u16,
    pub p: u8,
}

impl PllConfig {
    /// 8 MHz / 4 = 2 MHz -> x168 = 336 MHz -> / 2 = 168 MHz
    pub const SYSCLK_168MHZ: PllConfig = PllConfig { m: 4, n: 168, p: 2 };

    /// 入力クロックから SYSCLK を計算する。RM0090 の範囲外ならエラー
    pub fn sysclk_hz(&self, input_hz: u32) -> Result<u32, Error> {
        if !(2..=63).contains(&self.m) || !(50..=432).contains(&self.n) {
            return Err(Error::PllOutOfRange);
        }
        if !matches!(self.p, 2 | 4 | 6 | 8) {
            return Err(Error::PllOutOfRange);
        }
        // VCO 入力は 1 ~ 2 MHz
        let vco_in = input_hz / u32::from(self.m);
        if !(1_000_000..=2_000_000).contains(&vco_in) {
            return Err(Error::PllOutOfRange);
        }
        // VCO 出力は 100 ~ 432 MHz
        let vco_out = vco_in * u32::from(self.n);
        if !(100_000_000..=432_000_000).contains(&vco_out) {
            return Err(Error::PllOutOfRange);
        }
        let sysclk = vco_out / u32::from(self.p);
        if sysclk > 180_000_000 {
            return Err(Error::PllOutOfRange);
        }
        Ok(sysclk)
    }

    /// PLLP フィールドの値 (00: /2, 01: /4, 10: /6, 11: /8)
    pub const fn pllp_bits(&self) -> u8 {
        self.p / 2 - 1
    }
}

/// フラッシュの読み出しウェイト数 (電源 2.7 ~ 3.6 V では 30 MHz ごとに 1 ウェイト)
pub const fn flash_latency(hclk_hz: u32) -> u8 {
    if hclk_hz == 0 {
        return 0;
    }
    ((hclk_hz - 1) / 30_000_000) as u8
}

/// APB のプリスケーラが 1 以外だとタイマには PCLK の 2 倍が入る
pub const fn timer_clock_hz(pclk_hz: u32, apb_div: u32) -> u32 {
    if apb_div == 1 {
        pclk_hz
    } else {
        pclk_hz * 2
    }
}

/// HSE bypass + PLL をシステムクロックにする
/// APB1 は / 4 (最大 45 MHz)、APB2 は / 2 (最大 90 MHz)
pub fn config_clock(peripheral: &stm32f429::Peripherals, pll: &PllConfig, hclk_hz: u32) {
    // HSEはBypassモード(ST-Linkからの 8 MHz を使える)
    peripheral.RCC.cr.modify(|_, w| w.hsebyp().bypassed());
    peripheral.RCC.cr.modify(|_, w| w.hseon().on());
    while peripheral.RCC.cr.read().hserdy().is_not_ready() {}

    // PLL の ソースクロックをHSEとし、M/N/P を設定
    peripheral.RCC.pllcfgr.modify(|_, w| w.pllsrc().hse());
    peripheral
        .RCC
        .pllcfgr
        .modify(|_, w| unsafe { w.pllm().bits(pll.m) });
    peripheral
        .RCC
        .pllcfgr
        .modify(|_, w| unsafe { w.plln().bits(pll.n) });
    peripheral
        .RCC
        .pllcfgr
        .modify(|_, w| unsafe { w.pllp().bits(pll.pllp_bits()) });

    peripheral.RCC.cr.modify(|_, w| w.pllon().on());
    while peripheral.RCC.cr.read().pllrdy().is_not_ready() {}

    // 切り替える前にフラッシュのウェイトを増やしておく
    let latency = flash_latency(hclk_hz);
    peripheral
        .FLASH
        .acr
        .modify(|_, w| unsafe { w.latency().bits(latency) });

    // APBを分周してからSYSCLKを切り替える（一瞬でも上限を超えないように）
    peripheral.RCC.cfgr.modify(|_, w| w.ppre1().div4());
    peripheral.RCC.cfgr.modify(|_, w| w.ppre2().div2());

    peripheral.RCC.cfgr.modify(|_, w| w.sw().pll());
    while !peripheral.RCC.cfgr.read().sws().is_pll() {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;

    #[test]
    fn pll_168mhz_from_st_link_clock() {
        let pll = PllConfig::SYSCLK_168MHZ;
        assert_eq!(pll.sysclk_hz(board::HSE_BYPASS_HZ), Ok(168_000_000));
        assert_eq!(pll.pllp_bits(), 0);
    }

    #[test]
    fn pllp_encoding() {
        let bits = |p| PllConfig { m: 4, n: 168, p }.pllp_bits();
        assert_eq!(bits(2), 0b00);
        assert_eq!(bits(4), 0b01);
        assert_eq!(bits(6), 0b10);
        assert_eq!(bits(8), 0b11);
    }

    #[test]
    fn pll_rejects_out_of_range_factors() {
        let hse = board::HSE_BYPASS_HZ;
        // 180 MHz を超える
        let pll = PllConfig { m: 4, n: 192, p: 2 };
        assert_eq!(pll.sysclk_hz(hse), Err(Error::PllOutOfRange));
        // VCO 入力 4 MHz
        let pll = PllConfig { m: 2, n: 84, p: 2 };
        assert_eq!(pll.sysclk_hz(hse), Err(Error::PllOutOfRange));
        // P は偶数 2 ~ 8 のみ
        let pll = PllConfig { m: 4, n: 168, p: 3 };
        assert_eq!(pll.sysclk_hz(hse), Err(Error::PllOutOfRange));
        // VCO 出力 98 MHz
        let pll = PllConfig { m: 8, n: 98, p: 2 };
        assert_eq!(pll.sysclk_hz(hse), Err(Error::PllOutOfRange));
    }

    #[test]
    fn flash_wait_states() {
        assert_eq!(flash_latency(board::HSI_HZ), 0);
        assert_eq!(flash_latency(30_000_000), 0);
        assert_eq!(flash_latency(30_000_001), 1);
        assert_eq!(flash_latency(168_000_000), 5);
        assert_eq!(flash_latency(180_000_000), 5);
    }

    #[test]
    fn timer_clock_doubles_when_apb_is_divided() {
        assert_eq!(timer_clock_hz(16_000_000, 1), 16_000_000);
        assert_eq!(timer_clock_hz(42_000_000, 4), 84_000_000);
        assert_eq!(timer_clock_hz(84_000_000, 2), 168_000_000);
    }
}
