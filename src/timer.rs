//! 汎用タイマ (TIM2 ~ TIM5) のタイムベース計算

use crate::Error;

/// PSC / ARR に書く値
///
/// カウンタはタイマクロック / (psc + 1) で進み、arr まで数えると更新イベント (UIF) が立つ。
/// 0 から数えるのでどちらも「分周比 - 1」を書く。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBase {
    pub psc: u16,
    pub arr: u16,
}

impl TimeBase {
    /// timer_clk_hz を tick_hz まで分周し、update_hz ごとに更新イベントを出す設定
    ///
    /// ARR は 16bit タイマ (TIM3/TIM4) にも書けるように 16bit に制限する。
    pub fn new(timer_clk_hz: u32, tick_hz: u32, update_hz: u32) -> Result<Self, Error> {
        let psc = prescaler(timer_clk_hz, tick_hz)?;
        if update_hz == 0 {
            return Err(Error::ZeroFrequency);
        }
        let ticks = tick_hz / update_hz;
        if ticks == 0 {
            return Err(Error::Unreachable);
        }
        if ticks > 0x1_0000 {
            return Err(Error::ReloadOverflow);
        }
        Ok(Self {
            psc,
            arr: (ticks - 1) as u16,
        })
    }

    /// 入力キャプチャ用: 分周だけして、カウンタは 16bit いっぱいまで回す
    pub fn free_running(timer_clk_hz: u32, tick_hz: u32) -> Result<Self, Error> {
        Ok(Self {
            psc: prescaler(timer_clk_hz, tick_hz)?,
            arr: u16::MAX,
        })
    }
}

fn prescaler(timer_clk_hz: u32, tick_hz: u32) -> Result<u16, Error> {
    if timer_clk_hz == 0 || tick_hz == 0 {
        return Err(Error::ZeroFrequency);
    }
    let div = timer_clk_hz / tick_hz;
    if div == 0 {
        return Err(Error::Unreachable);
    }
    if div > 0x1_0000 {
        return Err(Error::PrescalerOverflow);
    }
    Ok((div - 1) as u16)
}

/// 16bit カウンタの 2 回のキャプチャ値の差 (1 回までのオーバーフローは吸収する)
pub const fn elapsed_ticks(previous: u16, now: u16) -> u16 {
    now.wrapping_sub(previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;

    #[test]
    fn one_hertz_from_hsi() {
        // 16 MHz / 1600 = 10 kHz, 10000 カウントで 1 秒
        let tb = TimeBase::new(board::HSI_HZ, 10_000, 1).unwrap();
        assert_eq!(tb, TimeBase { psc: 1600 - 1, arr: 10000 - 1 });
    }

    #[test]
    fn one_hertz_from_pll_timer_clock() {
        // APB1 42 MHz, タイマクロックはその 2 倍
        let tb = TimeBase::new(84_000_000, 10_000, 1).unwrap();
        assert_eq!(tb, TimeBase { psc: 8400 - 1, arr: 10000 - 1 });
    }

    #[test]
    fn capture_time_base_is_one_millisecond() {
        let tb = TimeBase::free_running(board::HSI_HZ, 1_000).unwrap();
        assert_eq!(tb.psc, 16000 - 1);
        assert_eq!(tb.arr, 0xFFFF);
    }

    #[test]
    fn rejects_out_of_range_settings() {
        assert_eq!(TimeBase::new(0, 1, 1), Err(Error::ZeroFrequency));
        assert_eq!(TimeBase::new(16_000_000, 0, 1), Err(Error::ZeroFrequency));
        assert_eq!(TimeBase::new(16_000_000, 1_000, 0), Err(Error::ZeroFrequency));
        assert_eq!(TimeBase::new(16_000_000, 32_000_000, 1), Err(Error::Unreachable));
        assert_eq!(TimeBase::new(16_000_000, 100, 1), Err(Error::PrescalerOverflow));
        assert_eq!(TimeBase::new(16_000_000, 1_000_000, 1), Err(Error::ReloadOverflow));
        assert_eq!(TimeBase::new(16_000_000, 10_000, 20_000), Err(Error::Unreachable));
    }

    #[test]
    fn limits_are_inclusive() {
        // 分周比 65536 と カウント 65536 はぎりぎり入る
        let tb = TimeBase::new(65_536_000, 1_000, 1).unwrap();
        assert_eq!(tb.psc, 0xFFFF);
        let tb = TimeBase::new(65_536, 65_536, 1).unwrap();
        assert_eq!(tb, TimeBase { psc: 0, arr: 0xFFFF });
    }

    #[test]
    fn elapsed_ticks_wraps_once() {
        assert_eq!(elapsed_ticks(1000, 3000), 2000);
        assert_eq!(elapsed_ticks(65000, 1464), 2000);
        assert_eq!(elapsed_ticks(5, 5), 0);
    }
}
