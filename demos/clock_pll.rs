// 1秒ごとにLED(LD1 緑)点滅を繰り返す
// システムクロック変更サンプル
//   ST-Linkのクロック(8 MHz)を外部クロックとして取り込み、PLLで逓倍して168MHzを生成
//   これをシステムクロックとして使用するように設定
// タイマ動作サンプル（更新フラグのポーリング）

#![no_std]
#![no_main]

use panic_halt as _;

use cortex_m_rt::entry;

use cortex_m_semihosting::hprintln;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::{board, gpio};
use stm32f429zi_rust_example::clock::{self, PllConfig};
use stm32f429zi_rust_example::timer::TimeBase;

#[entry]
fn main() -> ! {
    // write は対象レジスタを全部書き換えるので注意
    // bitごとに書き換えたければ、modify
    let peripheral = stm32f429::Peripherals::take().unwrap();

    let pll = PllConfig::SYSCLK_168MHZ;
    let sysclk = pll.sysclk_hz(board::HSE_BYPASS_HZ).unwrap();
    clock::config_clock(&peripheral, &pll, sysclk);

    // APB1 = 168 / 4 = 42 MHz、タイマには 2 倍の 84 MHz が入る
    let tim_clk = clock::timer_clock_hz(sysclk / 4, 4);
    let time_base = TimeBase::new(tim_clk, 10_000, 1).unwrap();

    hprintln!("SYSCLK {} Hz, TIM2 {} Hz, {:?}", sysclk, tim_clk, time_base).unwrap();

    // 各機能へのクロック入力設定
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioben().enabled());
    peripheral.RCC.apb1enr.modify(|_, w| w.tim2en().enabled());

    // TIM2 設定
    peripheral
        .TIM2
        .arr
        .write(|w| unsafe { w.bits(u32::from(time_base.arr)) }); // オートリロードレジスタ（カウント値設定）
    peripheral
        .TIM2
        .psc
        .write(|w| unsafe { w.bits(u32::from(time_base.psc)) }); // プリスケーラ（何クロックで1カウントか設定）
    peripheral.TIM2.cr1.modify(|_, w| w.cen().enabled()); // カウント開始

    // GPIOB-0 が LD1 に接続されている
    peripheral.GPIOB.odr.modify(|_, w| w.odr0().clear_bit());
    peripheral.GPIOB.moder.modify(|_, w| w.moder0().output());

    loop {
        // 割り込みフラグ（オーバーフロー、アンダーフロー時に立つ）
        if peripheral.TIM2.sr.read().uif().bit_is_set() {
            peripheral.TIM2.sr.modify(|_, w| w.uif().clear());
            peripheral
                .GPIOB
                .odr
                .modify(|r, w| unsafe { w.bits(r.bits() ^ gpio::pin_mask(board::LD1_PIN)) });
        }
    }
}
