// 1秒ごとにLED(LD2)点滅を繰り返す
// タイマ動作サンプル（更新フラグのポーリング）
// クロックはリセット直後の HSI 16 MHz のまま

#![no_std]
#![no_main]

use panic_halt as _;

use core::fmt::Write;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::board;
use stm32f429zi_rust_example::timer::TimeBase;
use stm32f429zi_rust_example::uart;

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    // 16 MHz / 1600 = 10 kHz を 10000 カウントで 1 Hz
    let time_base = TimeBase::new(board::HSI_HZ, 10_000, 1).unwrap();

    // 各機能へのクロック入力設定
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioben().enabled());
    peripheral.RCC.apb1enr.modify(|_, w| w.tim2en().enabled());

    // GPIOB-7 が LD2 に接続されている
    peripheral.GPIOB.odr.modify(|_, w| w.odr7().clear_bit());
    peripheral.GPIOB.moder.modify(|_, w| w.moder7().output());

    uart::init_tx(&peripheral);
    let mut console = uart::Console::new(&peripheral.USART3);

    // TIM2 設定
    peripheral
        .TIM2
        .psc
        .write(|w| unsafe { w.bits(u32::from(time_base.psc)) });
    peripheral
        .TIM2
        .arr
        .write(|w| unsafe { w.bits(u32::from(time_base.arr)) });
    peripheral.TIM2.cnt.write(|w| unsafe { w.bits(0) });
    peripheral.TIM2.cr1.modify(|_, w| w.cen().enabled()); // カウント開始

    loop {
        // 更新フラグが立つまで待つ
        while peripheral.TIM2.sr.read().uif().bit_is_clear() {}
        peripheral.TIM2.sr.modify(|_, w| w.uif().clear());

        peripheral
            .GPIOB
            .odr
            .modify(|r, w| w.odr7().bit(!r.odr7().bit()));
        writeln!(console, "A second passed !!").unwrap();
    }
}
