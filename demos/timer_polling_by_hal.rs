// 1秒ごとにLED(LD2)点滅を繰り返す
// timer_polling / clock_pll の HAL 版
//   ST-Linkのクロックを外部クロックとして取り込み、PLLで逓倍して168MHzを生成

#![no_std]
#![no_main]

// pick a panicking behavior
use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

use cortex_m_rt::entry;

use embedded_hal::digital::v2::ToggleableOutputPin;

use stm32f4xx_hal as hal;

use hal::{pac, prelude::*};

// embedded-hal のトレイトだけで書いておけば HAL を替えても使える
fn toggle<P: ToggleableOutputPin>(led: &mut P) {
    led.toggle().ok();
}

#[entry]
fn main() -> ! {
    let peripheral = pac::Peripherals::take().unwrap();

    let rcc = peripheral.RCC.constrain();
    let clocks = rcc
        .cfgr
        .use_hse(8.MHz())
        .bypass_hse_oscillator()
        .sysclk(168.MHz())
        .pclk1(42.MHz()) // peripheral clock 1
        .freeze();

    // タイマの動作クロックは84MHzのはず
    // 1カウントの周波数を指定できるが、動作クロックの84MHzを前提に
    // 内部のレジスタで実現不可能な値は無理（実行時に停止する）
    let mut timer_tim2 = peripheral.TIM2.counter::<10000>(&clocks);
    timer_tim2.start(1.secs()).unwrap();

    let gpiob = peripheral.GPIOB.split();
    let mut led = gpiob.pb7.into_push_pull_output(); // 出力設定 & push-pull モード
    led.set_low();

    loop {
        // 更新イベントが来るまでブロック
        nb::block!(timer_tim2.wait()).unwrap();
        toggle(&mut led);
    }
}
