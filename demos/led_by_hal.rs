// 基板上のLED(LD2)を 500ms ごとに点滅
// GPIO出力 + SysTick ディレイを HAL で書いたサンプル（gpio_output_bsrr と比較用）

#![no_std]
#![no_main]

// pick a panicking behavior
use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

use cortex_m_rt::entry;

use cortex_m_semihosting::hprintln;

use stm32f4xx_hal as hal;

// pac は stm32f4::stm32f429 と同義
// prelude::* で embedded-hal のトレイト（DelayMs など）も入る
use crate::hal::{pac, prelude::*};

#[entry]
fn main() -> ! {
    let peripheral = pac::Peripherals::take().unwrap();
    let core_peripheral = cortex_m::Peripherals::take().unwrap();

    // 何も指定しなければ HSI 16 MHz のまま
    let rcc = peripheral.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // split した時点で内部的にperipheralへのクロックがONされる
    let gpiob = peripheral.GPIOB.split();
    let mut led = gpiob.pb7.into_push_pull_output(); // 出力設定 & push-pull モード

    let mut delay = core_peripheral.SYST.delay(&clocks);

    hprintln!("sysclk: {} Hz", clocks.sysclk().raw()).unwrap();

    loop {
        led.toggle();
        delay.delay_ms(500_u32);
    }
}
