// ユーザボタン(PA0)を押している間だけユーザLED(PG13)を点灯
// GPIO入力 (IDR) と BSRR のサンプル (STM32F429I-DISCO のピン配置)

#![no_std]
#![no_main]

use panic_halt as _;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::board::{DISCO_B1_PIN, DISCO_LD3_PIN};
use stm32f429zi_rust_example::gpio;

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    // 各機能へのクロック入力設定
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioaen().enabled());
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpiogen().enabled());

    peripheral.GPIOG.moder.modify(|_, w| w.moder13().output());
    // リセット値も入力だが明示しておく
    peripheral.GPIOA.moder.modify(|_, w| w.moder0().input());

    loop {
        // ボタンは押すと High
        let pressed = peripheral.GPIOA.idr.read().bits() & gpio::pin_mask(DISCO_B1_PIN) != 0;
        let bsrr = if pressed {
            gpio::bsrr_set(DISCO_LD3_PIN)
        } else {
            gpio::bsrr_reset(DISCO_LD3_PIN)
        };
        peripheral.GPIOG.bsrr.write(|w| unsafe { w.bits(bsrr) });
    }
}
