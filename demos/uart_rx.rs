// USART3 で 1 文字受信するたびに LD3 (PB14 赤) を切り替える
// 'g' なら点灯、それ以外なら消灯。受信はポーリング

#![no_std]
#![no_main]

use panic_halt as _;

use core::fmt::Write;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::uart;

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    uart::init_rxtx(&peripheral);

    // LD3 (PB14)
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioben().enabled());
    peripheral.GPIOB.moder.modify(|_, w| w.moder14().output());

    let mut console = uart::Console::new(&peripheral.USART3);
    writeln!(console, "press 'g' to light LD3").unwrap();

    loop {
        let key = uart::read_byte(&peripheral.USART3);

        if key == b'g' {
            peripheral.GPIOB.odr.modify(|_, w| w.odr14().set_bit());
        } else {
            peripheral.GPIOB.odr.modify(|_, w| w.odr14().clear_bit());
        }

        // エコーバック
        uart::write_byte(&peripheral.USART3, key);
    }
}
