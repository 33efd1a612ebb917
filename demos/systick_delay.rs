// SysTick のポーリングで 1 秒待つ度に LD2 (PB7) を反転して USART3 にメッセージを出す

#![no_std]
#![no_main]

use panic_halt as _;

use core::fmt::Write;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::{systick, uart};

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();
    let mut core_peripheral = cortex_m::Peripherals::take().unwrap();

    // LD2 (PB7)
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioben().enabled());
    peripheral.GPIOB.moder.modify(|_, w| w.moder7().output());

    uart::init_tx(&peripheral);
    let mut console = uart::Console::new(&peripheral.USART3);

    loop {
        // 1 ms のリロードを 1000 回数える
        systick::delay_ms(&mut core_peripheral.SYST, 1000);

        peripheral
            .GPIOB
            .odr
            .modify(|r, w| w.odr7().bit(!r.odr7().bit()));
        writeln!(console, "A second just passed").unwrap();
    }
}
