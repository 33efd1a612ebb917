// uart_printf と同じ出力を、ライブラリ側の USART3 コンソールで行う

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

    uart::init_tx(&peripheral);
    let mut console = uart::Console::new(&peripheral.USART3);

    loop {
        // Console が '\n' を "\r\n" にしてくれる
        writeln!(console, "Welcome in bare-metal programming").unwrap();
    }
}
