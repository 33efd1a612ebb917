// USART3 の送信割り込み (TXE) で 'C' を送り続ける
// 送信データレジスタが空く度に割り込みが入り、その中で次の 1byte を書く

#![no_std]
#![no_main]

use panic_halt as _;

use core::cell::RefCell;

use cortex_m::interrupt::Mutex;

use cortex_m_rt::entry;

use stm32f4::stm32f429;
use stm32f4::stm32f429::interrupt;

use stm32f429zi_rust_example::uart;

const KEY: u8 = b'C';

static PERIPHERAL: Mutex<RefCell<Option<stm32f429::Peripherals>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    cortex_m::interrupt::free(|cs| {
        PERIPHERAL.borrow(cs).replace(Some(peripheral));
        if let Some(peripheral) = PERIPHERAL.borrow(cs).borrow().as_ref() {
            uart::init_tx_interrupt(peripheral);
        }
    });

    loop {}
}

#[interrupt]
fn USART3() {
    cortex_m::interrupt::free(|cs| {
        if let Some(peripheral) = PERIPHERAL.borrow(cs).borrow().as_ref() {
            // TXE は DR に書けばクリアされる
            if peripheral.USART3.sr.read().txe().bit_is_set() {
                peripheral
                    .USART3
                    .dr
                    .write(|w| unsafe { w.bits(u32::from(KEY)) });
            }
        }
    });
}
