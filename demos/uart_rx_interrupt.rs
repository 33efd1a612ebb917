// USART3 の受信割り込み (RXNE) で LD2 (PB7 青) を切り替える
// '1' を受信したら点灯、それ以外なら消灯

#![no_std]
#![no_main]

// pick a panicking behavior
use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

use core::cell::RefCell;

use cortex_m::interrupt::Mutex;

use cortex_m_rt::entry;

use stm32f4::stm32f429;
use stm32f4::stm32f429::interrupt;

use stm32f429zi_rust_example::uart;

// グローバル変数(メインと割り込み関数の両方でペリフェラルアクセスするため)
static PERIPHERAL: Mutex<RefCell<Option<stm32f429::Peripherals>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    // LD2 (PB7)
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioben().enabled());
    peripheral.GPIOB.moder.modify(|_, w| w.moder7().output());

    // 割り込みが入る前にグローバルへ移す
    cortex_m::interrupt::free(|cs| {
        PERIPHERAL.borrow(cs).replace(Some(peripheral));
        if let Some(peripheral) = PERIPHERAL.borrow(cs).borrow().as_ref() {
            // NVIC の USART3 もここで有効になるが、クリティカルセクションを抜けるまでは入らない
            uart::init_rx_interrupt(peripheral);
        }
    });

    loop {}
}

fn on_received(peripheral: &stm32f429::Peripherals, key: u8) {
    if key == b'1' {
        peripheral.GPIOB.odr.modify(|_, w| w.odr7().set_bit());
    } else {
        peripheral.GPIOB.odr.modify(|_, w| w.odr7().clear_bit());
    }
}

#[interrupt]
fn USART3() {
    cortex_m::interrupt::free(|cs| {
        let peripheral = PERIPHERAL.borrow(cs).borrow();
        let peripheral = peripheral.as_ref();
        if let Some(peripheral) = peripheral {
            // RXNE: 受信データあり（DR を読むとクリアされる）
            if peripheral.USART3.sr.read().rxne().bit_is_set() {
                let key = peripheral.USART3.dr.read().bits() as u8;
                on_received(peripheral, key);
            }
        } else {
            panic!("not initialized PERIPHERAL");
        }
    });
}
