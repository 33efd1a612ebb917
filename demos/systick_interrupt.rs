// SysTick 割り込み (1 Hz) で LD2 (PB7) を反転して USART3 にメッセージを出す

#![no_std]
#![no_main]

// pick a panicking behavior
use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

use core::cell::RefCell;
use core::fmt::Write;

use cortex_m::interrupt::Mutex;
use cortex_m::peripheral::syst::SystClkSource;

use cortex_m_rt::{entry, exception};

use stm32f4::stm32f429;

use stm32f429zi_rust_example::{board, systick, uart};

static PERIPHERAL: Mutex<RefCell<Option<stm32f429::Peripherals>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();
    let core_peripheral = cortex_m::Peripherals::take().unwrap();

    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioben().enabled());
    peripheral.GPIOB.moder.modify(|_, w| w.moder7().output());

    uart::init_tx(&peripheral);

    cortex_m::interrupt::free(|cs| PERIPHERAL.borrow(cs).replace(Some(peripheral)));

    // systick interupt setting
    // プロセッサクロック 16 MHz なら 1 秒 (16_000_000 - 1) が 24bit にぎりぎり入る
    let reload = systick::reload_for(board::HSI_HZ, 1).unwrap();
    let mut syst = core_peripheral.SYST;
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(reload);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();

    loop {}
}

#[exception]
fn SysTick() {
    cortex_m::interrupt::free(|cs| {
        if let Some(peripheral) = PERIPHERAL.borrow(cs).borrow().as_ref() {
            peripheral
                .GPIOB
                .odr
                .modify(|r, w| w.odr7().bit(!r.odr7().bit()));

            let mut console = uart::Console::new(&peripheral.USART3);
            writeln!(console, "A second just passed").unwrap();
        }
    });
}
