// ユーザLED(PG13)を BSRR で点滅
// BSRR は下位16bitに書くと High、上位16bitに書くと Low（書いたビット以外は変化しない）

#![no_std]
#![no_main]

// pick a panicking behavior
use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

use cortex_m_rt::entry;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::board::DISCO_LD3_PIN;
use stm32f429zi_rust_example::gpio;

// 16 MHz でおよそ 0.5 秒
const DELAY_CYCLES: u32 = 8_000_000;

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    peripheral.RCC.ahb1enr.modify(|_, w| w.gpiogen().enabled());
    peripheral.GPIOG.moder.modify(|_, w| w.moder13().output());

    loop {
        // BSRR は write（読み出しは常に 0 なので modify する意味がない）
        peripheral
            .GPIOG
            .bsrr
            .write(|w| unsafe { w.bits(gpio::bsrr_set(DISCO_LD3_PIN)) }); // 点灯 (bit13)
        cortex_m::asm::delay(DELAY_CYCLES);

        peripheral
            .GPIOG
            .bsrr
            .write(|w| unsafe { w.bits(gpio::bsrr_reset(DISCO_LD3_PIN)) }); // 消灯 (bit29)
        cortex_m::asm::delay(DELAY_CYCLES);
    }
}
