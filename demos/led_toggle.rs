// ユーザLED(PG13 緑, STM32F429I-DISCO)を点滅
// レジスタのアドレスを定数で定義して直接叩くサンプル

#![no_std]
#![no_main]

use panic_halt as _;

use core::ptr;

use cortex_m_rt::entry;

#[allow(unused_imports)]
use stm32f4::stm32f429;

use stm32f429zi_rust_example::board::DISCO_LD3_PIN;
use stm32f429zi_rust_example::gpio::{self, Mode, Port};

const GPIOG_MODER: *mut u32 = (Port::G.base() + gpio::MODER_OFFSET) as *mut u32;
const GPIOG_ODR: *mut u32 = (Port::G.base() + gpio::ODR_OFFSET) as *mut u32;
const RCC_AHB1ENR: *mut u32 = gpio::RCC_AHB1ENR as *mut u32;

// 16 MHz でおよそ 0.25 秒
const DELAY_CYCLES: u32 = 4_000_000;

#[entry]
fn main() -> ! {
    unsafe {
        // PG13 へのクロック供給
        let v = ptr::read_volatile(RCC_AHB1ENR);
        ptr::write_volatile(RCC_AHB1ENR, v | Port::G.clock_enable_bit());

        // PG13 を出力（bit27 = 0, bit26 = 1）
        let v = ptr::read_volatile(GPIOG_MODER);
        ptr::write_volatile(GPIOG_MODER, gpio::moder_with(v, DISCO_LD3_PIN, Mode::Output));
    }

    loop {
        unsafe {
            let v = ptr::read_volatile(GPIOG_ODR);
            ptr::write_volatile(GPIOG_ODR, v ^ gpio::pin_mask(DISCO_LD3_PIN));
        }
        // 空ループだと最適化で消えるので asm::delay を使う
        cortex_m::asm::delay(DELAY_CYCLES);
    }
}
