// 基板上のLED(LD2 青, LD3 赤)を点灯
// PAC を使わずにアドレスを直接叩くサンプル
//   RCC_AHB1ENR: 0x4002_3830
//   GPIOB_MODER: 0x4002_0400
//   GPIOB_ODR  : 0x4002_0414

#![no_std]
#![no_main]

use panic_halt as _;

use core::ptr;

use cortex_m_rt::entry;

// ベクタテーブル登録のため（レジスタ操作には使わない）
#[allow(unused_imports)]
use stm32f4::stm32f429;

use stm32f429zi_rust_example::board::{LD2_PIN, LD3_PIN};
use stm32f429zi_rust_example::gpio::{self, Mode, Port};

// read-modify-write を volatile で行う（最適化で消されないように）
unsafe fn modify(addr: u32, f: impl FnOnce(u32) -> u32) {
    let reg = addr as *mut u32;
    ptr::write_volatile(reg, f(ptr::read_volatile(reg)));
}

#[entry]
fn main() -> ! {
    let moder = Port::B.base() + gpio::MODER_OFFSET;
    let odr = Port::B.base() + gpio::ODR_OFFSET;

    unsafe {
        // GPIOB にクロック供給
        modify(gpio::RCC_AHB1ENR, |v| v | Port::B.clock_enable_bit());

        // PB7, PB14 を出力 ('01')
        modify(moder, |v| gpio::moder_with(v, LD2_PIN, Mode::Output));
        modify(moder, |v| gpio::moder_with(v, LD3_PIN, Mode::Output));

        modify(odr, |v| v | gpio::pin_mask(LD2_PIN) | gpio::pin_mask(LD3_PIN));
    }

    loop {}
}
