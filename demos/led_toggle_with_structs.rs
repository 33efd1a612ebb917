// ユーザLED(PG13)を点滅（led_toggle と同じ動作）
// RCC / GPIO のレジスタ配置を構造体で表現して、ベースアドレスに重ねるサンプル

#![no_std]
#![no_main]

use panic_halt as _;

use core::mem::size_of;
use core::ptr::addr_of_mut;

use cortex_m_rt::entry;

#[allow(unused_imports)]
use stm32f4::stm32f429;

use stm32f429zi_rust_example::board::DISCO_LD3_PIN;
use stm32f429zi_rust_example::gpio::{self, Mode, Port};

// AHB1ENR (0x30) まで 32bit レジスタが 12 個ある。使わないものは配列で埋めてオフセットを合わせる
#[repr(C)]
struct RccRegisters {
    _reserved: [u32; 12],
    ahb1enr: u32,
}

// MODER (0x00) の後 OTYPER, OSPEEDR, PUPDR, IDR を飛ばして ODR (0x14)
#[repr(C)]
struct GpioRegisters {
    moder: u32,
    _reserved: [u32; 4],
    odr: u32,
}

// オフセットがずれていたらコンパイルエラー
const _: () = assert!(size_of::<RccRegisters>() == 0x30 + 4);
const _: () = assert!(size_of::<GpioRegisters>() == 0x14 + 4);

const RCC: *mut RccRegisters = gpio::RCC_BASE as *mut RccRegisters;
const GPIOG: *mut GpioRegisters = Port::G.base() as *mut GpioRegisters;

const DELAY_CYCLES: u32 = 8_000_000;

#[entry]
fn main() -> ! {
    unsafe {
        let ahb1enr = addr_of_mut!((*RCC).ahb1enr);
        ahb1enr.write_volatile(ahb1enr.read_volatile() | Port::G.clock_enable_bit());

        let moder = addr_of_mut!((*GPIOG).moder);
        moder.write_volatile(gpio::moder_with(moder.read_volatile(), DISCO_LD3_PIN, Mode::Output));
    }

    loop {
        unsafe {
            let odr = addr_of_mut!((*GPIOG).odr);
            odr.write_volatile(odr.read_volatile() ^ gpio::pin_mask(DISCO_LD3_PIN));
        }
        cortex_m::asm::delay(DELAY_CYCLES);
    }
}
