// タイマの出力比較で LD2 (PB7) を 1 秒ごとに反転させる
// PB7 は AF2 で TIM4_CH2 になるので、設定後は CPU を使わずにハードウェアだけで点滅する

#![no_std]
#![no_main]

use panic_halt as _;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::board;
use stm32f429zi_rust_example::timer::TimeBase;

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    let time_base = TimeBase::new(board::HSI_HZ, 10_000, 1).unwrap();

    // PB7 -> TIM4_CH2
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioben().enabled());
    peripheral.GPIOB.moder.modify(|_, w| w.moder7().alternate());
    peripheral.GPIOB.afrl.modify(|_, w| w.afrl7().af2());

    peripheral.RCC.apb1enr.modify(|_, w| w.tim4en().enabled());
    peripheral
        .TIM4
        .psc
        .write(|w| unsafe { w.bits(u32::from(time_base.psc)) });
    peripheral
        .TIM4
        .arr
        .write(|w| unsafe { w.bits(u32::from(time_base.arr)) });

    // OC2M = 011 (一致で反転)、カウンタが 0 になる度に一致する
    peripheral
        .TIM4
        .ccmr1_output()
        .modify(|_, w| unsafe { w.oc2m().bits(0b011) });
    peripheral.TIM4.ccr2.write(|w| unsafe { w.bits(0) });
    peripheral.TIM4.ccer.modify(|_, w| w.cc2e().set_bit());

    peripheral.TIM4.cnt.write(|w| unsafe { w.bits(0) });
    peripheral.TIM4.cr1.modify(|_, w| w.cen().set_bit());

    loop {}
}
