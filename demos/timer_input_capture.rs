// 入力キャプチャで LD2 の点滅周期を測る
//   TIM4_CH2 (PB7) を出力比較で 1 秒ごとに反転
//   TIM3_CH2 (PA7) で立ち上がりエッジをキャプチャ（PB7 と PA7 をジャンパで繋ぐ）
// 立ち上がりは 2 秒ごとに来るので、1 kHz カウントなら 2000 前後が表示される

#![no_std]
#![no_main]

use panic_halt as _;

use core::fmt::Write;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::board;
use stm32f429zi_rust_example::timer::{self, TimeBase};
use stm32f429zi_rust_example::uart;

// TIM4_CH2 を一致で反転 (timer_output_compare と同じ)
fn config_output_compare(peripheral: &stm32f429::Peripherals) {
    let time_base = TimeBase::new(board::HSI_HZ, 10_000, 1).unwrap();

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
    peripheral
        .TIM4
        .ccmr1_output()
        .modify(|_, w| unsafe { w.oc2m().bits(0b011) });
    peripheral.TIM4.ccr2.write(|w| unsafe { w.bits(0) });
    peripheral.TIM4.ccer.modify(|_, w| w.cc2e().set_bit());
    peripheral.TIM4.cnt.write(|w| unsafe { w.bits(0) });
    peripheral.TIM4.cr1.modify(|_, w| w.cen().set_bit());
}

// TIM3_CH2 (PA7) を 1 kHz カウントの入力キャプチャにする
fn config_input_capture(peripheral: &stm32f429::Peripherals) {
    let time_base = TimeBase::free_running(board::HSI_HZ, 1_000).unwrap();

    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioaen().enabled());
    peripheral.GPIOA.moder.modify(|_, w| w.moder7().alternate());
    peripheral.GPIOA.afrl.modify(|_, w| w.afrl7().af2());

    peripheral.RCC.apb1enr.modify(|_, w| w.tim3en().enabled());
    peripheral
        .TIM3
        .psc
        .write(|w| unsafe { w.bits(u32::from(time_base.psc)) });
    peripheral
        .TIM3
        .arr
        .write(|w| unsafe { w.bits(u32::from(time_base.arr)) });

    // CC2S = 01 (IC2 を TI2 に割り当て)、エッジは初期値の立ち上がり
    peripheral
        .TIM3
        .ccmr1_input()
        .modify(|_, w| unsafe { w.cc2s().bits(0b01) });
    peripheral.TIM3.ccer.modify(|_, w| w.cc2e().set_bit());
    peripheral.TIM3.cr1.modify(|_, w| w.cen().set_bit());
}

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    config_output_compare(&peripheral);
    config_input_capture(&peripheral);

    uart::init_tx(&peripheral);
    let mut console = uart::Console::new(&peripheral.USART3);

    let mut previous: Option<u16> = None;
    loop {
        // キャプチャされるまで待つ (CCR2 を読むと CC2IF は落ちる)
        while peripheral.TIM3.sr.read().cc2if().bit_is_clear() {}
        let timestamp = peripheral.TIM3.ccr2.read().bits() as u16;

        match previous {
            Some(previous) => writeln!(
                console,
                "timestamp: {} ms, period: {} ms",
                timestamp,
                timer::elapsed_ticks(previous, timestamp)
            )
            .unwrap(),
            None => writeln!(console, "timestamp: {} ms", timestamp).unwrap(),
        }
        previous = Some(timestamp);
    }
}
