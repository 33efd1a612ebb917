// ADC1 channel1 (PA1) を連続変換モードで読み続けて USART3 へ出力
// CONT = 1 なら SWSTART は最初の 1 回だけでよい

#![no_std]
#![no_main]

use panic_halt as _;

use core::fmt::Write;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::{adc, uart};

fn config_adc(peripheral: &stm32f429::Peripherals) {
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioaen().enabled());
    peripheral.GPIOA.moder.modify(|_, w| w.moder1().analog());

    peripheral.RCC.apb2enr.modify(|_, w| w.adc1en().enabled());

    peripheral.ADC1.sqr3.modify(|_, w| unsafe { w.sq1().bits(1) });
    peripheral.ADC1.sqr1.modify(|_, w| w.l().bits(0));

    // 連続変換
    peripheral.ADC1.cr2.modify(|_, w| w.cont().set_bit());
    peripheral.ADC1.cr2.modify(|_, w| w.adon().enabled());
}

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    uart::init_tx(&peripheral);
    config_adc(&peripheral);

    peripheral.ADC1.cr2.modify(|_, w| w.swstart().start());

    let mut console = uart::Console::new(&peripheral.USART3);

    loop {
        while peripheral.ADC1.sr.read().eoc().is_not_complete() {}
        let value = peripheral.ADC1.dr.read().data().bits();
        writeln!(console, "Sensor value: {} mV", adc::to_millivolts(value)).unwrap();
    }
}
