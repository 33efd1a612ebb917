// ADC1 channel1 (PA1) の電圧を 1 回ずつ変換して USART3 へ出力
// シングル変換モード: SWSTART の度に 1 回だけ変換する

// 実用的に使う時は、誤差修正とサンプリング時間計算が必要

#![no_std]
#![no_main]

use panic_halt as _;

use core::fmt::Write;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::{adc, systick, uart};

// ADC1 - channel 1
fn config_adc(peripheral: &stm32f429::Peripherals) {
    // PA1 をアナログに
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioaen().enabled());
    peripheral.GPIOA.moder.modify(|_, w| w.moder1().analog());

    peripheral.RCC.apb2enr.modify(|_, w| w.adc1en().enabled());

    peripheral.ADC1.smpr2.modify(|_, w| w.smp1().cycles56()); // 実験なので適当に長く設定
    peripheral.ADC1.sqr3.modify(|_, w| unsafe { w.sq1().bits(1) }); // 変換1番目にchannel 1 を設定
    peripheral.ADC1.sqr1.modify(|_, w| w.l().bits(0)); // 変換数 - 1 (1 channel だけ)

    peripheral.ADC1.cr2.modify(|_, w| w.adon().enabled());
}

fn read_once(peripheral: &stm32f429::Peripherals) -> u16 {
    peripheral.ADC1.cr2.modify(|_, w| w.swstart().start());
    while peripheral.ADC1.sr.read().eoc().is_not_complete() {}
    // DRレジスタリード（EOCも自動でクリア）
    peripheral.ADC1.dr.read().data().bits()
}

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();
    let mut core_peripheral = cortex_m::Peripherals::take().unwrap();

    uart::init_tx(&peripheral);
    config_adc(&peripheral);

    let mut console = uart::Console::new(&peripheral.USART3);

    loop {
        let value = read_once(&peripheral);
        writeln!(
            console,
            "Sensor value: {} ({} mV)",
            value,
            adc::to_millivolts(value)
        )
        .unwrap();

        systick::delay_ms(&mut core_peripheral.SYST, 200);
    }
}
