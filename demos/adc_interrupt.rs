// ADC1 channel1 (PA1) の変換完了割り込み
// 割り込み関数で変換結果を取り出し、メインで USART3 に出力して次の変換を開始する

#![no_std]
#![no_main]

// pick a panicking behavior
use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

use core::cell::Cell;
use core::fmt::Write;

use cortex_m::interrupt::Mutex;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

// interrupt マクロ が使えるようになる
use stm32f4::stm32f429::interrupt;

use stm32f429zi_rust_example::{adc, systick, uart};

// 割り込み関数で書き込み、メインで取り出す
static SENSOR_VALUE: Mutex<Cell<Option<u16>>> = Mutex::new(Cell::new(None));

fn config_adc(peripheral: &stm32f429::Peripherals) {
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioaen().enabled());
    peripheral.GPIOA.moder.modify(|_, w| w.moder1().analog());

    peripheral.RCC.apb2enr.modify(|_, w| w.adc1en().enabled());

    // 変換完了 (EOC) 割り込み
    peripheral.ADC1.cr1.modify(|_, w| w.eocie().set_bit());

    peripheral.ADC1.sqr3.modify(|_, w| unsafe { w.sq1().bits(1) });
    peripheral.ADC1.sqr1.modify(|_, w| w.l().bits(0));

    peripheral.ADC1.cr2.modify(|_, w| w.adon().enabled());

    unsafe {
        // ADC1~3 共通の割り込み
        cortex_m::peripheral::NVIC::unmask(stm32f429::Interrupt::ADC);
    }
}

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();
    let mut core_peripheral = cortex_m::Peripherals::take().unwrap();

    uart::init_tx(&peripheral);
    config_adc(&peripheral);

    let mut console = uart::Console::new(&peripheral.USART3);

    peripheral.ADC1.cr2.modify(|_, w| w.swstart().start());

    loop {
        let value = cortex_m::interrupt::free(|cs| SENSOR_VALUE.borrow(cs).take());
        if let Some(value) = value {
            writeln!(
                console,
                "Sensor value: {} ({} mV)",
                value,
                adc::to_millivolts(value)
            )
            .unwrap();

            systick::delay_ms(&mut core_peripheral.SYST, 200);
            peripheral.ADC1.cr2.modify(|_, w| w.swstart().start());
        }
    }
}

#[interrupt]
fn ADC() {
    // main が持っている Peripherals には触れないので、ADC1 のレジスタだけ直接参照する
    let adc1 = unsafe { &*stm32f429::ADC1::ptr() };

    if adc1.sr.read().eoc().is_complete() {
        // DR を読むと EOC もクリアされる
        let value = adc1.dr.read().data().bits();
        adc1.sr.modify(|_, w| w.strt().clear_bit());
        cortex_m::interrupt::free(|cs| SENSOR_VALUE.borrow(cs).set(Some(value)));
    }
}
