// 外部割り込みでLED(LD2)のH/Lを切替、USART3にメッセージ出力
// ユーザボタン B1 (PC13) の立ち下がりエッジをトリガーとする。

#![no_std]
#![no_main]

// pick a panicking behavior
use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

use core::cell::RefCell;
use core::fmt::Write;

// cortex-m コア共通の機能を提供
use cortex_m::interrupt::Mutex;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

// interrupt マクロ が使えるようになる
// 割り込み関数の定義に必要
// （デフォルトは何もしないことが定義されていて、そこに上書きする感じ）
use stm32f4::stm32f429::interrupt;

use stm32f429zi_rust_example::uart;

// グローバル変数(メインと割り込み関数の両方でペリフェラルアクセスするため)
static PERIPHERAL: Mutex<RefCell<Option<stm32f429::Peripherals>>> = Mutex::new(RefCell::new(None));

fn config_exti(peripheral: &stm32f429::Peripherals) {
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpiocen().enabled());
    peripheral.RCC.apb2enr.modify(|_, w| w.syscfgen().enabled());

    // PC13 を入力（リセット値だが明示）
    peripheral.GPIOC.moder.modify(|_, w| w.moder13().input());

    // exti line 13 でポートCを外部割り込みのソースとする（EXTICR4 の bit7..4 = 0b0010）
    peripheral
        .SYSCFG
        .exticr4
        .modify(|_, w| unsafe { w.exti13().bits(0b0010) });
    // EXTI line 13 の割り込みを有効化
    peripheral.EXTI.imr.modify(|_, w| w.mr13().set_bit());
    // 立ち下がりエッジでトリガーする
    peripheral.EXTI.ftsr.modify(|_, w| w.tr13().set_bit());
}

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    // LD2 (PB7)
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioben().enabled());
    peripheral.GPIOB.moder.modify(|_, w| w.moder7().output());

    uart::init_tx(&peripheral);

    config_exti(&peripheral);

    // peripheral を グローバル変数にmove(つまり、以降peripheralの操作はグローバル変数使用必須)
    cortex_m::interrupt::free(|cs| PERIPHERAL.borrow(cs).replace(Some(peripheral)));

    // グローバルに移してから NVIC を許可する（割り込み関数で None を見ないように）
    unsafe {
        // EXTI15_10割り込み有効化（EXTI13で割り込みが発生するので）
        cortex_m::peripheral::NVIC::unmask(stm32f429::Interrupt::EXTI15_10);
    }

    loop {}
}

#[interrupt]
fn EXTI15_10() {
    cortex_m::interrupt::free(|cs| {
        let peripheral = PERIPHERAL.borrow(cs).borrow();
        let peripheral = peripheral.as_ref();
        if let Some(peripheral) = peripheral {
            // line 13 以外 (10~15 は共通の割り込み) なら何もしない
            if peripheral.EXTI.pr.read().pr13().bit_is_clear() {
                return;
            }
            // PR は 1 を書いてクリア
            peripheral.EXTI.pr.write(|w| w.pr13().set_bit());

            let mut console = uart::Console::new(&peripheral.USART3);
            writeln!(console, "Someone pressed that button").unwrap();

            peripheral.GPIOB.odr.modify(|r, w| w.odr7().bit(!r.odr7().bit()));
        } else {
            panic!("not found peripheral");
        }
    });
}
