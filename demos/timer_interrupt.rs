// タイマ割り込みを利用したLチカ
// クロックはリセット直後の HSI 16 MHz のまま

#![no_std]
#![no_main]

// pick a panicking behavior
use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

use core::cell::RefCell;
use core::fmt::Write;

use cortex_m::interrupt::Mutex;

use cortex_m_rt::entry;

use stm32f4::stm32f429;

// interrupt マクロ が使えるようになる
use stm32f4::stm32f429::interrupt;

use stm32f429zi_rust_example::board;
use stm32f429zi_rust_example::timer::TimeBase;
use stm32f429zi_rust_example::uart;

// グローバル変数(メインと割り込み関数の両方でペリフェラルアクセスするため)
static PERIPHERAL: Mutex<RefCell<Option<stm32f429::Peripherals>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    let time_base = TimeBase::new(board::HSI_HZ, 10_000, 1).unwrap();

    // 各機能へのクロック入力設定
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioben().enabled());
    peripheral.RCC.apb1enr.modify(|_, w| w.tim2en().enabled());

    // GPIOB-7 が LD2 に接続されている
    peripheral.GPIOB.odr.modify(|_, w| w.odr7().clear_bit());
    peripheral.GPIOB.moder.modify(|_, w| w.moder7().output());

    uart::init_tx(&peripheral);

    // TIM2 設定（クロックは APB1 = 16MHz）
    peripheral
        .TIM2
        .arr
        .write(|w| unsafe { w.bits(u32::from(time_base.arr)) }); // オートリロードレジスタ（カウント値設定）
    peripheral
        .TIM2
        .psc
        .write(|w| unsafe { w.bits(u32::from(time_base.psc)) }); // プリスケーラ（何クロックで1カウントか設定）
    peripheral.TIM2.dier.modify(|_, w| w.uie().enabled()); // 更新割り込み有効化
    peripheral.TIM2.cr1.modify(|_, w| w.cen().enabled()); // カウント開始

    // peripheral を グローバル変数にmove(つまり、以降peripheralの操作はグローバル変数使用必須)
    cortex_m::interrupt::free(|cs| PERIPHERAL.borrow(cs).replace(Some(peripheral)));

    // 割り込み登録（peripheral を move した後でないと ISR が空振りする）
    let core_peripheral = cortex_m::Peripherals::take().unwrap();
    let mut nvic = core_peripheral.NVIC;
    unsafe {
        // 割り込み優先度を10に変更
        nvic.set_priority(stm32f429::Interrupt::TIM2, 10);
        // TIM2割り込み有効化
        cortex_m::peripheral::NVIC::unmask(stm32f429::Interrupt::TIM2);
    }

    loop {}
}

#[interrupt]
fn TIM2() {
    cortex_m::interrupt::free(|cs| {
        // peripheral access
        let peripheral = PERIPHERAL.borrow(cs).borrow();
        let peripheral = peripheral.as_ref();
        if let Some(peripheral) = peripheral {
            peripheral.TIM2.sr.modify(|_, w| w.uif().clear());
            peripheral
                .GPIOB
                .odr
                .modify(|r, w| w.odr7().bit(!r.odr7().bit()));

            let mut console = uart::Console::new(&peripheral.USART3);
            writeln!(console, "A second passed !!").unwrap();
        } else {
            panic!("not initialized PERIPHERAL");
        }
    });
}
