// USART3 の送信を DMA で行う
// DMA1 stream3 channel4 (USART3_TX) でメモリ上の文字列を DR へ転送し、
// 転送完了割り込みを受けたら 1 秒待って再送する。

#![no_std]
#![no_main]

// pick a panicking behavior
use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

use core::cell::{Cell, RefCell};

use cortex_m::interrupt::Mutex;

use cortex_m_rt::entry;

use stm32f4::stm32f429;
use stm32f4::stm32f429::interrupt;

use stm32f429zi_rust_example::{systick, uart};

static MESSAGE: &[u8] = b"Hello from DMA1 stream 3\r\n";

static PERIPHERAL: Mutex<RefCell<Option<stm32f429::Peripherals>>> = Mutex::new(RefCell::new(None));

// 割り込み関数で立てて、メインで下ろす
static TRANSFER_DONE: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

// stream3 の割り込みフラグ (FEIF, DMEIF, TEIF, HTIF, TCIF) を全部クリア
fn clear_stream3_flags(peripheral: &stm32f429::Peripherals) {
    peripheral.DMA1.lifcr.write(|w| {
        w.cfeif3()
            .set_bit()
            .cdmeif3()
            .set_bit()
            .cteif3()
            .set_bit()
            .chtif3()
            .set_bit()
            .ctcif3()
            .set_bit()
    });
}

fn config_dma(peripheral: &stm32f429::Peripherals) {
    peripheral.RCC.ahb1enr.modify(|_, w| w.dma1en().enabled());

    // 設定を変える前にストリームを止める
    peripheral.DMA1.st[3].cr.modify(|_, w| w.en().disabled());
    while peripheral.DMA1.st[3].cr.read().en().bit_is_set() {}

    clear_stream3_flags(peripheral);

    // 転送先ペリフェラルアドレス（USART3_DR）
    let dr = unsafe { &(*stm32f429::USART3::ptr()).dr as *const _ as u32 };
    peripheral.DMA1.st[3]
        .par
        .write(|w| unsafe { w.pa().bits(dr) });

    // write で他のビットは初期値（データサイズは 1byte）
    peripheral.DMA1.st[3].cr.write(|w| {
        w.chsel()
            .bits(4) // channel4
            .minc()
            .incremented() // メモリアドレスインクリメント
            .dir()
            .memory_to_peripheral()
            .tcie()
            .enabled() // 転送完了割り込み
    });

    // FIFO を使わずダイレクトモード
    peripheral.DMA1.st[3].fcr.write(|w| unsafe { w.bits(0) });

    // USART3 の送信 DMA 要求を有効化
    peripheral.USART3.cr3.modify(|_, w| w.dmat().set_bit());
}

fn start_transfer(peripheral: &stm32f429::Peripherals) {
    peripheral.DMA1.st[3].cr.modify(|_, w| w.en().disabled());
    while peripheral.DMA1.st[3].cr.read().en().bit_is_set() {}

    clear_stream3_flags(peripheral);

    // 転送元メモリアドレスと転送データ数
    peripheral.DMA1.st[3]
        .m0ar
        .write(|w| unsafe { w.m0a().bits(MESSAGE.as_ptr() as u32) });
    peripheral.DMA1.st[3]
        .ndtr
        .write(|w| w.ndt().bits(MESSAGE.len() as u16));

    peripheral.DMA1.st[3].cr.modify(|_, w| w.en().enabled());
}

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();
    let mut core_peripheral = cortex_m::Peripherals::take().unwrap();

    uart::init_tx(&peripheral);
    config_dma(&peripheral);

    cortex_m::interrupt::free(|cs| PERIPHERAL.borrow(cs).replace(Some(peripheral)));

    unsafe {
        cortex_m::peripheral::NVIC::unmask(stm32f429::Interrupt::DMA1_STREAM3);
    }

    cortex_m::interrupt::free(|cs| {
        if let Some(peripheral) = PERIPHERAL.borrow(cs).borrow().as_ref() {
            start_transfer(peripheral);
        }
    });

    loop {
        let done = cortex_m::interrupt::free(|cs| TRANSFER_DONE.borrow(cs).replace(false));
        if done {
            systick::delay_ms(&mut core_peripheral.SYST, 1000);
            cortex_m::interrupt::free(|cs| {
                if let Some(peripheral) = PERIPHERAL.borrow(cs).borrow().as_ref() {
                    start_transfer(peripheral);
                }
            });
        }
    }
}

#[interrupt]
fn DMA1_STREAM3() {
    cortex_m::interrupt::free(|cs| {
        if let Some(peripheral) = PERIPHERAL.borrow(cs).borrow().as_ref() {
            if peripheral.DMA1.lisr.read().tcif3().bit_is_set() {
                peripheral.DMA1.lifcr.write(|w| w.ctcif3().set_bit());
                TRANSFER_DONE.borrow(cs).set(true);
            }
        } else {
            panic!("not initialized PERIPHERAL");
        }
    });
}
