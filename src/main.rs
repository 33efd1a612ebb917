// semihosting経由で「hello, world」とクロック設定を出力
// NUCLEO-F429ZI の動作確認サンプル（デモ本体は demos/ 以下）

#![no_std]
#![no_main]

// pick a panicking behavior
use panic_halt as _; // you can put a breakpoint on `rust_begin_unwind` to catch panics

// cortex-m コア向けのスタートアップ処理を提供
// メモリの初期化から例外テーブルのシンボル登録（リセット以外はダミーの定義）まで実施してくれる。
use cortex_m_rt::entry;

use cortex_m_semihosting::hprintln;

// このデバイスクレートをuseすることで、割り込みベクタテーブルのシンボル定義が自動登録される。
// これ無しでビルドすると cortex-m-rt の "device" features がONなのにテーブル定義が空になるので怒られる。
#[allow(unused_imports)]
use stm32f4::stm32f429;

use stm32f429zi_rust_example::{board, uart};

#[entry]
fn main() -> ! {
    hprintln!("hello, world").unwrap();
    hprintln!(
        "SYSCLK {} Hz (HSI), USART3 {} baud, BRR 0x{:X}",
        board::HSI_HZ,
        board::UART_BAUDRATE,
        uart::brr(board::HSI_HZ, board::UART_BAUDRATE)
    )
    .unwrap();
    loop {}
}
