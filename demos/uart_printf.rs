// USART3 (PD8 = TX) から文字列を送り続ける
// ST-LINK の仮想 COM ポートに 115200 bps 8N1 で出てくる
// core::fmt::Write を実装すれば write! / writeln! がそのまま使える（printf の代わり）

#![no_std]
#![no_main]

use panic_halt as _;

use core::fmt::{self, Write};

use cortex_m_rt::entry;

use stm32f4::stm32f429;

use stm32f429zi_rust_example::{board, uart};

struct Usart3Writer<'a> {
    usart: &'a stm32f429::USART3,
}

impl Usart3Writer<'_> {
    fn write_byte(&mut self, byte: u8) {
        // 送信データレジスタが空くまで待つ
        while self.usart.sr.read().txe().bit_is_clear() {}
        self.usart.dr.write(|w| unsafe { w.bits(u32::from(byte)) });
    }
}

impl fmt::Write for Usart3Writer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
        Ok(())
    }
}

fn uart3_tx_init(peripheral: &stm32f429::Peripherals) {
    // PD8 を AF7 (USART3_TX) に
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioden().enabled());
    peripheral.GPIOD.moder.modify(|_, w| w.moder8().alternate());
    peripheral.GPIOD.afrh.modify(|_, w| w.afrh8().af7());

    peripheral.RCC.apb1enr.modify(|_, w| w.usart3en().enabled());

    // APB1 = HSI 16 MHz
    let brr = uart::brr(board::HSI_HZ, board::UART_BAUDRATE);
    peripheral
        .USART3
        .brr
        .write(|w| unsafe { w.bits(u32::from(brr)) });

    // write で TE 以外の設定は全部初期値（8bit, パリティなし, ストップビット1）
    peripheral.USART3.cr1.write(|w| w.te().set_bit());
    // UE は最後に modify で立てる
    peripheral.USART3.cr1.modify(|_, w| w.ue().set_bit());
}

#[entry]
fn main() -> ! {
    let peripheral = stm32f429::Peripherals::take().unwrap();

    uart3_tx_init(&peripheral);

    let mut writer = Usart3Writer {
        usart: &peripheral.USART3,
    };

    let mut count: u32 = 0;
    loop {
        write!(writer, "Welcome in bare-metal programming #{}\r\n", count).unwrap();
        count = count.wrapping_add(1);
    }
}
