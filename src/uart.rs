//! USART3 コンソール
//!
//! NUCLEO-144 では USART3 (PD8 = TX, PD9 = RX, AF7) が ST-LINK の仮想 COM ポートに
//! つながっているので、ホスト側は `screen /dev/ttyACM0 115200` などで見られる。
//! クロックはリセット直後の HSI 16 MHz (APB1 = 16 MHz) 前提。

use core::fmt;

use stm32f4::stm32f429;

use crate::board;

/// BRR に書く値 (16 倍オーバーサンプリング、四捨五入)
///
/// 仮数部と小数部に分けずに PCLK / baud をそのまま書いても
/// 下位 4bit が小数部として扱われるので同じ結果になる。
pub const fn brr(pclk_hz: u32, baud: u32) -> u16 {
    ((pclk_hz + baud / 2) / baud) as u16
}

/// 送受信の向き
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Tx,
    RxTx,
}

// PD8 (と PD9) を AF7 にする
fn config_pins(peripheral: &stm32f429::Peripherals, direction: Direction) {
    peripheral.RCC.ahb1enr.modify(|_, w| w.gpioden().enabled());

    peripheral.GPIOD.moder.modify(|_, w| w.moder8().alternate());
    peripheral.GPIOD.afrh.modify(|_, w| w.afrh8().af7()); // USART3_TX

    if direction == Direction::RxTx {
        peripheral.GPIOD.moder.modify(|_, w| w.moder9().alternate());
        peripheral.GPIOD.afrh.modify(|_, w| w.afrh9().af7()); // USART3_RX
    }
}

// ボーレートと転送方向の設定 (UE はまだ立てない)
fn config_usart(peripheral: &stm32f429::Peripherals, direction: Direction) {
    peripheral.RCC.apb1enr.modify(|_, w| w.usart3en().enabled());

    let brr = brr(board::HSI_HZ, board::UART_BAUDRATE);
    peripheral
        .USART3
        .brr
        .write(|w| unsafe { w.bits(u32::from(brr)) });

    // write なので他の設定 (8bit, パリティなし, オーバーサンプリング16) は初期値に戻る
    match direction {
        Direction::Tx => peripheral.USART3.cr1.write(|w| w.te().set_bit()),
        Direction::RxTx => peripheral
            .USART3
            .cr1
            .write(|w| w.te().set_bit().re().set_bit()),
    }
}

fn enable(peripheral: &stm32f429::Peripherals) {
    peripheral.USART3.cr1.modify(|_, w| w.ue().set_bit());
}

/// 送信のみ (PD8)
pub fn init_tx(peripheral: &stm32f429::Peripherals) {
    config_pins(peripheral, Direction::Tx);
    config_usart(peripheral, Direction::Tx);
    enable(peripheral);
}

/// 送受信 (PD8 / PD9)
pub fn init_rxtx(peripheral: &stm32f429::Peripherals) {
    config_pins(peripheral, Direction::RxTx);
    config_usart(peripheral, Direction::RxTx);
    enable(peripheral);
}

/// 送受信 + TXE 割り込み (送信データレジスタが空く度に USART3 割り込みが入る)
pub fn init_tx_interrupt(peripheral: &stm32f429::Peripherals) {
    config_pins(peripheral, Direction::RxTx);
    config_usart(peripheral, Direction::RxTx);
    peripheral.USART3.cr1.modify(|_, w| w.txeie().set_bit());
    unsafe {
        cortex_m::peripheral::NVIC::unmask(stm32f429::Interrupt::USART3);
    }
    enable(peripheral);
}

/// 送受信 + RXNE 割り込み (1byte 受信する度に USART3 割り込みが入る)
pub fn init_rx_interrupt(peripheral: &stm32f429::Peripherals) {
    config_pins(peripheral, Direction::RxTx);
    config_usart(peripheral, Direction::RxTx);
    peripheral.USART3.cr1.modify(|_, w| w.rxneie().set_bit());
    unsafe {
        cortex_m::peripheral::NVIC::unmask(stm32f429::Interrupt::USART3);
    }
    enable(peripheral);
}

/// TXE (送信データレジスタ空き) を待ってから 1byte 書く
pub fn write_byte(usart: &stm32f429::USART3, byte: u8) {
    while usart.sr.read().txe().bit_is_clear() {}
    usart.dr.write(|w| unsafe { w.bits(u32::from(byte)) });
}

/// RXNE (受信データあり) を待ってから 1byte 読む。DR の読み出しで RXNE はクリアされる
pub fn read_byte(usart: &stm32f429::USART3) -> u8 {
    while usart.sr.read().rxne().bit_is_clear() {}
    usart.dr.read().bits() as u8
}

/// `write!` / `writeln!` 用。'\n' は "\r\n" にして送る
pub struct Console<'a> {
    usart: &'a stm32f429::USART3,
}

impl<'a> Console<'a> {
    pub fn new(usart: &'a stm32f429::USART3) -> Self {
        Self { usart }
    }
}

impl fmt::Write for Console<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                write_byte(self.usart, b'\r');
            }
            write_byte(self.usart, byte);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brr_for_115200_at_16mhz() {
        // 16 MHz / 115200 = 138.9 -> 139 (0x8B: 仮数 8, 小数 11/16)
        assert_eq!(brr(16_000_000, 115_200), 139);
        assert_eq!(brr(board::HSI_HZ, board::UART_BAUDRATE), 0x8B);
    }

    #[test]
    fn brr_rounds_to_nearest() {
        // 16 MHz / 9600 = 1666.67
        assert_eq!(brr(16_000_000, 9_600), 1667);
        // 42 MHz / 115200 = 364.58
        assert_eq!(brr(42_000_000, 115_200), 365);
        assert_eq!(brr(16_000_000, 1_000_000), 16);
    }
}
