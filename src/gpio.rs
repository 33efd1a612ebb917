//! GPIO レジスタのアドレスとビット位置の計算
//!
//! PAC を使わずに生ポインタで叩くデモ (light_user_led, led_toggle など) 用。
//! アドレスは RM0090 のメモリマップ / レジスタマップの値。

pub const PERIPH_BASE: u32 = 0x4000_0000;
pub const AHB1_BASE: u32 = PERIPH_BASE + 0x0002_0000;
pub const RCC_BASE: u32 = AHB1_BASE + 0x3800;

/// RCC_AHB1ENR (GPIOx のクロック有効化)
pub const RCC_AHB1ENR: u32 = RCC_BASE + 0x30;

// GPIOx 内のオフセット
pub const MODER_OFFSET: u32 = 0x00;
pub const ODR_OFFSET: u32 = 0x14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
}

impl Port {
    /// AHB1 上で 0x400 おきに並んでいる
    pub const fn base(self) -> u32 {
        AHB1_BASE + 0x400 * self as u32
    }

    /// RCC_AHB1ENR の GPIOxEN ビット (GPIOAEN が bit0)
    pub const fn clock_enable_bit(self) -> u32 {
        1 << self as u32
    }
}

/// MODER の 2bit フィールドの値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Input = 0b00,
    Output = 0b01,
    Alternate = 0b10,
    Analog = 0b11,
}

pub const fn moder_mask(pin: u8) -> u32 {
    0b11 << (pin as u32 * 2)
}

/// MODER の pin のフィールドだけを mode に書き換えた値
pub const fn moder_with(moder: u32, pin: u8, mode: Mode) -> u32 {
    (moder & !moder_mask(pin)) | ((mode as u32) << (pin as u32 * 2))
}

/// ODR / IDR のビット
pub const fn pin_mask(pin: u8) -> u32 {
    1 << pin as u32
}

/// BSRR 下位 16bit: 書くと High
pub const fn bsrr_set(pin: u8) -> u32 {
    1 << pin as u32
}

/// BSRR 上位 16bit: 書くと Low
pub const fn bsrr_reset(pin: u8) -> u32 {
    1 << (pin as u32 + 16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;

    #[test]
    fn port_addresses_match_the_memory_map() {
        assert_eq!(RCC_AHB1ENR, 0x4002_3830);
        assert_eq!(Port::A.base(), 0x4002_0000);
        assert_eq!(Port::B.base(), 0x4002_0400);
        assert_eq!(Port::G.base(), 0x4002_1800);
        assert_eq!(Port::B.base() + ODR_OFFSET, 0x4002_0414);
    }

    #[test]
    fn clock_enable_bits() {
        assert_eq!(Port::A.clock_enable_bit(), 1 << 0);
        assert_eq!(Port::B.clock_enable_bit(), 1 << 1);
        assert_eq!(Port::D.clock_enable_bit(), 1 << 3);
        assert_eq!(Port::G.clock_enable_bit(), 1 << 6);
    }

    #[test]
    fn moder_output_keeps_other_pins() {
        // PB7 を出力に (bit15 = 0, bit14 = 1)
        let moder = moder_with(0xFFFF_FFFF, board::LD2_PIN, Mode::Output);
        assert_eq!(moder & moder_mask(7), 1 << 14);
        assert_eq!(moder | moder_mask(7), 0xFFFF_FFFF);

        let moder = moder_with(0, board::DISCO_LD3_PIN, Mode::Output);
        assert_eq!(moder, 1 << 26);
    }

    #[test]
    fn moder_analog_and_alternate() {
        assert_eq!(moder_with(0, 1, Mode::Analog), 0b11 << 2);
        assert_eq!(moder_with(0, 8, Mode::Alternate), 1 << 17);
        assert_eq!(moder_with(0xFFFF_FFFF, 0, Mode::Input), 0xFFFF_FFFC);
    }

    #[test]
    fn bsrr_halves() {
        assert_eq!(bsrr_set(13), 1 << 13);
        assert_eq!(bsrr_reset(13), 1 << 29);
        assert_eq!(bsrr_reset(15), 1 << 31);
    }

    #[test]
    fn pin_masks() {
        assert_eq!(pin_mask(board::LD3_PIN), 1 << 14);
        assert_eq!(pin_mask(board::DISCO_B1_PIN), 1);
    }
}
