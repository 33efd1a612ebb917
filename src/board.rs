//! ボード固有の定数
//!
//! 基本は NUCLEO-F429ZI (UM1974)。LED_Toggle 系の一部デモだけ
//! STM32F429I-DISCO (UM1670) のピン配置を使う。

/// リセット直後のシステムクロック (HSI)。PLL を使わない限り HCLK = PCLK1 = PCLK2 = 16 MHz
pub const HSI_HZ: u32 = 16_000_000;

/// ST-LINK の MCO 出力 (HSE bypass で取り込む)
pub const HSE_BYPASS_HZ: u32 = 8_000_000;

/// USART3 のボーレート (ST-LINK 仮想 COM ポート)
pub const UART_BAUDRATE: u32 = 115_200;

// NUCLEO-F429ZI のユーザ LED
pub const LD1_PIN: u8 = 0; // PB0 緑
pub const LD2_PIN: u8 = 7; // PB7 青
pub const LD3_PIN: u8 = 14; // PB14 赤

// STM32F429I-DISCO
pub const DISCO_LD3_PIN: u8 = 13; // PG13 緑
pub const DISCO_B1_PIN: u8 = 0; // PA0
