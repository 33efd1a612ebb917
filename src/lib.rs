//! NUCLEO-F429ZI (STM32F429ZI) 向けベアメタルデモの共通部分
//!
//! demos/ 以下のデモはそれぞれ単体で完結している。
//! ここには複数のデモで使う「レジスタに書く値の計算」と USART3 の文字出力だけを置く。
//! 計算部分はホスト上でテストできる:
//!   cargo test --lib --target x86_64-unknown-linux-gnu

#![cfg_attr(not(test), no_std)]

pub mod adc;
pub mod adxl345;
pub mod board;
pub mod clock;
pub mod gpio;
pub mod i2c;
pub mod systick;
pub mod timer;
pub mod uart;

mod error;

pub use error::Error;
