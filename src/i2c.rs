//! I2C (標準モード 100 kHz) のクロック設定値とアドレスバイト

use crate::Error;

/// I2C_CR2.FREQ / I2C_CCR / I2C_TRISE に書く値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub freq_mhz: u8,
    pub ccr: u16,
    pub trise: u8,
}

impl Timing {
    /// 標準モード (Sm, 100 kHz) の設定値
    ///
    /// Sm では T_high = T_low = CCR * T_pclk1 なので CCR = PCLK1 / (2 * 100 kHz)。
    /// SCL の最大立ち上がり時間は 1000 ns なので TRISE = FREQ[MHz] + 1。
    pub fn standard_mode(pclk1_hz: u32) -> Result<Self, Error> {
        let freq_mhz = pclk1_hz / 1_000_000;
        if !(2..=50).contains(&freq_mhz) {
            return Err(Error::I2cClockOutOfRange);
        }
        let ccr = pclk1_hz / (2 * 100_000);
        // Sm の CCR は 4 以上、12bit
        if !(4..=0x0FFF).contains(&ccr) {
            return Err(Error::I2cClockOutOfRange);
        }
        Ok(Self {
            freq_mhz: freq_mhz as u8,
            ccr: ccr as u16,
            trise: freq_mhz as u8 + 1,
        })
    }
}

/// 7bit アドレス + 書き込み (R/W = 0)
pub const fn write_address(slave: u8) -> u8 {
    slave << 1
}

/// 7bit アドレス + 読み出し (R/W = 1)
pub const fn read_address(slave: u8) -> u8 {
    (slave << 1) | 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adxl345, board};

    #[test]
    fn standard_mode_at_16mhz() {
        let timing = Timing::standard_mode(board::HSI_HZ).unwrap();
        assert_eq!(
            timing,
            Timing {
                freq_mhz: 16,
                ccr: 80,
                trise: 17
            }
        );
    }

    #[test]
    fn standard_mode_at_42mhz() {
        let timing = Timing::standard_mode(42_000_000).unwrap();
        assert_eq!(timing.freq_mhz, 42);
        assert_eq!(timing.ccr, 210);
        assert_eq!(timing.trise, 43);
    }

    #[test]
    fn peripheral_clock_limits() {
        assert_eq!(Timing::standard_mode(1_000_000), Err(Error::I2cClockOutOfRange));
        assert_eq!(Timing::standard_mode(51_000_000), Err(Error::I2cClockOutOfRange));
        assert!(Timing::standard_mode(2_000_000).is_ok());
        assert!(Timing::standard_mode(50_000_000).is_ok());
    }

    #[test]
    fn address_bytes() {
        assert_eq!(write_address(adxl345::DEVICE_ADDR), 0xA6);
        assert_eq!(read_address(adxl345::DEVICE_ADDR), 0xA7);
    }
}
