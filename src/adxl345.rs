//! ADXL345 (3 軸加速度センサ) のレジスタとデータ変換
//!
//! I2C でも SPI でもレジスタは同じ。DATA_FORMAT = 0x01 (±4 g, 10bit) で使う。

pub const DEVICE_ADDR: u8 = 0x53; // SDO/ALT ADDRESS = Low

pub const DEVID: u8 = 0x00;
pub const POWER_CTL: u8 = 0x2D;
pub const DATA_FORMAT: u8 = 0x31;
/// DATAX0 (ここから X0 X1 Y0 Y1 Z0 Z1 の 6byte)
pub const DATA_START: u8 = 0x32;

/// DEVID の読み出し値
pub const DEVID_VALUE: u8 = 0xE5;

pub const RANGE_4G: u8 = 0x01;
pub const RESET: u8 = 0x00;
pub const MEASURE: u8 = 0x08;

/// ±4 g (10bit) のとき 1 LSB = 7.8 mg
pub const SCALE_G_PER_LSB: f32 = 0.0078;

/// 初期化で書く (レジスタ, 値)。この順に書く
pub const INIT_SEQUENCE: [(u8, u8); 3] = [
    (DATA_FORMAT, RANGE_4G),
    (POWER_CTL, RESET),
    (POWER_CTL, MEASURE),
];

// SPI の 1byte 目: bit7 = R/W, bit6 = MB (マルチバイト)
const SPI_READ: u8 = 0x80;
const SPI_MULTI_BYTE: u8 = 0x40;

/// SPI 読み出しのコマンドバイト (連続読み出し)
pub const fn spi_read_command(reg: u8) -> u8 {
    reg | SPI_READ | SPI_MULTI_BYTE
}

/// SPI 書き込みのコマンドバイト
pub const fn spi_write_command(reg: u8) -> u8 {
    reg | SPI_MULTI_BYTE
}

/// 1 回分の生データ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Sample {
    /// DATAX0 ~ DATAZ1 (各軸リトルエンディアン、2 の補数)
    pub fn from_bytes(raw: &[u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([raw[0], raw[1]]),
            y: i16::from_le_bytes([raw[2], raw[3]]),
            z: i16::from_le_bytes([raw[4], raw[5]]),
        }
    }

    /// g 単位 (x, y, z)
    pub fn to_g(&self) -> (f32, f32, f32) {
        (
            f32::from(self.x) * SCALE_G_PER_LSB,
            f32::from(self.y) * SCALE_G_PER_LSB,
            f32::from(self.z) * SCALE_G_PER_LSB,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spi_command_bytes() {
        assert_eq!(spi_read_command(DATA_START), 0xF2);
        assert_eq!(spi_read_command(DEVID), 0xC0);
        assert_eq!(spi_write_command(DATA_FORMAT), 0x71);
        assert_eq!(spi_write_command(POWER_CTL), 0x6D);
    }

    #[test]
    fn init_sequence_resets_before_measure() {
        assert_eq!(INIT_SEQUENCE[0], (DATA_FORMAT, RANGE_4G));
        assert_eq!(INIT_SEQUENCE[1], (POWER_CTL, RESET));
        assert_eq!(INIT_SEQUENCE[2], (POWER_CTL, MEASURE));
    }

    #[test]
    fn decodes_little_endian_twos_complement() {
        let sample = Sample::from_bytes(&[0x00, 0x01, 0xFF, 0xFF, 0x80, 0x00]);
        assert_eq!(sample, Sample { x: 256, y: -1, z: 128 });

        let sample = Sample::from_bytes(&[0x00, 0xFE, 0x00, 0x02, 0x01, 0x00]);
        assert_eq!(sample, Sample { x: -512, y: 512, z: 1 });
    }

    #[test]
    fn converts_to_g() {
        // 水平に置いたとき Z は約 1 g (128 LSB)
        let (x, y, z) = Sample { x: 0, y: -128, z: 128 }.to_g();
        assert_eq!(x, 0.0);
        assert!((y + 0.9984).abs() < 1e-4);
        assert!((z - 0.9984).abs() < 1e-4);
    }
}
