use core::fmt;

/// レジスタ値の計算結果がハードウェアの制約に収まらない
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// 周波数に 0 が指定された
    ZeroFrequency,
    /// 入力クロックより速い周波数は作れない
    Unreachable,
    /// プリスケーラが 16bit に収まらない
    PrescalerOverflow,
    /// オートリロード / リロード値がカウンタ幅に収まらない
    ReloadOverflow,
    /// PLL の M/N/P、VCO 周波数が仕様範囲外
    PllOutOfRange,
    /// I2C の周辺クロックが 2 ~ 50 MHz の範囲外
    I2cClockOutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::ZeroFrequency => "frequency must not be zero",
            Error::Unreachable => "requested frequency is higher than the source clock",
            Error::PrescalerOverflow => "prescaler does not fit in 16 bits",
            Error::ReloadOverflow => "reload value does not fit in the counter",
            Error::PllOutOfRange => "PLL factors out of range",
            Error::I2cClockOutOfRange => "I2C peripheral clock must be 2..=50 MHz",
        };
        f.write_str(msg)
    }
}
