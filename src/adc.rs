//! ADC1 (12bit) の変換値

/// 12bit の最大値
pub const FULL_SCALE: u16 = 0x0FFF;

/// NUCLEO-F429ZI の VREF+ (3.3 V)
pub const VREF_MV: u32 = 3300;

/// 変換値をミリボルトに (12bit を超える値は最大値として扱う)
pub fn to_millivolts(raw: u16) -> u32 {
    let raw = raw.min(FULL_SCALE);
    u32::from(raw) * VREF_MV / u32::from(FULL_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_endpoints() {
        assert_eq!(to_millivolts(0), 0);
        assert_eq!(to_millivolts(FULL_SCALE), VREF_MV);
    }

    #[test]
    fn mid_scale() {
        assert_eq!(to_millivolts(2048), 1650);
        assert_eq!(to_millivolts(1241), 1000);
    }

    #[test]
    fn clamps_right_aligned_garbage() {
        assert_eq!(to_millivolts(0xFFFF), VREF_MV);
    }
}
