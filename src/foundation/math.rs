pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// `round(base * t)` with `t` clamped to `[0, 1]`.
pub(crate) fn scale_alpha(base: u8, t: f64) -> u8 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    (f64::from(base) * t).round().clamp(0.0, 255.0) as u8
}

pub(crate) fn unpremul_u8(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    (((u32::from(c) * 255) + u32::from(a) / 2) / u32::from(a)).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
