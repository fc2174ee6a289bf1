//! Color constants and conversions.
//!
//! Colors are normalized RGBA `Vec4`s, which transfer directly into shader
//! uniforms. Named constants follow the .NET color palette.

use glam::{Vec3, Vec4};

pub const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
pub const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
pub const CYAN: Vec4 = Vec4::new(0.0, 1.0, 1.0, 1.0);
pub const MAGENTA: Vec4 = Vec4::new(1.0, 0.0, 1.0, 1.0);
pub const YELLOW: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);
pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
pub const LIME: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
pub const BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);
pub const TEAL: Vec4 = Vec4::new(0.0, 0.5, 0.5, 1.0);
// 0xFF6495ED
pub const CORNFLOWER_BLUE: Vec4 = Vec4::new(100.0 / 255.0, 149.0 / 255.0, 237.0 / 255.0, 1.0);
// 0xFF1E90FF
pub const DODGER_BLUE: Vec4 = Vec4::new(30.0 / 255.0, 144.0 / 255.0, 1.0, 1.0);

/// Builds a normalized color from 8-bit RGBA channels.
#[must_use]
pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Vec4 {
    Vec4::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        f32::from(a) / 255.0,
    )
}

/// Builds a normalized color from a packed 0xAARRGGBB value.
#[must_use]
pub fn from_argb(value: u32) -> Vec4 {
    from_rgba8(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
        (value >> 24) as u8,
    )
}

/// Converts normalized RGB to HSV, all components in [0, 1].
#[must_use]
pub fn rgb_to_hsv(rgb: Vec3) -> Vec3 {
    let (r, g, b) = (rgb.x, rgb.y, rgb.z);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    if delta == 0.0 {
        // Grayscale has no hue.
        return Vec3::new(0.0, s, v);
    }

    let mut h = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    h /= 6.0;
    if h < 0.0 {
        h += 1.0;
    }

    Vec3::new(h, s, v)
}

/// Converts normalized HSV to RGB, all components in [0, 1].
#[must_use]
pub fn hsv_to_rgb(hsv: Vec3) -> Vec3 {
    let (mut h, s, v) = (hsv.x, hsv.y, hsv.z);
    if s == 0.0 {
        // Grayscale
        return Vec3::splat(v);
    }

    if h >= 1.0 {
        h -= 1.0;
    }
    h *= 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match i as i32 {
        0 => Vec3::new(v, t, p),
        1 => Vec3::new(q, v, p),
        2 => Vec3::new(p, v, t),
        3 => Vec3::new(p, q, v),
        4 => Vec3::new(t, p, v),
        _ => Vec3::new(v, p, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn argb_unpacking_matches_named_constants() {
        assert!((from_argb(0xFF64_95ED) - CORNFLOWER_BLUE).length() < 1e-6);
        assert!((from_argb(0xFF1E_90FF) - DODGER_BLUE).length() < 1e-6);
        assert_eq!(from_argb(0xFFFF_FFFF), WHITE);
    }

    #[test]
    fn rgba8_normalizes_channels() {
        let c = from_rgba8(255, 0, 127, 255);
        assert_eq!(c.x, 1.0);
        assert_eq!(c.y, 0.0);
        assert!((c.z - 127.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn primary_hues() {
        let red = rgb_to_hsv(Vec3::new(1.0, 0.0, 0.0));
        assert!((red.x - 0.0).abs() < 1e-6);
        let green = rgb_to_hsv(Vec3::new(0.0, 1.0, 0.0));
        assert!((green.x - 1.0 / 3.0).abs() < 1e-6);
        let blue = rgb_to_hsv(Vec3::new(0.0, 0.0, 1.0));
        assert!((blue.x - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn grayscale_has_zero_saturation() {
        let hsv = rgb_to_hsv(Vec3::splat(0.5));
        assert_eq!(hsv.y, 0.0);
        assert_eq!(hsv.z, 0.5);
        assert_eq!(hsv_to_rgb(hsv), Vec3::splat(0.5));
    }

    proptest! {
        #[test]
        fn hsv_round_trips_through_rgb(
            h in 0.0f32..1.0,
            s in 0.01f32..1.0,
            v in 0.01f32..1.0,
        ) {
            let rgb = hsv_to_rgb(Vec3::new(h, s, v));
            let back = rgb_to_hsv(rgb);
            let rgb2 = hsv_to_rgb(back);
            // Hue wraps and collapses at low saturation, so compare in RGB.
            prop_assert!((rgb2 - rgb).length() < 1e-4);
        }
    }
}
