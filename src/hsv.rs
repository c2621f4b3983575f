//! RGB <-> HSV conversion with hue stored in 2-degree units
//!
//! Hue lives on an integer scale of 180 units per 360 degrees so that it fits
//! an 8-bit channel alongside saturation and value. Shifting or setting hue
//! therefore quantizes to 2-degree steps; saturation and value are preserved
//! exactly through a recolor.

use crate::frame::{Palette, Rgb};

/// Number of discrete hue steps (one unit = 2 degrees)
pub const HUE_UNITS: i32 = 180;

/// A color in HSV form, all channels 8-bit.
///
/// `h` is in hue units `0..180`; `s` and `v` are in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// Convert an RGB triple to HSV.
///
/// Achromatic colors (all channels equal) get hue 0 and saturation 0.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let [r, g, b] = rgb;
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;
    if diff == 0 {
        return Hsv { h: 0, s: 0, v };
    }

    let s = (255.0 * f64::from(diff) / f64::from(v)).round() as u8;

    let df = f64::from(diff);
    let mut degrees = if v == r {
        60.0 * (f64::from(g) - f64::from(b)) / df
    } else if v == g {
        120.0 + 60.0 * (f64::from(b) - f64::from(r)) / df
    } else {
        240.0 + 60.0 * (f64::from(r) - f64::from(g)) / df
    };
    if degrees < 0.0 {
        degrees += 360.0;
    }

    let h = ((degrees / 2.0).round() as i32 % HUE_UNITS) as u8;
    Hsv { h, s, v }
}

/// Convert an HSV triple back to RGB.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let Hsv { h, s, v } = hsv;
    if s == 0 {
        return [v, v, v];
    }

    let degrees = f64::from(h) * 2.0;
    let c = f64::from(v) * f64::from(s) / 255.0;
    let sector = degrees / 60.0;
    let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = f64::from(v) - c;

    let (r1, g1, b1) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [
        (r1 + m).round() as u8,
        (g1 + m).round() as u8,
        (b1 + m).round() as u8,
    ]
}

/// Rotate every palette entry's hue by `delta_units` hue units, leaving
/// saturation and value untouched.
///
/// `delta_units` must be within `[-180, 180]`; the added [`HUE_UNITS`]
/// offset keeps the modulo operand non-negative for negative shifts.
pub fn shift_palette_hue(palette: &mut Palette, delta_units: i32) {
    for entry in palette.entries_mut() {
        let hsv = rgb_to_hsv(*entry);
        let h = ((i32::from(hsv.h) + HUE_UNITS + delta_units) % HUE_UNITS) as u8;
        *entry = hsv_to_rgb(Hsv { h, ..hsv });
    }
}

/// Set every palette entry's hue to `hue_unit`, leaving saturation and
/// value untouched.
pub fn set_palette_hue(palette: &mut Palette, hue_unit: u8) {
    let h = (i32::from(hue_unit) % HUE_UNITS) as u8;
    for entry in palette.entries_mut() {
        let hsv = rgb_to_hsv(*entry);
        *entry = hsv_to_rgb(Hsv { h, ..hsv });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries_to_hsv() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), Hsv { h: 0, s: 255, v: 255 });
        assert_eq!(rgb_to_hsv([0, 255, 0]), Hsv { h: 60, s: 255, v: 255 });
        assert_eq!(rgb_to_hsv([0, 0, 255]), Hsv { h: 120, s: 255, v: 255 });
    }

    #[test]
    fn test_achromatic_to_hsv() {
        assert_eq!(rgb_to_hsv([0, 0, 0]), Hsv { h: 0, s: 0, v: 0 });
        assert_eq!(rgb_to_hsv([255, 255, 255]), Hsv { h: 0, s: 0, v: 255 });
        assert_eq!(rgb_to_hsv([128, 128, 128]), Hsv { h: 0, s: 0, v: 128 });
    }

    #[test]
    fn test_negative_hue_wraps() {
        // Magenta's raw hue is -60 degrees, which wraps to 300 (unit 150)
        assert_eq!(rgb_to_hsv([255, 0, 255]), Hsv { h: 150, s: 255, v: 255 });
    }

    #[test]
    fn test_dull_red_to_hsv() {
        // max 200, min 50: s = round(255 * 150 / 200) = 191
        assert_eq!(rgb_to_hsv([200, 50, 50]), Hsv { h: 0, s: 191, v: 200 });
    }

    #[test]
    fn test_hsv_to_rgb_round_trip_on_representable_colors() {
        for rgb in [
            [255, 0, 0],
            [0, 255, 0],
            [0, 0, 255],
            [200, 50, 50],
            [50, 150, 200],
            [125, 200, 50],
            [128, 128, 128],
        ] {
            let hsv = rgb_to_hsv(rgb);
            assert_eq!(hsv_to_rgb(hsv), rgb, "round trip changed {rgb:?}");
        }
    }

    #[test]
    fn test_hsv_to_rgb_achromatic() {
        assert_eq!(hsv_to_rgb(Hsv { h: 90, s: 0, v: 77 }), [77, 77, 77]);
    }

    #[test]
    fn test_shift_palette_hue_quarter_turn() {
        // Hue 0 shifted by +45 units (90 degrees) lands in the green sector
        let mut palette = Palette::new(vec![[200, 50, 50]]).unwrap();
        shift_palette_hue(&mut palette, 45);
        assert_eq!(palette.entries(), &[[125, 200, 50]]);
    }

    #[test]
    fn test_shift_palette_hue_negative_wraps() {
        let mut palette = Palette::new(vec![[200, 50, 50]]).unwrap();
        shift_palette_hue(&mut palette, -45);
        // Hue 0 minus 90 degrees wraps to 270 degrees (unit 135)
        let hsv = rgb_to_hsv(palette.entries()[0]);
        assert_eq!(hsv.h, 135);
        assert_eq!((hsv.s, hsv.v), (191, 200));
    }

    #[test]
    fn test_shift_then_unshift_restores_palette() {
        let original = vec![[200, 50, 50], [50, 150, 200], [0, 255, 0]];
        let mut palette = Palette::new(original.clone()).unwrap();
        shift_palette_hue(&mut palette, 45);
        shift_palette_hue(&mut palette, -45);
        assert_eq!(palette.entries(), original.as_slice());
    }

    #[test]
    fn test_set_palette_hue() {
        // (50, 150, 200) has hue 200 degrees; setting hue to 0 keeps s/v
        let mut palette = Palette::new(vec![[50, 150, 200]]).unwrap();
        set_palette_hue(&mut palette, 0);
        assert_eq!(palette.entries(), &[[200, 50, 50]]);
    }

    #[test]
    fn test_set_palette_hue_preserves_achromatic_entries() {
        let mut palette = Palette::new(vec![[128, 128, 128]]).unwrap();
        set_palette_hue(&mut palette, 45);
        assert_eq!(palette.entries(), &[[128, 128, 128]]);
    }
}
