//! Channel conversions between HSL and RGB.
//! All functions take and return normalized f64 in 0.0..=1.0.

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// HSL -> RGB.
pub(crate) fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    (
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

/// RGB -> HSL. Achromatic input reports hue and saturation as zero.
pub(crate) fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;
    if delta == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    (h, s.min(1.0), l)
}

/// Normalize a hex string: uppercase, expand shorthand, default to gray if invalid.
///
/// Always returns 6 chars (RRGGBB); an alpha pair is dropped.
pub(crate) fn normalize_hex(hex: &str) -> String {
    let stripped = hex.trim().trim_start_matches('#');
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return "808080".to_string();
    }
    match stripped.len() {
        3 => {
            let mut out = String::with_capacity(6);
            for c in stripped.chars() {
                out.push(c);
                out.push(c);
            }
            out.to_uppercase()
        }
        6 => stripped.to_uppercase(),
        8 => stripped[..6].to_uppercase(),
        _ => "808080".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64, f64), b: (f64, f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9 && (a.2 - b.2).abs() < 1e-9
    }

    #[test]
    fn primaries_through_hsl() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), (1.0, 0.0, 0.0)));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), (0.0, 1.0, 0.0)));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), (0.0, 0.0, 1.0)));
    }

    #[test]
    fn gray_has_no_saturation() {
        let (h, s, l) = rgb_to_hsl(0.5, 0.5, 0.5);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((l - 0.5).abs() < 1e-9);
    }

    #[test]
    fn extremes_of_lightness() {
        assert!(close(hsl_to_rgb(0.3, 1.0, 1.0), (1.0, 1.0, 1.0)));
        assert!(close(hsl_to_rgb(0.3, 1.0, 0.0), (0.0, 0.0, 0.0)));
    }

    #[test]
    fn normalize_hex_shapes() {
        assert_eq!(normalize_hex("#abc"), "AABBCC");
        assert_eq!(normalize_hex("00d93d"), "00D93D");
        assert_eq!(normalize_hex("00d93dff"), "00D93D");
        assert_eq!(normalize_hex("nope"), "808080");
        assert_eq!(normalize_hex("12345"), "808080");
    }
}
