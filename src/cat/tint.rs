/// Color filter applied over the base sprite. Fixed for the cat's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    /// Hue rotation in degrees, `[0, 360)`.
    pub hue: f32,
    /// Saturation in percent, `[50, 150]`.
    pub saturation: f32,
    /// Brightness in percent, `[80, 110]`.
    pub brightness: f32,
}

const SATURATION_MIN: f32 = 50.0;
const SATURATION_MAX: f32 = 150.0;
const BRIGHTNESS_MIN: f32 = 80.0;
const BRIGHTNESS_MAX: f32 = 110.0;

impl Tint {
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self {
            hue: rng.f32() * 360.0,
            saturation: SATURATION_MIN + rng.f32() * (SATURATION_MAX - SATURATION_MIN),
            brightness: BRIGHTNESS_MIN + rng.f32() * (BRIGHTNESS_MAX - BRIGHTNESS_MIN),
        }
    }

    /// Bring stored values back into their ranges.
    pub fn normalized(self) -> Self {
        let finite = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        Self {
            hue: finite(self.hue, 0.0).rem_euclid(360.0) % 360.0,
            saturation: finite(self.saturation, 100.0).clamp(SATURATION_MIN, SATURATION_MAX),
            brightness: finite(self.brightness, 100.0).clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX),
        }
    }

    /// Approximate terminal color for this tint.
    pub fn to_rgb(&self) -> [u8; 3] {
        let s = (self.saturation / SATURATION_MAX).clamp(0.0, 1.0);
        let v = (self.brightness / BRIGHTNESS_MAX).clamp(0.0, 1.0);
        hsv_to_rgb(self.hue, s, v)
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let c = v * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    let to_byte = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_tint_is_in_range() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..200 {
            let t = Tint::random(&mut rng);
            assert!((0.0..360.0).contains(&t.hue));
            assert!((50.0..=150.0).contains(&t.saturation));
            assert!((80.0..=110.0).contains(&t.brightness));
        }
    }

    #[test]
    fn normalized_wraps_hue_and_clamps_the_rest() {
        let t = Tint {
            hue: 400.0,
            saturation: 10.0,
            brightness: 500.0,
        }
        .normalized();
        assert_eq!(t.hue, 40.0);
        assert_eq!(t.saturation, 50.0);
        assert_eq!(t.brightness, 110.0);
    }

    #[test]
    fn full_red() {
        let t = Tint {
            hue: 0.0,
            saturation: 150.0,
            brightness: 110.0,
        };
        assert_eq!(t.to_rgb(), [255, 0, 0]);
    }
}
