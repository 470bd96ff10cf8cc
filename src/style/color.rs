use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Failure to read a color string
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("color '{0}' is not a #rgb / #rrggbb hex string or a known name")]
    Unrecognized(String),
}

/// sRGB color with channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

// Lightness step used by `brighten`, in Lab L units
const BRIGHTEN_STEP: f32 = 18.0;

// D65 reference white
const XN: f32 = 0.950_47;
const YN: f32 = 1.0;
const ZN: f32 = 1.088_83;

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Parse `#rgb`, `#rrggbb` (leading `#` optional) or a handful of CSS names
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let s = input.trim();
        match s.to_ascii_lowercase().as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            _ => {}
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        let bad = || ColorError::Unrecognized(input.to_string());
        if !hex.is_ascii() {
            return Err(bad());
        }

        let channel = |h: &str| u8::from_str_radix(h, 16).map_err(|_| bad());
        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = channel(&c.to_string())?;
                    out[i] = v * 17;
                }
                Ok(Self::from_rgb8(out[0], out[1], out[2]))
            }
            6 => Ok(Self::from_rgb8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(bad()),
        }
    }

    /// `#rrggbb`, lowercase
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// CIE Lab (D65)
    pub fn to_lab(&self) -> [f32; 3] {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);

        let x = (0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b) / XN;
        let y = (0.212_672_9 * r + 0.715_152_2 * g + 0.072_175 * b) / YN;
        let z = (0.019_333_9 * r + 0.119_192 * g + 0.950_304_1 * b) / ZN;

        let fx = lab_f(x);
        let fy = lab_f(y);
        let fz = lab_f(z);

        [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
    }

    /// Inverse of [`Color::to_lab`]; out-of-gamut results are clamped
    pub fn from_lab(lab: [f32; 3]) -> Self {
        let [l, a, b] = lab;
        let fy = (l + 16.0) / 116.0;
        let fx = fy + a / 500.0;
        let fz = fy - b / 200.0;

        let x = lab_f_inv(fx) * XN;
        let y = lab_f_inv(fy) * YN;
        let z = lab_f_inv(fz) * ZN;

        let r = 3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z;
        let g = -0.969_266 * x + 1.876_010_8 * y + 0.041_556 * z;
        let b = 0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z;

        Self {
            r: linear_to_srgb(r).clamp(0.0, 1.0),
            g: linear_to_srgb(g).clamp(0.0, 1.0),
            b: linear_to_srgb(b).clamp(0.0, 1.0),
        }
    }

    /// Shift Lab lightness; negative amounts darken
    pub fn brighten(&self, amount: f32) -> Self {
        if amount == 0.0 || !amount.is_finite() {
            return *self;
        }
        let mut lab = self.to_lab();
        lab[0] = (lab[0] + BRIGHTEN_STEP * amount).clamp(0.0, 100.0);
        Self::from_lab(lab)
    }

    /// Straight-line interpolation in sRGB; `t` is clamped to [0, 1]
    pub fn mix(&self, other: &Color, t: f32) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.max(0.0).powf(1.0 / 2.4) - 0.055
    }
}

const LAB_E: f32 = 216.0 / 24389.0;
const LAB_K: f32 = 24389.0 / 27.0;

fn lab_f(t: f32) -> f32 {
    if t > LAB_E {
        t.cbrt()
    } else {
        (LAB_K * t + 16.0) / 116.0
    }
}

fn lab_f_inv(f: f32) -> f32 {
    let f3 = f * f * f;
    if f3 > LAB_E {
        f3
    } else {
        (116.0 * f - 16.0) / LAB_K
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parse_and_format() {
        let c = Color::from_hex("#FDEBED").unwrap();
        assert_eq!(c.to_rgb8(), [0xfd, 0xeb, 0xed]);
        assert_eq!(c.to_hex(), "#fdebed");

        let short = Color::from_hex("fff").unwrap();
        assert_eq!(short, Color::WHITE);
        assert_eq!(Color::from_hex("white").unwrap(), Color::WHITE);
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_lab_round_trip_close() {
        let c = Color::from_hex("#D9ACF5").unwrap();
        let back = Color::from_lab(c.to_lab());
        assert!((c.r - back.r).abs() < 0.002);
        assert!((c.g - back.g).abs() < 0.002);
        assert!((c.b - back.b).abs() < 0.002);
    }

    #[test]
    fn test_brighten_moves_lightness() {
        let c = Color::from_hex("#AAE3E2").unwrap();
        let lighter = c.brighten(0.3);
        let darker = c.brighten(-0.3);
        assert!(lighter.to_lab()[0] > c.to_lab()[0]);
        assert!(darker.to_lab()[0] < c.to_lab()[0]);
        assert_eq!(c.brighten(0.0), c);
    }

    #[test]
    fn test_mix_endpoints_and_midpoint() {
        let a = Color::rgb(0.0, 0.2, 1.0);
        let b = Color::rgb(1.0, 0.6, 0.0);
        assert_eq!(a.mix(&b, 0.0), a);
        assert_eq!(a.mix(&b, 1.0), b);
        let m = a.mix(&b, 0.5);
        assert!((m.r - 0.5).abs() < 1e-6);
        assert!((m.g - 0.4).abs() < 1e-6);
        // Progress outside the unit range does not extrapolate
        assert_eq!(a.mix(&b, 2.0), b);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let c: Color = serde_yaml::from_str("'#382B80'").unwrap();
        assert_eq!(c.to_hex(), "#382b80");
        let text = serde_yaml::to_string(&c).unwrap();
        assert!(text.contains("#382b80"));
    }
}
