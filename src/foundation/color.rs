use crate::foundation::error::{CardError, CardResult};

/// Straight-alpha RGBA8 color decoded from a hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Format as a CSS `rgba()` expression.
    pub fn to_css(self) -> String {
        let alpha = f64::from(self.a) / 255.0;
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, alpha)
    }

    /// Relative luminance in `0..=1` (sRGB weights, no gamma linearization).
    pub fn luma(self) -> f64 {
        (0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b))
            / 255.0
    }
}

/// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (case-insensitive, leading `#` required).
pub fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let Some(digits) = s.strip_prefix('#') else {
        return Err("hex color must start with '#'".to_owned());
    };
    if !digits.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match digits.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                let v = c
                    .to_digit(16)
                    .ok_or_else(|| format!("invalid hex digit '{c}'"))?;
                out[i] = (v * 17) as u8;
            }
            Ok(Rgba8::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(Rgba8::rgb(
            hex_byte(&digits[0..2])?,
            hex_byte(&digits[2..4])?,
            hex_byte(&digits[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: hex_byte(&digits[0..2])?,
            g: hex_byte(&digits[2..4])?,
            b: hex_byte(&digits[4..6])?,
            a: hex_byte(&digits[6..8])?,
        }),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA".to_owned()),
    }
}

/// Validate a hex color destined for `field`. The accepted input is returned trimmed, original case
/// preserved.
pub fn validate_hex(field: &str, value: &str) -> CardResult<String> {
    parse_hex(value)
        .map(|_| value.trim().to_owned())
        .map_err(|_| CardError::invalid_value(field, value, "hex color #RGB, #RRGGBB or #RRGGBBAA"))
}

/// Return `value` when it is a valid hex color, otherwise `fallback`.
pub(crate) fn hex_or(value: &str, fallback: &str) -> String {
    if parse_hex(value).is_ok() {
        value.trim().to_owned()
    } else {
        fallback.to_owned()
    }
}
