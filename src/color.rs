use std::str::FromStr;

use image::Rgba;

use crate::Error;

/// An opaque color with normalized channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel.
    pub red: f32,
    /// Green channel.
    pub green: f32,
    /// Blue channel.
    pub blue: f32,
}

impl Color {
    /// Decodes `rrggbb` or `#rrggbb`. Any number of leading `#` is stripped.
    ///
    /// # Errors
    /// Returns [`Error::MalformedColor`] unless exactly six hex digits remain.
    pub fn from_hex(input: &str) -> Result<Self, Error> {
        let malformed = || Error::MalformedColor { input: input.to_owned() };

        let digits = input.trim_start_matches('#');
        // from_str_radix alone would also accept a sign, so check the digits up front
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let channel = |start: usize| {
            u8::from_str_radix(&digits[start..start + 2], 16)
                .map(|byte| f32::from(byte) / 255.0)
                .map_err(|_| malformed())
        };

        Ok(Color {
            red: channel(0)?,
            green: channel(2)?,
            blue: channel(4)?,
        })
    }

    /// The color as a fully opaque 8-bit pixel.
    #[must_use]
    pub fn to_rgba8(self) -> Rgba<u8> {
        Rgba([
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
            u8::MAX,
        ])
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn quantize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn every_byte_normalizes_exactly() {
        for byte in 0..=u8::MAX {
            let input = format!("{byte:02x}{byte:02X}{byte:02x}");
            let color = Color::from_hex(&input).unwrap();
            let expected = f32::from(byte) / 255.0;
            assert_eq!(color.red, expected);
            assert_eq!(color.green, expected);
            assert_eq!(color.blue, expected);
            assert_eq!(color.to_rgba8(), Rgba([byte, byte, byte, 255]));
        }
    }

    #[test_log::test]
    fn channels_are_read_in_order() {
        let color: Color = "#1a2b3c".parse().unwrap();
        assert_eq!(color.red, f32::from(0x1au8) / 255.0);
        assert_eq!(color.green, f32::from(0x2bu8) / 255.0);
        assert_eq!(color.blue, f32::from(0x3cu8) / 255.0);
    }

    #[test_log::test]
    fn hash_prefix_is_optional() {
        assert_eq!(
            Color::from_hex("#ff8000").unwrap(),
            Color::from_hex("ff8000").unwrap()
        );
        assert_eq!(
            Color::from_hex("##ff8000").unwrap(),
            Color::from_hex("ff8000").unwrap()
        );
    }

    #[test_log::test]
    fn malformed_inputs_are_rejected() {
        for input in [
            "", "#", "zz0000", "ff00", "#ff00", "ff00000", "ff 000", "+f0000", "ffé00", "ff0000#",
        ] {
            let err = Color::from_hex(input).unwrap_err();
            assert!(
                matches!(&err, Error::MalformedColor { input: given } if given == input),
                "{input:?} gave {err:?}"
            );
        }
    }
}
