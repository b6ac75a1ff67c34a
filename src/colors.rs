//! Color helpers for animation callers.
//!
//! Provides HSV (Hue, Saturation, Value) conversion, which is more
//! intuitive than raw RGB for many LED animations like color wheels and
//! hue rotations, plus the named-color constants from `smart_leds`.
//!
//! All functions return 8-bit [`Rgb`] ready for
//! [`LedStrip::set_pixel`](crate::LedStrip::set_pixel).

pub use smart_leds::colors::*;

use palette::{FromColor, Hsv, Srgb};

use crate::Rgb;

/// Creates an RGB color from HSV (Hue, Saturation, Value) components.
///
/// Hue is in degrees; saturation and value are 0.0-1.0.
#[inline]
#[must_use]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Rgb {
    let srgb = Srgb::from_color(Hsv::new(hue, saturation, value));
    let (red, green, blue) = srgb.into_format::<u8>().into_components();
    Rgb::new(red, green, blue)
}

/// Creates an RGB color from hue only (full saturation and value).
#[inline]
#[must_use]
pub fn hue(hue: f32) -> Rgb {
    hsv(hue, 1.0, 1.0)
}
