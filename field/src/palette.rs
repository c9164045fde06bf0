//! Point colors, brighter and more saturated towards the center.

use nalgebra as na;

use crate::Error;

/// Distance from the center where the gradient reaches its end.
pub const GRADIENT_DISTANCE: f32 = 5.0;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
	pub r: f32,
	pub g: f32,
	pub b: f32,
}

impl Color {
	/// Parse `#RRGGBB`.
	pub fn from_hex(hex: &str) -> Result<Self, Error> {
		let invalid = || Error::Color(hex.into());
		let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
		if digits.len() != 6 || !digits.is_ascii() {
			return Err(invalid());
		}
		let channel = |range: std::ops::Range<usize>| {
			u8::from_str_radix(&digits[range], 16)
				.map(|v| v as f32 / 255.0)
				.map_err(|_| invalid())
		};
		Ok(Self {
			r: channel(0..2)?,
			g: channel(2..4)?,
			b: channel(4..6)?,
		})
	}

	/// Hue, saturation and lightness, all in `0..=1`.
	pub fn to_hsl(self) -> (f32, f32, f32) {
		let max = self.r.max(self.g).max(self.b);
		let min = self.r.min(self.g).min(self.b);
		let lightness = (max + min) / 2.0;
		if max == min {
			return (0.0, 0.0, lightness);
		}
		let delta = max - min;
		let saturation = if lightness <= 0.5 {
			delta / (max + min)
		} else {
			delta / (2.0 - max - min)
		};
		let hue = if max == self.r {
			(self.g - self.b) / delta + if self.g < self.b { 6.0 } else { 0.0 }
		} else if max == self.g {
			(self.b - self.r) / delta + 2.0
		} else {
			(self.r - self.g) / delta + 4.0
		};
		(hue / 6.0, saturation, lightness)
	}

	pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
		let hue = hue.rem_euclid(1.0);
		let saturation = saturation.clamp(0.0, 1.0);
		let lightness = lightness.clamp(0.0, 1.0);
		if saturation == 0.0 {
			return Self { r: lightness, g: lightness, b: lightness };
		}
		let q = if lightness <= 0.5 {
			lightness * (1.0 + saturation)
		} else {
			lightness + saturation - lightness * saturation
		};
		let p = 2.0 * lightness - q;
		Self {
			r: hue_to_rgb(p, q, hue + 1.0 / 3.0),
			g: hue_to_rgb(p, q, hue),
			b: hue_to_rgb(p, q, hue - 1.0 / 3.0),
		}
	}
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
	let t = t.rem_euclid(1.0);
	if t < 1.0 / 6.0 {
		p + (q - p) * 6.0 * t
	} else if t < 0.5 {
		q
	} else if t < 2.0 / 3.0 {
		p + (q - p) * 6.0 * (2.0 / 3.0 - t)
	} else {
		p
	}
}

/// One color per point, keeping the hue of `base`.
pub fn gradient(positions: &[na::Point3<f32>], base: Color) -> Vec<Color> {
	let (hue, _, _) = base.to_hsl();
	positions
		.iter()
		.map(|position| {
			let closeness = 1.0 - (position.coords.norm() / GRADIENT_DISTANCE).min(1.0);
			Color::from_hsl(hue, 0.5 + 0.5 * closeness, 0.5 + 0.3 * closeness)
		})
		.collect()
}
