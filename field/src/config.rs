use std::{
	fs::File,
	io::{BufReader, BufWriter},
	path::Path,
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{palette::Color, Error, Variant};

/// Parameters of one particle field.
///
/// Changing `count` or `variant` needs a fresh [`crate::State`], the point
/// set is never resized in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	pub variant: Variant,

	/// Number of points.
	pub count: usize,

	/// Radius or half width of the layout.
	pub extent: f32,

	/// Random offset per axis for the sphere shell, zero for an exact layout.
	pub jitter: f32,

	/// Distance to the pointer where the pointer force starts.
	pub interaction_radius: f32,

	/// Pointer force at zero distance.
	pub strength: f32,

	/// Spring coefficient towards the home position.
	pub restore: f32,

	/// Velocity factor per frame.
	pub damping: f32,

	/// Render size without pointer influence.
	pub size: f32,

	/// Relative size increase at zero distance to the pointer.
	pub growth: f32,

	/// Rotation of the whole field around the vertical axis in radians per frame.
	pub rotation_speed: f32,

	/// Maximal distance for connection lines, zero disables them.
	pub connection_distance: f32,

	/// Travel of a free point per frame on the flow field, relative to the
	/// flow direction.
	pub drift: f32,

	/// Static neighbor lines per point on the sphere shell.
	pub links: usize,

	pub color: String,

	/// Seed for the random layouts, `None` draws a new layout every time.
	pub seed: Option<u64>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			variant: Variant::SphereShell,
			count: 100,
			extent: 4.0,
			jitter: 0.3,
			interaction_radius: 3.0,
			strength: 0.05,
			restore: 0.02,
			damping: 0.9,
			size: 0.06,
			growth: 0.5,
			rotation_speed: 0.015,
			connection_distance: 2.0,
			drift: 0.3,
			links: 2,
			color: String::from("#8B5CF6"),
			seed: None,
		}
	}
}

impl Config {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
		let file = File::open(path)?;
		let config: Self = serde_json::from_reader(BufReader::new(file))?;
		config.validate()?;
		Ok(config)
	}

	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
		let file = File::create(path)?;
		serde_json::to_writer_pretty(BufWriter::new(file), self)?;
		Ok(())
	}

	pub fn validate(&self) -> Result<(), Error> {
		let values = [
			("extent", self.extent),
			("jitter", self.jitter),
			("interaction_radius", self.interaction_radius),
			("strength", self.strength),
			("restore", self.restore),
			("damping", self.damping),
			("size", self.size),
			("growth", self.growth),
			("rotation_speed", self.rotation_speed),
			("connection_distance", self.connection_distance),
			("drift", self.drift),
		];
		if let Some((name, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
			return Err(Error::NotFinite(*name));
		}
		if u32::try_from(self.count).is_err() {
			return Err(Error::TooManyPoints(self.count));
		}
		if !(self.damping > 0.0 && self.damping < 1.0) {
			return Err(Error::Damping(self.damping));
		}
		if !(0.0..1.0).contains(&self.restore) {
			return Err(Error::Restore(self.restore));
		}
		if self.interaction_radius <= 0.0 {
			return Err(Error::NotPositive {
				name: "interaction_radius",
				value: self.interaction_radius,
			});
		}
		for (name, value) in [
			("extent", self.extent),
			("jitter", self.jitter),
			("strength", self.strength),
			("size", self.size),
			("growth", self.growth),
			("connection_distance", self.connection_distance),
			("drift", self.drift),
		] {
			if value < 0.0 {
				return Err(Error::Negative { name, value });
			}
		}
		Color::from_hex(&self.color)?;
		Ok(())
	}

	/// Upper bound for the force on a point that stays within
	/// `max_displacement` of its home position.
	pub fn force_bound(&self, max_displacement: f32) -> f32 {
		self.strength + self.restore * max_displacement + self.variant.ambient_bound(self)
	}

	/// Upper bound for the speed reached with forces below `force_bound`.
	///
	/// With `v' = damping * (v + f)` and `|f| <= F` the speed never exceeds
	/// `damping * F / (1 - damping)`.
	pub fn speed_bound(&self, max_displacement: f32) -> f32 {
		self.damping * self.force_bound(max_displacement) / (1.0 - self.damping)
	}
}

/// Settings of the three pages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
	Landing,
	Demo,
	Contact,
}

impl Preset {
	pub const ALL: [Self; 3] = [Self::Landing, Self::Demo, Self::Contact];

	pub fn name(self) -> &'static str {
		match self {
			Self::Landing => "landing",
			Self::Demo => "demo",
			Self::Contact => "contact",
		}
	}

	pub fn config(self) -> Config {
		let (variant, count, color, size, speed) = match self {
			Self::Landing => (Variant::SphereShell, 150, "#8B5CF6", 0.06, 0.15),
			Self::Demo => (Variant::FlowField, 100, "#4C9EEB", 0.04, 0.3),
			Self::Contact => (Variant::NetworkGraph, 200, "#10B981", 0.05, 0.2),
		};
		let config = Config {
			variant,
			count,
			color: String::from(color),
			size,
			rotation_speed: variant.rotation_speed(speed),
			..Config::default()
		};
		match self {
			// free streaming grid of 10 units, restarted only by the snap back
			Self::Demo => Config {
				extent: 5.0,
				interaction_radius: 2.0,
				restore: 0.0,
				drift: speed,
				..config
			},
			Self::Landing | Self::Contact => config,
		}
	}
}

impl FromStr for Preset {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|preset| preset.name().eq_ignore_ascii_case(s))
			.ok_or_else(|| Error::UnknownPreset(s.into()))
	}
}

impl std::fmt::Display for Preset {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MAX_POINTS;

	#[test]
	fn presets_are_valid() {
		for preset in Preset::ALL {
			let config = preset.config();
			config.validate().unwrap();
			assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
		}
		assert_eq!(Preset::Contact.config().count, 200);
		let demo = Preset::Demo.config();
		assert_eq!(demo.variant, Variant::FlowField);
		assert_eq!((demo.count, demo.extent, demo.drift), (100, 5.0, 0.3));
	}

	#[test]
	fn drift_raises_bound_on_flow_field() {
		let flow = Config { variant: Variant::FlowField, ..Config::default() };
		let still = Config { drift: 0.0, ..flow.clone() };
		assert!(flow.force_bound(1.0) > still.force_bound(1.0));
		assert_eq!(still.force_bound(1.0), Config::default().force_bound(1.0));
	}

	#[test]
	fn unknown_preset() {
		assert!(matches!("about".parse::<Preset>(), Err(Error::UnknownPreset(_))));
	}

	#[test]
	fn rejects_unstable_damping() {
		for damping in [0.0, 1.0, 1.5, -0.1] {
			let config = Config { damping, ..Config::default() };
			assert!(matches!(config.validate(), Err(Error::Damping(_))));
		}
	}

	#[test]
	fn rejects_bad_values() {
		let config = Config { strength: f32::NAN, ..Config::default() };
		assert!(matches!(config.validate(), Err(Error::NotFinite("strength"))));

		let config = Config { interaction_radius: 0.0, ..Config::default() };
		assert!(matches!(config.validate(), Err(Error::NotPositive { .. })));

		let config = Config { size: -1.0, ..Config::default() };
		assert!(matches!(config.validate(), Err(Error::Negative { name: "size", .. })));

		let config = Config { drift: -0.1, ..Config::default() };
		assert!(matches!(config.validate(), Err(Error::Negative { name: "drift", .. })));

		let config = Config { restore: 1.0, ..Config::default() };
		assert!(matches!(config.validate(), Err(Error::Restore(_))));

		let config = Config { color: String::from("purple"), ..Config::default() };
		assert!(matches!(config.validate(), Err(Error::Color(_))));
	}

	#[cfg(target_pointer_width = "64")]
	#[test]
	fn rejects_too_many_points() {
		let config = Config { count: MAX_POINTS + 1, ..Config::default() };
		assert!(matches!(config.validate(), Err(Error::TooManyPoints(_))));

		let config = Config { count: MAX_POINTS, ..Config::default() };
		config.validate().unwrap();
	}

	#[test]
	fn file_round_trip_with_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("field.json");
		std::fs::write(&path, r#"{ "variant": "network-graph", "count": 42, "seed": 3 }"#).unwrap();

		let config = Config::from_file(&path).unwrap();
		assert_eq!(config.variant, Variant::NetworkGraph);
		assert_eq!(config.count, 42);
		assert_eq!(config.seed, Some(3));
		assert_eq!(config.damping, Config::default().damping);

		config.save(&path).unwrap();
		assert_eq!(Config::from_file(&path).unwrap(), config);
	}

	#[test]
	fn invalid_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("field.json");
		std::fs::write(&path, r#"{ "damping": 2.0 }"#).unwrap();
		assert!(matches!(Config::from_file(&path), Err(Error::Damping(_))));

		assert!(matches!(Config::from_file(dir.path().join("missing.json")), Err(Error::IO(_))));
	}
}
