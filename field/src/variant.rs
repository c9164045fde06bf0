mod flow_field;
mod grid_wave;
mod network_graph;
mod random_scatter;
mod sphere_shell;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Config, Error, ParticleSystem};

pub use flow_field::{FlowField, SNAP_DISTANCE};
pub use grid_wave::GridWave;
pub use network_graph::NetworkGraph;
pub use random_scatter::RandomScatter;
pub use sphere_shell::SphereShell;

/// Rotation used by the flat variants, independent of the speed setting.
const SLOW_ROTATION: f32 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
	#[default]
	SphereShell,
	GridWave,
	RandomScatter,
	NetworkGraph,
	FlowField,
}

impl Variant {
	pub const ALL: [Self; 5] = [
		Self::SphereShell,
		Self::GridWave,
		Self::RandomScatter,
		Self::NetworkGraph,
		Self::FlowField,
	];

	pub fn name(self) -> &'static str {
		match self {
			Self::SphereShell => "sphere-shell",
			Self::GridWave => "grid-wave",
			Self::RandomScatter => "random-scatter",
			Self::NetworkGraph => "network-graph",
			Self::FlowField => "flow-field",
		}
	}

	pub fn system(self) -> Box<dyn ParticleSystem> {
		match self {
			Self::SphereShell => Box::new(SphereShell),
			Self::GridWave => Box::new(GridWave),
			Self::RandomScatter => Box::new(RandomScatter),
			Self::NetworkGraph => Box::new(NetworkGraph),
			Self::FlowField => Box::new(FlowField),
		}
	}

	/// Rotation per frame for an animation speed setting.
	pub fn rotation_speed(self, speed: f32) -> f32 {
		match self {
			Self::SphereShell | Self::NetworkGraph | Self::FlowField => speed * 0.1,
			Self::GridWave | Self::RandomScatter => SLOW_ROTATION,
		}
	}

	/// Largest variant specific force on a single point.
	pub fn ambient_bound(self, config: &Config) -> f32 {
		match self {
			Self::NetworkGraph => network_graph::WIGGLE * 1.732_051,
			Self::FlowField => flow_field::ambient_bound(config),
			Self::SphereShell | Self::GridWave | Self::RandomScatter => 0.0,
		}
	}
}

impl FromStr for Variant {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|variant| variant.name().eq_ignore_ascii_case(s))
			.ok_or_else(|| Error::UnknownVariant(s.into()))
	}
}

impl std::fmt::Display for Variant {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_parse_back() {
		for variant in Variant::ALL {
			assert_eq!(variant.name().parse::<Variant>().unwrap(), variant);
			assert_eq!(variant.system().variant(), variant);
			assert_eq!(
				serde_json::to_string(&variant).unwrap(),
				format!("\"{}\"", variant.name())
			);
		}
		assert!(matches!("globe".parse::<Variant>(), Err(Error::UnknownVariant(_))));
	}

	#[test]
	fn exact_point_count() {
		for variant in Variant::ALL {
			for count in [0, 1, 2, 3, 7, 100, 301] {
				let config = Config { variant, count, seed: Some(9), ..Config::default() };
				let state = variant.system().init(&config);
				assert_eq!(state.len(), count, "{} {}", variant, count);
				assert_eq!(state.velocities.len(), count);
				assert_eq!(state.homes.len(), count);
				assert_eq!(state.sizes.len(), count);
				assert!(state
					.positions
					.iter()
					.all(|p| p.coords.iter().all(|v| v.is_finite())));
			}
		}
	}

	#[test]
	fn empty_field_steps() {
		for variant in Variant::ALL {
			let config = Config { variant, count: 0, ..Config::default() };
			let system = variant.system();
			let mut state = system.init(&config);
			for _ in 0..10 {
				system.step(&mut state, nalgebra::Point3::origin());
			}
			assert!(state.is_empty());
			assert!(state.edges.is_empty());
			assert_eq!(state.frame, 10);
		}
	}

	#[test]
	fn seeded_layouts_repeat() {
		for variant in Variant::ALL {
			let config = Config { variant, count: 60, seed: Some(21), ..Config::default() };
			let a = variant.system().init(&config);
			let b = variant.system().init(&config);
			assert_eq!(a.positions, b.positions, "{}", variant);
			assert_eq!(a.links, b.links, "{}", variant);
		}
	}

	#[test]
	fn steps_stay_finite() {
		for variant in Variant::ALL {
			let config = Config { variant, count: 80, seed: Some(5), ..Config::default() };
			let system = variant.system();
			let mut state = system.init(&config);
			for frame in 0..300 {
				let t = frame as f32 * 0.05;
				let pointer = system.pointer_to_world(nalgebra::point![t.sin(), t.cos() * 0.5]);
				system.step(&mut state, pointer);
			}
			assert!(state
				.positions
				.iter()
				.chain(&state.homes)
				.all(|p| p.coords.iter().all(|v| v.is_finite())));
			assert!(state.sizes.iter().all(|s| s.is_finite() && *s >= 0.0));
		}
	}
}
