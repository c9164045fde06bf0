use nalgebra as na;

use crate::{forces, layout, proximity, system::layout_rng, Config, Direction, ParticleSystem, State, Variant};

/// Part of the points placed inside the shell.
const INTERIOR_SHARE: usize = 4;

/// Radius of the interior cluster relative to the shell.
const INTERIOR_RADIUS: f32 = 0.75;

/// Base size of interior points relative to shell points.
const INTERIOR_SIZE: f32 = 0.6;

/// Globe of points on a jittered sphere with a loose cluster inside.
///
/// Shell points carry static lines to their nearest neighbors and every point
/// pulses slowly in size. The pointer pushes points away.
pub struct SphereShell;

impl SphereShell {
	fn pulse(time: f32, index: usize) -> f32 {
		1.0 + 0.05 * (2.0 * time + 0.1 * index as f32).sin()
	}
}

impl ParticleSystem for SphereShell {
	fn variant(&self) -> Variant {
		Variant::SphereShell
	}

	fn direction(&self) -> Direction {
		Direction::Repel
	}

	fn init(&self, config: &Config) -> State {
		let mut rng = layout_rng(config);
		let interior = config.count / INTERIOR_SHARE;
		let shell = config.count - interior;

		let mut homes = Vec::with_capacity(config.count);
		let mut base_sizes = Vec::with_capacity(config.count);
		for index in 0..shell {
			homes.push(layout::sphere_shell(index, shell, config.extent) + layout::jitter(&mut rng, config.jitter));
			base_sizes.push(config.size);
		}
		let links = proximity::nearest_links(&homes, config.links, &mut rng);
		for _ in 0..interior {
			homes.push(layout::ball(&mut rng, config.extent * INTERIOR_RADIUS));
			base_sizes.push(config.size * INTERIOR_SIZE);
		}
		log::debug!(
			"sphere shell with {} shell points, {} interior points and {} links",
			shell,
			interior,
			links.len()
		);

		let mut state = State::new(config.clone(), homes.into_iter().zip(base_sizes));
		state.links = links;
		state
	}

	fn step(&self, state: &mut State, pointer: na::Point3<f32>) {
		state.tick();
		let local = state.to_local(pointer);
		forces::advance(state, local, self.direction(), |_| na::Vector3::zeros());
		let time = state.time;
		for (index, size) in state.sizes.iter_mut().enumerate() {
			*size *= Self::pulse(time, index);
		}
		state.rotate();
	}
}
