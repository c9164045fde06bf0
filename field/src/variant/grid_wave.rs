use nalgebra as na;

use crate::{forces, layout, system::POINTER_SCALE, Config, Direction, ParticleSystem, State, Variant};

const WAVE_AMPLITUDE: f32 = 0.2;

/// Grid floating over the ground, its rest height rolling with time.
pub struct GridWave;

impl GridWave {
	fn home_height(home: &na::Point3<f32>, time: f32) -> f32 {
		layout::wave_height(home.x, home.z) + WAVE_AMPLITUDE * (time + 2.0 * home.x + 2.0 * home.z).sin()
	}
}

impl ParticleSystem for GridWave {
	fn variant(&self) -> Variant {
		Variant::GridWave
	}

	fn direction(&self) -> Direction {
		Direction::Repel
	}

	fn init(&self, config: &Config) -> State {
		let homes = (0..config.count)
			.map(|index| {
				let mut home = layout::grid(index, config.count, config.extent);
				home.y = layout::wave_height(home.x, home.z);
				home
			})
			.collect::<Vec<_>>();
		log::debug!(
			"grid wave with {} points, {} per side",
			homes.len(),
			layout::grid_side(config.count)
		);
		State::new(config.clone(), homes.into_iter().map(|home| (home, config.size)))
	}

	fn step(&self, state: &mut State, pointer: na::Point3<f32>) {
		state.tick();
		let time = state.time;
		for home in &mut state.homes {
			home.y = Self::home_height(home, time);
		}
		let local = state.to_local(pointer);
		forces::advance(state, local, self.direction(), |_| na::Vector3::zeros());
		state.rotate();
	}

	/// The pointer moves over the ground plane, screen up is away from the camera.
	fn pointer_to_world(&self, ndc: na::Point2<f32>) -> na::Point3<f32> {
		na::point![ndc.x * POINTER_SCALE, 0.0, -ndc.y * POINTER_SCALE]
	}
}
