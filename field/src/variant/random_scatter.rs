use nalgebra as na;

use crate::{forces, layout, proximity, system::layout_rng, Config, Direction, ParticleSystem, State, Variant};

const SCATTER_EXTENT: f32 = 0.75;

/// Loose cloud of points drawn towards the pointer, connected to close
/// neighbors.
pub struct RandomScatter;

impl ParticleSystem for RandomScatter {
	fn variant(&self) -> Variant {
		Variant::RandomScatter
	}

	fn direction(&self) -> Direction {
		Direction::Attract
	}

	fn init(&self, config: &Config) -> State {
		let mut rng = layout_rng(config);
		let extent = config.extent * SCATTER_EXTENT;
		let homes = (0..config.count)
			.map(|_| layout::cube(&mut rng, extent))
			.collect::<Vec<_>>();
		log::debug!("random scatter with {} points", homes.len());

		let mut state = State::new(config.clone(), homes.into_iter().map(|home| (home, config.size)));
		proximity::graph(&state.positions, config.connection_distance, &mut state.edges);
		state
	}

	fn step(&self, state: &mut State, pointer: na::Point3<f32>) {
		state.tick();
		let local = state.to_local(pointer);
		forces::advance(state, local, self.direction(), |_| na::Vector3::zeros());
		proximity::graph(&state.positions, state.config.connection_distance, &mut state.edges);
		state.rotate();
	}
}
