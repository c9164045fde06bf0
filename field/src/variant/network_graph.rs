use nalgebra as na;

use crate::{forces, layout, proximity, system::layout_rng, Config, Direction, ParticleSystem, State, Variant};

/// Amplitude of the drifting force per axis.
pub(super) const WIGGLE: f32 = 0.002;

/// Nodes on a sphere, drifting slowly and linked to every close node.
pub struct NetworkGraph;

impl NetworkGraph {
	fn wiggle(time: f32, index: usize) -> na::Vector3<f32> {
		let phase = index as f32;
		na::vector![
			(0.5 * time + phase).sin(),
			(0.5 * time + phase).cos(),
			(0.3 * time + phase).sin()
		] * WIGGLE
	}
}

impl ParticleSystem for NetworkGraph {
	fn variant(&self) -> Variant {
		Variant::NetworkGraph
	}

	fn direction(&self) -> Direction {
		Direction::Attract
	}

	fn init(&self, config: &Config) -> State {
		let mut rng = layout_rng(config);
		let homes = (0..config.count)
			.map(|_| layout::sphere_surface(&mut rng, config.extent))
			.collect::<Vec<_>>();

		let mut state = State::new(config.clone(), homes.into_iter().map(|home| (home, config.size)));
		proximity::graph(&state.positions, config.connection_distance, &mut state.edges);
		log::debug!(
			"network graph with {} nodes and {} connections",
			state.len(),
			state.edges.len()
		);
		state
	}

	fn step(&self, state: &mut State, pointer: na::Point3<f32>) {
		state.tick();
		let time = state.time;
		let local = state.to_local(pointer);
		forces::advance(state, local, self.direction(), |index| Self::wiggle(time, index));
		proximity::graph(&state.positions, state.config.connection_distance, &mut state.edges);
		state.rotate();
	}
}
