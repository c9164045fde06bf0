use nalgebra as na;

use crate::{forces, layout, Config, Direction, ParticleSystem, State, Variant};

/// Amplitude of the flow direction per axis.
pub(super) const FLOW: f32 = 0.02;

/// Points further from home than this jump back and start over.
pub const SNAP_DISTANCE: f32 = 3.0;

/// Grid of points streaming along a fixed direction per point.
///
/// The drift is a constant force, scaled so a free point moves
/// `2 * FLOW * drift` per frame once the damping settled. Points that wander
/// beyond [`SNAP_DISTANCE`] restart at home. The pointer pushes points away.
pub struct FlowField;

impl FlowField {
	fn flow(column: usize, row: usize) -> na::Vector3<f32> {
		let (x, z) = (column as f32, row as f32);
		na::vector![(0.3 * x).sin(), (0.4 * z).cos(), (0.01 * x * z).sin()] * FLOW
	}

	/// Drift force on every point for a configuration.
	fn drift_scale(config: &Config) -> f32 {
		2.0 * config.drift * (1.0 - config.damping)
	}

	fn snap_back(state: &mut State) {
		let State { positions, velocities, homes, .. } = state;
		for ((position, velocity), home) in positions.iter_mut().zip(velocities.iter_mut()).zip(homes.iter()) {
			if (*position - *home).norm() > SNAP_DISTANCE {
				*position = *home;
				*velocity = na::Vector3::zeros();
			}
		}
	}
}

impl ParticleSystem for FlowField {
	fn variant(&self) -> Variant {
		Variant::FlowField
	}

	fn direction(&self) -> Direction {
		Direction::Repel
	}

	fn init(&self, config: &Config) -> State {
		let side = layout::grid_side(config.count);
		let homes = (0..config.count)
			.map(|index| {
				let (column, row) = layout::grid_cell(index, side);
				let mut home = layout::grid(index, config.count, config.extent);
				home.y = layout::flow_height(column, row);
				home
			})
			.collect::<Vec<_>>();
		log::debug!("flow field with {} points, {} per side", homes.len(), side);
		State::new(config.clone(), homes.into_iter().map(|home| (home, config.size)))
	}

	fn step(&self, state: &mut State, pointer: na::Point3<f32>) {
		state.tick();
		let side = layout::grid_side(state.len());
		let scale = Self::drift_scale(&state.config);
		let local = state.to_local(pointer);
		forces::advance(state, local, self.direction(), |index| {
			let (column, row) = layout::grid_cell(index, side);
			Self::flow(column, row) * scale
		});
		Self::snap_back(state);
		state.rotate();
	}
}

/// Largest drift force on a single point.
pub(super) fn ambient_bound(config: &Config) -> f32 {
	FLOW * 1.732_051 * FlowField::drift_scale(config)
}
