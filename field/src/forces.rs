//! Pointer force, restoring spring and damping.

use nalgebra as na;

use crate::State;

/// Below this distance the direction to the pointer is undefined and the
/// pointer force is skipped.
pub const MIN_DISTANCE: f32 = 1e-6;

/// Sign of the pointer force, fixed per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Attract,
	Repel,
}

impl Direction {
	pub fn sign(self) -> f32 {
		match self {
			Self::Attract => 1.0,
			Self::Repel => -1.0,
		}
	}
}

/// Linear falloff, one at the pointer and zero at `radius` and beyond.
pub fn falloff(distance: f32, radius: f32) -> f32 {
	(1.0 - distance / radius).max(0.0)
}

/// Advance every point by one frame.
///
/// Inside the interaction radius the pointer force acts and the point grows,
/// outside the point is pulled back to its home position. `ambient` adds a
/// variant specific force per point index.
pub fn advance(
	state: &mut State,
	pointer: na::Point3<f32>,
	direction: Direction,
	ambient: impl Fn(usize) -> na::Vector3<f32>,
) {
	let State {
		config,
		positions,
		velocities,
		homes,
		sizes,
		base_sizes,
		..
	} = state;
	let radius = config.interaction_radius;

	for (i, ((position, velocity), (home, (size, base_size)))) in positions
		.iter_mut()
		.zip(velocities.iter_mut())
		.zip(homes.iter().zip(sizes.iter_mut().zip(base_sizes.iter())))
		.enumerate()
	{
		let offset = pointer - *position;
		let distance = offset.norm();

		let force = if distance < radius {
			let amount = falloff(distance, radius);
			*size = base_size * (1.0 + config.growth * amount);
			if distance > MIN_DISTANCE {
				offset * (direction.sign() * config.strength * amount / distance)
			} else {
				na::Vector3::zeros()
			}
		} else {
			*size = *base_size;
			(*home - *position) * config.restore
		};

		*velocity += force + ambient(i);
		*position += *velocity;
		*velocity *= config.damping;
	}
}
