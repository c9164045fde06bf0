use nalgebra as na;
use rand::{rngs::StdRng, SeedableRng};
use std::f32::consts::TAU;

use crate::{Config, Direction, Edge, Frame, Point, Variant};

/// Scale from normalized device coordinates to world units.
pub const POINTER_SCALE: f32 = 5.0;

/// Clock advance per frame.
pub const TIME_STEP: f32 = 0.01;

/// One kind of particle animation.
///
/// `init` builds the point set for a configuration, `step` advances it by
/// one frame for a pointer in world space.
pub trait ParticleSystem {
	fn variant(&self) -> Variant;

	/// Sign of the pointer force.
	fn direction(&self) -> Direction;

	fn init(&self, config: &Config) -> State;

	fn step(&self, state: &mut State, pointer: na::Point3<f32>);

	/// Pointer position on the plane facing the camera.
	fn pointer_to_world(&self, ndc: na::Point2<f32>) -> na::Point3<f32> {
		na::point![ndc.x * POINTER_SCALE, ndc.y * POINTER_SCALE, 0.0]
	}
}

/// Kinematic state of a particle field.
///
/// Points are stored as parallel arrays, all with the same length which
/// never changes after creation.
#[derive(Debug, Clone)]
pub struct State {
	pub config: Config,
	pub positions: Vec<na::Point3<f32>>,
	pub velocities: Vec<na::Vector3<f32>>,
	pub homes: Vec<na::Point3<f32>>,
	pub sizes: Vec<f32>,
	pub base_sizes: Vec<f32>,

	/// Connections of the current frame.
	pub edges: Vec<Edge>,
	/// Connections fixed at initialization.
	pub links: Vec<Edge>,

	/// Angle around the vertical axis.
	pub rotation: f32,
	pub time: f32,
	pub frame: u64,
}

impl State {
	/// Points start at rest in their home position, one per home and base
	/// size pair.
	pub fn new(config: Config, points: impl IntoIterator<Item = (na::Point3<f32>, f32)>) -> Self {
		let (homes, base_sizes): (Vec<_>, Vec<_>) = points.into_iter().unzip();
		Self {
			config,
			positions: homes.clone(),
			velocities: vec![na::Vector3::zeros(); homes.len()],
			sizes: base_sizes.clone(),
			homes,
			base_sizes,
			edges: Vec::new(),
			links: Vec::new(),
			rotation: 0.0,
			time: 0.0,
			frame: 0,
		}
	}

	pub fn len(&self) -> usize {
		self.positions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	pub fn point(&self, index: usize) -> Point {
		Point {
			position: self.positions[index],
			velocity: self.velocities[index],
			home: self.homes[index],
			size: self.sizes[index],
		}
	}

	pub fn orientation(&self) -> na::Rotation3<f32> {
		na::Rotation3::from_axis_angle(&na::Vector3::y_axis(), self.rotation)
	}

	/// Map a world space position into the rotating frame of the points.
	pub fn to_local(&self, world: na::Point3<f32>) -> na::Point3<f32> {
		self.orientation().inverse() * world
	}

	pub fn world_positions(&self) -> Vec<na::Point3<f32>> {
		let orientation = self.orientation();
		self.positions.iter().map(|p| orientation * *p).collect()
	}

	pub fn frame_output(&self) -> Frame<'_> {
		Frame {
			positions: self.world_positions(),
			sizes: &self.sizes,
			edges: &self.edges,
			links: &self.links,
		}
	}

	/// Advance the clock at the start of a frame.
	pub fn tick(&mut self) {
		self.time += TIME_STEP;
		self.frame += 1;
	}

	/// Turn the whole field, independent of the physics.
	pub fn rotate(&mut self) {
		self.rotation = (self.rotation + self.config.rotation_speed).rem_euclid(TAU);
	}

	pub fn max_speed(&self) -> f32 {
		self.velocities.iter().map(|v| v.norm()).fold(0.0, f32::max)
	}

	pub fn max_displacement(&self) -> f32 {
		self.positions
			.iter()
			.zip(&self.homes)
			.map(|(p, h)| (*p - *h).norm())
			.fold(0.0, f32::max)
	}

	/// Release the per frame buffers.
	pub fn clear_frame_buffers(&mut self) {
		self.edges = Vec::new();
	}
}

/// Seeded generator if the configuration asks for reproducible layouts.
pub(crate) fn layout_rng(config: &Config) -> StdRng {
	match config.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_entropy(),
	}
}
