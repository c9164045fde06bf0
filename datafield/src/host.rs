//! Stand in for the browser: frame callbacks and a scripted pointer.

use field::{FrameId, FrameScheduler, ListenerId, PointerSource};
use input::{Pointer, SharedPointer};
use nalgebra as na;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::TAU;

/// Frame requests counted instead of scheduled, the caller runs frames
/// back to back.
#[derive(Debug, Default)]
pub struct HeadlessScheduler {
	next: u64,
	open: Option<FrameId>,
	pub requested: u64,
	pub cancelled: u64,
}

impl HeadlessScheduler {
	pub fn has_pending(&self) -> bool {
		self.open.is_some()
	}
}

impl FrameScheduler for HeadlessScheduler {
	fn request(&mut self) -> FrameId {
		self.next += 1;
		self.requested += 1;
		let id = FrameId(self.next);
		self.open = Some(id);
		id
	}

	fn cancel(&mut self, id: FrameId) {
		if self.open == Some(id) {
			self.open = None;
			self.cancelled += 1;
		}
	}
}

/// Pointer listeners fed from a script instead of input events.
#[derive(Default)]
pub struct ScriptedSource {
	next: u64,
	listeners: Vec<(ListenerId, SharedPointer)>,
}

impl ScriptedSource {
	pub fn listeners(&self) -> usize {
		self.listeners.len()
	}

	pub fn move_to(&self, position: na::Point2<f32>) {
		for (_, pointer) in &self.listeners {
			pointer.store(position);
		}
	}
}

impl PointerSource for ScriptedSource {
	fn listen(&mut self, pointer: SharedPointer) -> ListenerId {
		self.next += 1;
		let id = ListenerId(self.next);
		self.listeners.push((id, pointer));
		id
	}

	fn remove(&mut self, id: ListenerId) {
		self.listeners.retain(|(listener, _)| *listener != id);
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PointerPath {
	/// Never moves, the pointer stays in the center
	Idle,
	/// Circles around the center
	Circle,
	/// Random walk with occasional jumps
	RandomWalk,
	/// Far outside the window, the field comes to rest
	Far,
}

/// Frames per turn of the circular path.
const CIRCLE_PERIOD: f32 = 240.0;
/// Radius of the circle relative to the window.
const CIRCLE_RADIUS: f32 = 0.6;
/// Largest step of the random walk relative to the window.
const WALK_STEP: f32 = 0.025;
const WALK_JUMP: f64 = 0.01;

/// Cursor events of a window, one per frame.
pub struct Script {
	path: PointerPath,
	rng: StdRng,
	window: na::Vector2<f32>,
	cursor: na::Point2<f32>,
	pointer: Pointer,
	travel: f32,
}

impl Script {
	pub fn new(path: PointerPath, seed: Option<u64>, window: na::Vector2<f32>) -> Self {
		let rng = match seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		Self {
			path,
			rng,
			window,
			cursor: na::Point2::from(window / 2.0),
			pointer: Pointer::new(window),
			travel: 0.0,
		}
	}

	/// Pointer in normalized device coordinates for `frame`, `None` if the
	/// cursor did not move.
	pub fn next(&mut self, frame: u64) -> Option<na::Point2<f32>> {
		let center = self.window / 2.0;
		self.cursor = match self.path {
			PointerPath::Idle => return None,
			PointerPath::Circle => {
				let angle = frame as f32 / CIRCLE_PERIOD * TAU;
				na::Point2::from(center + center.component_mul(&na::vector![angle.cos(), angle.sin()]) * CIRCLE_RADIUS)
			},
			PointerPath::RandomWalk if self.rng.gen_bool(WALK_JUMP) => {
				na::point![self.rng.gen_range(0.0..self.window.x), self.rng.gen_range(0.0..self.window.y)]
			},
			PointerPath::RandomWalk => {
				let step = na::vector![
					self.rng.gen_range(-WALK_STEP..WALK_STEP),
					self.rng.gen_range(-WALK_STEP..WALK_STEP)
				];
				let cursor = self.cursor + self.window.component_mul(&step);
				na::point![cursor.x.clamp(0.0, self.window.x), cursor.y.clamp(0.0, self.window.y)]
			},
			PointerPath::Far if frame == 0 => na::Point2::from(self.window * 100.0),
			PointerPath::Far => return None,
		};
		self.travel += self.pointer.cursor_moved(self.cursor).norm();
		Some(self.pointer.position())
	}

	/// Distance moved in normalized device coordinates.
	pub fn travel(&self) -> f32 {
		self.travel
	}
}
