use crossbeam::atomic::AtomicCell;
use nalgebra as na;
use std::sync::Arc;

/// Cursor tracker in normalized device coordinates.
///
/// Both axes span `-1..1` inside the window, `y` points up.
/// The position starts at the origin until the first cursor event.
pub struct Pointer {
	position: na::Point2<f32>,
	window: na::Vector2<f32>,
}

impl Pointer {
	pub fn new(window: na::Vector2<f32>) -> Self {
		Self { position: na::Point2::origin(), window }
	}

	/// Update from a cursor position in pixels and return the movement in
	/// normalized units.
	pub fn cursor_moved(&mut self, cursor: na::Point2<f32>) -> na::Vector2<f32> {
		let position = normalize(cursor, self.window);
		let delta = position - self.position;
		self.position = position;
		delta
	}

	pub fn position(&self) -> na::Point2<f32> {
		self.position
	}
}

/// Map a pixel position with the origin in the top left corner to normalized
/// device coordinates.
///
/// A degenerate window maps everything to the origin.
pub fn normalize(cursor: na::Point2<f32>, window: na::Vector2<f32>) -> na::Point2<f32> {
	if window.x <= 0.0 || window.y <= 0.0 {
		return na::Point2::origin();
	}
	let x = (cursor.x / window.x) * 2.0 - 1.0;
	let y = -(cursor.y / window.y) * 2.0 + 1.0;
	if x.is_finite() && y.is_finite() {
		na::point![x, y]
	} else {
		na::Point2::origin()
	}
}

/// Latest pointer position shared between the input listener and the frame
/// loop.
///
/// One side writes, the other side reads the most recent value; older values
/// are overwritten.
#[derive(Clone, Default)]
pub struct SharedPointer(Arc<AtomicCell<na::Point2<f32>>>);

impl SharedPointer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Non finite positions are ignored and keep the previous value.
	pub fn store(&self, position: na::Point2<f32>) {
		if position.x.is_finite() && position.y.is_finite() {
			self.0.store(position);
		}
	}

	pub fn load(&self) -> na::Point2<f32> {
		self.0.load()
	}

	/// Number of live handles, used to check that listeners released theirs.
	pub fn handles(&self) -> usize {
		Arc::strong_count(&self.0)
	}
}
