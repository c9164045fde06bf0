use nalgebra as na;

/// Copy of one point of a [`crate::State`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
	pub position: na::Point3<f32>,
	pub velocity: na::Vector3<f32>,
	pub home: na::Point3<f32>,
	pub size: f32,
}

/// Largest point count, edges store indices as `u32`.
pub const MAX_POINTS: usize = u32::MAX as usize;

/// Line between two points, `a < b`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Edge {
	pub a: u32,
	pub b: u32,
	pub opacity: f32,
}

static_assertions::assert_eq_size!(Edge, [u32; 3]);

impl Edge {
	/// Both indices must be at most [`MAX_POINTS`].
	pub fn new(a: usize, b: usize, opacity: f32) -> Self {
		let (a, b) = if a < b { (a, b) } else { (b, a) };
		debug_assert!(u32::try_from(b).is_ok(), "edge index {} does not fit into u32", b);
		Self { a: a as u32, b: b as u32, opacity }
	}

	pub fn indices(&self) -> (usize, usize) {
		(self.a as usize, self.b as usize)
	}
}

/// Everything a renderer needs for one frame.
pub struct Frame<'a> {
	/// World space, including the rotation of the field.
	pub positions: Vec<na::Point3<f32>>,
	pub sizes: &'a [f32],
	/// Connections recomputed this frame.
	pub edges: &'a [Edge],
	/// Connections fixed at initialization.
	pub links: &'a [Edge],
}

impl Frame<'_> {
	/// Positions as a flat `x, y, z` array for vertex buffers.
	pub fn position_data(&self) -> &[f32] {
		bytemuck::cast_slice(&self.positions)
	}

	pub fn edge_bytes(&self) -> &[u8] {
		bytemuck::cast_slice(self.edges)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edge_orders_indices() {
		let edge = Edge::new(7, 3, 0.5);
		assert_eq!(edge.indices(), (3, 7));
		assert_eq!(edge, Edge::new(3, 7, 0.5));
	}

	#[test]
	fn largest_index_fits() {
		let edge = Edge::new(MAX_POINTS, 0, 1.0);
		assert_eq!(edge.indices(), (0, MAX_POINTS));
	}

	#[cfg(all(debug_assertions, target_pointer_width = "64"))]
	#[test]
	#[should_panic(expected = "does not fit into u32")]
	fn index_past_u32_panics() {
		Edge::new(0, MAX_POINTS + 1, 1.0);
	}

	#[test]
	fn flat_position_data() {
		let frame = Frame {
			positions: vec![na::point![1.0, 2.0, 3.0], na::point![4.0, 5.0, 6.0]],
			sizes: &[],
			edges: &[],
			links: &[],
		};
		assert_eq!(frame.position_data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
	}
}
