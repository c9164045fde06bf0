//! Initial placement of points.
//!
//! The index based layouts are pure, the same index and count always give the
//! same position. The random layouts draw from the passed generator.

use nalgebra as na;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Equal area spiral on a sphere.
pub fn sphere_shell(index: usize, count: usize, radius: f32) -> na::Point3<f32> {
	if count == 0 {
		return na::Point3::origin();
	}
	let phi = (-1.0 + (2 * index) as f32 / count as f32).clamp(-1.0, 1.0).acos();
	let theta = (count as f32 * PI).sqrt() * phi;
	na::point![
		radius * theta.cos() * phi.sin(),
		radius * theta.sin() * phi.sin(),
		radius * phi.cos()
	]
}

/// Points per side of the square grid holding `count` points.
pub fn grid_side(count: usize) -> usize {
	let mut side = (count as f64).sqrt().ceil() as usize;
	while side * side < count {
		side += 1;
	}
	side.max(1)
}

/// Column and row of `index` in a grid of `side` points per side.
pub fn grid_cell(index: usize, side: usize) -> (usize, usize) {
	(index / side, index % side)
}

/// Square grid in the horizontal plane, filled row by row.
pub fn grid(index: usize, count: usize, extent: f32) -> na::Point3<f32> {
	let side = grid_side(count);
	let spacing = 2.0 * extent / side as f32;
	let center = side as f32 / 2.0;
	let (column, row) = grid_cell(index, side);
	na::point![
		(column as f32 - center) * spacing,
		0.0,
		(row as f32 - center) * spacing
	]
}

/// Rest height of the wave surface.
pub fn wave_height(x: f32, z: f32) -> f32 {
	(2.0 * (x * x + z * z).sqrt()).sin() * 0.5 + 0.5
}

/// Rest height of the flow surface, from the grid cell instead of the position.
pub fn flow_height(column: usize, row: usize) -> f32 {
	(0.5 * column as f32).sin() * (0.5 * row as f32).cos() * 2.0
}

/// Uniform inside the cube `[-extent, extent]³`.
pub fn cube(rng: &mut impl Rng, extent: f32) -> na::Point3<f32> {
	if extent <= 0.0 {
		return na::Point3::origin();
	}
	na::point![
		rng.gen_range(-extent..=extent),
		rng.gen_range(-extent..=extent),
		rng.gen_range(-extent..=extent)
	]
}

/// Uniform on the surface of a sphere.
pub fn sphere_surface(rng: &mut impl Rng, radius: f32) -> na::Point3<f32> {
	let direction = random_direction(rng);
	na::Point3::from(direction * radius)
}

/// Random point inside a sphere, denser towards the center.
pub fn ball(rng: &mut impl Rng, radius: f32) -> na::Point3<f32> {
	let direction = random_direction(rng);
	na::Point3::from(direction * radius * rng.gen::<f32>())
}

/// Offset up to half of `amount` per axis, zero without drawing for a
/// non positive amount.
pub fn jitter(rng: &mut impl Rng, amount: f32) -> na::Vector3<f32> {
	if amount <= 0.0 {
		return na::Vector3::zeros();
	}
	let half = amount / 2.0;
	na::vector![
		rng.gen_range(-half..=half),
		rng.gen_range(-half..=half),
		rng.gen_range(-half..=half)
	]
}

fn random_direction(rng: &mut impl Rng) -> na::Vector3<f32> {
	let phi = rng.gen_range(0.0..TAU);
	let cos_theta = rng.gen_range(-1.0f32..=1.0);
	let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
	na::vector![sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta]
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use rand::{rngs::StdRng, SeedableRng};

	#[test]
	fn shell_is_on_sphere() {
		for count in [1, 2, 17, 150] {
			for index in 0..count {
				let position = sphere_shell(index, count, 4.0);
				assert_abs_diff_eq!(position.coords.norm(), 4.0, epsilon = 1e-4);
			}
		}
	}

	#[test]
	fn shell_is_deterministic() {
		let a = (0..64).map(|i| sphere_shell(i, 64, 2.5)).collect::<Vec<_>>();
		let b = (0..64).map(|i| sphere_shell(i, 64, 2.5)).collect::<Vec<_>>();
		assert_eq!(a, b);
	}

	#[test]
	fn shell_points_are_distinct() {
		let points = (0..100).map(|i| sphere_shell(i, 100, 1.0)).collect::<Vec<_>>();
		for (i, a) in points.iter().enumerate() {
			for b in &points[(i + 1)..] {
				assert!((a - b).norm() > 1e-3);
			}
		}
	}

	#[test]
	fn grid_fills_square() {
		assert_eq!(grid_side(0), 1);
		assert_eq!(grid_side(1), 1);
		assert_eq!(grid_side(10), 4);
		assert_eq!(grid_side(16), 4);
		assert_eq!(grid_side(17), 5);

		let first = grid(0, 16, 4.0);
		assert_abs_diff_eq!(first, na::point![-4.0, 0.0, -4.0]);
		let last = grid(15, 16, 4.0);
		assert_abs_diff_eq!(last, na::point![2.0, 0.0, 2.0]);
	}

	#[test]
	fn wave_height_range() {
		assert_abs_diff_eq!(wave_height(0.0, 0.0), 0.5);
		for i in 0..100 {
			let h = wave_height(i as f32 * 0.1, -(i as f32) * 0.05);
			assert!((0.0..=1.0).contains(&h));
		}
	}

	#[test]
	fn flow_height_by_cell() {
		assert_eq!(grid_cell(0, 4), (0, 0));
		assert_eq!(grid_cell(6, 4), (1, 2));
		assert_eq!(flow_height(0, 3), 0.0);
		assert_abs_diff_eq!(flow_height(1, 0), 2.0 * 0.5f32.sin());
		assert_abs_diff_eq!(flow_height(3, 2), 2.0 * 1.5f32.sin() * 1.0f32.cos());
		for column in 0..10 {
			for row in 0..10 {
				assert!(flow_height(column, row).abs() <= 2.0);
			}
		}
	}

	#[test]
	fn random_layouts_stay_inside() {
		let mut rng = StdRng::seed_from_u64(5);
		for _ in 0..500 {
			let p = cube(&mut rng, 3.0);
			assert!(p.coords.iter().all(|v| v.abs() <= 3.0));
			assert_abs_diff_eq!(sphere_surface(&mut rng, 4.0).coords.norm(), 4.0, epsilon = 1e-4);
			assert!(ball(&mut rng, 2.0).coords.norm() <= 2.0 + 1e-4);
			assert!(jitter(&mut rng, 0.3).iter().all(|v| v.abs() <= 0.15));
		}
		assert_eq!(jitter(&mut rng, 0.0), na::Vector3::zeros());
		assert_eq!(cube(&mut rng, 0.0), na::Point3::origin());
	}
}
