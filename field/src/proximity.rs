//! Connection lines between nearby points.
//!
//! The pair loop is quadratic and only meant for a few hundred points. Larger
//! sets go through a kd-tree radius query with the same result.

use k_nearest::{Adapter, EuclideanDistanceSquared, Entry, KDTree};
use nalgebra as na;
use rand::Rng;

use crate::Edge;

/// Largest point count handled by the pair loop.
pub const BRUTE_FORCE_LIMIT: usize = 512;

struct PointAdapter;

impl Adapter<3, f32, na::Point3<f32>> for PointAdapter {
	fn get(point: &na::Point3<f32>, dimension: usize) -> f32 {
		point[dimension]
	}
}

type Tree = KDTree<3, f32, na::Point3<f32>, PointAdapter, EuclideanDistanceSquared>;

/// Replace `edges` with every pair closer than `threshold`, ordered by the
/// first then the second index.
///
/// Opacity falls from one for identical positions to zero at the threshold.
pub fn graph(positions: &[na::Point3<f32>], threshold: f32, edges: &mut Vec<Edge>) {
	edges.clear();
	if positions.len() < 2 || !(threshold > 0.0) {
		return;
	}
	if positions.len() <= BRUTE_FORCE_LIMIT {
		brute_force(positions, threshold, edges);
	} else {
		indexed(positions, threshold, edges);
	}
}

fn brute_force(positions: &[na::Point3<f32>], threshold: f32, edges: &mut Vec<Edge>) {
	let max = threshold * threshold;
	for (i, a) in positions.iter().enumerate() {
		for (j, b) in positions.iter().enumerate().skip(i + 1) {
			let distance = (*b - *a).norm_squared();
			if distance < max {
				edges.push(Edge::new(i, j, opacity(distance, threshold)));
			}
		}
	}
}

fn indexed(positions: &[na::Point3<f32>], threshold: f32, edges: &mut Vec<Edge>) {
	let max = threshold * threshold;
	let tree = Tree::new(positions);
	for (i, position) in positions.iter().enumerate() {
		let start = edges.len();
		tree.within(&PointAdapter::get_all(position), max, |entry| {
			if entry.index > i {
				edges.push(Edge::new(i, entry.index, opacity(entry.distance, threshold)));
			}
		});
		edges[start..].sort_unstable_by_key(|edge| edge.b);
	}
}

fn opacity(distance_squared: f32, threshold: f32) -> f32 {
	(1.0 - distance_squared.sqrt() / threshold).clamp(0.0, 1.0)
}

/// Static lines from every point to its `k` nearest neighbors.
///
/// A pair is emitted once, from the lower index, and only if the higher
/// index is among the neighbors of the lower one. Opacity is random in
/// `[0.15, 0.3)`. `k` above the number of other points links everything.
pub fn nearest_links(positions: &[na::Point3<f32>], k: usize, rng: &mut impl Rng) -> Vec<Edge> {
	let mut links = Vec::new();
	if positions.len() < 2 || k == 0 {
		return links;
	}
	let k = k.min(positions.len() - 1);
	let tree = Tree::new(positions);
	let mut nearest = vec![Entry::default(); k + 1];
	for (i, position) in positions.iter().enumerate() {
		let found = tree.k_nearest(position, &mut nearest, f32::MAX);
		for entry in nearest[..found].iter().filter(|entry| entry.index != i).take(k) {
			if entry.index > i {
				links.push(Edge::new(i, entry.index, rng.gen_range(0.15..0.3)));
			}
		}
	}
	links
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, SeedableRng};
	use std::collections::HashSet;

	fn cloud(count: usize, extent: f32, seed: u64) -> Vec<na::Point3<f32>> {
		let mut rng = StdRng::seed_from_u64(seed);
		(0..count)
			.map(|_| crate::layout::cube(&mut rng, extent))
			.collect()
	}

	fn check_edges(positions: &[na::Point3<f32>], threshold: f32, edges: &[Edge]) {
		let mut seen = HashSet::new();
		for edge in edges {
			assert!(edge.a < edge.b, "self edge or unordered pair {:?}", edge);
			assert!(seen.insert((edge.a, edge.b)), "duplicate edge {:?}", edge);
			assert!((0.0..=1.0).contains(&edge.opacity));
		}
		for i in 0..positions.len() {
			for j in (i + 1)..positions.len() {
				let close = (positions[j] - positions[i]).norm_squared() < threshold * threshold;
				assert_eq!(close, seen.contains(&(i as u32, j as u32)), "pair {} {}", i, j);
			}
		}
	}

	#[test]
	fn edges_match_distances() {
		let positions = cloud(120, 3.0, 1);
		let mut edges = Vec::new();
		graph(&positions, 2.0, &mut edges);
		assert!(!edges.is_empty());
		check_edges(&positions, 2.0, &edges);
	}

	#[test]
	fn kd_tree_matches_pair_loop() {
		let positions = cloud(BRUTE_FORCE_LIMIT + 88, 6.0, 2);
		let mut expected = Vec::new();
		brute_force(&positions, 1.5, &mut expected);

		let mut edges = Vec::new();
		graph(&positions, 1.5, &mut edges);
		assert_eq!(edges.len(), expected.len());
		for (edge, expected) in edges.iter().zip(&expected) {
			assert_eq!(edge.indices(), expected.indices());
			assert!((edge.opacity - expected.opacity).abs() < 1e-6);
		}
		check_edges(&positions, 1.5, &edges);
	}

	#[test]
	fn opacity_falls_with_distance() {
		let positions = [na::point![0.0, 0.0, 0.0], na::point![0.5, 0.0, 0.0], na::point![1.5, 0.0, 0.0]];
		let mut edges = Vec::new();
		graph(&positions, 2.0, &mut edges);
		assert_eq!(
			edges,
			[Edge::new(0, 1, 0.75), Edge::new(0, 2, 0.25), Edge::new(1, 2, 0.5)]
		);
	}

	#[test]
	fn degenerate_inputs() {
		let mut edges = vec![Edge::new(0, 1, 1.0)];
		graph(&[], 2.0, &mut edges);
		assert!(edges.is_empty());

		graph(&[na::Point3::origin()], 2.0, &mut edges);
		assert!(edges.is_empty());

		let positions = cloud(10, 1.0, 3);
		graph(&positions, 0.0, &mut edges);
		assert!(edges.is_empty());
		graph(&positions, f32::NAN, &mut edges);
		assert!(edges.is_empty());
	}

	#[test]
	fn coincident_points_connect() {
		let positions = vec![na::point![1.0, 1.0, 1.0]; 3];
		let mut edges = Vec::new();
		graph(&positions, 0.1, &mut edges);
		assert_eq!(edges.len(), 3);
		assert!(edges.iter().all(|edge| edge.opacity == 1.0));
	}

	#[test]
	fn links_to_nearest() {
		let positions = [
			na::point![0.0, 0.0, 0.0],
			na::point![1.0, 0.0, 0.0],
			na::point![10.0, 0.0, 0.0],
			na::point![11.0, 0.0, 0.0],
		];
		let mut rng = StdRng::seed_from_u64(4);
		let links = nearest_links(&positions, 1, &mut rng);
		let pairs = links.iter().map(|link| link.indices()).collect::<Vec<_>>();
		assert_eq!(pairs, [(0, 1), (2, 3)]);
		assert!(links.iter().all(|link| (0.15..0.3).contains(&link.opacity)));

		assert!(nearest_links(&positions, 0, &mut rng).is_empty());
		assert!(nearest_links(&positions[..1], 2, &mut rng).is_empty());
	}

	#[test]
	fn links_with_huge_k() {
		let positions = cloud(4, 1.0, 5);
		let mut rng = StdRng::seed_from_u64(6);
		for k in [3, 4, 1000, usize::MAX] {
			let links = nearest_links(&positions, k, &mut rng);
			let mut pairs = links.iter().map(|link| link.indices()).collect::<Vec<_>>();
			pairs.sort_unstable();
			assert_eq!(pairs, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)], "k = {}", k);
		}
	}
}
