use std::cmp::Ordering;

use crate::{best_set::BestSet, Adapter, Metric};

/// Search result, `index` refers to the slice the tree was built from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Entry<Value> {
	pub distance: Value,
	pub index: usize,
}

#[derive(Clone, Copy)]
struct Node<const N: usize, Value> {
	position: [Value; N],
	index: usize,
}

/// Implicit kd-tree, children of node `i` are stored at `2i + 1` and `2i + 2`.
pub struct KDTree<const N: usize, Value, Point, Ada, Met>
where
	Value: Copy + Default + PartialOrd,
	Ada: Adapter<N, Value, Point>,
	Met: Metric<N, Value>,
{
	tree: Vec<Option<Node<N, Value>>>,
	len: usize,
	phantom: std::marker::PhantomData<(Point, Ada, Met)>,
}

impl<const N: usize, Value, Point, Ada, Met> KDTree<N, Value, Point, Ada, Met>
where
	Value: Copy + Default + PartialOrd,
	Ada: Adapter<N, Value, Point>,
	Met: Metric<N, Value>,
{
	pub fn new(data: &[Point]) -> Self {
		let mut nodes = data
			.iter()
			.enumerate()
			.map(|(index, point)| Node { position: Ada::get_all(point), index })
			.collect::<Vec<_>>();
		let mut tree = vec![None; data.len().next_power_of_two()];
		if let Some(upper) = nodes.len().checked_sub(1) {
			Self::build(0, 0, &mut tree, 0, upper, &mut nodes);
		}
		Self {
			tree,
			len: data.len(),
			phantom: std::marker::PhantomData,
		}
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	fn build(
		index: usize,
		dim: usize,
		tree: &mut Vec<Option<Node<N, Value>>>,
		lower: usize,
		upper: usize,
		nodes: &mut [Node<N, Value>],
	) {
		// middle is biased to the right, the left subtree is never smaller
		let middle = (upper - lower + 1) / 2 + lower;
		Self::select(middle, dim, lower, upper, nodes);
		if index >= tree.len() {
			tree.resize(index + 1, None);
		}
		tree[index] = Some(nodes[middle]);

		let next_dim = (dim + 1) % N;
		if lower < middle {
			Self::build(index * 2 + 1, next_dim, tree, lower, middle - 1, nodes);
		}
		if middle < upper {
			Self::build(index * 2 + 2, next_dim, tree, middle + 1, upper, nodes);
		}
	}

	/// Quickselect, afterwards `nodes[target]` holds the median along `dim`
	/// for the range `lower..=upper`.
	fn select(target: usize, dim: usize, mut lower: usize, mut upper: usize, nodes: &mut [Node<N, Value>]) {
		while lower < upper {
			let pivot_index = (upper - lower) / 2 + lower;
			let pivot = nodes[pivot_index].position[dim];
			nodes.swap(pivot_index, upper);
			let mut store = lower;
			for i in lower..upper {
				if nodes[i].position[dim] < pivot {
					nodes.swap(store, i);
					store += 1;
				}
			}
			nodes.swap(store, upper);
			match target.cmp(&store) {
				Ordering::Equal => return,
				Ordering::Less => upper = store - 1,
				Ordering::Greater => lower = store + 1,
			}
		}
	}

	/// Fill `result` with the nearest points closer than `max_distance`,
	/// sorted by distance. Returns how many entries are valid.
	pub fn k_nearest(&self, point: &Point, result: &mut [Entry<Value>], max_distance: Value) -> usize {
		self.nearest_to_position(&Ada::get_all(point), result, max_distance)
	}

	pub fn nearest_to_position(
		&self,
		position: &[Value; N],
		result: &mut [Entry<Value>],
		max_distance: Value,
	) -> usize {
		let mut best_set = BestSet::new(max_distance, result);
		if best_set.worst().is_some() {
			self.search_nearest(0, position, 0, &mut best_set);
		}
		best_set.into_sorted()
	}

	fn search_nearest(&self, index: usize, position: &[Value; N], dim: usize, best_set: &mut BestSet<Value>) {
		let Some(Some(node)) = self.tree.get(index) else {
			return;
		};
		let Some(worst) = best_set.worst() else {
			return;
		};
		let distance = Met::distance(&node.position, position);
		if distance < worst {
			best_set.insert(Entry { distance, index: node.index });
		}

		let next_dim = (dim + 1) % N;
		let (near, far) = if position[dim] < node.position[dim] {
			(index * 2 + 1, index * 2 + 2)
		} else {
			(index * 2 + 2, index * 2 + 1)
		};
		self.search_nearest(near, position, next_dim, best_set);
		if let Some(worst) = best_set.worst() {
			if Met::distance_plane(position, node.position[dim], dim) < worst {
				self.search_nearest(far, position, next_dim, best_set);
			}
		}
	}

	/// Visit every point closer than `max_distance`, in no particular order.
	pub fn within(&self, position: &[Value; N], max_distance: Value, mut visit: impl FnMut(Entry<Value>)) {
		self.search_within(0, position, 0, max_distance, &mut visit);
	}

	fn search_within(
		&self,
		index: usize,
		position: &[Value; N],
		dim: usize,
		max_distance: Value,
		visit: &mut impl FnMut(Entry<Value>),
	) {
		let Some(Some(node)) = self.tree.get(index) else {
			return;
		};
		let distance = Met::distance(&node.position, position);
		if distance < max_distance {
			visit(Entry { distance, index: node.index });
		}

		let next_dim = (dim + 1) % N;
		let (near, far) = if position[dim] < node.position[dim] {
			(index * 2 + 1, index * 2 + 2)
		} else {
			(index * 2 + 2, index * 2 + 1)
		};
		self.search_within(near, position, next_dim, max_distance, visit);
		if Met::distance_plane(position, node.position[dim], dim) < max_distance {
			self.search_within(far, position, next_dim, max_distance, visit);
		}
	}
}
