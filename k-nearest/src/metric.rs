pub trait Metric<const N: usize, Value>
where
	Value: PartialOrd,
{
	fn distance(left: &[Value; N], right: &[Value; N]) -> Value;

	/// Lower bound for the distance from `position` to any point on the
	/// other side of the splitting plane.
	fn distance_plane(position: &[Value; N], plane: Value, dimension: usize) -> Value;
}

/// Squared euclidean distance, compare against squared radii.
pub struct EuclideanDistanceSquared;

impl<const N: usize, Value> Metric<N, Value> for EuclideanDistanceSquared
where
	Value: PartialOrd
		+ Default
		+ Copy
		+ std::ops::Mul<Output = Value>
		+ std::ops::Add<Output = Value>
		+ std::ops::Sub<Output = Value>,
{
	fn distance(left: &[Value; N], right: &[Value; N]) -> Value {
		left.iter().zip(right).fold(Value::default(), |sum, (&l, &r)| {
			let diff = l - r;
			sum + diff * diff
		})
	}

	fn distance_plane(position: &[Value; N], plane: Value, dimension: usize) -> Value {
		let diff = position[dimension] - plane;
		diff * diff
	}
}
