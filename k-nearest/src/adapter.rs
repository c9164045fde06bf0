/// Read access to the coordinates of a point.
pub trait Adapter<const N: usize, Value, Point>
where
	Value: Copy + Default,
{
	fn get(point: &Point, dimension: usize) -> Value;

	fn get_all(point: &Point) -> [Value; N] {
		std::array::from_fn(|dimension| Self::get(point, dimension))
	}
}
