use crate::kd_tree::Entry;

/// Fixed size max-heap of the best candidates found so far.
///
/// Starts filled with placeholders at the maximal distance, so the root is
/// always the entry to replace next.
pub struct BestSet<'a, Value>
where
	Value: PartialOrd,
{
	entries: &'a mut [Entry<Value>],
}

impl<'a, Value> BestSet<'a, Value>
where
	Value: Copy + PartialOrd,
{
	pub fn new(max_distance: Value, entries: &'a mut [Entry<Value>]) -> Self {
		entries.fill(Entry { distance: max_distance, index: usize::MAX });
		Self { entries }
	}

	/// Distance a candidate has to beat, `None` without any capacity.
	pub fn worst(&self) -> Option<Value> {
		self.entries.first().map(|entry| entry.distance)
	}

	pub fn insert(&mut self, entry: Entry<Value>) {
		self.entries[0] = entry;
		let len = self.entries.len();
		self.sift_down(0, len);
	}

	fn sift_down(&mut self, mut index: usize, len: usize) {
		loop {
			let mut largest = index;
			for child in [index * 2 + 1, index * 2 + 2] {
				if child < len && self.entries[child].distance > self.entries[largest].distance {
					largest = child;
				}
			}
			if largest == index {
				return;
			}
			self.entries.swap(index, largest);
			index = largest;
		}
	}

	/// Sort ascending by distance and return the number of real entries.
	pub fn into_sorted(mut self) -> usize {
		let mut found = self.entries.len();
		for end in (0..self.entries.len()).rev() {
			if self.entries[0].index == usize::MAX {
				found = end;
			}
			self.entries.swap(0, end);
			self.sift_down(0, end);
		}
		found
	}
}
