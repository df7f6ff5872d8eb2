const ID_PREFIX: &str = "node_";

/// Monotonic source of node ids. Owned by a graph rather than living in
/// module-level state, so separate graphs (and tests) never share a counter.
/// Ids are never reset or reused.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeIdGenerator {
	next: u64,
}

impl NodeIdGenerator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn next_id(&mut self) -> String {
		let id = format!("{ID_PREFIX}{}", self.next);
		self.next += 1;
		id
	}

	/// Advance past any generator-shaped ids in `existing` so future ids
	/// cannot collide with nodes restored from a snapshot.
	pub fn skip_past<'a>(&mut self, existing: impl IntoIterator<Item = &'a str>) {
		for id in existing {
			if let Some(n) = id
				.strip_prefix(ID_PREFIX)
				.and_then(|rest| rest.parse::<u64>().ok())
			{
				self.next = self.next.max(n + 1);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_are_prefixed_and_monotonic() {
		let mut ids = NodeIdGenerator::new();
		assert_eq!(ids.next_id(), "node_0");
		assert_eq!(ids.next_id(), "node_1");
		assert_eq!(ids.next_id(), "node_2");
	}

	#[test]
	fn generators_do_not_share_state() {
		let mut a = NodeIdGenerator::new();
		let mut b = NodeIdGenerator::new();
		a.next_id();
		a.next_id();
		assert_eq!(b.next_id(), "node_0");
	}

	#[test]
	fn skip_past_avoids_restored_ids() {
		let mut ids = NodeIdGenerator::new();
		ids.skip_past(["node_4", "1", "other_7", "node_2"]);
		assert_eq!(ids.next_id(), "node_5");
	}

	#[test]
	fn skip_past_ignores_foreign_ids() {
		let mut ids = NodeIdGenerator::new();
		ids.skip_past(["1", "abc", "node_x"]);
		assert_eq!(ids.next_id(), "node_0");
	}
}
