use log::warn;

use super::types::{FlowSnapshot, SaveOutcome};

/// Fixed key the whole flow is stored under; each save overwrites the last.
pub const FLOW_KEY: &str = "flow-key";

/// Minimal string key-value interface over whatever the host provides.
pub trait KeyValueStore {
	fn get_item(&self, key: &str) -> Option<String>;
	fn set_item(&mut self, key: &str, value: &str);
}

/// Browser localStorage. When no window or storage is available the store
/// degrades to a no-op, matching the silent-failure policy of the shell.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
	fn storage() -> Option<web_sys::Storage> {
		web_sys::window().and_then(|w| w.local_storage().ok().flatten())
	}
}

impl KeyValueStore for LocalStorage {
	fn get_item(&self, key: &str) -> Option<String> {
		Self::storage().and_then(|s| s.get_item(key).ok().flatten())
	}

	fn set_item(&mut self, key: &str, value: &str) {
		if let Some(storage) = Self::storage() {
			let _ = storage.set_item(key, value);
		}
	}
}

/// Persistence gateway: serializes snapshots as JSON under [`FLOW_KEY`].
/// Only ever invoked after the validator has passed, so the success outcome
/// is the normal result.
#[derive(Clone, Debug, Default)]
pub struct SnapshotGateway<S> {
	store: S,
}

impl<S: KeyValueStore> SnapshotGateway<S> {
	pub fn new(store: S) -> Self {
		Self { store }
	}

	/// Read back the stored flow. `None` when nothing was saved yet or the
	/// stored value no longer parses; a corrupt value must not take down
	/// startup.
	pub fn load(&self) -> Option<FlowSnapshot> {
		let raw = self.store.get_item(FLOW_KEY)?;
		match serde_json::from_str(&raw) {
			Ok(snapshot) => Some(snapshot),
			Err(err) => {
				warn!("discarding unreadable stored flow: {err}");
				None
			}
		}
	}

	pub fn save(&mut self, snapshot: &FlowSnapshot) -> SaveOutcome {
		let Ok(raw) = serde_json::to_string(snapshot) else {
			// Plain data; serialization failure here is unreachable in
			// practice.
			return SaveOutcome::error("Cannot Save Flow");
		};
		self.store.set_item(FLOW_KEY, &raw);
		SaveOutcome::success("Save Successfull")
	}
}

#[cfg(test)]
impl<S: Clone> SnapshotGateway<S> {
	pub(crate) fn store_clone(&self) -> S {
		self.store.clone()
	}
}

/// In-memory store for unit tests.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryStore {
	items: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
	fn get_item(&self, key: &str) -> Option<String> {
		self.items.get(key).cloned()
	}

	fn set_item(&mut self, key: &str, value: &str) {
		self.items.insert(key.to_string(), value.to_string());
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::{FlowEdge, FlowNode, Position, SaveStatus, Viewport};
	use super::*;

	fn snapshot(label: &str) -> FlowSnapshot {
		let mut node = FlowNode::new("1".into(), "textnode", Position { x: 250.0, y: 5.0 });
		node.data.label = label.to_string();
		FlowSnapshot {
			nodes: vec![node],
			edges: vec![FlowEdge {
				source: "1".into(),
				target: "1".into(),
				source_handle: Some("out".into()),
				target_handle: None,
			}],
			viewport: Viewport {
				x: 12.0,
				y: -3.0,
				zoom: 1.5,
			},
		}
	}

	#[test]
	fn save_then_load_round_trips() {
		let mut gateway = SnapshotGateway::new(MemoryStore::default());
		let outcome = gateway.save(&snapshot("hello"));
		assert_eq!(outcome.status, SaveStatus::Success);
		assert_eq!(outcome.message, "Save Successfull");
		assert_eq!(gateway.load(), Some(snapshot("hello")));
	}

	#[test]
	fn second_save_overwrites_the_first() {
		let mut gateway = SnapshotGateway::new(MemoryStore::default());
		gateway.save(&snapshot("first"));
		gateway.save(&snapshot("second"));
		assert_eq!(gateway.load(), Some(snapshot("second")));
	}

	#[test]
	fn load_is_none_on_empty_store() {
		let gateway = SnapshotGateway::new(MemoryStore::default());
		assert_eq!(gateway.load(), None);
	}

	#[test]
	fn corrupt_stored_value_loads_as_none() {
		let mut store = MemoryStore::default();
		store.set_item(FLOW_KEY, "{not json");
		let gateway = SnapshotGateway::new(store);
		assert_eq!(gateway.load(), None);
	}

	#[test]
	fn edges_without_handles_serialize_without_handle_fields() {
		let mut gateway = SnapshotGateway::new(MemoryStore::default());
		let mut snap = snapshot("x");
		snap.edges[0].source_handle = None;
		gateway.save(&snap);
		let raw = gateway.store.get_item(FLOW_KEY).unwrap();
		assert!(!raw.contains("source_handle"));
		assert!(!raw.contains("target_handle"));
	}
}
