use serde::{Deserialize, Serialize};

/// Canvas-space coordinates of a node's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

/// User-editable node payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
	pub label: String,
}

/// A vertex of the flow graph. The id is opaque and stable for the node's
/// lifetime; `selected` is true on at most one node at a time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
	pub id: String,
	pub template: String,
	pub position: Position,
	pub data: NodeData,
	#[serde(default)]
	pub selected: bool,
}

impl FlowNode {
	pub fn new(id: String, template: &str, position: Position) -> Self {
		Self {
			id,
			template: template.to_string(),
			position,
			data: NodeData {
				label: template.to_string(),
			},
			selected: false,
		}
	}
}

/// A directed connection between two nodes, optionally qualified by named
/// handles on each end. Identity is the full source/target/handle tuple.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
	pub source: String,
	pub target: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_handle: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub target_handle: Option<String>,
}

impl FlowEdge {
	/// Derived identity, unique per (source, target, handles) tuple.
	pub fn id(&self) -> String {
		format!(
			"edge-{}{}-{}{}",
			self.source,
			self.source_handle.as_deref().unwrap_or(""),
			self.target,
			self.target_handle.as_deref().unwrap_or(""),
		)
	}

	/// An absent or empty target handle counts as missing.
	pub fn has_target_handle(&self) -> bool {
		self.target_handle.as_deref().is_some_and(|h| !h.is_empty())
	}

	pub fn touches(&self, node_id: &str) -> bool {
		self.source == node_id || self.target == node_id
	}
}

/// Connect-gesture parameters as reported by the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectParams {
	pub source: String,
	pub target: String,
	pub source_handle: Option<String>,
	pub target_handle: Option<String>,
}

/// Pan/zoom state captured into snapshots. Owned by the canvas while the
/// editor is live.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
	pub x: f64,
	pub y: f64,
	pub zoom: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			zoom: 1.0,
		}
	}
}

/// Serializable picture of the whole editor: nodes, edges, viewport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
	pub nodes: Vec<FlowNode>,
	pub edges: Vec<FlowEdge>,
	#[serde(default)]
	pub viewport: Viewport,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveStatus {
	Success,
	Error,
}

/// Transient result of one save attempt; shown in the banner, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveOutcome {
	pub status: SaveStatus,
	pub message: String,
}

impl SaveOutcome {
	pub fn success(message: &str) -> Self {
		Self {
			status: SaveStatus::Success,
			message: message.to_string(),
		}
	}

	pub fn error(message: &str) -> Self {
		Self {
			status: SaveStatus::Error,
			message: message.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn edge(source_handle: Option<&str>, target_handle: Option<&str>) -> FlowEdge {
		FlowEdge {
			source: "a".into(),
			target: "b".into(),
			source_handle: source_handle.map(str::to_string),
			target_handle: target_handle.map(str::to_string),
		}
	}

	#[test]
	fn edge_identity_covers_the_whole_tuple() {
		assert_eq!(edge(Some("out"), Some("in")).id(), "edge-aout-bin");
		assert_eq!(edge(None, None).id(), "edge-a-b");
		assert_ne!(edge(None, Some("in")).id(), edge(None, None).id());
	}

	#[test]
	fn absent_and_empty_target_handles_are_both_missing() {
		assert!(!edge(None, None).has_target_handle());
		assert!(!edge(None, Some("")).has_target_handle());
		assert!(edge(None, Some("in")).has_target_handle());
	}
}
