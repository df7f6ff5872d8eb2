use super::id::NodeIdGenerator;
use super::types::{ConnectParams, FlowEdge, FlowNode, Position};

/// Authoritative node and edge collections. Every mutation runs through a
/// method here and completes within the calling gesture turn, so observers
/// always see a whole, consistent state.
///
/// Nodes keep creation order; edges keep connect order. Nothing is ever
/// deleted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowGraph {
	nodes: Vec<FlowNode>,
	edges: Vec<FlowEdge>,
	ids: NodeIdGenerator,
}

impl FlowGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Rebuild from restored collections. The id generator is advanced past
	/// every restored id so later spawns stay unique.
	pub fn from_parts(nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) -> Self {
		let mut ids = NodeIdGenerator::new();
		ids.skip_past(nodes.iter().map(|n| n.id.as_str()));
		Self { nodes, edges, ids }
	}

	pub fn nodes(&self) -> &[FlowNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[FlowEdge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Option<&FlowNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Drop-gesture factory. An empty template is a silent no-op; otherwise
	/// the new node is appended with a fresh id and its label seeded from
	/// the template.
	pub fn spawn_node(&mut self, template: &str, position: Position) -> Option<&FlowNode> {
		if template.is_empty() {
			return None;
		}
		let id = self.ids.next_id();
		self.nodes.push(FlowNode::new(id, template, position));
		self.nodes.last()
	}

	/// Connect-gesture handler. Appends exactly one edge; duplicates and
	/// self-loops are not rejected here.
	pub fn connect(&mut self, params: ConnectParams) -> FlowEdge {
		let edge = FlowEdge {
			source: params.source,
			target: params.target,
			source_handle: params.source_handle,
			target_handle: params.target_handle,
		};
		self.edges.push(edge.clone());
		edge
	}

	/// Position update reported by the canvas while dragging. Unknown ids
	/// are ignored.
	pub fn move_node(&mut self, id: &str, position: Position) {
		if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
			node.position = position;
		}
	}

	pub fn set_label(&mut self, id: &str, label: &str) {
		if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
			node.data.label = label.to_string();
		}
	}

	/// Set `selected` on exactly the named node, false everywhere else.
	pub fn select_only(&mut self, id: &str) {
		for node in &mut self.nodes {
			node.selected = node.id == id;
		}
	}

	pub fn clear_selection(&mut self) {
		for node in &mut self.nodes {
			node.selected = false;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pos(x: f64, y: f64) -> Position {
		Position { x, y }
	}

	#[test]
	fn spawn_appends_in_creation_order() {
		let mut graph = FlowGraph::new();
		graph.spawn_node("textnode", pos(10.0, 20.0));
		graph.spawn_node("textnode", pos(30.0, 40.0));

		let ids: Vec<_> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["node_0", "node_1"]);
		assert_eq!(graph.nodes()[1].position, pos(30.0, 40.0));
	}

	#[test]
	fn spawned_node_starts_with_template_label_unselected() {
		let mut graph = FlowGraph::new();
		let node = graph.spawn_node("textnode", pos(1.0, 2.0)).unwrap();
		assert_eq!(node.template, "textnode");
		assert_eq!(node.data.label, "textnode");
		assert!(!node.selected);
	}

	#[test]
	fn empty_template_drop_is_a_no_op() {
		let mut graph = FlowGraph::new();
		assert!(graph.spawn_node("", pos(0.0, 0.0)).is_none());
		assert!(graph.nodes().is_empty());
	}

	#[test]
	fn duplicate_connects_append_duplicate_edges() {
		let mut graph = FlowGraph::new();
		let params = ConnectParams {
			source: "a".into(),
			target: "b".into(),
			source_handle: Some("out".into()),
			target_handle: Some("in".into()),
		};
		graph.connect(params.clone());
		graph.connect(params);
		assert_eq!(graph.edges().len(), 2);
		assert_eq!(graph.edges()[0], graph.edges()[1]);
	}

	#[test]
	fn move_node_updates_position_and_ignores_unknown_ids() {
		let mut graph = FlowGraph::new();
		graph.spawn_node("textnode", pos(0.0, 0.0));
		graph.move_node("node_0", pos(5.0, 6.0));
		graph.move_node("ghost", pos(9.0, 9.0));
		assert_eq!(graph.nodes()[0].position, pos(5.0, 6.0));
	}

	#[test]
	fn select_only_flags_exactly_one_node() {
		let mut graph = FlowGraph::new();
		graph.spawn_node("textnode", pos(0.0, 0.0));
		graph.spawn_node("textnode", pos(1.0, 1.0));
		graph.select_only("node_1");
		let flags: Vec<_> = graph.nodes().iter().map(|n| n.selected).collect();
		assert_eq!(flags, [false, true]);

		graph.select_only("node_0");
		let flags: Vec<_> = graph.nodes().iter().map(|n| n.selected).collect();
		assert_eq!(flags, [true, false]);
	}

	#[test]
	fn restored_graph_keeps_spawning_fresh_ids() {
		let restored = vec![
			FlowNode::new("1".into(), "textnode", pos(250.0, 5.0)),
			FlowNode::new("node_3".into(), "textnode", pos(0.0, 0.0)),
		];
		let mut graph = FlowGraph::from_parts(restored, Vec::new());
		let node = graph.spawn_node("textnode", pos(2.0, 2.0)).unwrap();
		assert_eq!(node.id, "node_4");
	}
}
