use super::types::{FlowEdge, FlowNode};

/// Why a save attempt was refused. The user-facing message is the same for
/// every variant; the classification exists for logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveRejection {
	/// More than one edge arrives without a target handle. A single one is
	/// tolerated as the flow's entry point.
	DanglingTargets(usize),
	/// At least one node appears in no edge, as source or target.
	UnconnectedNode,
}

impl SaveRejection {
	pub fn message(&self) -> &'static str {
		"Cannot Save Flow"
	}
}

pub fn empty_target_handles(edges: &[FlowEdge]) -> usize {
	edges.iter().filter(|e| !e.has_target_handle()).count()
}

pub fn has_unconnected_node(nodes: &[FlowNode], edges: &[FlowEdge]) -> bool {
	nodes
		.iter()
		.any(|node| !edges.iter().any(|edge| edge.touches(&node.id)))
}

/// Structural gate run before persisting. Graphs of zero or one node always
/// pass, whatever their edges; larger graphs fail when more than one edge
/// lacks a target handle or any node is untouched by every edge.
pub fn validate(nodes: &[FlowNode], edges: &[FlowEdge]) -> Result<(), SaveRejection> {
	if nodes.len() <= 1 {
		return Ok(());
	}
	let dangling = empty_target_handles(edges);
	if dangling > 1 {
		return Err(SaveRejection::DanglingTargets(dangling));
	}
	if has_unconnected_node(nodes, edges) {
		return Err(SaveRejection::UnconnectedNode);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::super::types::Position;
	use super::*;

	fn node(id: &str) -> FlowNode {
		FlowNode::new(id.into(), "textnode", Position::default())
	}

	fn edge(source: &str, target: &str, target_handle: Option<&str>) -> FlowEdge {
		FlowEdge {
			source: source.into(),
			target: target.into(),
			source_handle: Some("out".into()),
			target_handle: target_handle.map(str::to_string),
		}
	}

	#[test]
	fn empty_graph_always_passes() {
		assert_eq!(validate(&[], &[]), Ok(()));
	}

	#[test]
	fn single_node_passes_regardless_of_edges() {
		let nodes = [node("a")];
		let edges = [
			edge("ghost", "phantom", None),
			edge("ghost2", "phantom2", None),
		];
		assert_eq!(validate(&nodes, &edges), Ok(()));
	}

	#[test]
	fn two_nodes_without_edges_fail_as_unconnected() {
		let nodes = [node("a"), node("b")];
		let rejection = validate(&nodes, &[]).unwrap_err();
		assert_eq!(rejection, SaveRejection::UnconnectedNode);
		assert_eq!(rejection.message(), "Cannot Save Flow");
	}

	#[test]
	fn two_connected_nodes_with_target_handle_pass() {
		let nodes = [node("a"), node("b")];
		let edges = [edge("a", "b", Some("h1"))];
		assert_eq!(validate(&nodes, &edges), Ok(()));
	}

	#[test]
	fn one_missing_target_handle_is_tolerated() {
		let nodes = [node("a"), node("b")];
		let edges = [edge("a", "b", None)];
		assert_eq!(validate(&nodes, &edges), Ok(()));
	}

	#[test]
	fn two_empty_target_handles_exceed_the_tolerance() {
		let nodes = [node("a"), node("b"), node("c")];
		let edges = [edge("a", "b", Some("")), edge("b", "c", Some(""))];
		assert_eq!(
			validate(&nodes, &edges),
			Err(SaveRejection::DanglingTargets(2))
		);
	}

	#[test]
	fn absent_and_empty_target_handles_count_the_same() {
		let edges = [edge("a", "b", None), edge("b", "c", Some("")), edge("c", "d", Some("in"))];
		assert_eq!(empty_target_handles(&edges), 2);
	}

	#[test]
	fn duplicate_edges_and_self_loops_count_as_connected() {
		// Permissive on purpose: any edge touching a node connects it, even
		// a self-loop or a duplicate.
		let nodes = [node("a"), node("b")];
		let edges = [edge("a", "a", Some("in")), edge("b", "b", Some("in"))];
		assert_eq!(validate(&nodes, &edges), Ok(()));
	}

	#[test]
	fn unconnected_third_node_fails_even_with_handles() {
		let nodes = [node("a"), node("b"), node("c")];
		let edges = [edge("a", "b", Some("in"))];
		assert_eq!(
			validate(&nodes, &edges),
			Err(SaveRejection::UnconnectedNode)
		);
	}
}
