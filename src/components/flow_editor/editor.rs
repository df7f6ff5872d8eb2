use log::{info, warn};

use super::graph::FlowGraph;
use super::storage::{KeyValueStore, SnapshotGateway};
use super::types::{ConnectParams, FlowEdge, FlowNode, FlowSnapshot, Position, SaveOutcome, Viewport};
use super::validate::validate;

/// One gesture reported by the shell: canvas, side panel, or top bar. The
/// whole inbound surface of the editor is this closed set.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
	NodeClicked(String),
	PaneClicked,
	NodeDropped { template: String, position: Position },
	EdgeConnected(ConnectParams),
	LabelChanged(String),
	NodeMoved { id: String, position: Position },
	SaveRequested { viewport: Viewport },
}

/// Selection is a single tagged state, never two independently-mutated
/// flags; the at-most-one-selected invariant is enforced here alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	Idle,
	Editing(String),
}

/// The graph-editing state machine: graph model, selection and label
/// buffer, persistence gateway. Every mutation enters through [`apply`],
/// synchronously, within the gesture turn that produced it.
///
/// [`apply`]: Editor::apply
#[derive(Clone, Debug)]
pub struct Editor<S> {
	graph: FlowGraph,
	selection: Selection,
	label_buffer: String,
	gateway: SnapshotGateway<S>,
}

impl<S: KeyValueStore> Editor<S> {
	/// Build an editor from the store's last snapshot, falling back to
	/// `seed` nodes when nothing (readable) was saved. Returns the viewport
	/// the canvas should start from.
	pub fn new(store: S, seed: Vec<FlowNode>) -> (Self, Viewport) {
		let gateway = SnapshotGateway::new(store);
		let (graph, viewport) = match gateway.load() {
			Some(snapshot) => {
				info!(
					"restored flow: {} nodes, {} edges",
					snapshot.nodes.len(),
					snapshot.edges.len()
				);
				let mut nodes = snapshot.nodes;
				// Selection does not survive a reload.
				for node in &mut nodes {
					node.selected = false;
				}
				(FlowGraph::from_parts(nodes, snapshot.edges), snapshot.viewport)
			}
			None => (FlowGraph::from_parts(seed, Vec::new()), Viewport::default()),
		};
		let editor = Self {
			graph,
			selection: Selection::Idle,
			label_buffer: String::new(),
			gateway,
		};
		(editor, viewport)
	}

	pub fn nodes(&self) -> &[FlowNode] {
		self.graph.nodes()
	}

	pub fn edges(&self) -> &[FlowEdge] {
		self.graph.edges()
	}

	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	pub fn selected_node(&self) -> Option<&FlowNode> {
		match &self.selection {
			Selection::Editing(id) => self.graph.node(id),
			Selection::Idle => None,
		}
	}

	/// The side panel's editable label value. Equals the selected node's
	/// label whenever a selection exists.
	pub fn label_buffer(&self) -> &str {
		&self.label_buffer
	}

	/// The single transition function. Returns an outcome only for
	/// `SaveRequested`; every other event mutates silently.
	pub fn apply(&mut self, event: EditorEvent) -> Option<SaveOutcome> {
		match event {
			EditorEvent::NodeClicked(id) => {
				self.select(id);
				None
			}
			EditorEvent::PaneClicked => {
				self.deselect();
				None
			}
			EditorEvent::NodeDropped { template, position } => {
				self.graph.spawn_node(&template, position);
				None
			}
			EditorEvent::EdgeConnected(params) => {
				self.graph.connect(params);
				None
			}
			EditorEvent::LabelChanged(value) => {
				self.sync_label(value);
				None
			}
			EditorEvent::NodeMoved { id, position } => {
				self.graph.move_node(&id, position);
				None
			}
			EditorEvent::SaveRequested { viewport } => Some(self.save(viewport)),
		}
	}

	fn select(&mut self, id: String) {
		// A click naming an id we do not know is ignored, not a crash.
		let Some(node) = self.graph.node(&id) else {
			return;
		};
		self.label_buffer = node.data.label.clone();
		self.graph.select_only(&id);
		self.selection = Selection::Editing(id);
	}

	fn deselect(&mut self) {
		self.graph.clear_selection();
		self.selection = Selection::Idle;
		self.label_buffer.clear();
	}

	fn sync_label(&mut self, value: String) {
		match self.selection.clone() {
			Selection::Editing(id) => {
				self.graph.set_label(&id, &value);
				self.label_buffer = value;
			}
			// No selection: the buffer has nothing to mirror.
			Selection::Idle => self.label_buffer.clear(),
		}
	}

	fn save(&mut self, viewport: Viewport) -> SaveOutcome {
		if let Err(rejection) = validate(self.graph.nodes(), self.graph.edges()) {
			warn!("save rejected: {rejection:?}");
			return SaveOutcome::error(rejection.message());
		}
		let snapshot = FlowSnapshot {
			nodes: self.graph.nodes().to_vec(),
			edges: self.graph.edges().to_vec(),
			viewport,
		};
		self.gateway.save(&snapshot)
	}

	#[cfg(test)]
	pub(crate) fn gateway(&self) -> &SnapshotGateway<S> {
		&self.gateway
	}
}
