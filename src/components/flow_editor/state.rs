use super::types::{FlowNode, Position, Viewport};

pub const NODE_WIDTH: f64 = 150.0;
pub const NODE_HEIGHT: f64 = 40.0;
pub const HANDLE_RADIUS: f64 = 5.0;
pub const HANDLE_HIT_RADIUS: f64 = 10.0;

pub const SOURCE_HANDLE: &str = "out";
pub const TARGET_HANDLE: &str = "in";

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	pub fn from_viewport(viewport: &Viewport) -> Self {
		Self {
			x: viewport.x,
			y: viewport.y,
			k: viewport.zoom,
		}
	}

	pub fn viewport(&self) -> Viewport {
		Viewport {
			x: self.x,
			y: self.y,
			zoom: self.k,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_id: Option<String>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// An in-flight connect gesture: anchored at a node's source handle, rubber
/// band following the cursor in graph space.
#[derive(Clone, Debug, Default)]
pub struct ConnectState {
	pub active: bool,
	pub source: Option<String>,
	pub cursor_x: f64,
	pub cursor_y: f64,
}

/// View-side canvas state: pan/zoom transform plus the gesture currently in
/// progress. The graph model itself lives with the editor; this struct only
/// ever reads it for hit-testing.
pub struct CanvasState {
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub connect: ConnectState,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	pub fn new(viewport: &Viewport, width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform::from_viewport(viewport),
			drag: DragState::default(),
			pan: PanState::default(),
			connect: ConnectState::default(),
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node whose body contains the screen point. Later nodes draw
	/// on top, so scan from the back.
	pub fn node_at_position<'a>(
		&self,
		nodes: &'a [FlowNode],
		sx: f64,
		sy: f64,
	) -> Option<&'a FlowNode> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		nodes.iter().rev().find(|node| {
			let Position { x, y } = node.position;
			gx >= x && gx <= x + NODE_WIDTH && gy >= y && gy <= y + NODE_HEIGHT
		})
	}

	pub fn source_handle_at<'a>(
		&self,
		nodes: &'a [FlowNode],
		sx: f64,
		sy: f64,
	) -> Option<&'a FlowNode> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		nodes
			.iter()
			.rev()
			.find(|node| hits_handle(source_handle_center(node), gx, gy))
	}

	pub fn target_handle_at<'a>(
		&self,
		nodes: &'a [FlowNode],
		sx: f64,
		sy: f64,
	) -> Option<&'a FlowNode> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		nodes
			.iter()
			.rev()
			.find(|node| hits_handle(target_handle_center(node), gx, gy))
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn hits_handle((hx, hy): (f64, f64), gx: f64, gy: f64) -> bool {
	let (dx, dy) = (hx - gx, hy - gy);
	(dx * dx + dy * dy).sqrt() < HANDLE_HIT_RADIUS
}

/// Outgoing connection point: center of the node's right edge.
pub fn source_handle_center(node: &FlowNode) -> (f64, f64) {
	(
		node.position.x + NODE_WIDTH,
		node.position.y + NODE_HEIGHT / 2.0,
	)
}

/// Incoming connection point: center of the node's left edge.
pub fn target_handle_center(node: &FlowNode) -> (f64, f64) {
	(node.position.x, node.position.y + NODE_HEIGHT / 2.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str, x: f64, y: f64) -> FlowNode {
		FlowNode::new(id.into(), "textnode", Position { x, y })
	}

	fn state() -> CanvasState {
		CanvasState::new(&Viewport::default(), 800.0, 600.0)
	}

	#[test]
	fn screen_to_graph_inverts_pan_and_zoom() {
		let mut s = state();
		s.transform = ViewTransform {
			x: 100.0,
			y: 50.0,
			k: 2.0,
		};
		assert_eq!(s.screen_to_graph(100.0, 50.0), (0.0, 0.0));
		assert_eq!(s.screen_to_graph(120.0, 70.0), (10.0, 10.0));
	}

	#[test]
	fn body_hit_test_finds_the_topmost_node() {
		let s = state();
		let nodes = [node("a", 0.0, 0.0), node("b", 20.0, 10.0)];
		// Overlap region belongs to the later (topmost) node.
		assert_eq!(s.node_at_position(&nodes, 30.0, 20.0).unwrap().id, "b");
		assert_eq!(s.node_at_position(&nodes, 5.0, 5.0).unwrap().id, "a");
		assert!(s.node_at_position(&nodes, 500.0, 500.0).is_none());
	}

	#[test]
	fn handle_hit_tests_respect_their_side() {
		let s = state();
		let nodes = [node("a", 100.0, 100.0)];
		let (sx, sy) = source_handle_center(&nodes[0]);
		let (tx, ty) = target_handle_center(&nodes[0]);

		assert_eq!(s.source_handle_at(&nodes, sx, sy).unwrap().id, "a");
		assert_eq!(s.target_handle_at(&nodes, tx, ty).unwrap().id, "a");
		assert!(s.source_handle_at(&nodes, tx, ty).is_none());
		assert!(s.target_handle_at(&nodes, sx, sy).is_none());
	}

	#[test]
	fn viewport_round_trips_through_the_transform() {
		let viewport = Viewport {
			x: -40.0,
			y: 12.0,
			zoom: 0.5,
		};
		assert_eq!(ViewTransform::from_viewport(&viewport).viewport(), viewport);
	}
}
