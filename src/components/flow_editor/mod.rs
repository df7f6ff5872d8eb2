mod component;
mod editor;
mod graph;
mod id;
mod render;
mod state;
mod storage;
mod types;
mod validate;

pub use component::{FlowCanvas, TEMPLATE_MIME};
pub use editor::{Editor, EditorEvent, Selection};
pub use storage::{FLOW_KEY, KeyValueStore, LocalStorage, SnapshotGateway};
pub use types::{
	ConnectParams, FlowEdge, FlowNode, FlowSnapshot, NodeData, Position, SaveOutcome, SaveStatus,
	Viewport,
};
pub use validate::{SaveRejection, validate};
