use leptos::prelude::*;

use crate::components::flow_editor::{
	Editor, EditorEvent, FlowCanvas, FlowNode, LocalStorage, Position, SaveOutcome,
};
use crate::components::side_panel::SidePanel;
use crate::components::top_bar::TopBar;

/// The flow a fresh browser starts from: a single message node.
fn seed_nodes() -> Vec<FlowNode> {
	let mut node = FlowNode::new("1".into(), "textnode", Position { x: 250.0, y: 5.0 });
	node.data.label = "Text Node".to_string();
	vec![node]
}

/// Editor page: canvas, palette / label editor, save bar. Owns the editor
/// core and fans its state out to the three shell components.
#[component]
pub fn Home() -> impl IntoView {
	let (editor, restored_viewport) = Editor::new(LocalStorage, seed_nodes());
	let editor = RwSignal::new(editor);
	let viewport = RwSignal::new(restored_viewport);
	let ready = RwSignal::new(false);
	let outcome = RwSignal::new(None::<SaveOutcome>);

	let nodes = Memo::new(move |_| editor.with(|e| e.nodes().to_vec()));
	let edges = Memo::new(move |_| editor.with(|e| e.edges().to_vec()));
	let selected = Memo::new(move |_| editor.with(|e| e.selected_node().map(|n| n.id.clone())));
	let label = Memo::new(move |_| editor.with(|e| e.label_buffer().to_string()));

	let on_event = Callback::new(move |event: EditorEvent| {
		let result = editor.try_update(|e| e.apply(event)).flatten();
		if let Some(result) = result {
			outcome.set(Some(result));
		}
	});
	let on_save = Callback::new(move |_: ()| {
		// The canvas has not handed us a viewport yet: ignore the click.
		if !ready.get_untracked() {
			return;
		}
		on_event.run(EditorEvent::SaveRequested {
			viewport: viewport.get_untracked(),
		});
	});
	let on_label_change =
		Callback::new(move |value: String| on_event.run(EditorEvent::LabelChanged(value)));
	let on_deselect = Callback::new(move |_: ()| on_event.run(EditorEvent::PaneClicked));

	view! {
		<div class="app-shell">
			<TopBar outcome=outcome on_save=on_save />
			<div class="editor-row">
				<div class="canvas-pane">
					<FlowCanvas
						nodes=nodes
						edges=edges
						viewport=viewport
						ready=ready
						on_event=on_event
					/>
				</div>
				<SidePanel
					selected=selected
					label=label
					on_label_change=on_label_change
					on_deselect=on_deselect
				/>
			</div>
		</div>
	}
}
