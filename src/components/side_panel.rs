use leptos::prelude::*;
use web_sys::DragEvent;

use super::flow_editor::TEMPLATE_MIME;

/// Right-hand panel: node palette when nothing is selected, label editor
/// for the selected node otherwise. Every keystroke in the editor emits the
/// full new value.
#[component]
pub fn SidePanel(
	#[prop(into)] selected: Signal<Option<String>>,
	#[prop(into)] label: Signal<String>,
	#[prop(into)] on_label_change: Callback<String>,
	#[prop(into)] on_deselect: Callback<()>,
) -> impl IntoView {
	let on_drag_start = move |ev: DragEvent| {
		if let Some(dt) = ev.data_transfer() {
			let _ = dt.set_data(TEMPLATE_MIME, "textnode");
			dt.set_effect_allowed("move");
		}
	};

	view! {
		<aside class="side-panel">
			{move || {
				if selected.get().is_some() {
					view! {
						<div class="label-editor">
							<h3>"Message"</h3>
							<div class="label-editor-row">
								<button class="back-button" on:click=move |_| on_deselect.run(())>
									"\u{2190}"
								</button>
								<label>"Text"</label>
							</div>
							<input
								type="text"
								prop:value=move || label.get()
								on:input=move |ev| on_label_change.run(event_target_value(&ev))
							/>
						</div>
					}
						.into_any()
				} else {
					view! {
						<div class="palette-entry" draggable="true" on:dragstart=on_drag_start>
							<p>"\u{1f4ac}"</p>
							<p>"Message"</p>
						</div>
					}
						.into_any()
				}
			}}
		</aside>
	}
}
