use std::time::Duration;

use leptos::leptos_dom::helpers::{TimeoutHandle, set_timeout_with_handle};
use leptos::prelude::*;

use super::flow_editor::{SaveOutcome, SaveStatus};

const BANNER_CLEAR: Duration = Duration::from_millis(2000);

/// Top bar: the Save action and the transient status banner for the last
/// save outcome.
#[component]
pub fn TopBar(
	#[prop(into)] outcome: Signal<Option<SaveOutcome>>,
	#[prop(into)] on_save: Callback<()>,
) -> impl IntoView {
	let banner = RwSignal::new(None::<SaveOutcome>);
	let pending_clear = StoredValue::new_local(None::<TimeoutHandle>);

	// Each outcome replaces the banner and restarts the clear timer; the
	// previous timer is cancelled so a stale clear cannot erase a newer
	// message.
	Effect::new(move |_| {
		let Some(result) = outcome.get() else {
			return;
		};
		banner.set(Some(result));
		if let Some(handle) = pending_clear.get_value() {
			handle.clear();
		}
		let handle =
			set_timeout_with_handle(move || banner.set(None), BANNER_CLEAR).ok();
		pending_clear.set_value(handle);
	});
	on_cleanup(move || {
		if let Some(handle) = pending_clear.get_value() {
			handle.clear();
		}
	});

	view! {
		<header class="top-bar">
			<div></div>
			<div class="banner-slot">
				{move || {
					banner
						.get()
						.map(|result| {
							let class = match result.status {
								SaveStatus::Success => "banner banner-success",
								SaveStatus::Error => "banner banner-error",
							};
							view! { <div class=class>{result.message}</div> }
						})
				}}
			</div>
			<button class="save-button" on:click=move |_| on_save.run(())>
				"Save Changes"
			</button>
		</header>
	}
}
