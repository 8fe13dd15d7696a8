use leptos::prelude::*;

use crate::components::constellation::ConstellationCanvas;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="night-sky">
				<ConstellationCanvas fullscreen=true />
				<div class="sky-overlay">
					<h1>"Constellations"</h1>
					<p class="subtitle">"Star groups form, glow and fade on their own schedule."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
