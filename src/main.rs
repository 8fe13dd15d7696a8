//! Binary entry point: mount the app to the document body.

use constellation_canvas::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
