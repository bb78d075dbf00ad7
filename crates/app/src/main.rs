//! Browser entry point.

#[cfg(target_arch = "wasm32")]
fn main() {
    use protocolos_app::App;

    console_error_panic_hook::set_once();
    leptos::mount_to_body(|| leptos::view! { <App/> });
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    tracing_subscriber::fmt::init();
    tracing::error!("protocolos-app targets wasm32; build it with trunk");
    std::process::exit(1);
}
