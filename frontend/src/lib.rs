use leptos::*;

pub mod api;
mod components;
pub mod config;
mod pages;
mod router;
mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

use components::layout::ConfigErrorScreen;

fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
}

/// Browser entry point: resolves the backend settings, then mounts either the
/// admin app or a configuration error screen.
pub fn boot() {
    console_error_panic_hook::set_once();
    init_logging();
    log::info!("Starting Folio admin frontend");

    spawn_local(async move {
        match config::load().await {
            Ok(backend) => {
                let client = api::ApiClient::new(backend);
                #[cfg(target_arch = "wasm32")]
                client.watch_storage_events();
                router::mount_app(client);
            }
            Err(err) => {
                log::error!("{}", err);
                let message = err.to_string();
                mount_to_body(move || view! { <ConfigErrorScreen message=message /> });
            }
        }
    });
}
