use serde::{de::DeserializeOwned, Serialize};

#[cfg(target_arch = "wasm32")]
use web_sys::{Storage, Window};

#[cfg(target_arch = "wasm32")]
pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

#[cfg(target_arch = "wasm32")]
pub fn local_storage() -> Result<Storage, String> {
    window()?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = local_storage().ok()?.get_item(key).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("discarding unreadable {}: {}", key, err);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(|e| e.to_string())
        .and_then(|raw| {
            local_storage()?
                .set_item(key, &raw)
                .map_err(|_| "setItem failed".to_string())
        });
    if let Err(err) = result {
        log::warn!("failed to persist {}: {}", key, err);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn remove(key: &str) {
    if let Ok(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

// Off the browser there is nowhere to persist to; sessions live in memory only.

#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, _value: &T) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove(_key: &str) {}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn json_round_trips_through_local_storage() {
        let key = "folio-storage-test";
        save_json(key, &vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            load_json::<Vec<String>>(key),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        remove(key);
        assert_eq!(load_json::<Vec<String>>(key), None);
    }
}
