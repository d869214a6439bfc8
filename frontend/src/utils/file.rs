use crate::api::{ApiError, ImageUpload};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

pub fn content_type_or_default(raw: String) -> String {
    if raw.trim().is_empty() {
        FALLBACK_CONTENT_TYPE.to_string()
    } else {
        raw
    }
}

/// Reads a file picked in an `<input type="file">` into memory.
#[cfg(target_arch = "wasm32")]
pub async fn read_image_upload(file: &web_sys::File) -> Result<ImageUpload, ApiError> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| ApiError::unknown(format!("Failed to read {}", file.name())))?;
    Ok(ImageUpload {
        file_name: file.name(),
        content_type: content_type_or_default(file.type_()),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn read_image_upload(_file: &web_sys::File) -> Result<ImageUpload, ApiError> {
    Err(ApiError::unknown("File uploads need a browser"))
}
