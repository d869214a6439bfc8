use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{header::CONTENT_TYPE, Method};
use serde::Deserialize;

use super::{
    client::ApiClient,
    types::{ApiError, StoredObject},
};

pub const PROJECT_IMAGES_BUCKET: &str = "project_images";

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: String,
}

fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

impl ApiClient {
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<StoredObject, ApiError> {
        let url = self.endpoint(&format!(
            "/storage/v1/object/{}/{}",
            bucket,
            encode_object_path(path)
        ));
        let builder = self
            .request(Method::POST, &url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes);
        let response = Self::send(builder).await?;
        let uploaded: UploadResponse = Self::decode(response).await?;
        log::debug!("uploaded {}", uploaded.key);
        Ok(StoredObject {
            path: path.to_string(),
            full_path: uploaded.key,
        })
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.endpoint(&format!(
            "/storage/v1/object/public/{}/{}",
            bucket,
            encode_object_path(path)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_each_segment_but_keeps_separators() {
        assert_eq!(
            encode_object_path("public/my shot.png_1700000000000"),
            "public/my%20shot.png_1700000000000"
        );
        assert_eq!(encode_object_path("public/a#b?.jpg"), "public/a%23b%3F.jpg");
    }

    #[test]
    fn public_url_points_at_public_bucket() {
        let client = ApiClient::new_with_base_url("https://abc.supabase.co/");
        assert_eq!(
            client.public_url(PROJECT_IMAGES_BUCKET, "public/logo.png_1"),
            "https://abc.supabase.co/storage/v1/object/public/project_images/public/logo.png_1"
        );
    }
}
