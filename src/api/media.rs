use std::sync::Arc;

use poem_openapi::payload::Json;
use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object, OpenApi};

use crate::AppState;
use crate::auth::{SessionAuth, require_staff};
use crate::error;

pub struct MediaApi {
    state: Arc<AppState>,
}

impl MediaApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[derive(Debug, Multipart)]
pub struct UploadPayload {
    pub file: Upload,
}

#[derive(Object)]
pub struct UploadResponse {
    /// Public URL under the media prefix.
    pub url: String,
}

#[OpenApi]
impl MediaApi {
    /// Cover image / rich-text attachment upload into the media root.
    /// Staff only.
    #[oai(path = "/upload/", method = "post")]
    async fn upload(
        &self,
        auth: SessionAuth,
        payload: UploadPayload,
    ) -> poem::Result<Json<UploadResponse>> {
        require_staff(&auth.0)?;

        let name = sanitize_file_name(payload.file.file_name());
        let data = payload.file.into_vec().await.map_err(error::internal)?;

        let dir = self.state.config.media_root.join("uploads");
        tokio::fs::create_dir_all(&dir).await.map_err(error::internal)?;
        let stamped = format!("{}-{}", chrono::Utc::now().timestamp_millis(), name);
        tokio::fs::write(dir.join(&stamped), data)
            .await
            .map_err(error::internal)?;

        tracing::info!(file = %stamped, "media uploaded");
        Ok(Json(UploadResponse {
            url: format!("/media/uploads/{stamped}"),
        }))
    }
}

fn sanitize_file_name(name: Option<&str>) -> String {
    let name = name.unwrap_or("upload.bin");
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sanitize_file_name;

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(sanitize_file_name(Some("a photo.png")), "a-photo.png");
        assert_eq!(sanitize_file_name(Some("../../etc/passwd")), "..-..-etc-passwd");
        assert_eq!(sanitize_file_name(None), "upload.bin");
    }
}
