use asl_core::model::{Credential, LearningProgress, PlaylistVideo, VideoId};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpApi, check_status};

const PROGRESS_PATH: &str = "/api/progress";
const PLAYLIST_PATH: &str = "/api/playlist";

/// Learning-hub completion tracking.
#[derive(Clone, Debug)]
pub struct ProgressService {
    api: HttpApi,
}

impl ProgressService {
    #[must_use]
    pub fn new(api: HttpApi) -> Self {
        Self { api }
    }

    /// Load the signed-in user's lesson completion.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails or the credential is refused.
    pub async fn load(&self, credential: &Credential) -> Result<LearningProgress, ApiError> {
        log::debug!("GET {PROGRESS_PATH}");
        let response = self.api.get(PROGRESS_PATH, credential)?.send().await?;
        let payload: ProgressPayload = check_status(response).await?.json().await?;
        Ok(payload.into_progress())
    }

    /// List the lessons of the learning-hub playlist, in playlist order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails or the credential is refused. The backend
    /// answers 500 when it cannot reach the playlist provider.
    pub async fn playlist(&self, credential: &Credential) -> Result<Vec<PlaylistVideo>, ApiError> {
        log::debug!("GET {PLAYLIST_PATH}");
        let response = self.api.get(PLAYLIST_PATH, credential)?.send().await?;
        let payload: Vec<PlaylistEntry> = check_status(response).await?.json().await?;
        Ok(payload.into_iter().map(PlaylistEntry::into_video).collect())
    }

    /// Flip a lesson between complete and not complete.
    ///
    /// Returns the backend's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails or the credential is refused.
    pub async fn toggle_completed(
        &self,
        credential: &Credential,
        video_id: &VideoId,
    ) -> Result<String, ApiError> {
        log::debug!("POST {PROGRESS_PATH} for {video_id:?}");
        let body = ToggleRequest {
            video_id: video_id.as_str(),
        };
        let response = self
            .api
            .post(PROGRESS_PATH, Some(credential))?
            .json(&body)
            .send()
            .await?;
        let payload: ToggleResponse = check_status(response).await?.json().await?;
        Ok(payload.message)
    }
}

#[derive(Debug, Deserialize)]
struct ProgressPayload {
    #[serde(default)]
    completed_video_ids: Vec<String>,
    #[serde(default)]
    completed_count: Option<u32>,
    #[serde(default)]
    total_count: u32,
}

impl ProgressPayload {
    fn into_progress(self) -> LearningProgress {
        let fallback = u32::try_from(self.completed_video_ids.len()).unwrap_or(u32::MAX);
        let completed_count = self.completed_count.unwrap_or(fallback);
        let ids = self
            .completed_video_ids
            .into_iter()
            .map(VideoId::new)
            .collect();
        LearningProgress::new(ids, completed_count, self.total_count)
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistEntry {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default, rename = "youtubeId")]
    youtube_id: String,
}

impl PlaylistEntry {
    fn into_video(self) -> PlaylistVideo {
        PlaylistVideo {
            id: VideoId::new(self.id),
            title: self.title,
            youtube_id: self.youtube_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct ToggleRequest<'a> {
    #[serde(rename = "videoId")]
    video_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ToggleResponse {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_progress_payload() {
        let payload: ProgressPayload = serde_json::from_str(
            r#"{"completed_video_ids":["a","b"],"completed_count":2,"total_count":8}"#,
        )
        .unwrap();
        let progress = payload.into_progress();

        assert_eq!(progress.completed_count(), 2);
        assert_eq!(progress.total_count(), 8);
        assert_eq!(progress.percentage(), 25);
        assert!(progress.is_completed(&VideoId::new("b")));
    }

    #[test]
    fn missing_count_falls_back_to_id_list() {
        let payload: ProgressPayload =
            serde_json::from_str(r#"{"completed_video_ids":["a"],"total_count":4}"#).unwrap();
        assert_eq!(payload.into_progress().completed_count(), 1);
    }

    #[test]
    fn decodes_playlist_entries_in_order() {
        let payload: Vec<PlaylistEntry> = serde_json::from_str(
            r#"[{"id":"v2","title":"Numbers","youtubeId":"yt2"},{"id":"v1","title":"Alphabet","youtubeId":"yt1"}]"#,
        )
        .unwrap();
        let videos: Vec<PlaylistVideo> =
            payload.into_iter().map(PlaylistEntry::into_video).collect();

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].id, VideoId::new("v2"));
        assert_eq!(videos[0].youtube_id, "yt2");
        assert_eq!(videos[1].title, "Alphabet");
    }

    #[test]
    fn toggle_body_uses_camel_case_key() {
        let body = ToggleRequest { video_id: "abc" };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "videoId": "abc" })
        );
    }
}
