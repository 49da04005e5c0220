use crate::model::VideoId;

/// One lesson in the learning-hub playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistVideo {
    pub id: VideoId,
    pub title: String,
    pub youtube_id: String,
}

impl PlaylistVideo {
    /// Title to list the lesson under; untitled lessons fall back to their id.
    #[must_use]
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() {
            self.id.as_str()
        } else {
            title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_falls_back_to_id() {
        let video = PlaylistVideo {
            id: VideoId::new("v1"),
            title: "  ".into(),
            youtube_id: "yt1".into(),
        };
        assert_eq!(video.display_title(), "v1");

        let titled = PlaylistVideo {
            title: " Alphabet ".into(),
            ..video
        };
        assert_eq!(titled.display_title(), "Alphabet");
    }
}
