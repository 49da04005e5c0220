use asl_core::model::{LearningProgress, PlaylistVideo, VideoId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub video_id: String,
    pub title: String,
    pub completed: bool,
    pub toggle_label: &'static str,
}

impl LessonVm {
    fn new(video_id: &VideoId, title: &str, completed: bool) -> Self {
        Self {
            video_id: video_id.as_str().to_string(),
            title: title.to_string(),
            completed,
            toggle_label: if completed {
                "Mark as not done"
            } else {
                "Mark as done"
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub percentage: u32,
    pub percentage_label: String,
    pub completed_label: String,
    pub total_label: String,
    pub lessons: Vec<LessonVm>,
}

/// Summary plus one row per playlist lesson.
///
/// Completed ids the playlist no longer lists are appended so they can still be unmarked.
#[must_use]
pub fn map_progress(progress: &LearningProgress, playlist: &[PlaylistVideo]) -> ProgressVm {
    let percentage = progress.percentage();
    let mut lessons: Vec<LessonVm> = playlist
        .iter()
        .map(|video| {
            LessonVm::new(
                &video.id,
                video.display_title(),
                progress.is_completed(&video.id),
            )
        })
        .collect();
    for video_id in progress.completed_video_ids() {
        if !playlist.iter().any(|video| &video.id == video_id) {
            lessons.push(LessonVm::new(video_id, video_id.as_str(), true));
        }
    }

    ProgressVm {
        percentage,
        percentage_label: format!("{percentage}%"),
        completed_label: format!("{} Completed", progress.completed_count()),
        total_label: format!("{} Lessons", progress.total_count()),
        lessons,
    }
}
