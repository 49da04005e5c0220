use crate::model::VideoId;

/// Completion state of the learning-hub playlist for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearningProgress {
    completed_video_ids: Vec<VideoId>,
    completed_count: u32,
    total_count: u32,
}

impl LearningProgress {
    #[must_use]
    pub fn new(completed_video_ids: Vec<VideoId>, completed_count: u32, total_count: u32) -> Self {
        Self {
            completed_video_ids,
            completed_count,
            total_count,
        }
    }

    #[must_use]
    pub fn completed_count(&self) -> u32 {
        self.completed_count
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    #[must_use]
    pub fn completed_video_ids(&self) -> &[VideoId] {
        &self.completed_video_ids
    }

    #[must_use]
    pub fn is_completed(&self, video_id: &VideoId) -> bool {
        self.completed_video_ids.contains(video_id)
    }

    /// Whole-number completion percentage, rounded half up and capped at 100.
    ///
    /// An empty playlist is 0% complete.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total_count == 0 {
            return 0;
        }
        let completed = u64::from(self.completed_count);
        let total = u64::from(self.total_count);
        let rounded = (completed * 100 + total / 2) / total;
        u32::try_from(rounded.min(100)).unwrap_or(100)
    }
}
