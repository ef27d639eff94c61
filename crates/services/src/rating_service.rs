use tracing::info;

use engage_core::model::{ContentRef, MessageReply, RatingRequest, RatingScore, ToastLevel};

use crate::api::{ApiClient, ErrorReport, endpoints};
use crate::error::EngagementError;

pub const INVALID_RATING_MESSAGE: &str = "Please choose between 1 and 5 stars";
pub const RATING_SAVED_MESSAGE: &str = "Rating saved";

#[derive(Clone)]
pub struct RatingService {
    api: ApiClient,
}

impl RatingService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Rate a story or module and show the server's confirmation.
    ///
    /// # Errors
    ///
    /// Returns `EngagementError::Rating` outside `1..=5` (nothing is sent) or
    /// `EngagementError::Request` when the backend rejects the rating.
    pub async fn rate(&self, content: ContentRef, score: i64) -> Result<RatingScore, EngagementError> {
        let score = match RatingScore::new(score) {
            Ok(score) => score,
            Err(err) => {
                self.api.notify(ToastLevel::Warning, INVALID_RATING_MESSAGE);
                return Err(err.into());
            }
        };

        let reply: Option<MessageReply> = self
            .api
            .post_json(&endpoints::rate(content), &RatingRequest { score }, ErrorReport::Notify)
            .await?;
        info!(?content, score = score.value(), "rating saved");

        let message = reply
            .and_then(|reply| reply.message)
            .unwrap_or_else(|| RATING_SAVED_MESSAGE.to_string());
        self.api.notify(ToastLevel::Success, &message);
        Ok(score)
    }
}
