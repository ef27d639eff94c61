use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use engage_core::model::{Comment, CommentDraft, CommentId, ContentRef, Page, ToastLevel};

use crate::api::{ApiClient, ErrorReport, endpoints};
use crate::error::EngagementError;
use crate::notify::Notifier;

pub const EMPTY_COMMENT_MESSAGE: &str = "Please enter a comment";
pub const COMMENT_POSTED_MESSAGE: &str = "Comment posted";
pub const REPLYING_MESSAGE: &str = "Replying to comment...";

/// Posts and lists comments on stories and modules.
#[derive(Clone)]
pub struct CommentService {
    api: ApiClient,
}

impl CommentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Post a comment, then try to fetch the first page again.
    ///
    /// Once the post is accepted the call succeeds. The refreshed page is
    /// `None` when the listing could not be fetched; that failure is only
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns `EngagementError::Comment` for an empty draft (no request is
    /// sent) or `EngagementError::Request` when the post itself fails.
    pub async fn post(
        &self,
        content: ContentRef,
        draft: &CommentDraft,
    ) -> Result<Option<Page<Comment>>, EngagementError> {
        let comment = match draft.validate() {
            Ok(comment) => comment,
            Err(err) => {
                self.api.notify(ToastLevel::Warning, EMPTY_COMMENT_MESSAGE);
                return Err(err.into());
            }
        };

        self.api
            .post_json::<_, Value>(&endpoints::post_comment(content), &comment, ErrorReport::Notify)
            .await?;
        info!(?content, reply = comment.parent_id.is_some(), "comment posted");
        self.api.notify(ToastLevel::Success, COMMENT_POSTED_MESSAGE);

        Ok(self.fetch(content, 1, ErrorReport::Silent).await.ok())
    }

    /// # Errors
    ///
    /// Returns `EngagementError::Request` when the listing cannot be fetched.
    pub async fn list(
        &self,
        content: ContentRef,
        page: u32,
    ) -> Result<Page<Comment>, EngagementError> {
        self.fetch(content, page, ErrorReport::Notify).await
    }

    async fn fetch(
        &self,
        content: ContentRef,
        page: u32,
        report: ErrorReport,
    ) -> Result<Page<Comment>, EngagementError> {
        let page = self
            .api
            .get_json(&endpoints::comments(content, page.max(1)), report)
            .await
            .inspect_err(|err| warn!(?content, error = %err, "comment listing failed"))?;
        Ok(page)
    }
}

/// Comment form state.
pub struct CommentComposer {
    draft: CommentDraft,
    notifier: Arc<dyn Notifier>,
}

impl CommentComposer {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            draft: CommentDraft::new(""),
            notifier,
        }
    }

    #[must_use]
    pub fn draft(&self) -> &CommentDraft {
        &self.draft
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    /// Direct the next post at `comment_id`.
    pub fn reply_to(&mut self, comment_id: CommentId) {
        self.draft.parent_id = Some(comment_id);
        self.notifier.notify(ToastLevel::Info, REPLYING_MESSAGE);
    }

    pub fn cancel_reply(&mut self) {
        self.draft.parent_id = None;
    }

    /// Reset after a successful post.
    pub fn clear(&mut self) {
        self.draft = CommentDraft::new("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ToastQueue;

    #[test]
    fn reply_sets_parent_and_notifies() {
        let toasts = ToastQueue::new();
        let mut composer = CommentComposer::new(Arc::new(toasts.clone()));
        composer.set_content("Lovely");
        composer.reply_to(CommentId::new(8));

        assert_eq!(composer.draft().parent_id, Some(CommentId::new(8)));
        assert_eq!(
            toasts.messages(),
            vec![(ToastLevel::Info, REPLYING_MESSAGE.to_string())]
        );

        composer.clear();
        assert_eq!(composer.draft().parent_id, None);
        assert!(composer.draft().content.is_empty());
    }
}
