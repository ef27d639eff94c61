use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{CommentId, ModuleId, StoryId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommentError {
    #[error("comment content cannot be empty")]
    Empty,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RatingError {
    #[error("rating must be between {min} and {max}, got {provided}", min = RatingScore::MIN, max = RatingScore::MAX)]
    OutOfRange { provided: i64 },
}

//
// ─── CONTENT REFERENCES ────────────────────────────────────────────────────────
//

/// The piece of content a comment or rating is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentRef {
    Story(StoryId),
    Module(ModuleId),
}

impl ContentRef {
    /// Site path segment for the content's own pages (`/stories/..`, `/learning/..`).
    #[must_use]
    pub fn page_prefix(&self) -> String {
        match self {
            ContentRef::Story(id) => format!("/stories/{id}"),
            ContentRef::Module(id) => format!("/learning/{id}"),
        }
    }

    /// JSON API path segment (`/api/stories/..`, `/api/modules/..`).
    #[must_use]
    pub fn api_prefix(&self) -> String {
        match self {
            ContentRef::Story(id) => format!("/api/stories/{id}"),
            ContentRef::Module(id) => format!("/api/modules/{id}"),
        }
    }
}

//
// ─── COMMENTS ──────────────────────────────────────────────────────────────────
//

/// A comment as typed into the form, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentDraft {
    pub content: String,
    pub parent_id: Option<CommentId>,
}

impl CommentDraft {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_id: None,
        }
    }

    #[must_use]
    pub fn replying_to(mut self, parent_id: CommentId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Trim and validate the draft.
    ///
    /// # Errors
    ///
    /// Returns `CommentError::Empty` for blank content.
    pub fn validate(&self) -> Result<NewComment, CommentError> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(CommentError::Empty);
        }
        Ok(NewComment {
            content: content.to_string(),
            parent_id: self.parent_id,
        })
    }
}

/// Validated comment body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommentAuthor {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
}

impl CommentAuthor {
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub reply_count: u32,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default, deserialize_with = "crate::time::deserialize_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<CommentAuthor>,
    #[serde(default)]
    pub parent_id: Option<CommentId>,
}

//
// ─── RATINGS ───────────────────────────────────────────────────────────────────
//

/// Star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RatingScore(u8);

impl RatingScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, RatingError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(RatingError::OutOfRange { provided: value })
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Body of a rating request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingRequest {
    pub score: RatingScore,
}

/// Star widget state: the committed rating plus a transient hover value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StarRating {
    current: u8,
    hover: Option<u8>,
}

impl StarRating {
    #[must_use]
    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn hover(&mut self, stars: u8) {
        self.hover = Some(stars.min(RatingScore::MAX));
    }

    pub fn leave(&mut self) {
        self.hover = None;
    }

    pub fn commit(&mut self, score: RatingScore) {
        self.current = score.value();
        self.hover = None;
    }

    /// Number of stars drawn as active.
    #[must_use]
    pub fn highlighted(&self) -> u8 {
        self.hover.unwrap_or(self.current)
    }

    #[must_use]
    pub fn is_active(&self, star: u8) -> bool {
        star <= self.highlighted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_comment_is_rejected() {
        assert_eq!(CommentDraft::new("   \n").validate(), Err(CommentError::Empty));
    }

    #[test]
    fn comment_is_trimmed_and_keeps_parent() {
        let comment = CommentDraft::new("  nice puppets ")
            .replying_to(CommentId::new(9))
            .validate()
            .unwrap();
        assert_eq!(comment.content, "nice puppets");
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "content": "nice puppets", "parent_id": 9 })
        );
    }

    #[test]
    fn top_level_comment_omits_parent() {
        let comment = CommentDraft::new("hello").validate().unwrap();
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json, serde_json::json!({ "content": "hello" }));
    }

    #[test]
    fn rating_bounds() {
        assert!(RatingScore::new(0).is_err());
        assert!(RatingScore::new(6).is_err());
        assert!(RatingScore::new(-3).is_err());
        assert_eq!(RatingScore::new(5).unwrap().value(), 5);
    }

    #[test]
    fn star_rating_hover_overrides_until_leave() {
        let mut stars = StarRating::default();
        stars.commit(RatingScore::new(2).unwrap());
        stars.hover(4);
        assert!(stars.is_active(4));
        stars.leave();
        assert!(!stars.is_active(3));
        assert_eq!(stars.highlighted(), 2);
    }

    #[test]
    fn content_paths() {
        let story = ContentRef::Story(StoryId::new(3));
        let module = ContentRef::Module(ModuleId::new(4));
        assert_eq!(story.page_prefix(), "/stories/3");
        assert_eq!(module.page_prefix(), "/learning/4");
        assert_eq!(module.api_prefix(), "/api/modules/4");
    }

    #[test]
    fn comment_parses_backend_record() {
        let raw = r#"{
            "id": 12,
            "content": "Great",
            "like_count": 3,
            "dislike_count": 0,
            "is_pinned": false,
            "reply_count": 1,
            "created_at": "2024-03-01T10:00:00.250000",
            "updated_at": null,
            "author": {"id": 1, "username": "li", "nickname": "", "avatar": null, "level": 2}
        }"#;
        let comment: Comment = serde_json::from_str(raw).unwrap();
        assert_eq!(comment.id, CommentId::new(12));
        assert!(comment.created_at.is_some());
        assert_eq!(comment.author.unwrap().display_name(), "li");
    }
}
