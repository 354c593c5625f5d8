use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Kind of activity event a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    PostLiked,
    PostCommented,
    CommentLiked,
    NewFollower,
    NewMessage,
    CommentReplied,
    Mention,
    System,
    #[serde(other)]
    Unknown,
}

impl NotificationType {
    /// Types that may be folded into a grouped notification.
    pub const GROUPABLE: [NotificationType; 6] = [
        NotificationType::PostLiked,
        NotificationType::PostCommented,
        NotificationType::CommentLiked,
        NotificationType::NewFollower,
        NotificationType::NewMessage,
        NotificationType::CommentReplied,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::PostLiked => "post-liked",
            NotificationType::PostCommented => "post-commented",
            NotificationType::CommentLiked => "comment-liked",
            NotificationType::NewFollower => "new-follower",
            NotificationType::NewMessage => "new-message",
            NotificationType::CommentReplied => "comment-replied",
            NotificationType::Mention => "mention",
            NotificationType::System => "system",
            NotificationType::Unknown => "unknown",
        }
    }

    pub fn is_groupable(&self) -> bool {
        Self::GROUPABLE.contains(self)
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ISO 8601 date-time without an offset, optional fractional seconds.
const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Raw activity notification as delivered by the notification store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub actor_id: i64,
    pub actor_name: String,
    pub actor_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_profile_image: Option<String>,
    pub related_entity_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: String, // ISO 8601 timestamp
}

impl Notification {
    /// Parse `created_at` into an absolute instant.
    ///
    /// Timestamps without an offset are read as UTC.
    pub fn created_at_instant(&self) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(dt) => Ok(dt.with_timezone(&Utc)),
            Err(err) => NaiveDateTime::parse_from_str(&self.created_at, LOCAL_TIMESTAMP_FORMAT)
                .map(|naive| Utc.from_utc_datetime(&naive))
                .map_err(|_| err),
        }
    }

    pub fn actor(&self) -> ActorSummary {
        ActorSummary {
            id: self.actor_id,
            name: self.actor_name.clone(),
            username: self.actor_username.clone(),
            profile_image: self.actor_profile_image.clone(),
        }
    }
}

/// Identity of the user who triggered a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSummary {
    pub id: i64,
    pub name: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}
