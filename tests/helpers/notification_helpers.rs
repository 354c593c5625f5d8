#![allow(dead_code)]
use chrono::{DateTime, Duration, Utc};
use notifold::domain::entities::{AggregatedItem, Notification, NotificationType};
use std::collections::{HashMap, HashSet};

/// Fixed reference instant used by every scenario
pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
        .expect("Invalid base time")
        .with_timezone(&Utc)
}

/// RFC 3339 timestamp `offset` after the base time
pub fn at(offset: Duration) -> String {
    (base_time() + offset).to_rfc3339()
}

/// Create a test notification with the given identity fields
pub fn create_test_notification(
    id: i64,
    notification_type: NotificationType,
    actor_id: i64,
    related_entity_id: i64,
    created_at: String,
) -> Notification {
    Notification {
        id,
        notification_type,
        actor_id,
        actor_name: format!("Actor {}", actor_id),
        actor_username: format!("actor{}", actor_id),
        actor_profile_image: Some(format!("https://cdn.example.com/{}.png", actor_id)),
        related_entity_id,
        message: format!("{} by actor {}", notification_type, actor_id),
        is_read: false,
        created_at,
    }
}

pub fn post_liked(id: i64, actor_id: i64, post_id: i64, offset: Duration) -> Notification {
    create_test_notification(id, NotificationType::PostLiked, actor_id, post_id, at(offset))
}

pub fn new_message(id: i64, actor_id: i64, conversation_id: i64, offset: Duration) -> Notification {
    create_test_notification(
        id,
        NotificationType::NewMessage,
        actor_id,
        conversation_id,
        at(offset),
    )
}

pub fn new_follower(id: i64, actor_id: i64, offset: Duration) -> Notification {
    create_test_notification(id, NotificationType::NewFollower, actor_id, 1, at(offset))
}

pub fn read(mut notification: Notification) -> Notification {
    notification.is_read = true;
    notification
}

pub fn ids(items: &[AggregatedItem]) -> Vec<i64> {
    items.iter().map(AggregatedItem::id).collect()
}

pub fn member_ids(item: &AggregatedItem) -> Vec<i64> {
    item.members().iter().map(|n| n.id).collect()
}

/// Check the structural guarantees every aggregation result must satisfy
pub fn assert_aggregation_invariants(input: &[Notification], output: &[AggregatedItem]) {
    // Coverage: each input appears exactly once across all items
    let mut seen: HashMap<i64, usize> = HashMap::new();
    for item in output {
        for member in item.members() {
            *seen.entry(member.id).or_default() += 1;
        }
    }
    assert_eq!(seen.len(), input.len(), "output must cover every input");
    for notification in input {
        assert_eq!(
            seen.get(&notification.id),
            Some(&1),
            "notification {} must appear exactly once",
            notification.id
        );
    }

    for item in output {
        if let AggregatedItem::Grouped(group) = item {
            assert!(group.notifications.len() >= 2, "groups need two members");
            assert_eq!(group.actors.len(), group.count);
            assert!(group.notifications.len() >= group.count);

            let distinct: HashSet<i64> = group.actors.iter().map(|a| a.id).collect();
            assert_eq!(distinct.len(), group.actors.len(), "actors must be unique");

            assert_eq!(
                group.is_read,
                group.notifications.iter().all(|n| n.is_read),
                "group read flag must be the AND of its members"
            );

            let anchor = &group.notifications[0];
            assert_eq!(group.id, anchor.id);
            assert_eq!(group.created_at, anchor.created_at);
            assert_eq!(group.related_entity_id, anchor.related_entity_id);
            assert!(group
                .notifications
                .iter()
                .all(|n| n.notification_type == group.notification_type));
        }
    }
}
