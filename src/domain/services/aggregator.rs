use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::time::Duration;

use crate::domain::entities::{
    ActorSummary, AggregatedItem, GroupedNotification, Notification, NotificationType,
};
use crate::domain::errors::{AggregationError, AggregationResult};
use crate::domain::services::message_templates::synthesize_message;

/// Maximum distance from the anchor for same-entity notifications.
pub const GENERIC_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Maximum distance from the anchor for new-message notifications.
pub const MESSAGE_WINDOW: Duration = Duration::from_secs(2 * 60 * 60);

/// What to do when every member of a candidate group was fired by the same actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingleActorPolicy {
    /// Emit the anchor standalone and hand the other members back to the scan.
    #[default]
    Demote,
    /// Emit a group with a single actor (`count == 1`).
    Keep,
}

impl SingleActorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SingleActorPolicy::Demote => "demote",
            SingleActorPolicy::Keep => "keep",
        }
    }
}

impl FromStr for SingleActorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "demote" => Ok(SingleActorPolicy::Demote),
            "keep" => Ok(SingleActorPolicy::Keep),
            other => Err(format!("unknown single actor policy: {}", other)),
        }
    }
}

/// Folds a page of raw notifications into standalone and grouped entries.
///
/// Grouping is anchor-relative: every candidate is compared against the first
/// notification of its group, never against other members, so windows do not
/// chain. The aggregator holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationAggregator {
    policy: SingleActorPolicy,
}

impl NotificationAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SingleActorPolicy) -> Self {
        Self { policy }
    }

    /// Group `notifications`, preserving the order in which each item is first reached.
    pub fn group(&self, notifications: &[Notification]) -> AggregationResult<Vec<AggregatedItem>> {
        let mut placed = vec![false; notifications.len()];
        let mut instants = Instants::new(notifications);
        let positions = positions_by_type(notifications);
        let mut output = Vec::new();
        let mut groups = 0usize;

        for (i, current) in notifications.iter().enumerate() {
            if placed[i] {
                continue;
            }
            placed[i] = true;

            if !current.notification_type.is_groupable() {
                output.push(AggregatedItem::Single(current.clone()));
                continue;
            }

            let mut members = vec![i];
            let same_type = positions
                .get(&current.notification_type)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let later = same_type.partition_point(|&j| j <= i);

            for &j in &same_type[later..] {
                if placed[j] {
                    continue;
                }
                if is_groupable_with(i, j, notifications, &mut instants)? {
                    placed[j] = true;
                    members.push(j);
                }
            }

            if members.len() == 1 {
                output.push(AggregatedItem::Single(current.clone()));
                continue;
            }

            let actors = distinct_actors(members.iter().map(|&j| &notifications[j]));
            if actors.len() < 2 && self.policy == SingleActorPolicy::Demote {
                tracing::debug!(
                    "Notification {} shares its only actor {} with {} candidates; emitting standalone",
                    current.id,
                    current.actor_id,
                    members.len() - 1
                );
                for &j in &members[1..] {
                    placed[j] = false;
                }
                output.push(AggregatedItem::Single(current.clone()));
                continue;
            }

            let members: Vec<Notification> =
                members.iter().map(|&j| notifications[j].clone()).collect();
            output.push(AggregatedItem::Grouped(build_group(current, actors, members)));
            groups += 1;
        }

        tracing::debug!(
            "Aggregated {} notifications into {} items ({} groups)",
            notifications.len(),
            output.len(),
            groups
        );

        Ok(output)
    }
}

/// Group with the default single-actor policy.
pub fn group(notifications: &[Notification]) -> AggregationResult<Vec<AggregatedItem>> {
    NotificationAggregator::new().group(notifications)
}

fn is_groupable_with(
    anchor: usize,
    candidate: usize,
    notifications: &[Notification],
    instants: &mut Instants<'_>,
) -> AggregationResult<bool> {
    let current = &notifications[anchor];
    let other = &notifications[candidate];

    if current.notification_type != other.notification_type {
        return Ok(false);
    }

    let window = match current.notification_type {
        // Conversations are not compared: all recent messages fold into one summary.
        NotificationType::NewMessage => MESSAGE_WINDOW,
        _ => {
            if current.related_entity_id != other.related_entity_id {
                return Ok(false);
            }
            GENERIC_WINDOW
        }
    };

    let a = instants.get(anchor)?;
    let b = instants.get(candidate)?;
    Ok(within(a, b, window))
}

fn within(a: DateTime<Utc>, b: DateTime<Utc>, window: Duration) -> bool {
    let delta = if a >= b { a - b } else { b - a };
    delta.to_std().map(|d| d <= window).unwrap_or(false)
}

fn positions_by_type(notifications: &[Notification]) -> HashMap<NotificationType, Vec<usize>> {
    let mut positions: HashMap<NotificationType, Vec<usize>> = HashMap::new();
    for (i, n) in notifications.iter().enumerate() {
        if n.notification_type.is_groupable() {
            positions.entry(n.notification_type).or_default().push(i);
        }
    }
    positions
}

fn distinct_actors<'a>(members: impl Iterator<Item = &'a Notification>) -> Vec<ActorSummary> {
    let mut seen = HashSet::new();
    members
        .filter(|n| seen.insert(n.actor_id))
        .map(Notification::actor)
        .collect()
}

fn build_group(
    anchor: &Notification,
    actors: Vec<ActorSummary>,
    members: Vec<Notification>,
) -> GroupedNotification {
    GroupedNotification {
        id: anchor.id,
        notification_type: anchor.notification_type,
        message: synthesize_message(anchor.notification_type, actors.len()),
        count: actors.len(),
        actors,
        related_entity_id: anchor.related_entity_id,
        is_read: members.iter().all(|n| n.is_read),
        created_at: anchor.created_at.clone(),
        notifications: members,
    }
}

/// Timestamps parsed on first comparison, scoped to one aggregation call.
struct Instants<'a> {
    notifications: &'a [Notification],
    parsed: Vec<Option<DateTime<Utc>>>,
}

impl<'a> Instants<'a> {
    fn new(notifications: &'a [Notification]) -> Self {
        Self {
            notifications,
            parsed: vec![None; notifications.len()],
        }
    }

    fn get(&mut self, index: usize) -> AggregationResult<DateTime<Utc>> {
        if let Some(instant) = self.parsed[index] {
            return Ok(instant);
        }

        let notification = &self.notifications[index];
        let instant = notification.created_at_instant().map_err(|source| {
            AggregationError::InvalidTimestamp {
                notification_id: notification.id,
                value: notification.created_at.clone(),
                source,
            }
        })?;
        self.parsed[index] = Some(instant);
        Ok(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn like(id: i64, actor_id: i64, created_at: &str) -> Notification {
        Notification {
            id,
            notification_type: NotificationType::PostLiked,
            actor_id,
            actor_name: format!("Actor {}", actor_id),
            actor_username: format!("actor{}", actor_id),
            actor_profile_image: None,
            related_entity_id: 42,
            message: "curtiu sua publicação".to_string(),
            is_read: false,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_within_is_inclusive() {
        let a = DateTime::parse_from_rfc3339("2024-03-01T00:00:00Z").unwrap().with_timezone(&Utc);
        let b = DateTime::parse_from_rfc3339("2024-03-02T00:00:00Z").unwrap().with_timezone(&Utc);

        assert!(within(a, b, GENERIC_WINDOW));
        assert!(within(b, a, GENERIC_WINDOW));
        assert!(!within(a, b, MESSAGE_WINDOW));
    }

    #[test]
    fn test_distinct_actors_keeps_first_occurrence() {
        let members = vec![
            like(1, 7, "2024-03-01T00:00:00Z"),
            like(2, 8, "2024-03-01T00:00:00Z"),
            like(3, 7, "2024-03-01T00:00:00Z"),
        ];

        let actors = distinct_actors(members.iter());
        let ids: Vec<i64> = actors.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn test_instants_are_parsed_lazily() {
        let members = vec![like(1, 7, "not a date"), like(2, 8, "2024-03-01T00:00:00Z")];
        let mut instants = Instants::new(&members);

        assert!(instants.get(1).is_ok());
        match instants.get(0) {
            Err(AggregationError::InvalidTimestamp { notification_id, value, .. }) => {
                assert_eq!(notification_id, 1);
                assert_eq!(value, "not a date");
            }
            other => panic!("expected InvalidTimestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Keep".parse::<SingleActorPolicy>(), Ok(SingleActorPolicy::Keep));
        assert_eq!(" demote ".parse::<SingleActorPolicy>(), Ok(SingleActorPolicy::Demote));
        assert!("merge".parse::<SingleActorPolicy>().is_err());
        assert_eq!(SingleActorPolicy::default(), SingleActorPolicy::Demote);
    }

    #[test]
    fn test_empty_input() {
        assert!(group(&[]).unwrap().is_empty());
    }
}
