use serde::{Deserialize, Serialize};

use super::notification::{ActorSummary, Notification, NotificationType};

/// Several related notifications folded into one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedNotification {
    pub id: i64,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub actors: Vec<ActorSummary>,
    pub related_entity_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
    pub count: usize,
    pub notifications: Vec<Notification>,
}

/// Output element of the aggregator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AggregatedItem {
    Single(Notification),
    Grouped(GroupedNotification),
}

impl AggregatedItem {
    pub fn is_grouped(&self) -> bool {
        matches!(self, AggregatedItem::Grouped(_))
    }

    pub fn id(&self) -> i64 {
        match self {
            AggregatedItem::Single(n) => n.id,
            AggregatedItem::Grouped(g) => g.id,
        }
    }

    pub fn is_read(&self) -> bool {
        match self {
            AggregatedItem::Single(n) => n.is_read,
            AggregatedItem::Grouped(g) => g.is_read,
        }
    }

    /// Raw notifications carried by this item, in collection order.
    pub fn members(&self) -> &[Notification] {
        match self {
            AggregatedItem::Single(n) => std::slice::from_ref(n),
            AggregatedItem::Grouped(g) => &g.notifications,
        }
    }
}
