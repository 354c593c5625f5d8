use crate::domain::entities::NotificationType;

/// Plural phrasings for a groupable type: (two actors, more than two actors).
fn template(notification_type: NotificationType) -> Option<(&'static str, &'static str)> {
    match notification_type {
        NotificationType::PostLiked => Some((
            "curtiram sua publicação",
            "e outras pessoas curtiram sua publicação",
        )),
        NotificationType::PostCommented => Some((
            "comentaram em sua publicação",
            "e outras pessoas comentaram em sua publicação",
        )),
        NotificationType::CommentLiked => Some((
            "curtiram seu comentário",
            "e outras pessoas curtiram seu comentário",
        )),
        NotificationType::NewFollower => Some((
            "começaram a seguir você",
            "e outras pessoas começaram a seguir você",
        )),
        NotificationType::NewMessage => Some((
            "enviaram mensagens para você",
            "e outras pessoas enviaram mensagens para você",
        )),
        _ => None,
    }
}

/// Build the grouped message for `distinct_actors` actors of one type.
///
/// Types without a template row yield an empty string.
pub fn synthesize_message(notification_type: NotificationType, distinct_actors: usize) -> String {
    match template(notification_type) {
        Some((_, many)) if distinct_actors > 2 => many.to_string(),
        Some((pair, _)) => pair.to_string(),
        None => String::new(),
    }
}
