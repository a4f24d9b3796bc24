// Direct messages between users.

pub mod handlers;

use serde::Serialize;
use uuid::Uuid;

use crate::models::message::MessageRow;

/// One thread in a user's inbox, keyed by the other participant.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub other_user_id: Uuid,
    pub other_user_name: String,
    pub last_message: MessageRow,
    pub unread_count: usize,
}

/// Groups `messages` (newest first) by the other participant. Threads come
/// out ordered by their latest message; unread counts only include messages
/// addressed to `user_id`.
pub fn group_conversations(user_id: Uuid, messages: &[MessageRow]) -> Vec<Conversation> {
    let mut conversations: Vec<Conversation> = Vec::new();

    for message in messages {
        let incoming = message.receiver_id == user_id;
        let (other_user_id, other_user_name) = if incoming {
            (message.sender_id, &message.sender_name)
        } else {
            (message.receiver_id, &message.receiver_name)
        };
        let unread = usize::from(incoming && !message.is_read);

        match conversations
            .iter_mut()
            .find(|c| c.other_user_id == other_user_id)
        {
            Some(conversation) => conversation.unread_count += unread,
            None => conversations.push(Conversation {
                other_user_id,
                other_user_name: other_user_name.clone(),
                last_message: message.clone(),
                unread_count: unread,
            }),
        }
    }

    conversations
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn message(from: Uuid, to: Uuid, minutes_ago: i64, is_read: bool) -> MessageRow {
        MessageRow {
            id: Uuid::new_v4(),
            sender_id: from,
            receiver_id: to,
            sender_name: format!("user-{}", &from.to_string()[..4]),
            receiver_name: format!("user-{}", &to.to_string()[..4]),
            content: format!("sent {minutes_ago} minutes ago"),
            is_read,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_groups_by_other_party_newest_first() {
        let me = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let messages = vec![
            message(bob, me, 1, false),
            message(me, alice, 5, false),
            message(alice, me, 10, false),
            message(bob, me, 20, true),
        ];

        let conversations = group_conversations(me, &messages);
        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].other_user_id, bob);
        assert_eq!(conversations[0].last_message.id, messages[0].id);
        assert_eq!(conversations[0].unread_count, 1);
        assert_eq!(conversations[1].other_user_id, alice);
        assert_eq!(conversations[1].last_message.id, messages[1].id);
    }

    #[test]
    fn test_outgoing_unread_messages_are_not_counted() {
        let me = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let messages = vec![message(me, alice, 1, false), message(me, alice, 2, false)];

        let conversations = group_conversations(me, &messages);
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].unread_count, 0);
        assert_eq!(conversations[0].other_user_name, messages[0].receiver_name);
    }

    #[test]
    fn test_empty_inbox() {
        assert!(group_conversations(Uuid::new_v4(), &[]).is_empty());
    }
}
