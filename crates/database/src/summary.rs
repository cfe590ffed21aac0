//! Recency aggregation for the chat list.
//!
//! [`summarize`] folds a user's chats and messages into one [`ChatSummary`]
//! per chat, ordered by last activity. It is a pure function: no I/O, no
//! hidden state, fully determined by its inputs. Callers fetch the two sets
//! (see [`crate::chat::list_chats`] and
//! [`crate::message::list_messages_for_user`]) and hand them over.

use std::collections::HashMap;

use crate::models::{Chat, ChatSummary, Message};

/// Produce one summary per chat, sorted by last activity descending.
///
/// The preview is the content of the chat's newest message, chosen by a
/// strict max over `created_at` so that among messages with equal timestamps
/// the first one encountered in iteration order wins. A chat with no
/// messages keeps an empty preview. Last activity is the later of the chat's
/// own `updated_at` and its newest message's `created_at`; appending a
/// message sets `updated_at` to exactly the message's timestamp, so the two
/// are usually equal and the preview must not depend on which is newer.
/// Messages referencing a chat not present in `chats` are skipped.
///
/// The sort is stable: chats with equal last activity keep their input order.
/// Previews carry the full message content; display truncation is the
/// caller's concern.
pub fn summarize(chats: &[Chat], messages: &[Message]) -> Vec<ChatSummary> {
    let mut summaries: Vec<ChatSummary> = chats
        .iter()
        .map(|chat| ChatSummary {
            id: chat.id.clone(),
            name: chat.name.clone(),
            preview: String::new(),
            last_activity: chat.updated_at,
        })
        .collect();

    let index: HashMap<&str, usize> = chats
        .iter()
        .enumerate()
        .map(|(i, chat)| (chat.id.as_str(), i))
        .collect();

    let mut newest: Vec<Option<&Message>> = vec![None; chats.len()];
    for message in messages {
        // Dangling reference: the chat was deleted or belongs to someone
        // else. Skip the record rather than failing the whole aggregation.
        let Some(&i) = index.get(message.chat_id.as_str()) else {
            continue;
        };

        match newest[i] {
            Some(best) if message.created_at <= best.created_at => {}
            _ => newest[i] = Some(message),
        }
    }

    for (summary, best) in summaries.iter_mut().zip(&newest) {
        if let Some(message) = best {
            summary.preview = message.content.clone();
            if message.created_at > summary.last_activity {
                summary.last_activity = message.created_at;
            }
        }
    }

    summaries.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn chat(id: &str, name: &str, updated_at: &str) -> Chat {
        Chat {
            id: id.to_string(),
            name: name.to_string(),
            user_id: "u1".to_string(),
            created_at: ts(updated_at),
            updated_at: ts(updated_at),
        }
    }

    fn message(chat_id: &str, content: &str, created_at: &str) -> Message {
        Message {
            id: format!("m-{}-{}", chat_id, created_at),
            chat_id: chat_id.to_string(),
            role: "user".to_string(),
            content: content.to_string(),
            created_at: ts(created_at),
        }
    }

    #[test]
    fn test_every_chat_appears_exactly_once() {
        let chats = vec![
            chat("a", "A", "2024-01-01T00:00:00Z"),
            chat("b", "B", "2024-01-02T00:00:00Z"),
            chat("c", "C", "2024-01-03T00:00:00Z"),
        ];
        let messages = vec![
            message("a", "one", "2024-02-01T00:00:00Z"),
            message("a", "two", "2024-02-02T00:00:00Z"),
        ];

        let summaries = summarize(&chats, &messages);

        assert_eq!(summaries.len(), chats.len());
        let mut ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dangling_message_is_ignored() {
        let chats = vec![chat("a", "A", "2024-01-01T00:00:00Z")];
        let messages = vec![
            message("deleted-chat", "ghost", "2024-06-01T00:00:00Z"),
            message("a", "real", "2024-03-01T00:00:00Z"),
        ];

        let summaries = summarize(&chats, &messages);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].preview, "real");
        assert_eq!(summaries[0].last_activity, ts("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn test_last_activity_is_max_of_chat_and_messages() {
        // Message newer than the chat's own timestamp.
        let chats = vec![chat("a", "A", "2024-01-01T00:00:00Z")];
        let messages = vec![
            message("a", "old", "2024-01-02T00:00:00Z"),
            message("a", "newest", "2024-01-05T00:00:00Z"),
            message("a", "middle", "2024-01-03T00:00:00Z"),
        ];
        let summaries = summarize(&chats, &messages);
        assert_eq!(summaries[0].preview, "newest");
        assert_eq!(summaries[0].last_activity, ts("2024-01-05T00:00:00Z"));

        // Chat timestamp newer than every message: the chat's own updated_at
        // supplies the last activity, but the newest message still supplies
        // the preview.
        let chats = vec![chat("b", "B", "2024-09-01T00:00:00Z")];
        let messages = vec![message("b", "stale", "2024-01-01T00:00:00Z")];
        let summaries = summarize(&chats, &messages);
        assert_eq!(summaries[0].preview, "stale");
        assert_eq!(summaries[0].last_activity, ts("2024-09-01T00:00:00Z"));
    }

    #[test]
    fn test_preview_survives_updated_at_equal_to_message() {
        // Appending a message bumps the chat's updated_at to exactly the
        // message's created_at, so the two timestamps coincide for every
        // chat that has ever received a message. The newest message must
        // still win the preview.
        let chats = vec![chat("a", "A", "2024-03-01T00:00:00Z")];
        let messages = vec![
            message("a", "older", "2024-02-01T00:00:00Z"),
            message("a", "latest", "2024-03-01T00:00:00Z"),
        ];

        let summaries = summarize(&chats, &messages);

        assert_eq!(summaries[0].preview, "latest");
        assert_eq!(summaries[0].last_activity, ts("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn test_equal_timestamps_first_encountered_wins() {
        let chats = vec![chat("a", "A", "2024-01-01T00:00:00Z")];
        let messages = vec![
            message("a", "first", "2024-01-02T00:00:00Z"),
            message("a", "second", "2024-01-02T00:00:00Z"),
        ];

        let summaries = summarize(&chats, &messages);

        // "second" is not strictly greater, so "first" keeps the preview.
        assert_eq!(summaries[0].preview, "first");
    }

    #[test]
    fn test_output_sorted_by_last_activity_descending() {
        let chats = vec![
            chat("a", "A", "2024-01-01T00:00:00Z"),
            chat("b", "B", "2024-01-04T00:00:00Z"),
            chat("c", "C", "2024-01-02T00:00:00Z"),
        ];
        let messages = vec![message("c", "bump", "2024-01-06T00:00:00Z")];

        let summaries = summarize(&chats, &messages);

        for pair in summaries.windows(2) {
            assert!(pair[0].last_activity >= pair[1].last_activity);
        }
        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_ties_preserve_input_order() {
        let chats = vec![
            chat("x", "X", "2024-05-01T00:00:00Z"),
            chat("y", "Y", "2024-05-01T00:00:00Z"),
            chat("z", "Z", "2024-05-01T00:00:00Z"),
        ];

        let summaries = summarize(&chats, &[]);

        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_chat_without_messages_has_empty_preview() {
        let chats = vec![chat("a", "A", "2024-01-01T00:00:00Z")];

        let summaries = summarize(&chats, &[]);

        assert_eq!(summaries[0].preview, "");
        assert_eq!(summaries[0].last_activity, ts("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_idempotent() {
        let chats = vec![
            chat("a", "A", "2024-01-01T00:00:00Z"),
            chat("b", "B", "2024-01-02T00:00:00Z"),
        ];
        let messages = vec![
            message("a", "hello", "2024-01-03T00:00:00Z"),
            message("b", "world", "2024-01-04T00:00:00Z"),
        ];

        assert_eq!(summarize(&chats, &messages), summarize(&chats, &messages));
    }

    #[test]
    fn test_message_recency_outranks_chat_timestamp() {
        // A's message makes it more recent than B even though B's own
        // updated_at is later than A's.
        let chats = vec![
            chat("A", "Trip", "2024-01-01T00:00:00Z"),
            chat("B", "Work", "2024-01-02T00:00:00Z"),
        ];
        let messages = vec![
            message("A", "Let's go to Kyoto", "2024-01-05T00:00:00Z"),
            message("B", "Draft sent", "2024-01-01T12:00:00Z"),
        ];

        let summaries = summarize(&chats, &messages);

        assert_eq!(summaries[0].id, "A");
        assert_eq!(summaries[0].preview, "Let's go to Kyoto");
        assert_eq!(summaries[0].last_activity, ts("2024-01-05T00:00:00Z"));
        assert_eq!(summaries[1].id, "B");
        assert_eq!(summaries[1].preview, "Draft sent");
        assert_eq!(summaries[1].last_activity, ts("2024-01-02T00:00:00Z"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(summarize(&[], &[]).is_empty());
        let orphan = vec![message("nowhere", "lost", "2024-01-01T00:00:00Z")];
        assert!(summarize(&[], &orphan).is_empty());
    }
}
