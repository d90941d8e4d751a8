//! Incoming staff messages.

pub mod model;

use crate::error::CmioResult;
use cmio_db::queries::messages as queries;
use cmio_db::DbPool;
use model::{Message, MessageType};

/// List all messages, oldest first.
pub fn list_messages(pool: &DbPool) -> CmioResult<Vec<Message>> {
    let rows = queries::list_messages(pool)?;
    Ok(rows.into_iter().map(Message::from_row).collect())
}

/// Post a message. Channel messages need a channel; other kinds must not have one.
pub fn post_message(
    pool: &DbPool,
    message_type: MessageType,
    body: &str,
    sender_id: i64,
    channel_id: Option<i64>,
    client_ids: &[i64],
) -> CmioResult<i64> {
    let id = queries::create_message(
        pool,
        message_type.as_str(),
        body,
        sender_id,
        channel_id,
        client_ids,
    )?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded_pool;

    #[test]
    fn test_list_messages() {
        let pool = seeded_pool();
        let messages = list_messages(&pool).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message_type, MessageType::Channel);
        assert_eq!(messages[0].channel.as_deref(), Some("housing-support"));
        assert_eq!(messages[1].clients, vec!["Lee Chen".to_string()]);
    }

    #[test]
    fn test_post_message_channel_rule() {
        let pool = seeded_pool();
        assert!(post_message(&pool, MessageType::Channel, "missing channel", 1, None, &[1]).is_err());

        let id = post_message(&pool, MessageType::Channel, "Lease signed", 1, Some(1), &[1]).unwrap();
        let posted = list_messages(&pool).unwrap().into_iter().find(|m| m.id == id).unwrap();
        assert_eq!(posted.sender, "Alex Caseworker");
        assert_eq!(posted.clients, vec!["Sam Rivera".to_string()]);
    }

    #[test]
    fn test_client_names_are_not_split() {
        let pool = seeded_pool();
        pool.with_conn(|conn| {
            conn.execute(
                "INSERT INTO clients (id, first_name, last_name) VALUES (3, 'Pat', 'Jones, Jr.')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let id = post_message(&pool, MessageType::Direct, "Checking in.", 2, None, &[3]).unwrap();
        let posted = list_messages(&pool).unwrap().into_iter().find(|m| m.id == id).unwrap();
        assert_eq!(posted.clients, vec!["Pat Jones, Jr.".to_string()]);
    }
}
