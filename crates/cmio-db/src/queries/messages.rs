//! Message queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::params;
use std::collections::HashMap;

/// Message row from database, with sender, channel and client names resolved.
#[derive(Debug, Clone)]
pub struct MessageRow {
    pub id: i64,
    pub message_type: String,
    pub body: String,
    pub created_at: String,
    pub sender_id: i64,
    pub sender_name: String,
    pub channel_id: Option<i64>,
    pub channel_name: Option<String>,
    /// Linked client names, in client ID order.
    pub client_names: Vec<String>,
}

/// Insert a message and link it to the given clients.
///
/// The schema rejects channel messages without a channel and non-channel
/// messages with one.
pub fn create_message(
    pool: &DbPool,
    message_type: &str,
    body: &str,
    sender_id: i64,
    channel_id: Option<i64>,
    client_ids: &[i64],
) -> DbResult<i64> {
    pool.transaction(|tx| {
        tx.execute(
            "INSERT INTO messages (message_type, body, sender_id, channel_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![message_type, body, sender_id, channel_id],
        )?;
        let id = tx.last_insert_rowid();

        for client_id in client_ids {
            tx.execute(
                "INSERT INTO message_clients (message_id, client_id) VALUES (?1, ?2)",
                params![id, client_id],
            )?;
        }
        Ok(id)
    })
}

/// List all messages, oldest first.
pub fn list_messages(pool: &DbPool) -> DbResult<Vec<MessageRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT m.id, m.message_type, m.body, m.created_at, m.sender_id, u.full_name,
                    m.channel_id, ch.name
             FROM messages m
             JOIN users u ON u.id = m.sender_id
             LEFT JOIN team_channels ch ON ch.id = m.channel_id
             ORDER BY m.id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                message_type: row.get(1)?,
                body: row.get(2)?,
                created_at: row.get(3)?,
                sender_id: row.get(4)?,
                sender_name: row.get(5)?,
                channel_id: row.get(6)?,
                channel_name: row.get(7)?,
                client_names: Vec::new(),
            })
        })?;
        let mut messages = rows.collect::<Result<Vec<_>, _>>()?;

        let mut links = conn.prepare(
            "SELECT mc.message_id, c.first_name || ' ' || c.last_name
             FROM message_clients mc JOIN clients c ON c.id = mc.client_id
             ORDER BY mc.message_id, c.id",
        )?;
        let mut names: HashMap<i64, Vec<String>> = HashMap::new();
        let pairs = links.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;
        for pair in pairs {
            let (message_id, name) = pair?;
            names.entry(message_id).or_default().push(name);
        }

        for message in &mut messages {
            if let Some(clients) = names.remove(&message.id) {
                message.client_names = clients;
            }
        }
        Ok(messages)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::seeded_pool;

    #[test]
    fn test_list_messages_resolves_names() {
        let pool = seeded_pool();
        let messages = list_messages(&pool).unwrap();
        assert_eq!(messages.len(), 2);

        assert_eq!(messages[0].sender_name, "Alex Caseworker");
        assert_eq!(messages[0].channel_name.as_deref(), Some("housing-support"));
        assert_eq!(messages[0].client_names, vec!["Sam Rivera"]);

        assert_eq!(messages[1].message_type, "direct");
        assert_eq!(messages[1].channel_name, None);
    }

    #[test]
    fn test_create_message_links_clients() {
        let pool = seeded_pool();
        let id = create_message(
            &pool,
            "self_note",
            "Both clients asked about bus passes.",
            1,
            None,
            &[1, 2],
        )
        .unwrap();

        let messages = list_messages(&pool).unwrap();
        let created = messages.iter().find(|m| m.id == id).unwrap();
        assert_eq!(created.client_names, vec!["Sam Rivera", "Lee Chen"]);
    }

    #[test]
    fn test_client_name_with_comma_stays_whole() {
        let pool = seeded_pool();
        pool.with_conn(|conn| {
            conn.execute(
                "INSERT INTO clients (id, first_name, last_name) VALUES (3, 'Pat', 'Jones, Jr.')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let id = create_message(&pool, "direct", "Checking in.", 2, None, &[3]).unwrap();
        let messages = list_messages(&pool).unwrap();
        let created = messages.iter().find(|m| m.id == id).unwrap();
        assert_eq!(created.client_names, vec!["Pat Jones, Jr."]);
    }

    #[test]
    fn test_create_message_enforces_channel_rule() {
        let pool = seeded_pool();
        assert!(create_message(&pool, "channel", "no channel", 1, None, &[]).is_err());
        assert!(create_message(&pool, "direct", "stray channel", 1, Some(1), &[]).is_err());
        assert_eq!(list_messages(&pool).unwrap().len(), 2);
    }
}
