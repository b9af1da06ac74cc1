//! SQL statements used by the inbox repository.
//!
//! Table and column names are fixed; `"from"` and `"to"` are quoted because
//! they are reserved words.

/// Summaries of the messages linked to an inbox and to no other.
pub const LIST_SUMMARIES_BY_USER: &str = r#"
SELECT message_id, "from", date
FROM emails
WHERE message_id IN (
    SELECT mail_id
    FROM inboxes
    WHERE mail_id IN (SELECT mail_id FROM inboxes WHERE user_id = $1)
    GROUP BY mail_id
    HAVING COUNT(DISTINCT user_id) = 1
)
ORDER BY date, message_id
"#;

/// A single full message.
pub const GET_EMAIL_BY_ID: &str = r#"
SELECT message_id, body, "from", "to"
FROM emails
WHERE message_id = $1
"#;

/// Messages linked to this inbox and to no other.
pub const OWNED_MESSAGE_IDS_BY_USER: &str = r#"
SELECT mail_id
FROM inboxes
WHERE mail_id IN (SELECT mail_id FROM inboxes WHERE user_id = $1)
GROUP BY mail_id
HAVING COUNT(DISTINCT user_id) = 1
"#;

/// Insert an inbox owner.
pub const CREATE_USER: &str = "INSERT INTO users (email_address) VALUES ($1)";

/// Whether an inbox owner exists.
pub const USER_EXISTS: &str =
    "SELECT EXISTS(SELECT 1 FROM users WHERE email_address = $1)";

/// Delete an inbox owner; its `inboxes` links cascade.
pub const DELETE_USER: &str = "DELETE FROM users WHERE email_address = $1";

/// Delete a message by id.
pub const DELETE_EMAIL_BY_ID: &str = "DELETE FROM emails WHERE message_id = $1";

/// Insert a message.
pub const INSERT_EMAIL: &str =
    r#"INSERT INTO emails (message_id, body, "from", "to", date) VALUES ($1, $2, $3, $4, $5)"#;

/// Link a message to an inbox.
pub const LINK_EMAIL_TO_USER: &str = "INSERT INTO inboxes (mail_id, user_id) VALUES ($1, $2)";

/// Every statement by logical name, prepared once at startup to fail fast
/// on a schema mismatch.
pub const STATEMENTS: &[(&str, &str)] = &[
    ("list_summaries_by_user", LIST_SUMMARIES_BY_USER),
    ("get_email_by_id", GET_EMAIL_BY_ID),
    ("owned_message_ids_by_user", OWNED_MESSAGE_IDS_BY_USER),
    ("create_user", CREATE_USER),
    ("user_exists", USER_EXISTS),
    ("delete_user", DELETE_USER),
    ("delete_email_by_id", DELETE_EMAIL_BY_ID),
    ("insert_email", INSERT_EMAIL),
    ("link_email_to_user", LINK_EMAIL_TO_USER),
];
