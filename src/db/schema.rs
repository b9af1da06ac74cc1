//! Database schema and migrations for tempmail.
//!
//! Deployments that share the mail tables with a delivery agent usually
//! manage the schema themselves and set `database.run_migrations = false`.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
#[cfg(feature = "sqlite")]
pub const MIGRATIONS: &[&str] = &[
    // v1: Inbox owners, messages and the join relation between them
    r#"
CREATE TABLE users (
    email_address   TEXT PRIMARY KEY,
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);

-- "from" and "to" hold JSON arrays of addresses
CREATE TABLE emails (
    message_id  TEXT PRIMARY KEY,
    body        TEXT NOT NULL DEFAULT '',
    "from"      TEXT NOT NULL DEFAULT '[]',
    "to"        TEXT NOT NULL DEFAULT '[]',
    date        TEXT NOT NULL
);

CREATE TABLE inboxes (
    mail_id     TEXT NOT NULL REFERENCES emails(message_id) ON DELETE CASCADE,
    user_id     TEXT NOT NULL REFERENCES users(email_address) ON DELETE CASCADE,
    PRIMARY KEY (mail_id, user_id)
);
"#,
    // v2: Lookup by owner
    r#"
CREATE INDEX idx_inboxes_user_id ON inboxes(user_id);
CREATE INDEX idx_emails_date ON emails(date);
"#,
];

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
#[cfg(feature = "postgres")]
pub const MIGRATIONS: &[&str] = &[
    // v1: Inbox owners, messages and the join relation between them
    r#"
CREATE TABLE users (
    email_address   TEXT PRIMARY KEY,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE emails (
    message_id  TEXT PRIMARY KEY,
    body        TEXT NOT NULL DEFAULT '',
    "from"      TEXT[] NOT NULL DEFAULT '{}',
    "to"        TEXT[] NOT NULL DEFAULT '{}',
    date        TEXT NOT NULL
);

CREATE TABLE inboxes (
    mail_id     TEXT NOT NULL REFERENCES emails(message_id) ON DELETE CASCADE,
    user_id     TEXT NOT NULL REFERENCES users(email_address) ON DELETE CASCADE,
    PRIMARY KEY (mail_id, user_id)
);
"#,
    // v2: Lookup by owner
    r#"
CREATE INDEX idx_inboxes_user_id ON inboxes(user_id);
CREATE INDEX idx_emails_date ON emails(date);
"#,
];
