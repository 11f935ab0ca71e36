//! Schema bootstrap
//!
//! Idempotent DDL run once at start-up. Existing tables are left untouched.

use sqlx::PgPool;
use tracing::info;

use crate::Result;

const STATEMENTS: &[&str] = &[
    // gen_random_uuid() on PostgreSQL < 13
    "CREATE EXTENSION IF NOT EXISTS pgcrypto",
    r#"
    CREATE TABLE IF NOT EXISTS drills (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        title TEXT,
        url TEXT NOT NULL,
        platform TEXT NOT NULL DEFAULT 'other',
        video_id TEXT,
        levels INTEGER[] NOT NULL DEFAULT '{}',
        fundamentals TEXT[] NOT NULL DEFAULT '{}',
        drill_types TEXT[] NOT NULL DEFAULT '{}',
        coach_participates BOOLEAN,
        good_for_many_players BOOLEAN,
        min_players INTEGER,
        max_players INTEGER,
        notes TEXT,
        tested BOOLEAN NOT NULL DEFAULT FALSE,
        tested_rating INTEGER,
        tested_notes TEXT,
        created_by_name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS drill_comments (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        drill_id UUID NOT NULL REFERENCES drills(id) ON DELETE CASCADE,
        comment TEXT NOT NULL,
        created_by_name TEXT NOT NULL,
        created_by_email TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS drill_ratings (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        drill_id UUID NOT NULL REFERENCES drills(id) ON DELETE CASCADE,
        score INTEGER NOT NULL CHECK (score BETWEEN 1 AND 10),
        created_by_name TEXT NOT NULL,
        created_by_email TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_drill_comments_drill_id ON drill_comments (drill_id)",
    "CREATE INDEX IF NOT EXISTS idx_drill_ratings_drill_id ON drill_ratings (drill_id)",
];

/// Create the catalog tables and indexes if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    info!("Ensuring database schema");

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema ready");
    Ok(())
}
