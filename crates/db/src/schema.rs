use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create members table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS members (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            full_name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create lessons table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lessons (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            external_event_id VARCHAR(255) NULL UNIQUE,
            title VARCHAR(255) NOT NULL,
            instructor_name VARCHAR(255) NOT NULL,
            difficulty VARCHAR(255) NOT NULL,
            capacity INTEGER NOT NULL CHECK (capacity >= 0),
            lesson_type VARCHAR(32) NOT NULL
                CHECK (lesson_type IN ('normal', 'personal', 'training')),
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            description TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reservations table. The unique constraint backs the
    // duplicate-booking check; deleting a lesson cascades to its
    // reservations.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            lesson_id UUID NOT NULL REFERENCES lessons(id) ON DELETE CASCADE,
            member_id UUID NOT NULL REFERENCES members(id),
            status VARCHAR(32) NOT NULL DEFAULT 'confirmed'
                CHECK (status IN ('confirmed', 'attended')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT reservations_lesson_member_key UNIQUE (lesson_id, member_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_lessons_start_time ON lessons(start_time);
        CREATE INDEX IF NOT EXISTS idx_lessons_external_event_id ON lessons(external_event_id);
        CREATE INDEX IF NOT EXISTS idx_reservations_lesson_id ON reservations(lesson_id);
        CREATE INDEX IF NOT EXISTS idx_reservations_member_id ON reservations(member_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
