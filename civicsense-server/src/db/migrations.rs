//! Schema bootstrap for the users table

use sqlx::PgPool;

/// Create the `users` table if it does not exist. Safe to run repeatedly.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running user store migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id TEXT PRIMARY KEY,
            dob DATE NOT NULL,
            age INTEGER NOT NULL CHECK (age >= 0),
            current_level SMALLINT NOT NULL CHECK (current_level BETWEEN 1 AND 5),
            last_level_update_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            civic_scores JSONB NOT NULL DEFAULT
                '{"hygiene": 0, "empathy": 0, "discipline": 0, "environment": 0}'::jsonb
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("User store migrations complete");
    Ok(())
}
