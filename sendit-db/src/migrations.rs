//! Schema migrations for the Send-IT tables.
//!
//! Integer-typed attributes map to BIGINT so decoding is uniform across
//! generated ids and plain integer columns.

use sqlx::PgPool;

use crate::Result;

/// Create the application tables if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<()> {
    tracing::info!("running sendit migrations");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGINT PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
            first_name TEXT,
            last_name TEXT,
            other_names TEXT,
            username TEXT,
            email TEXT UNIQUE,
            password_hash TEXT,
            registered_on TEXT,
            is_admin BIGINT NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS parcels (
            id BIGINT PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
            placed_by BIGINT REFERENCES users(id) ON DELETE SET NULL,
            weight BIGINT,
            weight_metric TEXT,
            sent_on TEXT,
            delivered_on TEXT,
            status TEXT NOT NULL DEFAULT 'placed',
            origin TEXT,
            destination TEXT,
            current_location TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
