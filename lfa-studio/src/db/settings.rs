//! Settings key-value persistence

use sqlx::SqlitePool;

use lfa_common::Result;

/// Settings key holding the Groq API key
pub const GROQ_API_KEY: &str = "groq_api_key";

/// Settings key holding the Groq model override
pub const GROQ_MODEL: &str = "groq_model";

/// Read one setting value
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(value)
}

/// Write one setting value (insert or update)
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value) VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}
