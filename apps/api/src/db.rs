use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS candidates (
    id                 BIGSERIAL PRIMARY KEY,
    name               TEXT NOT NULL DEFAULT '',
    email              TEXT,
    phone              TEXT,
    location           TEXT,
    submitted_at       TIMESTAMPTZ NOT NULL DEFAULT now(),
    availability       JSONB NOT NULL DEFAULT '[]'::jsonb,
    salary_expectation BIGINT,
    work_experiences   JSONB NOT NULL DEFAULT '[]'::jsonb,
    education          JSONB NOT NULL DEFAULT 'null'::jsonb,
    skills             JSONB NOT NULL DEFAULT '[]'::jsonb,
    experience_years   DOUBLE PRECISION NOT NULL DEFAULT 0,
    score              DOUBLE PRECISION NOT NULL DEFAULT 0,
    selected           BOOLEAN NOT NULL DEFAULT FALSE,
    reason             TEXT
);
CREATE INDEX IF NOT EXISTS idx_candidates_score ON candidates (score DESC);
CREATE INDEX IF NOT EXISTS idx_candidates_selected ON candidates (selected)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the candidates table and its indexes if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Schema ensured");
    Ok(())
}
