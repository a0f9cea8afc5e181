//! Candidate screening service: ingest job-application submissions, score
//! them with a weighted heuristic, and shortlist a diverse top-k.
//!
//! The screening core ([`screening`]) is pure and DB-free; the rest of the
//! crate is the surrounding service — configuration, persistence, and the
//! HTTP surface.

pub mod candidates;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod screening;
pub mod state;

pub use routes::build_router;
pub use state::AppState;

/// Builds an `AppState` over a lazy pool for router tests. No connection is
/// attempted until a handler actually touches the database, so DB-free routes
/// can be exercised without a server.
pub fn test_state(database_url: &str) -> AppState {
    let db = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy(database_url)
        .expect("lazy pool from a well-formed URL");
    let config = config::Config {
        database_url: database_url.to_string(),
        port: 0,
        rust_log: "info".to_string(),
        data_path: std::path::PathBuf::from("data/form-submissions.json"),
        select_count: 5,
        target_skills: None,
    };
    AppState {
        db,
        config,
        options: screening::ScreeningOptions::default(),
    }
}
