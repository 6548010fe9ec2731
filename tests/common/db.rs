//! Database test utilities
//!
//! Provides helpers for setting up test databases with testcontainers.

use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

/// A test database container with connection pool
pub struct TestDb {
    /// The running PostgreSQL container (absent when using an external
    /// server via `TEST_DATABASE_URL`)
    #[allow(dead_code)]
    container: Option<ContainerAsync<Postgres>>,
    /// Connection pool to the test database
    pub pool: PgPool,
}

impl TestDb {
    /// Creates a new test database with a fresh PostgreSQL container.
    ///
    /// If `TEST_DATABASE_URL` is set, it is used as an admin connection to an
    /// already-running PostgreSQL server instead of starting a container; a
    /// uniquely-named database is created there so each test stays isolated.
    pub async fn new() -> Self {
        let (container, database_url) = match std::env::var("TEST_DATABASE_URL") {
            Ok(admin_url) => {
                let db_name = format!("test_{}", uuid::Uuid::new_v4().simple());
                let admin_pool = PgPool::connect(&admin_url)
                    .await
                    .expect("Failed to connect to TEST_DATABASE_URL");
                sqlx::query(&format!("CREATE DATABASE \"{}\"", db_name))
                    .execute(&admin_pool)
                    .await
                    .expect("Failed to create test database");
                admin_pool.close().await;
                let base = admin_url
                    .rsplit_once('/')
                    .map(|(base, _)| base.to_string())
                    .expect("TEST_DATABASE_URL must include a database path");
                (None, format!("{}/{}", base, db_name))
            }
            Err(_) => {
                // Start PostgreSQL container
                let container = Postgres::default()
                    .start()
                    .await
                    .expect("Failed to start PostgreSQL container");

                let host = container.get_host().await.expect("Failed to get host");
                let port = container
                    .get_host_port_ipv4(5432)
                    .await
                    .expect("Failed to get port");

                let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);
                (Some(container), url)
            }
        };

        // Create connection pool
        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        // Enable pgcrypto extension for gen_random_uuid()
        sqlx::query("CREATE EXTENSION IF NOT EXISTS pgcrypto")
            .execute(&pool)
            .await
            .expect("Failed to enable pgcrypto extension");

        // Run migrations
        flashgen::db::MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        TestDb { container, pool }
    }
}
