//! Common test utilities for database-backed integration tests
//!
//! Each `TestDatabase` creates its own PostgreSQL database, applies the
//! embedded migrations to it and drops it again when it goes out of scope, so
//! tests can run in parallel without seeing each other's rows.
//!
//! # Usage
//!
//! ```no_run
//! use common::TestDatabase;
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let test_db = TestDatabase::new()
//!         .await
//!         .expect("Failed to create test database");
//!     let pool = test_db.pool();
//! }
//! ```
//!
//! `TEST_DATABASE_URL` points at any database the test user can connect to
//! (default `postgresql://postgres@localhost:5432/postgres`); the user needs
//! the CREATEDB privilege. These tests fail when the server cannot be reached.

#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use hello_db::PgPool;
use http_body_util::BodyExt;
use std::time::Duration;
use tower::ServiceExt;

const DEFAULT_TEST_DATABASE_URL: &str = "postgresql://postgres@localhost:5432/postgres";

/// Manages an isolated, throwaway test database.
///
/// # Database Lifecycle
///
/// 1. `new()` creates database: `CREATE DATABASE hello_db_test_<random>`
/// 2. Embedded migrations are applied
/// 3. Test runs with isolated database
/// 4. `Drop` executes: `DROP DATABASE hello_db_test_<random> WITH (FORCE)`
///
/// Requires PostgreSQL 13+ for `DROP DATABASE ... WITH (FORCE)` support.
pub struct TestDatabase {
    /// The name of the test database (e.g., "hello_db_test_a7b3f9x2")
    db_name: String,
    /// Connection pool for the test database
    pool: PgPool,
    /// URL of the database used for CREATE/DROP DATABASE
    admin_url: String,
    /// URL of the test database itself
    url: String,
}

impl TestDatabase {
    /// Creates a new isolated test database with all migrations applied.
    pub async fn new() -> Result<Self> {
        dotenvy::dotenv().ok();

        let admin_url = std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string());
        let db_name = Self::generate_database_name();
        let test_db_url = Self::build_database_url(&admin_url, &db_name)?;

        Self::create_database(&admin_url, &db_name).await?;

        let url = test_db_url.clone();
        let setup = tokio::task::spawn_blocking(move || {
            let manager = ConnectionManager::<PgConnection>::new(url);
            let pool = Pool::builder()
                .max_size(10) // Reasonable pool size for tests
                .min_idle(Some(1))
                .connection_timeout(Duration::from_secs(5))
                .build(manager)
                .context("Failed to create connection pool for test database")?;
            hello_db::run_migrations(&pool)?;
            Ok::<PgPool, anyhow::Error>(pool)
        })
        .await
        .context("Test database setup task panicked")
        .and_then(|result| result);

        match setup {
            Ok(pool) => Ok(TestDatabase {
                db_name,
                pool,
                admin_url,
                url: test_db_url,
            }),
            Err(e) => {
                Self::drop_database(&admin_url, &db_name);
                Err(e)
            }
        }
    }

    /// Returns a clone of the connection pool for this test database.
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// A separate pool on the same database capped at `max_size` connections.
    ///
    /// Connections are opened lazily; callers wait at most two seconds for one.
    pub fn pool_with_max_size(&self, max_size: u32) -> PgPool {
        let manager = ConnectionManager::<PgConnection>::new(self.url.clone());
        Pool::builder()
            .max_size(max_size)
            .min_idle(Some(0))
            .connection_timeout(Duration::from_secs(2))
            .build_unchecked(manager)
    }

    /// Returns the database name for debugging purposes.
    pub fn name(&self) -> &str {
        &self.db_name
    }

    pub fn generate_database_name() -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("hello_db_test_{}", &suffix[..16])
    }

    /// Replace the database name in the URL path, keeping any query string.
    pub fn build_database_url(base_url: &str, db_name: &str) -> Result<String> {
        let (without_query, query) = match base_url.split_once('?') {
            Some((url, query)) => (url, Some(query)),
            None => (base_url, None),
        };
        let authority_start = without_query
            .find("://")
            .map(|i| i + 3)
            .context("TEST_DATABASE_URL must be a postgresql:// URL")?;
        let path_start = without_query[authority_start..]
            .find('/')
            .map(|i| i + authority_start)
            .unwrap_or(without_query.len());

        let mut url = format!("{}/{}", &without_query[..path_start], db_name);
        if let Some(query) = query {
            url.push('?');
            url.push_str(query);
        }
        Ok(url)
    }

    async fn create_database(admin_url: &str, db_name: &str) -> Result<()> {
        let admin_url = admin_url.to_string();
        let db_name = db_name.to_string();

        tokio::task::spawn_blocking(move || {
            let mut conn = PgConnection::establish(&admin_url)
                .context("Failed to connect to PostgreSQL. Is PostgreSQL running?")?;

            // db_name is generated from hex characters, safe to interpolate
            diesel::sql_query(format!("CREATE DATABASE \"{}\"", db_name))
                .execute(&mut conn)
                .with_context(|| format!("Failed to create test database '{}'", db_name))?;

            Ok::<(), anyhow::Error>(())
        })
        .await
        .context("Database creation task panicked")?
    }

    fn drop_database(admin_url: &str, db_name: &str) {
        let dropped = PgConnection::establish(admin_url).ok().and_then(|mut conn| {
            diesel::sql_query(format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)", db_name))
                .execute(&mut conn)
                .ok()
        });

        if dropped.is_none() {
            eprintln!(
                "Warning: Failed to drop test database '{}'. \
                 You may need to manually clean up: DROP DATABASE {};",
                db_name, db_name
            );
        }
    }
}

/// A pool pointed at a port nothing listens on.
///
/// No connection is opened up front, so any request that reaches the
/// database fails with a 500 instead of hanging.
pub fn unreachable_pool() -> PgPool {
    let manager = ConnectionManager::<PgConnection>::new(
        "postgresql://postgres@127.0.0.1:1/unreachable?connect_timeout=1",
    );
    Pool::builder()
        .max_size(1)
        .min_idle(Some(0))
        .connection_timeout(Duration::from_secs(2))
        .build_unchecked(manager)
}

/// Response status, content type and body text.
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

/// Send a GET request through the router.
pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        Self::drop_database(&self.admin_url, &self.db_name);
    }
}

