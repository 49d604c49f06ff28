use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// Postgres connection pool shared by the order repository and the catalog.
pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Build the storefront's connection pool. Called once at startup, before
/// migrations run; an unreachable database is a hard failure.
pub fn create_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .build(manager)
        .expect("Failed to create database connection pool")
}
