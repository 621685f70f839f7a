// src/config/database.rs

use anyhow::{anyhow, Result};
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

pub type ConnectionPool = Pool<Postgres>;

pub struct ConnectionManager;

impl ConnectionManager {
    pub async fn new_pool(connection_string: &str, max_conexoes: u32) -> Result<ConnectionPool> {
        let pool = PgPoolOptions::new()
            .max_connections(max_conexoes)
            .connect(connection_string)
            .await
            .map_err(|err| anyhow!("Falha ao conectar ao banco PostgreSQL: {}", err))?;

        Ok(pool)
    }
}
