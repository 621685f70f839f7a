// src/config/app_config.rs

use anyhow::{anyhow, Context, Result};

/// Configuração da aplicação, lida das variáveis de ambiente (e do `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_conexoes: u32,
    pub run_migrations: bool,
    pub log_dir: String,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|chave| std::env::var(chave).ok())
    }

    /// Monta a configuração a partir de uma função de busca, o que permite
    /// testar sem mexer no ambiente do processo.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .context("Missing environment variable: DATABASE_URL")?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("PORT") {
            Some(valor) => valor
                .parse::<u16>()
                .context("PORT must be a valid u16 integer")?,
            None => 8080,
        };

        let max_conexoes = match lookup("DB_MAX_CONN") {
            Some(valor) => valor
                .parse::<u32>()
                .context("DB_MAX_CONN must be a valid u32 integer")?,
            None => 5,
        };

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("true") => true,
            Some("false") => false,
            Some(other) => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "./logs".to_string());

        Ok(Self {
            database_url,
            host,
            port,
            max_conexoes,
            run_migrations,
            log_dir,
        })
    }
}
