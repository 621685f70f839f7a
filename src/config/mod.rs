// src/config/mod.rs

// Variáveis de ambiente da aplicação
pub mod app_config;
// Pool de conexões com o PostgreSQL
pub mod database;
// Inicialização do tracing (console + arquivo JSON)
pub mod logger;
// Relógio e formato `YYYY-MM-DD HH:mm:ss` das datas
pub mod data_formatada;
