// src/config/logger.rs

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Inicializa o tracing com duas saídas: console (filtrado por `RUST_LOG`,
/// padrão `info`) e arquivo JSON diário em `log_dir`.
///
/// O `WorkerGuard` devolvido precisa viver até o fim do processo, senão as
/// últimas linhas do arquivo se perdem.
pub fn init_logger(log_dir: &str) -> WorkerGuard {
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "comanda-api.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .json()
        .with_filter(EnvFilter::new("info"));

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_ansi(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
