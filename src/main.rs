// src/main.rs

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use tracing::info;

// Importa os módulos
mod comandas; // Módulo de comandas
mod config; // Configuração, banco, logs e datas
mod processamentos; // Módulo de processamentos (itens faturáveis)
mod produtos; // Módulo de produtos
mod shared; // Módulo shared

use comandas::comandas_gateway::{DynComandaGateway, PgComandaGateway};
use comandas::comandas_repository::ComandaRepository;
use config::app_config::Config;
use config::database::{ConnectionManager, ConnectionPool};
use config::logger::init_logger;
use processamentos::processamentos_gateway::{DynProcessamentoGateway, PgProcessamentoGateway};
use processamentos::processamentos_repository::ProcessamentoRepository;
use produtos::produtos_gateway::{DynProdutoGateway, PgProdutoGateway};
use produtos::produtos_repository::ProdutoRepository;
use shared::tratador_erros::{erro_caminho, erro_corpo_json};

// Estado compartilhado: um repositório por entidade.
pub struct AppState {
    pub comandas: ComandaRepository,
    pub produtos: ProdutoRepository,
    pub processamentos: ProcessamentoRepository,
}

impl AppState {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self::com_gateways(
            Arc::new(PgComandaGateway::new(db_pool.clone())),
            Arc::new(PgProdutoGateway::new(db_pool.clone())),
            Arc::new(PgProcessamentoGateway::new(db_pool)),
        )
    }

    pub fn com_gateways(
        comandas: DynComandaGateway,
        produtos: DynProdutoGateway,
        processamentos: DynProcessamentoGateway,
    ) -> Self {
        Self {
            comandas: ComandaRepository::new(comandas),
            produtos: ProdutoRepository::new(produtos),
            processamentos: ProcessamentoRepository::new(processamentos),
        }
    }
}

/// Registra todas as rotas e os tratadores de erro de extração
/// (corpo JSON e parâmetro de caminho inválidos viram 400).
pub fn configurar_rotas(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(erro_corpo_json))
        .app_data(web::PathConfig::default().error_handler(erro_caminho))
        // Módulo de Comandas
        .service(comandas::comandas_router::buscar_comandas)
        .service(comandas::comandas_router::buscar_comanda_por_id)
        .service(comandas::comandas_router::cadastrar_comanda)
        .service(comandas::comandas_router::atualizar_comanda)
        .service(comandas::comandas_router::deletar_comanda)
        // Módulo de Produtos
        .service(produtos::produtos_router::buscar_produtos)
        .service(produtos::produtos_router::buscar_produto_por_id)
        .service(produtos::produtos_router::cadastrar_produto)
        .service(produtos::produtos_router::atualizar_produto)
        .service(produtos::produtos_router::deletar_produto)
        // Módulo de Processamentos
        .service(processamentos::processamentos_router::buscar_processamentos)
        .service(processamentos::processamentos_router::buscar_processamento_por_id)
        .service(processamentos::processamentos_router::cadastrar_processamento)
        .service(processamentos::processamentos_router::atualizar_processamento)
        .service(processamentos::processamentos_router::deletar_processamento);
}

// Função principal da aplicação Actix Web.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::init().context("Falha ao carregar a configuração")?;

    // O guard precisa viver até o fim do main para o arquivo de log ser descarregado.
    let _guard = init_logger(&config.log_dir);

    let db_pool = ConnectionManager::new_pool(&config.database_url, config.max_conexoes).await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&db_pool)
            .await
            .context("Falha ao aplicar as migrações")?;
        info!("Migrações aplicadas");
    }

    let app_state = web::Data::new(AppState::new(db_pool));

    info!("Iniciando API de comandas em {}:{}...", config.host, config.port);

    // Configura e inicia o servidor HTTP.
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(configurar_rotas)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
