// src/processamentos/processamentos_gateway.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::{json, Value};
use sqlx::{query, query_as, query_scalar, Row};

use super::processamentos_structs::{DadosProcessamento, Processamento};
use crate::config::data_formatada::formatar;
use crate::config::database::ConnectionPool;
use crate::shared::erros::FalhaGateway;

pub type DynProcessamentoGateway = Arc<dyn ProcessamentoGateway + Send + Sync>;

#[async_trait]
pub trait ProcessamentoGateway {
    async fn buscar_por_id(&self, id: i32) -> Result<Option<Processamento>, FalhaGateway>;
    async fn buscar_todos(&self) -> Result<Vec<Processamento>, FalhaGateway>;
    async fn existe(&self, id: i32) -> Result<bool, FalhaGateway>;
    async fn inserir(
        &self,
        dados: &DadosProcessamento,
        data_abertura: NaiveDateTime,
    ) -> Result<i32, FalhaGateway>;
    async fn atualizar(
        &self,
        id: i32,
        dados: &DadosProcessamento,
        data_update: NaiveDateTime,
    ) -> Result<u64, FalhaGateway>;
    async fn deletar(&self, id: i32) -> Result<u64, FalhaGateway>;
}

const SQL_BUSCAR_POR_ID: &str = "SELECT id, comanda_id, produto_id, servico_id, \
     quantidade_servico, quantidade_produto, data_abertura_processamento, \
     data_update_processamento FROM tb_processamento WHERE id = $1";

const SQL_BUSCAR_TODOS: &str = "SELECT id, comanda_id, produto_id, servico_id, \
     quantidade_servico, quantidade_produto, data_abertura_processamento, \
     data_update_processamento FROM tb_processamento ORDER BY id";

const SQL_EXISTE: &str = "SELECT EXISTS(SELECT 1 FROM tb_processamento WHERE id = $1)";

const SQL_INSERIR: &str = "INSERT INTO tb_processamento (comanda_id, produto_id, servico_id, \
     quantidade_servico, quantidade_produto, data_abertura_processamento) \
     VALUES ($1, $2, $3, $4, $5, $6) RETURNING id";

const SQL_ATUALIZAR: &str = "UPDATE tb_processamento SET comanda_id = $1, produto_id = $2, \
     servico_id = $3, quantidade_servico = $4, quantidade_produto = $5, \
     data_update_processamento = $6 WHERE id = $7 \
     AND (comanda_id IS DISTINCT FROM $1 OR produto_id IS DISTINCT FROM $2 \
     OR servico_id IS DISTINCT FROM $3 OR quantidade_servico IS DISTINCT FROM $4 \
     OR quantidade_produto IS DISTINCT FROM $5)";

const SQL_DELETAR: &str = "DELETE FROM tb_processamento WHERE id = $1";

pub struct PgProcessamentoGateway {
    db: ConnectionPool,
}

impl PgProcessamentoGateway {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn parametros(dados: &DadosProcessamento, data: &NaiveDateTime) -> Value {
    json!({
        "comanda_id": dados.comanda_id,
        "produto_id": dados.produto_id,
        "servico_id": dados.servico_id,
        "quantidade_servico": dados.quantidade_servico,
        "quantidade_produto": dados.quantidade_produto,
        "data": formatar(data),
    })
}

#[async_trait]
impl ProcessamentoGateway for PgProcessamentoGateway {
    async fn buscar_por_id(&self, id: i32) -> Result<Option<Processamento>, FalhaGateway> {
        query_as::<_, Processamento>(SQL_BUSCAR_POR_ID)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_BUSCAR_POR_ID, json!({ "id": id })))
    }

    async fn buscar_todos(&self) -> Result<Vec<Processamento>, FalhaGateway> {
        query_as::<_, Processamento>(SQL_BUSCAR_TODOS)
            .fetch_all(&self.db)
            .await
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_BUSCAR_TODOS, json!({})))
    }

    async fn existe(&self, id: i32) -> Result<bool, FalhaGateway> {
        query_scalar::<_, bool>(SQL_EXISTE)
            .bind(id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_EXISTE, json!({ "id": id })))
    }

    async fn inserir(
        &self,
        dados: &DadosProcessamento,
        data_abertura: NaiveDateTime,
    ) -> Result<i32, FalhaGateway> {
        let row = query(SQL_INSERIR)
            .bind(dados.comanda_id)
            .bind(dados.produto_id)
            .bind(dados.servico_id)
            .bind(&dados.quantidade_servico)
            .bind(&dados.quantidade_produto)
            .bind(data_abertura)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                FalhaGateway::do_sqlx(e, SQL_INSERIR, parametros(dados, &data_abertura))
            })?;

        row.try_get::<i32, &str>("id")
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_INSERIR, parametros(dados, &data_abertura)))
    }

    async fn atualizar(
        &self,
        id: i32,
        dados: &DadosProcessamento,
        data_update: NaiveDateTime,
    ) -> Result<u64, FalhaGateway> {
        let resultado = query(SQL_ATUALIZAR)
            .bind(dados.comanda_id)
            .bind(dados.produto_id)
            .bind(dados.servico_id)
            .bind(&dados.quantidade_servico)
            .bind(&dados.quantidade_produto)
            .bind(data_update)
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                let mut params = parametros(dados, &data_update);
                params["id"] = json!(id);
                FalhaGateway::do_sqlx(e, SQL_ATUALIZAR, params)
            })?;

        Ok(resultado.rows_affected())
    }

    async fn deletar(&self, id: i32) -> Result<u64, FalhaGateway> {
        let resultado = query(SQL_DELETAR)
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_DELETAR, json!({ "id": id })))?;

        Ok(resultado.rows_affected())
    }
}
