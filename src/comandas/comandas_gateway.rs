// src/comandas/comandas_gateway.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::json;
use sqlx::{query, query_as, query_scalar, Row};

use super::comandas_structs::{Comanda, DadosComanda};
use crate::config::data_formatada::formatar;
use crate::config::database::ConnectionPool;
use crate::shared::erros::FalhaGateway;

pub type DynComandaGateway = Arc<dyn ComandaGateway + Send + Sync>;

/// Operações de banco usadas pelo repositório de comandas.
#[async_trait]
pub trait ComandaGateway {
    async fn buscar_por_id(&self, id: i32) -> Result<Option<Comanda>, FalhaGateway>;
    async fn buscar_todas(&self) -> Result<Vec<Comanda>, FalhaGateway>;
    async fn existe(&self, id: i32) -> Result<bool, FalhaGateway>;
    async fn codigo_em_uso(&self, codigo_comanda: &str) -> Result<bool, FalhaGateway>;
    async fn inserir(
        &self,
        dados: &DadosComanda,
        status: &str,
        data_abertura: NaiveDateTime,
    ) -> Result<i32, FalhaGateway>;
    /// Devolve as linhas afetadas; zero quando nenhum campo mudou.
    async fn atualizar(
        &self,
        id: i32,
        dados: &DadosComanda,
        data_atualizacao: NaiveDateTime,
    ) -> Result<u64, FalhaGateway>;
    async fn deletar(&self, id: i32) -> Result<u64, FalhaGateway>;
}

const SQL_BUSCAR_POR_ID: &str = "SELECT id, codigo_comanda, valor_total, data_abertura_comanda, \
     data_atualizacao_comanda, status FROM tb_comanda WHERE id = $1";

const SQL_BUSCAR_TODAS: &str = "SELECT id, codigo_comanda, valor_total, data_abertura_comanda, \
     data_atualizacao_comanda, status FROM tb_comanda ORDER BY id";

const SQL_EXISTE: &str = "SELECT EXISTS(SELECT 1 FROM tb_comanda WHERE id = $1)";

const SQL_CODIGO_EM_USO: &str =
    "SELECT EXISTS(SELECT 1 FROM tb_comanda WHERE codigo_comanda = $1)";

const SQL_INSERIR: &str = "INSERT INTO tb_comanda (codigo_comanda, valor_total, \
     data_abertura_comanda, status) VALUES ($1, $2, $3, $4) RETURNING id";

// O guarda IS DISTINCT FROM faz o PostgreSQL reportar zero linhas quando nada muda.
const SQL_ATUALIZAR: &str = "UPDATE tb_comanda SET codigo_comanda = $1, valor_total = $2, \
     data_atualizacao_comanda = $3 WHERE id = $4 \
     AND (codigo_comanda IS DISTINCT FROM $1 OR valor_total IS DISTINCT FROM $2)";

const SQL_DELETAR: &str = "DELETE FROM tb_comanda WHERE id = $1";

pub struct PgComandaGateway {
    db: ConnectionPool,
}

impl PgComandaGateway {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ComandaGateway for PgComandaGateway {
    async fn buscar_por_id(&self, id: i32) -> Result<Option<Comanda>, FalhaGateway> {
        query_as::<_, Comanda>(SQL_BUSCAR_POR_ID)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_BUSCAR_POR_ID, json!({ "id": id })))
    }

    async fn buscar_todas(&self) -> Result<Vec<Comanda>, FalhaGateway> {
        query_as::<_, Comanda>(SQL_BUSCAR_TODAS)
            .fetch_all(&self.db)
            .await
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_BUSCAR_TODAS, json!({})))
    }

    async fn existe(&self, id: i32) -> Result<bool, FalhaGateway> {
        query_scalar::<_, bool>(SQL_EXISTE)
            .bind(id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_EXISTE, json!({ "id": id })))
    }

    async fn codigo_em_uso(&self, codigo_comanda: &str) -> Result<bool, FalhaGateway> {
        query_scalar::<_, bool>(SQL_CODIGO_EM_USO)
            .bind(codigo_comanda)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                FalhaGateway::do_sqlx(
                    e,
                    SQL_CODIGO_EM_USO,
                    json!({ "codigo_comanda": codigo_comanda }),
                )
            })
    }

    async fn inserir(
        &self,
        dados: &DadosComanda,
        status: &str,
        data_abertura: NaiveDateTime,
    ) -> Result<i32, FalhaGateway> {
        let parametros = || {
            json!({
                "codigo_comanda": dados.codigo_comanda,
                "valor_total": dados.valor_total,
                "data_abertura_comanda": formatar(&data_abertura),
                "status": status,
            })
        };

        let row = query(SQL_INSERIR)
            .bind(&dados.codigo_comanda)
            .bind(&dados.valor_total)
            .bind(data_abertura)
            .bind(status)
            .fetch_one(&self.db)
            .await
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_INSERIR, parametros()))?;

        row.try_get::<i32, &str>("id")
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_INSERIR, parametros()))
    }

    async fn atualizar(
        &self,
        id: i32,
        dados: &DadosComanda,
        data_atualizacao: NaiveDateTime,
    ) -> Result<u64, FalhaGateway> {
        let resultado = query(SQL_ATUALIZAR)
            .bind(&dados.codigo_comanda)
            .bind(&dados.valor_total)
            .bind(data_atualizacao)
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                FalhaGateway::do_sqlx(
                    e,
                    SQL_ATUALIZAR,
                    json!({
                        "id": id,
                        "codigo_comanda": dados.codigo_comanda,
                        "valor_total": dados.valor_total,
                        "data_atualizacao_comanda": formatar(&data_atualizacao),
                    }),
                )
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
