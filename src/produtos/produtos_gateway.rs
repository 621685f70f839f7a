// src/produtos/produtos_gateway.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::json;
use sqlx::{query, query_as, query_scalar, Row};

use super::produtos_structs::{DadosProduto, Produto};
use crate::config::data_formatada::formatar;
use crate::config::database::ConnectionPool;
use crate::shared::erros::FalhaGateway;

pub type DynProdutoGateway = Arc<dyn ProdutoGateway + Send + Sync>;

#[async_trait]
pub trait ProdutoGateway {
    async fn buscar_por_id(&self, id: i32) -> Result<Option<Produto>, FalhaGateway>;
    async fn buscar_todos(&self) -> Result<Vec<Produto>, FalhaGateway>;
    async fn existe(&self, id: i32) -> Result<bool, FalhaGateway>;
    async fn codigo_em_uso(&self, codigo_produto: &str) -> Result<bool, FalhaGateway>;
    async fn nome_em_uso(&self, nome_produto: &str) -> Result<bool, FalhaGateway>;
    async fn inserir(
        &self,
        dados: &DadosProduto,
        data_insert: NaiveDateTime,
    ) -> Result<i32, FalhaGateway>;
    async fn atualizar(
        &self,
        id: i32,
        dados: &DadosProduto,
        data_update: NaiveDateTime,
    ) -> Result<u64, FalhaGateway>;
    async fn deletar(&self, id: i32) -> Result<u64, FalhaGateway>;
}

const SQL_BUSCAR_POR_ID: &str = "SELECT id, codigo_produto, nome_produto, valor_un_produto, \
     quantidade_estoque, data_insert_produto, data_update_produto FROM tb_produto WHERE id = $1";

const SQL_BUSCAR_TODOS: &str = "SELECT id, codigo_produto, nome_produto, valor_un_produto, \
     quantidade_estoque, data_insert_produto, data_update_produto FROM tb_produto ORDER BY id";

const SQL_EXISTE: &str = "SELECT EXISTS(SELECT 1 FROM tb_produto WHERE id = $1)";

const SQL_CODIGO_EM_USO: &str =
    "SELECT EXISTS(SELECT 1 FROM tb_produto WHERE codigo_produto = $1)";

const SQL_NOME_EM_USO: &str = "SELECT EXISTS(SELECT 1 FROM tb_produto WHERE nome_produto = $1)";

const SQL_INSERIR: &str = "INSERT INTO tb_produto (codigo_produto, nome_produto, \
     valor_un_produto, quantidade_estoque, data_insert_produto) VALUES ($1, $2, $3, $4, $5) \
     RETURNING id";

const SQL_ATUALIZAR: &str = "UPDATE tb_produto SET codigo_produto = $1, nome_produto = $2, \
     valor_un_produto = $3, quantidade_estoque = $4, data_update_produto = $5 WHERE id = $6 \
     AND (codigo_produto IS DISTINCT FROM $1 OR nome_produto IS DISTINCT FROM $2 \
     OR valor_un_produto IS DISTINCT FROM $3 OR quantidade_estoque IS DISTINCT FROM $4)";

const SQL_DELETAR: &str = "DELETE FROM tb_produto WHERE id = $1";

pub struct PgProdutoGateway {
    db: ConnectionPool,
}

impl PgProdutoGateway {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn parametros(dados: &DadosProduto, data: &NaiveDateTime) -> serde_json::Value {
    json!({
        "codigo_produto": dados.codigo_produto,
        "nome_produto": dados.nome_produto,
        "valor_un_produto": dados.valor_un_produto,
        "quantidade_estoque": dados.quantidade_estoque,
        "data": formatar(data),
    })
}

#[async_trait]
impl ProdutoGateway for PgProdutoGateway {
    async fn buscar_por_id(&self, id: i32) -> Result<Option<Produto>, FalhaGateway> {
        query_as::<_, Produto>(SQL_BUSCAR_POR_ID)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_BUSCAR_POR_ID, json!({ "id": id })))
    }

    async fn buscar_todos(&self) -> Result<Vec<Produto>, FalhaGateway> {
        query_as::<_, Produto>(SQL_BUSCAR_TODOS)
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

    async fn codigo_em_uso(&self, codigo_produto: &str) -> Result<bool, FalhaGateway> {
        query_scalar::<_, bool>(SQL_CODIGO_EM_USO)
            .bind(codigo_produto)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                FalhaGateway::do_sqlx(
                    e,
                    SQL_CODIGO_EM_USO,
                    json!({ "codigo_produto": codigo_produto }),
                )
            })
    }

    async fn nome_em_uso(&self, nome_produto: &str) -> Result<bool, FalhaGateway> {
        query_scalar::<_, bool>(SQL_NOME_EM_USO)
            .bind(nome_produto)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                FalhaGateway::do_sqlx(e, SQL_NOME_EM_USO, json!({ "nome_produto": nome_produto }))
            })
    }

    async fn inserir(
        &self,
        dados: &DadosProduto,
        data_insert: NaiveDateTime,
    ) -> Result<i32, FalhaGateway> {
        let row = query(SQL_INSERIR)
            .bind(&dados.codigo_produto)
            .bind(&dados.nome_produto)
            .bind(&dados.valor_un_produto)
            .bind(dados.quantidade_estoque)
            .bind(data_insert)
            .fetch_one(&self.db)
            .await
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_INSERIR, parametros(dados, &data_insert)))?;

        row.try_get::<i32, &str>("id")
            .map_err(|e| FalhaGateway::do_sqlx(e, SQL_INSERIR, parametros(dados, &data_insert)))
    }

    async fn atualizar(
        &self,
        id: i32,
        dados: &DadosProduto,
        data_update: NaiveDateTime,
    ) -> Result<u64, FalhaGateway> {
        let resultado = query(SQL_ATUALIZAR)
            .bind(&dados.codigo_produto)
            .bind(&dados.nome_produto)
            .bind(&dados.valor_un_produto)
            .bind(dados.quantidade_estoque)
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
