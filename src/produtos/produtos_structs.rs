// src/produtos/produtos_structs.rs

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::config::data_formatada::{formato_data, formato_data_opcional};
use crate::shared::erros::ErroApi;
use crate::shared::shared_structs::formato_decimal;
use crate::shared::validacao::{exigir_minimo_zero, exigir_precisao, validar};

/// Estrutura que representa um produto no banco de dados
/// Deriva FromRow para mapeamento direto de resultados de query SQL
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Produto {
    pub id: i32,
    pub codigo_produto: String,
    pub nome_produto: String,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub valor_un_produto: BigDecimal,
    pub quantidade_estoque: i32,
    #[serde(serialize_with = "formato_data::serialize")]
    pub data_insert_produto: NaiveDateTime,
    #[serde(serialize_with = "formato_data_opcional::serialize")]
    pub data_update_produto: Option<NaiveDateTime>,
}

/// Estrutura para receber dados do produto nas requisições POST/PUT
#[derive(Debug, Deserialize, Validate)]
pub struct NovoProduto {
    #[validate(
        required(message = "codigo_produto é obrigatório"),
        length(max = 50, message = "no máximo 50 caracteres")
    )]
    pub codigo_produto: Option<String>,
    #[validate(
        required(message = "nome_produto é obrigatório"),
        length(max = 150, message = "no máximo 150 caracteres")
    )]
    pub nome_produto: Option<String>,
    #[validate(required(message = "valor_un_produto é obrigatório"))]
    pub valor_un_produto: Option<BigDecimal>,
    #[validate(
        required(message = "quantidade_estoque é obrigatório"),
        range(min = 0, message = "não pode ser negativo")
    )]
    pub quantidade_estoque: Option<i32>,
}

impl NovoProduto {
    pub fn validar(self, contexto: &str) -> Result<DadosProduto, ErroApi> {
        validar(&self, contexto, |erros| {
            exigir_minimo_zero(erros, "valor_un_produto", self.valor_un_produto.as_ref(), true);
            exigir_precisao(erros, "valor_un_produto", self.valor_un_produto.as_ref(), 12, 2);
        })?;

        match (
            self.codigo_produto,
            self.nome_produto,
            self.valor_un_produto,
            self.quantidade_estoque,
        ) {
            (
                Some(codigo_produto),
                Some(nome_produto),
                Some(valor_un_produto),
                Some(quantidade_estoque),
            ) => Ok(DadosProduto {
                codigo_produto,
                nome_produto,
                valor_un_produto,
                quantidade_estoque,
            }),
            _ => Err(ErroApi::validacao(format!(
                "Erro ao {contexto}! Campos obrigatórios nulos!"
            ))),
        }
    }
}

/// Campos de um produto já validados.
#[derive(Debug, Clone, Serialize)]
pub struct DadosProduto {
    pub codigo_produto: String,
    pub nome_produto: String,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub valor_un_produto: BigDecimal,
    pub quantidade_estoque: i32,
}

/// Resposta da atualização de produto
#[derive(Debug, Serialize)]
pub struct ProdutoAtualizado {
    pub id: i32,
    pub codigo_produto: String,
    pub nome_produto: String,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub valor_un_produto: BigDecimal,
    pub quantidade_estoque: i32,
    #[serde(serialize_with = "formato_data::serialize")]
    pub data_update_produto: NaiveDateTime,
}
