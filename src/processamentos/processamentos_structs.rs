// src/processamentos/processamentos_structs.rs

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::config::data_formatada::{formato_data, formato_data_opcional};
use crate::shared::erros::ErroApi;
use crate::shared::shared_structs::formato_decimal;
use crate::shared::validacao::{exigir_minimo_zero, exigir_precisao, validar};

/// Item faturável: liga uma comanda, um produto e um serviço externo.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Processamento {
    pub id: i32,
    pub comanda_id: i32,
    pub produto_id: i32,
    pub servico_id: i32,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub quantidade_servico: BigDecimal,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub quantidade_produto: BigDecimal,
    #[serde(serialize_with = "formato_data::serialize")]
    pub data_abertura_processamento: NaiveDateTime,
    #[serde(serialize_with = "formato_data_opcional::serialize")]
    pub data_update_processamento: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NovoProcessamento {
    #[validate(required(message = "comanda_id é obrigatório"))]
    pub comanda_id: Option<i32>,
    #[validate(required(message = "produto_id é obrigatório"))]
    pub produto_id: Option<i32>,
    #[validate(required(message = "servico_id é obrigatório"))]
    pub servico_id: Option<i32>,
    #[validate(required(message = "quantidade_servico é obrigatório"))]
    pub quantidade_servico: Option<BigDecimal>,
    #[validate(required(message = "quantidade_produto é obrigatório"))]
    pub quantidade_produto: Option<BigDecimal>,
}

impl NovoProcessamento {
    pub fn validar(self, contexto: &str) -> Result<DadosProcessamento, ErroApi> {
        validar(&self, contexto, |erros| {
            exigir_minimo_zero(erros, "quantidade_servico", self.quantidade_servico.as_ref(), false);
            exigir_minimo_zero(erros, "quantidade_produto", self.quantidade_produto.as_ref(), false);
            // Quantidades são NUMERIC(12, 3)
            exigir_precisao(erros, "quantidade_servico", self.quantidade_servico.as_ref(), 12, 3);
            exigir_precisao(erros, "quantidade_produto", self.quantidade_produto.as_ref(), 12, 3);
        })?;

        match (
            self.comanda_id,
            self.produto_id,
            self.servico_id,
            self.quantidade_servico,
            self.quantidade_produto,
        ) {
            (
                Some(comanda_id),
                Some(produto_id),
                Some(servico_id),
                Some(quantidade_servico),
                Some(quantidade_produto),
            ) => Ok(DadosProcessamento {
                comanda_id,
                produto_id,
                servico_id,
                quantidade_servico,
                quantidade_produto,
            }),
            _ => Err(ErroApi::validacao(format!(
                "Erro ao {contexto}! Campos obrigatórios nulos!"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DadosProcessamento {
    pub comanda_id: i32,
    pub produto_id: i32,
    pub servico_id: i32,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub quantidade_servico: BigDecimal,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub quantidade_produto: BigDecimal,
}

#[derive(Debug, Serialize)]
pub struct ProcessamentoAtualizado {
    pub id: i32,
    pub comanda_id: i32,
    pub produto_id: i32,
    pub servico_id: i32,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub quantidade_servico: BigDecimal,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub quantidade_produto: BigDecimal,
    #[serde(serialize_with = "formato_data::serialize")]
    pub data_update_processamento: NaiveDateTime,
}
