// src/comandas/comandas_structs.rs

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::config::data_formatada::{formato_data, formato_data_opcional};
use crate::shared::erros::ErroApi;
use crate::shared::shared_structs::formato_decimal;
use crate::shared::validacao::{exigir_minimo_zero, exigir_precisao, validar};

/// Status gravado em toda comanda recém-aberta.
pub const STATUS_ABERTA: &str = "OPEN";

/// Estrutura que representa uma comanda no banco de dados
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comanda {
    pub id: i32,
    pub codigo_comanda: String,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub valor_total: BigDecimal,
    #[serde(serialize_with = "formato_data::serialize")]
    pub data_abertura_comanda: NaiveDateTime,
    #[serde(serialize_with = "formato_data_opcional::serialize")]
    pub data_atualizacao_comanda: Option<NaiveDateTime>,
    pub status: String,
}

/// Corpo das requisições de criação e atualização de comanda.
/// Os campos são opcionais para que a ausência vire erro de validação.
#[derive(Debug, Deserialize, Validate)]
pub struct NovaComanda {
    #[validate(
        required(message = "codigo_comanda é obrigatório"),
        length(max = 50, message = "no máximo 50 caracteres")
    )]
    pub codigo_comanda: Option<String>,
    #[validate(required(message = "valor_total é obrigatório"))]
    pub valor_total: Option<BigDecimal>,
}

impl NovaComanda {
    pub fn validar(self, contexto: &str) -> Result<DadosComanda, ErroApi> {
        validar(&self, contexto, |erros| {
            exigir_minimo_zero(erros, "valor_total", self.valor_total.as_ref(), false);
            // tb_comanda.valor_total é NUMERIC(12, 2)
            exigir_precisao(erros, "valor_total", self.valor_total.as_ref(), 12, 2);
        })?;

        match (self.codigo_comanda, self.valor_total) {
            (Some(codigo_comanda), Some(valor_total)) => Ok(DadosComanda {
                codigo_comanda,
                valor_total,
            }),
            _ => Err(ErroApi::validacao(format!(
                "Erro ao {contexto}! Campos obrigatórios nulos!"
            ))),
        }
    }
}

/// Campos de uma comanda já validados.
#[derive(Debug, Clone, Serialize)]
pub struct DadosComanda {
    pub codigo_comanda: String,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub valor_total: BigDecimal,
}

/// Retrato devolvido pela atualização: os valores recebidos mais a data
/// de atualização, sem reler a linha.
#[derive(Debug, Serialize)]
pub struct ComandaAtualizada {
    pub id: i32,
    pub codigo_comanda: String,
    #[serde(serialize_with = "formato_decimal::serialize")]
    pub valor_total: BigDecimal,
    #[serde(serialize_with = "formato_data::serialize")]
    pub data_atualizacao_comanda: NaiveDateTime,
}
