// src/shared/shared_structs.rs

use serde::Serialize;
use serde_json::Value;

/// Estrutura genérica para padronizar as respostas de sucesso da API.
/// 'T' é o tipo do corpo da resposta, que pode ser opcional.
#[derive(Serialize)]
pub struct GenericResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")] // Não serializa 'body' se for None
    pub body: Option<T>,
}

impl<T> GenericResponse<T> {
    pub fn sucesso(message: impl Into<String>, body: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            body: Some(body),
        }
    }
}

/// Corpo das respostas de erro montadas pelo tradutor de erros.
#[derive(Serialize)]
pub struct ErroResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Serializa `BigDecimal` sem os zeros à direita que a escala da coluna
/// acrescenta na leitura (`3.5000` sai como `3.5`).
pub mod formato_decimal {
    use bigdecimal::BigDecimal;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(valor: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&valor.normalized())
    }
}
