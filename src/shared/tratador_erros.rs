// src/shared/tratador_erros.rs

use actix_web::{
    error::{InternalError, JsonPayloadError, PathError},
    HttpRequest, HttpResponse,
};
use serde_json::Value;
use tracing::{error, warn};

use super::erros::ErroApi;
use super::shared_structs::ErroResponse;

const MENSAGEM_ERRO_INTERNO: &str = "Erro interno no servidor";

/// Ponto único de tradução de um erro classificado em resposta HTTP.
///
/// Registra o erro antes de responder (`warn` para 4xx, `error` para 5xx),
/// sempre com o método e a rota da requisição. Em erros 5xx a mensagem vira
/// genérica e os detalhes ficam apenas no log.
pub fn tratar_erro(req: &HttpRequest, erro: ErroApi) -> HttpResponse {
    let status = erro.status();
    let detalhes = erro.detalhes.as_ref().map(Value::to_string).unwrap_or_default();

    if status.is_server_error() {
        error!(
            metodo = %req.method(),
            rota = %req.path(),
            tipo = %erro.tipo,
            detalhes = %detalhes,
            "Erro {}: {} - Rota: {} {}",
            status.as_u16(),
            erro.mensagem,
            req.method(),
            req.path()
        );

        return HttpResponse::build(status).json(ErroResponse {
            message: MENSAGEM_ERRO_INTERNO.to_string(),
            details: None,
        });
    }

    warn!(
        metodo = %req.method(),
        rota = %req.path(),
        tipo = %erro.tipo,
        "Erro {}: {} - Rota: {} {}",
        status.as_u16(),
        erro.mensagem,
        req.method(),
        req.path()
    );

    // Sem detalhes próprios, o campo repete a mensagem
    let details = erro
        .detalhes
        .unwrap_or_else(|| Value::String(erro.mensagem.clone()));

    HttpResponse::build(status).json(ErroResponse {
        message: erro.mensagem,
        details: Some(details),
    })
}

/// Corpo JSON ilegível ou com tipos errados vira erro de validação.
pub fn erro_corpo_json(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let erro = ErroApi::validacao("Corpo da requisição inválido!")
        .com_detalhes(Value::String(err.to_string()));
    let resposta = tratar_erro(req, erro);
    InternalError::from_response(err, resposta).into()
}

/// Identificador de rota que não é um inteiro vira erro de validação.
pub fn erro_caminho(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let erro = ErroApi::validacao(format!("Identificador inválido na rota {}!", req.path()));
    let resposta = tratar_erro(req, erro);
    InternalError::from_response(err, resposta).into()
}
