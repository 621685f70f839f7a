// src/shared/erros.rs

use std::fmt;

use actix_web::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

// SQLSTATEs do PostgreSQL tratados de forma específica
const SQLSTATE_UNICIDADE: &str = "23505";
const SQLSTATE_CHAVE_ESTRANGEIRA: &str = "23503";
const SQLSTATE_RESTRICAO: &str = "23514";
// Texto longo demais para a coluna e número fora da precisão
const SQLSTATE_TEXTO_LONGO: &str = "22001";
const SQLSTATE_NUMERO_FORA_DA_FAIXA: &str = "22003";

/// Tipo de falha reportada pelo gateway de persistência.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoFalha {
    Unicidade,
    ChaveEstrangeira,
    Restricao,
    Outra,
}

impl TipoFalha {
    pub fn do_sqlstate(codigo: &str) -> Self {
        match codigo {
            SQLSTATE_UNICIDADE => TipoFalha::Unicidade,
            SQLSTATE_CHAVE_ESTRANGEIRA => TipoFalha::ChaveEstrangeira,
            SQLSTATE_RESTRICAO | SQLSTATE_TEXTO_LONGO | SQLSTATE_NUMERO_FORA_DA_FAIXA => {
                TipoFalha::Restricao
            }
            _ => TipoFalha::Outra,
        }
    }
}

/// Falha de baixo nível do gateway. Guarda a instrução e os parâmetros
/// para diagnóstico; nunca é enviada ao cliente como está.
#[derive(Debug, Error)]
#[error("{mensagem}")]
pub struct FalhaGateway {
    pub tipo: TipoFalha,
    pub mensagem: String,
    pub instrucao: &'static str,
    pub parametros: Value,
}

impl FalhaGateway {
    pub fn nova(
        tipo: TipoFalha,
        mensagem: impl Into<String>,
        instrucao: &'static str,
        parametros: Value,
    ) -> Self {
        Self {
            tipo,
            mensagem: mensagem.into(),
            instrucao,
            parametros,
        }
    }

    /// Converte um erro do sqlx, reconhecendo as violações de restrição pelo SQLSTATE.
    pub fn do_sqlx(erro: sqlx::Error, instrucao: &'static str, parametros: Value) -> Self {
        let tipo = match erro.as_database_error().and_then(|db| db.code()) {
            Some(codigo) => TipoFalha::do_sqlstate(codigo.as_ref()),
            None => TipoFalha::Outra,
        };

        Self::nova(tipo, erro.to_string(), instrucao, parametros)
    }

    /// Classificação padrão da falha. Os repositórios tratam antes os casos
    /// em que precisam de uma mensagem mais específica.
    pub fn classificar(self, operacao: &str) -> ErroApi {
        match self.tipo {
            TipoFalha::Unicidade => ErroApi::conflito(format!(
                "Erro em {operacao}! Já existe um registro com os mesmos dados únicos."
            )),
            TipoFalha::ChaveEstrangeira => ErroApi::validacao(format!(
                "Erro em {operacao}! Registro referenciado não existe."
            )),
            TipoFalha::Restricao => ErroApi::validacao(format!(
                "Erro em {operacao}! Valores fora das faixas permitidas."
            )),
            TipoFalha::Outra => {
                error!("Falha no banco em {}: {}", operacao, self.mensagem);
                ErroApi::acesso_dados(
                    format!("Erro de acesso a dados em {operacao}: {}", self.mensagem),
                    json!({
                        "operacao": operacao,
                        "instrucao": self.instrucao,
                        "parametros": self.parametros,
                        "erro": self.mensagem,
                    }),
                )
            }
        }
    }
}

/// Categoria de um erro classificado. Define o status HTTP da resposta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoErro {
    Validacao,
    NaoEncontrado,
    Conflito,
    SemAlteracao,
    AcessoDados,
}

impl TipoErro {
    pub fn status(self) -> StatusCode {
        match self {
            TipoErro::Validacao => StatusCode::BAD_REQUEST,
            TipoErro::NaoEncontrado => StatusCode::NOT_FOUND,
            TipoErro::Conflito => StatusCode::BAD_REQUEST,
            TipoErro::SemAlteracao => StatusCode::BAD_REQUEST,
            TipoErro::AcessoDados => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn nome(self) -> &'static str {
        match self {
            TipoErro::Validacao => "ValidationError",
            TipoErro::NaoEncontrado => "NotFound",
            TipoErro::Conflito => "ConflictError",
            TipoErro::SemAlteracao => "NoChangeError",
            TipoErro::AcessoDados => "DataAccessError",
        }
    }
}

impl fmt::Display for TipoErro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nome())
    }
}

/// Erro classificado, único para os três recursos da API.
#[derive(Debug, Error)]
#[error("{tipo}: {mensagem}")]
pub struct ErroApi {
    pub tipo: TipoErro,
    pub mensagem: String,
    pub detalhes: Option<Value>,
}

impl ErroApi {
    pub fn new(tipo: TipoErro, mensagem: impl Into<String>) -> Self {
        Self {
            tipo,
            mensagem: mensagem.into(),
            detalhes: None,
        }
    }

    pub fn validacao(mensagem: impl Into<String>) -> Self {
        Self::new(TipoErro::Validacao, mensagem)
    }

    pub fn nao_encontrado(mensagem: impl Into<String>) -> Self {
        Self::new(TipoErro::NaoEncontrado, mensagem)
    }

    pub fn conflito(mensagem: impl Into<String>) -> Self {
        Self::new(TipoErro::Conflito, mensagem)
    }

    pub fn sem_alteracao(mensagem: impl Into<String>) -> Self {
        Self::new(TipoErro::SemAlteracao, mensagem)
    }

    pub fn acesso_dados(mensagem: impl Into<String>, detalhes: Value) -> Self {
        Self::new(TipoErro::AcessoDados, mensagem).com_detalhes(detalhes)
    }

    pub fn com_detalhes(mut self, detalhes: Value) -> Self {
        self.detalhes = Some(detalhes);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.tipo.status()
    }
}
