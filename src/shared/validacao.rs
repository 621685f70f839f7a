// src/shared/validacao.rs

use std::borrow::Cow;

use bigdecimal::{BigDecimal, Zero};
use serde_json::{json, Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use super::erros::ErroApi;

/// Valida a requisição com as regras derivadas do `validator` e com as
/// regras extras de faixa informadas por `extras`.
///
/// Campo obrigatório significa presente e não nulo: zero e texto vazio
/// contam como presentes.
pub fn validar<T, F>(dados: &T, contexto: &str, extras: F) -> Result<(), ErroApi>
where
    T: Validate,
    F: FnOnce(&mut ValidationErrors),
{
    let mut erros = match dados.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(erros) => erros,
    };
    extras(&mut erros);

    if erros.errors().is_empty() {
        return Ok(());
    }

    Err(ErroApi::validacao(format!(
        "Erro ao {contexto}! Campos obrigatórios nulos ou inválidos!"
    ))
    .com_detalhes(detalhar(&erros)))
}

/// Exige `valor >= 0` (ou `> 0` quando `estrito`). Valores ausentes ficam
/// por conta da regra `required`.
pub fn exigir_minimo_zero(
    erros: &mut ValidationErrors,
    campo: &'static str,
    valor: Option<&BigDecimal>,
    estrito: bool,
) {
    let Some(valor) = valor else {
        return;
    };

    let invalido = if estrito {
        *valor <= BigDecimal::zero()
    } else {
        *valor < BigDecimal::zero()
    };

    if invalido {
        let mut erro = ValidationError::new("range");
        erro.message = Some(Cow::from(if estrito {
            "deve ser maior que zero"
        } else {
            "não pode ser negativo"
        }));
        erros.add(campo, erro);
    }
}

/// Exige que o valor caiba em `NUMERIC(precisao, casas)` sem arredondamento:
/// no máximo `casas` dígitos decimais e `precisao - casas` dígitos inteiros.
pub fn exigir_precisao(
    erros: &mut ValidationErrors,
    campo: &'static str,
    valor: Option<&BigDecimal>,
    precisao: u32,
    casas: u32,
) {
    let Some(valor) = valor else {
        return;
    };

    if valor.with_scale(i64::from(casas)) != *valor {
        let mut erro = ValidationError::new("scale");
        erro.message = Some(Cow::from(format!("no máximo {casas} casas decimais")));
        erros.add(campo, erro);
    }

    let limite = BigDecimal::from(10_i64.pow(precisao - casas));
    if valor.abs() >= limite {
        let mut erro = ValidationError::new("range");
        erro.message = Some(Cow::from(format!("deve ser menor que {limite}")));
        erros.add(campo, erro);
    }
}

fn detalhar(erros: &ValidationErrors) -> Value {
    let mut mapa = Map::new();

    for (campo, erros_campo) in erros.field_errors() {
        let mensagens: Vec<String> = erros_campo
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match e.code.as_ref() {
                        "required" => "campo obrigatório".to_string(),
                        "range" => "valor fora da faixa".to_string(),
                        _ => format!("{campo} inválido"),
                    })
            })
            .collect();
        mapa.insert(campo.to_string(), json!(mensagens));
    }

    Value::Object(mapa)
}
