// src/processamentos/processamentos_router.rs

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use tracing::info;

use super::processamentos_structs::NovoProcessamento;
use crate::shared::shared_structs::GenericResponse;
use crate::shared::tratador_erros::tratar_erro;
use crate::AppState;

#[get("/process/{id}")]
pub async fn buscar_processamento_por_id(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> HttpResponse {
    let id = path.into_inner();

    match data.processamentos.buscar_por_id(id).await {
        Ok(processamento) => {
            info!("Processamento id {} encontrado", id);
            HttpResponse::Ok().json(GenericResponse::sucesso(
                format!("Processamento com ID {} encontrado.", id),
                processamento,
            ))
        }
        Err(erro) => tratar_erro(&req, erro),
    }
}

#[get("/process")]
pub async fn buscar_processamentos(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    match data.processamentos.buscar_todos().await {
        Ok(processamentos) => {
            info!("{} processamentos encontrados", processamentos.len());
            HttpResponse::Ok().json(GenericResponse::sucesso(
                "Processamentos listados com sucesso!",
                processamentos,
            ))
        }
        Err(erro) => tratar_erro(&req, erro),
    }
}

/// Registra um item faturável ligando comanda, produto e serviço.
/// Comanda ou produto inexistente responde 400.
#[post("/add-process")]
pub async fn cadastrar_processamento(
    req: HttpRequest,
    data: web::Data<AppState>,
    item: web::Json<NovoProcessamento>,
) -> HttpResponse {
    let dados = match item.into_inner().validar("adicionar processamento") {
        Ok(dados) => dados,
        Err(erro) => return tratar_erro(&req, erro),
    };

    let id = match data.processamentos.criar(&dados).await {
        Ok(id) => id,
        Err(erro) => return tratar_erro(&req, erro),
    };

    match data.processamentos.buscar_por_id(id).await {
        Ok(processamento) => HttpResponse::Created().json(GenericResponse::sucesso(
            "Processamento adicionado com sucesso!",
            processamento,
        )),
        Err(erro) => tratar_erro(&req, erro),
    }
}

#[put("/update-process/{id}")]
pub async fn atualizar_processamento(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i32>,
    item: web::Json<NovoProcessamento>,
) -> HttpResponse {
    let id = path.into_inner();
    let dados = match item.into_inner().validar("atualizar processamento") {
        Ok(dados) => dados,
        Err(erro) => return tratar_erro(&req, erro),
    };

    match data.processamentos.atualizar(id, &dados).await {
        Ok(atualizado) => HttpResponse::Ok().json(GenericResponse::sucesso(
            format!("Processamento com id {} atualizado com sucesso!", id),
            atualizado,
        )),
        Err(erro) => tratar_erro(&req, erro),
    }
}

#[delete("/del-process/{id}")]
pub async fn deletar_processamento(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> HttpResponse {
    let id = path.into_inner();

    match data.processamentos.deletar(id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(erro) => tratar_erro(&req, erro),
    }
}
