// src/comandas/comandas_router.rs

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use tracing::info;

use super::comandas_structs::NovaComanda;
use crate::shared::shared_structs::GenericResponse;
use crate::shared::tratador_erros::tratar_erro;
use crate::AppState;

/// Rota para buscar uma comanda por ID.
#[get("/comanda/{id}")]
pub async fn buscar_comanda_por_id(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> HttpResponse {
    let id = path.into_inner();

    match data.comandas.buscar_por_id(id).await {
        Ok(comanda) => {
            info!("Comanda id {} encontrada", id);
            HttpResponse::Ok().json(GenericResponse::sucesso(
                format!("Comanda com ID {} encontrada.", id),
                comanda,
            ))
        }
        Err(erro) => tratar_erro(&req, erro),
    }
}

/// Rota para buscar todas as comandas. Sem comandas cadastradas responde 404.
#[get("/comandas")]
pub async fn buscar_comandas(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    match data.comandas.buscar_todas().await {
        Ok(comandas) => {
            info!("{} comandas encontradas", comandas.len());
            HttpResponse::Ok().json(GenericResponse::sucesso(
                "Comandas listadas com sucesso!",
                comandas,
            ))
        }
        Err(erro) => tratar_erro(&req, erro),
    }
}

/// Rota para abrir uma nova comanda.
///
/// Valida os campos obrigatórios antes de qualquer acesso ao banco,
/// cria a comanda e devolve o registro recém-criado.
#[post("/add-comanda")]
pub async fn cadastrar_comanda(
    req: HttpRequest,
    data: web::Data<AppState>,
    item: web::Json<NovaComanda>,
) -> HttpResponse {
    let dados = match item.into_inner().validar("criar comanda") {
        Ok(dados) => dados,
        Err(erro) => return tratar_erro(&req, erro),
    };

    let id = match data.comandas.criar(&dados).await {
        Ok(id) => id,
        Err(erro) => return tratar_erro(&req, erro),
    };

    match data.comandas.buscar_por_id(id).await {
        Ok(comanda) => HttpResponse::Created().json(GenericResponse::sucesso(
            "Comanda criada com sucesso!",
            comanda,
        )),
        Err(erro) => tratar_erro(&req, erro),
    }
}

/// Rota para atualizar uma comanda existente.
#[put("/update-comanda/{id}")]
pub async fn atualizar_comanda(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i32>,
    item: web::Json<NovaComanda>,
) -> HttpResponse {
    let id = path.into_inner();
    let dados = match item.into_inner().validar("atualizar comanda") {
        Ok(dados) => dados,
        Err(erro) => return tratar_erro(&req, erro),
    };

    match data.comandas.atualizar(id, &dados).await {
        Ok(atualizada) => HttpResponse::Ok().json(GenericResponse::sucesso(
            format!("Comanda com id {} atualizada com sucesso!", id),
            atualizada,
        )),
        Err(erro) => tratar_erro(&req, erro),
    }
}

/// Rota para deletar uma comanda.
#[delete("/delete-comanda/{id}")]
pub async fn deletar_comanda(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> HttpResponse {
    let id = path.into_inner();

    match data.comandas.deletar(id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(erro) => tratar_erro(&req, erro),
    }
}
