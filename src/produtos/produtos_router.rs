// src/produtos/produtos_router.rs

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use tracing::info;

// Importa as structs definidas no módulo `produtos_structs` dentro da mesma pasta `produtos`
use super::produtos_structs::NovoProduto;
use crate::shared::shared_structs::GenericResponse;
use crate::shared::tratador_erros::tratar_erro;

// Importa o AppState do módulo raiz (main.rs)
use crate::AppState;

/// Rota para buscar um produto por ID.
#[get("/produto/{id}")]
pub async fn buscar_produto_por_id(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> HttpResponse {
    let id = path.into_inner();

    match data.produtos.buscar_por_id(id).await {
        Ok(produto) => {
            info!("Produto id {} encontrado", id);
            HttpResponse::Ok().json(GenericResponse::sucesso(
                format!("Produto com ID {} encontrado.", id),
                produto,
            ))
        }
        Err(erro) => tratar_erro(&req, erro),
    }
}

/// Rota para buscar todos os produtos no banco de dados.
///
/// Catálogo vazio não é sucesso com lista vazia: responde 404.
#[get("/produtos")]
pub async fn buscar_produtos(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    match data.produtos.buscar_todos().await {
        Ok(produtos) => {
            info!("{} produtos encontrados", produtos.len());
            HttpResponse::Ok().json(GenericResponse::sucesso(
                "Produtos listados com sucesso!",
                produtos,
            ))
        }
        Err(erro) => tratar_erro(&req, erro),
    }
}

/// Rota para inserir um novo produto no banco de dados.
///
/// Recebe os dados do novo produto via JSON no corpo da requisição,
/// valida os campos obrigatórios e devolve o produto criado.
#[post("/add-produto")]
pub async fn cadastrar_produto(
    req: HttpRequest,
    data: web::Data<AppState>,
    item: web::Json<NovoProduto>, // O corpo da requisição JSON é desserializado para NovoProduto
) -> HttpResponse {
    let dados = match item.into_inner().validar("adicionar produto") {
        Ok(dados) => dados,
        Err(erro) => return tratar_erro(&req, erro),
    };

    let id = match data.produtos.criar(&dados).await {
        Ok(id) => id,
        Err(erro) => return tratar_erro(&req, erro),
    };

    match data.produtos.buscar_por_id(id).await {
        Ok(produto) => HttpResponse::Created().json(GenericResponse::sucesso(
            "Produto adicionado com sucesso!",
            produto,
        )),
        Err(erro) => tratar_erro(&req, erro),
    }
}

/// Rota para atualizar um produto existente.
#[put("/update-produto/{id}")]
pub async fn atualizar_produto(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i32>,
    item: web::Json<NovoProduto>,
) -> HttpResponse {
    let id = path.into_inner();
    let dados = match item.into_inner().validar("atualizar produto") {
        Ok(dados) => dados,
        Err(erro) => return tratar_erro(&req, erro),
    };

    match data.produtos.atualizar(id, &dados).await {
        Ok(atualizado) => HttpResponse::Ok().json(GenericResponse::sucesso(
            format!("Produto com id {} atualizado com sucesso!", id),
            atualizado,
        )),
        Err(erro) => tratar_erro(&req, erro),
    }
}

/// Rota para deletar um produto.
#[delete("/delete-produto/{id}")]
pub async fn deletar_produto(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i32>,
) -> HttpResponse {
    let id = path.into_inner();

    match data.produtos.deletar(id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(erro) => tratar_erro(&req, erro),
    }
}
