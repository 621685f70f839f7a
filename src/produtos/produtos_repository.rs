// src/produtos/produtos_repository.rs

use serde_json::json;
use tracing::info;

use super::produtos_gateway::DynProdutoGateway;
use super::produtos_structs::{DadosProduto, Produto, ProdutoAtualizado};
use crate::config::data_formatada::agora;
use crate::shared::erros::{ErroApi, TipoFalha};

/// Repositório de produtos. Código e nome são chaves naturais: ambos
/// precisam ser únicos em toda a tabela.
pub struct ProdutoRepository {
    gateway: DynProdutoGateway,
}

impl ProdutoRepository {
    pub fn new(gateway: DynProdutoGateway) -> Self {
        Self { gateway }
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<Produto, ErroApi> {
        self.gateway
            .buscar_por_id(id)
            .await
            .map_err(|falha| falha.classificar("buscar_produto_por_id"))?
            .ok_or_else(|| ErroApi::nao_encontrado(format!("Produto com id {id} nao encontrado!")))
    }

    pub async fn buscar_todos(&self) -> Result<Vec<Produto>, ErroApi> {
        let produtos = self
            .gateway
            .buscar_todos()
            .await
            .map_err(|falha| falha.classificar("buscar_todos_produtos"))?;

        if produtos.is_empty() {
            return Err(ErroApi::nao_encontrado("Nenhum produto encontrado!"));
        }

        Ok(produtos)
    }

    pub async fn criar(&self, dados: &DadosProduto) -> Result<i32, ErroApi> {
        let codigo_em_uso = self
            .gateway
            .codigo_em_uso(&dados.codigo_produto)
            .await
            .map_err(|falha| falha.classificar("criar_produto"))?;

        if codigo_em_uso {
            return Err(ErroApi::conflito(format!(
                "Erro ao adicionar produto! Produto com codigo {} ja existe!",
                dados.codigo_produto
            ))
            .com_detalhes(json!({ "codigo_produto": dados.codigo_produto })));
        }

        let nome_em_uso = self
            .gateway
            .nome_em_uso(&dados.nome_produto)
            .await
            .map_err(|falha| falha.classificar("criar_produto"))?;

        if nome_em_uso {
            return Err(ErroApi::conflito(format!(
                "Erro ao adicionar produto! Produto com nome {} ja existe!",
                dados.nome_produto
            ))
            .com_detalhes(json!({ "nome_produto": dados.nome_produto })));
        }

        let data_insert = agora();
        let id = self
            .gateway
            .inserir(dados, data_insert)
            .await
            .map_err(|falha| match falha.tipo {
                TipoFalha::Unicidade => chave_duplicada("adicionar", dados),
                _ => falha.classificar("criar_produto"),
            })?;

        info!("Produto {} ({}) criado com id {}", dados.codigo_produto, dados.nome_produto, id);
        Ok(id)
    }

    pub async fn atualizar(
        &self,
        id: i32,
        dados: &DadosProduto,
    ) -> Result<ProdutoAtualizado, ErroApi> {
        self.exigir_existencia(id, "atualizar_produto").await?;

        let data_update = agora();
        let afetadas = self
            .gateway
            .atualizar(id, dados, data_update)
            .await
            .map_err(|falha| match falha.tipo {
                TipoFalha::Unicidade => chave_duplicada("atualizar", dados),
                _ => falha.classificar("atualizar_produto"),
            })?;

        if afetadas == 0 {
            return Err(ErroApi::sem_alteracao(format!(
                "Nenhuma alteração foi feita nos dados do produto: {id}"
            )));
        }

        info!("Produto com id {} atualizado", id);
        Ok(ProdutoAtualizado {
            id,
            codigo_produto: dados.codigo_produto.clone(),
            nome_produto: dados.nome_produto.clone(),
            valor_un_produto: dados.valor_un_produto.clone(),
            quantidade_estoque: dados.quantidade_estoque,
            data_update_produto: data_update,
        })
    }

    pub async fn deletar(&self, id: i32) -> Result<(), ErroApi> {
        self.exigir_existencia(id, "deletar_produto").await?;

        let afetadas = self
            .gateway
            .deletar(id)
            .await
            .map_err(|falha| match falha.tipo {
                TipoFalha::ChaveEstrangeira => ErroApi::conflito(format!(
                    "Erro ao deletar! Produto com id {id} possui processamentos vinculados."
                )),
                _ => falha.classificar("deletar_produto"),
            })?;

        if afetadas == 0 {
            return Err(ErroApi::nao_encontrado(format!(
                "Verifique se o produto com id {id} existe."
            )));
        }

        info!("Produto com id {} deletado", id);
        Ok(())
    }

    async fn exigir_existencia(&self, id: i32, operacao: &str) -> Result<(), ErroApi> {
        let existe = self
            .gateway
            .existe(id)
            .await
            .map_err(|falha| falha.classificar(operacao))?;

        if !existe {
            return Err(ErroApi::nao_encontrado(format!(
                "Produto com id {id} nao encontrado!"
            )));
        }

        Ok(())
    }
}

// Violação de unicidade vinda do banco: não dá para saber qual das duas chaves.
fn chave_duplicada(acao: &str, dados: &DadosProduto) -> ErroApi {
    ErroApi::conflito(format!(
        "Erro ao {acao} produto! Codigo ou nome de produto ja existe!"
    ))
    .com_detalhes(json!({
        "codigo_produto": dados.codigo_produto,
        "nome_produto": dados.nome_produto,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::banco_memoria::BancoMemoria;
    use crate::shared::erros::TipoErro;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;
    use std::sync::Arc;

    fn repositorio() -> (Arc<BancoMemoria>, ProdutoRepository) {
        let banco = Arc::new(BancoMemoria::default());
        let repo = ProdutoRepository::new(banco.clone());
        (banco, repo)
    }

    fn produto(codigo: &str, nome: &str, valor: &str, estoque: i32) -> DadosProduto {
        DadosProduto {
            codigo_produto: codigo.to_string(),
            nome_produto: nome.to_string(),
            valor_un_produto: BigDecimal::from_str(valor).expect("decimal"),
            quantidade_estoque: estoque,
        }
    }

    #[actix_web::test]
    async fn codigo_repetido_gera_conflito_e_mantem_um_produto() {
        let (_, repo) = repositorio();
        repo.criar(&produto("01", "Coca-Cola 600ml", "3.50", 10))
            .await
            .expect("criação");

        let erro = repo
            .criar(&produto("01", "Fanta", "3.50", 10))
            .await
            .expect_err("código duplicado");

        assert_eq!(erro.tipo, TipoErro::Conflito);
        assert!(erro.mensagem.contains("codigo 01"));
        let todos = repo.buscar_todos().await.expect("listagem");
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].codigo_produto, "01");
    }

    #[actix_web::test]
    async fn nome_repetido_tambem_gera_conflito() {
        let (banco, repo) = repositorio();
        repo.criar(&produto("01", "Coca-Cola 600ml", "3.50", 10))
            .await
            .expect("criação");

        let erro = repo
            .criar(&produto("02", "Coca-Cola 600ml", "4.00", 5))
            .await
            .expect_err("nome duplicado");

        assert_eq!(erro.tipo, TipoErro::Conflito);
        assert!(erro.mensagem.contains("nome Coca-Cola 600ml"));
        assert_eq!(banco.total_produtos(), 1);
    }

    #[actix_web::test]
    async fn criar_e_buscar_preserva_campos_e_data() {
        let (_, repo) = repositorio();

        let id = repo
            .criar(&produto("01", "Coca-Cola 600ml", "3.50", 10))
            .await
            .expect("criação");
        let salvo = repo.buscar_por_id(id).await.expect("busca");

        assert_eq!(salvo.nome_produto, "Coca-Cola 600ml");
        assert_eq!(salvo.valor_un_produto, BigDecimal::from_str("3.5").expect("decimal"));
        assert_eq!(salvo.quantidade_estoque, 10);
        assert!(salvo.data_update_produto.is_none());
    }

    #[actix_web::test]
    async fn atualizar_para_codigo_de_outro_produto_gera_conflito() {
        let (_, repo) = repositorio();
        repo.criar(&produto("01", "Coca-Cola 600ml", "3.50", 10))
            .await
            .expect("primeiro");
        let id = repo
            .criar(&produto("02", "Fanta", "3.00", 8))
            .await
            .expect("segundo");

        let erro = repo
            .atualizar(id, &produto("01", "Fanta", "3.00", 8))
            .await
            .expect_err("colisão no banco");

        assert_eq!(erro.tipo, TipoErro::Conflito);
    }

    #[actix_web::test]
    async fn atualizar_sem_mudanca_gera_sem_alteracao() {
        let (_, repo) = repositorio();
        let dados = produto("01", "Coca-Cola 600ml", "3.50", 10);
        let id = repo.criar(&dados).await.expect("criação");

        let erro = repo.atualizar(id, &dados).await.expect_err("sem mudança");

        assert_eq!(erro.tipo, TipoErro::SemAlteracao);
    }

    #[actix_web::test]
    async fn produto_com_processamento_nao_pode_ser_deletado() {
        let (banco, repo) = repositorio();
        let id = repo
            .criar(&produto("01", "Coca-Cola 600ml", "3.50", 10))
            .await
            .expect("criação");
        banco.vincular_processamento_ao_produto(id);

        let erro = repo.deletar(id).await.expect_err("vinculado");

        assert_eq!(erro.tipo, TipoErro::Conflito);
        assert_eq!(banco.total_produtos(), 1);
    }

    #[actix_web::test]
    async fn deletar_inexistente_e_nao_encontrado() {
        let (_, repo) = repositorio();

        assert_eq!(repo.deletar(3).await.expect_err("inexistente").tipo, TipoErro::NaoEncontrado);
    }

    #[actix_web::test]
    async fn exclusao_sem_linhas_afetadas_apos_checagem_e_nao_encontrado() {
        let (banco, repo) = repositorio();
        let id = repo
            .criar(&produto("01", "Coca-Cola 600ml", "3.50", 10))
            .await
            .expect("criação");
        banco.simular_remocao_concorrente(true);

        assert_eq!(repo.deletar(id).await.expect_err("sumiu").tipo, TipoErro::NaoEncontrado);
    }
}
