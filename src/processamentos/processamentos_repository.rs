// src/processamentos/processamentos_repository.rs

use tracing::info;

use super::processamentos_gateway::DynProcessamentoGateway;
use super::processamentos_structs::{DadosProcessamento, Processamento, ProcessamentoAtualizado};
use crate::config::data_formatada::agora;
use crate::shared::erros::{ErroApi, TipoFalha};

/// Repositório de processamentos. Não há chave natural; comanda e produto
/// referenciados são garantidos pelas chaves estrangeiras do banco.
pub struct ProcessamentoRepository {
    gateway: DynProcessamentoGateway,
}

impl ProcessamentoRepository {
    pub fn new(gateway: DynProcessamentoGateway) -> Self {
        Self { gateway }
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<Processamento, ErroApi> {
        self.gateway
            .buscar_por_id(id)
            .await
            .map_err(|falha| falha.classificar("buscar_processamento_por_id"))?
            .ok_or_else(|| {
                ErroApi::nao_encontrado(format!("Processamento com id {id} nao encontrado!"))
            })
    }

    pub async fn buscar_todos(&self) -> Result<Vec<Processamento>, ErroApi> {
        let processamentos = self
            .gateway
            .buscar_todos()
            .await
            .map_err(|falha| falha.classificar("buscar_todos_processamentos"))?;

        if processamentos.is_empty() {
            return Err(ErroApi::nao_encontrado("Nenhum processamento encontrado!"));
        }

        Ok(processamentos)
    }

    pub async fn criar(&self, dados: &DadosProcessamento) -> Result<i32, ErroApi> {
        let data_abertura = agora();
        let id = self
            .gateway
            .inserir(dados, data_abertura)
            .await
            .map_err(|falha| match falha.tipo {
                TipoFalha::ChaveEstrangeira => referencia_invalida("adicionar", dados),
                _ => falha.classificar("criar_processamento"),
            })?;

        info!(
            "Processamento {} criado (comanda {}, produto {})",
            id, dados.comanda_id, dados.produto_id
        );
        Ok(id)
    }

    pub async fn atualizar(
        &self,
        id: i32,
        dados: &DadosProcessamento,
    ) -> Result<ProcessamentoAtualizado, ErroApi> {
        let existe = self
            .gateway
            .existe(id)
            .await
            .map_err(|falha| falha.classificar("atualizar_processamento"))?;

        if !existe {
            return Err(ErroApi::nao_encontrado(format!(
                "Processamento com id {id} não encontrado!"
            )));
        }

        let data_update = agora();
        let afetadas = self
            .gateway
            .atualizar(id, dados, data_update)
            .await
            .map_err(|falha| match falha.tipo {
                TipoFalha::ChaveEstrangeira => referencia_invalida("atualizar", dados),
                _ => falha.classificar("atualizar_processamento"),
            })?;

        if afetadas == 0 {
            return Err(ErroApi::sem_alteracao(format!(
                "Nenhuma alteração foi feita nos dados do processamento: {id}"
            )));
        }

        info!("Processamento com id {} atualizado", id);
        Ok(ProcessamentoAtualizado {
            id,
            comanda_id: dados.comanda_id,
            produto_id: dados.produto_id,
            servico_id: dados.servico_id,
            quantidade_servico: dados.quantidade_servico.clone(),
            quantidade_produto: dados.quantidade_produto.clone(),
            data_update_processamento: data_update,
        })
    }

    pub async fn deletar(&self, id: i32) -> Result<(), ErroApi> {
        let existe = self
            .gateway
            .existe(id)
            .await
            .map_err(|falha| falha.classificar("deletar_processamento"))?;

        if !existe {
            return Err(ErroApi::nao_encontrado(format!(
                "Erro ao deletar! Processamento não encontrado com id {id}!"
            )));
        }

        let afetadas = self
            .gateway
            .deletar(id)
            .await
            .map_err(|falha| falha.classificar("deletar_processamento"))?;

        if afetadas == 0 {
            return Err(ErroApi::nao_encontrado(format!(
                "Verifique se o processamento com id {id} existe."
            )));
        }

        info!("Processamento com id {} deletado", id);
        Ok(())
    }
}

fn referencia_invalida(acao: &str, dados: &DadosProcessamento) -> ErroApi {
    ErroApi::validacao(format!(
        "Erro ao {acao} processamento! Comanda {} ou produto {} inexistente.",
        dados.comanda_id, dados.produto_id
    ))
}
