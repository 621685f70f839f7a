// src/comandas/comandas_repository.rs

use serde_json::json;
use tracing::info;

use super::comandas_gateway::DynComandaGateway;
use super::comandas_structs::{Comanda, ComandaAtualizada, DadosComanda, STATUS_ABERTA};
use crate::config::data_formatada::agora;
use crate::shared::erros::{ErroApi, TipoFalha};

/// Repositório de comandas: checa existência antes de alterar, garante
/// código único na criação e classifica as falhas do gateway.
pub struct ComandaRepository {
    gateway: DynComandaGateway,
}

impl ComandaRepository {
    pub fn new(gateway: DynComandaGateway) -> Self {
        Self { gateway }
    }

    pub async fn buscar_por_id(&self, id: i32) -> Result<Comanda, ErroApi> {
        self.gateway
            .buscar_por_id(id)
            .await
            .map_err(|falha| falha.classificar("buscar_comanda_por_id"))?
            .ok_or_else(|| ErroApi::nao_encontrado(format!("Comanda com id {id} nao encontrada!")))
    }

    /// Tabela vazia é erro `NaoEncontrado`, não lista vazia.
    pub async fn buscar_todas(&self) -> Result<Vec<Comanda>, ErroApi> {
        let comandas = self
            .gateway
            .buscar_todas()
            .await
            .map_err(|falha| falha.classificar("buscar_todas_comandas"))?;

        if comandas.is_empty() {
            return Err(ErroApi::nao_encontrado("Nenhuma comanda encontrada!"));
        }

        Ok(comandas)
    }

    pub async fn criar(&self, dados: &DadosComanda) -> Result<i32, ErroApi> {
        let em_uso = self
            .gateway
            .codigo_em_uso(&dados.codigo_comanda)
            .await
            .map_err(|falha| falha.classificar("criar_comanda"))?;

        if em_uso {
            return Err(codigo_duplicado("criar", &dados.codigo_comanda));
        }

        let data_abertura = agora();
        let id = self
            .gateway
            .inserir(dados, STATUS_ABERTA, data_abertura)
            .await
            .map_err(|falha| match falha.tipo {
                TipoFalha::Unicidade => codigo_duplicado("criar", &dados.codigo_comanda),
                _ => falha.classificar("criar_comanda"),
            })?;

        info!("Comanda {} criada com id {}", dados.codigo_comanda, id);
        Ok(id)
    }

    pub async fn atualizar(
        &self,
        id: i32,
        dados: &DadosComanda,
    ) -> Result<ComandaAtualizada, ErroApi> {
        self.exigir_existencia(id, "atualizar_comanda").await?;

        let data_atualizacao = agora();
        let afetadas = self
            .gateway
            .atualizar(id, dados, data_atualizacao)
            .await
            .map_err(|falha| match falha.tipo {
                TipoFalha::Unicidade => codigo_duplicado("atualizar", &dados.codigo_comanda),
                _ => falha.classificar("atualizar_comanda"),
            })?;

        if afetadas == 0 {
            return Err(ErroApi::sem_alteracao(format!(
                "Nenhuma alteração foi feita nos dados da comanda: {id}"
            )));
        }

        info!("Comanda com id {} atualizada", id);
        Ok(ComandaAtualizada {
            id,
            codigo_comanda: dados.codigo_comanda.clone(),
            valor_total: dados.valor_total.clone(),
            data_atualizacao_comanda: data_atualizacao,
        })
    }

    pub async fn deletar(&self, id: i32) -> Result<(), ErroApi> {
        self.exigir_existencia(id, "deletar_comanda").await?;

        let afetadas = self
            .gateway
            .deletar(id)
            .await
            .map_err(|falha| match falha.tipo {
                TipoFalha::ChaveEstrangeira => ErroApi::conflito(format!(
                    "Erro ao deletar! Comanda com id {id} possui processamentos vinculados."
                )),
                _ => falha.classificar("deletar_comanda"),
            })?;

        // A linha sumiu entre a checagem e o DELETE.
        if afetadas == 0 {
            return Err(ErroApi::nao_encontrado(format!(
                "Verifique se a comanda com id {id} existe."
            )));
        }

        info!("Comanda com id {} deletada", id);
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
                "Comanda com id {id} nao encontrada!"
            )));
        }

        Ok(())
    }
}

fn codigo_duplicado(acao: &str, codigo_comanda: &str) -> ErroApi {
    ErroApi::conflito(format!(
        "Erro ao {acao} comanda! Comanda com codigo {codigo_comanda} ja existe!"
    ))
    .com_detalhes(json!({ "codigo_comanda": codigo_comanda }))
}
