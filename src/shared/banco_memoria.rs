// src/shared/banco_memoria.rs

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::web;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde_json::json;

use crate::comandas::comandas_gateway::ComandaGateway;
use crate::comandas::comandas_structs::{Comanda, DadosComanda, STATUS_ABERTA};
use crate::config::data_formatada::agora;
use crate::processamentos::processamentos_gateway::ProcessamentoGateway;
use crate::processamentos::processamentos_structs::{DadosProcessamento, Processamento};
use crate::produtos::produtos_gateway::ProdutoGateway;
use crate::produtos::produtos_structs::{DadosProduto, Produto};
use crate::shared::erros::{FalhaGateway, TipoFalha};
use crate::AppState;

#[derive(Default)]
struct Tabelas {
    comandas: BTreeMap<i32, Comanda>,
    produtos: BTreeMap<i32, Produto>,
    processamentos: BTreeMap<i32, Processamento>,
    proxima_comanda: i32,
    proximo_produto: i32,
    proximo_processamento: i32,
}

/// Gateway em memória com as mesmas restrições do esquema PostgreSQL:
/// unicidade, chaves estrangeiras e update sem efeito quando nada muda.
#[derive(Default)]
pub struct BancoMemoria {
    tabelas: Mutex<Tabelas>,
    falhar: AtomicBool,
    exclusao_sem_efeito: AtomicBool,
}

fn falha(tipo: TipoFalha, mensagem: &str) -> FalhaGateway {
    FalhaGateway::nova(tipo, mensagem, "memoria", json!({}))
}

impl BancoMemoria {
    pub fn compartilhado() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn estado(self: &Arc<Self>) -> web::Data<AppState> {
        web::Data::new(AppState::com_gateways(
            self.clone(),
            self.clone(),
            self.clone(),
        ))
    }

    /// Com a falha ligada, toda operação devolve um erro de acesso a dados.
    pub fn simular_falha(&self, ligada: bool) {
        self.falhar.store(ligada, Ordering::SeqCst);
    }

    /// Faz o DELETE afetar zero linhas, como quando outra requisição remove
    /// o registro entre a checagem de existência e a exclusão.
    pub fn simular_remocao_concorrente(&self, ligada: bool) {
        self.exclusao_sem_efeito.store(ligada, Ordering::SeqCst);
    }

    pub fn total_comandas(&self) -> usize {
        self.tabelas.lock().expect("mutex").comandas.len()
    }

    pub fn total_produtos(&self) -> usize {
        self.tabelas.lock().expect("mutex").produtos.len()
    }

    pub fn total_processamentos(&self) -> usize {
        self.tabelas.lock().expect("mutex").processamentos.len()
    }

    /// Grava um processamento apontando para o produto, abrindo uma comanda
    /// auxiliar quando ainda não houver nenhuma.
    pub fn vincular_processamento_ao_produto(&self, produto_id: i32) {
        let mut tabelas = self.tabelas.lock().expect("mutex");
        let comanda_id = match tabelas.comandas.keys().next().copied() {
            Some(id) => id,
            None => {
                tabelas.proxima_comanda += 1;
                let id = tabelas.proxima_comanda;
                tabelas.comandas.insert(
                    id,
                    Comanda {
                        id,
                        codigo_comanda: format!("VINCULO-{id}"),
                        valor_total: BigDecimal::from(0),
                        data_abertura_comanda: agora(),
                        data_atualizacao_comanda: None,
                        status: STATUS_ABERTA.to_string(),
                    },
                );
                id
            }
        };
        gravar_vinculo(&mut tabelas, comanda_id, produto_id);
    }

    /// Mesmo vínculo, partindo da comanda. Abre um produto auxiliar se preciso.
    pub fn vincular_processamento_a_comanda(&self, comanda_id: i32) {
        let mut tabelas = self.tabelas.lock().expect("mutex");
        let produto_id = match tabelas.produtos.keys().next().copied() {
            Some(id) => id,
            None => {
                tabelas.proximo_produto += 1;
                let id = tabelas.proximo_produto;
                tabelas.produtos.insert(
                    id,
                    Produto {
                        id,
                        codigo_produto: format!("VINCULO-{id}"),
                        nome_produto: format!("Produto auxiliar {id}"),
                        valor_un_produto: BigDecimal::from(1),
                        quantidade_estoque: 0,
                        data_insert_produto: agora(),
                        data_update_produto: None,
                    },
                );
                id
            }
        };
        gravar_vinculo(&mut tabelas, comanda_id, produto_id);
    }

    fn remocao_concorrente(&self) -> bool {
        self.exclusao_sem_efeito.load(Ordering::SeqCst)
    }

    fn abrir(&self) -> Result<MutexGuard<'_, Tabelas>, FalhaGateway> {
        if self.falhar.load(Ordering::SeqCst) {
            return Err(falha(TipoFalha::Outra, "conexão com o banco recusada"));
        }
        Ok(self.tabelas.lock().expect("mutex"))
    }
}

#[async_trait]
impl ComandaGateway for BancoMemoria {
    async fn buscar_por_id(&self, id: i32) -> Result<Option<Comanda>, FalhaGateway> {
        Ok(self.abrir()?.comandas.get(&id).cloned())
    }

    async fn buscar_todas(&self) -> Result<Vec<Comanda>, FalhaGateway> {
        Ok(self.abrir()?.comandas.values().cloned().collect())
    }

    async fn existe(&self, id: i32) -> Result<bool, FalhaGateway> {
        Ok(self.abrir()?.comandas.contains_key(&id))
    }

    async fn codigo_em_uso(&self, codigo_comanda: &str) -> Result<bool, FalhaGateway> {
        Ok(self
            .abrir()?
            .comandas
            .values()
            .any(|c| c.codigo_comanda == codigo_comanda))
    }

    async fn inserir(
        &self,
        dados: &DadosComanda,
        status: &str,
        data_abertura: NaiveDateTime,
    ) -> Result<i32, FalhaGateway> {
        let mut tabelas = self.abrir()?;
        if tabelas
            .comandas
            .values()
            .any(|c| c.codigo_comanda == dados.codigo_comanda)
        {
            return Err(falha(TipoFalha::Unicidade, "codigo_comanda duplicado"));
        }

        tabelas.proxima_comanda += 1;
        let id = tabelas.proxima_comanda;
        tabelas.comandas.insert(
            id,
            Comanda {
                id,
                codigo_comanda: dados.codigo_comanda.clone(),
                valor_total: dados.valor_total.clone(),
                data_abertura_comanda: data_abertura,
                data_atualizacao_comanda: None,
                status: status.to_string(),
            },
        );
        Ok(id)
    }

    async fn atualizar(
        &self,
        id: i32,
        dados: &DadosComanda,
        data_atualizacao: NaiveDateTime,
    ) -> Result<u64, FalhaGateway> {
        let mut tabelas = self.abrir()?;
        if tabelas
            .comandas
            .values()
            .any(|c| c.id != id && c.codigo_comanda == dados.codigo_comanda)
        {
            return Err(falha(TipoFalha::Unicidade, "codigo_comanda duplicado"));
        }

        let Some(comanda) = tabelas.comandas.get_mut(&id) else {
            return Ok(0);
        };
        if comanda.codigo_comanda == dados.codigo_comanda && comanda.valor_total == dados.valor_total
        {
            return Ok(0);
        }

        comanda.codigo_comanda = dados.codigo_comanda.clone();
        comanda.valor_total = dados.valor_total.clone();
        comanda.data_atualizacao_comanda = Some(data_atualizacao);
        Ok(1)
    }

    async fn deletar(&self, id: i32) -> Result<u64, FalhaGateway> {
        let mut tabelas = self.abrir()?;
        if tabelas.processamentos.values().any(|p| p.comanda_id == id) {
            return Err(falha(TipoFalha::ChaveEstrangeira, "comanda referenciada"));
        }
        if self.remocao_concorrente() {
            return Ok(0);
        }
        Ok(tabelas.comandas.remove(&id).map_or(0, |_| 1))
    }
}

#[async_trait]
impl ProdutoGateway for BancoMemoria {
    async fn buscar_por_id(&self, id: i32) -> Result<Option<Produto>, FalhaGateway> {
        Ok(self.abrir()?.produtos.get(&id).cloned())
    }

    async fn buscar_todos(&self) -> Result<Vec<Produto>, FalhaGateway> {
        Ok(self.abrir()?.produtos.values().cloned().collect())
    }

    async fn existe(&self, id: i32) -> Result<bool, FalhaGateway> {
        Ok(self.abrir()?.produtos.contains_key(&id))
    }

    async fn codigo_em_uso(&self, codigo_produto: &str) -> Result<bool, FalhaGateway> {
        Ok(self
            .abrir()?
            .produtos
            .values()
            .any(|p| p.codigo_produto == codigo_produto))
    }

    async fn nome_em_uso(&self, nome_produto: &str) -> Result<bool, FalhaGateway> {
        Ok(self
            .abrir()?
            .produtos
            .values()
            .any(|p| p.nome_produto == nome_produto))
    }

    async fn inserir(
        &self,
        dados: &DadosProduto,
        data_insert: NaiveDateTime,
    ) -> Result<i32, FalhaGateway> {
        let mut tabelas = self.abrir()?;
        if produto_colide(&tabelas, None, dados) {
            return Err(falha(TipoFalha::Unicidade, "produto duplicado"));
        }

        tabelas.proximo_produto += 1;
        let id = tabelas.proximo_produto;
        tabelas.produtos.insert(
            id,
            Produto {
                id,
                codigo_produto: dados.codigo_produto.clone(),
                nome_produto: dados.nome_produto.clone(),
                valor_un_produto: dados.valor_un_produto.clone(),
                quantidade_estoque: dados.quantidade_estoque,
                data_insert_produto: data_insert,
                data_update_produto: None,
            },
        );
        Ok(id)
    }

    async fn atualizar(
        &self,
        id: i32,
        dados: &DadosProduto,
        data_update: NaiveDateTime,
    ) -> Result<u64, FalhaGateway> {
        let mut tabelas = self.abrir()?;
        if produto_colide(&tabelas, Some(id), dados) {
            return Err(falha(TipoFalha::Unicidade, "produto duplicado"));
        }

        let Some(produto) = tabelas.produtos.get_mut(&id) else {
            return Ok(0);
        };
        if produto.codigo_produto == dados.codigo_produto
            && produto.nome_produto == dados.nome_produto
            && produto.valor_un_produto == dados.valor_un_produto
            && produto.quantidade_estoque == dados.quantidade_estoque
        {
            return Ok(0);
        }

        produto.codigo_produto = dados.codigo_produto.clone();
        produto.nome_produto = dados.nome_produto.clone();
        produto.valor_un_produto = dados.valor_un_produto.clone();
        produto.quantidade_estoque = dados.quantidade_estoque;
        produto.data_update_produto = Some(data_update);
        Ok(1)
    }

    async fn deletar(&self, id: i32) -> Result<u64, FalhaGateway> {
        let mut tabelas = self.abrir()?;
        if tabelas.processamentos.values().any(|p| p.produto_id == id) {
            return Err(falha(TipoFalha::ChaveEstrangeira, "produto referenciado"));
        }
        if self.remocao_concorrente() {
            return Ok(0);
        }
        Ok(tabelas.produtos.remove(&id).map_or(0, |_| 1))
    }
}

fn gravar_vinculo(tabelas: &mut Tabelas, comanda_id: i32, produto_id: i32) {
    tabelas.proximo_processamento += 1;
    let id = tabelas.proximo_processamento;
    tabelas.processamentos.insert(
        id,
        Processamento {
            id,
            comanda_id,
            produto_id,
            servico_id: 1,
            quantidade_servico: BigDecimal::from(1),
            quantidade_produto: BigDecimal::from(1),
            data_abertura_processamento: agora(),
            data_update_processamento: None,
        },
    );
}

fn produto_colide(tabelas: &Tabelas, id: Option<i32>, dados: &DadosProduto) -> bool {
    tabelas.produtos.values().any(|p| {
        Some(p.id) != id
            && (p.codigo_produto == dados.codigo_produto || p.nome_produto == dados.nome_produto)
    })
}

fn referencias_validas(tabelas: &Tabelas, dados: &DadosProcessamento) -> bool {
    tabelas.comandas.contains_key(&dados.comanda_id)
        && tabelas.produtos.contains_key(&dados.produto_id)
}

#[async_trait]
impl ProcessamentoGateway for BancoMemoria {
    async fn buscar_por_id(&self, id: i32) -> Result<Option<Processamento>, FalhaGateway> {
        Ok(self.abrir()?.processamentos.get(&id).cloned())
    }

    async fn buscar_todos(&self) -> Result<Vec<Processamento>, FalhaGateway> {
        Ok(self.abrir()?.processamentos.values().cloned().collect())
    }

    async fn existe(&self, id: i32) -> Result<bool, FalhaGateway> {
        Ok(self.abrir()?.processamentos.contains_key(&id))
    }

    async fn inserir(
        &self,
        dados: &DadosProcessamento,
        data_abertura: NaiveDateTime,
    ) -> Result<i32, FalhaGateway> {
        let mut tabelas = self.abrir()?;
        if !referencias_validas(&tabelas, dados) {
            return Err(falha(TipoFalha::ChaveEstrangeira, "comanda ou produto inexistente"));
        }

        tabelas.proximo_processamento += 1;
        let id = tabelas.proximo_processamento;
        tabelas.processamentos.insert(
            id,
            Processamento {
                id,
                comanda_id: dados.comanda_id,
                produto_id: dados.produto_id,
                servico_id: dados.servico_id,
                quantidade_servico: dados.quantidade_servico.clone(),
                quantidade_produto: dados.quantidade_produto.clone(),
                data_abertura_processamento: data_abertura,
                data_update_processamento: None,
            },
        );
        Ok(id)
    }

    async fn atualizar(
        &self,
        id: i32,
        dados: &DadosProcessamento,
        data_update: NaiveDateTime,
    ) -> Result<u64, FalhaGateway> {
        let mut tabelas = self.abrir()?;
        if !referencias_validas(&tabelas, dados) {
            return Err(falha(TipoFalha::ChaveEstrangeira, "comanda ou produto inexistente"));
        }

        let Some(processamento) = tabelas.processamentos.get_mut(&id) else {
            return Ok(0);
        };
        if processamento.comanda_id == dados.comanda_id
            && processamento.produto_id == dados.produto_id
            && processamento.servico_id == dados.servico_id
            && processamento.quantidade_servico == dados.quantidade_servico
            && processamento.quantidade_produto == dados.quantidade_produto
        {
            return Ok(0);
        }

        processamento.comanda_id = dados.comanda_id;
        processamento.produto_id = dados.produto_id;
        processamento.servico_id = dados.servico_id;
        processamento.quantidade_servico = dados.quantidade_servico.clone();
        processamento.quantidade_produto = dados.quantidade_produto.clone();
        processamento.data_update_processamento = Some(data_update);
        Ok(1)
    }

    async fn deletar(&self, id: i32) -> Result<u64, FalhaGateway> {
        let mut tabelas = self.abrir()?;
        if self.remocao_concorrente() {
            return Ok(0);
        }
        Ok(tabelas.processamentos.remove(&id).map_or(0, |_| 1))
    }
}
