// src/comandas/mod.rs

// Structs de entrada, de resposta e o registro da tabela tb_comanda
pub mod comandas_structs;
// Acesso ao banco (trait do gateway + implementação PostgreSQL)
pub mod comandas_gateway;
// Regras de existência, unicidade e classificação dos erros
pub mod comandas_repository;
// Rotas HTTP das comandas
pub mod comandas_router;
