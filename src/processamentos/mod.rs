// src/processamentos/mod.rs

// Structs de entrada, de resposta e o registro da tabela tb_processamento
pub mod processamentos_structs;
// Acesso ao banco (trait do gateway + implementação PostgreSQL)
pub mod processamentos_gateway;
// Regras de existência e classificação dos erros
pub mod processamentos_repository;
// Rotas HTTP dos processamentos
pub mod processamentos_router;
