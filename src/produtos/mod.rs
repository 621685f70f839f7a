// src/produtos/mod.rs

// Structs de entrada, de resposta e o registro da tabela tb_produto
pub mod produtos_structs;
// Acesso ao banco (trait do gateway + implementação PostgreSQL)
pub mod produtos_gateway;
// Regras de existência, unicidade de código/nome e classificação dos erros
pub mod produtos_repository;
// Rotas HTTP dos produtos
pub mod produtos_router;
