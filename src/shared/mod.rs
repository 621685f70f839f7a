// src/shared/mod.rs

// Envelope de resposta comum a todos os módulos
pub mod shared_structs;
// Taxonomia de erros (falhas do gateway e erros classificados da API)
pub mod erros;
// Tradutor único de erros para respostas HTTP
pub mod tratador_erros;
// Conversão dos erros do `validator` para a taxonomia da API
pub mod validacao;

// Banco em memória usado pelos testes no lugar do PostgreSQL
#[cfg(test)]
pub mod banco_memoria;
