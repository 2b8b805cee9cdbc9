//! # Testes do Scheduler
//!
//! - `runqueue_test.rs` - Ordem das filas e migração entre políticas
//! - `scheduler_test.rs` - Ciclo de vida, tick, yield e seleção
