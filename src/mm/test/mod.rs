//! # Testes do Subsistema de Memória
//!
//! - `pmm_test.rs` - Alocador de frames por bitmap
//! - `vmm_test.rs` - Address spaces, tradução e page faults
//! - `heap_test.rs` - Split, coalescing e realloc do heap

mod heap_test;
mod pmm_test;
