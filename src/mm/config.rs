//! # Configuração do Módulo de Memória
//!
//! Define constantes e valores padrão do módulo MM.

// =============================================================================
// CONSTANTES DE TAMANHO
// =============================================================================

/// Tamanho de uma página / frame (4 KiB)
pub const PAGE_SIZE: usize = 4096;

// =============================================================================
// MEMÓRIA FÍSICA SIMULADA
// =============================================================================

/// Número de frames físicos do pool padrão (4 MiB de "RAM")
pub const TOTAL_FRAMES: usize = 1024;

/// Maior pool aceito no boot (1 GiB de "RAM")
pub const MAX_FRAMES: usize = 256 * 1024;

// =============================================================================
// CONFIGURAÇÃO DO HEAP
// =============================================================================

/// Tamanho padrão da arena do heap do kernel (1 MiB)
pub const HEAP_SIZE: usize = 1024 * 1024;

/// Maior arena aceita no boot (256 MiB)
pub const MAX_HEAP_SIZE: usize = 256 * 1024 * 1024;

/// Alinhamento de toda alocação do heap
pub const HEAP_ALIGN: usize = 8;

/// Sobra mínima (além de um header) para valer a pena dividir um bloco
pub const HEAP_MIN_SPLIT: usize = 8;
