//! # Memory Management Subsystem (MM)
//!
//! Gerencia a memória física simulada, os address spaces das tasks e o heap
//! do núcleo.
//!
//! ## Arquitetura dos Módulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | `pmm`  | Pool fixo de frames (4 KiB) controlado por bitmap. |
//! | `vmm`  | Page table esparsa por task, proteção e demand paging. |
//! | `heap` | Free-list com split/coalescing sobre uma arena privada. |
//!
//! ```text
//! PMM  ──▶ fornece frames físicos
//!  │
//!  ▼
//! VMM  ──▶ associa frames a páginas de cada task
//!
//! Heap ──▶ independente (arena própria, sem VMM)
//! ```
//!
//! Nenhum destes tipos tem lock interno. Quem os dirige serializa o acesso
//! (ver `core::kernel::SharedKernel`).

pub mod config;
pub mod error;
pub mod heap;
pub mod pmm;
pub mod vmm;

#[cfg(test)]
mod test;

pub use error::{MmError, MmResult};
pub use heap::{HeapAllocator, HeapError, HeapPtr};
pub use pmm::{BitmapFrameAllocator, PhysFrame};
pub use vmm::{FaultResult, MemoryManager, PageTable, PageTableEntry, Protection};
