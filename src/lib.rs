//! Forge Sim Library.
//!
//! Núcleo de escalonamento e gerenciamento de memória do Forge, executado
//! como biblioteca comum: sem hardware, sem troca de contexto real.
//! Quem dirige o núcleo é o `core::kernel::Kernel`.

// --- Módulos Centrais ---
pub mod core; // Contexto do kernel, configuração, logging
pub mod klib; // Utilitários internos (Bitmap, alinhamento)
pub mod mm; // Gerenciamento de Memória (PMM, VMM, Heap)
pub mod sys; // Definições de Sistema (tipos, Errno)

// --- Subsistemas ---
pub mod sched; // Scheduler e Tarefas
pub mod syscall; // Interface com as tasks

// Fachada usada pelos macros k*!
#[doc(hidden)]
pub use log as __log;

pub use crate::core::config::KernelConfig;
pub use crate::core::kernel::{Kernel, SharedKernel};
