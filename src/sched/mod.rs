//! # Multitasking & Scheduler Subsystem
//!
//! Ciclo de vida das tasks e seleção de quem roda a seguir.
//!
//! ## Arquitetura: Cooperativo + Preemptivo por tick
//! 1. **Preemptivo:** quem dirige o núcleo chama `Scheduler::tick()` a cada
//!    interrupção de timer simulada; ao fim do quantum a task perde a CPU.
//! 2. **Cooperativo:** tasks podem ceder a CPU via `yield_now()`.
//!
//! Não há troca de contexto real: "rodar" significa ser a `current`.

pub mod config;
pub mod error;
pub mod scheduler;
pub mod task;

#[cfg(test)]
mod test;

pub use error::{SchedError, SchedResult};
pub use scheduler::{Scheduler, SchedulingPolicy};
pub use task::{Priority, Task, TaskState};
