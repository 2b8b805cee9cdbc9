//! Task Control Block

use super::accounting::Accounting;
use super::priority::Priority;
use super::state::TaskState;
use crate::sys::types::{Ticks, Tid};

/// Task Control Block
///
/// Pertence exclusivamente ao `Scheduler`; fora dele só existe como `&Task`.
#[derive(Debug, Clone)]
pub struct Task {
    /// ID único
    pub tid: Tid,
    /// Nome (debug)
    pub name: String,
    /// Estado atual
    pub state: TaskState,
    pub priority: Priority,
    /// Estatísticas de contabilidade
    pub accounting: Accounting,
    /// Código de saída (definido por `exit`)
    pub exit_code: Option<i32>,
}

impl Task {
    pub fn new(tid: Tid, name: impl Into<String>, priority: Priority, now: Ticks) -> Self {
        Self {
            tid,
            name: name.into(),
            state: TaskState::Created,
            priority,
            accounting: Accounting::new(now),
            exit_code: None,
        }
    }

    /// Marca como pronta
    pub fn set_ready(&mut self) {
        self.state = TaskState::Ready;
    }

    /// Marca como bloqueada
    pub fn set_blocked(&mut self) {
        self.state = TaskState::Blocked;
    }

    pub fn cpu_time(&self) -> Ticks {
        self.accounting.total_cpu_time
    }

    pub fn quantum_left(&self) -> u64 {
        self.accounting.quantum_left
    }
}
