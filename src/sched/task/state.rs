//! Estados de task
//!
//! ```text
//! Created ─▶ Ready ◀──▶ Running ─▶ Terminated
//!              ▲           │
//!              └─ Blocked ◀┘
//! ```
//!
//! `Terminated` é absorvente.

use std::fmt;

/// Estado de uma task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Recém criada, ainda fora da fila
    Created,
    /// Pronta para executar (está em exatamente uma fila)
    Ready,
    /// Dona da CPU (é a `current` do scheduler)
    Running,
    /// Bloqueada esperando algo
    Blocked,
    /// Terminada; o registro fica até `reap_terminated`
    Terminated,
}

impl TaskState {
    pub const fn is_terminated(self) -> bool {
        matches!(self, Self::Terminated)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Blocked => "BLOCKED",
            Self::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
