//! Algoritmos de escalonamento

use std::fmt;

/// Políticas de escalonamento suportadas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulingPolicy {
    /// Round Robin: uma única FIFO, ordem de chegada
    #[default]
    RoundRobin,
    /// Prioridade estrita: uma FIFO por nível, maior nível primeiro
    Priority,
}

impl SchedulingPolicy {
    /// Aceita `rr` / `round-robin` / `priority` / `prio`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rr" | "round-robin" | "roundrobin" => Some(Self::RoundRobin),
            "priority" | "prio" => Some(Self::Priority),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RoundRobin => "round-robin",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
