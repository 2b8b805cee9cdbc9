//! Níveis de prioridade

use std::fmt;

/// Prioridade de uma task. A ordem derivada é a ordem de escalonamento:
/// `Idle < Low < Normal < High < RealTime`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Idle = 0,
    Low = 1,
    #[default]
    Normal = 2,
    High = 3,
    RealTime = 4,
}

impl Priority {
    /// Número de níveis
    pub const LEVELS: usize = 5;

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::RealTime => "REALTIME",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
