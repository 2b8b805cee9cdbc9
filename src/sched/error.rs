//! Erros do Scheduler

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedError {
    /// Nenhuma task com o id pedido
    NotFound,
    /// Transição de estado ilegal (ex: desbloquear task que não está Blocked)
    InvalidTransition,
}

impl SchedError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "Task não encontrada",
            Self::InvalidTransition => "Transição de estado inválida",
        }
    }
}

impl std::fmt::Display for SchedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::error::Error for SchedError {}

pub type SchedResult<T> = Result<T, SchedError>;
