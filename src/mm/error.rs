//! Tipos de Erro do Subsistema de Memória
//!
//! Define erros estruturados para diagnóstico preciso de falhas em MM.

/// Erros do subsistema de memória
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmError {
    /// A task não tem address space
    NoAddressSpace,
    /// Address space já existe para a task
    AlreadyExists,
    /// Página já mapeada
    AlreadyMapped,
    /// Página não mapeada
    NotMapped,
    /// Sem frames físicos disponíveis (OOM)
    OutOfMemory,
    /// Frame liberado duas vezes
    DoubleFree,
    /// Frame fora do pool ou offset além da página
    OutOfBounds,
}

impl MmError {
    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAddressSpace => "Task sem address space",
            Self::AlreadyExists => "Address space já existe",
            Self::AlreadyMapped => "Página já mapeada",
            Self::NotMapped => "Página não mapeada",
            Self::OutOfMemory => "OOM: sem frames físicos disponíveis",
            Self::DoubleFree => "Double free de frame detectado",
            Self::OutOfBounds => "Índice ou offset fora dos limites",
        }
    }
}

impl std::fmt::Display for MmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::error::Error for MmError {}

/// Tipo Result específico para operações de memória
pub type MmResult<T> = Result<T, MmError>;
