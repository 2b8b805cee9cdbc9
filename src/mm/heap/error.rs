//! Erros do heap allocator

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// Pedido de zero bytes (ou tamanho que estoura ao alinhar)
    InvalidSize,
    /// Nenhum bloco livre grande o suficiente
    OutOfMemory,
    /// Offset não corresponde ao início de um bloco
    InvalidPointer,
    /// Bloco já estava livre
    DoubleFree,
}

impl HeapError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidSize => "Tamanho de alocação inválido",
            Self::OutOfMemory => "OOM: heap sem bloco livre suficiente",
            Self::InvalidPointer => "Ponteiro não pertence a nenhum bloco",
            Self::DoubleFree => "Double free de bloco do heap",
        }
    }
}

impl std::fmt::Display for HeapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::error::Error for HeapError {}

pub type HeapResult<T> = Result<T, HeapError>;
