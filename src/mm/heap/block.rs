//! Header de bloco do heap, serializado dentro da arena.
//!
//! Layout (little-endian, 4 palavras de 64 bits):
//!
//! ```text
//! +0   size   bytes de payload
//! +8   free   0 = em uso, 1 = livre
//! +16  prev   offset do header anterior (NIL = início da cadeia)
//! +24  next   offset do header seguinte (NIL = fim da cadeia)
//! +32  payload...
//! ```

/// Tamanho do header em bytes
pub const HEADER_SIZE: usize = 32;

/// Sentinela de fim de cadeia
pub const NIL: usize = usize::MAX;

const NIL_WORD: u64 = u64::MAX;

/// Header decodificado. Offsets são relativos ao início da arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub size: usize,
    pub free: bool,
    pub prev: usize,
    pub next: usize,
}

impl BlockHeader {
    pub const fn new(size: usize, free: bool, prev: usize, next: usize) -> Self {
        Self {
            size,
            free,
            prev,
            next,
        }
    }

    /// Lê o header em `at`. O chamador garante `at + HEADER_SIZE <= arena.len()`.
    pub(super) fn decode(arena: &[u8], at: usize) -> Self {
        Self {
            size: read_word(arena, at) as usize,
            free: read_word(arena, at + 8) != 0,
            prev: link_from_word(read_word(arena, at + 16)),
            next: link_from_word(read_word(arena, at + 24)),
        }
    }

    /// Grava o header em `at`. Mesma pré-condição de `decode`.
    pub(super) fn encode(&self, arena: &mut [u8], at: usize) {
        write_word(arena, at, self.size as u64);
        write_word(arena, at + 8, self.free as u64);
        write_word(arena, at + 16, link_to_word(self.prev));
        write_word(arena, at + 24, link_to_word(self.next));
    }
}

fn read_word(arena: &[u8], at: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&arena[at..at + 8]);
    u64::from_le_bytes(word)
}

fn write_word(arena: &mut [u8], at: usize, value: u64) {
    arena[at..at + 8].copy_from_slice(&value.to_le_bytes());
}

fn link_from_word(word: u64) -> usize {
    if word == NIL_WORD {
        NIL
    } else {
        word as usize
    }
}

fn link_to_word(link: usize) -> u64 {
    if link == NIL {
        NIL_WORD
    } else {
        link as u64
    }
}
