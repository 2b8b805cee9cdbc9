//! Bitmap genérico

/// Bitmap para gerenciamento de bits, armazenado em palavras de 64 bits.
///
/// Bits além de `len` na última palavra nunca são setados, então
/// `count_ones()` conta apenas bits válidos.
#[derive(Debug, Clone)]
pub struct Bitmap {
    data: Vec<u64>,
    len: usize,
}

impl Bitmap {
    /// Cria bitmap com `bits` bits, todos zerados
    pub fn new(bits: usize) -> Self {
        Self {
            data: vec![0; bits.div_ceil(64)],
            len: bits,
        }
    }

    /// Número de bits válidos
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Define um bit
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.data[index / 64] |= 1 << (index % 64);
    }

    /// Limpa um bit
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.data[index / 64] &= !(1 << (index % 64));
    }

    /// Testa um bit
    pub fn test(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        (self.data[index / 64] & (1 << (index % 64))) != 0
    }

    /// Encontra o primeiro bit livre (0) a partir da palavra `start_word`
    pub fn find_first_zero_from(&self, start_word: usize) -> Option<usize> {
        for (i, &word) in self.data.iter().enumerate().skip(start_word) {
            if word != u64::MAX {
                let index = i * 64 + word.trailing_ones() as usize;
                if index < self.len {
                    return Some(index);
                }
            }
        }
        None
    }

    /// Encontra primeiro bit livre (0)
    pub fn find_first_zero(&self) -> Option<usize> {
        self.find_first_zero_from(0)
    }

    /// Quantidade de bits setados
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|w| w.count_ones() as usize).sum()
    }
}
