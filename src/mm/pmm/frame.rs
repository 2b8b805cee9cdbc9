use crate::mm::config::PAGE_SIZE;
use crate::sys::types::FrameNumber;
use std::fmt;

/// Um frame de memória física (tamanho fixo PAGE_SIZE = 4KiB)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PhysFrame {
    number: FrameNumber,
}

impl PhysFrame {
    /// Frame de índice `number` no pool
    #[inline]
    pub const fn new(number: FrameNumber) -> Self {
        Self { number }
    }

    /// Retorna o frame que contém o endereço físico dado.
    ///
    /// `None` se o número do frame não cabe em `u32`.
    #[inline]
    pub fn containing_address(addr: u64) -> Option<Self> {
        let number = u32::try_from(addr / PAGE_SIZE as u64).ok()?;
        Some(Self::new(FrameNumber::new(number)))
    }

    #[inline]
    pub const fn number(&self) -> FrameNumber {
        self.number
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.number.as_usize()
    }

    /// Retorna o endereço físico inicial do frame
    #[inline]
    pub const fn start_address(&self) -> u64 {
        self.number.as_u32() as u64 * PAGE_SIZE as u64
    }
}

impl fmt::Debug for PhysFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhysFrame({}@{:#x})", self.number, self.start_address())
    }
}
