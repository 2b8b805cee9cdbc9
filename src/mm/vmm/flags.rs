//! Bits de proteção de página

use bitflags::bitflags;

bitflags! {
    /// Proteção de uma página virtual.
    ///
    /// Bookkeeping apenas: o simulador registra e devolve, mas não bloqueia
    /// `read_page` / `write_page` com base nestes bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Protection: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const EXECUTE = 1 << 2;

        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
        const READ_EXECUTE = Self::READ.bits() | Self::EXECUTE.bits();
        const ALL = Self::READ.bits() | Self::WRITE.bits() | Self::EXECUTE.bits();
    }
}

impl Protection {
    /// Proteção usada por demand paging
    pub const DEFAULT: Protection = Protection::READ_WRITE;
}

impl Default for Protection {
    fn default() -> Self {
        Self::DEFAULT
    }
}
