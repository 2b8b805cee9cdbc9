//! Page table esparsa por task

use super::flags::Protection;
use crate::mm::pmm::PhysFrame;
use crate::sys::types::{PageNumber, Tid};
use std::collections::BTreeMap;

/// Entrada de page table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    pub frame: PhysFrame,
    pub present: bool,
    pub dirty: bool,
    pub accessed: bool,
    pub protection: Protection,
}

impl PageTableEntry {
    /// Entrada presente, limpa, apontando para `frame`
    pub fn mapped(frame: PhysFrame, protection: Protection) -> Self {
        Self {
            frame,
            present: true,
            dirty: false,
            accessed: false,
            protection,
        }
    }
}

/// Mapeamento página virtual -> entrada, de uma única task.
///
/// `BTreeMap` mantém a ordem por número de página para dumps
/// determinísticos do mapa de memória.
#[derive(Debug, Clone)]
pub struct PageTable {
    owner: Tid,
    entries: BTreeMap<PageNumber, PageTableEntry>,
}

impl PageTable {
    pub fn new(owner: Tid) -> Self {
        Self {
            owner,
            entries: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> Tid {
        self.owner
    }

    pub fn get(&self, page: PageNumber) -> Option<&PageTableEntry> {
        self.entries.get(&page)
    }

    pub fn get_mut(&mut self, page: PageNumber) -> Option<&mut PageTableEntry> {
        self.entries.get_mut(&page)
    }

    /// Entrada presente para `page`, se houver
    pub fn present(&self, page: PageNumber) -> Option<&PageTableEntry> {
        self.entries.get(&page).filter(|e| e.present)
    }

    pub fn present_mut(&mut self, page: PageNumber) -> Option<&mut PageTableEntry> {
        self.entries.get_mut(&page).filter(|e| e.present)
    }

    pub(crate) fn insert(&mut self, page: PageNumber, entry: PageTableEntry) {
        self.entries.insert(page, entry);
    }

    pub(crate) fn remove(&mut self, page: PageNumber) -> Option<PageTableEntry> {
        self.entries.remove(&page)
    }

    /// Esvazia a tabela, devolvendo as entradas
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (PageNumber, PageTableEntry)> {
        std::mem::take(&mut self.entries).into_iter()
    }

    /// Entradas em ordem crescente de página
    pub fn entries(&self) -> impl Iterator<Item = (PageNumber, &PageTableEntry)> {
        self.entries.iter().map(|(page, entry)| (*page, entry))
    }

    /// Número de páginas presentes
    pub fn present_count(&self) -> usize {
        self.entries.values().filter(|e| e.present).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
