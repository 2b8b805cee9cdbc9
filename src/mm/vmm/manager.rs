//! # Memory Manager
//!
//! Dono de uma `PageTable` por task e do `BitmapFrameAllocator` global.
//!
//! ## Invariantes
//!
//! - Uma entrada `present` aponta para um frame marcado como ocupado no PMM.
//! - Um frame é referenciado por no máximo uma entrada, somando todas as tasks.
//! - `destroy_address_space` é o único caminho que devolve em massa os
//!   frames de uma task; quem cria address spaces deve destruí-los.
//!
//! ## Memória Física Simulada
//!
//! `physical` é um buffer de `total_frames * PAGE_SIZE` bytes. O frame `n`
//! ocupa `[n * PAGE_SIZE, (n + 1) * PAGE_SIZE)`. Frames são zerados ao
//! serem entregues a uma página.

use super::flags::Protection;
use super::page_table::{PageTable, PageTableEntry};
use crate::mm::config::{PAGE_SIZE, TOTAL_FRAMES};
use crate::mm::error::{MmError, MmResult};
use crate::mm::pmm::{BitmapFrameAllocator, PhysFrame};
use crate::sys::types::{PageNumber, Tid};
use std::collections::BTreeMap;

/// Resultado do tratamento de page fault.
///
/// Só existe a classe "página nunca mapeada": violações de proteção não são
/// distinguidas de faltas de mapeamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultResult {
    /// Página alocada sob demanda
    Recovered(PhysFrame),
    /// A alocação de recuperação falhou
    Unrecoverable(MmError),
}

impl FaultResult {
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }
}

pub struct MemoryManager {
    pmm: BitmapFrameAllocator,
    page_tables: BTreeMap<Tid, PageTable>,
    physical: Vec<u8>,
    total_allocated_pages: usize,
    page_fault_count: u64,
}

impl MemoryManager {
    /// Memory manager com o pool padrão de `TOTAL_FRAMES` frames
    pub fn new() -> Self {
        Self::with_frames(TOTAL_FRAMES)
    }

    pub fn with_frames(total_frames: usize) -> Self {
        let mm = Self {
            pmm: BitmapFrameAllocator::new(total_frames),
            page_tables: BTreeMap::new(),
            physical: vec![0; total_frames * PAGE_SIZE],
            total_allocated_pages: 0,
            page_fault_count: 0,
        };
        crate::kinfo!(
            "(MM) Inicializado com {} frames ({} KiB)",
            total_frames,
            total_frames * PAGE_SIZE / 1024
        );
        mm
    }

    // =========================================================================
    // ADDRESS SPACES
    // =========================================================================

    pub fn create_address_space(&mut self, tid: Tid) -> MmResult<()> {
        if self.page_tables.contains_key(&tid) {
            crate::kwarn!("(MM) Address space já existe para a task {}", tid);
            return Err(MmError::AlreadyExists);
        }
        self.page_tables.insert(tid, PageTable::new(tid));
        crate::kinfo!("(MM) Address space criado para a task {}", tid);
        Ok(())
    }

    /// Destrói o address space, devolvendo todos os frames presentes.
    ///
    /// Retorna quantos frames foram liberados.
    pub fn destroy_address_space(&mut self, tid: Tid) -> MmResult<usize> {
        let mut table = self.page_tables.remove(&tid).ok_or(MmError::NoAddressSpace)?;

        let mut released = 0;
        for (page, entry) in table.drain() {
            if !entry.present {
                continue;
            }
            if let Err(e) = self.pmm.deallocate_frame(entry.frame) {
                crate::kerror!(
                    "(MM) Frame {:?} da página {} inconsistente: {}",
                    entry.frame,
                    page,
                    e
                );
                continue;
            }
            released += 1;
        }
        self.total_allocated_pages -= released;

        crate::kinfo!(
            "(MM) Address space da task {} destruído ({} frames devolvidos)",
            tid,
            released
        );
        Ok(released)
    }

    pub fn has_address_space(&self, tid: Tid) -> bool {
        self.page_tables.contains_key(&tid)
    }

    // =========================================================================
    // PÁGINAS
    // =========================================================================

    /// Mapeia `page` em um frame novo (menor índice livre).
    pub fn allocate_page(
        &mut self,
        tid: Tid,
        page: PageNumber,
        protection: Protection,
    ) -> MmResult<PhysFrame> {
        let table = match self.page_tables.get_mut(&tid) {
            Some(t) => t,
            None => {
                crate::kerror!("(MM) Task {} sem address space", tid);
                return Err(MmError::NoAddressSpace);
            }
        };

        if table.present(page).is_some() {
            crate::kwarn!("(MM) Página {} já mapeada na task {}", page, tid);
            return Err(MmError::AlreadyMapped);
        }

        let frame = match self.pmm.allocate_frame() {
            Some(f) => f,
            None => {
                crate::kerror!("(MM) Sem memória física para a página {}", page);
                return Err(MmError::OutOfMemory);
            }
        };

        table.insert(page, PageTableEntry::mapped(frame, protection));
        self.total_allocated_pages += 1;
        self.frame_bytes_mut(frame).fill(0);

        crate::kdebug!(
            "(MM) Página {} -> frame {} (task {})",
            page,
            frame.number(),
            tid
        );
        Ok(frame)
    }

    pub fn free_page(&mut self, tid: Tid, page: PageNumber) -> MmResult<()> {
        let table = self
            .page_tables
            .get_mut(&tid)
            .ok_or(MmError::NoAddressSpace)?;

        if table.present(page).is_none() {
            return Err(MmError::NotMapped);
        }
        let entry = table.remove(page).ok_or(MmError::NotMapped)?;

        self.pmm.deallocate_frame(entry.frame)?;
        self.total_allocated_pages -= 1;

        crate::kdebug!("(MM) Página {} liberada (task {})", page, tid);
        Ok(())
    }

    /// Traduz página -> frame. Marca a entrada como acessada.
    pub fn translate(&mut self, tid: Tid, page: PageNumber) -> Option<PhysFrame> {
        let entry = self.page_tables.get_mut(&tid)?.present_mut(page)?;
        entry.accessed = true;
        Some(entry.frame)
    }

    /// Demand paging: conta a falta e tenta mapear a página com a proteção
    /// padrão.
    pub fn handle_page_fault(&mut self, tid: Tid, page: PageNumber) -> FaultResult {
        self.page_fault_count += 1;
        crate::kdebug!("(MM) Page fault: task {} página {}", tid, page);

        match self.allocate_page(tid, page, Protection::DEFAULT) {
            Ok(frame) => FaultResult::Recovered(frame),
            Err(e) => {
                crate::kwarn!("(MM) Page fault irrecuperável na página {}: {}", page, e);
                FaultResult::Unrecoverable(e)
            }
        }
    }

    // =========================================================================
    // PROTEÇÃO
    // =========================================================================

    pub fn set_protection(
        &mut self,
        tid: Tid,
        page: PageNumber,
        protection: Protection,
    ) -> MmResult<()> {
        let table = self
            .page_tables
            .get_mut(&tid)
            .ok_or(MmError::NoAddressSpace)?;
        let entry = table.get_mut(page).ok_or(MmError::NotMapped)?;
        entry.protection = protection;
        Ok(())
    }

    pub fn get_protection(&self, tid: Tid, page: PageNumber) -> MmResult<Protection> {
        let table = self.page_tables.get(&tid).ok_or(MmError::NoAddressSpace)?;
        table
            .get(page)
            .map(|e| e.protection)
            .ok_or(MmError::NotMapped)
    }

    // =========================================================================
    // ACESSO A DADOS
    // =========================================================================

    /// Copia bytes da página para `buf`, a partir de `offset`.
    pub fn read_page(
        &mut self,
        tid: Tid,
        page: PageNumber,
        offset: usize,
        buf: &mut [u8],
    ) -> MmResult<()> {
        check_span(offset, buf.len())?;
        let frame = {
            let entry = self.present_entry_mut(tid, page)?;
            entry.accessed = true;
            entry.frame
        };
        buf.copy_from_slice(&self.frame_bytes(frame)[offset..offset + buf.len()]);
        Ok(())
    }

    /// Escreve `data` na página a partir de `offset`. Marca dirty.
    pub fn write_page(
        &mut self,
        tid: Tid,
        page: PageNumber,
        offset: usize,
        data: &[u8],
    ) -> MmResult<()> {
        check_span(offset, data.len())?;
        let frame = {
            let entry = self.present_entry_mut(tid, page)?;
            entry.accessed = true;
            entry.dirty = true;
            entry.frame
        };
        self.frame_bytes_mut(frame)[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn present_entry_mut(&mut self, tid: Tid, page: PageNumber) -> MmResult<&mut PageTableEntry> {
        self.page_tables
            .get_mut(&tid)
            .ok_or(MmError::NoAddressSpace)?
            .present_mut(page)
            .ok_or(MmError::NotMapped)
    }

    fn frame_bytes(&self, frame: PhysFrame) -> &[u8] {
        let start = frame.index() * PAGE_SIZE;
        &self.physical[start..start + PAGE_SIZE]
    }

    fn frame_bytes_mut(&mut self, frame: PhysFrame) -> &mut [u8] {
        let start = frame.index() * PAGE_SIZE;
        &mut self.physical[start..start + PAGE_SIZE]
    }

    // =========================================================================
    // CONSULTAS
    // =========================================================================

    pub fn free_frame_count(&self) -> usize {
        self.pmm.free_count()
    }

    pub fn used_frame_count(&self) -> usize {
        self.pmm.used_count()
    }

    pub fn total_frames(&self) -> usize {
        self.pmm.total_frames()
    }

    pub fn is_frame_free(&self, frame: PhysFrame) -> bool {
        self.pmm.is_frame_free(frame)
    }

    /// Bytes mapeados pela task (0 sem address space)
    pub fn task_memory_usage(&self, tid: Tid) -> usize {
        self.page_tables
            .get(&tid)
            .map_or(0, |t| t.present_count() * PAGE_SIZE)
    }

    pub fn total_allocated_pages(&self) -> usize {
        self.total_allocated_pages
    }

    pub fn page_fault_count(&self) -> u64 {
        self.page_fault_count
    }

    pub fn address_space_count(&self) -> usize {
        self.page_tables.len()
    }

    pub fn page_table(&self, tid: Tid) -> Option<&PageTable> {
        self.page_tables.get(&tid)
    }

    /// Tasks com address space, em ordem de id
    pub fn address_spaces(&self) -> impl Iterator<Item = Tid> + '_ {
        self.page_tables.keys().copied()
    }

    /// Todos os frames mapeados: (task, página, frame)
    pub fn mapped_frames(&self) -> impl Iterator<Item = (Tid, PageNumber, PhysFrame)> + '_ {
        self.page_tables.iter().flat_map(|(tid, table)| {
            table
                .entries()
                .filter(|(_, e)| e.present)
                .map(move |(page, e)| (*tid, page, e.frame))
        })
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

fn check_span(offset: usize, len: usize) -> MmResult<()> {
    match offset.checked_add(len) {
        Some(end) if end <= PAGE_SIZE => Ok(()),
        _ => Err(MmError::OutOfBounds),
    }
}
