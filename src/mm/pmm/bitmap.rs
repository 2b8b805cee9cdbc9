//! # Alocador de Frames por Bitmap
//!
//! Um bit por frame físico: `1` = ocupado, `0` = livre.
//!
//! ## Política de Alocação
//!
//! First-fit estrito: `allocate_frame` devolve SEMPRE o frame livre de menor
//! índice. O resultado é determinístico para uma mesma sequência de
//! chamadas, o que os testes de MM exigem.
//!
//! `next_free` é apenas uma dica de busca: toda palavra do bitmap antes dele
//! está cheia. Alocar avança a dica até a palavra usada; liberar recua a dica
//! se o frame liberado estiver antes dela. Assim a busca nunca pula um frame
//! livre de índice menor.
//!
//! ## Invariante
//!
//! `free_count() + used_count() == total_frames()` sempre.

use super::frame::PhysFrame;
use super::stats::PmmStats;
use crate::klib::Bitmap;
use crate::mm::error::{MmError, MmResult};
use crate::sys::types::FrameNumber;

/// BitmapFrameAllocator - Gerencia o pool fixo de frames físicos.
#[derive(Debug, Clone)]
pub struct BitmapFrameAllocator {
    bitmap: Bitmap,
    next_free: usize,
    stats: PmmStats,
}

impl BitmapFrameAllocator {
    /// Cria o alocador com `total_frames` frames, todos livres.
    pub fn new(total_frames: usize) -> Self {
        crate::kinfo!(
            "(PMM) Inicializando BitmapFrameAllocator: {} frames ({} KiB)",
            total_frames,
            total_frames * crate::mm::config::PAGE_SIZE / 1024
        );
        Self {
            bitmap: Bitmap::new(total_frames),
            next_free: 0,
            stats: PmmStats::new(total_frames),
        }
    }

    /// Aloca um frame físico (menor índice livre).
    pub fn allocate_frame(&mut self) -> Option<PhysFrame> {
        match self
            .bitmap
            .find_first_zero_from(self.next_free)
            .and_then(|index| Some((index, u32::try_from(index).ok()?)))
        {
            Some((index, number)) => {
                self.bitmap.set(index);
                self.stats.inc_alloc();
                self.next_free = index / 64;
                crate::ktrace!("(PMM) Frame alocado: {}", index);
                Some(PhysFrame::new(FrameNumber::new(number)))
            }
            None => {
                self.stats.inc_failed();
                crate::kerror!(
                    "(PMM) OOM: nenhum frame livre ({} em uso)",
                    self.stats.used_frames
                );
                None
            }
        }
    }

    /// Desaloca um frame físico.
    ///
    /// Frame fora do pool é `OutOfBounds`; frame já livre é `DoubleFree` e
    /// não altera o estado.
    pub fn deallocate_frame(&mut self, frame: PhysFrame) -> MmResult<()> {
        let index = frame.index();
        if index >= self.bitmap.len() {
            crate::kerror!("(PMM) Frame fora do pool: {}", index);
            return Err(MmError::OutOfBounds);
        }
        if !self.bitmap.test(index) {
            crate::kwarn!("(PMM) Double free do frame {}", index);
            return Err(MmError::DoubleFree);
        }

        self.bitmap.clear(index);
        self.stats.inc_free();
        let word = index / 64;
        if word < self.next_free {
            self.next_free = word;
        }
        crate::ktrace!("(PMM) Frame liberado: {}", index);
        Ok(())
    }

    /// `true` se o frame existe e está livre
    pub fn is_frame_free(&self, frame: PhysFrame) -> bool {
        let index = frame.index();
        index < self.bitmap.len() && !self.bitmap.test(index)
    }

    pub fn total_frames(&self) -> usize {
        self.stats.total_frames
    }

    pub fn used_count(&self) -> usize {
        self.stats.used_frames
    }

    pub fn free_count(&self) -> usize {
        self.stats.free_frames()
    }

    pub fn stats(&self) -> &PmmStats {
        &self.stats
    }
}
