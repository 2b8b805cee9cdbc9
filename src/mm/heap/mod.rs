//! # Kernel Heap Allocator
//!
//! Alocador de propósito geral sobre uma arena privada de bytes. Não tem
//! relação com a memória virtual: é usado onde o núcleo precisa de buffers
//! dinâmicos.
//!
//! ## Arquitetura: Free-list com Split e Coalescing
//!
//! A arena é um `Vec<u8>`. Cada bloco começa com um header de 32 bytes
//! (ver [`block`]) seguido do payload. Os blocos formam uma cadeia
//! duplamente ligada por OFFSET, em ordem de posição na arena:
//!
//! ```text
//! 0                32          32+a       64+a
//! [hdr A][payload A ][hdr B][payload B ]...[hdr N][payload N]
//! ```
//!
//! - **allocate:** first-fit na cadeia. Se o bloco achado sobra mais que
//!   um header + `HEAP_MIN_SPLIT`, é dividido.
//! - **free:** marca livre e funde com o vizinho seguinte e depois com o
//!   anterior, se livres.
//!
//! ## Invariantes
//!
//! - Os blocos particionam a arena sem buracos nem sobreposição.
//! - Após qualquer `free`, não existem dois blocos livres adjacentes.
//! - `used_bytes` é a soma dos payloads em uso.
//!
//! Um [`HeapPtr`] é o offset do payload; todo offset é validado contra a
//! cadeia antes de uso. Um ponteiro inválido nunca corrompe o estado.

pub mod block;
pub mod error;

pub use block::{BlockHeader, HEADER_SIZE};
pub use error::{HeapError, HeapResult};

use crate::klib::align::checked_align_up;
use crate::mm::config::{HEAP_ALIGN, HEAP_MIN_SPLIT, HEAP_SIZE};
use block::NIL;
use std::fmt;

/// Offset do payload de um bloco dentro da arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeapPtr(usize);

impl HeapPtr {
    pub const fn from_offset(offset: usize) -> Self {
        Self(offset)
    }

    pub const fn offset(self) -> usize {
        self.0
    }
}

impl fmt::Display for HeapPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Visão de um bloco para relatórios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    /// Offset do header
    pub offset: usize,
    /// Bytes de payload
    pub size: usize,
    pub free: bool,
}

pub struct HeapAllocator {
    arena: Vec<u8>,
    used_bytes: usize,
}

impl HeapAllocator {
    /// Cria o heap sobre uma arena de `size` bytes: um único bloco livre.
    pub fn new(size: usize) -> HeapResult<Self> {
        if size < HEADER_SIZE + HEAP_MIN_SPLIT {
            crate::kerror!("(Heap) Arena pequena demais: {} bytes", size);
            return Err(HeapError::InvalidSize);
        }

        let mut arena = vec![0u8; size];
        BlockHeader::new(size - HEADER_SIZE, true, NIL, NIL).encode(&mut arena, 0);

        crate::kinfo!("(Heap) Inicializado: {} KiB", size / 1024);
        Ok(Self {
            arena,
            used_bytes: 0,
        })
    }

    /// Heap com o tamanho padrão `HEAP_SIZE`
    pub fn with_default_size() -> HeapResult<Self> {
        Self::new(HEAP_SIZE)
    }

    // =========================================================================
    // ALOCAÇÃO
    // =========================================================================

    /// Aloca `size` bytes (arredondado para múltiplo de `HEAP_ALIGN`).
    pub fn allocate(&mut self, size: usize) -> HeapResult<HeapPtr> {
        if size == 0 {
            return Err(HeapError::InvalidSize);
        }
        let request = checked_align_up(size, HEAP_ALIGN).ok_or(HeapError::InvalidSize)?;

        let mut cursor = 0;
        while cursor != NIL {
            let mut header = self.header(cursor)?;
            if header.free && header.size >= request {
                if header.size > request + HEADER_SIZE + HEAP_MIN_SPLIT {
                    header = self.split(cursor, header, request)?;
                }
                header.free = false;
                self.set_header(cursor, header)?;
                self.used_bytes += header.size;

                let ptr = HeapPtr(cursor + HEADER_SIZE);
                crate::ktrace!("(Heap) alloc {} bytes em {}", header.size, ptr);
                return Ok(ptr);
            }
            cursor = header.next;
        }

        crate::kerror!(
            "(Heap) OOM: nenhum bloco livre para {} bytes ({} em uso)",
            request,
            self.used_bytes
        );
        Err(HeapError::OutOfMemory)
    }

    /// Divide o bloco em `at`, deixando-o com exatamente `request` bytes.
    /// O resto vira um bloco livre logo em seguida.
    fn split(&mut self, at: usize, mut header: BlockHeader, request: usize) -> HeapResult<BlockHeader> {
        let rest_at = at + HEADER_SIZE + request;
        let rest = BlockHeader::new(header.size - request - HEADER_SIZE, true, at, header.next);
        self.set_header(rest_at, rest)?;

        if header.next != NIL {
            let mut next = self.header(header.next)?;
            next.prev = rest_at;
            self.set_header(header.next, next)?;
        }

        header.size = request;
        header.next = rest_at;
        Ok(header)
    }

    /// Libera o bloco de `ptr` e funde vizinhos livres.
    ///
    /// Double free é avisado e não altera nada.
    pub fn free(&mut self, ptr: HeapPtr) -> HeapResult<()> {
        let at = match self.find_block(ptr) {
            Ok(at) => at,
            // Bloco já fundido com um vizinho livre: o header sumiu da cadeia
            Err(HeapError::InvalidPointer) if self.inside_free_block(ptr) => {
                crate::kwarn!("(Heap) Double free em {} (bloco já fundido)", ptr);
                return Err(HeapError::DoubleFree);
            }
            Err(e) => {
                crate::kwarn!("(Heap) Ponteiro inválido: {}", ptr);
                return Err(e);
            }
        };
        let mut header = self.header(at)?;

        if header.free {
            crate::kwarn!("(Heap) Double free em {}", ptr);
            return Err(HeapError::DoubleFree);
        }

        header.free = true;
        self.used_bytes -= header.size;
        crate::ktrace!("(Heap) free {} bytes em {}", header.size, ptr);

        // Funde com o seguinte
        if header.next != NIL {
            let next = self.header(header.next)?;
            if next.free {
                header.size += HEADER_SIZE + next.size;
                header.next = next.next;
                self.relink_prev(next.next, at)?;
            }
        }
        self.set_header(at, header)?;

        // E com o anterior
        if header.prev != NIL {
            let mut prev = self.header(header.prev)?;
            if prev.free {
                prev.size += HEADER_SIZE + header.size;
                prev.next = header.next;
                self.set_header(header.prev, prev)?;
                self.relink_prev(header.next, header.prev)?;
            }
        }
        Ok(())
    }

    /// Redimensiona a alocação.
    ///
    /// - `None` equivale a `allocate(new_size)`
    /// - `new_size == 0` equivale a `free` e devolve `None`
    /// - Bloco já grande o bastante: mesmo ponteiro, sem encolher
    /// - Caso contrário aloca, copia e libera o antigo. Se a nova alocação
    ///   falhar, o bloco antigo continua intacto.
    pub fn reallocate(&mut self, ptr: Option<HeapPtr>, new_size: usize) -> HeapResult<Option<HeapPtr>> {
        let ptr = match ptr {
            Some(p) => p,
            None => return self.allocate(new_size).map(Some),
        };

        if new_size == 0 {
            self.free(ptr)?;
            return Ok(None);
        }

        let header = self.live_header(ptr)?;
        if header.size >= new_size {
            return Ok(Some(ptr));
        }

        let new_ptr = self.allocate(new_size)?;
        self.arena
            .copy_within(ptr.0..ptr.0 + header.size, new_ptr.0);
        self.free(ptr)?;

        crate::ktrace!("(Heap) realloc {} -> {} ({} bytes)", ptr, new_ptr, new_size);
        Ok(Some(new_ptr))
    }

    // =========================================================================
    // ACESSO AO PAYLOAD
    // =========================================================================

    pub fn payload(&self, ptr: HeapPtr) -> HeapResult<&[u8]> {
        let header = self.live_header(ptr)?;
        Ok(&self.arena[ptr.0..ptr.0 + header.size])
    }

    pub fn payload_mut(&mut self, ptr: HeapPtr) -> HeapResult<&mut [u8]> {
        let header = self.live_header(ptr)?;
        Ok(&mut self.arena[ptr.0..ptr.0 + header.size])
    }

    fn live_header(&self, ptr: HeapPtr) -> HeapResult<BlockHeader> {
        let at = self.find_block(ptr).inspect_err(|_| {
            crate::kwarn!("(Heap) Ponteiro inválido: {}", ptr);
        })?;
        let header = self.header(at)?;
        if header.free {
            return Err(HeapError::InvalidPointer);
        }
        Ok(header)
    }

    // =========================================================================
    // CADEIA DE BLOCOS
    // =========================================================================

    /// Offset do header cujo payload começa em `ptr`.
    fn find_block(&self, ptr: HeapPtr) -> HeapResult<usize> {
        let target = ptr.0.checked_sub(HEADER_SIZE).ok_or(HeapError::InvalidPointer)?;

        let mut cursor = 0;
        while cursor != NIL && cursor <= target {
            if cursor == target {
                return Ok(cursor);
            }
            cursor = self.header(cursor)?.next;
        }
        Err(HeapError::InvalidPointer)
    }

    /// `true` se `ptr` cai dentro do payload de um bloco livre
    fn inside_free_block(&self, ptr: HeapPtr) -> bool {
        self.blocks().any(|b| {
            let start = b.offset + HEADER_SIZE;
            b.free && ptr.0 >= start && ptr.0 < start + b.size
        })
    }

    fn header(&self, at: usize) -> HeapResult<BlockHeader> {
        if at.checked_add(HEADER_SIZE).map_or(true, |end| end > self.arena.len()) {
            return Err(HeapError::InvalidPointer);
        }
        Ok(BlockHeader::decode(&self.arena, at))
    }

    fn set_header(&mut self, at: usize, header: BlockHeader) -> HeapResult<()> {
        if at.checked_add(HEADER_SIZE).map_or(true, |end| end > self.arena.len()) {
            return Err(HeapError::InvalidPointer);
        }
        header.encode(&mut self.arena, at);
        Ok(())
    }

    /// Aponta o `prev` do bloco em `at` (se existir) para `prev`.
    fn relink_prev(&mut self, at: usize, prev: usize) -> HeapResult<()> {
        if at == NIL {
            return Ok(());
        }
        let mut header = self.header(at)?;
        header.prev = prev;
        self.set_header(at, header)
    }

    /// Blocos em ordem de posição na arena
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks {
            heap: self,
            cursor: 0,
        }
    }

    // =========================================================================
    // CONSULTAS
    // =========================================================================

    pub fn total_bytes(&self) -> usize {
        self.arena.len()
    }

    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    /// `total - used - HEADER_SIZE`: headers de blocos divididos contam como
    /// espaço livre.
    pub fn free_bytes(&self) -> usize {
        self.arena.len() - self.used_bytes - HEADER_SIZE
    }

    /// Percentual da arena em uso
    pub fn utilization(&self) -> f64 {
        self.used_bytes as f64 * 100.0 / self.arena.len() as f64
    }

    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }

    pub fn free_block_count(&self) -> usize {
        self.blocks().filter(|b| b.free).count()
    }

    pub fn largest_free_block(&self) -> usize {
        self.blocks()
            .filter(|b| b.free)
            .map(|b| b.size)
            .max()
            .unwrap_or(0)
    }
}

/// Iterador sobre a cadeia de blocos
pub struct Blocks<'a> {
    heap: &'a HeapAllocator,
    cursor: usize,
}

impl Iterator for Blocks<'_> {
    type Item = BlockInfo;

    fn next(&mut self) -> Option<BlockInfo> {
        if self.cursor == NIL {
            return None;
        }
        let header = self.heap.header(self.cursor).ok()?;
        let info = BlockInfo {
            offset: self.cursor,
            size: header.size,
            free: header.free,
        };
        self.cursor = header.next;
        Some(info)
    }
}
