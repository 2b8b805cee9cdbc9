//! # Physical Memory Manager (PMM)
//!
//! Pool fixo de frames físicos controlado por bitmap. O PMM não sabe nada de
//! tasks: quem associa frames a páginas é o `MemoryManager` (vmm).
//!
//! O bitmap é compartilhado por todos os address spaces e só pode ser
//! alterado via `allocate_frame` / `deallocate_frame`.

pub mod bitmap;
pub mod frame;
pub mod stats;

pub use bitmap::BitmapFrameAllocator;
pub use frame::PhysFrame;
pub use stats::PmmStats;
