//! Virtual Memory Manager (VMM)
//!
//! Page tables por task, proteção de páginas e demand paging sobre o pool
//! de frames do PMM.

pub mod flags;
pub mod manager;
pub mod page_table;

pub use flags::Protection;
pub use manager::{FaultResult, MemoryManager};
pub use page_table::{PageTable, PageTableEntry};
