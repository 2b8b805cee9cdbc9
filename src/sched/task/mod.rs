//! Task management module

pub mod accounting;
pub mod entity;
pub mod priority;
pub mod state;

pub use crate::sys::Tid;
pub use accounting::Accounting;
pub use entity::Task;
pub use priority::Priority;
pub use state::TaskState;
