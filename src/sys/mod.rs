//! System Definitions.
//!
//! Tipos e códigos de erro que definem a interface entre o núcleo e quem o dirige.

pub mod error;
pub mod types;

pub use error::Errno;
pub use types::{FrameNumber, PageNumber, Ticks, Tid};
