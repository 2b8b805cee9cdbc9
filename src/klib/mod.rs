//! Kernel Library (KLib).
//!
//! Utilitários agnósticos para uso interno do núcleo.

pub mod align;
pub mod bitmap;

pub use bitmap::Bitmap;
