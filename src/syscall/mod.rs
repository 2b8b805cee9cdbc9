//! # System Call Interface
//!
//! Fronteira entre as tasks simuladas e o núcleo.

pub mod dispatcher;
pub mod numbers;

pub use dispatcher::dispatch;

#[cfg(test)]
mod test;
