//! Core Module
//!
//! Contexto do kernel, configuração e logging.

pub mod config;
pub mod kernel;
pub mod logging;

pub use config::KernelConfig;
pub use kernel::{BootError, Kernel, KernelState, SharedKernel};
