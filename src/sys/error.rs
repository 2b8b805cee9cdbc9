//! # Standard Error Codes (Errno)
//!
//! Códigos de erro devolvidos na fronteira de syscalls.
//! Segue a numeração POSIX/Linux; valores negativos são usados no retorno
//! (`isize`) do dispatcher.
//!
//! Os erros internos (`SchedError`, `MmError`, `HeapError`) são convertidos
//! para cá via `From` apenas quando cruzam a fronteira de syscall.

use crate::mm::error::MmError;
use crate::mm::heap::HeapError;
use crate::sched::error::SchedError;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    ESRCH = 3,   // No such process
    ENOMEM = 12, // Out of memory
    EFAULT = 14, // Bad address
    EEXIST = 17, // File exists
    EINVAL = 22, // Invalid argument
    ENOSYS = 38, // Function not implemented
}

impl Errno {
    pub fn as_isize(self) -> isize {
        -(self as i32) as isize
    }
}

impl From<SchedError> for Errno {
    fn from(err: SchedError) -> Self {
        match err {
            SchedError::NotFound => Errno::ESRCH,
            SchedError::InvalidTransition => Errno::EINVAL,
        }
    }
}

impl From<MmError> for Errno {
    fn from(err: MmError) -> Self {
        match err {
            MmError::OutOfMemory => Errno::ENOMEM,
            MmError::AlreadyExists | MmError::AlreadyMapped => Errno::EEXIST,
            MmError::NoAddressSpace | MmError::NotMapped => Errno::EFAULT,
            MmError::DoubleFree | MmError::OutOfBounds => Errno::EINVAL,
        }
    }
}

impl From<HeapError> for Errno {
    fn from(err: HeapError) -> Self {
        match err {
            HeapError::OutOfMemory => Errno::ENOMEM,
            HeapError::InvalidPointer => Errno::EFAULT,
            HeapError::InvalidSize | HeapError::DoubleFree => Errno::EINVAL,
        }
    }
}

impl std::fmt::Display for Errno {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ({})", self, *self as i32)
    }
}

impl std::error::Error for Errno {}
