//! # Syscall Dispatcher
//!
//! Traduz (número, argumentos) em chamadas ao `Kernel`. Toda syscall age
//! sobre a task corrente do scheduler.
//!
//! Retorno: valor >= 0 em sucesso, `-errno` em falha.

use super::numbers::*;
use crate::core::kernel::Kernel;
use crate::mm::vmm::Protection;
use crate::sys::error::Errno;
use crate::sys::types::{PageNumber, Tid};

type SysResult = Result<usize, Errno>;

pub fn dispatch(kernel: &mut Kernel, num: usize, arg1: usize, arg2: usize, arg3: usize) -> isize {
    crate::ktrace!(
        "(Syscall) {} ({:#x}) args=({:#x}, {:#x}, {:#x})",
        name(num),
        num,
        arg1,
        arg2,
        arg3
    );

    let result = match num {
        SYS_EXIT => sys_exit(kernel, arg1),
        SYS_YIELD => sys_yield(kernel),
        SYS_GETPID => sys_getpid(kernel),
        SYS_ALLOC => sys_alloc(kernel, arg1, arg2),
        SYS_FREE => sys_free(kernel, arg1),
        SYS_SEND_MSG | SYS_RECV_MSG | SYS_OPEN | SYS_CLOSE | SYS_READ | SYS_WRITE => {
            Err(Errno::ENOSYS)
        }
        _ => {
            crate::kwarn!("(Syscall) Syscall desconhecida: {:#x}", num);
            Err(Errno::ENOSYS)
        }
    };

    match result {
        Ok(value) => value as isize,
        Err(e) => {
            crate::kdebug!("(Syscall) {} falhou: {:?}", name(num), e);
            e.as_isize()
        }
    }
}

fn current(kernel: &Kernel) -> Result<Tid, Errno> {
    kernel.scheduler().current_tid().ok_or(Errno::ESRCH)
}

fn page_arg(arg: usize) -> Result<PageNumber, Errno> {
    u32::try_from(arg)
        .map(PageNumber::new)
        .map_err(|_| Errno::EINVAL)
}

fn sys_exit(kernel: &mut Kernel, code: usize) -> SysResult {
    kernel.exit_current(code as i32)?;
    Ok(0)
}

fn sys_yield(kernel: &mut Kernel) -> SysResult {
    kernel.scheduler_mut().yield_now();
    Ok(0)
}

fn sys_getpid(kernel: &mut Kernel) -> SysResult {
    Ok(current(kernel)?.as_u32() as usize)
}

fn sys_alloc(kernel: &mut Kernel, page: usize, prot_bits: usize) -> SysResult {
    let tid = current(kernel)?;
    let page = page_arg(page)?;
    let protection = if prot_bits == 0 {
        Protection::DEFAULT
    } else {
        u8::try_from(prot_bits)
            .ok()
            .and_then(Protection::from_bits)
            .ok_or(Errno::EINVAL)?
    };

    let frame = kernel.memory_mut().allocate_page(tid, page, protection)?;
    Ok(frame.start_address() as usize)
}

fn sys_free(kernel: &mut Kernel, page: usize) -> SysResult {
    let tid = current(kernel)?;
    let page = page_arg(page)?;
    kernel.memory_mut().free_page(tid, page)?;
    Ok(0)
}
