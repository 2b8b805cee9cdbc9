//! Testes do dispatcher de syscalls

use crate::core::config::KernelConfig;
use crate::core::kernel::Kernel;
use crate::mm::config::PAGE_SIZE;
use crate::sched::task::{Priority, TaskState};
use crate::sys::error::Errno;
use crate::syscall::dispatch;
use crate::syscall::numbers::*;

fn kernel() -> Kernel {
    Kernel::boot(KernelConfig::default().with_frames(8).with_heap_size(4096)).unwrap()
}

#[test]
fn getpid_reports_current_task() {
    let mut k = kernel();
    let idle = k.idle_tid().unwrap();
    assert_eq!(dispatch(&mut k, SYS_GETPID, 0, 0, 0), idle.as_u32() as isize);
}

#[test]
fn alloc_and_free_act_on_current_task() {
    let mut k = kernel();
    let idle = k.idle_tid().unwrap();

    assert_eq!(dispatch(&mut k, SYS_ALLOC, 3, 0, 0), 0);
    assert_eq!(dispatch(&mut k, SYS_ALLOC, 4, 0, 0), PAGE_SIZE as isize);
    assert_eq!(dispatch(&mut k, SYS_ALLOC, 3, 0, 0), Errno::EEXIST.as_isize());
    assert_eq!(k.memory().task_memory_usage(idle), 2 * PAGE_SIZE);

    assert_eq!(dispatch(&mut k, SYS_FREE, 3, 0, 0), 0);
    assert_eq!(dispatch(&mut k, SYS_FREE, 3, 0, 0), Errno::EFAULT.as_isize());
}

#[test]
fn alloc_rejects_unknown_protection_bits() {
    let mut k = kernel();
    assert_eq!(dispatch(&mut k, SYS_ALLOC, 1, 0x80, 0), Errno::EINVAL.as_isize());
    assert_eq!(dispatch(&mut k, SYS_ALLOC, usize::MAX, 0, 0), Errno::EINVAL.as_isize());
}

#[test]
fn alloc_reports_out_of_memory() {
    let mut k = kernel();
    for page in 0..8 {
        assert!(dispatch(&mut k, SYS_ALLOC, page, 0, 0) >= 0);
    }
    assert_eq!(dispatch(&mut k, SYS_ALLOC, 8, 0, 0), Errno::ENOMEM.as_isize());
}

#[test]
fn yield_hands_cpu_to_next_task() {
    let mut k = kernel();
    let worker = k.spawn("worker", Priority::Normal).unwrap();

    assert_eq!(dispatch(&mut k, SYS_YIELD, 0, 0, 0), 0);
    assert_eq!(k.scheduler().current_tid(), Some(worker));
}

#[test]
fn exit_terminates_and_releases_memory() {
    let mut k = kernel();
    let idle = k.idle_tid().unwrap();
    let worker = k.spawn("worker", Priority::Normal).unwrap();
    dispatch(&mut k, SYS_ALLOC, 0, 0, 0);

    assert_eq!(dispatch(&mut k, SYS_EXIT, 3, 0, 0), 0);
    assert_eq!(k.scheduler().task(idle).unwrap().state, TaskState::Terminated);
    assert_eq!(k.scheduler().task(idle).unwrap().exit_code, Some(3));
    assert_eq!(k.memory().used_frame_count(), 0);
    assert_eq!(dispatch(&mut k, SYS_GETPID, 0, 0, 0), worker.as_u32() as isize);
}

#[test]
fn collaborator_calls_are_not_implemented() {
    let mut k = kernel();
    for num in [SYS_OPEN, SYS_READ, SYS_SEND_MSG, 0x999] {
        assert_eq!(dispatch(&mut k, num, 0, 0, 0), Errno::ENOSYS.as_isize());
    }
}

#[test]
fn calls_without_current_task_fail() {
    let mut k = Kernel::boot(KernelConfig::default().with_frames(4).without_idle()).unwrap();
    assert_eq!(dispatch(&mut k, SYS_GETPID, 0, 0, 0), Errno::ESRCH.as_isize());
    assert_eq!(dispatch(&mut k, SYS_ALLOC, 0, 0, 0), Errno::ESRCH.as_isize());
    assert_eq!(dispatch(&mut k, SYS_EXIT, 0, 0, 0), Errno::ESRCH.as_isize());
}
