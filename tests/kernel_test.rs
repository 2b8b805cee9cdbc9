//! Testes de integração: o kernel inteiro dirigido pela API pública.

use forge_sim::core::kernel::{BootError, Kernel, KernelState};
use forge_sim::core::logging;
use forge_sim::mm::vmm::{FaultResult, Protection};
use forge_sim::sched::scheduler::SchedulingPolicy;
use forge_sim::sched::task::{Priority, TaskState};
use forge_sim::sys::error::Errno;
use forge_sim::sys::types::{PageNumber, Tid};
use forge_sim::syscall::{dispatch, numbers};
use forge_sim::KernelConfig;

fn small_config() -> KernelConfig {
    KernelConfig::default()
        .with_frames(32)
        .with_heap_size(64 * 1024)
        .with_quantum(4)
}

#[test]
fn boot_creates_running_idle_task() {
    logging::init_for_tests();
    let kernel = Kernel::boot(small_config()).unwrap();

    let idle = kernel.idle_tid().unwrap();
    let task = kernel.scheduler().task(idle).unwrap();
    assert_eq!(task.priority, Priority::Idle);
    assert_eq!(task.state, TaskState::Running);
    assert_eq!(kernel.scheduler().current_tid(), Some(idle));
    assert!(kernel.memory().page_table(idle).is_some());
    assert_eq!(kernel.state(), KernelState::Running);
    assert_eq!(kernel.heap().used_bytes(), 0);
}

#[test]
fn invalid_config_fails_boot() {
    let err = Kernel::boot(small_config().with_quantum(0)).err();
    assert!(matches!(err, Some(BootError::InvalidConfig(_))));
}

#[test]
fn unallocatable_pool_fails_boot_without_aborting() {
    let err = Kernel::boot(small_config().with_frames(usize::MAX / 1024)).err();
    assert!(matches!(err, Some(BootError::InvalidConfig(_))));

    let err = Kernel::boot(small_config().with_heap_size(usize::MAX)).err();
    assert!(matches!(err, Some(BootError::InvalidConfig(_))));
}

#[test]
fn tick_loop_shares_cpu_round_robin() {
    logging::init_for_tests();
    let mut kernel = Kernel::boot(small_config()).unwrap();
    let a = kernel.spawn("a", Priority::Normal).unwrap();
    let b = kernel.spawn("b", Priority::Normal).unwrap();

    kernel.run_for(40);

    let cpu = |tid| kernel.scheduler().task(tid).unwrap().cpu_time();
    assert!(cpu(a) > 0 && cpu(b) > 0);
    let total: u64 = kernel.scheduler().tasks().map(|t| t.cpu_time()).sum();
    assert_eq!(total, 40);
    assert_eq!(kernel.uptime_ticks(), 40);
}

#[test]
fn priority_kernel_runs_highest_task() {
    let mut kernel =
        Kernel::boot(small_config().with_policy(SchedulingPolicy::Priority)).unwrap();
    let low = kernel.spawn("low", Priority::Low).unwrap();
    let high = kernel.spawn("high", Priority::High).unwrap();

    // idle esgota o quantum e cede para a mais alta
    kernel.run_for(4);
    assert_eq!(kernel.scheduler().current_tid(), Some(high));

    kernel.kill(high).unwrap();
    assert_eq!(kernel.scheduler().current_tid(), Some(low));
}

#[test]
fn kill_reclaims_all_frames() {
    let mut kernel = Kernel::boot(small_config()).unwrap();
    let worker = kernel.spawn("worker", Priority::Normal).unwrap();
    for page in 0..6 {
        kernel
            .memory_mut()
            .allocate_page(worker, PageNumber::new(page), Protection::DEFAULT)
            .unwrap();
    }
    assert_eq!(kernel.memory().used_frame_count(), 6);

    assert_eq!(kernel.kill(worker), Ok(6));
    assert_eq!(kernel.memory().used_frame_count(), 0);
    assert_eq!(kernel.memory().free_frame_count(), 32);
    assert!(kernel.kill(worker).is_err());
}

#[test]
fn page_fault_routed_to_memory_manager() {
    let mut kernel = Kernel::boot(small_config()).unwrap();
    let worker = kernel.spawn("worker", Priority::Normal).unwrap();
    let page = PageNumber::new(77);

    let result = kernel.page_fault(worker, page);
    assert!(matches!(result, FaultResult::Recovered(_)));
    assert_eq!(kernel.memory().page_fault_count(), 1);
    assert!(kernel.memory_mut().translate(worker, page).is_some());
}

#[test]
fn syscalls_drive_current_task() {
    let mut kernel = Kernel::boot(small_config()).unwrap();
    let worker = kernel.spawn("worker", Priority::Normal).unwrap();

    dispatch(&mut kernel, numbers::SYS_YIELD, 0, 0, 0);
    assert_eq!(
        dispatch(&mut kernel, numbers::SYS_GETPID, 0, 0, 0),
        worker.as_u32() as isize
    );
    assert!(dispatch(&mut kernel, numbers::SYS_ALLOC, 5, 0, 0) >= 0);
    assert_eq!(kernel.memory().task_memory_usage(worker), 4096);
}

#[test]
fn halt_stops_ticks_and_shutdown_releases_memory() {
    let mut kernel = Kernel::boot(small_config()).unwrap();
    let worker = kernel.spawn("worker", Priority::Normal).unwrap();
    kernel
        .memory_mut()
        .allocate_page(worker, PageNumber::new(0), Protection::DEFAULT)
        .unwrap();
    kernel.run_for(3);

    kernel.halt();
    kernel.run_for(10);
    assert_eq!(kernel.uptime_ticks(), 3);
    assert_eq!(kernel.state(), KernelState::Halted);

    assert_eq!(kernel.shutdown(), 1);
    assert_eq!(kernel.memory().address_space_count(), 0);
    assert_eq!(kernel.state(), KernelState::ShutDown);
    assert_eq!(kernel.shutdown(), 0);
}

#[test]
fn shared_kernel_serializes_access() {
    let shared = Kernel::boot(small_config()).unwrap().into_shared();
    for _ in 0..8 {
        shared.lock().tick();
    }
    assert_eq!(shared.lock().uptime_ticks(), 8);
}

#[test]
fn heap_lives_inside_kernel_context() {
    let mut kernel = Kernel::boot(small_config()).unwrap();
    let heap = kernel.heap_mut();
    let p = heap.allocate(128).unwrap();
    heap.payload_mut(p).unwrap()[0] = 42;
    assert_eq!(heap.payload(p).unwrap()[0], 42);
    heap.free(p).unwrap();
    assert_eq!(heap.block_count(), 1);
}

#[test]
fn task_api_reports_errno() {
    let mut kernel = Kernel::boot(small_config()).unwrap();

    let spawned: Result<Tid, Errno> = kernel.spawn("worker", Priority::Normal);
    let worker = spawned.unwrap();
    assert_eq!(kernel.kill(Tid::new(999)), Err(Errno::ESRCH));
    assert_eq!(kernel.kill(worker), Ok(0));
    assert_eq!(kernel.kill(worker), Err(Errno::EINVAL));
}
