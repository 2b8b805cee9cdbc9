//! Forge Sim: Binário Principal.
//!
//! Responsabilidade:
//! 1. Instalar o logger.
//! 2. Montar a `KernelConfig` (padrões + variáveis `FORGE_*`).
//! 3. Bootar o kernel. Falha aqui é kernel panic.
//! 4. Rodar as demonstrações e o tick loop.
//! 5. Imprimir os relatórios e desligar.

mod report;

use anyhow::{Context, Result};
use forge_sim::core::kernel::{Kernel, SharedKernel};
use forge_sim::core::logging;
use forge_sim::mm::vmm::Protection;
use forge_sim::sched::task::Priority;
use forge_sim::sys::types::PageNumber;
use forge_sim::syscall::{self, numbers};
use forge_sim::{kinfo, kok, kwarn, KernelConfig};

/// Ticks do loop principal quando `FORGE_TICKS` não é definido
const DEFAULT_TICKS: u64 = 50;

fn main() -> Result<()> {
    logging::init();

    let config = KernelConfig::default()
        .with_overrides(std::env::vars())
        .context("variáveis FORGE_* inválidas")?;
    let ticks = match std::env::var("FORGE_TICKS") {
        Ok(v) => v.trim().parse().context("FORGE_TICKS não é um número")?,
        Err(_) => DEFAULT_TICKS,
    };

    let mut kernel = match Kernel::boot(config) {
        Ok(k) => k,
        Err(e) => panic!("KERNEL PANIC: boot falhou: {}", e),
    };

    scheduler_demo(&mut kernel)?;
    memory_demo(&mut kernel)?;
    heap_demo(&mut kernel)?;
    syscall_demo(&mut kernel);

    let shared = kernel.into_shared();
    run_tick_loop(&shared, ticks);

    let mut kernel = shared.lock();
    print!("{}", report::task_table(kernel.scheduler()));
    print!("{}", report::memory_map(kernel.memory()));
    print!("{}", report::heap_report(kernel.heap()));

    kernel.halt();
    let released = kernel.shutdown();
    kok!("(Main) Sessão encerrada após {} ticks ({} frames devolvidos)", kernel.uptime_ticks(), released);
    Ok(())
}

fn scheduler_demo(kernel: &mut Kernel) -> Result<()> {
    kinfo!("(Main) === Demonstração do scheduler ===");

    let shell = kernel.spawn("shell", Priority::High)?;
    let editor = kernel.spawn("editor", Priority::Normal)?;
    let _compiler = kernel.spawn("compiler", Priority::Low)?;
    let logger = kernel.spawn("logger", Priority::Low)?;

    kernel.run_for(kernel.config().quantum * 2);

    kernel.scheduler_mut().block_task(editor)?;
    kernel.run_for(5);
    kernel.scheduler_mut().unblock_task(editor)?;

    kernel.scheduler_mut().yield_now();
    kernel.kill(logger)?;

    if let Err(e) = kernel.scheduler_mut().unblock_task(shell) {
        kwarn!("(Main) unblock do shell recusado (esperado): {}", e);
    }

    print!("{}", report::task_table(kernel.scheduler()));
    Ok(())
}

fn memory_demo(kernel: &mut Kernel) -> Result<()> {
    kinfo!("(Main) === Demonstração de memória ===");

    let tids: Vec<_> = kernel
        .scheduler()
        .tasks()
        .filter(|t| !t.state.is_terminated())
        .map(|t| t.tid)
        .collect();

    for (i, tid) in tids.iter().enumerate() {
        for page in 0..=i as u32 {
            kernel
                .memory_mut()
                .allocate_page(*tid, PageNumber::new(page), Protection::DEFAULT)?;
        }
    }

    let Some(&target) = tids.last() else {
        return Ok(());
    };

    let fault_page = PageNumber::new(0x100);
    let outcome = kernel.page_fault(target, fault_page);
    kinfo!("(Main) Page fault em {} da task {}: {:?}", fault_page, target, outcome);

    let mm = kernel.memory_mut();
    mm.set_protection(target, PageNumber::new(0), Protection::READ)?;
    mm.write_page(target, fault_page, 0, b"Forge")?;
    let mut buf = [0u8; 5];
    mm.read_page(target, fault_page, 0, &mut buf)?;
    kinfo!("(Main) Lido da página {}: {}", fault_page, String::from_utf8_lossy(&buf));

    print!("{}", report::memory_map(kernel.memory()));
    Ok(())
}

fn heap_demo(kernel: &mut Kernel) -> Result<()> {
    kinfo!("(Main) === Demonstração do heap ===");
    let heap = kernel.heap_mut();

    let a = heap.allocate(100)?;
    let b = heap.allocate(200)?;
    let c = heap.allocate(4000)?;
    heap.payload_mut(b)?.fill(0xAB);

    heap.free(a)?;
    if let Err(e) = heap.free(a) {
        kwarn!("(Main) Segundo free de {} recusado: {}", a, e);
    }

    let d = heap.allocate(50)?;
    let b = heap
        .reallocate(Some(b), 1024)?
        .context("realloc devolveu None para tamanho não nulo")?;

    print!("{}", report::heap_report(heap));

    for ptr in [b, c, d] {
        heap.free(ptr)?;
    }
    kinfo!(
        "(Main) Heap após liberar tudo: {} bloco(s), {} bytes usados",
        heap.block_count(),
        heap.used_bytes()
    );
    Ok(())
}

fn syscall_demo(kernel: &mut Kernel) {
    kinfo!("(Main) === Demonstração de syscalls ===");

    let pid = syscall::dispatch(kernel, numbers::SYS_GETPID, 0, 0, 0);
    let addr = syscall::dispatch(kernel, numbers::SYS_ALLOC, 0x200, 0, 0);
    let freed = syscall::dispatch(kernel, numbers::SYS_FREE, 0x200, 0, 0);
    let open = syscall::dispatch(kernel, numbers::SYS_OPEN, 0, 0, 0);
    syscall::dispatch(kernel, numbers::SYS_YIELD, 0, 0, 0);

    kinfo!(
        "(Main) getpid={} alloc={} free={} open={}",
        pid,
        addr,
        freed,
        open
    );
}

fn run_tick_loop(shared: &SharedKernel, ticks: u64) {
    kinfo!("(Main) Tick loop: {} ticks", ticks);
    for _ in 0..ticks {
        let mut kernel = shared.lock();
        kernel.tick();
        if kernel.uptime_ticks() % 10 == 0 {
            if let Some(task) = kernel.scheduler().current_task() {
                kinfo!("(Main) tick {}: rodando {} '{}'", kernel.uptime_ticks(), task.tid, task.name);
            }
        }
    }
}
