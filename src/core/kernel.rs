//! # Kernel Context
//!
//! Objeto que possui o Scheduler, o Memory Manager e o heap do kernel.
//! Não há estado global: quem dirige o tick loop recebe o `Kernel` por
//! valor ou, se precisar compartilhar, o embrulha em [`SharedKernel`].
//!
//! ## Ordem de Boot
//!
//! 1. Valida a `KernelConfig`
//! 2. Scheduler (política + quantum)
//! 3. Memory Manager (pool de frames)
//! 4. Heap do kernel
//! 5. Task `idle` (prioridade mínima) com address space próprio
//!
//! Falha em qualquer etapa é fatal para quem chamou `boot`.

use super::config::KernelConfig;
use crate::mm::error::MmError;
use crate::mm::heap::{HeapAllocator, HeapError};
use crate::mm::vmm::{FaultResult, MemoryManager};
use crate::sched::config::IDLE_TASK_NAME;
use crate::sched::scheduler::Scheduler;
use crate::sched::task::Priority;
use crate::sys::error::Errno;
use crate::sys::types::{PageNumber, Ticks, Tid};
use std::fmt;

/// Kernel protegido por spinlock para drivers que precisam compartilhar
pub type SharedKernel = spin::Mutex<Kernel>;

/// Erros fatais de inicialização
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    InvalidConfig(&'static str),
    Memory(MmError),
    Heap(HeapError),
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(why) => write!(f, "Configuração inválida: {}", why),
            Self::Memory(e) => write!(f, "Falha no MM: {}", e),
            Self::Heap(e) => write!(f, "Falha no heap: {}", e),
        }
    }
}

impl std::error::Error for BootError {}

impl From<MmError> for BootError {
    fn from(e: MmError) -> Self {
        Self::Memory(e)
    }
}

impl From<HeapError> for BootError {
    fn from(e: HeapError) -> Self {
        Self::Heap(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelState {
    /// Aceitando ticks
    Running,
    /// Parado; ticks são ignorados
    Halted,
    /// Address spaces destruídos
    ShutDown,
}

pub struct Kernel {
    config: KernelConfig,
    scheduler: Scheduler,
    memory: MemoryManager,
    heap: HeapAllocator,
    state: KernelState,
    idle: Option<Tid>,
}

impl Kernel {
    pub fn boot(config: KernelConfig) -> Result<Self, BootError> {
        crate::kinfo!("(Kernel) Forge Sim - Iniciando");
        config.validate()?;

        let scheduler = Scheduler::with_quantum(config.policy, config.quantum);
        let memory = MemoryManager::with_frames(config.total_frames);
        let heap = HeapAllocator::new(config.heap_size)?;

        let mut kernel = Self {
            config,
            scheduler,
            memory,
            heap,
            state: KernelState::Running,
            idle: None,
        };

        if config.spawn_idle {
            let idle = kernel.spawn_task(IDLE_TASK_NAME, Priority::Idle)?;
            kernel.idle = Some(idle);
            kernel.scheduler.schedule();
        }

        crate::kok!(
            "(Kernel) Boot completo: {} frames, heap {} KiB, política {}",
            config.total_frames,
            config.heap_size / 1024,
            config.policy
        );
        Ok(kernel)
    }

    /// Cria uma task com address space próprio
    pub fn spawn(&mut self, name: &str, priority: Priority) -> Result<Tid, Errno> {
        Ok(self.spawn_task(name, priority)?)
    }

    fn spawn_task(&mut self, name: &str, priority: Priority) -> Result<Tid, MmError> {
        let tid = self.scheduler.create_task(name, priority);
        self.memory.create_address_space(tid)?;
        Ok(tid)
    }

    /// Termina a task e devolve seus frames. Retorna quantos frames voltaram.
    pub fn kill(&mut self, tid: Tid) -> Result<usize, Errno> {
        self.scheduler.terminate_task(tid)?;
        self.release_address_space(tid)
    }

    /// `exit` da task corrente
    pub fn exit_current(&mut self, code: i32) -> Result<Tid, Errno> {
        let tid = self.scheduler.exit_current(code)?;
        self.release_address_space(tid)?;
        crate::kinfo!("(Kernel) Task {} saiu com código {}", tid, code);
        Ok(tid)
    }

    fn release_address_space(&mut self, tid: Tid) -> Result<usize, Errno> {
        if !self.memory.has_address_space(tid) {
            return Ok(0);
        }
        Ok(self.memory.destroy_address_space(tid)?)
    }

    /// Um tick do timer simulado
    pub fn tick(&mut self) {
        if self.state != KernelState::Running {
            return;
        }
        self.scheduler.tick();
    }

    pub fn run_for(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Encaminha um page fault ao Memory Manager
    pub fn page_fault(&mut self, tid: Tid, page: PageNumber) -> FaultResult {
        self.memory.handle_page_fault(tid, page)
    }

    pub fn halt(&mut self) {
        if self.state == KernelState::Running {
            crate::kinfo!("(Kernel) Halt no tick {}", self.uptime_ticks());
            self.state = KernelState::Halted;
        }
    }

    /// Destrói todos os address spaces. Retorna quantos frames voltaram.
    pub fn shutdown(&mut self) -> usize {
        if self.state == KernelState::ShutDown {
            return 0;
        }
        crate::kinfo!("(Kernel) Desligando...");

        let tids: Vec<Tid> = self.memory.address_spaces().collect();
        let mut released = 0;
        for tid in tids {
            released += self.release_address_space(tid).unwrap_or(0);
        }
        self.state = KernelState::ShutDown;

        crate::kok!("(Kernel) Desligado: {} frames devolvidos", released);
        released
    }

    // =========================================================================
    // ACESSO AOS SUBSISTEMAS
    // =========================================================================

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    pub fn memory(&self) -> &MemoryManager {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryManager {
        &mut self.memory
    }

    pub fn heap(&self) -> &HeapAllocator {
        &self.heap
    }

    pub fn heap_mut(&mut self) -> &mut HeapAllocator {
        &mut self.heap
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn state(&self) -> KernelState {
        self.state
    }

    pub fn idle_tid(&self) -> Option<Tid> {
        self.idle
    }

    pub fn uptime_ticks(&self) -> Ticks {
        self.scheduler.ticks()
    }

    pub fn into_shared(self) -> SharedKernel {
        spin::Mutex::new(self)
    }
}
