//! Scheduler principal
//!
//! Dono de todos os `Task`, da fila de prontos e da referência à task
//! corrente. Não tem lock interno: quem o dirige serializa as chamadas.
//!
//! ## Invariantes
//!
//! - Uma task está na `RunQueue` se e somente se seu estado é `Ready`.
//! - Uma task está `Running` se e somente se é a `current`.
//! - Ids são monotônicos e nunca reutilizados, mesmo após `reap_terminated`.

pub mod policy;
pub mod runqueue;

pub use policy::SchedulingPolicy;
pub use runqueue::RunQueue;

use super::config::DEFAULT_QUANTUM;
use super::error::{SchedError, SchedResult};
use super::task::{Priority, Task, TaskState};
use crate::sys::types::{Ticks, Tid};
use std::collections::BTreeMap;

pub struct Scheduler {
    tasks: BTreeMap<Tid, Task>,
    run_queue: RunQueue,
    current: Option<Tid>,
    next_tid: u32,
    ticks: Ticks,
    quantum: u64,
}

impl Scheduler {
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self::with_quantum(policy, DEFAULT_QUANTUM)
    }

    pub fn with_quantum(policy: SchedulingPolicy, quantum: u64) -> Self {
        crate::kinfo!(
            "(Sched) Inicializando scheduler: política={}, quantum={}",
            policy,
            quantum
        );
        Self {
            tasks: BTreeMap::new(),
            run_queue: RunQueue::new(policy),
            current: None,
            next_tid: Tid::FIRST.as_u32(),
            ticks: 0,
            quantum,
        }
    }

    // =========================================================================
    // CICLO DE VIDA
    // =========================================================================

    /// Cria uma task e a coloca na fila de prontos. Nunca falha.
    pub fn create_task(&mut self, name: impl Into<String>, priority: Priority) -> Tid {
        let tid = Tid::new(self.next_tid);
        self.next_tid += 1;

        let mut task = Task::new(tid, name, priority, self.ticks);
        task.set_ready();
        crate::kinfo!("(Sched) Task {} '{}' criada ({})", tid, task.name, priority);

        self.run_queue.push(tid, priority);
        self.tasks.insert(tid, task);
        tid
    }

    /// Termina a task. Se era a corrente, escolhe outra imediatamente.
    pub fn terminate_task(&mut self, tid: Tid) -> SchedResult<()> {
        let task = self.tasks.get_mut(&tid).ok_or(SchedError::NotFound)?;
        if task.state.is_terminated() {
            return Err(SchedError::InvalidTransition);
        }

        task.state = TaskState::Terminated;
        task.accounting.quantum_left = 0;
        self.run_queue.remove(tid);
        crate::kinfo!("(Sched) Task {} terminada", tid);

        if self.current == Some(tid) {
            self.current = None;
            self.schedule();
        }
        Ok(())
    }

    /// Termina a task corrente registrando o código de saída.
    pub fn exit_current(&mut self, code: i32) -> SchedResult<Tid> {
        let tid = self.current.ok_or(SchedError::NotFound)?;
        if let Some(task) = self.tasks.get_mut(&tid) {
            task.exit_code = Some(code);
        }
        self.terminate_task(tid)?;
        Ok(tid)
    }

    /// Running/Ready -> Blocked. Bloquear a corrente escolhe outra.
    pub fn block_task(&mut self, tid: Tid) -> SchedResult<()> {
        let task = self.tasks.get_mut(&tid).ok_or(SchedError::NotFound)?;
        match task.state {
            TaskState::Ready => {
                self.run_queue.remove(tid);
            }
            TaskState::Running => {
                task.accounting.account_switch(true);
            }
            state => {
                crate::kwarn!("(Sched) Não é possível bloquear task {} em {}", tid, state);
                return Err(SchedError::InvalidTransition);
            }
        }

        task.set_blocked();
        crate::kdebug!("(Sched) Task {} bloqueada", tid);

        if self.current == Some(tid) {
            self.current = None;
            self.schedule();
        }
        Ok(())
    }

    /// Blocked -> Ready
    pub fn unblock_task(&mut self, tid: Tid) -> SchedResult<()> {
        let task = self.tasks.get_mut(&tid).ok_or(SchedError::NotFound)?;
        if task.state != TaskState::Blocked {
            crate::kwarn!(
                "(Sched) Não é possível desbloquear task {} em {}",
                tid,
                task.state
            );
            return Err(SchedError::InvalidTransition);
        }

        task.set_ready();
        self.run_queue.push(tid, task.priority);
        crate::kdebug!("(Sched) Task {} desbloqueada", tid);
        Ok(())
    }

    /// Remove os registros de tasks terminadas. Retorna quantas saíram.
    pub fn reap_terminated(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| !task.state.is_terminated());
        let reaped = before - self.tasks.len();
        if reaped > 0 {
            crate::kdebug!("(Sched) {} tasks terminadas removidas", reaped);
        }
        reaped
    }

    // =========================================================================
    // ESCALONAMENTO
    // =========================================================================

    /// Escolhe a próxima task segundo a política.
    ///
    /// Sem ninguém pronto, a corrente (se houver) continua.
    pub fn schedule(&mut self) {
        self.reschedule(false);
    }

    /// Avança o relógio. Cobra o tick da corrente e troca quando o quantum
    /// acaba. Sem corrente, sempre tenta escalonar.
    pub fn tick(&mut self) {
        self.ticks += 1;

        let expired = match self.current.and_then(|tid| self.tasks.get_mut(&tid)) {
            Some(task) => task.accounting.charge_tick(),
            None => true,
        };
        crate::ktrace!("(Sched) tick {} (corrente={:?})", self.ticks, self.current);

        if expired {
            self.reschedule(false);
        }
    }

    /// Cede a CPU voluntariamente
    pub fn yield_now(&mut self) {
        if let Some(task) = self.current_task_mut() {
            task.accounting.quantum_left = 0;
        }
        self.reschedule(true);
    }

    fn reschedule(&mut self, voluntary: bool) {
        let next = match self.run_queue.pop() {
            Some(tid) => tid,
            None => {
                let quantum = self.quantum;
                if let Some(task) = self.current_task_mut() {
                    if task.accounting.quantum_left == 0 {
                        task.accounting.reset_quantum(quantum);
                    }
                }
                return;
            }
        };

        if let Some(prev) = self.current.take() {
            if let Some(task) = self.tasks.get_mut(&prev) {
                task.set_ready();
                task.accounting.account_switch(voluntary);
                self.run_queue.push(prev, task.priority);
            }
        }

        match self.tasks.get_mut(&next) {
            Some(task) => {
                task.state = TaskState::Running;
                task.accounting.start_exec(self.ticks, self.quantum);
                self.current = Some(next);
                crate::kdebug!("(Sched) Troca de contexto -> {} '{}'", next, task.name);
            }
            None => {
                crate::kerror!("(Sched) Task {} na fila sem registro", next);
            }
        }
    }

    /// Troca a política migrando a fila de prontos
    pub fn set_policy(&mut self, policy: SchedulingPolicy) {
        self.run_queue.set_policy(policy);
        crate::kinfo!("(Sched) Política alterada para {}", policy);
    }

    // =========================================================================
    // CONSULTAS
    // =========================================================================

    pub fn task(&self, tid: Tid) -> Option<&Task> {
        self.tasks.get(&tid)
    }

    pub fn current_tid(&self) -> Option<Tid> {
        self.current
    }

    pub fn current_task(&self) -> Option<&Task> {
        self.current.and_then(|tid| self.tasks.get(&tid))
    }

    fn current_task_mut(&mut self) -> Option<&mut Task> {
        let tid = self.current?;
        self.tasks.get_mut(&tid)
    }

    /// Todas as tasks retidas, em ordem de id
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Ids prontos, na ordem em que seriam escolhidos
    pub fn ready_queue(&self) -> impl Iterator<Item = Tid> + '_ {
        self.run_queue.iter()
    }

    pub fn ready_count(&self) -> usize {
        self.run_queue.len()
    }

    /// Registros retidos, incluindo terminados ainda não removidos
    pub fn total_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn ticks(&self) -> Ticks {
        self.ticks
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.run_queue.policy()
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }
}
