//! Constantes de configuração do Scheduler

/// Quantum padrão (Timeslice) em ticks do timer
pub const DEFAULT_QUANTUM: u64 = 10;

/// Nome da tarefa Idle criada no boot
pub const IDLE_TASK_NAME: &str = "idle";
