//! Contabilidade de Recursos (Accounting)
//!
//! Rastreia o consumo de CPU de cada tarefa, o quantum restante e as trocas
//! de contexto. Todos os tempos são em ticks do scheduler.

use crate::sys::types::Ticks;

/// Estatísticas de uso de recursos de uma tarefa
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accounting {
    /// Tempo total de CPU consumido
    pub total_cpu_time: Ticks,

    /// Tick em que a task foi criada
    pub created_at: Ticks,

    /// Tick da última vez que a task ganhou a CPU (`None` se nunca rodou)
    pub last_scheduled: Option<Ticks>,

    /// Trocas de contexto voluntárias (yield)
    pub voluntary_switches: u64,

    /// Trocas de contexto involuntárias (quantum expirado)
    pub involuntary_switches: u64,

    /// Quantum restante nesta fatia de tempo
    pub quantum_left: u64,
}

impl Accounting {
    pub fn new(now: Ticks) -> Self {
        Self {
            created_at: now,
            ..Self::default()
        }
    }

    /// Registra o início da execução (chamado quando a task ganha a CPU)
    pub fn start_exec(&mut self, now: Ticks, quantum: u64) {
        self.last_scheduled = Some(now);
        self.reset_quantum(quantum);
    }

    /// Reinicia o quantum da task
    pub fn reset_quantum(&mut self, quantum: u64) {
        self.quantum_left = quantum;
    }

    /// Cobra um tick de CPU. Retorna `true` quando o quantum acabou.
    pub fn charge_tick(&mut self) -> bool {
        self.quantum_left = self.quantum_left.saturating_sub(1);
        self.total_cpu_time += 1;
        self.quantum_left == 0
    }

    /// Incrementa contadores de troca de contexto
    pub fn account_switch(&mut self, voluntary: bool) {
        if voluntary {
            self.voluntary_switches += 1;
        } else {
            self.involuntary_switches += 1;
        }
    }
}
