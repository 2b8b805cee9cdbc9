//! Fila de tasks prontas
//!
//! Uma FIFO única em round-robin, ou uma FIFO por nível de prioridade. Só
//! uma das estruturas tem entradas por vez. Cada entrada carrega um número
//! de sequência de chegada para que a troca de política preserve a ordem.

use super::policy::SchedulingPolicy;
use crate::sched::task::Priority;
use crate::sys::types::Tid;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
struct Entry {
    tid: Tid,
    priority: Priority,
    seq: u64,
}

/// Fila de execução
#[derive(Debug, Clone)]
pub struct RunQueue {
    policy: SchedulingPolicy,
    fifo: VecDeque<Entry>,
    levels: [VecDeque<Entry>; Priority::LEVELS],
    next_seq: u64,
}

impl RunQueue {
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self {
            policy,
            fifo: VecDeque::new(),
            levels: Default::default(),
            next_seq: 0,
        }
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    /// Adiciona task ao fim da fila do seu nível (ou da FIFO única)
    pub fn push(&mut self, tid: Tid, priority: Priority) {
        let entry = Entry {
            tid,
            priority,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        match self.policy {
            SchedulingPolicy::RoundRobin => self.fifo.push_back(entry),
            SchedulingPolicy::Priority => self.levels[priority.index()].push_back(entry),
        }
    }

    /// Remove a próxima task segundo a política
    pub fn pop(&mut self) -> Option<Tid> {
        let entry = match self.policy {
            SchedulingPolicy::RoundRobin => self.fifo.pop_front(),
            SchedulingPolicy::Priority => self
                .levels
                .iter_mut()
                .rev()
                .find_map(|level| level.pop_front()),
        };
        entry.map(|e| e.tid)
    }

    /// Remove `tid` de onde estiver. Retorna `true` se estava na fila.
    pub fn remove(&mut self, tid: Tid) -> bool {
        for queue in std::iter::once(&mut self.fifo).chain(self.levels.iter_mut()) {
            if let Some(pos) = queue.iter().position(|e| e.tid == tid) {
                queue.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn contains(&self, tid: Tid) -> bool {
        self.iter().any(|t| t == tid)
    }

    /// Ids na ordem em que seriam escolhidos
    pub fn iter(&self) -> impl Iterator<Item = Tid> + '_ {
        self.levels
            .iter()
            .rev()
            .flatten()
            .chain(self.fifo.iter())
            .map(|e| e.tid)
    }

    /// Troca a política migrando as entradas já enfileiradas.
    ///
    /// RR -> prioridade mantém a ordem FIFO dentro de cada nível;
    /// prioridade -> RR intercala os níveis pela ordem de chegada.
    pub fn set_policy(&mut self, policy: SchedulingPolicy) {
        if policy == self.policy {
            return;
        }

        match policy {
            SchedulingPolicy::Priority => {
                for entry in self.fifo.drain(..) {
                    self.levels[entry.priority.index()].push_back(entry);
                }
            }
            SchedulingPolicy::RoundRobin => {
                let mut all: Vec<Entry> = self.levels.iter_mut().flat_map(|l| l.drain(..)).collect();
                all.sort_by_key(|e| e.seq);
                self.fifo.extend(all);
            }
        }
        self.policy = policy;
    }

    /// Número de tasks na fila
    pub fn len(&self) -> usize {
        self.fifo.len() + self.levels.iter().map(VecDeque::len).sum::<usize>()
    }

    /// Verifica se está vazia
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
