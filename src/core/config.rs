//! # Configuração do Kernel
//!
//! Parâmetros de runtime validados no boot. Os padrões vêm das constantes
//! de `sched::config` e `mm::config`; o binário pode sobrescrever via
//! variáveis de ambiente no formato chave=valor.

use super::kernel::BootError;
use crate::mm::config::{HEAP_MIN_SPLIT, HEAP_SIZE, MAX_FRAMES, MAX_HEAP_SIZE, PAGE_SIZE, TOTAL_FRAMES};
use crate::mm::heap::HEADER_SIZE;
use crate::sched::config::DEFAULT_QUANTUM;
use crate::sched::scheduler::SchedulingPolicy;

/// Variáveis reconhecidas por `apply_override`
pub const ENV_POLICY: &str = "FORGE_POLICY";
pub const ENV_QUANTUM: &str = "FORGE_QUANTUM";
pub const ENV_FRAMES: &str = "FORGE_FRAMES";
pub const ENV_HEAP: &str = "FORGE_HEAP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    pub policy: SchedulingPolicy,
    /// Ticks por fatia de tempo
    pub quantum: u64,
    /// Tamanho do pool de frames físicos
    pub total_frames: usize,
    /// Bytes da arena do heap do kernel
    pub heap_size: usize,
    /// Criar a task `idle` no boot
    pub spawn_idle: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            policy: SchedulingPolicy::default(),
            quantum: DEFAULT_QUANTUM,
            total_frames: TOTAL_FRAMES,
            heap_size: HEAP_SIZE,
            spawn_idle: true,
        }
    }
}

impl KernelConfig {
    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_quantum(mut self, quantum: u64) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_frames(mut self, total_frames: usize) -> Self {
        self.total_frames = total_frames;
        self
    }

    pub fn with_heap_size(mut self, heap_size: usize) -> Self {
        self.heap_size = heap_size;
        self
    }

    pub fn without_idle(mut self) -> Self {
        self.spawn_idle = false;
        self
    }

    /// Rejeita valores com que o kernel não pode operar.
    ///
    /// Os tetos garantem que o boot nunca tente uma alocação que aborte o
    /// processo: o pool cabe em índices `u32` e em `usize` bytes.
    pub fn validate(&self) -> Result<(), BootError> {
        if self.quantum == 0 {
            return Err(BootError::InvalidConfig("quantum deve ser > 0"));
        }
        if self.total_frames == 0 {
            return Err(BootError::InvalidConfig("pool de frames vazio"));
        }
        if self.total_frames > MAX_FRAMES
            || u32::try_from(self.total_frames).is_err()
            || self.total_frames.checked_mul(PAGE_SIZE).is_none()
        {
            return Err(BootError::InvalidConfig("pool de frames grande demais"));
        }
        if self.heap_size < HEADER_SIZE + HEAP_MIN_SPLIT {
            return Err(BootError::InvalidConfig("heap menor que um bloco"));
        }
        if self.heap_size > MAX_HEAP_SIZE {
            return Err(BootError::InvalidConfig("heap grande demais"));
        }
        Ok(())
    }

    /// Aplica um par chave=valor. Retorna `Ok(false)` para chaves
    /// desconhecidas, que são ignoradas.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<bool, BootError> {
        match key {
            ENV_POLICY => {
                self.policy = SchedulingPolicy::from_name(value)
                    .ok_or(BootError::InvalidConfig("FORGE_POLICY: use rr ou priority"))?;
            }
            ENV_QUANTUM => {
                self.quantum = value
                    .trim()
                    .parse()
                    .map_err(|_| BootError::InvalidConfig("FORGE_QUANTUM não é um número"))?;
            }
            ENV_FRAMES => {
                self.total_frames = value
                    .trim()
                    .parse()
                    .map_err(|_| BootError::InvalidConfig("FORGE_FRAMES não é um número"))?;
            }
            ENV_HEAP => {
                self.heap_size = value
                    .trim()
                    .parse()
                    .map_err(|_| BootError::InvalidConfig("FORGE_HEAP não é um número"))?;
            }
            _ => return Ok(false),
        }
        crate::kdebug!("(Config) {}={}", key, value);
        Ok(true)
    }

    /// Aplica todas as chaves reconhecidas de um iterador de pares
    pub fn with_overrides<I, K, V>(mut self, vars: I) -> Result<Self, BootError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            self.apply_override(key.as_ref(), value.as_ref())?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = KernelConfig::default();
        assert_eq!(cfg.quantum, DEFAULT_QUANTUM);
        assert_eq!(cfg.total_frames, TOTAL_FRAMES);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(KernelConfig::default().with_quantum(0).validate().is_err());
        assert!(KernelConfig::default().with_frames(0).validate().is_err());
        assert!(KernelConfig::default().with_heap_size(16).validate().is_err());
    }

    #[test]
    fn oversized_pools_are_rejected() {
        for frames in [usize::MAX / 1024, usize::MAX, MAX_FRAMES + 1] {
            let err = KernelConfig::default().with_frames(frames).validate();
            assert!(matches!(err, Err(BootError::InvalidConfig(_))), "frames={}", frames);
        }
        assert!(KernelConfig::default().with_frames(MAX_FRAMES).validate().is_ok());

        let err = KernelConfig::default().with_heap_size(MAX_HEAP_SIZE + 1).validate();
        assert!(matches!(err, Err(BootError::InvalidConfig(_))));
        assert!(KernelConfig::default().with_heap_size(MAX_HEAP_SIZE).validate().is_ok());
    }

    #[test]
    fn oversized_override_is_rejected_at_validation() {
        let cfg = KernelConfig::default()
            .with_overrides([("FORGE_FRAMES", "99999999999")])
            .unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn overrides_parse_known_keys() {
        let cfg = KernelConfig::default()
            .with_overrides([
                ("FORGE_POLICY", "priority"),
                ("FORGE_QUANTUM", "4"),
                ("PATH", "/usr/bin"),
            ])
            .unwrap();
        assert_eq!(cfg.policy, SchedulingPolicy::Priority);
        assert_eq!(cfg.quantum, 4);

        let err = KernelConfig::default().with_overrides([("FORGE_FRAMES", "muitos")]);
        assert!(matches!(err, Err(BootError::InvalidConfig(_))));
    }
}
