//! # Syscall Numbers Registry
//!
//! Catálogo central das operações que o dispatcher reconhece.
//!
//! | Range     | Categoria     |
//! |-----------|---------------|
//! | 0x01-0x0F | Processo      |
//! | 0x10-0x1F | Memória       |
//! | 0x30-0x3F | IPC           |
//! | 0x40-0x4F | IO / Arquivos |
//!
//! IPC e arquivos são colaboradores externos: os números existem para que
//! o dispatcher responda `ENOSYS` em vez de "syscall desconhecida".

// ============================================================================
// PROCESSO (0x01 - 0x0F)
// ============================================================================

/// Encerra a task atual.
/// Args: (exit_code: i32)
/// Retorno: 0 (a task não volta a rodar)
pub const SYS_EXIT: usize = 0x01;

/// Cede o restante do quantum de tempo.
/// Args: nenhum
/// Retorno: 0
pub const SYS_YIELD: usize = 0x04;

/// Obtém o id da task atual.
/// Args: nenhum
/// Retorno: tid
pub const SYS_GETPID: usize = 0x05;

// ============================================================================
// MEMÓRIA (0x10 - 0x1F)
// ============================================================================

/// Mapeia uma página na task atual.
/// Args: (page, protection_bits; 0 = padrão)
/// Retorno: endereço físico do frame
pub const SYS_ALLOC: usize = 0x10;

/// Desmapeia uma página da task atual.
/// Args: (page)
/// Retorno: 0
pub const SYS_FREE: usize = 0x11;

// ============================================================================
// IPC (0x30 - 0x3F)
// ============================================================================

pub const SYS_SEND_MSG: usize = 0x31;
pub const SYS_RECV_MSG: usize = 0x32;

// ============================================================================
// ARQUIVOS (0x40 - 0x4F)
// ============================================================================

pub const SYS_OPEN: usize = 0x40;
pub const SYS_CLOSE: usize = 0x41;
pub const SYS_READ: usize = 0x42;
pub const SYS_WRITE: usize = 0x43;

/// Nome legível para logs
pub fn name(num: usize) -> &'static str {
    match num {
        SYS_EXIT => "exit",
        SYS_YIELD => "yield",
        SYS_GETPID => "getpid",
        SYS_ALLOC => "alloc",
        SYS_FREE => "free",
        SYS_SEND_MSG => "send_msg",
        SYS_RECV_MSG => "recv_msg",
        SYS_OPEN => "open",
        SYS_CLOSE => "close",
        SYS_READ => "read",
        SYS_WRITE => "write",
        _ => "?",
    }
}
