// =============================================================================
// FORGE SIM LOGGING SYSTEM
// =============================================================================
//
// Sistema de logging do simulador, com a mesma família de macros do kernel.
//
// ARQUITETURA:
// - Os macros `k*!` encaminham para a fachada do crate `log`
// - Com feature "no_logs", TODOS os macros viram expressões vazias
// - A biblioteca NUNCA instala um logger sozinha: quem decide é o binário
//   (ou o teste) chamando `init()`
//
// NÍVEIS DE LOG (do mais crítico ao menos):
// - ERROR: Erros que o chamador precisa tratar
// - WARN:  Situações suspeitas mas recuperáveis (double free, id duplicado)
// - INFO:  Ciclo de vida (boot, criação/término de tasks, address spaces)
// - DEBUG: Transições de escalonamento, alocações de página
// - TRACE: Detalhes extremos (cada tick, cada frame, cada bloco do heap)
//
// FEATURES:
// - no_logs:   Remove 100% dos logs
// - log_error: Apenas ERROR, WARN, [OK]
// - log_info:  + INFO
// - log_debug: + DEBUG
// - log_trace: Todos os níveis (padrão)
//
// COMO USAR:
//   kinfo!("(PMM) Inicializando...");
//   kdebug!("(Sched) Troca de contexto: {} -> {}", from, to);
//
// Convenção: toda mensagem começa com a tag do subsistema entre parênteses.
//
// =============================================================================

use std::io::Write;

// =============================================================================
// PREFIXOS COM CORES ANSI
// =============================================================================
//
// Formato: \x1b[<código>m  onde:
//   1;31 = Bold Red
//   1;33 = Bold Yellow
//   32   = Green
//   36   = Cyan
//   35   = Magenta
//   0    = Reset
//

pub const P_ERROR: &str = "\x1b[1;31m[ERRO]\x1b[0m ";
pub const P_WARN: &str = "\x1b[1;33m[WARN]\x1b[0m ";
pub const P_INFO: &str = "\x1b[32m[INFO]\x1b[0m ";
pub const P_DEBUG: &str = "\x1b[36m[DEBG]\x1b[0m ";
pub const P_TRACE: &str = "\x1b[35m[TRAC]\x1b[0m ";

/// Marcadores de status usados por `kok!` / `kfail!`
pub const M_OK: &str = "\x1b[32m[OK]\x1b[0m ";
pub const M_FAIL: &str = "\x1b[1;31m[FAIL]\x1b[0m ";

/// Prefixo colorido para um nível do `log`
pub fn prefix_for(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => P_ERROR,
        log::Level::Warn => P_WARN,
        log::Level::Info => P_INFO,
        log::Level::Debug => P_DEBUG,
        log::Level::Trace => P_TRACE,
    }
}

/// Instala o backend `env_logger` com os prefixos do Forge.
///
/// Idempotente: chamadas repetidas (ex: vários testes) são ignoradas.
/// O filtro padrão é `info`, sobrescrito por `RUST_LOG`.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(buf, "{}{}", prefix_for(record.level()), record.args())
        })
        .try_init();
}

/// Variante para testes: saída capturada pelo harness.
pub fn init_for_tests() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .format(|buf, record| {
            writeln!(buf, "{}{}", prefix_for(record.level()), record.args())
        })
        .is_test(true)
        .try_init();
}

// =============================================================================
// MACROS DE LOG - NÍVEL ERROR
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kerror {
    ($($arg:tt)+) => {{
        $crate::__log::error!($($arg)+);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kerror {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL WARN
// =============================================================================

#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)+) => {{
        $crate::__log::warn!($($arg)+);
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kwarn {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL INFO
// =============================================================================

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)+) => {{
        $crate::__log::info!($($arg)+);
    }};
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_info", feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! kinfo {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL DEBUG
// =============================================================================

#[cfg(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
))]
#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)+) => {{
        $crate::__log::debug!($($arg)+);
    }};
}

#[cfg(not(all(
    not(feature = "no_logs"),
    any(feature = "log_debug", feature = "log_trace")
)))]
#[macro_export]
macro_rules! kdebug {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE LOG - NÍVEL TRACE
// =============================================================================

#[cfg(all(not(feature = "no_logs"), feature = "log_trace"))]
#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)+) => {{
        $crate::__log::trace!($($arg)+);
    }};
}

#[cfg(not(all(not(feature = "no_logs"), feature = "log_trace")))]
#[macro_export]
macro_rules! ktrace {
    ($($t:tt)*) => {{}};
}

// =============================================================================
// MACROS DE STATUS (OK/FAIL)
// =============================================================================

/// kok! - Log de sucesso (prefixo verde [OK]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kok {
    ($($arg:tt)+) => {{
        $crate::__log::info!("{}{}", $crate::core::logging::M_OK, format_args!($($arg)+));
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kok {
    ($($t:tt)*) => {{}};
}

/// kfail! - Log de falha (prefixo vermelho [FAIL]).
#[cfg(not(feature = "no_logs"))]
#[macro_export]
macro_rules! kfail {
    ($($arg:tt)+) => {{
        $crate::__log::error!("{}{}", $crate::core::logging::M_FAIL, format_args!($($arg)+));
    }};
}

#[cfg(feature = "no_logs")]
#[macro_export]
macro_rules! kfail {
    ($($t:tt)*) => {{}};
}
