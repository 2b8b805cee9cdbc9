//! # Funções de Alinhamento
//!
//! Funções utilitárias para alinhamento de tamanhos e offsets.
//! `align` deve ser potência de 2.

/// Alinha um valor para cima ao próximo múltiplo de `align`.
///
/// # Exemplo
/// ```
/// use forge_sim::klib::align::align_up;
/// assert_eq!(align_up(10, 8), 16);
/// assert_eq!(align_up(16, 8), 16);
/// ```
#[inline(always)]
pub const fn align_up(val: usize, align: usize) -> usize {
    (val + align - 1) & !(align - 1)
}

/// Como `align_up`, mas devolve `None` em overflow.
#[inline]
pub const fn checked_align_up(val: usize, align: usize) -> Option<usize> {
    match val.checked_add(align - 1) {
        Some(v) => Some(v & !(align - 1)),
        None => None,
    }
}

/// Verifica se um valor está alinhado a `align`.
///
/// # Exemplo
/// ```
/// use forge_sim::klib::align::is_aligned;
/// assert!(is_aligned(16, 8));
/// assert!(!is_aligned(10, 8));
/// ```
#[inline(always)]
pub const fn is_aligned(val: usize, align: usize) -> bool {
    val & (align - 1) == 0
}
