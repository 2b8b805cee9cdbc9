//! Testes do Heap

use crate::mm::config::HEAP_SIZE;
use crate::mm::heap::{HeapAllocator, HeapError, HeapPtr, HEADER_SIZE};

fn heap() -> HeapAllocator {
    HeapAllocator::new(HEAP_SIZE).unwrap()
}

/// Blocos cobrem a arena inteira e não há dois livres adjacentes
fn assert_well_formed(heap: &HeapAllocator) {
    let blocks: Vec<_> = heap.blocks().collect();
    let mut expected_offset = 0;
    for b in &blocks {
        assert_eq!(b.offset, expected_offset);
        expected_offset += HEADER_SIZE + b.size;
    }
    assert_eq!(expected_offset, heap.total_bytes());

    for pair in blocks.windows(2) {
        assert!(!(pair[0].free && pair[1].free), "blocos livres adjacentes");
    }

    let used: usize = blocks.iter().filter(|b| !b.free).map(|b| b.size).sum();
    assert_eq!(used, heap.used_bytes());
}

#[test]
fn fresh_heap_is_one_free_block() {
    let heap = heap();
    assert_eq!(heap.block_count(), 1);
    assert_eq!(heap.largest_free_block(), HEAP_SIZE - HEADER_SIZE);
    assert_eq!(heap.used_bytes(), 0);
    assert_eq!(heap.free_bytes() + heap.used_bytes() + HEADER_SIZE, heap.total_bytes());
}

#[test]
fn tiny_arena_is_rejected() {
    assert_eq!(HeapAllocator::new(HEADER_SIZE).err(), Some(HeapError::InvalidSize));
}

#[test]
fn zero_sized_allocation_is_rejected() {
    let mut heap = heap();
    assert_eq!(heap.allocate(0), Err(HeapError::InvalidSize));
    assert_eq!(heap.block_count(), 1);
}

#[test]
fn allocations_are_aligned_and_disjoint() {
    let mut heap = heap();
    let a = heap.allocate(100).unwrap();
    let b = heap.allocate(200).unwrap();

    assert_eq!(a.offset() % 8, 0);
    assert_eq!(b.offset() % 8, 0);
    assert_ne!(a, b);
    // 100 arredonda para 104
    assert_eq!(heap.payload(a).unwrap().len(), 104);
    assert!(a.offset() + 104 <= b.offset() - HEADER_SIZE);
    assert_eq!(heap.used_bytes(), 104 + 200);
    assert_well_formed(&heap);
}

#[test]
fn freed_space_is_reused_first_fit() {
    let mut heap = heap();
    let a = heap.allocate(100).unwrap();
    let _b = heap.allocate(200).unwrap();

    let used = heap.used_bytes();
    heap.free(a).unwrap();
    assert!(heap.used_bytes() < used);

    // 50 -> 56 cabe no bloco liberado de 104 (dividido, sobram 16 de payload)
    let c = heap.allocate(50).unwrap();
    assert_eq!(c, a);
    assert_well_formed(&heap);
}

#[test]
fn small_remainder_is_not_split() {
    let mut heap = heap();
    let a = heap.allocate(64).unwrap();
    let _guard = heap.allocate(8).unwrap();
    heap.free(a).unwrap();

    // 64 - 24 = 40 = HEADER + 8: não é estritamente maior, fica inteiro
    let b = heap.allocate(24).unwrap();
    assert_eq!(b, a);
    assert_eq!(heap.payload(b).unwrap().len(), 64);
    assert_eq!(heap.used_bytes(), 64 + 8);
}

#[test]
fn freeing_everything_coalesces_to_one_block() {
    let mut heap = heap();
    let ptrs: Vec<_> = [100, 200, 50, 4000, 8]
        .iter()
        .map(|n| heap.allocate(*n).unwrap())
        .collect();

    // ordem embaralhada exercita fusão com anterior e com seguinte
    for i in [1, 3, 0, 4, 2] {
        heap.free(ptrs[i]).unwrap();
        assert_well_formed(&heap);
    }

    assert_eq!(heap.used_bytes(), 0);
    assert_eq!(heap.block_count(), 1);
    assert_eq!(heap.free_block_count(), 1);
    assert_eq!(heap.largest_free_block(), HEAP_SIZE - HEADER_SIZE);
}

#[test]
fn double_free_is_reported_and_harmless() {
    let mut heap = heap();
    let a = heap.allocate(128).unwrap();
    let _b = heap.allocate(128).unwrap();
    heap.free(a).unwrap();

    let blocks_before: Vec<_> = heap.blocks().collect();
    assert_eq!(heap.free(a), Err(HeapError::DoubleFree));
    assert_eq!(heap.blocks().collect::<Vec<_>>(), blocks_before);

    let again = heap.allocate(128).unwrap();
    assert_eq!(again, a);
    assert_eq!(heap.used_bytes(), 256);
    assert_well_formed(&heap);
}

#[test]
fn double_free_after_merge_is_still_double_free() {
    let mut heap = heap();
    let a = heap.allocate(64).unwrap();
    let b = heap.allocate(64).unwrap();
    let _c = heap.allocate(64).unwrap();

    heap.free(a).unwrap();
    // b é absorvido pelo bloco livre de a
    heap.free(b).unwrap();
    assert_eq!(heap.blocks().next().map(|blk| (blk.free, blk.size)), Some((true, 64 + HEADER_SIZE + 64)));

    let blocks_before: Vec<_> = heap.blocks().collect();
    assert_eq!(heap.free(b), Err(HeapError::DoubleFree));
    assert_eq!(heap.blocks().collect::<Vec<_>>(), blocks_before);
    assert_eq!(heap.used_bytes(), 64);
    assert_well_formed(&heap);
}

#[test]
fn unknown_pointer_is_rejected() {
    let mut heap = heap();
    let a = heap.allocate(64).unwrap();

    for bad in [0, 8, a.offset() + 8, HEAP_SIZE + 64] {
        assert_eq!(heap.free(HeapPtr::from_offset(bad)), Err(HeapError::InvalidPointer));
    }
    assert_eq!(heap.used_bytes(), 64);
}

#[test]
fn exhaustion_is_out_of_memory() {
    let mut heap = HeapAllocator::new(256).unwrap();
    assert_eq!(heap.allocate(256), Err(HeapError::OutOfMemory));
    assert!(heap.allocate(256 - HEADER_SIZE).is_ok());
    assert_eq!(heap.allocate(8), Err(HeapError::OutOfMemory));
}

#[test]
fn realloc_null_and_zero() {
    let mut heap = heap();
    let p = heap.reallocate(None, 40).unwrap().unwrap();
    assert_eq!(heap.used_bytes(), 40);

    assert_eq!(heap.reallocate(Some(p), 0), Ok(None));
    assert_eq!(heap.used_bytes(), 0);
}

#[test]
fn realloc_in_place_when_large_enough() {
    let mut heap = heap();
    let p = heap.allocate(100).unwrap();
    assert_eq!(heap.reallocate(Some(p), 104), Ok(Some(p)));
    assert_eq!(heap.reallocate(Some(p), 10), Ok(Some(p)));
    assert_eq!(heap.payload(p).unwrap().len(), 104);
}

#[test]
fn realloc_grow_moves_and_copies() {
    let mut heap = heap();
    let p = heap.allocate(16).unwrap();
    let _pin = heap.allocate(16).unwrap();
    heap.payload_mut(p).unwrap().copy_from_slice(b"0123456789abcdef");

    let q = heap.reallocate(Some(p), 64).unwrap().unwrap();
    assert_ne!(q, p);
    assert_eq!(&heap.payload(q).unwrap()[..16], b"0123456789abcdef");
    assert_eq!(heap.payload(p), Err(HeapError::InvalidPointer));
    assert_eq!(heap.used_bytes(), 64 + 16);
    assert_well_formed(&heap);
}

#[test]
fn failed_realloc_leaves_old_block_intact() {
    let mut heap = HeapAllocator::new(512).unwrap();
    let p = heap.allocate(32).unwrap();
    heap.payload_mut(p).unwrap().fill(0x5A);
    let used = heap.used_bytes();

    assert_eq!(heap.reallocate(Some(p), 4096), Err(HeapError::OutOfMemory));
    assert_eq!(heap.used_bytes(), used);
    assert!(heap.payload(p).unwrap().iter().all(|b| *b == 0x5A));
}

#[test]
fn utilization_is_percentage_of_arena() {
    let mut heap = HeapAllocator::new(1024).unwrap();
    heap.allocate(256).unwrap();
    assert!((heap.utilization() - 25.0).abs() < f64::EPSILON);
}
