//! Testes do PMM (Physical Memory Manager)

use crate::mm::config::PAGE_SIZE;
use crate::mm::error::MmError;
use crate::mm::pmm::{BitmapFrameAllocator, PhysFrame};
use crate::sys::types::FrameNumber;

fn frame(n: u32) -> PhysFrame {
    PhysFrame::new(FrameNumber::new(n))
}

#[test]
fn alloc_returns_lowest_free_index() {
    let mut pmm = BitmapFrameAllocator::new(8);

    let a = pmm.allocate_frame().unwrap();
    let b = pmm.allocate_frame().unwrap();
    let c = pmm.allocate_frame().unwrap();
    assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));

    pmm.deallocate_frame(b).unwrap();
    assert_eq!(pmm.allocate_frame().unwrap().index(), 1);
    assert_eq!(pmm.allocate_frame().unwrap().index(), 3);
}

#[test]
fn search_hint_moves_back_on_free() {
    let mut pmm = BitmapFrameAllocator::new(200);
    let frames: Vec<_> = (0..150).map(|_| pmm.allocate_frame().unwrap()).collect();

    pmm.deallocate_frame(frames[3]).unwrap();
    assert_eq!(pmm.allocate_frame().unwrap().index(), 3);
    assert_eq!(pmm.allocate_frame().unwrap().index(), 150);
}

#[test]
fn exhaustion_reports_none_and_counts_failure() {
    let mut pmm = BitmapFrameAllocator::new(2);
    assert!(pmm.allocate_frame().is_some());
    assert!(pmm.allocate_frame().is_some());
    assert!(pmm.allocate_frame().is_none());

    assert_eq!(pmm.free_count(), 0);
    assert_eq!(pmm.stats().failed_allocs, 1);
}

#[test]
fn double_free_is_rejected_without_mutation() {
    let mut pmm = BitmapFrameAllocator::new(4);
    let f = pmm.allocate_frame().unwrap();
    pmm.deallocate_frame(f).unwrap();

    assert_eq!(pmm.deallocate_frame(f), Err(MmError::DoubleFree));
    assert_eq!(pmm.used_count(), 0);
    assert_eq!(pmm.free_count(), 4);
}

#[test]
fn frame_outside_pool_is_out_of_bounds() {
    let mut pmm = BitmapFrameAllocator::new(4);
    assert_eq!(pmm.deallocate_frame(frame(4)), Err(MmError::OutOfBounds));
    assert!(!pmm.is_frame_free(frame(4)));
}

#[test]
fn frame_addresses_are_page_aligned() {
    let mut pmm = BitmapFrameAllocator::new(16);
    for _ in 0..16 {
        let f = pmm.allocate_frame().unwrap();
        assert_eq!(f.start_address() % PAGE_SIZE as u64, 0);
        assert_eq!(PhysFrame::containing_address(f.start_address() + 17), Some(f));
    }
}

#[test]
fn address_beyond_frame_range_has_no_frame() {
    let last = (u32::MAX as u64) * PAGE_SIZE as u64;
    assert_eq!(
        PhysFrame::containing_address(last).map(|f| f.index()),
        Some(u32::MAX as usize)
    );
    assert_eq!(PhysFrame::containing_address(last + PAGE_SIZE as u64), None);
}

#[test]
fn free_plus_used_equals_total() {
    let mut pmm = BitmapFrameAllocator::new(100);
    let held: Vec<_> = (0..37).map(|_| pmm.allocate_frame().unwrap()).collect();
    for f in held.iter().step_by(2) {
        pmm.deallocate_frame(*f).unwrap();
    }
    assert_eq!(pmm.free_count() + pmm.used_count(), pmm.total_frames());
    assert_eq!(pmm.used_count(), 18);
}
