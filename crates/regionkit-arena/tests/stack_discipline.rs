//! Integration test: checkpoint/rollback stack discipline.
//!
//! Drives a region through nested phases the way a per-request or per-frame
//! workload would, and checks that reclaimed space is reissued at the same
//! addresses while surviving spans keep their contents.

use std::alloc::Layout;

use regionkit_arena::{Region, RegionConfig, RegionError};
use regionkit_core::{Allocator, Release};

#[test]
fn two_allocations_land_at_zero_and_n() {
    let mut region = Region::new(256, false).unwrap();
    let first = region.allocate(24);
    let second = region.allocate(40);
    assert_eq!(first.offset(), 0);
    assert_eq!(second.offset(), 24);

    let base = region.ptr(first).unwrap().as_ptr() as usize;
    assert_eq!(region.ptr(second).unwrap().as_ptr() as usize, base + 24);
}

#[test]
fn rollback_reissues_identical_address() {
    let mut region = Region::new(256, false).unwrap();
    let _n = region.allocate(24);
    let marker = region.checkpoint();
    let m = region.allocate(40);
    let addr = region.ptr(m).unwrap();

    region.rollback(marker).unwrap();
    let again = region.allocate(40);
    assert_eq!(region.ptr(again).unwrap(), addr);
}

#[test]
fn nested_phases_unwind_in_lifo_order() {
    let mut region = Region::new(1024, false).unwrap();

    let frame = region.allocate(16);
    region.bytes_mut(frame).unwrap().fill(0x11);

    let outer = region.checkpoint();
    let request = region.allocate(64);
    region.bytes_mut(request).unwrap().fill(0x22);

    let inner = region.checkpoint();
    let scratch = region.allocate(128);
    region.bytes_mut(scratch).unwrap().fill(0x33);

    region.rollback(inner).unwrap();
    assert!(region.bytes(scratch).is_err());
    assert!(region.bytes(request).unwrap().iter().all(|&b| b == 0x22));

    region.rollback(outer).unwrap();
    assert!(region.bytes(request).is_err());
    assert!(region.bytes(frame).unwrap().iter().all(|&b| b == 0x11));
    assert_eq!(region.used(), 16);
}

#[test]
fn unwinding_out_of_order_is_rejected() {
    let mut region = Region::new(1024, false).unwrap();
    let outer = region.checkpoint();
    region.allocate(32);
    let inner = region.checkpoint();
    region.allocate(32);

    region.rollback(outer).unwrap();
    assert_eq!(
        region.rollback(inner),
        Err(RegionError::InvalidCheckpoint {
            marker: 32,
            cursor: 0
        })
    );
}

#[test]
fn per_frame_reset_cycle() {
    let mut region = Region::with_config(RegionConfig::new(128).resettable(true)).unwrap();
    for frame in 0..10u8 {
        let span = region.allocate_zeroed(8, 8);
        assert_eq!(span.offset(), 0);
        assert!(region.bytes(span).unwrap().iter().all(|&b| b == 0));
        region.bytes_mut(span).unwrap().fill(frame);
        region.reset().unwrap();
    }
    assert_eq!(region.generation(), 10);
}

#[test]
fn shared_blocks_release_back_to_checkpoint() {
    let mut region = Region::new(256, false).unwrap();
    let marker = region.checkpoint();
    {
        let shared = &region;
        let layout = Layout::from_size_align(32, 8).unwrap();
        let a = Allocator::alloc(shared, layout).unwrap();
        let b = Allocator::alloc(shared, layout).unwrap();
        // SAFETY: both blocks came from `shared` with `layout`.
        unsafe {
            assert_eq!(shared.release(b, layout), Release::RolledBack);
            assert_eq!(shared.release(a, layout), Release::RolledBack);
        }
    }
    assert_eq!(region.used(), marker.cursor());
    region.rollback(marker).unwrap();
}
