//! Integration test: views over sequences that live in a region.
//!
//! A per-frame workload builds sequences in a region, walks them with
//! views (flat, nested and byte-erased), then reclaims the frame with a
//! rollback.

use regionkit_arena::Region;
use regionkit_seq::{RawSequence, Sequence};
use regionkit_view::{AsRawView, AsView, ViewStack, ViewState};

#[test]
fn frame_of_views_over_region_sequences() {
    let mut region = Region::new(4096, false).unwrap();
    let marker = region.checkpoint();
    {
        let mut xs: Sequence<f32, &Region> = Sequence::from_slice_in(&[1.0, 2.0, 3.0], &region);
        let mut ys: Sequence<f32, &Region> = Sequence::from_slice_in(&[0.5, 0.5, 0.5], &region);

        let mut dot = 0.0;
        let mut yv = ys.as_view();
        xs.as_view().for_each(|x| {
            if let Some(y) = yv.next_slot() {
                dot += *x * *y;
            }
            *x *= 2.0;
        });
        assert_eq!(yv.state(), ViewState::Active);
        yv.unlink();

        assert_eq!(dot, 3.0);
        assert_eq!(xs, [2.0, 4.0, 6.0]);

        // The views are gone; the sequences may grow again.
        xs.push(8.0);
        ys.push(1.0);
        assert_eq!(xs.len(), 4);
    }
    region.rollback(marker).unwrap();
    assert_eq!(region.used(), 0);
}

#[test]
fn view_stack_over_region_rows() {
    let region = Region::new(4096, false).unwrap();
    let mut rows: Vec<Sequence<u16, &Region>> = (0..3)
        .map(|r| Sequence::from_slice_in(&[r; 4], &region))
        .collect();
    let mut scale = [1u16, 10, 100];

    let mut stack = ViewStack::new();
    stack.push(scale.as_view());
    for row in rows.iter_mut() {
        let Some(k) = stack.current_mut().and_then(|v| v.next_slot()).map(|s| *s) else {
            break;
        };
        stack.push(row.as_view());
        if let Some(cols) = stack.current_mut() {
            cols.for_each(|cell| *cell = (*cell + 1) * k);
        }
        stack.pop();
        assert_eq!(stack.depth(), 1);
    }
    drop(stack);

    assert_eq!(rows[0], [1; 4]);
    assert_eq!(rows[1], [20; 4]);
    assert_eq!(rows[2], [300; 4]);
}

#[test]
fn raw_view_over_region_sequence() {
    let region = Region::new(1024, false).unwrap();
    let mut raw = RawSequence::with_capacity_in(3, 4, &region);
    raw.append(&[1, 2, 3, 4, 5, 6]);

    let mut view = raw.as_raw_view();
    assert_eq!(view.len(), 2);
    assert_eq!(view.element_size(), 3);
    view.for_each(|e| e.reverse());
    assert_eq!(view.state(), ViewState::Unlinked);

    assert_eq!(raw.as_bytes(), &[3, 2, 1, 6, 5, 4]);
}
