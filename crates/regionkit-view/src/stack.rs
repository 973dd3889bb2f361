//! A caller-owned stack of active views for nested loops.

use smallvec::SmallVec;

use crate::state::ViewState;
use crate::view::View;

/// Stack of views, innermost loop on top.
///
/// Each caller owns its own stack, so independent loop nests never share
/// state. Four frames are kept inline before spilling to the heap.
///
/// ```
/// use regionkit_view::{AsView, ViewStack};
///
/// let mut weights = [1, 2];
/// let mut rows = vec![vec![1, 1, 1], vec![5, 5, 5]];
///
/// let mut stack = ViewStack::new();
/// stack.push(weights.as_view());
/// for row in rows.iter_mut() {
///     let w = stack.current_mut().and_then(|v| v.next_slot()).map(|s| *s);
///     let Some(w) = w else { break };
///     stack.push(row.as_view());
///     if let Some(inner) = stack.current_mut() {
///         inner.for_each(|x| *x *= w);
///     }
///     stack.pop();
/// }
/// drop(stack);
/// assert_eq!(rows, vec![vec![1, 1, 1], vec![10, 10, 10]]);
/// ```
#[derive(Debug)]
pub struct ViewStack<'a, T: Copy> {
    frames: SmallVec<[View<'a, T>; 4]>,
}

impl<'a, T: Copy> ViewStack<'a, T> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            frames: SmallVec::new(),
        }
    }

    /// Push `view` as the innermost loop; it becomes `Active`.
    ///
    /// # Panics
    ///
    /// Panics if `view` is already unlinked.
    pub fn push(&mut self, mut view: View<'a, T>) {
        assert!(
            view.state() != ViewState::Unlinked,
            "an unlinked view cannot be reused for a new loop"
        );
        view.attach();
        self.frames.push(view);
    }

    /// The innermost view, if any.
    pub fn current_mut(&mut self) -> Option<&mut View<'a, T>> {
        self.frames.last_mut()
    }

    /// Number of active loops.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether no loop is active.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Leave the innermost loop. The returned view is `Unlinked`.
    pub fn pop(&mut self) -> Option<View<'a, T>> {
        let mut view = self.frames.pop()?;
        view.unlink();
        Some(view)
    }
}

impl<T: Copy> Default for ViewStack<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
