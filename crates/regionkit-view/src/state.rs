//! The traversal state machine shared by typed and byte-erased views.

/// Lifecycle of a view.
///
/// `Unattached → Active → Unlinked`, with no way back: a finished loop
/// needs a fresh view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewState {
    /// Created but not yet traversed or pushed.
    #[default]
    Unattached,
    /// A traversal is in progress.
    Active,
    /// The traversal finished or was abandoned; the view no longer points
    /// at any storage.
    Unlinked,
}

/// Position plus state; hands out indices in `[0, len)` once each.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Cursor {
    position: usize,
    state: ViewState,
}

impl Cursor {
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn state(&self) -> ViewState {
        self.state
    }

    pub(crate) fn attach(&mut self) {
        if self.state == ViewState::Unattached {
            self.state = ViewState::Active;
        }
    }

    /// Next index to visit, or `None` once the traversal is over.
    pub(crate) fn step(&mut self, len: usize) -> Option<usize> {
        self.attach();
        if self.state == ViewState::Unlinked || self.position >= len {
            self.state = ViewState::Unlinked;
            return None;
        }
        let index = self.position;
        self.position += 1;
        Some(index)
    }

    pub(crate) fn seek(&mut self, position: usize) {
        self.position = position;
    }

    pub(crate) fn unlink(&mut self) {
        self.state = ViewState::Unlinked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_then_unlinks() {
        let mut c = Cursor::default();
        assert_eq!(c.state(), ViewState::Unattached);
        assert_eq!(c.step(2), Some(0));
        assert_eq!(c.state(), ViewState::Active);
        assert_eq!(c.step(2), Some(1));
        assert_eq!(c.step(2), None);
        assert_eq!(c.state(), ViewState::Unlinked);
    }

    #[test]
    fn unlinked_never_reactivates() {
        let mut c = Cursor::default();
        c.unlink();
        c.attach();
        c.seek(0);
        assert_eq!(c.step(5), None);
        assert_eq!(c.state(), ViewState::Unlinked);
    }
}
