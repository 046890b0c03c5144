// Rawkeys Held-Key Tracking
// Insertion-ordered set of keys currently considered pressed

use indexmap::IndexSet;
use smallvec::SmallVec;

use crate::Key;

/// Keys released by a focus-loss flush, in flush order
pub type FlushedKeys = SmallVec<[Key; 8]>;

/// What a release did to the tracked state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The key was held and is now released
    Held,
    /// The key was not tracked; the release still passes through
    Untracked,
    /// The key was already released by the last flush
    Flushed,
}

impl Release {
    /// Whether the release should reach the application
    pub fn should_emit(self) -> bool {
        !matches!(self, Release::Flushed)
    }
}

/// Tracks which application keys are down.
///
/// A key is present iff its most recent normalized event was a press and
/// neither a release nor a flush has happened since. Iteration follows
/// press order, which fixes the order of synthesized releases.
///
/// Keys released by a flush are remembered until their first real release
/// or their next press, so that release is not delivered twice.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: IndexSet<Key>,
    flushed: IndexSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Pressing an already-held key keeps its position.
    pub fn mark_down(&mut self, key: Key) {
        self.flushed.swap_remove(&key);
        self.held.insert(key);
    }

    /// Record a release. Releasing a key that is not held leaves the set
    /// unchanged.
    pub fn mark_up(&mut self, key: Key) -> Release {
        if self.held.shift_remove(&key) {
            Release::Held
        } else if self.flushed.swap_remove(&key) {
            Release::Flushed
        } else {
            Release::Untracked
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Remove every held key and return them in press order.
    ///
    /// After a flush the set is empty; the first real release of each
    /// returned key reports [`Release::Flushed`].
    pub fn flush_all_as_up(&mut self) -> FlushedKeys {
        let released: FlushedKeys = self.held.drain(..).collect();
        self.flushed.extend(released.iter().copied());
        released
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}
