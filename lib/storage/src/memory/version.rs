/// The versions in which a triple is present.
///
/// The range is a list of bounds, alternating between the version a triple was inserted in and
/// the version it was removed in. An odd number of bounds means the triple is still present.
/// Committed bounds are strictly increasing.
///
/// While a transaction runs, its changes are recorded with the transaction id as the last
/// bound. Transaction ids are larger than every version, so readers of committed versions do not
/// observe them. On commit the id is replaced by the new version, on rollback the bound is
/// dropped. Bulk loads hold the transaction lock for the whole load and record the version they
/// publish directly, so their bounds never need upgrading.
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub(super) enum VersionRange {
    #[default]
    Absent,
    Since(usize),
    Between([usize; 2]),
    History(Box<[usize]>),
}

impl VersionRange {
    fn bounds(&self) -> &[usize] {
        match self {
            Self::Absent => &[],
            Self::Since(start) => std::slice::from_ref(start),
            Self::Between(bounds) => bounds,
            Self::History(bounds) => bounds,
        }
    }

    fn from_bounds(bounds: &[usize]) -> Self {
        match *bounds {
            [] => Self::Absent,
            [start] => Self::Since(start),
            [start, end] => Self::Between([start, end]),
            _ => Self::History(bounds.into()),
        }
    }

    /// Whether the triple is present after the last recorded change.
    fn is_present(&self) -> bool {
        self.bounds().len() % 2 == 1
    }

    fn last(&self) -> Option<usize> {
        self.bounds().last().copied()
    }

    pub(super) fn contains(&self, version: usize) -> bool {
        self.bounds().chunks(2).any(|bounds| match *bounds {
            [start, end] => start <= version && version < end,
            [start] => start <= version,
            _ => false,
        })
    }

    /// Records an insertion in `version`. Returns `false` if the triple is already present.
    pub(super) fn add(&mut self, version: usize) -> bool {
        if self.is_present() {
            return false;
        }
        self.toggle(version);
        true
    }

    /// Records a removal in `version`. Returns `false` if the triple is already absent.
    pub(super) fn remove(&mut self, version: usize) -> bool {
        if !self.is_present() {
            return false;
        }
        self.toggle(version);
        true
    }

    /// Commits the bound recorded by `transaction_id`, if any, as `version_id`.
    pub(super) fn upgrade_transaction(&mut self, transaction_id: usize, version_id: usize) {
        if self.last() != Some(transaction_id) {
            return;
        }
        match self {
            Self::Absent => (),
            Self::Since(start) => *start = version_id,
            Self::Between([_, end]) => *end = version_id,
            Self::History(bounds) => {
                if let Some(last) = bounds.last_mut() {
                    *last = version_id;
                }
            }
        }
    }

    /// Drops the bound recorded by `transaction_id`, if any.
    pub(super) fn rollback_transaction(&mut self, transaction_id: usize) {
        if self.last() == Some(transaction_id) {
            self.pop();
        }
    }

    /// Flips presence in `version`. A change undoing one made in the same version drops the
    /// bound instead of adding an empty interval.
    fn toggle(&mut self, version: usize) {
        if self.last() == Some(version) {
            self.pop();
        } else {
            self.push(version);
        }
    }

    fn push(&mut self, version: usize) {
        *self = match std::mem::take(self) {
            Self::Absent => Self::Since(version),
            Self::Since(start) => Self::Between([start, version]),
            Self::Between([start, end]) => Self::History(Box::new([start, end, version])),
            Self::History(bounds) => {
                Self::History(bounds.iter().copied().chain([version]).collect())
            }
        };
    }

    fn pop(&mut self) {
        if let Some((_, rest)) = self.bounds().split_last() {
            *self = Self::from_bounds(rest);
        }
    }
}
