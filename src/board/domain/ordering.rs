//! Pure position ordering engine for sibling sets.
//!
//! Columns within a board and tasks within a column are kept densely
//! ordered: for a scope with `N` siblings the stored positions are exactly
//! `{0, ..., N-1}`. The functions here compute rank assignments from a
//! snapshot of the current sibling rows and perform no I/O; adapters apply
//! the returned assignments inside the same transaction that loaded the
//! snapshot, so a partial renumbering is never observable.
//!
//! Ties between equal stored positions break on ascending identifier, which
//! makes both operations deterministic and [`normalized`] idempotent.

/// One sibling row in a scope: its identifier and currently stored position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<I> {
    /// Sibling identifier.
    pub id: I,
    /// Currently stored position.
    pub position: i32,
}

impl<I> Slot<I> {
    /// Creates a slot from an identifier and its stored position.
    pub const fn new(id: I, position: i32) -> Self {
        Self { id, position }
    }
}

fn sorted<I: Copy + Ord>(slots: &[Slot<I>]) -> Vec<Slot<I>> {
    let mut ordered = slots.to_vec();
    ordered.sort_by_key(|slot| (slot.position, slot.id));
    ordered
}

fn rank_of(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

/// Computes the writes needed to make a scope's positions dense.
///
/// Returns only the slots whose stored position differs from their rank in
/// `(position, id)` order, each paired with its new position. An already
/// dense scope yields no writes, so applying the result twice is a no-op.
#[must_use]
pub fn normalized<I: Copy + Ord>(slots: &[Slot<I>]) -> Vec<Slot<I>> {
    sorted(slots)
        .into_iter()
        .enumerate()
        .filter(|(index, slot)| slot.position != rank_of(*index))
        .map(|(index, slot)| Slot::new(slot.id, rank_of(index)))
        .collect()
}

/// Computes the full rank assignment after placing `target` at `requested`.
///
/// The target is removed from the `(position, id)`-ordered sequence (it need
/// not currently appear in `slots`; a freshly re-parented row is simply
/// absent), `requested` is clamped into `[0, remaining]` without error, and
/// the target is reinserted at the clamped index. Every member of the
/// resulting sequence is assigned its rank, so the scope is dense afterwards
/// regardless of the positions it held before.
#[must_use]
pub fn inserted_at<I: Copy + Ord>(slots: &[Slot<I>], target: I, requested: i64) -> Vec<Slot<I>> {
    let mut ids: Vec<I> = sorted(slots)
        .into_iter()
        .map(|slot| slot.id)
        .filter(|id| *id != target)
        .collect();

    let upper = i64::try_from(ids.len()).unwrap_or(i64::MAX);
    let clamped = requested.clamp(0, upper);
    let index = usize::try_from(clamped).unwrap_or(ids.len());
    ids.insert(index, target);

    ids.into_iter()
        .enumerate()
        .map(|(rank, id)| Slot::new(id, rank_of(rank)))
        .collect()
}

/// Returns `true` when the stored positions form the dense run `0..N-1`.
#[must_use]
pub fn is_dense<I: Copy + Ord>(slots: &[Slot<I>]) -> bool {
    let mut positions: Vec<i32> = slots.iter().map(|slot| slot.position).collect();
    positions.sort_unstable();
    positions
        .iter()
        .enumerate()
        .all(|(index, position)| *position == rank_of(index))
}
