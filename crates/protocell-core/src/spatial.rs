//! Spatial indexing abstraction for cell neighborhood queries.

use crate::types::{CellId, Vec3};

/// A point index rebuilt once per day tick and queried during that tick.
///
/// Implementations must return exactly the stored points within `radius`
/// (inclusive) of `center`; pruning is an optimization, never a filter.
pub trait SpatialIndex {
    /// Reset to an empty index.
    fn clear(&mut self);

    /// Store a point.
    fn insert(&mut self, id: CellId, position: Vec3);

    /// Visit every stored point with `distance(center, p) <= radius`.
    fn visit_within(&self, center: Vec3, radius: f64, visitor: &mut dyn FnMut(CellId, Vec3));

    /// Number of stored points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids within `radius` of `center`, skipping `exclude` (the querying cell).
    fn query(&self, center: Vec3, radius: f64, exclude: Option<CellId>) -> Vec<CellId> {
        let mut found = Vec::new();
        self.visit_within(center, radius, &mut |id, _| {
            if Some(id) != exclude {
                found.push(id);
            }
        });
        found
    }

    /// Clear, then insert every entry.
    fn rebuild<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (CellId, Vec3)>,
        Self: Sized,
    {
        self.clear();
        for (id, position) in entries {
            self.insert(id, position);
        }
    }
}
