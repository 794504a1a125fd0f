use serde::Serialize;

use crate::grid::Grid;

/// Membership group that never moves (open water).
pub const SINK_GROUP: u16 = 1;

/// One water/contaminant packet.
///
/// `group` is the membership of the start cell, captured once at creation.
/// It does not follow the particle as it moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Particle {
    pub start_row: usize,
    pub start_col: usize,
    pub row: usize,
    pub col: usize,
    pub group: u16,
}

impl Particle {
    pub fn new(row: usize, col: usize, group: u16) -> Self {
        Self {
            start_row: row,
            start_col: col,
            row,
            col,
            group,
        }
    }

    #[inline]
    pub fn is_sink(&self) -> bool {
        self.group == SINK_GROUP
    }

    #[inline]
    pub fn pos(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Insertion-ordered, append-only particle list.
/// Order matters: the step loop visits particles by index.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    items: Vec<Particle>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one particle per coordinate, tagging each with the membership
    /// of its start cell. Coordinates must already be on the raster.
    pub fn append(&mut self, coords: &[(usize, usize)], membership: &Grid<u16>) {
        self.items.reserve(coords.len());
        for &(row, col) in coords {
            self.items
                .push(Particle::new(row, col, membership.get(row, col)));
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.items
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.items
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.items.get(index)
    }

    pub fn non_sink_count(&self) -> usize {
        self.items.iter().filter(|p| !p.is_sink()).count()
    }

    /// Particles per origin group; entry `g - 1` counts group `g`.
    pub fn group_counts(&self, levels: usize) -> Vec<u32> {
        let mut out = vec![0u32; levels];
        for p in &self.items {
            if let Some(slot) = out.get_mut((p.group as usize).wrapping_sub(1)) {
                *slot += 1;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership() -> Grid<u16> {
        Grid::from_rows(&[vec![1, 2, 2], vec![1, 3, 2], vec![1, 3, 3]]).unwrap()
    }

    #[test]
    fn append_tags_start_group() {
        let m = membership();
        let mut set = ParticleSet::new();
        set.append(&[(0, 0), (1, 1), (0, 2)], &m);
        let groups: Vec<u16> = set.as_slice().iter().map(|p| p.group).collect();
        assert_eq!(groups, vec![1, 3, 2]);
        assert!(set.get(0).unwrap().is_sink());
        assert_eq!(set.non_sink_count(), 2);
    }

    #[test]
    fn append_preserves_existing() {
        let m = membership();
        let mut set = ParticleSet::new();
        set.append(&[(1, 1)], &m);
        set.as_mut_slice()[0].row = 2;
        let before = *set.get(0).unwrap();
        set.append(&[(2, 2), (1, 0)], &m);
        assert_eq!(set.len(), 3);
        assert_eq!(*set.get(0).unwrap(), before);
        assert_eq!(set.get(1).unwrap().pos(), (2, 2));
        assert_eq!(set.get(2).unwrap().group, 1);
    }

    #[test]
    fn counts_by_origin_group() {
        let m = membership();
        let mut set = ParticleSet::new();
        set.append(&[(0, 0), (1, 0), (1, 1), (2, 2), (0, 1)], &m);
        assert_eq!(set.group_counts(3), vec![2, 1, 2]);
    }
}
