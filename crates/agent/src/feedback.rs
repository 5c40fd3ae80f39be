//! Boundary material flash.
//!
//! A terminal step paints every boundary surface with a success or fail
//! material and schedules a revert to the regular material a fixed hold time
//! later. Reverts are fire-and-forget: nothing cancels them. Each flash bumps
//! a generation counter, and a revert only repaints when its generation is
//! still the latest, so a revert left over from an earlier episode completes
//! without cutting a newer flash short.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Regular,
    Success,
    Fail,
}

/// Caller-provided lookup from material kind to a host handle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialTable<M> {
    pub regular: M,
    pub success: M,
    pub fail: M,
}

impl<M> MaterialTable<M> {
    #[must_use]
    pub fn get(&self, kind: MaterialKind) -> &M {
        match kind {
            MaterialKind::Regular => &self.regular,
            MaterialKind::Success => &self.success,
            MaterialKind::Fail => &self.fail,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct PendingRevert {
    due: Duration,
    generation: u64,
}

/// Materials currently shown on the boundary surfaces plus the reverts still
/// waiting to fire.
#[derive(Clone, Debug)]
pub struct BoundaryFlash<M> {
    table: MaterialTable<M>,
    surfaces: Vec<M>,
    shown: MaterialKind,
    hold: Duration,
    generation: u64,
    pending: Vec<PendingRevert>,
}

impl<M: Clone> BoundaryFlash<M> {
    /// All `surface_count` surfaces start with the regular material.
    #[must_use]
    pub fn new(table: MaterialTable<M>, surface_count: usize, hold: Duration) -> Self {
        let surfaces = vec![table.regular.clone(); surface_count];
        Self {
            table,
            surfaces,
            shown: MaterialKind::Regular,
            hold,
            generation: 0,
            pending: Vec::new(),
        }
    }

    /// Paint every surface with `kind` and schedule the revert at `now + hold`.
    pub fn trigger(&mut self, kind: MaterialKind, now: Duration) {
        self.generation += 1;
        self.paint(kind);
        self.pending.push(PendingRevert { due: now + self.hold, generation: self.generation });
        tracing::debug!(?kind, generation = self.generation, "boundary flash");
    }

    /// Fire every revert due at or before `now`. Returns how many fired.
    pub fn tick(&mut self, now: Duration) -> usize {
        let before = self.pending.len();
        let latest = self.generation;
        let mut repaint = false;
        self.pending.retain(|revert| {
            if revert.due > now {
                return true;
            }
            repaint |= revert.generation == latest;
            false
        });
        if repaint {
            self.paint(MaterialKind::Regular);
        }
        before - self.pending.len()
    }

    /// Replace the material lookup and repaint with the current kind.
    pub fn set_table(&mut self, table: MaterialTable<M>) {
        self.table = table;
        self.paint(self.shown);
    }

    pub fn set_hold(&mut self, hold: Duration) {
        self.hold = hold;
    }

    fn paint(&mut self, kind: MaterialKind) {
        let handle = self.table.get(kind);
        for surface in &mut self.surfaces {
            surface.clone_from(handle);
        }
        self.shown = kind;
    }

    #[must_use]
    pub fn shown(&self) -> MaterialKind {
        self.shown
    }

    #[must_use]
    pub fn surfaces(&self) -> &[M] {
        &self.surfaces
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
