//! Zeros and poles of a design, with optional conjugate mirroring
//!
//! Roots are kept per kind in insertion order and addressed by a stable
//! [`RootId`]. When conjugate mode is on every root carries its mirror
//! `x - iy`; the mirror is written together with the root on every insert and
//! move and dropped with it on removal.

use pz_core::{Complex64, DEFAULT_REMOVAL_TOLERANCE, RootKind, manhattan, mirror};
use std::collections::BTreeMap;

/// Stable handle to a root, valid until the root is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootId {
    kind: RootKind,
    key: u64,
}

impl RootId {
    #[inline]
    pub fn kind(&self) -> RootKind {
        self.kind
    }
}

/// Snapshot of one root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub id: RootId,
    pub kind: RootKind,
    pub position: Complex64,
    /// Conjugate mirror, present only in conjugate mode
    pub mirror: Option<Complex64>,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    position: Complex64,
    mirror: Option<Complex64>,
}

/// The ground-truth design state
#[derive(Debug, Clone, Default)]
pub struct RootSet {
    // keys grow monotonically, so map order is insertion order
    zeros: BTreeMap<u64, Entry>,
    poles: BTreeMap<u64, Entry>,
    conjugate_mode: bool,
    next_key: u64,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with conjugate mode already set
    pub fn with_conjugate_mode(enabled: bool) -> Self {
        Self {
            conjugate_mode: enabled,
            ..Self::default()
        }
    }

    fn entries(&self, kind: RootKind) -> &BTreeMap<u64, Entry> {
        match kind {
            RootKind::Zero => &self.zeros,
            RootKind::Pole => &self.poles,
        }
    }

    fn entries_mut(&mut self, kind: RootKind) -> &mut BTreeMap<u64, Entry> {
        match kind {
            RootKind::Zero => &mut self.zeros,
            RootKind::Pole => &mut self.poles,
        }
    }

    /// Append a root; its mirror is added too in conjugate mode
    pub fn add_root(&mut self, position: Complex64, kind: RootKind) -> RootId {
        let key = self.next_key;
        self.next_key += 1;

        let entry = Entry {
            position,
            mirror: self.conjugate_mode.then(|| mirror(position)),
        };
        self.entries_mut(kind).insert(key, entry);

        log::debug!("Adding {} at ({}, {})", kind, position.re, position.im);
        RootId { kind, key }
    }

    /// Move a root (and its mirror). Returns `false` for an unknown id.
    ///
    /// Any position is accepted; the z-plane is unbounded.
    pub fn move_root(&mut self, id: RootId, new_position: Complex64) -> bool {
        let conjugate_mode = self.conjugate_mode;
        match self.entries_mut(id.kind).get_mut(&id.key) {
            Some(entry) => {
                entry.position = new_position;
                entry.mirror = conjugate_mode.then(|| mirror(new_position));
                true
            }
            None => false,
        }
    }

    /// Remove a root by handle
    pub fn remove(&mut self, id: RootId) -> bool {
        self.entries_mut(id.kind).remove(&id.key).is_some()
    }

    /// Remove the first root whose Manhattan distance to `clicked` is below
    /// `tolerance`.
    ///
    /// Poles are scanned before zeros, each in insertion order; at most one
    /// root is removed even if several are within tolerance.
    pub fn remove_nearest(&mut self, clicked: Complex64, tolerance: f64) -> Option<RootId> {
        let hit = [RootKind::Pole, RootKind::Zero].into_iter().find_map(|kind| {
            self.entries(kind)
                .iter()
                .find(|(_, entry)| manhattan(entry.position, clicked) < tolerance)
                .map(|(&key, _)| RootId { kind, key })
        })?;

        self.remove(hit);
        log::debug!("Removed {} near ({}, {})", hit.kind, clicked.re, clicked.im);
        Some(hit)
    }

    /// [`remove_nearest`](Self::remove_nearest) with the default tolerance
    pub fn remove_nearest_default(&mut self, clicked: Complex64) -> Option<RootId> {
        self.remove_nearest(clicked, DEFAULT_REMOVAL_TOLERANCE)
    }

    /// Clear all roots of one kind, mirrors included
    pub fn remove_all(&mut self, kind: RootKind) {
        self.entries_mut(kind).clear();
    }

    /// Clear zeros and poles
    pub fn clear(&mut self) {
        self.zeros.clear();
        self.poles.clear();
    }

    /// Enabling materialises mirrors for every root; disabling drops them
    pub fn set_conjugate_mode(&mut self, enabled: bool) {
        self.conjugate_mode = enabled;
        for entry in self.zeros.values_mut().chain(self.poles.values_mut()) {
            entry.mirror = enabled.then(|| mirror(entry.position));
        }
        log::debug!("Conjugate mode = {}", enabled);
    }

    #[inline]
    pub fn conjugate_mode(&self) -> bool {
        self.conjugate_mode
    }

    pub fn get(&self, id: RootId) -> Option<Root> {
        self.entries(id.kind).get(&id.key).map(|entry| Root {
            id,
            kind: id.kind,
            position: entry.position,
            mirror: entry.mirror,
        })
    }

    /// Roots of one kind in insertion order
    pub fn roots(&self, kind: RootKind) -> impl Iterator<Item = Root> + '_ {
        self.entries(kind).iter().map(move |(&key, entry)| Root {
            id: RootId { kind, key },
            kind,
            position: entry.position,
            mirror: entry.mirror,
        })
    }

    /// Primary positions of one kind
    pub fn positions(&self, kind: RootKind) -> Vec<Complex64> {
        self.entries(kind).values().map(|e| e.position).collect()
    }

    /// Mirror positions of one kind (empty unless conjugate mode is on)
    pub fn mirrors(&self, kind: RootKind) -> Vec<Complex64> {
        self.entries(kind).values().filter_map(|e| e.mirror).collect()
    }

    pub fn zeros(&self) -> Vec<Complex64> {
        self.positions(RootKind::Zero)
    }

    pub fn poles(&self) -> Vec<Complex64> {
        self.positions(RootKind::Pole)
    }

    /// Primary positions followed by mirrors
    pub fn with_mirrors(&self, kind: RootKind) -> Vec<Complex64> {
        let mut all = self.positions(kind);
        all.extend(self.mirrors(kind));
        all
    }

    /// Number of primary roots
    pub fn primary_len(&self) -> usize {
        self.zeros.len() + self.poles.len()
    }

    /// Number of entries, mirrors included
    pub fn len(&self) -> usize {
        let mirrors = self
            .zeros
            .values()
            .chain(self.poles.values())
            .filter(|e| e.mirror.is_some())
            .count();
        self.primary_len() + mirrors
    }

    pub fn is_empty(&self) -> bool {
        self.primary_len() == 0
    }
}
