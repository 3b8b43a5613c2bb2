//! Monotone-chain sweep line over one or two edge sets.
//!
//! Events are the x-extents of monotone chains. Each Insert scans forward to
//! its own Delete, so every x-overlapping chain pair is enumerated exactly
//! once. Overlapping pairs are refined by bisection on an explicit work
//! stack down to single segments, which are handed to a `SegmentVisitor`.

use tracing::trace;

use super::chain::{run_envelope, MonotoneChainEdge};
use crate::error::RelateError;
use crate::kernel::Coordinate;

/// An edge the sweep can decompose into monotone chains.
pub trait ChainSource {
    fn coords(&self) -> &[Coordinate];
    /// Cached chain decomposition, built on first use.
    fn monotone_chains(&mut self) -> Result<&MonotoneChainEdge, RelateError>;
}

/// Segment `seg` (from `coords[seg]` to `coords[seg + 1]`) of edge `edge` in set `set`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegRef {
    pub set: usize,
    pub edge: usize,
    pub seg: usize,
}

/// Sink for candidate segment pairs.
pub trait SegmentVisitor<E> {
    fn visit(&mut self, sets: &mut [&mut Vec<E>], a: SegRef, b: SegRef);
    /// Stop the sweep as soon as this returns true.
    fn is_done(&self) -> bool {
        false
    }
}

/// Which chain pairs are candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepMode {
    /// Every pair, including a chain with itself.
    AllPairs,
    /// Chains of the same edge are never compared.
    SkipSameEdge,
    /// Only chains from different edge sets are compared.
    SkipSameSet,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub events: usize,
    pub chain_pairs: usize,
    pub segment_pairs: usize,
}

#[derive(Clone, Copy, Debug)]
struct Chain {
    set: usize,
    edge: usize,
    start: usize,
    end: usize,
    /// Chains with equal `Some` labels are never compared; `None` matches nothing.
    label: Option<usize>,
}

#[derive(Clone, Copy, Debug)]
struct Event {
    x: f64,
    delete: bool,
    chain: usize,
}

#[inline]
fn labels_differ(a: Option<usize>, b: Option<usize>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a != b,
        _ => true,
    }
}

/// Sweep all chains of `sets` and feed overlapping segment pairs to `visitor`.
pub fn compute_intersections<E, V>(
    sets: &mut [&mut Vec<E>],
    mode: SweepMode,
    visitor: &mut V,
) -> Result<SweepStats, RelateError>
where
    E: ChainSource,
    V: SegmentVisitor<E>,
{
    let mut chains: Vec<Chain> = Vec::new();
    let mut flat_edge = 0usize;
    for (set, edges) in sets.iter_mut().enumerate() {
        for (edge, e) in edges.iter_mut().enumerate() {
            let label = match mode {
                SweepMode::AllPairs => None,
                SweepMode::SkipSameEdge => Some(flat_edge),
                SweepMode::SkipSameSet => Some(set),
            };
            flat_edge += 1;
            for (start, end) in e.monotone_chains()?.ranges() {
                chains.push(Chain {
                    set,
                    edge,
                    start,
                    end,
                    label,
                });
            }
        }
    }

    let mut events: Vec<Event> = Vec::with_capacity(2 * chains.len());
    for (ci, ch) in chains.iter().enumerate() {
        let pts = sets[ch.set][ch.edge].coords();
        let (a, b) = (pts[ch.start].x + 0.0, pts[ch.end].x + 0.0);
        events.push(Event {
            x: a.min(b),
            delete: false,
            chain: ci,
        });
        events.push(Event {
            x: a.max(b),
            delete: true,
            chain: ci,
        });
    }
    events.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.delete.cmp(&b.delete)));

    let mut delete_at = vec![0usize; chains.len()];
    for (i, ev) in events.iter().enumerate() {
        if ev.delete {
            delete_at[ev.chain] = i;
        }
    }

    let mut stats = SweepStats {
        events: events.len(),
        ..SweepStats::default()
    };
    let mut stack: Vec<(usize, usize, usize, usize)> = Vec::new();
    for (i, ev) in events.iter().enumerate() {
        if ev.delete {
            continue;
        }
        let c0 = chains[ev.chain];
        for ev1 in &events[i..delete_at[ev.chain]] {
            if ev1.delete {
                continue;
            }
            let c1 = chains[ev1.chain];
            if !labels_differ(c0.label, c1.label) {
                continue;
            }
            stats.chain_pairs += 1;
            let same = ev.chain == ev1.chain;
            compute_overlaps(sets, c0, c1, same, visitor, &mut stack, &mut stats);
            if visitor.is_done() {
                trace!(?stats, "sweep stopped early");
                return Ok(stats);
            }
        }
    }
    trace!(?stats, chains = chains.len(), "sweep finished");
    Ok(stats)
}

/// Bisect a chain pair down to overlapping single segments.
fn compute_overlaps<E, V>(
    sets: &mut [&mut Vec<E>],
    c0: Chain,
    c1: Chain,
    same: bool,
    visitor: &mut V,
    stack: &mut Vec<(usize, usize, usize, usize)>,
    stats: &mut SweepStats,
) where
    E: ChainSource,
    V: SegmentVisitor<E>,
{
    stack.clear();
    stack.push((c0.start, c0.end, c1.start, c1.end));
    while let Some((s0, e0, s1, e1)) = stack.pop() {
        if visitor.is_done() {
            return;
        }
        // A chain against itself: mirrored sub-pairs are the same work.
        if same && s1 < s0 {
            continue;
        }
        let env0 = run_envelope(sets[c0.set][c0.edge].coords(), s0, e0);
        let env1 = run_envelope(sets[c1.set][c1.edge].coords(), s1, e1);
        if !env0.intersects(&env1) {
            continue;
        }
        if e0 - s0 == 1 && e1 - s1 == 1 {
            if same && s0 == s1 {
                continue;
            }
            stats.segment_pairs += 1;
            visitor.visit(
                sets,
                SegRef {
                    set: c0.set,
                    edge: c0.edge,
                    seg: s0,
                },
                SegRef {
                    set: c1.set,
                    edge: c1.edge,
                    seg: s1,
                },
            );
            continue;
        }
        let m0 = (s0 + e0) / 2;
        let m1 = (s1 + e1) / 2;
        // Pushed in reverse so the low halves are refined first.
        if m0 < e0 {
            if m1 < e1 {
                stack.push((m0, e0, m1, e1));
            }
            if s1 < m1 {
                stack.push((m0, e0, s1, m1));
            }
        }
        if s0 < m0 {
            if m1 < e1 {
                stack.push((s0, m0, m1, e1));
            }
            if s1 < m1 {
                stack.push((s0, m0, s1, m1));
            }
        }
    }
}
