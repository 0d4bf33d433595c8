//! Grouping of acute vertices into islands.
//!
//! Acute indices are visited in contour order. A vertex joins the island being
//! built when it directly follows the island's last member, or when the chord
//! between the two is shorter than half the search window. The contour is a
//! loop, so the scan is circular: it starts right after a pair of acute
//! vertices that does not join, and a cluster around index 0 comes out as one
//! island running `.., n - 1, 0, 1, ..`.

use log::debug;
use pm_core::Point2i;
use pm_core::circular::{forward_gap, is_successor};

use crate::chain::AngleChain;
use crate::params::{AcuteParams, MIN_LANDMARK_ISLAND};

/// Acute vertex indices forming one physical cluster, in contour order.
///
/// Never empty. When the cluster straddles the seam the members run from the
/// high indices through `n - 1` into `0, 1, ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Island {
    members: Vec<usize>,
}

impl Island {
    /// Returns `None` for an empty member list.
    pub fn from_members(members: Vec<usize>) -> Option<Self> {
        if members.is_empty() {
            return None;
        }
        Some(Self { members })
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// First member in contour order.
    pub fn start(&self) -> usize {
        self.members[0]
    }

    /// Last member in contour order.
    pub fn end(&self) -> usize {
        self.members[self.members.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_landmark_eligible(&self) -> bool {
        self.members.len() >= MIN_LANDMARK_ISLAND
    }

    /// `true` when the island crosses the `n - 1 -> 0` seam.
    pub fn wraps(&self) -> bool {
        self.members.windows(2).any(|w| w[1] < w[0])
    }
}

/// Partitions the vertices scoring `<= params.threshold_deg` into islands.
///
/// `chain` must be index-aligned with `contour`. Indices are scanned in
/// circular order starting at a break between islands, so members always run
/// in contour order, through the seam if need be. Islands come out ordered by
/// start index; a seam-crossing island therefore sits last.
pub fn extract_islands(
    contour: &[Point2i],
    chain: &AngleChain,
    params: &AcuteParams,
) -> Vec<Island> {
    debug_assert_eq!(chain.len(), contour.len());
    let bridge = params.bridge_dist();
    let acute = chain.acute_indices(params.threshold_deg);
    if acute.is_empty() {
        debug!("islands: no acute vertices");
        return Vec::new();
    }

    let m = acute.len();
    let prev = |k: usize| acute[(k + m - 1) % m];
    let first = (0..m)
        .find(|&k| !joins(contour, prev(k), acute[k], bridge))
        .unwrap_or_else(|| widest_gap_start(&acute, contour.len()));

    let mut islands = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    for k in 0..m {
        let i = acute[(first + k) % m];
        if let Some(&last) = current.last()
            && !joins(contour, last, i, bridge)
        {
            islands.push(Island {
                members: std::mem::take(&mut current),
            });
        }
        current.push(i);
    }
    islands.push(Island { members: current });
    islands.sort_by_key(Island::start);

    if let Some(seam) = islands.last().filter(|isl| isl.wraps()) {
        debug!("seam island {}..{}", seam.start(), seam.end());
    }
    debug!(
        "islands: {} found, {} landmark-eligible",
        islands.len(),
        islands.iter().filter(|isl| isl.is_landmark_eligible()).count()
    );
    islands
}

fn joins(contour: &[Point2i], last: usize, next: usize, bridge: f64) -> bool {
    is_successor(last, next, contour.len()) || contour[last].dist(contour[next]) < bridge
}

/// Position in `acute` that follows the longest circular run of non-acute
/// vertices. Used when every neighboring pair of acute vertices joins.
fn widest_gap_start(acute: &[usize], n: usize) -> usize {
    let m = acute.len();
    let mut best = 0;
    let mut best_gap = 0;
    for k in 0..m {
        let gap = forward_gap(acute[(k + m - 1) % m], acute[k], n);
        if gap > best_gap {
            best = k;
            best_gap = gap;
        }
    }
    best
}
