//! Threat heuristics over the territory graph.
//!
//! Both scans walk outward from a root territory breadth first, stepping only
//! through territories not held by the viewing player. A territory first
//! reached at hop distance `d` has `range - d + 1` hops remaining and
//! contributes that weight once. The root never counts towards its own threat.
//!
//! The visited set is local to each call, so evaluations never observe each
//! other even when run concurrently on a shared `&Board`.

use crate::board::Board;
use crate::player::PlayerId;
use crate::territory::{Territory, TerritoryId};
use std::collections::VecDeque;

impl Board {
    /// Unit-weighted threat against `territory`, seen by its current owner.
    pub fn unit_threat(&self, territory: TerritoryId, range: u32) -> u64 {
        let viewer = self.owner(territory);
        self.unit_threat_for(territory, range, viewer)
    }

    /// Unit-weighted threat against `territory`, seen by `viewer`.
    pub fn unit_threat_for(&self, territory: TerritoryId, range: u32, viewer: Option<PlayerId>) -> u64 {
        self.scan(territory, range, viewer, |t, hops| u64::from(t.units()) * u64::from(hops))
    }

    /// Count-based threat: every enemy territory in range weighs its remaining hops.
    pub fn adjacency_threat(&self, territory: TerritoryId, range: u32) -> u64 {
        let viewer = self.owner(territory);
        self.adjacency_threat_for(territory, range, viewer)
    }

    pub fn adjacency_threat_for(
        &self,
        territory: TerritoryId,
        range: u32,
        viewer: Option<PlayerId>,
    ) -> u64 {
        self.scan(territory, range, viewer, |_, hops| u64::from(hops))
    }

    fn scan<F>(&self, root: TerritoryId, range: u32, viewer: Option<PlayerId>, weigh: F) -> u64
    where
        F: Fn(&Territory, u32) -> u64,
    {
        if range == 0 || root >= self.len() {
            return 0;
        }

        let mut visited = vec![false; self.len()];
        visited[root] = true;
        let mut frontier = VecDeque::from([(root, 0u32)]);
        let mut threat = 0;

        while let Some((current, distance)) = frontier.pop_front() {
            if distance == range {
                continue;
            }
            let Some(node) = self.territory(current) else {
                continue;
            };
            for next in node.adjacent() {
                let Some(neighbour) = self.territory(next) else {
                    continue;
                };
                if visited[next] || neighbour.owner() == viewer {
                    continue;
                }
                visited[next] = true;
                let hops = range - distance;
                threat += weigh(neighbour, hops);
                frontier.push_back((next, distance + 1));
            }
        }

        threat
    }
}
