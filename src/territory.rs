use crate::board::Board;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub type TerritoryId = usize;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Territory {
    pub id: TerritoryId,
    pub name: String,
    pub(crate) owner: Option<PlayerId>,
    pub(crate) units: u32,
    pub(crate) adjacent_territories: BTreeSet<TerritoryId>,
}

impl Territory {
    pub fn new(id: TerritoryId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            owner: None,
            units: 0,
            adjacent_territories: BTreeSet::new(),
        }
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn units(&self) -> u32 {
        self.units
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    pub fn is_adjacent(&self, territory: TerritoryId) -> bool {
        self.adjacent_territories.contains(&territory)
    }

    pub fn adjacent(&self) -> impl Iterator<Item = TerritoryId> + '_ {
        self.adjacent_territories.iter().copied()
    }

    pub fn degree(&self) -> usize {
        self.adjacent_territories.len()
    }

    // Links are only ever created in pairs through `Board::add_adjacency_link`.
    pub(crate) fn add_adjacent(&mut self, adjacent: TerritoryId) {
        self.adjacent_territories.insert(adjacent);
    }
}

impl Board {
    pub fn are_adjacent(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self.territory(a).is_some_and(|t| t.is_adjacent(b))
    }

    /// Neighbours of `territory` not owned by `player` (unowned ones included).
    pub fn enemy_neighbours(&self, territory: TerritoryId, player: PlayerId) -> Vec<TerritoryId> {
        self.neighbours_where(territory, |t| !t.is_owned_by(player))
    }

    pub fn friendly_neighbours(&self, territory: TerritoryId, player: PlayerId) -> Vec<TerritoryId> {
        self.neighbours_where(territory, |t| t.is_owned_by(player))
    }

    pub fn unowned_neighbours(&self, territory: TerritoryId) -> Vec<TerritoryId> {
        self.neighbours_where(territory, |t| t.owner.is_none())
    }

    pub fn borders_enemy(&self, territory: TerritoryId, player: PlayerId) -> bool {
        !self.enemy_neighbours(territory, player).is_empty()
    }

    fn neighbours_where<F>(&self, territory: TerritoryId, keep: F) -> Vec<TerritoryId>
    where
        F: Fn(&Territory) -> bool,
    {
        let Some(origin) = self.territory(territory) else {
            return Vec::new();
        };
        origin
            .adjacent()
            .filter_map(|id| self.territory(id))
            .filter(|t| keep(t))
            .map(|t| t.id)
            .collect()
    }
}
