use crate::error::{BoardError, PlaceError};
use crate::player::PlayerId;
use crate::territory::{Territory, TerritoryId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ownership and unit count of one territory, as recorded in a snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Holding {
    pub owner: Option<PlayerId>,
    pub units: u32,
}

/// The territory graph. Territories live in an arena indexed by their id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    territories: Vec<Territory>,
    snapshot: Option<Vec<Holding>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_territory(&mut self, name: &str) -> TerritoryId {
        let id = self.territories.len();
        self.territories.push(Territory::new(id, name));
        self.snapshot = None;
        id
    }

    /// Adds a two-way link. Linking an already adjacent pair is a no-op.
    pub fn add_adjacency_link(&mut self, a: TerritoryId, b: TerritoryId) -> Result<(), BoardError> {
        if a == b {
            return Err(BoardError::SelfLink(a));
        }
        for id in [a, b] {
            if id >= self.territories.len() {
                return Err(BoardError::UnknownTerritory(id));
            }
        }
        if !self.territories[a].is_adjacent(b) {
            self.snapshot = None;
        }
        self.territories[a].add_adjacent(b);
        self.territories[b].add_adjacent(a);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(id)
    }

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn units(&self, id: TerritoryId) -> u32 {
        self.territory(id).map_or(0, Territory::units)
    }

    pub fn owner(&self, id: TerritoryId) -> Option<PlayerId> {
        self.territory(id).and_then(Territory::owner)
    }

    /// Territories whose owner equals `owner`; `None` selects unowned territories.
    pub fn owned_by(&self, owner: Option<PlayerId>) -> Vec<TerritoryId> {
        self.territories
            .iter()
            .filter(|t| t.owner == owner)
            .map(|t| t.id)
            .collect()
    }

    pub fn unowned(&self) -> Vec<TerritoryId> {
        self.owned_by(None)
    }

    pub fn count_owned(&self, owner: Option<PlayerId>) -> usize {
        self.territories.iter().filter(|t| t.owner == owner).count()
    }

    pub fn total_units(&self, player: PlayerId) -> u32 {
        self.territories
            .iter()
            .filter(|t| t.is_owned_by(player))
            .map(|t| t.units)
            .sum()
    }

    pub fn with_degree(&self, degree: usize) -> Vec<TerritoryId> {
        self.territories
            .iter()
            .filter(|t| t.degree() == degree)
            .map(|t| t.id)
            .collect()
    }

    pub fn count_with_degree(&self, degree: usize) -> usize {
        self.territories.iter().filter(|t| t.degree() == degree).count()
    }

    /// The `n`th (1-based) territory with exactly `degree` neighbours.
    pub fn nth_with_degree(&self, degree: usize, n: usize) -> Option<TerritoryId> {
        self.territories
            .iter()
            .filter(|t| t.degree() == degree)
            .nth(n.checked_sub(1)?)
            .map(|t| t.id)
    }

    pub fn max_degree(&self) -> usize {
        self.territories.iter().map(Territory::degree).max().unwrap_or(0)
    }

    /// Moves units without any rule checks. Callers validate legality first.
    pub fn move_units(&mut self, from: TerritoryId, to: TerritoryId, num: u32) {
        debug_assert!(self.units(from) >= num, "moving more units than present");
        if from >= self.territories.len() || to >= self.territories.len() {
            return;
        }
        self.territories[from].units = self.territories[from].units.saturating_sub(num);
        self.territories[to].units += num;
    }

    /// Places a single unit. Succeeds only on an unowned territory or one the
    /// player already owns.
    pub fn place_unit(&mut self, territory: TerritoryId, player: PlayerId) -> Result<(), PlaceError> {
        let target = self
            .territories
            .get_mut(territory)
            .ok_or(PlaceError::UnknownTerritory(territory))?;
        match target.owner {
            Some(owner) if owner != player => {
                return Err(PlaceError::OwnershipConflict { territory, owner });
            }
            _ => {}
        }
        target.owner = Some(player);
        target.units += 1;
        debug!(territory, player, units = target.units, "unit placed");
        Ok(())
    }

    pub(crate) fn set_holding(&mut self, territory: TerritoryId, holding: Holding) {
        if let Some(t) = self.territories.get_mut(territory) {
            t.owner = holding.owner;
            t.units = holding.units;
        }
    }

    pub fn holding(&self, territory: TerritoryId) -> Option<Holding> {
        self.territory(territory).map(|t| Holding {
            owner: t.owner,
            units: t.units,
        })
    }

    /// Records the current ownership and unit state as the post-setup state
    /// that `restore` returns to.
    pub fn capture_snapshot(&mut self) {
        let holdings = self
            .territories
            .iter()
            .map(|t| Holding {
                owner: t.owner,
                units: t.units,
            })
            .collect();
        self.snapshot = Some(holdings);
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Resets ownership and units to the captured snapshot. Topology is untouched.
    pub fn restore(&mut self) -> Result<(), BoardError> {
        let snapshot = self.snapshot.as_ref().ok_or(BoardError::NoSnapshot)?;
        for (territory, holding) in self.territories.iter_mut().zip(snapshot) {
            territory.owner = holding.owner;
            territory.units = holding.units;
        }
        Ok(())
    }

    /// Empties the board so a structurally different map can be built on it.
    pub fn clear(&mut self) {
        self.territories.clear();
        self.snapshot = None;
    }
}
