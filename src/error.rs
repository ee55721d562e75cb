use crate::player::PlayerId;
use crate::territory::TerritoryId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("territory {0} does not exist")]
    UnknownTerritory(TerritoryId),

    #[error("territory {0} cannot be linked to itself")]
    SelfLink(TerritoryId),

    #[error("no post-setup snapshot has been captured")]
    NoSnapshot,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceError {
    #[error("territory {0} does not exist")]
    UnknownTerritory(TerritoryId),

    #[error("territory {territory} is already owned by player {owner}")]
    OwnershipConflict {
        territory: TerritoryId,
        owner: PlayerId,
    },

    #[error("strategy did not choose a territory")]
    NoTerritoryChosen,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttackError {
    #[error("territory {0} does not exist")]
    UnknownTerritory(TerritoryId),

    #[error("territory {territory} does not belong to player {player}")]
    NotOwner {
        territory: TerritoryId,
        player: PlayerId,
    },

    #[error("territory {territory} already belongs to the attacker")]
    OwnTerritory { territory: TerritoryId },

    #[error("cannot attack with {requested} units, at most {max} allowed")]
    InvalidAttackerCount { requested: u32, max: u32 },

    #[error("territory {to} is not adjacent to territory {from}")]
    NotAdjacent { from: TerritoryId, to: TerritoryId },

    #[error("territory {territory} has no owner to defend it")]
    Unoccupied { territory: TerritoryId },

    #[error("player {0} owns the target but is not seated in this match")]
    UnknownDefender(PlayerId),

    #[error("defender chose {requested} dice, allowed range is 1..={max}")]
    InvalidDefenderCount { requested: u32, max: u32 },

    #[error("cannot occupy with {requested} units, {available} available after combat")]
    InvalidOccupy { requested: u32, available: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FortifyError {
    #[error("territory {0} does not exist")]
    UnknownTerritory(TerritoryId),

    #[error("source territory {territory} does not belong to player {player}")]
    NotOwner {
        territory: TerritoryId,
        player: PlayerId,
    },

    #[error("destination territory {territory} does not belong to player {player}")]
    DestinationNotOwned {
        territory: TerritoryId,
        player: PlayerId,
    },

    #[error("cannot fortify territory {0} from itself")]
    SameTerritory(TerritoryId),

    #[error("cannot move {requested} units, {available} available")]
    InvalidUnitCount { requested: u32, available: u32 },

    #[error("territory {to} is not adjacent to territory {from}")]
    NotAdjacent { from: TerritoryId, to: TerritoryId },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("adjacency references unknown territory '{0}'")]
    UnknownTerritory(String),

    #[error("territory '{0}' is declared twice")]
    DuplicateTerritory(String),

    #[error("neighbour index {neighbour} of territory {territory} is out of range")]
    NeighbourOutOfRange {
        territory: TerritoryId,
        neighbour: usize,
    },

    #[error("degree table cannot be realised as a simple graph")]
    NotGraphical,

    #[error("a match needs at least 2 players, got {0}")]
    TooFewPlayers(usize),

    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("a match needs at least 2 players, got {0}")]
    TooFewPlayers(usize),

    #[error(transparent)]
    Board(#[from] BoardError),
}
