pub mod encounter;
pub mod grid;
pub mod journal;
pub mod replay;
pub mod roster;
pub mod types;
pub mod units;

pub use encounter::{Encounter, EncounterSetup, UnitPlacement};
pub use grid::{Grid, Prop, RangePartition, Tile, world_anchor};
pub use journal::{CommandJournal, CommandRecord};
pub use replay::*;
pub use roster::{RosterEntry, RosterSnapshot};
pub use types::*;
pub use units::{DamageSplit, Unit, UnitSpec};
