//! Cross-encounter roster snapshot: the persistence collaborator reads one
//! at encounter start and writes one at encounter end. The format is plain
//! name-to-health pairs; everything else about the save file is opaque here.

use serde::{Deserialize, Serialize};

use crate::encounter::{Encounter, EncounterSetup};
use crate::types::Side;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub format_version: u16,
    pub entries: Vec<RosterEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
}

impl RosterSnapshot {
    pub fn capture(encounter: &Encounter) -> Self {
        Self {
            format_version: 1,
            entries: encounter
                .player_units()
                .map(|unit| RosterEntry {
                    name: unit.name.clone(),
                    hp: unit.hp,
                    max_hp: unit.max_hp,
                })
                .collect(),
        }
    }
}

impl EncounterSetup {
    pub fn apply_roster(&mut self, roster: &RosterSnapshot) {
        for placement in &mut self.units {
            if placement.spec.side != Side::Player {
                continue;
            }
            if let Some(entry) =
                roster.entries.iter().find(|entry| entry.name == placement.spec.name)
            {
                placement.spec.start_hp = Some(entry.hp);
            }
        }
    }
}
