use crate::{
    encounter::{Encounter, EncounterSetup},
    journal::CommandJournal,
    types::{RunOutcome, SetupError},
};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    Setup(SetupError),
    RejectedInput { seq: u64 },
    Unfinished,
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_outcome: RunOutcome,
    pub final_snapshot_hash: u64,
    pub final_turn: u32,
}

pub fn replay_to_end(
    setup: &EncounterSetup,
    journal: &CommandJournal,
) -> Result<ReplayResult, ReplayError> {
    let mut encounter = Encounter::new(journal.seed, setup).map_err(ReplayError::Setup)?;

    for record in &journal.inputs {
        if encounter.outcome().is_some() {
            break;
        }
        if encounter.apply(record.command).is_err() {
            return Err(ReplayError::RejectedInput { seq: record.seq });
        }
    }

    match encounter.outcome() {
        Some(final_outcome) => Ok(ReplayResult {
            final_outcome,
            final_snapshot_hash: encounter.snapshot_hash(),
            final_turn: encounter.turn(),
        }),
        None => Err(ReplayError::Unfinished),
    }
}
