use crate::types::Command;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandJournal {
    pub format_version: u16,
    pub build_id: String,
    pub seed: u64,
    pub inputs: Vec<CommandRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandRecord {
    pub seq: u64,
    pub command: Command,
}

impl CommandJournal {
    pub fn new(seed: u64) -> Self {
        Self { format_version: 1, build_id: "dev".to_string(), seed, inputs: Vec::new() }
    }

    pub fn append(&mut self, command: Command, seq: u64) {
        self.inputs.push(CommandRecord { seq, command });
    }
}
