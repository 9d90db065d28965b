use serde::{Deserialize, Serialize};

use crate::choice::ChoiceSet;
use crate::record::Dataset;

/// Load-time input contract embedded into the generated page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePayload {
    pub records: Dataset,
    pub choices: ChoiceSet,
    pub columns: Vec<String>,
}

impl PagePayload {
    pub fn new(records: Dataset, choices: ChoiceSet, columns: Vec<String>) -> Self {
        Self {
            records,
            choices,
            columns,
        }
    }
}
