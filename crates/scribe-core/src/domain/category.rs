use serde::{Deserialize, Serialize};

use super::Id;

/// Category entity - a named bucket posts can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self { id: 0, name }
    }
}
