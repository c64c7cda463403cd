use serde::{Deserialize, Serialize};

/// One document collection per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Knowledges,
    Subjects,
    StartPoints,
    Journeys,
    Trails,
    Contents,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Knowledges,
        Collection::Subjects,
        Collection::StartPoints,
        Collection::Journeys,
        Collection::Trails,
        Collection::Contents,
    ];

    /// Backing table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Knowledges => "knowledges",
            Collection::Subjects => "subjects",
            Collection::StartPoints => "points",
            Collection::Journeys => "journeys",
            Collection::Trails => "trails",
            Collection::Contents => "contents",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}
