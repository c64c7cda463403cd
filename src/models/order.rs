//! Bodies of the reorder endpoints. Each collection posts its list under its
//! own key; the entries are whole documents of which only `_id` and `order`
//! are read.

use serde::Deserialize;

use super::validate::{Validate, ValidationErrors};
use crate::database::store::OrderEntry;

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeOrder {
    pub knowledge: Vec<OrderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectOrder {
    pub subjects: Vec<OrderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartPointOrder {
    pub points: Vec<OrderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JourneyOrder {
    pub journeys: Vec<OrderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrailOrder {
    pub trails: Vec<OrderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentOrder {
    pub contents: Vec<OrderEntry>,
}

// Shape is fully checked by deserialization; an empty list is a valid no-op.
macro_rules! shape_only_validate {
    ($($body:ty),+ $(,)?) => {
        $(
            impl Validate for $body {
                fn validate(&self) -> Result<(), ValidationErrors> {
                    Ok(())
                }
            }
        )+
    };
}

shape_only_validate!(KnowledgeOrder, SubjectOrder, StartPointOrder, JourneyOrder, TrailOrder, ContentOrder);
