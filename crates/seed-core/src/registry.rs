//! Built-in model registry.
//!
//! The set of importable models is closed: each [`Model`] variant carries a
//! YAML schema compiled into the binary. Resolving a name that is not listed
//! here fails before any file or store is touched.

use crate::schema::{Schema, SchemaError};
use std::fmt;
use std::str::FromStr;

const ZSTATION_SCHEMA: &str = include_str!("../models/zstation.yaml");
const AUCTION_ITEM_SCHEMA: &str = include_str!("../models/auction_item.yaml");

/// A model that can be seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    /// Fuel station listing, usually wrapped as `{"stations": [...]}`
    ZStation,
    /// Auction listing
    AuctionItem,
}

impl Model {
    pub const ALL: [Model; 2] = [Model::ZStation, Model::AuctionItem];

    /// Name accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Model::ZStation => "ZStation",
            Model::AuctionItem => "AuctionItem",
        }
    }

    /// Parse and return this model's schema.
    pub fn schema(&self) -> Result<Schema, SchemaError> {
        let yaml = match self {
            Model::ZStation => ZSTATION_SCHEMA,
            Model::AuctionItem => AUCTION_ITEM_SCHEMA,
        };
        Schema::from_yaml(yaml)
    }

    fn known_names() -> String {
        Self::ALL
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| SchemaError::UnknownModel {
                name: s.to_string(),
                known: Self::known_names(),
            })
    }
}

/// Resolve a model name to its schema.
pub fn lookup(model_name: &str) -> Result<Schema, SchemaError> {
    model_name.parse::<Model>()?.schema()
}
