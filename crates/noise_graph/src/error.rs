//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! slot index violations, unknown node ids, invalid configuration, export and encoder
//! failures, IO, and generic errors.
use std::fmt;

use thiserror::Error;

use crate::graph::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

/// Which side of a node a slot index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotDirection {
    Input,
    Output,
}

impl fmt::Display for SlotDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotDirection::Input => f.write_str("input"),
            SlotDirection::Output => f.write_str("output"),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("{direction} slot {slot} out of range on node {node} ({count} slots)")]
    SlotIndex {
        node: NodeId,
        direction: SlotDirection,
        slot: usize,
        count: usize,
    },

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("image encoder error: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
