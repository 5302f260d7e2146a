// =====================================================================
// File: error.rs
// Author: Bob Jack
// Project: Witter Index Store
// Date: Oct. 8, 2026
//
// Description:
//   Error types for the crate. The stores themselves never fail on
//   expected conditions (duplicates, unknown ids, self-follows); those
//   are reported through `bool`, `Option` and empty results. Errors
//   here cover configuration loading, REPL argument handling and the
//   tree invariant checker.
// =====================================================================
use std::io;

use thiserror::Error;

use crate::index::NodeId;

/// Configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {key} '{value}': {reason}")]
    InvalidFormat {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}


/// A REPL command could not be carried out.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{cmd} requires {expected}")]
    MissingArgument { cmd: String, expected: &'static str },

    #[error("Too many arguments for {0}")]
    TooManyArguments(String),

    #[error("'{value}' is not a valid {what}")]
    InvalidArgument { value: String, what: &'static str },

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("output failed: {0}")]
    Io(#[from] io::Error),
}


/// A red-black invariant does not hold. Produced by
/// [`RbTree::validate`](crate::index::RbTree::validate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("root node {0} is red")]
    RedRoot(NodeId),

    #[error("red node {child} has a red parent {parent}")]
    DoubleRed { parent: NodeId, child: NodeId },

    #[error("black height differs below node {node}: left {left}, right {right}")]
    BlackHeight { node: NodeId, left: usize, right: usize },

    #[error("node {node} is out of key order")]
    KeyOrder { node: NodeId },

    #[error("node {child} and its parent disagree about their link")]
    ParentLink { child: NodeId },
}
