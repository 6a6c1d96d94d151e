//! Error types for partitioning and leveling.

use thiserror::Error;

/// Errors raised by the partitioner, the leveler, and the sampling helpers.
///
/// Argument errors are raised before any group is mutated. `MemberNotFound`
/// signals a broken partition invariant and aborts the run.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PartitionError {
    /// Group count must be at least one.
    #[error("group count should be above zero")]
    InvalidGroupCount,

    /// Every group needs at least one item.
    #[error("can't split {items} items into {groups} groups")]
    NotEnoughItems { items: usize, groups: usize },

    /// Metrics must be finite so that totals and orderings are well defined.
    #[error("item {index} has a non-finite metric: {metric}")]
    NonFiniteMetric { index: usize, metric: f64 },

    /// A leveling option is out of range.
    #[error("invalid leveling option {name}: {message}")]
    InvalidOption { name: &'static str, message: String },

    /// Any other rejected caller argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Group index outside the partition.
    #[error("group {group} does not exist (partition has {group_count} groups)")]
    UnknownGroup { group: usize, group_count: usize },

    /// Attempted to remove an item the group does not hold.
    #[error("item {item} is not a member of group {group}")]
    MemberNotFound { item: usize, group: usize },
}

impl PartitionError {
    /// Create an invalid option error.
    pub fn invalid_option(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            name,
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether this error was caused by the caller's input rather than an
    /// internal invariant breach.
    pub fn is_argument_error(&self) -> bool {
        !matches!(self, Self::MemberNotFound { .. })
    }

    /// Get a short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidGroupCount => "invalid_group_count",
            Self::NotEnoughItems { .. } => "not_enough_items",
            Self::NonFiniteMetric { .. } => "non_finite_metric",
            Self::InvalidOption { .. } => "invalid_option",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::UnknownGroup { .. } => "unknown_group",
            Self::MemberNotFound { .. } => "member_not_found",
        }
    }
}

pub type Result<T> = std::result::Result<T, PartitionError>;
