//! Error types for setup, structure decoding and hover resolution.

use thiserror::Error;

/// Fatal at setup: the chart cannot be interpreted with the given configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("ambiguous series without a grouping column ({series} series in chart)")]
    AmbiguousSeries { series: usize },

    #[error("unknown column: {column}")]
    UnknownColumn { column: String },

    #[error("series label {label:?} cannot be read as a value of group column {column}")]
    InvalidGroupLabel { label: String, column: String },

    #[error("invalid configuration for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// A structure encoding that could not be turned into a molecule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty structure encoding")]
    Empty,

    #[error("cell holds no structure text")]
    MissingValue,

    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("unknown element {symbol:?} at offset {offset}")]
    UnknownElement { symbol: String, offset: usize },

    #[error("unclosed bracket atom starting at offset {offset}")]
    UnclosedBracket { offset: usize },

    #[error("unbalanced branch at offset {offset}")]
    UnbalancedBranch { offset: usize },

    #[error("bond at offset {offset} is not followed by an atom")]
    DanglingBond { offset: usize },

    #[error("ring bond {label} is never closed")]
    UnclosedRing { label: u16 },

    #[error("ring bond {label} closed with a conflicting bond order at offset {offset}")]
    RingBondConflict { label: u16, offset: usize },

    #[error("ring bond {label} at offset {offset} closes onto an already bonded atom")]
    InvalidRingBond { label: u16, offset: usize },

    #[error("number at offset {offset} is out of range")]
    NumberOutOfRange { offset: usize },

    #[error("charge at offset {offset} exceeds {max} in magnitude")]
    InvalidCharge { offset: usize, max: u8 },
}

/// A hover event that does not address any row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("series {series} is not part of the chart")]
    UnknownSeries { series: usize },

    #[error("point {point} is out of range for series {series} ({len} rows)")]
    PointOutOfRange {
        series: usize,
        point: usize,
        len: usize,
    },
}
