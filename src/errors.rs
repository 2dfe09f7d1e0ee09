//! The errors that can occur when a tree is assembled from raw coordinate arrays or queried.
//! Most operations cannot fail; the exceptions are violated preconditions.

use std::error::Error;
use std::fmt;

/// Helper type for a call that could go wrong.
pub type KdResult<T> = Result<T, KdTreeError>;

/// Error type for the k-d tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KdTreeError {
    /// A nearest-neighbour query was issued against a tree with no points.
    EmptyTree,
    /// An interleaved `x, y, z` coordinate array whose length is not a multiple of 3.
    MalformedCoordinates { len: usize },
    /// The identifier array does not have one entry per point.
    IdCountMismatch { ids: usize, points: usize },
}

impl fmt::Display for KdTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            KdTreeError::EmptyTree => write!(f, "nearest-neighbour query on an empty tree"),
            KdTreeError::MalformedCoordinates { len } => write!(
                f,
                "coordinate array of length {} is not a multiple of 3",
                len
            ),
            KdTreeError::IdCountMismatch { ids, points } => {
                write!(f, "got {} identifiers for {} points", ids, points)
            }
        }
    }
}

impl Error for KdTreeError {}
