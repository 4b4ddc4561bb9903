//! Error types for the jacscan core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Structural problems detected while validating a [`crate::CsrMatrix`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MatrixError {
    /// The row pointer array must hold at least the leading zero boundary.
    #[error("row pointer array is empty; expected at least one boundary")]
    EmptyRowPointer,
    /// The first row boundary was not zero.
    #[error("row pointer must start at 0 (got {got})")]
    NonZeroStart {
        /// The first boundary supplied by the caller.
        got: usize,
    },
    /// A row ended before it started.
    #[error("row {row} has decreasing boundaries: start={start}, end={end}")]
    NonMonotonicRowPointer {
        /// Row whose boundaries are out of order.
        row: usize,
        /// Boundary at which the row starts.
        start: usize,
        /// Boundary at which the row ends.
        end: usize,
    },
    /// The final row boundary did not match the number of column indices.
    #[error("row pointer ends at {end} but {indices} column indices were given")]
    RowPointerLengthMismatch {
        /// Final boundary in the row pointer array.
        end: usize,
        /// Length of the column index array.
        indices: usize,
    },
    /// A column index was outside the declared column count.
    #[error("row {row} references column {column} but the matrix has {columns} columns")]
    ColumnOutOfBounds {
        /// Row containing the offending entry.
        row: usize,
        /// Column index that exceeded the bounds.
        column: usize,
        /// Declared number of columns.
        columns: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`MatrixError`] variants.
    enum MatrixErrorCode for MatrixError {
        /// The row pointer array was empty.
        EmptyRowPointer => EmptyRowPointer => "MATRIX_EMPTY_ROW_POINTER",
        /// The first row boundary was not zero.
        NonZeroStart => NonZeroStart { .. } => "MATRIX_NON_ZERO_START",
        /// A row ended before it started.
        NonMonotonicRowPointer => NonMonotonicRowPointer { .. } => "MATRIX_NON_MONOTONIC_ROW_POINTER",
        /// The final boundary did not match the column index count.
        RowPointerLengthMismatch => RowPointerLengthMismatch { .. } => "MATRIX_ROW_POINTER_LENGTH_MISMATCH",
        /// A column index was outside the declared column count.
        ColumnOutOfBounds => ColumnOutOfBounds { .. } => "MATRIX_COLUMN_OUT_OF_BOUNDS",
    }
}

/// Broad classification of [`JacscanError`] values.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCategory {
    /// The input matrix was malformed.
    InvalidInput,
    /// A clustering parameter was outside its accepted range.
    InvalidParameter,
    /// The build does not provide the requested capability.
    Unavailable,
}

/// Error type produced when constructing or running [`crate::Jacscan`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum JacscanError {
    /// `eps` must be a finite value in `[0, 1]`.
    #[error("eps must lie within [0, 1] (got {got})")]
    InvalidEps {
        /// The rejected distance threshold.
        got: f64,
    },
    /// `min_pts` must be greater than zero.
    #[error("min_pts must be at least 1 (got {got})")]
    InvalidMinPts {
        /// The rejected density threshold.
        got: usize,
    },
    /// The supplied matrix failed structural validation.
    #[error("invalid input matrix: {error}")]
    InvalidInput {
        #[source]
        /// Underlying validation failure.
        error: MatrixError,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
}

define_error_codes! {
    /// Stable codes describing [`JacscanError`] variants.
    enum JacscanErrorCode for JacscanError {
        /// `eps` was outside `[0, 1]`.
        InvalidEps => InvalidEps { .. } => "JACSCAN_INVALID_EPS",
        /// `min_pts` was zero.
        InvalidMinPts => InvalidMinPts { .. } => "JACSCAN_INVALID_MIN_PTS",
        /// The input matrix was malformed.
        InvalidInput => InvalidInput { .. } => "JACSCAN_INVALID_INPUT",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "JACSCAN_BACKEND_UNAVAILABLE",
    }
}

impl JacscanError {
    /// Classifies the error as an input, parameter or availability failure.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidEps { .. } | Self::InvalidMinPts { .. } => ErrorCategory::InvalidParameter,
            Self::InvalidInput { .. } => ErrorCategory::InvalidInput,
            Self::BackendUnavailable { .. } => ErrorCategory::Unavailable,
        }
    }

    /// Retrieve the inner [`MatrixErrorCode`] when the error originated in matrix validation.
    pub const fn matrix_code(&self) -> Option<MatrixErrorCode> {
        match self {
            Self::InvalidInput { error } => Some(error.code()),
            _ => None,
        }
    }
}

impl From<MatrixError> for JacscanError {
    fn from(error: MatrixError) -> Self {
        Self::InvalidInput { error }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, JacscanError>;
