pub mod config;
pub mod error;
pub mod model;

/// Informational status line.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        tracing::info!(target: "mrcli::status", $($arg)*)
    };
}

/// Status line for an operation that completed as expected.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        tracing::info!(target: "mrcli::status", ok = true, $($arg)*)
    };
}

/// Status line for a recoverable problem.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "mrcli::status", $($arg)*)
    };
}

/// Status line for a failed operation.
#[macro_export]
macro_rules! failure {
    ($($arg:tt)*) => {
        tracing::error!(target: "mrcli::status", $($arg)*)
    };
}
