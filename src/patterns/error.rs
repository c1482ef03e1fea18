use thiserror::Error;

/// Errors rejecting a pattern query at construction time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("window {0} is not one of the supported lookbacks (3, 6, 12, 24)")]
    InvalidWindow(u32),
    #[error("at least one driver is required")]
    NoDrivers,
    #[error("min_support must be at least 1")]
    ZeroMinSupport,
}
