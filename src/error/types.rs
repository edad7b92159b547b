use thiserror::Error;

/// Unified result type for the layout crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Error type returned by region hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by layout construction, mutation and allocation passes.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("item `{0}` not found")]
    NotFound(String),
    #[error(
        "invalid size for item `{name}`: exactly one of ratio and fixed must be set (ratio={ratio}, fixed={fixed})"
    )]
    InvalidSizeSpec { name: String, ratio: u16, fixed: u16 },
    #[error("insufficient space: {0}")]
    InsufficientSpace(SpaceShortfall),
    #[error("item name `{0}` is used more than once")]
    DuplicateName(String),
    #[error("hook for region `{region}` failed: {source}")]
    Hook {
        region: String,
        #[source]
        source: HookError,
    },
    #[error("region host error: {0}")]
    Host(String),
    #[error("shared layout lock poisoned")]
    Poisoned,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why an allocation pass could not fit its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpaceShortfall {
    #[error("window too small for fixed sizes: {available} < {required}")]
    FixedOverflow { available: u32, required: u32 },
    #[error("window too small for allocated units: remaining={remaining}, weights={weights}")]
    ZeroUnit { remaining: u32, weights: u32 },
    #[error("screen has no drawable area: {width}x{height}")]
    EmptyScreen { width: u16, height: u16 },
}

impl From<SpaceShortfall> for LayoutError {
    fn from(shortfall: SpaceShortfall) -> Self {
        Self::InsufficientSpace(shortfall)
    }
}

impl LayoutError {
    /// Short, stable label used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidSizeSpec { .. } => "invalid_size_spec",
            Self::InsufficientSpace(_) => "insufficient_space",
            Self::DuplicateName(_) => "duplicate_name",
            Self::Hook { .. } => "hook",
            Self::Host(_) => "host",
            Self::Poisoned => "poisoned",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_error_keeps_source() {
        let err = LayoutError::Hook {
            region: "status".to_string(),
            source: "disk full".into(),
        };
        assert_eq!(err.to_string(), "hook for region `status` failed: disk full");
        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(source.to_string(), "disk full");
    }

    #[test]
    fn shortfall_converts_into_layout_error() {
        let err: LayoutError = SpaceShortfall::FixedOverflow {
            available: 5,
            required: 10,
        }
        .into();
        assert_eq!(err.kind(), "insufficient_space");
        assert_eq!(
            err.to_string(),
            "insufficient space: window too small for fixed sizes: 5 < 10"
        );
    }
}
