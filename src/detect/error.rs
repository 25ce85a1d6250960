use thiserror::Error;

/// Failures of the detection core.
///
/// A zero local background is deliberately not represented here: such a
/// minimum is skipped and counted instead (see [`super::minima::Minima`]).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("wavelength and intensity lengths differ ({wavelengths} vs {intensities})")]
    LengthMismatch {
        wavelengths: usize,
        intensities: usize,
    },

    #[error("spectrum contains no samples")]
    EmptyInput,
}

pub type DetectResult<T> = Result<T, DetectError>;
