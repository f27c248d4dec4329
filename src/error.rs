use thiserror::Error;

pub type RulerResult<T> = Result<T, RulerError>;

#[derive(Debug, Error)]
pub enum RulerError {
    #[error("unsupported unit: `{0}`")]
    InvalidUnit(String),

    #[error("unsupported calendar field: `{0}`")]
    InvalidField(String),

    #[error("invalid time zone: `{0}`")]
    InvalidTimeZone(String),

    #[error("divisor must be > 0, got {0}")]
    InvalidDivisor(i128),

    #[error("calendar overflow: {0}")]
    Overflow(String),

    #[error("instant out of representable range: {0}ns")]
    OutOfRange(i128),

    #[error("tick definition `{increment} {unit}` is already registered")]
    DuplicateTick { unit: String, increment: u32 },

    #[error("tick catalog is empty")]
    EmptyCatalog,

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
