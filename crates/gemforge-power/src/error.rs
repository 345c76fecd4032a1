use gemforge_core::Identifier;
use thiserror::Error;

/// Errors raised by the power registry
#[derive(Debug, Error)]
pub enum PowerError {
    #[error("power '{0}' is already registered")]
    DuplicatePower(Identifier),

    #[error("power registry is frozen; cannot register '{0}'")]
    RegistryFrozen(Identifier),

    #[error("unknown power '{0}'")]
    UnknownPower(Identifier),
}

/// Errors raised while encoding or decoding a power component
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("VarInt too large")]
    VarIntTooLarge,

    #[error("unknown power raw id {0}")]
    UnknownRawId(i32),

    #[error("unknown power '{0}'")]
    UnknownPower(Identifier),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
