use std::io;
use std::path::PathBuf;

use pixelpaws_logic::actions::UnknownAction;
use pixelpaws_logic::customization::UnknownFeature;
use pixelpaws_logic::loyalty::ThemeRejection;
use pixelpaws_logic::mood::UnknownWeather;
use pixelpaws_logic::shop::PurchaseRejection;
use thiserror::Error;

/// Failures of the key-value store.
///
/// These never reach the owner as hard errors: the pet logs them, shows a
/// notice, and carries on with whatever it has in memory.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage is disabled or otherwise unreachable
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The write would exceed the storage quota
    #[error("storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    /// Underlying file I/O failed
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// A stored value isn't the JSON we expect
    #[error("malformed data under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned to the owner for requests that can't be honoured.
#[derive(Error, Debug)]
pub enum PetError {
    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),

    #[error(transparent)]
    UnknownWeather(#[from] UnknownWeather),

    #[error(transparent)]
    UnknownFeature(#[from] UnknownFeature),

    #[error(transparent)]
    Purchase(#[from] PurchaseRejection),

    #[error(transparent)]
    Theme(#[from] ThemeRejection),

    /// Equip/unequip of an item the owner hasn't bought
    #[error("you don't own '{0}'")]
    NotOwned(String),

    /// Imported pet data is unusable
    #[error("invalid pet data: {0}")]
    InvalidImport(String),

    #[error("could not encode pet data: {0}")]
    Export(#[from] serde_json::Error),

    #[error("could not read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type PetResult<T> = std::result::Result<T, PetError>;
