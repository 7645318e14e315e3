//! Error types for asset loading, the shop and the frame loop.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::shop::Upgrade;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("asset {} is empty", .path.display())]
    Empty { path: PathBuf },

    #[error("asset {} is malformed: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("cannot afford {upgrade}: costs {cost}, have {available}")]
    InsufficientFunds {
        upgrade: Upgrade,
        cost: u32,
        available: u32,
    },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Asset(#[from] AssetError),
}
