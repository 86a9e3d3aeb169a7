use std::{env, fmt::Display, net::SocketAddr, str::FromStr};

use tracing::info;

pub const BIND_ADDR_VAR: &str = "DONATE_BIND_ADDR";
pub const TABLE_NAME_VAR: &str = "POINTS_TABLE_NAME";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TABLE_NAME: &str = "UserProfiles";

/// Process configuration, read once at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub table_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    /// Load the configuration from environment variables
    pub fn load() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        Ok(Self {
            bind_addr: try_load(&lookup, BIND_ADDR_VAR, DEFAULT_BIND_ADDR)?,
            table_name: try_load(&lookup, TABLE_NAME_VAR, DEFAULT_TABLE_NAME)?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, Error>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|err: T::Err| Error::InvalidValue {
        key,
        reason: err.to_string(),
        value,
    })
}
