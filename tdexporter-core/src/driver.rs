//! Driver selection and connection opening.
//!
//! The actual TDengine drivers live outside this crate. They are reached
//! through the [`Driver`] trait, which receives a driver identity and a DSN
//! and returns an opaque connection handle. This module only decides which
//! driver identity to ask for and what DSN to hand it.
//!
//! # Security
//! - The DSN is kept in a zeroizing buffer for the duration of the call
//! - Only the redacted DSN is logged
//! - Driver errors are wrapped without being logged, since drivers may echo
//!   the DSN back

use crate::config::{ConnectionConfig, ExportTargets, Protocol};
use crate::dsn::{build_dsn, build_redacted_dsn, resolve_database};
use crate::error::{BoxError, TdExporterError};
use crate::Result;
use async_trait::async_trait;
use zeroize::Zeroizing;

pub use crate::dsn::DEFAULT_DATABASE;

/// Registered TDengine driver identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverName {
    /// WebSocket driver (`taosWS`)
    TaosWs,
    /// REST driver (`taosRestful`)
    TaosRestful,
}

impl DriverName {
    /// Returns the name the driver is registered under.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaosWs => "taosWS",
            Self::TaosRestful => "taosRestful",
        }
    }
}

impl std::fmt::Display for DriverName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Maps a protocol to the driver that speaks it.
#[must_use]
pub const fn driver_for(protocol: Protocol) -> DriverName {
    match protocol {
        Protocol::Ws => DriverName::TaosWs,
        Protocol::Http => DriverName::TaosRestful,
    }
}

impl From<Protocol> for DriverName {
    fn from(protocol: Protocol) -> Self {
        driver_for(protocol)
    }
}

/// External database driver collaborator.
///
/// Implementations perform the network handshake. They are called at most
/// once per [`ConnectionFactory::open`] and are never retried by this crate.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Connection handle produced by the driver.
    type Connection: Send;

    /// Opens a connection using the given driver identity and DSN.
    ///
    /// # Errors
    /// Returns the driver's own error if the DSN is rejected or the server
    /// is unreachable.
    async fn open(
        &self,
        driver: DriverName,
        dsn: &str,
    ) -> std::result::Result<Self::Connection, BoxError>;
}

/// An open connection together with what it was opened for.
#[derive(Debug)]
pub struct Connection<C> {
    handle: C,
    driver: DriverName,
    database: String,
}

impl<C> Connection<C> {
    /// The driver's connection handle.
    pub const fn handle(&self) -> &C {
        &self.handle
    }

    /// Consumes the wrapper and returns the driver's handle.
    pub fn into_handle(self) -> C {
        self.handle
    }

    /// Driver the connection was opened with.
    pub const fn driver(&self) -> DriverName {
        self.driver
    }

    /// Database the connection targets.
    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Everything an exporter needs to start writing.
#[derive(Debug)]
pub struct ExportSession<C> {
    /// Open connection and its database name
    pub connection: Connection<C>,
    /// Table naming and retention
    pub targets: ExportTargets,
}

/// Opens connections through a [`Driver`].
///
/// # Example
/// ```rust
/// use async_trait::async_trait;
/// use tdexporter_core::config::ConnectionConfig;
/// use tdexporter_core::driver::{ConnectionFactory, Driver, DriverName};
/// use tdexporter_core::error::BoxError;
///
/// struct EchoDriver;
///
/// #[async_trait]
/// impl Driver for EchoDriver {
///     type Connection = String;
///
///     async fn open(&self, driver: DriverName, dsn: &str) -> Result<String, BoxError> {
///         Ok(format!("{} {}", driver, dsn))
///     }
/// }
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let factory = ConnectionFactory::new(EchoDriver);
/// let connection = factory.open(&ConnectionConfig::default(), "").await.unwrap();
///
/// assert_eq!(connection.database(), "otel");
/// assert_eq!(connection.handle(), "taosWS root@ws(localhost:6041)/otel");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionFactory<D> {
    driver: D,
}

impl<D: Driver> ConnectionFactory<D> {
    /// Creates a factory backed by `driver`.
    pub const fn new(driver: D) -> Self {
        Self { driver }
    }

    /// The underlying driver collaborator.
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Opens a connection to `database`.
    ///
    /// The database name falls back from `database` to the configured
    /// database to [`DEFAULT_DATABASE`]. The configuration is not modified.
    ///
    /// # Errors
    /// - [`TdExporterError::InvalidConfig`] if the protocol is unsupported;
    ///   the driver is not called in that case
    /// - [`TdExporterError::DriverOpen`] if the driver fails, with the
    ///   driver's error as the unmodified source
    pub async fn open(
        &self,
        config: &ConnectionConfig,
        database: &str,
    ) -> Result<Connection<D::Connection>> {
        let protocol = config
            .protocol()
            .map_err(|violation| TdExporterError::invalid_config(vec![violation]))?;
        let driver = driver_for(protocol);
        let database = resolve_database(config, database).to_string();

        let dsn = Zeroizing::new(build_dsn(config, &database));
        tracing::debug!(
            driver = %driver,
            dsn = %build_redacted_dsn(config, &database),
            "opening TDengine connection"
        );

        let handle = self
            .driver
            .open(driver, dsn.as_str())
            .await
            .map_err(|source| {
                tracing::warn!(
                    driver = %driver,
                    database = %database,
                    "driver failed to open connection"
                );
                TdExporterError::driver_open(driver, source)
            })?;

        Ok(Connection {
            handle,
            driver,
            database,
        })
    }
}
