//! HTTP beacon sender
//!
//! Issues one `GET` per URL from a background thread through a blocking
//! `reqwest` client and never reads the response body. Sends are queued
//! with `try_send`: when the queue is full the beacon is dropped, the
//! logging call never waits. Dropping the sender lets the thread drain what
//! is already queued.

use super::BeaconSender;
use crate::constants::{BEACON_CHANNEL_CAPACITY, BEACON_TIMEOUT_MS};
use crate::error::{LogError, Result};
use reqwest::blocking::Client;
use std::io;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Fire-and-forget HTTP(S) GET sender
pub struct HttpBeacon {
    tx: Option<SyncSender<String>>,
    worker: Option<JoinHandle<()>>,
}

impl HttpBeacon {
    /// Validate the base URL, build the client and start the sender thread
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|source| LogError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LogError::UnsupportedScheme {
                scheme: parsed.scheme().to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(BEACON_TIMEOUT_MS))
            .user_agent(concat!("bk-log/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| LogError::HttpClient { source })?;

        let (tx, rx) = sync_channel::<String>(BEACON_CHANNEL_CAPACITY);
        let worker = thread::Builder::new()
            .name("bk-log-beacon".to_string())
            .spawn(move || run_beacon(client, rx))
            .map_err(|source| LogError::Send { source })?;

        Ok(Self {
            tx: Some(tx),
            worker: Some(worker),
        })
    }
}

impl BeaconSender for HttpBeacon {
    fn send(&self, url: &str) -> Result<()> {
        let stopped = || LogError::Send {
            source: io::Error::new(io::ErrorKind::BrokenPipe, "beacon thread stopped"),
        };
        let tx = self.tx.as_ref().ok_or_else(stopped)?;
        match tx.try_send(url.to_string()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                debug!("Beacon queue full, dropping record");
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(stopped()),
        }
    }
}

impl Drop for HttpBeacon {
    fn drop(&mut self) {
        // Closing the channel ends the loop once the queue is drained
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Run the sender loop (blocking, runs in thread)
///
/// The response is dropped unread; only transport failures are logged.
fn run_beacon(client: Client, rx: Receiver<String>) {
    for url in rx {
        match client.get(&url).send() {
            Ok(response) => debug!(status = %response.status(), "Beacon delivered"),
            Err(e) => debug!(error = %e, "Beacon delivery failed"),
        }
    }
}
