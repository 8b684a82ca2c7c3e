//! Session channel: the single-command-at-a-time path to the game session.
//!
//! The engine only depends on the [`SessionChannel`] port. The concrete
//! transport here is length-prefixed JSON over a Unix domain socket for
//! sessions hosted on the same machine; ordering guarantees come from the
//! stream itself (messages are applied strictly in send order).

use std::io::{Read, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::constants::channel::MAX_MESSAGE_SIZE;
use crate::error::ChannelError;

pub mod messages;
pub use messages::{GameAction, LobbyMessage, PlayerId};

/// Order-preserving, fire-and-forget command sink.
///
/// Implementations must deliver messages in send order; the caller never
/// awaits acknowledgment. Per-command success on the server side is owned
/// by the session protocol, not by this port.
pub trait SessionChannel {
    fn send(&mut self, msg: &LobbyMessage) -> Result<(), ChannelError>;
}

/// In-memory channel that records every message, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    pub sent: Vec<LobbyMessage>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionChannel for RecordingChannel {
    fn send(&mut self, msg: &LobbyMessage) -> Result<(), ChannelError> {
        self.sent.push(msg.clone());
        Ok(())
    }
}

/// Default socket path (XDG_RUNTIME_DIR with fallback to cache)
pub fn default_socket_path() -> Result<PathBuf> {
    if let Ok(runtime_dir) = std::env::var("XDG_RUNTIME_DIR") {
        return Ok(PathBuf::from(runtime_dir)
            .join(crate::constants::storage::APP_DIR)
            .join(crate::constants::channel::SOCKET_FILE));
    }

    let cache = dirs::cache_dir()
        .context("Failed to determine cache directory (no XDG_RUNTIME_DIR or HOME)")?;
    Ok(cache
        .join(crate::constants::storage::APP_DIR)
        .join(crate::constants::channel::SOCKET_FILE))
}

/// Client connection to a locally hosted session
pub struct SessionClient {
    stream: UnixStream,
}

impl SessionClient {
    /// Connect to the default session socket
    pub fn connect() -> Result<Self> {
        let path = default_socket_path()?;
        Self::connect_to(&path)
    }

    /// Connect to a specific socket path
    pub fn connect_to(path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(path)
            .context(format!("Failed to connect to session at {}", path.display()))?;
        Ok(Self { stream })
    }

    /// Receive the next inbound message (blocking)
    pub fn recv_message(&mut self) -> Result<LobbyMessage, ChannelError> {
        read_message(&mut self.stream)
    }
}

impl SessionChannel for SessionClient {
    fn send(&mut self, msg: &LobbyMessage) -> Result<(), ChannelError> {
        write_message(&mut self.stream, msg)
    }
}

impl From<UnixStream> for SessionClient {
    fn from(stream: UnixStream) -> Self {
        Self { stream }
    }
}

/// Listener side of the framed transport (the session host)
pub struct SessionListener {
    listener: UnixListener,
    socket_path: PathBuf,
}

impl SessionListener {
    /// Bind the default session socket
    pub fn bind() -> Result<Self> {
        let socket_path = default_socket_path()?;
        Self::bind_to(socket_path)
    }

    /// Bind a specific socket path
    pub fn bind_to(socket_path: PathBuf) -> Result<Self> {
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent).context(format!(
                "Failed to create socket directory: {}",
                parent.display()
            ))?;
        }

        // Remove stale socket if exists
        if socket_path.exists() {
            std::fs::remove_file(&socket_path).context(format!(
                "Failed to remove stale socket: {}",
                socket_path.display()
            ))?;
        }

        let listener = UnixListener::bind(&socket_path).context(format!(
            "Failed to bind socket at {}",
            socket_path.display()
        ))?;

        Ok(Self {
            listener,
            socket_path,
        })
    }

    /// Accept an incoming connection (blocking)
    pub fn accept(&self) -> Result<SessionClient> {
        let (stream, _addr) = self
            .listener
            .accept()
            .context("Failed to accept session connection")?;
        Ok(SessionClient { stream })
    }

    /// Socket path this listener is bound to
    pub fn path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for SessionListener {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

/// Write one length-prefixed JSON message to the stream
fn write_message<T: Serialize>(stream: &mut UnixStream, msg: &T) -> Result<(), ChannelError> {
    let json = serde_json::to_vec(msg)?;

    if json.len() > MAX_MESSAGE_SIZE {
        return Err(ChannelError::TooLarge {
            len: json.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }

    // Length prefix is u32 little-endian
    let len = json.len() as u32;
    stream.write_all(&len.to_le_bytes())?;
    stream.write_all(&json)?;
    stream.flush()?;

    Ok(())
}

/// Read one length-prefixed JSON message from the stream
fn read_message<T: DeserializeOwned>(stream: &mut UnixStream) -> Result<T, ChannelError> {
    let mut len_buf = [0u8; 4];
    stream.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    if len > MAX_MESSAGE_SIZE {
        return Err(ChannelError::TooLarge {
            len,
            max: MAX_MESSAGE_SIZE,
        });
    }

    let mut json_buf = vec![0u8; len];
    stream.read_exact(&mut json_buf)?;

    Ok(serde_json::from_slice(&json_buf)?)
}
