//! Snapshot Relay Server
//!
//! Line-delimited TCP relay. Each accepted peer gets a reader that merges
//! decoded snapshots into the shared world and forwards them, plus a writer
//! task that drains the peer's outbound queue.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use crate::network::protocol::Snapshot;
use crate::network::relay::{ConnectionId, LineReceiver, Origin, RelayHub};
use crate::network::session::SharedWorld;

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Listening address.
    pub bind_addr: SocketAddr,
    /// Lines buffered per connection before new lines are dropped.
    pub outbound_queue: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5555)),
            outbound_queue: 256,
        }
    }
}

/// Relay errors.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Failed to bind the listening socket.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Socket error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The relay server.
pub struct RelayServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    hub: Arc<RelayHub>,
    world: SharedWorld,
    local_name: Arc<str>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl RelayServer {
    /// Bind the listening socket.
    ///
    /// Snapshots named `local_name` are relayed but never merged.
    pub async fn bind(
        config: &RelayConfig,
        hub: Arc<RelayHub>,
        world: SharedWorld,
        local_name: &str,
    ) -> Result<Self, RelayError> {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .map_err(|source| RelayError::Bind { addr: config.bind_addr, source })?;
        let local_addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            listener,
            local_addr,
            hub,
            world,
            local_name: Arc::from(local_name),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Address actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The fan-out set this server feeds.
    pub fn hub(&self) -> &Arc<RelayHub> {
        &self.hub
    }

    /// Accept connections until shutdown.
    ///
    /// Returns immediately if [`RelayServer::shutdown`] was already called.
    #[instrument(skip(self), fields(addr = %self.local_addr))]
    pub async fn run(&self) -> Result<(), RelayError> {
        let mut shutdown_rx = self.shutdown_rx.clone();
        if *shutdown_rx.borrow() {
            return Ok(());
        }
        info!("Relay listening on {}", self.local_addr);

        loop {
            tokio::select! {
                result = self.listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            info!("New connection from {}", addr);
                            let (id, outbound) = self.hub.register().await;
                            self.handle_connection(stream, addr, id, outbound);
                        }
                        Err(e) => {
                            error!("Accept error: {}", e);
                        }
                    }
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Shutdown signal received");
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Signal shutdown to the accept loop and every connection.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    fn handle_connection(&self, stream: TcpStream, addr: SocketAddr, id: ConnectionId, outbound: LineReceiver) {
        let peer = Peer {
            id,
            addr,
            hub: self.hub.clone(),
            world: self.world.clone(),
            local_name: self.local_name.clone(),
        };
        let shutdown_rx = self.shutdown_rx.clone();

        tokio::spawn(async move {
            let (read_half, write_half) = stream.into_split();
            peer.serve(read_half, write_half, outbound, shutdown_rx).await;
        });
    }
}

/// One accepted connection.
struct Peer {
    id: ConnectionId,
    addr: SocketAddr,
    hub: Arc<RelayHub>,
    world: SharedWorld,
    local_name: Arc<str>,
}

impl Peer {
    /// Relay inbound lines and drain the outbound queue until the peer
    /// goes away, either side of the socket fails, or shutdown.
    async fn serve<R, W>(
        self,
        reader: R,
        mut writer: W,
        mut outbound: LineReceiver,
        mut shutdown_rx: watch::Receiver<bool>,
    ) where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let addr = self.addr;

        // Spawn line writer task
        let mut writer_task = tokio::spawn(async move {
            while let Some(line) = outbound.recv().await {
                let written = async {
                    writer.write_all(line.as_bytes()).await?;
                    writer.write_all(b"\n").await
                };
                if let Err(e) = written.await {
                    debug!("Write to {} failed: {}", addr, e);
                    break;
                }
            }
        });

        let mut lines = BufReader::new(reader).lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line {
                        Ok(Some(line)) => {
                            relay_line(&self.hub, &self.world, &self.local_name, Origin::Peer(self.id), &line).await;
                        }
                        Ok(None) => {
                            debug!("Peer {} closed the connection", addr);
                            break;
                        }
                        Err(e) => {
                            warn!("Read error from {}: {}", addr, e);
                            break;
                        }
                    }
                }
                _ = &mut writer_task => {
                    break;
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        // Cleanup
        self.hub.remove(self.id).await;
        writer_task.abort();
        info!("Connection {} ({}) closed", self.id, addr);
    }
}

/// Decode one inbound line, merge it and forward it.
///
/// Undecodable lines are dropped and not forwarded. Returns whether the
/// line was relayed.
pub async fn relay_line(
    hub: &RelayHub,
    world: &SharedWorld,
    local_name: &str,
    origin: Origin,
    line: &str,
) -> bool {
    let snapshot = match Snapshot::from_json(line) {
        Ok(s) => s,
        Err(e) => {
            debug!("Dropping malformed snapshot: {}", e);
            return false;
        }
    };

    world.write().await.merge_snapshot(local_name, &snapshot);
    hub.broadcast(origin, line).await;
    true
}

// =============================================================================
// TESTS
// =============================================================================
