//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the plaintext socket and spawns a [`Connection`] task for
//! each client. Every connection shares the registry and one dispatcher.

use crate::handlers::Dispatcher;
use crate::network::Connection;
use crate::state::Registry;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument, warn};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    registry: Arc<Registry>,
    dispatcher: Arc<Dispatcher>,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(addr: SocketAddr, registry: Arc<Registry>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "Plaintext listener bound");

        Ok(Self {
            listener,
            registry,
            dispatcher: Arc::new(Dispatcher::new()),
        })
    }

    /// The address actually bound (useful when binding port 0).
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the gateway, accepting connections until the task is dropped.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        info!("Gateway accepting connections");

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!(%addr, error = %e, "Failed to set TCP_NODELAY");
                    }

                    let uid = self.registry.next_uid();
                    info!(%uid, %addr, "Connection accepted");

                    let connection = Connection::new(
                        uid.clone(),
                        stream,
                        addr,
                        Arc::clone(&self.registry),
                        Arc::clone(&self.dispatcher),
                    );

                    tokio::spawn(async move {
                        if let Err(e) = connection.run().await {
                            error!(%uid, %addr, error = %e, "Connection error");
                        }
                        info!(%uid, %addr, "Connection closed");
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
