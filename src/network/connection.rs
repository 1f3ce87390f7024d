//! Connection - per-client task.
//!
//! Each accepted socket gets one task that reads framed lines and dispatches
//! them, plus a writer task that owns the write half and drains the session's
//! outbound queue. The writer is the only code that touches outbound bytes.

use crate::handlers::{Context, Dispatcher, HandlerError, fanout};
use crate::state::{Registry, Session, Uid};
use futures_util::{SinkExt, StreamExt};
use lineirc_proto::{LineCodec, Message, ProtocolError};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, instrument, trace, warn};

/// How long the writer keeps flushing queued lines after the session closed.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Close reason used when the client goes away without QUIT.
const CONNECTION_CLOSED: &str = "Connection closed";

/// A client connection handler.
pub struct Connection {
    uid: Uid,
    stream: TcpStream,
    addr: SocketAddr,
    registry: Arc<Registry>,
    dispatcher: Arc<Dispatcher>,
}

impl Connection {
    pub fn new(
        uid: Uid,
        stream: TcpStream,
        addr: SocketAddr,
        registry: Arc<Registry>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            uid,
            stream,
            addr,
            registry,
            dispatcher,
        }
    }

    /// Run the connection until QUIT, end-of-stream, a framing error or a
    /// close request from elsewhere (slow consumer, write failure).
    #[instrument(skip(self), fields(uid = %self.uid, addr = %self.addr), name = "connection")]
    pub async fn run(self) -> anyhow::Result<()> {
        let Self {
            uid,
            stream,
            addr,
            registry,
            dispatcher,
        } = self;

        let local_port = stream.local_addr()?.port();
        let limits = registry.limits.clone();
        let (read_half, write_half) = stream.into_split();

        let mut reader = FramedRead::new(read_half, LineCodec::with_max_len(limits.max_line_len));
        let writer = FramedWrite::new(write_half, LineCodec::with_max_len(limits.max_line_len));

        let (session, outbound_rx) = Session::new(uid, addr, local_port, limits.sendq_len);
        let session = registry.register_session(session);

        let writer_task = tokio::spawn(write_loop(Arc::clone(&session), outbound_rx, writer));

        info!("Session started");

        loop {
            tokio::select! {
                _ = session.closed() => {
                    debug!(reason = ?session.close_reason(), "Session closed");
                    break;
                }
                result = reader.next() => match result {
                    Some(Ok(bytes)) => {
                        let line = String::from_utf8_lossy(&bytes);
                        trace!(line = %line, "Received line");

                        let ctx = Context::new(&session, &registry);
                        match dispatcher.dispatch(&ctx, &line).await {
                            Ok(()) => {}
                            Err(HandlerError::Quit(reason)) => {
                                session.close(reason.as_deref().unwrap_or("Client Quit"));
                                break;
                            }
                            Err(e) => {
                                debug!(error = %e, code = e.error_code(), "Handler failed, ending session");
                                session.close(CONNECTION_CLOSED);
                                break;
                            }
                        }
                    }
                    Some(Err(e)) => {
                        handle_read_error(&session, &e).await;
                        break;
                    }
                    None => {
                        debug!("Client closed the stream");
                        session.close(CONNECTION_CLOSED);
                        break;
                    }
                },
            }
        }

        let reason = session
            .close_reason()
            .unwrap_or_else(|| CONNECTION_CLOSED.to_string());

        if let Some(departure) = registry.remove_session(session.uid()) {
            let quit = Message::new("QUIT", vec![reason.clone()])
                .with_prefix(departure.session.prefix());
            let notified = fanout(&departure.peers, &quit, None);
            let identity = departure.session.info();
            info!(
                nick = ?identity.nick,
                user = ?identity.username,
                reason = %reason,
                notified,
                "Session ended"
            );
        }

        session.close(&reason);
        writer_task.await?;

        Ok(())
    }
}

/// Log a framing failure, tell the client why when the socket is still
/// usable, and close the session.
async fn handle_read_error(session: &Session, err: &ProtocolError) {
    if err.is_disconnect() {
        info!(error = %err, "Client disconnected");
        session.close(CONNECTION_CLOSED);
        return;
    }

    match err {
        ProtocolError::MessageTooLong { actual, limit } => {
            warn!(actual, limit, "Input line too long, closing session");
            let reason = "Input line too long";
            let closing = Message::error(format!("Closing Link: {} ({})", session.host(), reason));
            if let Err(e) = session.send(closing).await {
                debug!(error = %e, "Could not queue closing ERROR");
            }
            session.close(reason);
        }
        _ => {
            warn!(error = %err, "Read error");
            session.close(&format!("Read error: {}", err));
        }
    }
}

/// Drain the outbound queue into the socket until the session closes, then
/// flush whatever was already queued and shut the write half.
async fn write_loop(
    session: Arc<Session>,
    mut rx: mpsc::Receiver<Message>,
    mut sink: FramedWrite<OwnedWriteHalf, LineCodec>,
) {
    loop {
        tokio::select! {
            biased;
            msg = rx.recv() => match msg {
                Some(msg) => {
                    if let Err(e) = sink.send(msg).await {
                        debug!(uid = %session.uid(), error = %e, "Write failed");
                        session.close("Write error");
                        return;
                    }
                }
                None => break,
            },
            _ = session.closed() => break,
        }
    }

    let drain = async {
        while let Ok(msg) = rx.try_recv() {
            sink.feed(msg).await?;
        }
        sink.close().await
    };

    match tokio::time::timeout(DRAIN_TIMEOUT, drain).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => debug!(uid = %session.uid(), error = %e, "Final flush failed"),
        Err(_) => debug!(uid = %session.uid(), "Final flush timed out"),
    }
}
