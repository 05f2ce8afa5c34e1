//! Switch daemon event loop.
//!
//! One task reads transport messages and hands them to the forwarding engine
//! one at a time. Frames chosen for emission go through a bounded queue to a
//! writer task that owns the outbound byte stream.

use crate::codec::{OutboundFrame, RawMessage, TransportCodec};
use crate::config::SwitchdConfig;
use crate::error::{Result, SwitchdError};
use crate::message::InboundMessage;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use l2switch_fdb::{ForwardingEngine, FrameSink, SwitchStatsSnapshot};
use l2switch_types::InterfaceNumber;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, instrument, warn};

/// [`FrameSink`] that enqueues frames for the writer task without blocking.
///
/// A full queue drops the frame.
pub struct OutboundQueue {
    tx: mpsc::Sender<OutboundFrame>,
    dropped: u64,
}

impl OutboundQueue {
    pub fn new(tx: mpsc::Sender<OutboundFrame>) -> Self {
        Self { tx, dropped: 0 }
    }

    /// Frames dropped because the queue was full or closed.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl FrameSink for OutboundQueue {
    fn emit(&mut self, interface: InterfaceNumber, frame: &[u8]) {
        let item = OutboundFrame {
            interface,
            frame: Bytes::copy_from_slice(frame),
        };
        match self.tx.try_send(item) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                warn!(%interface, "Outbound queue full, dropping frame");
            }
            Err(TrySendError::Closed(_)) => {
                self.dropped += 1;
                warn!(%interface, "Outbound writer gone, dropping frame");
            }
        }
    }
}

/// The switch daemon: forwarding engine plus transport plumbing.
pub struct Switchd {
    engine: Arc<ForwardingEngine>,
    interfaces: Vec<String>,
    queue_depth: usize,
}

impl Switchd {
    pub fn new(config: &SwitchdConfig) -> Result<Self> {
        config.validate()?;
        let engine = ForwardingEngine::new(config.switch_config())?;
        Ok(Self {
            engine: Arc::new(engine),
            interfaces: config.interfaces.clone(),
            queue_depth: config.transport.queue_depth,
        })
    }

    pub fn engine(&self) -> &Arc<ForwardingEngine> {
        &self.engine
    }

    /// Runs until the inbound stream ends, `shutdown` resolves, or a fatal
    /// error occurs. Returns the final forwarding statistics.
    ///
    /// A failing writer is fatal: the loop stops as soon as the writer task
    /// exits. Frames already queued are written out before returning, and
    /// final statistics are logged on every exit path.
    pub async fn run<R, W, F>(self, reader: R, writer: W, shutdown: F) -> Result<SwitchStatsSnapshot>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
        F: Future<Output = ()>,
    {
        for (index, name) in self.interfaces.iter().enumerate() {
            info!(interface = index + 1, name = %name, "Switching on interface");
        }

        let (tx, rx) = mpsc::channel(self.queue_depth);
        let mut writer_task = tokio::spawn(write_outbound(rx, writer));
        let mut writer_exit = None;

        let mut inbound = FramedRead::new(reader, TransportCodec);
        let mut outbound = OutboundQueue::new(tx);
        tokio::pin!(shutdown);

        let result = loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break Ok(());
                }
                // the queue sender is still alive, so the writer only exits on failure
                joined = &mut writer_task => {
                    warn!("Outbound writer stopped");
                    writer_exit = Some(joined);
                    break Ok(());
                }
                message = inbound.next() => match message {
                    None => {
                        info!("Transport closed");
                        break Ok(());
                    }
                    Some(Err(e)) => break Err(e),
                    Some(Ok(raw)) => {
                        if let Err(e) = self.dispatch(raw, &mut outbound) {
                            break Err(e);
                        }
                    }
                },
            }
        };

        if outbound.dropped() > 0 {
            warn!(dropped = outbound.dropped(), "Frames dropped on a full outbound queue");
        }
        drop(outbound);

        let joined = match writer_exit {
            Some(joined) => joined,
            None => writer_task.await,
        };
        let written = joined
            .map_err(|e| SwitchdError::Internal(format!("writer task failed: {}", e)))
            .and_then(|written| written);

        let stats = self.engine.stats();
        info!(?stats, "Final forwarding statistics");

        result?;
        written?;

        Ok(stats)
    }

    #[instrument(skip(self, raw, outbound), fields(msg_type = raw.msg_type, len = raw.body.len()))]
    fn dispatch(&self, raw: RawMessage, outbound: &mut OutboundQueue) -> Result<()> {
        match InboundMessage::classify(raw)? {
            InboundMessage::Control(command) => {
                let ack = self.engine.dispatch_control(&command);
                debug!(?ack, "Control command handled");
            }
            InboundMessage::AnnounceMac { interface, mac } => {
                self.engine.announce_mac(interface, mac)?
            }
            InboundMessage::Frame { interface, frame } => {
                let decision =
                    self.engine
                        .handle_frame(interface, &frame, Instant::now(), outbound)?;
                debug!(?decision, "Frame processed");
            }
        }
        Ok(())
    }
}

/// Drains the outbound queue into `writer` until every sender is gone.
async fn write_outbound<W>(mut rx: mpsc::Receiver<OutboundFrame>, writer: W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut sink = FramedWrite::new(writer, TransportCodec);
    while let Some(frame) = rx.recv().await {
        sink.send(frame).await?;
    }
    sink.close().await?;
    Ok(())
}
