//! Bridge from the synchronous engine sink to an async connection.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{Context, Result, anyhow};
use hookline_engine::host::PacketSink;
use hookline_engine::packet::ServerboundPacket;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::packets;

/// [`PacketSink`] that queues packets for a [`PacketWriter`] task.
///
/// Clones share the queue and the sequence counter, so ids stay monotonic
/// across every handle.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ServerboundPacket>,
    sequence: Arc<AtomicU32>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<ServerboundPacket>) -> Self {
        Self {
            tx,
            sequence: Arc::new(AtomicU32::new(1)),
        }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ServerboundPacket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// The id the next sequenced packet will use.
    pub fn next_sequence(&self) -> u32 {
        self.sequence.load(Ordering::Relaxed)
    }
}

impl PacketSink for ChannelSink {
    fn send(&mut self, packet: ServerboundPacket) -> Result<()> {
        self.tx
            .send(packet)
            .map_err(|err| anyhow!("packet writer closed, dropped {}", err.0.name()))
    }

    fn send_sequenced(&mut self, build: &mut dyn FnMut(u32) -> ServerboundPacket) -> Result<u32> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.send(build(sequence))?;
        Ok(sequence)
    }
}

/// Drains a [`ChannelSink`] queue onto a byte stream, framing each packet.
pub struct PacketWriter {
    compression: Option<u32>,
    cipher: Option<azalea_crypto::Aes128CfbEnc>,
}

impl PacketWriter {
    pub fn new(compression: Option<u32>) -> Self {
        Self {
            compression,
            cipher: None,
        }
    }

    pub fn with_cipher(mut self, cipher: azalea_crypto::Aes128CfbEnc) -> Self {
        self.cipher = Some(cipher);
        self
    }

    /// Write packets until every sender is dropped. Returns the number written.
    pub async fn run<W: AsyncWrite + Unpin + Send>(
        mut self,
        mut rx: mpsc::UnboundedReceiver<ServerboundPacket>,
        write: &mut W,
    ) -> Result<u64> {
        let mut written = 0u64;
        while let Some(packet) = rx.recv().await {
            let raw = packets::encode(&packet)?;
            azalea_protocol::write::write_raw_packet(&raw, write, self.compression, &mut self.cipher)
                .await
                .with_context(|| format!("writing {} packet", packet.name()))?;
            written += 1;
            tracing::trace!("Wrote {} ({} bytes)", packet.name(), raw.len());
        }
        write.flush().await.context("flushing packet stream")?;
        tracing::debug!("Packet writer finished after {} packets", written);
        Ok(written)
    }
}
