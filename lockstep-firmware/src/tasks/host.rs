//! Host UART tasks
//!
//! `host_rx_task` reassembles command lines from the host and runs them
//! through the sequencer; `host_tx_task` writes queued replies back.
//! Splitting the two keeps line processing off the UART write path.

use core::fmt::Write as _;

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use lockstep_protocol::LineReader;

use crate::channels::{Response, RESPONSES, RESPONSE_LEN};
use crate::SharedSequencer;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Room kept for the status token line after a truncated dump
const STATUS_RESERVE: usize = 8;

/// fmt sink that silently drops output past `limit` bytes
struct TruncatingWrite<'a> {
    buf: &'a mut Response,
    limit: usize,
}

impl<'a> TruncatingWrite<'a> {
    fn new(buf: &'a mut Response, limit: usize) -> Self {
        Self { buf, limit }
    }
}

impl core::fmt::Write for TruncatingWrite<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for ch in s.chars() {
            if self.buf.len() >= self.limit {
                break;
            }
            let _ = self.buf.push(ch);
        }
        Ok(())
    }
}

/// Host RX task - reassembles command lines and executes them
#[embassy_executor::task]
pub async fn host_rx_task(mut rx: BufferedUartRx, sequencer: &'static SharedSequencer) {
    info!("Host RX task started");

    let mut reader = LineReader::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        // Read available bytes
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    let Some(line) = reader.feed(byte) else {
                        continue;
                    };

                    let mut response = Response::new();
                    let status = {
                        let mut seq = sequencer.lock().await;
                        seq.process_line(
                            &line,
                            &mut TruncatingWrite::new(&mut response, RESPONSE_LEN - STATUS_RESERVE),
                        )
                    };
                    debug!("Line {} -> {}", line.as_str(), status.token());

                    // Token last, so the host can stop reading once it sees one
                    let mut out = TruncatingWrite::new(&mut response, RESPONSE_LEN);
                    let _ = writeln!(out, "{}", status.token());

                    // Queue the reply, dropping if full
                    if RESPONSES.try_send(response).is_err() {
                        warn!("Response channel full, dropping reply");
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Host TX task - writes queued replies back to the host
#[embassy_executor::task]
pub async fn host_tx_task(mut tx: BufferedUartTx) {
    info!("Host TX task started");

    loop {
        let response = RESPONSES.receive().await;
        if let Err(e) = tx.write_all(response.as_bytes()).await {
            warn!("UART write error: {:?}", e);
        }
    }
}
