//! Connectivity co-processor task
//!
//! WiFi provisioning, OTA and info queries are handled by a network
//! co-processor on a second UART. Requests are forwarded as raw
//! opcode+payload frames terminated by a newline; the co-processor answers
//! with newline-delimited ASCII status lines ("WIFI:...", "OTA:...",
//! "VERSION:...", "INFO:...") that are relayed back to the app unchanged.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use zobo_protocol::command::OP_PING;
use zobo_protocol::{status_line, CommandFrame, MAX_STATUS_LINE};

use crate::channels::{COMMAND_CHANNEL, FORWARD_CHANNEL, REPLY_CHANNEL};

/// Connectivity task - bridges forwarded requests to the co-processor and
/// relays its status lines back to the app
#[embassy_executor::task]
pub async fn connectivity_task(mut tx: BufferedUartTx, mut rx: BufferedUartRx) {
    info!("Connectivity task started");

    let mut line = [0u8; MAX_STATUS_LINE];
    let mut line_len = 0usize;
    let mut buf = [0u8; 32];

    loop {
        match select(FORWARD_CHANNEL.receive(), rx.read(&mut buf)).await {
            Either::First(frame) => {
                trace!("Forwarding opcode {:#04x} to co-processor", frame.opcode);
                if tx.write_all(&[frame.opcode]).await.is_err()
                    || tx.write_all(&frame.payload).await.is_err()
                    || tx.write_all(b"\n").await.is_err()
                {
                    warn!("Co-processor write error");
                }
            }
            Either::Second(Ok(n)) => {
                for &byte in &buf[..n] {
                    if byte == b'\n' {
                        if let Some(status) = status_line(&line[..line_len]) {
                            if REPLY_CHANNEL.try_send(status).is_err() {
                                warn!("Reply channel full, dropping status line");
                            }
                            // Ongoing co-processor traffic (e.g. an OTA in
                            // progress) must hold off the sleep timer
                            if let Some(ping) = CommandFrame::parse(&[OP_PING]) {
                                let _ = COMMAND_CHANNEL.try_send(ping);
                            }
                        }
                        line_len = 0;
                    } else if line_len < line.len() {
                        line[line_len] = byte;
                        line_len += 1;
                    }
                    // Bytes past the line buffer are dropped until the
                    // next terminator.
                }
            }
            Either::Second(Err(e)) => {
                warn!("Co-processor read error: {:?}", e);
            }
        }
    }
}
