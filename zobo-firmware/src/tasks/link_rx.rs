//! Wireless link receive task
//!
//! The UART leg from the BLE bridge is a raw byte stream: reads can
//! coalesce back-to-back commands or split one command apart, so every
//! byte goes through the incremental frame parser and only complete,
//! checksummed frames are handed to the controller. A full channel drops
//! the frame rather than blocking the link.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use zobo_protocol::FrameParser;

use crate::channels::COMMAND_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives command frames from the wireless bridge
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("Link RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => {
                            if COMMAND_CHANNEL.try_send(frame).is_err() {
                                warn!("Command channel full, dropping frame");
                            }
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Link frame error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("Link read error: {:?}", e);
            }
        }
    }
}
