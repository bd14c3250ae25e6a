//! Wireless link transmit task
//!
//! Drains the reply channel and writes each status line to the bridge,
//! newline-terminated so the app side can split the stream.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::REPLY_CHANNEL;

/// Link TX task - sends acknowledgements and status lines to the app
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    loop {
        let line = REPLY_CHANNEL.receive().await;
        trace!("Link TX: {}", line.as_str());

        if tx.write_all(line.as_bytes()).await.is_err() {
            warn!("Link write error");
            continue;
        }
        if tx.write_all(b"\n").await.is_err() {
            warn!("Link write error");
        }
    }
}
