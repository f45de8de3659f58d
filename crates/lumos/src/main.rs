//! Lumos - command-line sACN sender
//!
//! ```text
//! lumos --config show.toml --level 255          Send a full-on frame once
//! lumos --count 100 --interval-ms 25 --sync     Stream 40 fps with sync packets
//! lumos --dump                                  Print the packet as hex instead
//! lumos --gen-config                            Write the default config to stdout
//! ```

mod logging_setup;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use lumos_core::packet::{build_data_packet, DataPacketView, UNIVERSE_CHANNEL_CAPACITY};
use lumos_core::{Cid, LumosConfig, SequenceCounter, Transmitter, TransmitterConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "lumos", about = "Send DMX512 levels over sACN (E1.31)")]
struct Cli {
    /// Path to configuration TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Level written to every channel
    #[arg(short, long, default_value_t = 0)]
    level: u8,

    /// Number of channels in the frame
    #[arg(long, default_value_t = UNIVERSE_CHANNEL_CAPACITY)]
    channels: usize,

    /// How many frames to send
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,

    /// Delay between frames
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Follow every frame with a sync packet
    #[arg(long)]
    sync: bool,

    /// Print the first packet as hex and exit without sending
    #[arg(long)]
    dump: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    gen_config: bool,
}

/// Hex of the first packet a transmitter with this config would send
fn dump_first_packet(config: &TransmitterConfig, cid: Cid, frame: &[u8]) -> Result<String> {
    config.validate().context("Invalid transmitter config")?;

    let sequence = SequenceCounter::default().current();
    let packet = build_data_packet(&config.packet_options(cid), config.universe, frame, sequence)
        .context("Failed to build packet")?;

    let view = DataPacketView::parse(&packet).context("Built packet does not read back")?;
    info!(
        "Universe {} seq {} priority {} cid {}: {} levels, root length {}",
        view.universe,
        view.sequence,
        view.priority,
        view.cid,
        view.levels.len(),
        view.root_length
    );

    Ok(hex::encode(&packet))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.gen_config {
        let text = toml::to_string_pretty(&LumosConfig::default())
            .context("Failed to serialize default config")?;
        println!("{text}");
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => LumosConfig::load(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => LumosConfig::default(),
    };

    logging_setup::init(&config.log)?;

    // One CID for the life of the process
    let cid = config.transmitter.resolve_cid(Cid::generate());
    let frame = vec![cli.level; cli.channels];

    if cli.dump {
        println!("{}", dump_first_packet(&config.transmitter, cid, &frame)?);
        return Ok(());
    }

    let mut transmitter =
        Transmitter::new(&config.transmitter, cid).context("Failed to open sACN socket")?;
    info!(
        "Sending {} frame(s) to {} at level {}",
        cli.count,
        transmitter.destination(),
        cli.level
    );

    for i in 0..cli.count {
        transmitter.send(&frame).context("Failed to send frame")?;
        if cli.sync {
            transmitter
                .send_sync()
                .context("Failed to send sync packet")?;
        }
        if i + 1 < cli.count {
            thread::sleep(Duration::from_millis(cli.interval_ms));
        }
    }

    info!("Done");
    Ok(())
}
