use anyhow::Context;
use clap::{Parser, Subcommand};
use tic_rs::{init_logger, log_error, log_info, LinkConfig, Parity, StopBits, TicMode, TicReader};
use tic_rs::{SerialTransport, TicRecord};

const DEFAULT_DEVICE: &str = "/dev/serial0";

#[derive(Parser)]
#[command(name = "tic-cli")]
#[command(about = "CLI tool for Linky TIC meters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the TIC mode spoken on a device
    Detect {
        #[arg(default_value = DEFAULT_DEVICE)]
        device: String,
    },
    /// Read one frame and print it as JSON
    Read {
        #[arg(default_value = DEFAULT_DEVICE)]
        device: String,
        /// Baud rate; detection is skipped when set
        #[arg(short, long)]
        baud: Option<u32>,
        #[arg(long, default_value_t = 7)]
        frame_size: u8,
        /// ParityNone|N, ParityOdd|O, ParityEven|E, ParityMark|M, ParitySpace|S
        #[arg(long, default_value = "N")]
        parity: Parity,
        /// Stop1|1, Stop1Half|15, Stop2|2
        #[arg(long, default_value = "1")]
        stop_bits: StopBits,
        /// standard or historical; inferred from the baud rate when omitted
        #[arg(short, long)]
        mode: Option<TicMode>,
        /// Print indented JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        log_error(&format!("{e:#}"));
        return Err(e);
    }
    Ok(())
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Detect { device } => {
            let reader = tic_rs::detect(&device)
                .await
                .with_context(|| format!("detecting TIC mode on {device}"))?;
            log_info(&format!("{} mode, {}", reader.mode(), reader.config()));
            println!("{}", serde_json::to_string(&reader.config())?);
        }
        Commands::Read {
            device,
            baud,
            frame_size,
            parity,
            stop_bits,
            mode,
            pretty,
        } => {
            let reader = match baud {
                Some(baud_rate) => {
                    let config = LinkConfig::new(baud_rate, frame_size, parity, stop_bits);
                    tic_rs::connect(&device, config, mode)
                }
                None => detected_reader(&device, mode).await?,
            };

            let record = reader
                .read()
                .await
                .with_context(|| format!("reading TIC frame on {device}"))?;
            print_record(&record, pretty)?;
        }
    }

    Ok(())
}

async fn detected_reader(
    device: &str,
    mode: Option<TicMode>,
) -> anyhow::Result<TicReader<SerialTransport>> {
    let detected = tic_rs::detect(device)
        .await
        .with_context(|| format!("detecting TIC mode on {device}"))?;

    Ok(match mode {
        Some(mode) => TicReader::new(SerialTransport::new(device), detected.config(), mode),
        None => detected,
    })
}

fn print_record(record: &TicRecord, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };
    println!("{json}");
    Ok(())
}
