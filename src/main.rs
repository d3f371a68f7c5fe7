use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use qcrc::config::AppConfig;
use qcrc::hex;
use qcrc::protocol::correct::{repair, Repair};
use qcrc::protocol::crc::{compute, syndrome, CRC_LEN};
use qcrc::protocol::frame::finalize;
use qcrc::scan::{repaired_output, scan, ScanOptions};

#[derive(Parser)]
#[command(
    name = "qcrc",
    about = "Compute, fill and repair Q-subchannel CRC-16 trailers"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.config/qcrc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the raw CRC and the verification syndrome of HEX bytes
    Crc { hex: String },
    /// Append a CRC trailer to a HEX payload
    Fill { hex: String },
    /// Verify a HEX frame and repair a single-bit error
    Check { hex: String },
    /// Verify (and repair) every frame of a raw subchannel file
    Scan {
        file: PathBuf,
        /// Frame size including the CRC trailer
        #[arg(long)]
        frame_len: Option<usize>,
        /// Only report errors, never modify frames
        #[arg(long)]
        no_correct: bool,
        /// Write the repaired data to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    qcrc::log::init(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::path);
    let config = AppConfig::load(&config_path);
    debug!("Using config {:?} from {}", config, config_path.display());

    match cli.command {
        Command::Crc { hex } => run_crc(&hex),
        Command::Fill { hex } => run_fill(&hex),
        Command::Check { hex } => run_check(&hex),
        Command::Scan {
            file,
            frame_len,
            no_correct,
            output,
        } => {
            let options = ScanOptions {
                frame_len: frame_len.unwrap_or(config.frame_len),
                correct: config.correct && !no_correct,
            };
            let output = repaired_output(&file, output.as_deref(), config.write_repaired);
            run_scan(&file, options, output.as_deref())
        }
        Command::Config { init } => run_config(&config_path, &config, init),
    }
}

fn run_crc(input: &str) -> Result<()> {
    let data = hex::decode(input)?;
    println!("crc      0x{:04X}", compute(&data));
    println!("syndrome 0x{:04X}", syndrome(&data));
    Ok(())
}

fn run_fill(input: &str) -> Result<()> {
    let mut frame = hex::decode(input)?;
    frame.extend_from_slice(&[0; CRC_LEN]);
    let stored = finalize(&mut frame)?;
    debug!("Stored CRC 0x{:04X}", stored);
    println!("{}", hex::encode(&frame));
    Ok(())
}

fn run_check(input: &str) -> Result<()> {
    let mut frame = hex::decode(input)?;
    match repair(&mut frame) {
        Repair::Clean => println!("ok"),
        Repair::Corrected { bit } => {
            println!("corrected bit {} (byte {})", bit, bit / 8);
            println!("{}", hex::encode(&frame));
        }
        Repair::Uncorrectable { syndrome } => {
            bail!("uncorrectable (syndrome 0x{:04X})", syndrome)
        }
    }
    Ok(())
}

fn run_scan(file: &Path, options: ScanOptions, output: Option<&Path>) -> Result<()> {
    let mut data =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    info!(
        "Scanning {} ({} bytes, {}-byte frames)",
        file.display(),
        data.len(),
        options.frame_len
    );

    let report = scan(&mut data, options)?;
    println!("{}", report);
    for c in &report.corrected {
        println!("  frame {} @{:#x}: corrected bit {}", c.index, c.offset, c.bit);
    }
    for b in &report.bad {
        println!("  frame {} @{:#x}: syndrome 0x{:04X}", b.index, b.offset, b.syndrome);
    }

    if let Some(output) = output {
        std::fs::write(output, &data)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Repaired data written to {}", output.display());
    }

    if !report.is_clean() {
        bail!("{} uncorrectable frame(s)", report.bad.len());
    }
    Ok(())
}

fn run_config(path: &Path, config: &AppConfig, init: bool) -> Result<()> {
    if init {
        if path.exists() {
            bail!("Config already exists: {}", path.display());
        }
        AppConfig::default().save(path)?;
        return Ok(());
    }
    println!("# {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
