//! huffpack CLI
//!
//! Usage:
//!   huffpack encode  <input> <output> [--stats]
//!   huffpack decode  <input> <output>
//!   huffpack inspect <input>
//!   huffpack sample  <output> [--size N] [--seed N]

mod config;
mod input_gen;
mod logger;

use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use huffpack_core::{decode, encode, Header};
use tracing::{error, info};

use crate::config::{Command, Config};

fn main() -> ExitCode {
    let config = Config::parse();
    logger::init(config.log_level());

    match run(&config.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Encode { input, output, stats } => {
            let data = read_file(input)?;
            let artifact = encode(&data)?;
            fs::write(output, artifact.as_bytes())?;
            info!(input = %input.display(), output = %output.display(), "encoded");

            println!("Done. {} bytes → {} bytes", data.len(), artifact.as_bytes().len());
            if *stats {
                println!();
                artifact.stats().print_summary();
            }
        }
        Command::Decode { input, output } => {
            let artifact = read_file(input)?;
            let data = decode(&artifact)?;
            fs::write(output, &data)?;
            info!(input = %input.display(), output = %output.display(), "decoded");

            println!("Done. {} bytes → {} bytes", artifact.len(), data.len());
        }
        Command::Inspect { input } => {
            let artifact = read_file(input)?;
            let (header, offset) = Header::read(&artifact)?;
            print_header(&header, offset, artifact.len() - offset);
        }
        Command::Sample { output, size, seed } => {
            let seed = seed.unwrap_or_else(time_seed);
            let data = input_gen::generate_sample_data(seed, *size);
            fs::write(output, &data)?;

            println!("Wrote {} bytes to {} (seed {})", data.len(), output.display(), seed);
        }
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>, Box<dyn Error>> {
    fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()).into())
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn print_header(header: &Header, header_len: usize, payload_len: usize) {
    println!("=== Header ===");
    println!("Header size:  {} bytes", header_len);
    println!("Payload size: {} bytes ({} pad bits)", payload_len, header.pad_bits);
    println!("Symbols:      {}", header.symbol_count);
    println!("CRC32:        {:#010x}", header.checksum);
    println!();
    println!("=== Code Table ({} entries) ===", header.table.len());
    for (symbol, code) in header.table.iter() {
        let shown = if symbol.is_ascii_graphic() {
            format!("'{}'", symbol as char)
        } else {
            format!("{:#04x}", symbol)
        };
        println!("{:>6}  {:>2} bits  {}", shown, code.len(), code);
    }
}
