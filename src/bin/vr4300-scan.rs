use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vr4300_rs::{scan, ScanConfig, Vr4300Decoder};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scan a raw big-endian VR4300 word stream until the first word that does not decode"
)]
struct Opts {
    /// Address of the first scanned word (hex or dec)
    #[arg(short, long, value_parser = parse_u32, default_value = "0")]
    entry: u32,
    /// Byte offset of the first scanned word (hex or dec)
    #[arg(short, long, value_parser = parse_u32, default_value = "0")]
    start: u32,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
    #[arg(value_name = "BINFILE")]
    input: String,
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let bytes = std::fs::read(&opts.input)?;
    let cfg = ScanConfig { entry_pc: opts.entry, start_offset: opts.start };

    let report = {
        let stdout = std::io::stdout();
        let mut sink = std::io::BufWriter::new(stdout.lock());
        let report = scan(&bytes, &Vr4300Decoder::new(), cfg, &mut sink)?;
        sink.flush()?;
        report
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("accepted   : {}", report.accepted);
        println!("jumps      : {}", report.jump_count);
        println!("branches   : {}", report.branch_count);
        println!("asm ends   : {:#x}", report.boundary_offset);
        println!("binary at  : {:#x}", report.binary_start);
        println!("halt       : {}", report.halt);
    }
    Ok(())
}
