use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use n64_dump::{ByteOrder, Cic, Header, Rom};
use vr4300_rs::ScanReport;

#[derive(Parser, Debug)]
#[command(author, version, about = "N64 cartridge inspector", long_about = None)]
struct Cli {
    /// Input cartridge image (.z64, .v64 or .n64)
    #[arg(value_name = "ROMFILE")]
    input: PathBuf,
    /// Boot code to assume instead of detecting it (6101, 6102, 6103, 6105, 6106)
    #[arg(long, value_parser = parse_cic)]
    cic: Option<Cic>,
    /// Skip the country, media type and checksum checks
    #[arg(long)]
    skip_verify: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print header facts
    Info {
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Find where the code after the boot code ends
    Scan {
        /// Summary format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write the listing to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Address of the first scanned word (hex or dec); defaults to the boot code's entry
        #[arg(long, value_parser = parse_u32)]
        entry: Option<u32>,
        /// Byte offset of the first scanned word (hex or dec)
        #[arg(long, value_parser = parse_u32)]
        start: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

fn parse_cic(s: &str) -> Result<Cic> {
    let n = s.trim().trim_start_matches("CIC-NUS-").parse::<u32>()?;
    Cic::from_number(n).ok_or_else(|| anyhow::anyhow!("unknown boot code {n}"))
}

#[derive(Debug, Serialize)]
struct InfoOut<'a> {
    header: &'a Header,
    byte_order: ByteOrder,
    country: Option<&'static str>,
    media: Option<&'static str>,
    cic: Option<u32>,
    entry: Option<u32>,
}

fn print_summary(report: &ScanReport) {
    println!("Unconditional jumps    : {}", report.jump_count);
    println!("Unconditional branches : {}", report.branch_count);
    println!("ASM ends at            : {:#x}", report.boundary_offset);
    println!("Binary starts at       : {:#x}", report.binary_start);
    println!("Stopped by             : {}", report.halt);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rom = Rom::load(&cli.input)?;

    match cli.cmd {
        Command::Info { format } => {
            let cic = rom.checked_cic(cli.cic, !cli.skip_verify)?;
            let h = &rom.header;
            match format {
                OutputFormat::Json => {
                    let out = InfoOut {
                        header: h,
                        byte_order: rom.order,
                        country: h.country_name(),
                        media: h.media_name(),
                        cic: cic.map(Cic::number),
                        entry: cic.map(|c| rom.entry_point(c)),
                    };
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                OutputFormat::Text => {
                    println!("Title           : {}", h.title);
                    println!("Byte order      : {:?}", rom.order);
                    println!("Country         : {}", h.country_name().unwrap_or("?"));
                    println!("Media type      : {}", h.media_name().unwrap_or("?"));
                    println!("Cartridge id    : {}", String::from_utf8_lossy(&h.cart_id));
                    println!("Version         : {}", h.version);
                    println!("CRC1            : {:#010x}", h.crc1);
                    println!("CRC2            : {:#010x}", h.crc2);
                    println!("Program counter : {:#010x}", h.program_counter);
                    match cic {
                        Some(c) => {
                            println!("Boot code       : {c}");
                            println!("Entry point     : {:#010x}", rom.entry_point(c));
                        }
                        None => println!("Boot code       : unknown"),
                    }
                }
            }
        }
        Command::Scan { format, out, entry, start } => {
            let cic = rom.checked_cic(cli.cic, !cli.skip_verify)?.unwrap_or_else(|| {
                warn!("assuming {}", Cic::Nus6102);
                Cic::Nus6102
            });
            let mut cfg = rom.scan_config(cic);
            if let Some(pc) = entry {
                cfg.entry_pc = pc;
            }
            if let Some(off) = start {
                cfg.start_offset = off;
            }

            let report = match &out {
                Some(path) => {
                    let mut sink = BufWriter::new(File::create(path)?);
                    let report = rom.find_binary(cfg, &mut sink)?;
                    sink.flush()?;
                    report
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut sink = BufWriter::new(stdout.lock());
                    let report = rom.find_binary(cfg, &mut sink)?;
                    sink.flush()?;
                    report
                }
            };

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => print_summary(&report),
            }
        }
    }

    Ok(())
}
