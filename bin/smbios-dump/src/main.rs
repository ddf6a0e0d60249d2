// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use slog::{info, o, Drain, Level, Logger};

use smbios_inventory::{
    MemoryDevice, Record, Sha256Fingerprint, Structures, Summary, Value,
};

#[derive(Debug, Parser)]
#[clap(about, version)]
/// Dump inventory records decoded from the SMBIOS structure table
struct Opt {
    /// Raw SMBIOS structure table
    #[clap(
        short,
        long,
        env = "SMBIOS_TABLE_PATH",
        default_value = "/sys/firmware/dmi/tables/DMI"
    )]
    path: PathBuf,

    /// Records to emit
    #[clap(short, long, value_enum, default_value_t = Table::Structures)]
    table: Table,

    /// Output format
    #[clap(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Enable debug logging
    #[clap(short, long, action)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Table {
    /// Summary of every structure
    Structures,
    /// Type 17 (Memory Device) structures
    MemoryDevices,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    /// One JSON object per line
    Json,
    /// Aligned `name: value` blocks
    Text,
}

fn create_logger(opt: &Opt) -> (Logger, slog_async::AsyncGuard) {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let level = if opt.verbose { Level::Debug } else { Level::Info };
    let drain = slog::LevelFilter(drain, level).fuse();
    let (drain, guard) = slog_async::Async::new(drain).build_with_guard();

    (Logger::root(drain.fuse(), o!()), guard)
}

fn emit<R>(out: &mut impl Write, record: &R, format: Format) -> io::Result<()>
where
    R: Record + serde::Serialize,
{
    match format {
        Format::Json => {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)
        }
        Format::Text => {
            for (name, value) in record.fields() {
                match value {
                    Value::Integer(v) => writeln!(out, "{name:>24}: {v}")?,
                    Value::Text(s) => writeln!(out, "{name:>24}: {s}")?,
                    // not reported by firmware
                    Value::Absent => {}
                }
            }
            writeln!(out)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();
    let (log, _guard) = create_logger(&opt);

    let data = std::fs::read(&opt.path).with_context(|| {
        format!("failed to read SMBIOS table from {}", opt.path.display())
    })?;
    info!(log, "read structure table";
        "path" => %opt.path.display(),
        "bytes" => data.len(),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut records = 0usize;
    for structure in Structures::with_log(&data, &log) {
        match opt.table {
            Table::Structures => {
                let summary = Summary::decode(&structure, &Sha256Fingerprint);
                emit(&mut out, &summary, opt.format)?;
            }
            Table::MemoryDevices => {
                let Some(dev) = MemoryDevice::decode_with_log(&structure, &log)
                else {
                    continue;
                };
                emit(&mut out, &dev, opt.format)?;
            }
        }
        records += 1;
    }
    out.flush().context("failed to flush output")?;

    info!(log, "decoded structure table"; "records" => records);
    Ok(())
}
