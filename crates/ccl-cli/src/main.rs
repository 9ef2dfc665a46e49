use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use ccl::{classify, ContainerKind, Cursor, Levelset, Writer};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ccl", about = "Chip's Challenge levelset inspector")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a file and summarize its levels.
    Info {
        /// Path to a levelset file.
        file: PathBuf,
    },
    /// Read a levelset and write it back out, renumbering levels 1..N.
    Repack {
        /// Path to the input levelset.
        input: PathBuf,
        /// Path for the rewritten levelset.
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Info { file } => info(&file),
        Command::Repack { input, output } => repack(&input, &output),
    }
}

fn info(file: &PathBuf) -> Result<()> {
    match classify(file) {
        ContainerKind::Unreadable => bail!("{}: cannot read a container magic", file.display()),
        ContainerKind::Alternate => {
            println!("{}: not a levelset container", file.display());
            return Ok(());
        }
        ContainerKind::Recognized(variant) => {
            println!("{}: {variant} levelset", file.display());
        }
    }

    let data = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let set = Levelset::read(&mut Cursor::new(&data))
        .with_context(|| format!("parsing {}", file.display()))?;

    println!("{} levels, {} bytes", set.len(), data.len());
    for level in set.levels() {
        let level = level.borrow();
        println!(
            "  #{:<3} {:<24} pass {:<4} chips {:<4} time {}",
            level.level_num,
            level.name,
            level.password,
            level.chips,
            if level.timer == 0 {
                "-".to_string()
            } else {
                level.timer.to_string()
            },
        );
    }
    Ok(())
}

fn repack(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let mut set = Levelset::read(&mut Cursor::new(&data))
        .with_context(|| format!("parsing {}", input.display()))?;

    let mut w = Writer::new();
    let written = set.write(&mut w);
    fs::write(output, w.into_bytes())
        .with_context(|| format!("writing {}", output.display()))?;

    log::info!("repacked {} -> {}", input.display(), output.display());
    println!(
        "{} levels, {} bytes in, {} bytes out",
        set.len(),
        data.len(),
        written
    );
    Ok(())
}
