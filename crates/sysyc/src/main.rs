use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sysyc::{compile_to_ir, compile_to_riscv, CompileError, CompileOptions, EmitTarget};

/// sysyc — compiles a small C-like source language through a textual SSA
/// IR down to RISC-V 32-bit assembly.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Emit textual IR instead of assembly.
    #[arg(long, short = 'k', conflicts_with = "riscv")]
    koopa: bool,

    /// Emit RISC-V assembly (default unless `--koopa` is given).
    #[arg(long, short = 'r', conflicts_with = "koopa")]
    riscv: bool,

    /// Source file to compile.
    input: PathBuf,

    /// Output file; written to stdout when omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Capacity of the temporary virtual register pool (§3.4).
    #[arg(long, default_value_t = 1024)]
    temp_pool_size: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let emit = if cli.koopa { EmitTarget::Koopa } else { EmitTarget::Riscv };
    let options = CompileOptions { emit, temp_pool_size: cli.temp_pool_size };

    eprintln!(
        "sysyc: compiling {} (emit={:?}, temp_pool_size={})",
        cli.input.display(),
        options.emit,
        options.temp_pool_size,
    );

    let src = fs::read_to_string(&cli.input)
        .map_err(|source| CompileError::Io { path: cli.input.clone(), source })
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let output_text = match options.emit {
        EmitTarget::Koopa => compile_to_ir(&src, &options),
        EmitTarget::Riscv => compile_to_riscv(&src, &options),
    }
    .context("compilation failed")?;

    if let Some(path) = &cli.output {
        fs::write(path, &output_text)
            .map_err(|source| CompileError::Io { path: path.clone(), source })
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("sysyc: wrote {}", path.display());
    } else {
        print!("{output_text}");
    }

    eprintln!("sysyc: done");
    Ok(())
}
