//! thumb0-core demo CLI.
//!
//! Loads a small JSON program image (vector table + code words), drives
//! the step/SysTick loop, and prints CPU state. This binary is explicitly
//! not part of the core: it's a sample embedder driving it.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use thumb0_core::{Cpu, SimMemory, Status, power_on_reset, step, systick_tick};

/// JSON program image: a vector table plus a flat code image.
#[derive(Debug, Deserialize)]
struct ProgramImage {
    /// Vector number -> handler/initial-value address.
    vectors: HashMap<u32, u32>,
    /// Address the code words are loaded at.
    load_base: u32,
    /// 16-bit code words, loaded little-endian starting at `load_base`.
    code: Vec<u16>,
}

/// Run a thumb0-core program image and print the resulting CPU state.
#[derive(Debug, Parser)]
#[command(name = "thumb0-core", about = "ARMv6-M Thumb-1 subset simulator demo")]
struct Config {
    /// Path to a JSON program image (see `demos/` for examples).
    image: PathBuf,

    /// Number of step/systick-tick pairs to run.
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Enable SysTick with the given reload value before running.
    #[arg(long)]
    systick_reload: Option<u32>,

    /// Print a trace line per instruction and per exception entry.
    #[arg(long)]
    trace: bool,
}

fn load_image(config: &Config) -> Result<SimMemory> {
    let text = std::fs::read_to_string(&config.image)
        .with_context(|| format!("reading program image {}", config.image.display()))?;
    let image: ProgramImage =
        serde_json::from_str(&text).with_context(|| "parsing program image JSON")?;

    let mut mem = SimMemory::new(0x1_0000);
    for (vector, addr) in &image.vectors {
        mem.store_word(*vector * 4, *addr);
    }
    let mut offset = image.load_base;
    for word in &image.code {
        mem.load(offset, &word.to_le_bytes());
        offset += 2;
    }
    Ok(mem)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if config.trace {
        log::set_max_level(log::LevelFilter::Trace);
    }

    let mut mem = load_image(&config)?;
    let mut cpu = Cpu::new();
    if power_on_reset(&mut cpu, &mut mem) != Status::Ok {
        anyhow::bail!("power-on reset failed: vector table read error");
    }

    if let Some(reload) = config.systick_reload {
        cpu.systick.ctrl = 1;
        cpu.systick.reload = reload;
        cpu.systick.current = reload;
    }

    println!("thumb0-core demo");
    println!("initial pc={:#010x} sp={:#010x}", cpu.pc(), cpu.sp());

    for i in 0..config.steps {
        let status = step(&mut cpu, &mut mem);
        if status != Status::Ok {
            eprintln!("step {i}: unrecoverable memory error, stopping");
            break;
        }
        let status = systick_tick(&mut cpu, &mut mem);
        if status != Status::Ok {
            eprintln!("step {i}: systick unrecoverable memory error, stopping");
            break;
        }
    }

    println!(
        "final pc={:#010x} sp={:#010x} regs={:x?}",
        cpu.pc(),
        cpu.sp(),
        &cpu.regs[0..13]
    );
    println!(
        "flags: n={} z={} c={} v={}",
        cpu.n(),
        cpu.z(),
        cpu.c(),
        cpu.v()
    );

    Ok(())
}
