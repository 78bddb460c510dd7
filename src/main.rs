//! Headless runner.
//!
//! Loads a cartridge, powers the console on and steps the CPU until it halts
//! or the step limit is reached.
//! Usage: nes6502 [--cycles <n>] [--max-steps <n>] [--trace] <path/to/game.nes>

use std::process::ExitCode;

use ansi_term::Colour::Red;
use anyhow::{Context, bail};
use nes6502::{
    Emulator,
    config::EmulatorConfig,
    cpu::cpu::{HaltReason, RunState},
};

fn print_usage() {
    eprintln!("Usage: nes6502 [OPTIONS] <ROM>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --cycles <n>     Master-clock budget per step [default: 1024]");
    eprintln!("  --max-steps <n>  Stop after n steps even if the CPU is still running");
    eprintln!("  --trace          Log every executed instruction");
    eprintln!("  -h, --help       Print this help");
}

/// `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> anyhow::Result<Option<EmulatorConfig>> {
    let mut rom_path = None;
    let mut cycles = None;
    let mut max_steps = None;
    let mut trace = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--cycles" => {
                i += 1;
                let value = args.get(i).context("--cycles needs a value")?;
                cycles = Some(
                    value
                        .parse::<u16>()
                        .with_context(|| format!("invalid --cycles value '{value}'"))?,
                );
            }
            "--max-steps" => {
                i += 1;
                let value = args.get(i).context("--max-steps needs a value")?;
                max_steps = Some(
                    value
                        .parse::<u64>()
                        .with_context(|| format!("invalid --max-steps value '{value}'"))?,
                );
            }
            "--trace" => trace = true,
            "--help" | "-h" => return Ok(None),
            flag if flag.starts_with('-') => bail!("unknown option '{flag}'"),
            path => {
                if rom_path.replace(path.to_string()).is_some() {
                    bail!("only one ROM path may be given");
                }
            }
        }
        i += 1;
    }

    let Some(rom_path) = rom_path else {
        bail!("no ROM path given");
    };

    let mut config = EmulatorConfig::new(rom_path);
    if let Some(cycles) = cycles {
        config.cycles_per_step = cycles;
    }
    config.max_steps = max_steps;
    config.trace = trace;

    Ok(Some(config))
}

fn run(config: &EmulatorConfig) -> anyhow::Result<()> {
    let mut emulator = Emulator::new();
    emulator
        .load_rom(&config.rom_path)
        .with_context(|| format!("failed to load '{}'", config.rom_path.display()))?;
    emulator.power_on();

    let mut steps: u64 = 0;
    while !emulator.stopped() && !config.step_limit_reached(steps) {
        emulator.step(config.cycles_per_step)?;
        steps += 1;
    }

    let cpu = emulator.cpu();
    match cpu.state {
        RunState::Halted(HaltReason::Jam(code)) => {
            log::info!("CPU jammed on ${code:02X} at ${:04X}", cpu.pc.wrapping_sub(1));
        }
        RunState::Halted(HaltReason::Break) => {
            log::info!("BRK at ${:04X}", cpu.pc.wrapping_sub(1));
        }
        RunState::Running => log::info!("step limit of {steps} reached"),
    }
    log::info!(
        "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} PC:{:04X} instructions:{}",
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.status,
        cpu.sp,
        cpu.pc,
        cpu.internal_clock
    );

    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match parse_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{} {err:#}", Red.bold().paint("ERROR"));
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter()))
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", Red.bold().paint("ERROR"));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rom_path_alone_uses_defaults() {
        let config = parse_args(&args(&["game.nes"])).unwrap().unwrap();

        assert_eq!(config, EmulatorConfig::new("game.nes"));
    }

    #[test]
    fn options_are_applied() {
        let config = parse_args(&args(&["--cycles", "8", "--trace", "--max-steps", "5", "a.nes"]))
            .unwrap()
            .unwrap();

        assert_eq!(config.cycles_per_step, 8);
        assert_eq!(config.max_steps, Some(5));
        assert!(config.trace);
    }

    #[test]
    fn help_short_circuits() {
        assert!(parse_args(&args(&["--help", "a.nes"])).unwrap().is_none());
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--cycles"])).is_err());
        assert!(parse_args(&args(&["--cycles", "70000", "a.nes"])).is_err());
        assert!(parse_args(&args(&["--bogus", "a.nes"])).is_err());
        assert!(parse_args(&args(&["a.nes", "b.nes"])).is_err());
    }
}
