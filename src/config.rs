//! Run configuration for the command-line front end.

use std::path::PathBuf;

/// Master-clock advance per [`Emulator::step`](crate::emulator::Emulator::step).
pub const DEFAULT_CYCLES_PER_STEP: u16 = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorConfig {
    /// iNES file to load.
    pub rom_path: PathBuf,
    /// Budget handed to each `step` call.
    pub cycles_per_step: u16,
    /// Stop after this many `step` calls even if the CPU is still running.
    pub max_steps: Option<u64>,
    /// Emit the per-instruction trace.
    pub trace: bool,
}

impl EmulatorConfig {
    pub fn new(rom_path: impl Into<PathBuf>) -> Self {
        Self {
            rom_path: rom_path.into(),
            cycles_per_step: DEFAULT_CYCLES_PER_STEP,
            max_steps: None,
            trace: false,
        }
    }

    /// Default `env_logger` filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.trace { "trace" } else { "info" }
    }

    /// Whether `steps` completed calls have used up the step limit.
    pub fn step_limit_reached(&self, steps: u64) -> bool {
        self.max_steps.is_some_and(|max| steps >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EmulatorConfig::new("game.nes");

        assert_eq!(config.rom_path, PathBuf::from("game.nes"));
        assert_eq!(config.cycles_per_step, 1024);
        assert_eq!(config.log_filter(), "info");
        assert!(!config.step_limit_reached(u64::MAX));
    }

    #[test]
    fn step_limit() {
        let config = EmulatorConfig {
            max_steps: Some(3),
            trace: true,
            ..EmulatorConfig::new("game.nes")
        };

        assert!(!config.step_limit_reached(2));
        assert!(config.step_limit_reached(3));
        assert_eq!(config.log_filter(), "trace");
    }
}
