use stderrlog::{LogLevelNum, Timestamp};

/// Log levels, quietest first.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const ORDER: [LogLevel; 6] = [
        LogLevel::Off,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// This level raised by `steps`, saturating at [`LogLevel::Trace`].
    pub fn raised(
        self,
        steps: u8,
    ) -> Self {
        let idx = (self as usize + steps as usize).min(Self::ORDER.len() - 1);
        Self::ORDER[idx]
    }

    fn as_stderrlog(self) -> LogLevelNum {
        match self {
            LogLevel::Off => LogLevelNum::Off,
            LogLevel::Error => LogLevelNum::Error,
            LogLevel::Warn => LogLevelNum::Warn,
            LogLevel::Info => LogLevelNum::Info,
            LogLevel::Debug => LogLevelNum::Debug,
            LogLevel::Trace => LogLevelNum::Trace,
        }
    }
}

/// Logging arg group, flattened into every command.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[arg(short, long)]
    pub quiet: bool,

    /// Base log level.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Raise the log level one step per use (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Prefix log lines with a timestamp.
    #[arg(long)]
    pub timestamps: bool,
}

impl LogArgs {
    /// The effective level after `--quiet` and `-v`.
    pub fn level(&self) -> LogLevel {
        if self.quiet {
            LogLevel::Off
        } else {
            self.log_level.raised(self.verbose)
        }
    }

    /// Install the stderr logger.
    pub fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        stderrlog::new()
            .verbosity(self.level().as_stderrlog())
            .timestamp(if self.timestamps {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(clap::Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        logging: LogArgs,
    }

    fn level(args: &[&str]) -> LogLevel {
        let argv = std::iter::once("captionkit").chain(args.iter().copied());
        Cli::try_parse_from(argv).unwrap().logging.level()
    }

    #[test]
    fn test_default_level() {
        assert_eq!(level(&[]), LogLevel::Info);
        assert_eq!(level(&["--log-level", "warn"]), LogLevel::Warn);
    }

    #[test]
    fn test_verbose_raises_level() {
        assert_eq!(level(&["-v"]), LogLevel::Debug);
        assert_eq!(level(&["-vvvv"]), LogLevel::Trace);
        assert_eq!(level(&["--log-level", "error", "-v"]), LogLevel::Warn);
    }

    #[test]
    fn test_quiet_wins() {
        assert_eq!(level(&["-q", "-vv"]), LogLevel::Off);
    }
}
