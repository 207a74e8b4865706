//! Diagnostics go to stdout or the report file; logs always go to stderr.
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Variants are declared from least to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    /// `-q` wins over any number of `-v`.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, 2) => Self::Debug,
            (false, _) => Self::Trace,
        }
    }

    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter used when `RUST_LOG` is not set. Only this crate's events pass.
    fn directive(self) -> String {
        format!("allure_tree={}", self.level())
    }

    fn shows_timestamps(self) -> bool {
        self >= Self::Verbose
    }

    fn shows_source_location(self) -> bool {
        self >= Self::Debug
    }
}

pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbosity.shows_source_location())
        .with_line_number(verbosity.shows_source_location())
        .compact();

    if verbosity.shows_timestamps() {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
