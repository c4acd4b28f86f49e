//! Hello Flags demo: bind a struct plus one ad-hoc flag, then print the result.
//!
//! Try `hello_flags --help`, `hello_flags -n 4 -n 5 --timeout 1m` or
//! `SERVER_PORT=9000 hello_flags`. Set `RUST_LOG=debug` to see where every
//! value came from.

use std::io::{self, Write};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use flagbind::{FlagOptions, FlagSet, Flags, format_duration};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Flags)]
#[flags(version, about = "Demonstrates binding struct fields to command-line flags")]
struct Config {
    #[flag(
        name = "host h",
        usage = "server host **DEPRECATED** use --listen instead",
        env = "SERVER_HOST"
    )]
    host: String,
    #[flag(
        name = "port p",
        usage = "server port **DEPRECATED** use --listen instead",
        env = "SERVER_PORT"
    )]
    port: u16,
    /// request timeout
    #[flag(name = "t")]
    timeout: Duration,
    /// enable verbose logging
    #[flag(name = "v")]
    verbose: bool,
    /// list of numbers
    #[flag(name = "numbers n")]
    numbers: Vec<i64>,
    /// IP address
    #[flag(name = "ip i")]
    ip: IpAddr,
    /// listen address
    #[flag(name = "l")]
    listen: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 8080,
            timeout: Duration::from_secs(30),
            verbose: false,
            numbers: vec![1, 2, 3],
            ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            listen: String::new(),
        }
    }
}

fn write_summary<W: Write>(out: &mut W, config: &Config, debug: bool) -> io::Result<()> {
    writeln!(out, "Configuration:")?;
    writeln!(out, "- Host: {}", config.host)?;
    writeln!(out, "- Port: {}", config.port)?;
    writeln!(out, "- Timeout: {}", format_duration(config.timeout))?;
    writeln!(out, "- Verbose: {}", config.verbose)?;
    writeln!(out, "- Numbers: {:?}", config.numbers)?;
    writeln!(out, "- IP: {}", config.ip)?;
    writeln!(out, "- Listen: {}", config.listen)?;
    writeln!(out, "- Debug: {debug}")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut config = Config::default();
    let mut debug = false;
    let parsed = {
        let options = Config::set_options()
            .build_time_rfc3339(option_env!("HELLO_FLAGS_BUILD_TIME").unwrap_or_default());
        let mut set = FlagSet::new(options);
        let registered = set.bind(&mut config).and_then(|()| {
            set.var(
                &mut debug,
                "debug",
                FlagOptions::new().shorthand('d').usage("enable debug mode"),
            )
        });
        if let Err(err) = registered {
            set.exit_with(&err);
        }
        let outcome = set.parse_or_exit();
        set.log_values();
        outcome
    };

    for deprecation in parsed.deprecations() {
        tracing::info!(flag = %deprecation.flag, "consider: {}", deprecation.reason);
    }
    let mut stdout = io::stdout().lock();
    write_summary(&mut stdout, &config, debug)?;
    Ok(())
}
