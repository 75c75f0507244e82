#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `VITAE_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
vitae demo: drives the backdrop headlessly with a simulated clock

USAGE:
    vitae-demo [OPTIONS]

OPTIONS:
    --frames=N           Frames to simulate (default: 600)
    --fps=N              Simulated frame rate (default: 60)
    --size=WxH           Canvas size in pixels (default: 1280x720)
    --stall-every=N      Add a 50 ms stall every N frames (default: 0, off)
    --overlay            Attach the text overlay and print it at the end
    --adaptive           Enable the closed-loop shape budget
    --mobile             Treat the device as mobile
    --low-end            Treat the device as low-end
    --reduced-motion     Freeze the field
    --links              Draw links between nearby shapes
    --glow               Draw the shape glow (ignored on mobile / low-end)
    --vitals             Record simulated web vitals in the report
    --json               Print the final report as JSON
    --log-json           Emit logs as JSON lines
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    VITAE_DEMO_FRAMES    Override --frames
    VITAE_DEMO_FPS       Override --fps
    VITAE_DEMO_SIZE      Override --size
    VITAE_DEMO_OVERLAY   Override --overlay (1|0)
    VITAE_DEMO_LOG_JSON  Override --log-json (1|0)
    RUST_LOG             Log filter (default: info)

Field, governor and device variables (VITAE_SEED, VITAE_SHAPE_COUNT,
VITAE_PERF_LOG_INTERVAL_MS, VITAE_DEVICE_MOBILE, ...) are honored as well.";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub frames: u64,
    pub fps: u32,
    pub width: f64,
    pub height: f64,
    /// Stall period in frames (0 = never).
    pub stall_every: u64,
    pub overlay: bool,
    pub adaptive: bool,
    pub mobile: bool,
    pub low_end: bool,
    pub reduced_motion: bool,
    pub links: bool,
    pub glow: bool,
    pub vitals: bool,
    pub json: bool,
    pub log_json: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            frames: 600,
            fps: 60,
            width: 1280.0,
            height: 720.0,
            stall_every: 0,
            overlay: false,
            adaptive: false,
            mobile: false,
            low_end: false,
            reduced_motion: false,
            links: false,
            glow: false,
            vitals: false,
            json: false,
            log_json: false,
        }
    }
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse process arguments and environment, exiting on `--help`,
    /// `--version` or bad input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match parse_from(&args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("vitae-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }
}

/// Environment variables take precedence over defaults but are overridden
/// by explicit command-line flags.
pub fn parse_from<F>(args: &[String], lookup: F) -> Result<Command, String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();

    if let Some(val) = lookup("VITAE_DEMO_FRAMES")
        && let Ok(n) = val.trim().parse()
    {
        opts.frames = n;
    }
    if let Some(val) = lookup("VITAE_DEMO_FPS")
        && let Ok(n) = val.trim().parse::<u32>()
        && n > 0
    {
        opts.fps = n;
    }
    if let Some(val) = lookup("VITAE_DEMO_SIZE")
        && let Some((w, h)) = parse_size(val.trim())
    {
        opts.width = w;
        opts.height = h;
    }
    if let Some(val) = lookup("VITAE_DEMO_OVERLAY") {
        opts.overlay = env_flag(&val);
    }
    if let Some(val) = lookup("VITAE_DEMO_LOG_JSON") {
        opts.log_json = env_flag(&val);
    }

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--overlay" => opts.overlay = true,
            "--adaptive" => opts.adaptive = true,
            "--mobile" => opts.mobile = true,
            "--low-end" => opts.low_end = true,
            "--reduced-motion" => opts.reduced_motion = true,
            "--links" => opts.links = true,
            "--glow" => opts.glow = true,
            "--vitals" => opts.vitals = true,
            "--json" => opts.json = true,
            "--log-json" => opts.log_json = true,
            other => {
                if let Some(val) = other.strip_prefix("--frames=") {
                    opts.frames = val
                        .parse()
                        .map_err(|_| format!("Invalid --frames value: {val}"))?;
                } else if let Some(val) = other.strip_prefix("--fps=") {
                    opts.fps = val
                        .parse::<u32>()
                        .ok()
                        .filter(|&n| n > 0)
                        .ok_or_else(|| format!("Invalid --fps value: {val}"))?;
                } else if let Some(val) = other.strip_prefix("--size=") {
                    let (w, h) = parse_size(val).ok_or_else(|| format!("Invalid --size value: {val}"))?;
                    opts.width = w;
                    opts.height = h;
                } else if let Some(val) = other.strip_prefix("--stall-every=") {
                    opts.stall_every = val
                        .parse()
                        .map_err(|_| format!("Invalid --stall-every value: {val}"))?;
                } else {
                    return Err(format!("Unknown argument: {other}"));
                }
            }
        }
    }

    Ok(Command::Run(opts))
}

fn env_flag(val: &str) -> bool {
    matches!(val.trim(), "1" | "true" | "yes" | "on")
}

/// `WIDTHxHEIGHT`. Validity of the numbers is left to the field.
fn parse_size(raw: &str) -> Option<(f64, f64)> {
    let (w, h) = raw.split_once(['x', 'X'])?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}
