// src/main.rs

//! Command line front end: prints the display string, the screen list, the
//! mode list for the target screen, and its current resolution.

use anyhow::{bail, Context, Result};
use log::info;
use serde_json::json;
use xorg_query::{DisplayLocator, ResolutionQuery};

const USAGE: &str = "\
Usage: xorg-query [OPTIONS] [SCREEN]

Query X11 screens, modes and current resolutions via XRandR.

Arguments:
  SCREEN       display identifier (N, :N, N.M or :N.M); defaults to the
               connection's current screen

Options:
  --rotated    report the rotated resolution for 90\u{b0}/270\u{b0} screens
  --json       machine readable output
  -h, --help   print this help";

struct Args {
    screen: Option<String>,
    use_rotation: bool,
    json: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args {
        screen: None,
        use_rotation: false,
        json: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--rotated" => args.use_rotation = true,
            "--json" => args.json = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(None);
            }
            other if other.starts_with('-') => bail!("unknown option `{}`", other),
            other => {
                if args.screen.is_some() {
                    bail!("at most one screen identifier expected");
                }
                args.screen = Some(other.to_string());
            }
        }
    }
    Ok(Some(args))
}

fn main() -> Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let locator = DisplayLocator::open();
    let display = locator
        .display_string()
        .context("Failed to query display string")?;
    info!("connected to display {}", display);

    let screens = locator.screens().context("Failed to list screens")?;
    let modes = locator
        .resolutions(args.screen.as_deref())
        .context("Failed to list modes")?;
    let current = locator
        .current_resolution(ResolutionQuery {
            screen: args.screen.as_deref(),
            use_rotation: args.use_rotation,
        })
        .context("Failed to query current resolution")?;

    if args.json {
        let output = json!({
            "display": display,
            "screens": screens,
            "modes": modes,
            "current": current,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("display: {}", display);
        println!("screens: {}", screens.join(" "));
        println!("modes:");
        for mode in &modes {
            println!("  {}x{} @ {:.2} Hz", mode.width, mode.height, mode.refresh);
        }
        println!("current: {}x{}", current.width, current.height);
    }

    Ok(())
}
