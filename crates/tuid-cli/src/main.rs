//! # `tuid`
//!
//! Command-line front end for the [`tuid`] crate.
//!
//! ## Usage
//!
//! ```bash
//! tuid generate --type 7 --count 3
//! tuid inspect 1hsn5f08M0kXzzzyta00089Rzy07
//! tuid encode -1922 --len 2
//! tuid decode V0
//! ```

mod commands;
mod config;
mod telemetry;

use clap::Parser;

use crate::{
    config::{Action, CliArgs},
    telemetry::init_tracing,
};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let action = Action::try_from(args)?;

    init_tracing();

    let stdout = std::io::stdout();
    commands::run(action, &mut stdout.lock())
}
