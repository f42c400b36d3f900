use std::io;

use clap::Args;
use sevlog::{init, Profile, Registry, TraceSetting};

#[derive(Debug, Args)]
pub struct PipeArgs {
    /// Logger prefix
    #[arg(long, short, default_value = "sevlog")]
    pub prefix: String,
}

pub fn execute(args: PipeArgs) -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);
    Registry::global().set_trace(TraceSetting::All);

    let log = sevlog::logger_for(&args.prefix);
    let mut out = log.trace_out();
    io::copy(&mut io::stdin().lock(), &mut out)?;
    out.close();
    Ok(())
}
