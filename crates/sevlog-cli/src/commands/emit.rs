use clap::Args;
use sevlog::{init, ChainError, Profile, Severity};
use sevlog_ops as ops;

#[derive(Debug, Args)]
pub struct EmitArgs {
    /// Severity: trace, debug, error or fatal
    #[arg(long, short, default_value = "debug")]
    pub severity: Severity,

    /// Logger prefix
    #[arg(long, short, default_value = "sevlog")]
    pub prefix: String,

    /// Run inside an operation with this name
    #[arg(long)]
    pub op: Option<String>,

    /// Operation variable as KEY=VALUE (repeatable, needs --op)
    #[arg(long = "var", value_parser = parse_var, requires = "op")]
    pub vars: Vec<(String, String)>,

    /// Log ERROR/FATAL messages as errors with a stack block
    #[arg(long)]
    pub stack: bool,

    /// Message words, joined with spaces
    #[arg(required = true)]
    pub message: Vec<String>,
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

pub fn execute(args: EmitArgs) -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    let _op = args.op.as_deref().map(|name| {
        args.vars
            .iter()
            .fold(ops::begin(name), |op, (k, v)| op.set(k.clone(), v))
    });

    let log = sevlog::logger_for(&args.prefix);
    let message = args.message.join(" ");
    match args.severity {
        Severity::Trace => log.trace(message),
        Severity::Debug => log.debug(message),
        Severity::Error if args.stack => log.error(ChainError::new(message)),
        Severity::Error => log.error(message),
        Severity::Fatal if args.stack => log.fatal(ChainError::new(message)),
        Severity::Fatal => log.fatal(message),
    }
    Ok(())
}
