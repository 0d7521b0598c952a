use anyhow::Context;
use clap::{Parser, Subcommand};
use jsnlog_config::{AppRoot, CompileOptions, Configuration, Result, compile};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jsnlog-config")]
#[command(about = "Compile a jsnlog configuration into its page-load script", long_about = None)]
struct Cli {
    /// Log debug output from the compiler.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(clap::Args)]
struct CompileArgs {
    #[arg(long)]
    config: String,

    /// Client ip passed to `JL.setOptions`; omitted when empty.
    #[arg(long, default_value = "")]
    user_ip: String,

    /// Request id passed to `JL.setOptions`; omitted when empty.
    #[arg(long, default_value = "")]
    request_id: String,

    /// Emit statements at top level instead of inside the guarded wrapper.
    #[arg(long)]
    no_closure: bool,

    /// Absolute root that `~` in virtual paths resolves to.
    #[arg(long, default_value = "/")]
    app_root: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the configuration script.
    Compile {
        #[command(flatten)]
        args: CompileArgs,

        /// Output file; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },
    /// Validate a configuration without writing anything.
    Check {
        #[command(flatten)]
        args: CompileArgs,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "jsnlog_config=debug"
    } else {
        "jsnlog_config=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_compile(args: &CompileArgs) -> Result<String> {
    let config = Configuration::load(&args.config)?;
    let resolver = AppRoot::new(args.app_root.as_str());
    let options = CompileOptions {
        user_ip: &args.user_ip,
        request_id: &args.request_id,
        wrap_in_closure: !args.no_closure,
    };
    let script = compile(&config, &resolver, &options)
        .with_context(|| format!("compile {}", args.config))?;
    Ok(script)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Compile { args, out } => {
            let script = run_compile(&args)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, script).with_context(|| format!("write {}", path))?;
                    tracing::info!("Wrote {}", path);
                }
                None => print!("{}", script),
            }
        }
        Commands::Check { args } => {
            run_compile(&args)?;
            println!("{}: ok", args.config);
        }
    }

    Ok(())
}
