use clap::Parser;
use pathlink::StdioPrompter;
use pathlink::cli::{Cli, Commands};
use pathlink::commands::{
    configure_command, list_command, render_command, scan_command, set_command,
};
use pathlink::logging;
use tracing::error;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let args = Cli::parse();

    let log_file = match logging::create_log_file(&args.project.project) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Log file disabled: {e}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                ),
        )
        .with(log_file.map(|file| {
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_level(true)
                .with_filter(EnvFilter::new("debug"))
        }))
        .init();

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Cli) -> pathlink::Result<()> {
    let config = args.project.resolve()?;
    let mut stdout = std::io::stdout();

    match args.cmd {
        Commands::Configure => {
            let stdin = std::io::stdin();
            let mut prompter = StdioPrompter::new(stdin.lock(), std::io::stdout());
            configure_command(&config, &mut prompter)?;
        }
        Commands::Scan => scan_command(&config, &mut stdout)?,
        Commands::List => list_command(&config, &mut stdout)?,
        Commands::Set { logical, target } => {
            set_command(&config, &logical, &target)?;
        }
        Commands::Render { watch } => render_command(&config, watch)?,
    }
    Ok(())
}
