use cit::cli::commands;
use cit::cli::{Cli, Commands};
use cit::core::logging;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE so piping to `head` terminates quietly instead of panicking.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    logging::init(global.verbose, global.quiet);

    match cli.command {
        Commands::Check(args) => commands::check::run(args, &global),
        Commands::Import(args) => commands::import::run(args, &global),
        Commands::Amazon(args) => commands::amazon::run(args, &global),
        Commands::Template => commands::template::run(&global),
        Commands::Config(cmd) => commands::config::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
