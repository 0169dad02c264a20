use clap::Parser;
use cli::{Args, Commands};
use error::CliResult;
use logging::setup_logging;
use pyrene_config::{config::store_path, manager::RepoManager};
use repo::{
    check_repos, define_repos, forget_repos, list_repos, list_types, set_attributes, show_repo,
};
use utils::set_color;

mod cli;
mod error;
mod logging;
mod repo;
mod utils;

fn handle_cli() -> CliResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        set_color(false);
    }

    if let Commands::Types = args.command {
        return list_types(args.json);
    }

    let path = store_path(args.config.as_deref())?;
    let mut manager = RepoManager::open(path)?;

    match args.command {
        Commands::Define { names } => define_repos(&mut manager, &names),
        Commands::Forget { names } => forget_repos(&mut manager, &names),
        Commands::Set { name, attributes } => set_attributes(&mut manager, &name, &attributes),
        Commands::Show {
            name,
            show_password,
        } => show_repo(&manager, &name, show_password, args.json),
        Commands::List => list_repos(&manager, args.json),
        Commands::Check { names } => check_repos(&manager, &names, args.json),
        Commands::Types => list_types(args.json),
    }
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
