use anstream::{eprintln, println};
use clap::Parser;
use miette::Result;
use owo_colors::OwoColorize;
use repo_link::{
    Action, Cli, Config, ContextCache, GitCli, RepositoryContext, SystemBrowser, resolve,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    repo_link::logging::init(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let registry = config.registry()?;

    let file = std::path::absolute(&cli.file).unwrap_or_else(|_| cli.file.clone());
    let mut cache = ContextCache::new();
    let ticket = cache.begin_refresh();
    let context = RepositoryContext::discover(&GitCli::new(), &file).await?;
    cache.complete_refresh(ticket, Ok(context));

    let kind = cli.revision.unwrap_or(config.default_revision);
    let selection = cli.selection_range();

    if cli.open {
        match Action::for_revision(kind).run(&cache, &registry, selection, &SystemBrowser) {
            Some(url) => println!("{url}"),
            None => eprintln!("{}: no link available", "warning".yellow().bold()),
        }
        return Ok(());
    }

    let url = resolve(cache.current(), &registry, kind, selection)?;
    println!("{url}");

    Ok(())
}
