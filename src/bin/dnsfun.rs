use anyhow::{Context, Result};
use dnsfun::{
    config::Config,
    logging::LogSink,
    resolver::Resolver,
    session::Session,
    terminal::{self, Terminal},
};
use tracing::info;

fn main() -> Result<()> {
    let config = Config::default();

    let sink = LogSink::open(&config.log_file)
        .with_context(|| format!("could not open log file {}", config.log_file.display()))?;
    let resolver = Resolver::new(config.upstream).context("could not set up the resolver")?;
    info!("using upstream {}", resolver.upstream());

    let mut session = Session::new(resolver, sink, config.input_char_limit);
    let mut screen = Terminal::acquire().context("could not acquire the terminal")?;
    terminal::run(&mut session, &mut screen, true)?;
    Ok(())
}
