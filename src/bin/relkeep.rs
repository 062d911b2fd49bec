use {
    anyhow::{Context, Result},
    clap::{Args, Parser},
    log::{error, LevelFilter},
    std::io::Write,
};

#[derive(Parser)]
#[command(
    name = "relkeep",
    about = "Automated version management, changelog update, and git release process",
    version
)]
struct Relkeep {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(flatten)]
    release: relkeep::commands::release::CommandArgs,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

fn main() {
    if let Err(err) = try_main() {
        error!("Error: {err}");
        for (i, cause) in err.chain().skip(1).enumerate() {
            error!("  {}: {}", i.saturating_add(1), cause);
        }
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let relkeep = Relkeep::parse();

    let level = if relkeep.global.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(buf, "{style}{:>5}{style:#} {}", record.level(), record.args())
        })
        .init();

    let root = std::env::current_dir().context("failed to resolve the working directory")?;
    relkeep::commands::release::run(relkeep.release, &root)?;

    Ok(())
}
