use clap::Parser;
use frontend::control::{Session, Setup};
use janggi::display_format::DisplayFormat;
use janggi::game::StalemateRule;
use janggi::piece::Player;
use log::{LevelFilter, info};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "play janggi in the terminal")]
struct Arguments {
    #[arg(long, help = "starting position in board notation, standard opening if not specified")]
    fen: Option<String>,

    #[arg(long, default_value_t = false, help = "red moves first instead of blue")]
    red_first: bool,

    #[arg(long, default_value_t = StalemateRule::Loss, help = "outcome of having no legal move while not in check, loss or draw")]
    stalemate: StalemateRule,

    #[arg(long, default_value_t = false, help = "draw pieces with letters instead of hanja")]
    ascii: bool,

    #[arg(long, default_value_t = false, help = "disable colors and highlighting")]
    plain: bool,

    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    #[arg(long, help = "append log records to this file instead of stderr")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = Arguments::parse();
    frontend::logging::init(arguments.log_level, arguments.log_file.as_deref())?;

    let setup = Setup {
        fen: arguments.fen,
        to_move: Some(if arguments.red_first { Player::Red } else { Player::Blue }),
        stalemate: arguments.stalemate,
    };
    let format = DisplayFormat::pretty()
        .with_hanja(!arguments.ascii)
        .with_effects(!arguments.plain);

    info!("starting session with {setup:?}");
    let mut session = Session::new(setup, format)?;
    session.run(std::io::stdin().lock(), std::io::stdout().lock())?;
    Ok(())
}
