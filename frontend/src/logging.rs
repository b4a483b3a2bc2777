use chrono::Local;
use env_logger::Target;
use log::LevelFilter;
use std::io::Write;
use std::path::Path;

/// Installs the process logger, appending to `file` when given and writing to stderr otherwise.
///
/// `RUST_LOG` takes precedence over `level`. Installing twice is not an error.
pub fn init(level: LevelFilter, file: Option<&Path>) -> std::io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{style}[{}] [{:5}]{style:#} {}",
                Local::now().format("%T%.3f"),
                record.level(),
                record.args(),
                style = buf.default_level_style(record.level()),
            )
        });

    match file {
        Some(path) => {
            let file = std::fs::OpenOptions::new().append(true).create(true).open(path)?;
            builder.target(Target::Pipe(Box::new(std::io::BufWriter::new(file))));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    let _ = builder.try_init();
    Ok(())
}
