//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::io;

use huffzip::compression::compress::compress_file;
use huffzip::compression::decompress::decompress_file;
use huffzip::tools::cli::{huffopts_init, Mode};

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), io::Error> {
    // Available log levels are Error, Warn, Info, Debug, Trace. The command line narrows this
    // down. Logs go to stderr so --stdout output stays clean.
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let opts = huffopts_init();

    //----- Figure how what we need to do and go do it, one file at a time
    let mut result = Ok(());
    for file in &opts.files {
        let outcome = match opts.op_mode {
            Mode::Zip => compress_file(&opts, file),
            Mode::Unzip => decompress_file(&opts, file),
        };
        if let Err(e) = outcome {
            error!("{}: {}", file, e);
            result = Err(e);
        }
    }

    info!("Done.");
    result
}
