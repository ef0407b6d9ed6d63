use log::LevelFilter;

/// Installs the `env_logger` backend for the `log` macros.
///
/// Warnings and errors only by default, `RUST_LOG` can raise that, and
/// `--debug` forces debug output whatever `RUST_LOG` says.
pub fn init(debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn).parse_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}
