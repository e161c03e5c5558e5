// SPDX-License-Identifier: AGPL-3.0-or-later
//! Diagnostic output on stderr
//!
//! `RUST_LOG` wins when set. Otherwise only warnings are shown, or debug
//! events from the fsnode crates with `--verbose`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,fsnode_core=debug,fsnode_local=debug,fsnode=debug"
    } else {
        "warn"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // a second init (tests) is not an error worth reporting
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        )
        .try_init();
}
