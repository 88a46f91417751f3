//! projectory: scaffold and manage local project directories
//!
//! Every managed project lives under a single fixed root (`~/.projectory`),
//! together with the configuration file, reusable templates, and
//! post-creation hook scripts.

mod cli;
mod collect;
mod config;
mod error;
mod hooks;
mod shell;
mod store;
mod template;
mod utils;

fn main() {
    if let Err(err) = cli::run() {
        utils::ui::failure(&format!("{err:#}"));
        if let Some(hint) = err.downcast_ref::<error::Error>().and_then(error::Error::hint) {
            utils::ui::hint(&hint);
        }
        std::process::exit(1);
    }
}
