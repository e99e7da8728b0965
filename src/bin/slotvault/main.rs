use clap::Parser;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod cmd_backup;
mod cmd_delete;
mod cmd_describe;
mod cmd_list;
mod cmd_rehash;
mod cmd_restore;
mod cmd_sessions;
mod key;

fn init_logger() {
    // Level comes from RUST_LOG, default info.
    // Example: RUST_LOG=debug slotvault ...
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Backup { store, session, source, description, ignore } =>
            cmd_backup::exec(store, session, source, description, ignore),

        cli::Cmd::List { store, session, json } =>
            cmd_list::exec(store, session, json),

        cli::Cmd::Sessions { store, json } =>
            cmd_sessions::exec(store, json),

        cli::Cmd::Restore { store, session, id, short_hash, long_hash, target } =>
            cmd_restore::exec(store, session, key::pick(id, short_hash, long_hash)?, target),

        cli::Cmd::Delete { store, session, id, short_hash, long_hash } =>
            cmd_delete::exec(store, session, key::pick(id, short_hash, long_hash)?),

        cli::Cmd::Describe { store, session, id, short_hash, long_hash, text } =>
            cmd_describe::exec(store, session, key::pick(id, short_hash, long_hash)?, text),

        cli::Cmd::Rehash { store, session, id, short_hash, long_hash, ignore } =>
            cmd_rehash::exec(store, session, key::pick(id, short_hash, long_hash)?, ignore),
    }
}
