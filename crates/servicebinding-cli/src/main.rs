// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! sbio - servicebinding.io Service Binding Inspector

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;
use servicebinding::{ServiceBinding, ServiceBindingAccessor, ServiceBindingIoAccessor};

mod cmd_list;
mod cmd_show;
mod output;

use cmd_list::CmdList;
use cmd_show::CmdShow;

#[derive(Parser)]
#[clap(
    name = "sbio",
    about = "servicebinding.io Service Binding Inspector",
    version,
    long_about = "Inspect the service bindings that the platform mounted below SERVICE_BINDING_ROOT"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long, global = true)]
    quiet: bool,
}

/// Where to look for service bindings
#[derive(Parser, Clone, Debug, Default)]
pub struct RootFlags {
    /// Directory containing the binding directories
    #[clap(long, env = servicebinding::SERVICE_BINDING_ROOT_KEY)]
    pub root: Option<PathBuf>,
}

impl RootFlags {
    /// All bindings below the selected root directory.
    pub fn service_bindings(&self) -> Result<Vec<ServiceBinding>> {
        let accessor = match &self.root {
            Some(root) => ServiceBindingIoAccessor::with_root(root),
            None => ServiceBindingIoAccessor::new(),
        };
        tracing::debug!(root = ?accessor.root_directory(), "reading service bindings");
        Ok(accessor.get_service_bindings()?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List all discovered service bindings
    List(CmdList),

    /// Display the properties of one service binding
    Show(CmdShow),
}

impl Opt {
    fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        match self.cmd {
            Command::List(mut cmd) => cmd.run(),
            Command::Show(mut cmd) => cmd.run(),
        }
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run()?;
    std::process::exit(code);
}
