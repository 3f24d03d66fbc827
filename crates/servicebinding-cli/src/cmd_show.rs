// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `sbio show` command.

use clap::Args;
use colored::Colorize;
use miette::Result;
use servicebinding::ServiceBinding;

use crate::{output, OutputFormat};

#[cfg(test)]
#[path = "./cmd_show_test.rs"]
mod cmd_show_test;

/// Display the properties of one service binding
#[derive(Debug, Args)]
pub struct CmdShow {
    /// Name of the binding directory
    name: String,

    #[clap(flatten)]
    root: crate::RootFlags,

    /// Output format
    #[clap(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Print credential values instead of masking them
    #[clap(long)]
    reveal: bool,
}

impl CmdShow {
    pub fn run(&mut self) -> Result<i32> {
        let bindings = self.root.service_bindings()?;
        let Some(binding) = find_binding(bindings, &self.name) else {
            eprintln!("{}", format!("No service binding named '{}'", self.name).red());
            return Ok(1);
        };

        let binding = output::shown(binding, self.reveal);
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&binding)
                    .map_err(|e| miette::miette!("Failed to serialize binding: {e}"))?;
                println!("{json}");
            }
            OutputFormat::Table => self.show_table(&binding),
        }
        Ok(0)
    }

    fn show_table(&self, binding: &ServiceBinding) {
        println!("{} {}", "Service Binding:".bold(), self.name.cyan());
        if let Some(service) = binding.service_name() {
            println!("  type: {}", service.green());
        }
        if let Some(plan) = binding.service_plan() {
            println!("  plan: {}", plan.yellow());
        }
        println!();

        println!("{}", "Properties:".bold());
        for (key, value) in binding.properties() {
            if key == binding.credentials_key() {
                continue;
            }
            println!("  {} = {}", key.cyan(), output::format_value(value));
        }

        println!();
        println!("{}", "Credentials:".bold());
        for (key, value) in binding.credentials() {
            println!("  {} = {}", key.cyan(), output::format_value(value));
        }
    }
}

/// The binding whose directory is called `name`.
fn find_binding(bindings: Vec<ServiceBinding>, name: &str) -> Option<ServiceBinding> {
    bindings
        .into_iter()
        .find(|binding| binding.name() == Some(name))
}
