// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `sbio list` command.

use clap::Args;
use colored::Colorize;
use miette::Result;
use servicebinding::ServiceBinding;

use crate::{output, OutputFormat};

/// List all discovered service bindings
#[derive(Debug, Args)]
pub struct CmdList {
    #[clap(flatten)]
    root: crate::RootFlags,

    /// Output format
    #[clap(long, value_enum, default_value_t)]
    format: OutputFormat,
}

impl CmdList {
    pub fn run(&mut self) -> Result<i32> {
        let bindings = self.root.service_bindings()?;

        match self.format {
            OutputFormat::Json => self.show_json(&bindings)?,
            OutputFormat::Table => self.show_table(&bindings),
        }
        Ok(0)
    }

    fn show_table(&self, bindings: &[ServiceBinding]) {
        println!("{}", "Service Bindings:".bold());
        println!();

        if bindings.is_empty() {
            println!("  {}", "(no bindings)".dimmed());
        }
        for binding in bindings {
            let name = binding.name().unwrap_or("<unnamed>");
            let service = binding.service_name().unwrap_or("-");
            let plan = binding
                .service_plan()
                .map(|plan| format!(" [{plan}]"))
                .unwrap_or_default();
            println!("  {} {}{}", name.cyan(), service.green(), plan.yellow());

            let tags = binding.tags();
            if !tags.is_empty() {
                println!("     tags: {}", tags.join(", ").dimmed());
            }
            let credentials: Vec<_> = binding.credentials().keys().map(String::as_str).collect();
            println!("     credentials: {}", credentials.join(", ").dimmed());
        }

        println!();
        println!("Total: {} binding(s)", bindings.len());
    }

    fn show_json(&self, bindings: &[ServiceBinding]) -> Result<()> {
        let summaries: Vec<_> = bindings.iter().map(output::summary).collect();
        let json = serde_json::to_string_pretty(&summaries)
            .map_err(|e| miette::miette!("Failed to serialize bindings: {e}"))?;
        println!("{json}");
        Ok(())
    }
}
