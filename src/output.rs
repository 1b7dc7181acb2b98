//! Output formatting for CLI display.
//!
//! [`Printer`] renders API records as JSON, YAML, or human-readable text.
//! Lists become `tabled` tables; single records use the [`PrettyPrint`]
//! key-value layout.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::error::Result;
use crate::{Eula, Product, Release, ReleaseDependency, ReleaseUpgradePath};

/// Output format selected with `--format`.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tables for lists, key-value text for single records.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display in table mode.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

/// Writes command results to an output stream in the selected format.
pub struct Printer<W> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Consume the printer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a single record.
    pub fn print_single<T: Serialize + PrettyPrint>(&mut self, item: &T) -> Result<()> {
        match self.format {
            OutputFormat::Table => writeln!(self.out, "{}", item.pretty_print())?,
            OutputFormat::Json => self.write_json(item)?,
            OutputFormat::Yaml => self.write_yaml(item)?,
        }
        Ok(())
    }

    /// Print a collection, converting each item to a table row in table mode.
    pub fn print_list<T, R, F>(&mut self, items: &[T], to_row: F) -> Result<()>
    where
        T: Serialize,
        R: Tabled,
        F: Fn(&T) -> R,
    {
        match self.format {
            OutputFormat::Table => {
                let rows: Vec<R> = items.iter().map(to_row).collect();
                writeln!(self.out, "{}", Table::new(rows))?;
            }
            OutputFormat::Json => self.write_json(items)?,
            OutputFormat::Yaml => self.write_yaml(items)?,
        }
        Ok(())
    }

    /// Print a confirmation line for a mutating command.
    ///
    /// Structured formats stay silent so their output remains parseable.
    pub fn print_confirmation(&mut self, message: &str) -> Result<()> {
        if self.format == OutputFormat::Table {
            writeln!(self.out, "{message}")?;
        }
        Ok(())
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        writeln!(self.out, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    fn write_yaml<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        write!(self.out, "{}", serde_yaml::to_string(value)?)?;
        Ok(())
    }
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

impl PrettyPrint for Product {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Product: {}", self.slug));
        lines.push(format!("ID:             {}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.join("\n")
    }
}

impl PrettyPrint for Release {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Release: {}", self.version));
        lines.push(format!("ID:             {}", self.id));

        if let Some(ref release_type) = self.release_type {
            lines.push(format!("Type:           {}", release_type));
        }

        if let Some(ref date) = self.release_date {
            lines.push(format!("Released:       {}", date));
        }

        if let Some(ref availability) = self.availability {
            lines.push(format!("Availability:   {}", availability));
        }

        if let Some(ref eula) = self.eula {
            lines.push(format!("EULA:           {}", eula.slug));
        }

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }

        if let Some(ref url) = self.release_notes_url {
            lines.push(format!("Release Notes:  {}", url));
        }

        if self.controlled {
            lines.push("Controlled:     yes".to_string());
        }

        if let Some(ref updated) = self.updated_at {
            lines.push(format!("Updated:        {}", updated.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Eula {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("EULA: {}", self.slug));
        lines.push(format!("ID:             {}", self.id));
        lines.push(format!("Name:           {}", self.name));

        if let Some(ref content) = self.content {
            lines.push(String::new());
            lines.push(content.clone());
        }

        lines.join("\n")
    }
}

// Table row types for list output

#[derive(Tabled)]
pub struct ProductRow {
    id: u64,
    slug: String,
    name: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            slug: p.slug.clone(),
            name: p.name.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct ReleaseRow {
    id: u64,
    version: String,
    #[tabled(rename = "type")]
    release_type: String,
    date: String,
}

impl From<&Release> for ReleaseRow {
    fn from(r: &Release) -> Self {
        Self {
            id: r.id,
            version: r.version.clone(),
            release_type: r.release_type.clone().unwrap_or_default(),
            date: r.release_date.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct EulaRow {
    id: u64,
    slug: String,
    name: String,
}

impl From<&Eula> for EulaRow {
    fn from(e: &Eula) -> Self {
        Self {
            id: e.id,
            slug: e.slug.clone(),
            name: e.name.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct ReleaseDependencyRow {
    id: u64,
    version: String,
    #[tabled(rename = "product id")]
    product_id: u64,
    #[tabled(rename = "product name")]
    product_name: String,
}

impl From<&ReleaseDependency> for ReleaseDependencyRow {
    fn from(d: &ReleaseDependency) -> Self {
        Self {
            id: d.release.id,
            version: d.release.version.clone(),
            product_id: d.release.product.id,
            product_name: d.release.product.name.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct UpgradePathRow {
    id: u64,
    version: String,
}

impl From<&ReleaseUpgradePath> for UpgradePathRow {
    fn from(u: &ReleaseUpgradePath) -> Self {
        Self {
            id: u.release.id,
            version: u.release.version.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct ReleaseTypeRow {
    #[tabled(rename = "release type")]
    release_type: String,
}

impl From<&String> for ReleaseTypeRow {
    fn from(t: &String) -> Self {
        Self {
            release_type: t.clone(),
        }
    }
}
