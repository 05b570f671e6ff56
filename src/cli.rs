use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pdf::removal::DuplicatePolicy;

#[derive(Parser)]
#[command(name = "pdfcut")]
#[command(about = "Remove pages from PDF files, with MCP server support")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// How repeated page numbers in one request are handled
    #[arg(long, global = true, value_enum, default_value_t = DuplicatePolicy::Collapse)]
    pub duplicates: DuplicatePolicy,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server (primary mode)
    Mcp,

    /// Remove pages from a PDF, rewriting it in place
    #[command(alias = "rm")]
    Remove {
        /// PDF file to modify
        path: PathBuf,

        /// Pages to remove (e.g., "2,4" or "1-3,end")
        pages: String,
    },
}
