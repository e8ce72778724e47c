//! colstripe CLI: shred JSON records into Dremel-style column stripes.

use clap::{Parser, Subcommand};
use colstripe_core::{Field, Record, Schema};
use colstripe_split::{split, ColumnMap};
use std::fs;
use std::path::PathBuf;

mod json;
mod render;

use json::record_from_json;
use render::render_column_map;

#[derive(Parser)]
#[command(name = "colstripe")]
#[command(about = "Shred nested records into column stripes with repetition/definition levels", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split records against a schema and print per-column stripe tables
    Split {
        /// Path to the schema JSON file (the root group field)
        #[arg(short, long)]
        schema: PathBuf,

        /// Path to the records JSON file (an array of objects)
        #[arg(short, long)]
        records: PathBuf,

        /// Concatenate all records' stripes into shared columns
        #[arg(long)]
        merge: bool,
    },

    /// Validate records against a schema (required presence, type agreement)
    Validate {
        /// Path to the schema JSON file (the root group field)
        #[arg(short, long)]
        schema: PathBuf,

        /// Path to the records JSON file (an array of objects)
        #[arg(short, long)]
        records: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            schema,
            records,
            merge,
        } => {
            if let Err(e) = run_split(&schema, &records, merge) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { schema, records } => {
            if let Err(e) = run_validate(&schema, &records) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run_split(
    schema_path: &PathBuf,
    records_path: &PathBuf,
    merge: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema(schema_path)?;
    let records = load_records(&schema, records_path)?;

    let mut merged: Option<ColumnMap> = None;
    for (i, record) in records.iter().enumerate() {
        let columns = split(&schema, record).map_err(|e| format!("record {}: {}", i, e))?;
        if merge {
            match merged.as_mut() {
                Some(acc) => acc.append(columns)?,
                None => merged = Some(columns),
            }
        } else {
            println!("record {}", i);
            print!("{}", render_column_map(&columns));
        }
    }

    if let Some(columns) = merged {
        print!("{}", render_column_map(&columns));
    }

    Ok(())
}

fn run_validate(
    schema_path: &PathBuf,
    records_path: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema(schema_path)?;
    let records = load_records(&schema, records_path)?;

    for (i, record) in records.iter().enumerate() {
        split(&schema, record).map_err(|e| format!("record {}: {}", i, e))?;
        println!("✓ record {}", i);
    }

    Ok(())
}

fn load_schema(path: &PathBuf) -> Result<Schema, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let root: Field = serde_json::from_str(&content)?;
    Ok(Schema::new(root)?)
}

fn load_records(
    schema: &Schema,
    path: &PathBuf,
) -> Result<Vec<Record>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let documents: Vec<serde_json::Value> = serde_json::from_str(&content)?;
    let mut records = Vec::with_capacity(documents.len());
    for (i, document) in documents.iter().enumerate() {
        let record =
            record_from_json(schema, document).map_err(|e| format!("record {}: {}", i, e))?;
        records.push(record);
    }
    Ok(records)
}
