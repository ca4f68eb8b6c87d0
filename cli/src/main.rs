//! docfill CLI - fill .docx placeholders and export record summaries

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docfill::format::{DEFAULT_POSTFIX, DEFAULT_PREFIX};
use docfill::summary::union_templates;
use docfill::{
    DocumentFormatter, FormatOptions, JsonFormat, Record, Substitutions, SummaryBuilder, Template,
    TokenSyntax,
};

#[derive(Parser)]
#[command(name = "docfill")]
#[command(version)]
#[command(about = "Fill .docx placeholders and export record summaries", long_about = None)]
struct Cli {
    #[command(flatten)]
    syntax: SyntaxArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SyntaxArgs {
    /// Token prefix
    #[arg(long, global = true, env = "DOCFILL_TOKEN_PREFIX", default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Token postfix
    #[arg(long, global = true, env = "DOCFILL_TOKEN_POSTFIX", default_value = DEFAULT_POSTFIX)]
    postfix: String,
}

impl SyntaxArgs {
    fn to_syntax(&self) -> TokenSyntax {
        TokenSyntax::new()
            .with_prefix(&self.prefix)
            .with_postfix(&self.postfix)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fill placeholders in one document
    Fill {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// JSON file with values: an object or a list of {"token", "value"}
        #[arg(long, value_name = "JSON")]
        values: PathBuf,

        /// Output file (defaults to <stem>_filled.docx next to the input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Reject tokens that do not match the token syntax
        #[arg(long)]
        strict: bool,
    },

    /// Fill placeholders in several documents with the same values
    Package {
        /// Input .docx files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// JSON file with values
        #[arg(long, value_name = "JSON")]
        values: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Reject tokens that do not match the token syntax
        #[arg(long)]
        strict: bool,
    },

    /// List placeholder tokens found in a document
    Tokens {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Dump the paragraph, run and table model as JSON
    Inspect {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Export filled records to an .xlsx summary
    Summary {
        /// JSON file with a list of records
        #[arg(long, value_name = "JSON")]
        records: PathBuf,

        /// JSON file with a list of templates, or a list of lists to merge
        #[arg(long, value_name = "JSON")]
        templates: PathBuf,

        /// Title used as the filename stem
        #[arg(long)]
        title: Option<String>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let syntax = cli.syntax.to_syntax();

    let result = match cli.command {
        Commands::Fill {
            input,
            values,
            output,
            strict,
        } => cmd_fill(&input, &values, output.as_deref(), strict, syntax),
        Commands::Package {
            inputs,
            values,
            output,
            strict,
        } => cmd_package(&inputs, &values, &output, strict, syntax),
        Commands::Tokens { input, json } => cmd_tokens(&input, json, &syntax),
        Commands::Inspect { input, compact } => cmd_inspect(&input, compact),
        Commands::Summary {
            records,
            templates,
            title,
            output,
        } => cmd_summary(&records, &templates, title.as_deref(), output.as_deref()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn formatter(strict: bool, syntax: TokenSyntax) -> DocumentFormatter {
    let mut options = FormatOptions::new().with_syntax(syntax);
    if strict {
        options = options.strict();
    }
    DocumentFormatter::with_options(options)
}

fn read_values(path: &Path) -> Result<Substitutions, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let subs: Substitutions = serde_json::from_str(&text)
        .map_err(|e| format!("Invalid values file {}: {}", path.display(), e))?;
    Ok(subs)
}

fn read_templates(path: &Path) -> Result<Vec<Template>, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;

    let nested = value
        .as_array()
        .is_some_and(|items| items.first().is_some_and(|v| v.is_array()));
    let templates = if nested {
        let sets: Vec<Vec<Template>> = serde_json::from_value(value)?;
        union_templates(&sets)
    } else {
        serde_json::from_value(value)?
    };
    Ok(templates)
}

fn filled_name(input: &Path) -> String {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    format!("{}_filled.docx", stem)
}

/// Output names for a package, failing when two inputs would collide.
fn package_names(inputs: &[PathBuf]) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut names: Vec<String> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let name = filled_name(input);
        if let Some(i) = names.iter().position(|n| *n == name) {
            return Err(format!(
                "{} and {} would both be written to {}",
                inputs[i].display(),
                input.display(),
                name
            )
            .into());
        }
        names.push(name);
    }
    Ok(names)
}

fn cmd_fill(
    input: &Path,
    values: &Path,
    output: Option<&Path>,
    strict: bool,
    syntax: TokenSyntax,
) -> Result<(), Box<dyn std::error::Error>> {
    let subs = read_values(values)?;
    let filled = formatter(strict, syntax).format_file(input, &subs)?;

    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| input.with_file_name(filled_name(input)));
    fs::write(&path, filled)?;
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_package(
    inputs: &[PathBuf],
    values: &Path,
    output: &Path,
    strict: bool,
    syntax: TokenSyntax,
) -> Result<(), Box<dyn std::error::Error>> {
    let subs = read_values(values)?;
    let names = package_names(inputs)?;
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(inputs.len() as u64 + 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading documents...");
    let mut documents = Vec::with_capacity(inputs.len());
    for (input, name) in inputs.iter().zip(names) {
        documents.push((name, fs::read(input)?));
    }
    pb.inc(1);

    pb.set_message("Filling...");
    let filled = formatter(strict, syntax).format_package(&documents, &subs)?;

    for (name, data) in &filled {
        pb.set_message(format!("Writing {}", name));
        fs::write(output.join(name), data)?;
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, (name, _)) in filled.iter().enumerate() {
        let branch = if i + 1 == filled.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

fn cmd_tokens(input: &Path, json: bool, syntax: &TokenSyntax) -> Result<(), Box<dyn std::error::Error>> {
    let doc = docfill::parse_file(input)?;
    let tokens = doc.placeholders(syntax)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    println!("{}", "Placeholders".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for token in &tokens {
        let marker = if syntax.is_valid(token) {
            "✓".green()
        } else {
            "!".yellow()
        };
        println!("  {} {}", marker, token);
    }
    println!("{}: {}", "Total".bold(), tokens.len());

    Ok(())
}

fn cmd_inspect(input: &Path, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = docfill::parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    println!("{}", docfill::render::to_json(&doc, format)?);
    Ok(())
}

fn cmd_summary(
    records: &Path,
    templates: &Path,
    title: Option<&str>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let records: Vec<Record> = serde_json::from_str(&fs::read_to_string(records)?)?;
    let templates = read_templates(templates)?;

    let (bytes, filename) = SummaryBuilder::new().build(&records, &templates, title)?;

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let path = output_dir.join(format!("{}.xlsx", filename));
    fs::write(&path, bytes)?;
    println!(
        "{} {} ({} records, {} columns)",
        "Saved to".green(),
        path.display(),
        records.len(),
        templates.len() + 1
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docfill".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Placeholder filling for .docx documents");
    println!();
    println!("License: MIT");
}
