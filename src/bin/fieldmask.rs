//! CLI tool for input masks and field validation.
//!
//! # Usage
//!
//! ```bash
//! # Mask a value, or replay it keystroke by keystroke
//! fieldmask mask date 25122024
//! fieldmask mask daterange 3112202001012020 --steps
//!
//! # Validate a value against a rule list
//! fieldmask validate "111.444.777-35" "required cpf"
//! fieldmask validate "s3cret" "eq password" --field password=s3cret
//!
//! # Documents and cards
//! fieldmask cpf 11144477735
//! fieldmask luhn 4532015112830366
//! fieldmask detect 4532015112830366
//!
//! # Generate test data
//! fieldmask generate cpf --count 3 --formatted
//! fieldmask generate card --brand elo
//! ```
//!
//! Set `RUST_LOG=debug` to see which rules fail and why.

use std::collections::HashMap;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use fieldmask::detect::{detect_brand, matching_brands};
use fieldmask::document::{is_valid_cnpj, is_valid_cpf, DocumentKind};
use fieldmask::generate;
use fieldmask::{
    apply_mask, luhn_checksum, validate_field, CardBrand, EditIntent, FormatId, ValidationContext,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fieldmask")]
#[command(author, version, about = "Input masks and field validation rules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply an input mask to a value
    Mask {
        /// Format identifier (date, daterange, cpf, phone, ...)
        format: FormatId,

        /// Raw field content
        value: String,

        /// Treat the edit as a deletion
        #[arg(short, long)]
        delete: bool,

        /// Replay the value one keystroke at a time
        #[arg(short, long)]
        steps: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Validate a value against a rule list
    Validate {
        /// Field content
        value: String,

        /// Whitespace-separated rules, e.g. "required email"
        rules: String,

        /// Other field values for `eq` rules, as name=value
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Date used by `today` bounds and age rules (YYYY-MM-DD)
        #[arg(short, long)]
        today: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Check if a number passes the Luhn algorithm
    Luhn {
        /// Number to check
        number: String,
    },

    /// Detect the card brand of a number
    Detect {
        /// Card number
        number: String,

        /// List every matching brand, not just the first
        #[arg(short, long)]
        all: bool,
    },

    /// Check and format a CPF
    Cpf {
        /// CPF, with or without punctuation
        value: String,
    },

    /// Check and format a CNPJ
    Cnpj {
        /// CNPJ, with or without punctuation
        value: String,
    },

    /// Generate test data (for testing only)
    Generate {
        /// What to generate
        kind: GenerateKind,

        /// Card brand, for `card`
        #[arg(short, long, default_value = "visa")]
        brand: CardBrand,

        /// How many values to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Print values with their mask applied
        #[arg(short, long)]
        formatted: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum GenerateKind {
    Card,
    Cpf,
    Cnpj,
}

fn parse_field(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", arg))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mask {
            format,
            value,
            delete,
            steps,
            output,
        } => {
            cmd_mask(format, &value, EditIntent::from_deleting(delete), steps, output);
        }
        Commands::Validate {
            value,
            rules,
            fields,
            today,
            output,
        } => {
            cmd_validate(&value, &rules, fields.into_iter().collect(), today, output);
        }
        Commands::Luhn { number } => {
            cmd_luhn(&number);
        }
        Commands::Detect { number, all } => {
            cmd_detect(&number, all);
        }
        Commands::Cpf { value } => {
            cmd_document(DocumentKind::Cpf, &value);
        }
        Commands::Cnpj { value } => {
            cmd_document(DocumentKind::Cnpj, &value);
        }
        Commands::Generate {
            kind,
            brand,
            count,
            formatted,
        } => {
            cmd_generate(kind, brand, count, formatted);
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn cmd_mask(format: FormatId, value: &str, intent: EditIntent, steps: bool, output: OutputFormat) {
    if !steps {
        let result = apply_mask(format, value, intent);
        match output {
            OutputFormat::Text => {
                println!("Value: {}", result.value);
                println!("Complete: {}", if result.is_complete { "yes" } else { "no" });
                if let Some(max) = result.max_length {
                    println!("Max Length: {}", max);
                }
            }
            OutputFormat::Json => print_json(&result),
        }
        return;
    }

    // feed the mask its own output plus one more character, as a text
    // field would
    let mut field = String::new();
    let mut history = Vec::new();
    for c in value.chars() {
        field.push(c);
        let result = apply_mask(format, &field, EditIntent::Insert);
        field.clone_from(&result.value);
        history.push((c, result));
    }

    match output {
        OutputFormat::Text => {
            for (c, result) in &history {
                let marker = if result.is_complete { " (complete)" } else { "" };
                println!("{} -> {}{}", c, result.value, marker);
            }
        }
        OutputFormat::Json => {
            let results: Vec<_> = history.into_iter().map(|(_, r)| r).collect();
            print_json(&results);
        }
    }
}

fn cmd_validate(
    value: &str,
    rules: &str,
    fields: HashMap<String, String>,
    today: Option<NaiveDate>,
    output: OutputFormat,
) {
    let mut ctx = ValidationContext::new().with_fields(&fields);
    if let Some(today) = today {
        ctx = ctx.with_today(today);
    }
    let outcome = validate_field(value, rules, &ctx);

    match output {
        OutputFormat::Text => {
            println!("Valid: {}", if outcome.valid { "yes" } else { "no" });
            if let Some(rule) = &outcome.failed_rule {
                println!("Failed Rule: {}", rule);
            }
            for (name, value) in &outcome.annotations {
                println!("{}: {}", name, value);
            }
        }
        OutputFormat::Json => print_json(&outcome),
    }

    std::process::exit(if outcome.valid { 0 } else { 1 });
}

fn cmd_luhn(number: &str) {
    if luhn_checksum(number) {
        println!("Luhn check: PASS");
        std::process::exit(0);
    } else {
        println!("Luhn check: FAIL");
        std::process::exit(1);
    }
}

fn cmd_detect(number: &str, all: bool) {
    if fieldmask::extract_digits(number).is_empty() {
        eprintln!("Error: No digits provided");
        std::process::exit(1);
    }

    if all {
        let brands = matching_brands(number);
        if brands.is_empty() {
            println!("Detected Brand: Unknown");
        }
        for brand in brands {
            println!("{} ({})", brand.display_name(), brand.name());
        }
        return;
    }

    match detect_brand(number) {
        Some(brand) => {
            println!("Detected Brand: {}", brand.display_name());
            println!("Class: {}", brand.name());
        }
        None => {
            println!("Detected Brand: Unknown");
        }
    }
}

fn cmd_document(kind: DocumentKind, value: &str) {
    let (valid, format) = match kind {
        DocumentKind::Cpf => (is_valid_cpf(value), FormatId::Cpf),
        DocumentKind::Cnpj => (is_valid_cnpj(value), FormatId::Cnpj),
    };

    if valid {
        println!("Valid: yes");
        println!("Formatted: {}", apply_mask(format, value, EditIntent::Insert).value);
        std::process::exit(0);
    } else {
        println!("Valid: no");
        println!("Error: not a valid {}", kind.name().to_uppercase());
        std::process::exit(1);
    }
}

fn cmd_generate(kind: GenerateKind, brand: CardBrand, count: usize, formatted: bool) {
    for _ in 0..count {
        let value = match kind {
            GenerateKind::Card => generate::generate_card(brand),
            GenerateKind::Cpf => generate::generate_document(DocumentKind::Cpf),
            GenerateKind::Cnpj => generate::generate_document(DocumentKind::Cnpj),
        };
        if !formatted {
            println!("{}", value);
            continue;
        }
        let format = match kind {
            GenerateKind::Card => FormatId::CreditCard,
            GenerateKind::Cpf => FormatId::Cpf,
            GenerateKind::Cnpj => FormatId::Cnpj,
        };
        println!("{}", apply_mask(format, &value, EditIntent::Insert).value);
    }
}
