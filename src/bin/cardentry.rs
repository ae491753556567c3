//! CLI tool for exercising card entry fields.
//!
//! # Usage
//!
//! ```bash
//! # Reformat raw text the way the field would
//! cardentry format "1/2" --cursor 2
//!
//! # Classify an expiration date, with or without the slash
//! cardentry classify 03/25 --today 25-03
//!
//! # Replay a sequence of key presses ('<' is backspace)
//! cardentry replay "13<2/27" --today 25-03
//!
//! # Same, for a card number field
//! cardentry replay 41111111 --field card-number
//! ```

use card_entry::filter::strip_formatting;
use card_entry::{
    CardEntryField, EditDecision, ExpirationFields, ExpirationFormat, FieldFormat, FixedCalendar,
    GroupedDigitsFormat, SystemCalendar, ValidityState,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cardentry")]
#[command(author, version, about = "Live payment card field formatting tool")]
struct Cli {
    /// Pin "today" as YY-MM (defaults to the system clock)
    #[arg(short, long, global = true, value_parser = parse_today)]
    today: Option<FixedCalendar>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reformat raw field text from scratch
    Format {
        /// Raw text as displayed in the field
        text: String,

        /// Caret offset in the raw text (defaults to the end)
        #[arg(short, long)]
        cursor: Option<usize>,

        /// Kind of field
        #[arg(short, long, default_value = "expiration")]
        field: FieldKind,
    },

    /// Classify an expiration date
    Classify {
        /// Up to four digits, MMYY or MM/YY
        digits: String,
    },

    /// Replay key presses against an empty field ('<' is backspace)
    Replay {
        /// Keys to press, in order
        keys: String,

        /// Kind of field
        #[arg(short, long, default_value = "expiration")]
        field: FieldKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldKind {
    Expiration,
    CardNumber,
    SecurityCode,
}

#[derive(Serialize)]
struct FormatReport {
    text: String,
    cursor: usize,
    validity: ValidityState,
}

#[derive(Serialize)]
struct ReplayStep {
    key: String,
    decision: &'static str,
    text: String,
    cursor: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn parse_today(value: &str) -> Result<FixedCalendar, String> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| format!("expected YY-MM, got '{}'", value))?;
    let year: u8 = year.parse().map_err(|_| format!("invalid year '{}'", year))?;
    let month: u8 = month.parse().map_err(|_| format!("invalid month '{}'", month))?;
    FixedCalendar::new(year, month).ok_or_else(|| format!("date out of range: '{}'", value))
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "card_entry=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let today = cli
        .today
        .unwrap_or_else(|| FixedCalendar::snapshot(&SystemCalendar));

    match cli.command {
        Commands::Format {
            text,
            cursor,
            field,
        } => {
            let cursor = cursor.unwrap_or_else(|| text.chars().count());
            match field {
                FieldKind::Expiration => {
                    cmd_format(&ExpirationFormat::new(today), &text, cursor, cli.output)
                }
                FieldKind::CardNumber => {
                    cmd_format(&GroupedDigitsFormat::card_number(), &text, cursor, cli.output)
                }
                FieldKind::SecurityCode => {
                    cmd_format(&GroupedDigitsFormat::security_code(3), &text, cursor, cli.output)
                }
            }
        }
        Commands::Classify { digits } => {
            cmd_classify(&ExpirationFormat::new(today), &digits, cli.output);
        }
        Commands::Replay { keys, field } => match field {
            FieldKind::Expiration => cmd_replay(ExpirationFormat::new(today), &keys, cli.output),
            FieldKind::CardNumber => {
                cmd_replay(GroupedDigitsFormat::card_number(), &keys, cli.output)
            }
            FieldKind::SecurityCode => {
                cmd_replay(GroupedDigitsFormat::security_code(3), &keys, cli.output)
            }
        },
    }
}

fn cmd_format(format: &impl FieldFormat, text: &str, cursor: usize, output: OutputFormat) {
    let reformatted = format.on_text_changed(text, cursor);
    let report = FormatReport {
        text: reformatted.text,
        cursor: reformatted.cursor,
        validity: reformatted.validity,
    };

    match output {
        OutputFormat::Text => {
            println!("Text: {}", report.text);
            println!("Cursor: {}", report.cursor);
            println!("Validity: {}", report.validity);
        }
        OutputFormat::Json => print_json(&report),
    }

    if report.validity.is_impossible() {
        std::process::exit(1);
    }
}

/// Classifies `input` with separators removed; any other foreign character
/// still makes it impossible.
fn classify_input(
    format: &ExpirationFormat<FixedCalendar>,
    input: &str,
) -> (ValidityState, Option<ExpirationFields>) {
    let config = format.config();
    let digits = strip_formatting(input, |c| !config.is_formatting(c));
    let validity = format.classify(&digits);
    let fields = validity
        .is_valid()
        .then(|| format.extract_fields(&digits))
        .flatten();
    (validity, fields)
}

fn cmd_classify(format: &ExpirationFormat<FixedCalendar>, input: &str, output: OutputFormat) {
    let (validity, fields) = classify_input(format, input);

    match output {
        OutputFormat::Text => {
            println!("Validity: {}", validity);
            if let Some(fields) = &fields {
                println!("Month: {}", fields.month());
                println!("Year: {}", fields.year());
            }
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "validity": validity,
            "fields": fields,
        })),
    }

    if validity.is_impossible() {
        std::process::exit(1);
    }
}

fn cmd_replay<F: FieldFormat>(format: F, keys: &str, output: OutputFormat) {
    let mut field = CardEntryField::new(format);
    let mut steps = Vec::new();

    for key in keys.chars() {
        let decision = if key == '<' {
            field.delete_backward()
        } else {
            field.insert_text(&key.to_string())
        };

        let (name, error) = match &decision {
            EditDecision::Accept { .. } => ("accept", None),
            EditDecision::Reject(error) => ("reject", Some(error.to_string())),
            EditDecision::ForwardToNext(_) => ("forward", None),
            EditDecision::NavigateToPrevious => ("previous", None),
            EditDecision::Ignored => ("ignored", None),
        };

        steps.push(ReplayStep {
            key: if key == '<' { "<backspace>".to_string() } else { key.to_string() },
            decision: name,
            text: field.text().to_string(),
            cursor: field.selection().end,
            error,
        });
    }

    match output {
        OutputFormat::Text => {
            for step in &steps {
                match &step.error {
                    Some(error) => println!("{:<12} {:<8} {:<8} ({})", step.key, step.decision, step.text, error),
                    None => println!("{:<12} {:<8} {:<8} cursor={}", step.key, step.decision, step.text, step.cursor),
                }
            }
            println!("Validity: {}", field.validity());
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "steps": steps,
            "text": field.text(),
            "validity": field.validity(),
        })),
    }
}

fn print_json(value: &impl Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format() -> ExpirationFormat<FixedCalendar> {
        ExpirationFormat::new(FixedCalendar::new(25, 3).unwrap())
    }

    #[test]
    fn test_parse_today() {
        assert_eq!(parse_today("25-03"), Ok(FixedCalendar::new(25, 3).unwrap()));
        assert!(parse_today("2503").is_err());
        assert!(parse_today("25-13").is_err());
    }

    #[test]
    fn test_classify_accepts_formatted_input() {
        let (validity, fields) = classify_input(&format(), "03/25");
        assert_eq!(validity, ValidityState::Valid);
        assert_eq!(fields.map(|f| f.to_string()).as_deref(), Some("03/25"));

        assert_eq!(classify_input(&format(), "0325").0, ValidityState::Valid);
        assert_eq!(classify_input(&format(), "1/").0, ValidityState::Incomplete);
    }

    #[test]
    fn test_classify_rejects_foreign_characters() {
        let (validity, fields) = classify_input(&format(), "03-25");
        assert_eq!(validity, ValidityState::Impossible);
        assert!(fields.is_none());
    }
}
