use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use maskfield::{
    DocumentFormat, EditOp, FieldKind, FieldReport, FormDocument, MaskedField, MaskedForm,
    OutputDestination, OutputOptions, UiOptions, payment_form, read_document,
};

/// Key that stands for Backspace in `maskfield type`.
const BACKSPACE_KEY: char = '<';

#[derive(Debug, Parser)]
#[command(
    name = "maskfield",
    version,
    about = "Live-formatting masked inputs for dates, phones, times and amounts"
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Append logs to this file instead of stderr
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run raw text through an empty field and print the resulting state
    Format(FormatArgs),
    /// Replay keystrokes into a field ('<' is Backspace)
    Type(TypeArgs),
    /// Fill the payment form interactively
    Form(FormArgs),
}

#[derive(Debug, Args)]
struct FormatArgs {
    /// Field kind: date, phone, time or amount
    #[arg(short = 'k', long = "kind", value_name = "KIND")]
    kind: FieldKind,

    /// Raw text as it would sit in the input after an edit
    #[arg(value_name = "RAW", allow_hyphen_values = true)]
    raw: String,

    /// Blur the field before reporting
    #[arg(long = "blur")]
    blur: bool,
}

#[derive(Debug, Args)]
struct TypeArgs {
    /// Field kind: date, phone, time or amount
    #[arg(short = 'k', long = "kind", value_name = "KIND")]
    kind: FieldKind,

    /// Keystrokes, one character each
    #[arg(value_name = "KEYS", allow_hyphen_values = true)]
    keys: String,

    /// Print the state after every keystroke
    #[arg(long = "trace")]
    trace: bool,
}

#[derive(Debug, Args)]
struct FormArgs {
    /// Seed spec: file path, inline payload, or "-" for stdin
    #[arg(short = 'c', long = "config", alias = "data", value_name = "SPEC")]
    config: Option<String>,

    /// Title shown at the top of the UI
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact output rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Minute granularity of the time picker
    #[arg(long = "minute-step", value_name = "N", default_value_t = 5)]
    minute_step: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(&cli)?;

    match cli.command {
        Command::Format(args) => run_format(args),
        Command::Type(args) => run_type(args),
        Command::Form(args) => run_form(args),
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let fallback = match cli.verbose {
        0 => "warn",
        1 => "maskfield=debug",
        _ => "maskfield=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match cli.log_file.as_ref() {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // raw mode owns the terminal; stderr lines would tear the UI
        None if matches!(cli.command, Command::Form(_)) => {}
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn run_format(args: FormatArgs) -> Result<()> {
    let mut field = MaskedField::new(args.kind);
    let caret = args.raw.chars().count();
    let change = field.apply(EditOp::input(args.raw, caret));
    debug!(kind = %args.kind, emitted = change.is_some(), "formatted");
    if args.blur {
        field.blur();
    }
    print_report(&field.report())
}

fn run_type(args: TypeArgs) -> Result<()> {
    let mut field = MaskedField::new(args.kind);
    for key in args.keys.chars() {
        let op = if key == BACKSPACE_KEY {
            EditOp::Backspace
        } else {
            EditOp::Insert(key.to_string())
        };
        if let Some(change) = field.apply(op) {
            debug!(wire = %change.wire(), "change emitted");
        }
        if args.trace {
            print_compact(&field.report())?;
        }
    }
    if !args.trace {
        print_report(&field.report())?;
    }
    Ok(())
}

fn run_form(args: FormArgs) -> Result<()> {
    let mut diagnostics = DiagnosticCollector::default();

    let document = match args.config.as_deref() {
        Some(spec) => match load_document(spec) {
            Ok(document) => Some(document),
            Err(err) => {
                diagnostics.push_input(spec, err.to_string());
                None
            }
        },
        None => None,
    };
    let output = build_output_options(&args, &mut diagnostics);
    diagnostics.into_result()?;

    let (layout, values) = match document {
        Some(document) => (document.layout.unwrap_or_else(payment_form), Some(document.values)),
        None => (payment_form(), None),
    };

    let mut form = MaskedForm::new(layout)
        .with_options(UiOptions::default().with_minute_step(args.minute_step))
        .with_output(output);
    if let Some(title) = args.title {
        form = form.with_title(title);
    }
    if let Some(values) = values.filter(|values| !values.is_null()) {
        form = form.with_values(values);
    }

    form.run().map_err(|err| eyre!("{err:#}"))?;
    Ok(())
}

fn load_document(spec: &str) -> Result<FormDocument> {
    let value = read_document(spec).map_err(|err| eyre!("{err:#}"))?;
    FormDocument::from_value(value).map_err(|err| eyre!("{err:#}"))
}

fn build_output_options(args: &FormArgs, diagnostics: &mut DiagnosticCollector) -> OutputOptions {
    let mut destinations = Vec::new();
    let mut format: Option<DocumentFormat> = None;

    for raw in &args.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        if raw == "-" {
            destinations.push(OutputDestination::Stdout);
            continue;
        }
        let path = PathBuf::from(raw);
        match DocumentFormat::from_path(&path) {
            Some(detected) => match format {
                Some(existing) if existing != detected => diagnostics.push_output(format!(
                    "output file {} uses {detected} but other destinations use {existing}; align extensions",
                    path.display()
                )),
                _ => format = Some(detected),
            },
            None => diagnostics.push_output(format!(
                "cannot infer format from output file {}; use an extension this build supports",
                path.display()
            )),
        }
        destinations.push(OutputDestination::file(path));
    }

    if destinations.is_empty() {
        destinations.push(OutputDestination::Stdout);
    }

    OutputOptions::new(format.unwrap_or_default())
        .with_pretty(!args.no_pretty)
        .with_destinations(destinations)
}

fn print_report(report: &FieldReport) -> Result<()> {
    let rendered =
        serde_json::to_string_pretty(report).wrap_err("failed to serialize field report")?;
    println!("{rendered}");
    Ok(())
}

fn print_compact(report: &FieldReport) -> Result<()> {
    let rendered = serde_json::to_string(report).wrap_err("failed to serialize field report")?;
    println!("{rendered}");
    Ok(())
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}
