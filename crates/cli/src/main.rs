use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use input_parser::{CompoundOption, FlagOption, ParseOutcome, ParseResult, Parser, SingleOption};
use tracing_subscriber::{EnvFilter, fmt};

/// Values resolved from the command line.
#[derive(Debug)]
struct Settings {
    name: String,
    port: i32,
    color: bool,
    verbose: bool,
    tags: Vec<String>,
    weights: Vec<f64>,
}

impl Settings {
    fn from_parser(parser: &Parser) -> Result<Self> {
        Ok(Self {
            name: parser.get_value("--name").context("reading --name")?,
            port: parser.get_value("--port").context("reading --port")?,
            color: parser.get_value("--color").context("reading --color")?,
            verbose: parser.get_value("--verbose").context("reading --verbose")?,
            tags: parser.get_value("--tags").context("reading --tags")?,
            weights: parser.get_value("--weights").context("reading --weights")?,
        })
    }
}

fn build_parser() -> ParseResult<Parser> {
    let mut parser = Parser::new();
    parser
        .add_help_option()?
        .add_option(|| {
            FlagOption::new(["-v", "--verbose"])
                .add_description("Also print the type of every value.")
                .add_default_value(false)
        })?
        .add_option(|| {
            FlagOption::new(["-C", "--color"])
                .add_description("Turns colored output off (it is on by default).")
                .add_default_value(true)
        })?
        .add_option(|| {
            SingleOption::new(["-n", "--name"])
                .add_description("Who to greet.")
                .add_raw_constraint(|name| !name.trim().is_empty(), "The name cannot be empty")
        })?
        .add_option(|| {
            SingleOption::new(["-p", "--port"])
                .add_description("Port to report.")
                .add_default_value("8080")
                .to_int()
                .add_constraint(
                    |port: &i32| (1..=65535).contains(port),
                    "The port must be between 1 and 65535",
                )
        })?
        .add_option(|| {
            CompoundOption::new(["-t", "--tags"])
                .add_description("Any number of tags.")
                .add_default_value(Vec::<String>::new())
        })?
        .add_option(|| {
            CompoundOption::new(["-w", "--weights"])
                .add_description("Non-negative weights.")
                .add_default_value(["1.0"])
                .to_double()
                .add_constraint(
                    |weights: &Vec<f64>| weights.iter().all(|w| *w >= 0.0),
                    "Weights cannot be negative",
                )
        })?
        .add_option(|| {
            FlagOption::new("--describe")
                .add_description("Prints the registered options as JSON.")
                .add_default_value(false)
        })?;
    Ok(parser)
}

fn main() -> Result<ExitCode> {
    init_tracing();

    let mut parser = build_parser().context("failed to register options")?;
    let argv = std::env::args_os()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow!("argument {arg:?} is not valid UTF-8"))
        })
        .collect::<Result<Vec<_>>>()?;
    match parser.parse(argv) {
        Ok(ParseOutcome::Help(usage)) => {
            print!("{usage}");
            return Ok(ExitCode::SUCCESS);
        }
        Ok(ParseOutcome::Parsed) => {}
        Err(err) => {
            tracing::debug!(?err, "parse failed");
            eprintln!("error: {err}\n");
            eprint!("{}", parser.usage());
            return Ok(ExitCode::FAILURE);
        }
    }

    if parser.get_value::<bool>("--describe")? {
        println!("{}", serde_json::to_string_pretty(&parser.describe())?);
        return Ok(ExitCode::SUCCESS);
    }

    let settings = Settings::from_parser(&parser)?;
    tracing::debug!(?settings, "resolved settings");
    print_settings(&parser, &settings)?;
    Ok(ExitCode::SUCCESS)
}

fn print_settings(parser: &Parser, settings: &Settings) -> Result<()> {
    let greeting = format!("Hello, {}!", settings.name);
    if settings.color {
        println!("\x1b[1m{greeting}\x1b[0m");
    } else {
        println!("{greeting}");
    }
    println!("port: {}", settings.port);
    println!("tags: {}", settings.tags.join(" "));
    let weights: Vec<String> = settings.weights.iter().map(f64::to_string).collect();
    println!("weights: {}", weights.join(" "));

    if settings.verbose {
        for option in parser.options() {
            let value = option
                .get_value()
                .with_context(|| format!("reading {}", option.primary_name()))?;
            println!("{} ({}): {value}", option.primary_name(), option.value_kind());
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
