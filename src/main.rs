use std::io::{self, Lines, StdinLock, Write};

use anyhow::{Context, Result, anyhow};
use horoscope::{
    DateInput, Month, ParseError, ParsedDate, Year, ZodiacSign, api, generate_fortune,
    parse_date_string, resolve_by_name_or_alias, validate_day, validate_month, validate_year,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// Log directive used when `HOROSCOPE_LOG` is unset
const DEFAULT_LOG_DIRECTIVE: &str = "horoscope=info";

const USAGE: &str = "\
Usage:
  horoscope                      interactive reading
  horoscope date <birth date>    sign and fortune for a date
  horoscope sign <name>          details for a sign
  horoscope api <month> <day>    JSON envelope of the horoscope endpoint";

const FORMATS: &str = "\
Supported date formats:
  12/25/1990  or 12-25-1990    month first
  25/12/1990  or 25-12-1990    day first, when month first is impossible
  1990-12-25                   ISO
  December 25, 1990            month name, day, optional year
  25 December 1990             day, month name, optional year
Two-digit years 00-49 mean 2000-2049, 50-99 mean 1950-1999.";

fn main() -> Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let config = load_configuration()?;
    initialize_logging(&config.log_directive)?;

    let mut rng = match config.fortune_seed {
        Some(seed) => {
            info!(seed, "using seeded fortunes");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.split_first() {
        None => interactive(&mut rng),
        Some((command, rest)) => match command.as_str() {
            "date" => reading_for(&rest.join(" "), &mut rng),
            "sign" => describe_sign(&rest.join(" ")),
            "api" => api_request(rest, &mut rng),
            "help" | "--help" | "-h" => {
                println!("{USAGE}");
                Ok(())
            }
            other => Err(anyhow!("Unknown command \"{other}\"\n\n{USAGE}")),
        },
    }
}

/// Configuration loaded from environment variables
struct Config {
    log_directive: String,
    fortune_seed:  Option<u64>,
}

/// Load configuration from environment variables
fn load_configuration() -> Result<Config> {
    let log_directive =
        std::env::var("HOROSCOPE_LOG").unwrap_or_else(|_| DEFAULT_LOG_DIRECTIVE.to_owned());

    let fortune_seed = std::env::var("HOROSCOPE_SEED")
        .ok()
        .map(|seed| {
            seed.trim()
                .parse::<u64>()
                .with_context(|| format!("HOROSCOPE_SEED must be an unsigned integer, got {seed:?}"))
        })
        .transpose()?;

    Ok(Config {
        log_directive,
        fortune_seed,
    })
}

/// Initialize the logging system; logs go to stderr so readings stay clean
fn initialize_logging(directive: &str) -> Result<()> {
    let directive: tracing_subscriber::filter::Directive = directive
        .parse()
        .with_context(|| format!("invalid log directive {directive:?}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn report(error: &ParseError) -> anyhow::Error {
    anyhow!("{error}\n{}", error.suggestion())
}

fn reading_for(input: &str, rng: &mut StdRng) -> Result<()> {
    let date = parse_date_string(input)
        .and_then(ParsedDate::into_full)
        .map_err(|e| report(&e))?;
    print_reading(date, rng);
    Ok(())
}

fn describe_sign(name: &str) -> Result<()> {
    let found = resolve_by_name_or_alias(name).map_err(|e| match e.suggestion() {
        Some(suggestion) => anyhow!("{e}. Did you mean \"{suggestion}\"?"),
        None => anyhow!("{e}"),
    })?;
    debug!(name, kind = %found.kind, "sign resolved");
    print_sign(found.sign);
    Ok(())
}

fn api_request(args: &[String], rng: &mut StdRng) -> Result<()> {
    let [month, day] = args else {
        return Err(anyhow!("api expects <month> <day>\n\n{USAGE}"));
    };
    let response = api::horoscope_by_date(month, day, rng);
    let body = serde_json::to_string_pretty(&response).context("failed to encode response")?;
    println!("{body}");
    if response.is_success() {
        Ok(())
    } else {
        Err(anyhow!("request failed with status {}", response.status_code()))
    }
}

fn print_sign(sign: &ZodiacSign) {
    println!("{sign}  {}", sign.range().describe());
    println!("Element:       {}", sign.element());
    println!("Ruling planet: {}", sign.ruling_planet());
    println!("Traits:        {}", sign.traits().join(", "));
    println!("Today:         {}", sign.daily_reading());
}

fn print_reading(date: DateInput, rng: &mut StdRng) {
    let sign = date.zodiac_sign();
    info!(%date, sign = sign.name(), "reading");
    println!();
    print_sign(sign);
    println!();
    println!("{}", generate_fortune(sign, rng));
}

/// Line-oriented prompts over stdin. `None` from any prompt means end of input.
struct Console {
    lines: Lines<StdinLock<'static>>,
}

impl Console {
    fn new() -> Self {
        Self {
            lines: io::stdin().lines(),
        }
    }

    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        print!("{question}");
        io::stdout().flush().context("failed to flush stdout")?;
        self.lines
            .next()
            .transpose()
            .context("failed to read stdin")
            .map(|line| line.map(|line| line.trim().to_owned()))
    }

    /// Asks until `validate` accepts the answer, printing each error's hint.
    fn ask<T>(
        &mut self,
        question: &str,
        validate: impl Fn(&str) -> Result<T, ParseError>,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(question)? else {
                return Ok(None);
            };
            match validate(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(error) => println!("{}", report(&error)),
            }
        }
    }

    fn birth_date(&mut self) -> Result<Option<DateInput>> {
        loop {
            let Some(answer) = self.prompt(
                "Enter your birth date (Enter for step by step, 'help' for formats): ",
            )?
            else {
                return Ok(None);
            };
            if answer.eq_ignore_ascii_case("help") {
                println!("{FORMATS}");
                continue;
            }
            if answer.is_empty() {
                return self.components(None);
            }
            match parse_date_string(&answer) {
                Ok(ParsedDate::Full(date)) => return Ok(Some(date)),
                Ok(ParsedDate::MonthOnly(month)) => return self.components(Some(month)),
                Err(error) => println!("{}", report(&error)),
            }
        }
    }

    fn components(&mut self, month: Option<Month>) -> Result<Option<DateInput>> {
        let month = match month {
            Some(month) => month,
            None => match self.ask("Month (1-12 or name): ", validate_month)? {
                Some(month) => month,
                None => return Ok(None),
            },
        };
        let Some(year) = self.ask("Year (optional, Enter to skip): ", validate_year)? else {
            return Ok(None);
        };
        let question = format!("Day of {} (1-{}): ", month.name(), month.max_days(year));
        let Some(day) = self.ask(&question, |input| validate_day(input, month, year))? else {
            return Ok(None);
        };
        DateInput::new(month.get(), day.get(), year.map(Year::get))
            .map(Some)
            .map_err(|e| report(&e))
    }
}

fn interactive(rng: &mut StdRng) -> Result<()> {
    let mut console = Console::new();
    println!("Welcome to the Galactic Horoscope");
    loop {
        let Some(date) = console.birth_date()? else {
            return Ok(());
        };
        print_reading(date, rng);
        match console.prompt("\nWould you like another reading? (y/n): ")? {
            Some(answer) if matches!(answer.to_lowercase().as_str(), "y" | "yes") => {}
            _ => {
                println!("May the stars guide you.");
                return Ok(());
            }
        }
    }
}
