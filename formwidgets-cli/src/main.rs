use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use formwidgets::{
    Clock, Composition, DatePattern, DatePickerUI, Decoration, DocumentFormat, INPUT_BASE,
    MONTHS, SystemClock, UiOptions, WEEKDAYS, class_list, load_attrs_str, merge_attrs,
    month_dates,
};

#[derive(Debug, Parser)]
#[command(
    name = "formwidgets",
    version,
    about = "Month grids, input class lists and an interactive date picker"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the Sunday-first grid of one month
    Calendar {
        /// Year shown (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Month shown, 1-12 (defaults to the current month)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        /// Leave days of neighbouring months blank
        #[arg(long = "hide-offset")]
        hide_offset: bool,
        /// Emit the grid as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the class list of a decorated input
    Classes {
        #[arg(long, value_enum, default_value_t = Kind::None)]
        prepend: Kind,
        #[arg(long, value_enum, default_value_t = Kind::None)]
        append: Kind,
        #[arg(long)]
        fluid: bool,
    },
    /// Run the date picker in the terminal and print the chosen value
    Pick {
        /// Attribute spec: file path, inline payload, or "-" for stdin
        #[arg(short = 'a', long = "attrs", value_name = "SPEC")]
        attrs: Option<String>,
        /// Initial value, in the picker's format
        #[arg(long, value_name = "VALUE")]
        value: Option<String>,
        /// Title shown at the top of the UI
        #[arg(long, value_name = "TEXT")]
        title: Option<String>,
        /// Shortcut for {"format": PATTERN}, applied over --attrs
        #[arg(long, value_name = "PATTERN")]
        format: Option<String>,
        #[arg(long = "no-mouse")]
        no_mouse: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    None,
    Icon,
    Label,
    Action,
}

impl From<Kind> for Decoration {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::None => Decoration::None,
            Kind::Icon => Decoration::Icon,
            Kind::Label => Decoration::Label,
            Kind::Action => Decoration::Action,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calendar {
            year,
            month,
            hide_offset,
            json,
        } => {
            let today = SystemClock.today();
            let year = year.unwrap_or(today.year());
            let month = month.unwrap_or(today.month());
            print!("{}", render_calendar(year, month, hide_offset, json)?);
        }
        Command::Classes {
            prepend,
            append,
            fluid,
        } => {
            let composition = Composition::new(prepend.into(), append.into()).with_fluid(fluid);
            println!("{}", class_list(&INPUT_BASE, &composition));
        }
        Command::Pick {
            attrs,
            value,
            title,
            format,
            no_mouse,
        } => {
            let mut bag = json!({ "format": DatePattern::DEFAULT });
            if let Some(spec) = attrs.as_deref() {
                bag = merge_attrs(&bag, &load_attrs(spec)?);
            }
            if let Some(pattern) = format {
                bag = merge_attrs(&bag, &json!({ "format": pattern }));
            }
            let mut ui = DatePickerUI::new(bag)
                .with_options(UiOptions::default().with_mouse(!no_mouse));
            if let Some(value) = value {
                ui = ui.with_value(value);
            }
            if let Some(title) = title {
                ui = ui.with_title(title);
            }
            let chosen = ui.run().map_err(Report::msg)?;
            println!("{chosen}");
        }
    }
    Ok(())
}

/// `month` is 1-based here; the library's grid takes it zero-based.
fn render_calendar(year: i32, month: u32, hide_offset: bool, as_json: bool) -> Result<String> {
    let grid = month_dates(year, month - 1);
    if grid.is_empty() {
        return Err(eyre!("{year}-{month:02} is outside the supported date range"));
    }
    if as_json {
        let weeks = grid
            .weeks()
            .map(|week| {
                week.iter()
                    .map(|day| json!({ "date": day.date.to_string(), "offset": day.offset }))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let doc = json!({
            "year": grid.year(),
            "month": grid.month() + 1,
            "weeks": weeks,
        });
        return serde_json::to_string_pretty(&doc)
            .map(|text| text + "\n")
            .wrap_err("failed to serialise grid");
    }

    let mut out = format!("{} {}\n", MONTHS[grid.month() as usize], grid.year());
    let header = WEEKDAYS
        .iter()
        .map(|day| format!("{day:>5}"))
        .collect::<String>();
    out.push_str(header.trim_end());
    out.push('\n');
    for week in grid.weeks() {
        let line = week
            .iter()
            .map(|day| {
                let num = day.date.format("%-d").to_string();
                match (day.offset, hide_offset) {
                    (false, _) => format!("{num:>5}"),
                    (true, false) => format!("{:>5}", format!("({num})")),
                    (true, true) => " ".repeat(5),
                }
            })
            .collect::<String>();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}

fn load_attrs(spec: &str) -> Result<Value> {
    if spec == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read attributes from stdin")?;
        return parse_attrs(&buffer, DocumentFormat::default(), "attributes from stdin");
    }

    let path = PathBuf::from(spec);
    match fs::read_to_string(&path) {
        Ok(contents) => {
            let format = DocumentFormat::from_path(&path).unwrap_or_default();
            parse_attrs(&contents, format, &format!("{}", path.display()))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            parse_attrs(spec, DocumentFormat::default(), "inline attributes")
        }
        Err(err) => {
            Err(err).wrap_err_with(|| format!("failed to read attributes from {}", path.display()))
        }
    }
}

/// Tries `format` first, then every other compiled-in format.
fn parse_attrs(contents: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    match load_attrs_str(contents, format) {
        Ok(value) => Ok(value),
        Err(primary) => {
            for candidate in DocumentFormat::available_formats() {
                if candidate == format {
                    continue;
                }
                if let Ok(value) = load_attrs_str(contents, candidate) {
                    tracing::debug!(%candidate, "{label} parsed with fallback format");
                    return Ok(value);
                }
            }
            let tried = DocumentFormat::available_formats()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Err(eyre!(
                "failed to parse {label}: tried {tried} (first error: {primary:#})"
            ))
        }
    }
}
