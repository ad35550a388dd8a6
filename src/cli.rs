// src/cli.rs
// Command-line surface. One subcommand per page kind:
//
//   swim_scrape teams
//   swim_scrape roster <team-url>
//   swim_scrape meets <team-url>
//   swim_scrape all-meets
//   swim_scrape meet <results-url>
//   swim_scrape swimmer <profile-url>
//
// Rows go to stdout as CSV unless -o/--out names a file; --tsv switches the
// delimiter; --season sets which graduation year reads as SR.

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail, eyre};

use crate::config::options::{ClassYears, ExportFormat, ExportOptions, ScrapeOptions};
use crate::model::{EventResult, MeetRef, Swimmer, SwimmerRef, TeamRef};
use crate::progress::Progress;
use crate::{csv, scrape};

enum Command {
    Teams,
    Roster(String),
    Meets(String),
    AllMeets,
    Meet(String),
    Swimmer(String),
}

struct Cli {
    command: Command,
    export: ExportOptions,
    opts: ScrapeOptions,
}

pub fn run() -> Result<()> {
    let cli = parse_cli()?;

    let mut progress = ConsoleProgress;
    let (headers, rows) = match &cli.command {
        Command::Teams => team_rows(scrape::collect_teams(&cli.opts, Some(&mut progress))?),
        Command::Roster(url) => roster_rows(scrape::collect_roster(url, &cli.opts)?),
        Command::Meets(url) => meet_rows(scrape::collect_meets(url, &cli.opts)?),
        Command::AllMeets => {
            url_rows(scrape::collect_all_meet_urls(&cli.opts, Some(&mut progress))?)
        }
        Command::Meet(url) => event_rows(scrape::collect_meet_results(url, &cli.opts)?),
        Command::Swimmer(url) => swimmer_rows(scrape::collect_swimmer(url, &cli.opts)?),
    };

    write_output(&cli.export, &headers, &rows)
}

fn write_output(export: &ExportOptions, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
    let sep = export.format.delim();
    match &export.out {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("create {}", path.display()))?;
            let mut w = BufWriter::new(file);
            write_rows(&mut w, export, headers, rows, sep)?;
            w.flush()?;
            eprintln!("Wrote {} rows to {}", rows.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_rows(stdout.lock(), export, headers, rows, sep)?;
        }
    }
    Ok(())
}

fn write_rows<W: Write>(
    mut w: W,
    export: &ExportOptions,
    headers: &[String],
    rows: &[Vec<String>],
    sep: char,
) -> Result<()> {
    if export.include_headers {
        csv::write_row(&mut w, headers, sep)?;
    }
    for row in rows {
        csv::write_row(&mut w, row, sep)?;
    }
    Ok(())
}

fn parse_cli() -> Result<Cli> {
    let mut command: Option<Command> = None;
    let mut export = ExportOptions::default();
    let mut opts = ScrapeOptions::default();

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "teams" => command = Some(Command::Teams),
            "roster" => command = Some(Command::Roster(want(&mut args, "roster <team-url>")?)),
            "meets" => command = Some(Command::Meets(want(&mut args, "meets <team-url>")?)),
            "all-meets" => command = Some(Command::AllMeets),
            "meet" => command = Some(Command::Meet(want(&mut args, "meet <results-url>")?)),
            "swimmer" => {
                command = Some(Command::Swimmer(want(&mut args, "swimmer <profile-url>")?));
            }
            "-o" | "--out" => {
                export.out = Some(PathBuf::from(want(&mut args, "-o <file>")?));
            }
            "--tsv" => export.format = ExportFormat::Tsv,
            "--no-headers" => export.include_headers = false,
            "--season" => {
                let year: u16 = want(&mut args, "--season <senior-year>")?
                    .parse()
                    .wrap_err("--season takes a year, e.g. 2026")?;
                opts.class_years = ClassYears::for_season(year);
            }
            "--workers" => {
                opts.workers = want(&mut args, "--workers <n>")?
                    .parse()
                    .wrap_err("--workers takes a count")?;
            }
            "-h" | "--help" => {
                eprintln!("{USAGE}");
                std::process::exit(0);
            }
            _ => bail!("Unknown arg: {a}"),
        }
    }

    let Some(command) = command else {
        eprintln!("{USAGE}");
        bail!("Specify a command");
    };
    Ok(Cli { command, export, opts })
}

fn want(args: &mut impl Iterator<Item = String>, what: &str) -> Result<String> {
    args.next().ok_or_else(|| eyre!("Missing value: {what}"))
}

const USAGE: &str = "\
Usage: swim_scrape <command> [options]

Commands:
  teams                  List all teams in the section
  roster <team-url>      List the swimmers of a team
  meets <team-url>       List the meets a team has swum
  all-meets              Crawl every meet url in the section
  meet <results-url>     Events and times of one dual meet
  swimmer <profile-url>  A swimmer's profile and history

Options:
  -o, --out <file>       Write to a file instead of stdout
      --tsv              Tab-separated output
      --no-headers       Skip the header row
      --season <year>    Graduation year that reads as SR (default 2020)
      --workers <n>      Worker threads for all-meets (default 4)
  -h, --help             This text";

/* ---------- model → rows ---------- */

fn team_rows(teams: Vec<TeamRef>) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = vec![s!("Team"), s!("Url")];
    let rows = teams.into_iter().map(|t| vec![t.name, t.url]).collect();
    (headers, rows)
}

fn roster_rows(swimmers: Vec<SwimmerRef>) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = vec![s!("Swimmer"), s!("Url")];
    let rows = swimmers.into_iter().map(|sw| vec![sw.name, sw.url]).collect();
    (headers, rows)
}

fn meet_rows(meets: Vec<MeetRef>) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = vec![s!("Date"), s!("Meet"), s!("Url")];
    let rows = meets
        .into_iter()
        .map(|m| vec![m.date, m.name, m.url])
        .collect();
    (headers, rows)
}

fn url_rows(urls: Vec<String>) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = vec![s!("Url")];
    let rows = urls.into_iter().map(|u| vec![u]).collect();
    (headers, rows)
}

fn event_rows(events: Vec<EventResult>) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = vec![
        s!("Event"),
        s!("Side"),
        s!("Time"),
        s!("Swimmer"),
        s!("Exhibition"),
    ];
    let mut rows = Vec::new();
    for event in events {
        for entry in &event.home {
            rows.push(entry_row(&event.name, "home", entry));
        }
        for entry in &event.away {
            rows.push(entry_row(&event.name, "away", entry));
        }
    }
    (headers, rows)
}

fn entry_row(event: &str, side: &str, entry: &crate::model::TimeEntry) -> Vec<String> {
    vec![
        s!(event),
        s!(side),
        entry.raw_time.clone(),
        entry.swimmer_name.clone(),
        if entry.is_exhibition { s!("ex") } else { s!() },
    ]
}

fn swimmer_rows(swimmer: Swimmer) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = vec![
        s!("Swimmer"),
        s!("Class"),
        s!("Event"),
        s!("Date"),
        s!("Seconds"),
    ];
    let mut rows = Vec::new();
    if swimmer.performances().is_empty() {
        rows.push(vec![
            swimmer.name.clone(),
            s!(swimmer.class_year.code()),
            s!(),
            s!(),
            s!(),
        ]);
    }
    for p in swimmer.performances() {
        rows.push(vec![
            swimmer.name.clone(),
            s!(swimmer.class_year.code()),
            p.event.clone(),
            p.date.format("%m/%d/%Y").to_string(),
            p.seconds.map(|v| format!("{v:.2}")).unwrap_or_default(),
        ]);
    }
    (headers, rows)
}

struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        eprintln!("Fetching {total} pages…");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, label: &str) {
        eprintln!("  done {label}");
    }
    fn item_failed(&mut self, label: &str) {
        eprintln!("  FAILED {label}");
    }
}
