pub mod aggregate;
pub mod error;
pub mod model;
pub mod motion;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod sanitize;
pub mod trajectory;

use anyhow::{anyhow, Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use log::{info, trace, warn};
use model::{NavigationalStatus, Record};
use pipeline::{Outcome, Pipeline, PipelineConfig};
use rayon::prelude::*;
use report::DistanceUnit;
use std::fs::File;
use std::io::{BufWriter, Read};

#[derive(Debug)]
pub struct Config {
    pub paths: Vec<String>,
    pub pipeline: PipelineConfig,
    pub unit: DistanceUnit,
    pub top: usize,
    pub csv_out: Option<String>,
}

fn parse_status(label: &str) -> Result<NavigationalStatus> {
    match label.parse::<NavigationalStatus>() {
        Ok(NavigationalStatus::Other) | Err(_) => {
            Err(anyhow!("unknown navigational status '{label}'"))
        }
        Ok(status) => Ok(status),
    }
}

fn command() -> Command {
    Command::new("vessel-route")
        .version(env!("CARGO_PKG_VERSION"))
        .about("find the vessel that travelled farthest in AIS position reports [csv]")
        .arg(
            Arg::new("paths")
                .short('f')
                .long("file-path")
                .action(ArgAction::Append)
                .required(true)
                .help("AIS csv file, one reporting period each"),
        )
        .arg(
            Arg::new("max-speed")
                .long("max-speed")
                .value_parser(value_parser!(f64))
                .default_value("44.448")
                .help("implied speed ceiling in km/h, inclusive"),
        )
        .arg(
            Arg::new("exclude-status")
                .long("exclude-status")
                .action(ArgAction::Append)
                .value_parser(parse_status)
                .help("navigational status to drop, replaces the default set"),
        )
        .arg(
            Arg::new("unit")
                .short('u')
                .long("unit")
                .value_parser(|s: &str| s.parse::<DistanceUnit>())
                .default_value("km")
                .help("reporting unit: km, nm or mi"),
        )
        .arg(
            Arg::new("top")
                .short('n')
                .long("top")
                .value_parser(value_parser!(usize))
                .default_value("1")
                .help("number of ranked vessels to print"),
        )
        .arg(
            Arg::new("threads")
                .short('j')
                .long("threads")
                .value_parser(value_parser!(usize))
                .help("worker threads"),
        )
        .arg(
            Arg::new("csv-out")
                .long("csv-out")
                .help("also write the ranking to this csv file"),
        )
}

pub fn get_arg() -> Result<Config> {
    config_from(command().get_matches())
}

fn config_from(matches: clap::ArgMatches) -> Result<Config> {
    let paths = matches
        .get_many::<String>("paths")
        .unwrap_or_default()
        .cloned()
        .collect::<Vec<String>>();

    let mut pipeline = PipelineConfig {
        threads: matches.get_one::<usize>("threads").copied(),
        ..PipelineConfig::default()
    };
    if let Some(max_speed) = matches.get_one::<f64>("max-speed") {
        pipeline.max_speed_kmh = *max_speed;
    }
    if let Some(statuses) = matches.get_many::<NavigationalStatus>("exclude-status") {
        pipeline.excluded_statuses = statuses.copied().collect();
    }

    Ok(Config {
        paths,
        pipeline,
        unit: matches
            .get_one::<DistanceUnit>("unit")
            .copied()
            .unwrap_or_default(),
        top: matches.get_one::<usize>("top").copied().unwrap_or(1),
        csv_out: matches.get_one::<String>("csv-out").cloned(),
    })
}

pub fn run(config: Config) -> Result<()> {
    info!("config is {:?}", config);

    let pipeline = Pipeline::new(config.pipeline.clone())?;

    let outcomes = pipeline.install(|| {
        config
            .paths
            .par_iter()
            .map(|path| process_file(path, &pipeline))
            .collect::<Result<Vec<Outcome>>>()
    })?;

    let mut rankings = Vec::with_capacity(outcomes.len());
    for (path, outcome) in config.paths.iter().zip(outcomes) {
        let ranking = outcome.ranking();
        match ranking.first() {
            Some(top) => {
                info!(
                    "{}: longest route {} with {:.3} km",
                    path, top.mmsi, top.total_km
                );
                println!("{path}");
                print!("{}", report::render_table(&ranking, config.unit, config.top));
                if let Some(tie) = report::describe_tie(&outcome.leaders(), config.unit) {
                    info!("{path}: {tie}");
                    println!("{tie}");
                }
            }
            None => println!("{path}: no result, no vessel has an accepted segment"),
        }
        rankings.push((path.clone(), ranking));
    }

    if let Some(out) = &config.csv_out {
        let file = File::create(out).with_context(|| format!("failed to create {out}"))?;
        report::write_csv(BufWriter::new(file), &rankings, config.unit, config.top)?;
        info!("ranking written to {out}");
    }

    Ok(())
}

pub fn process_file(path: &str, pipeline: &Pipeline) -> Result<Outcome> {
    let file = File::open(path).with_context(|| format!("failed to open file {path}"))?;
    let outcome = process_reader(file, pipeline).with_context(|| format!("failed to read {path}"))?;

    let stats = &outcome.stats;
    info!(
        "{}: {} records passed, {} dropped; {} vessels, {} of {} segments accepted",
        path,
        stats.accepted_records,
        stats.rejected_records(),
        stats.vessels,
        stats.accepted_segments,
        stats.segments
    );
    if stats.rejected_segments() > 0 {
        info!(
            "{}: segments dropped: {} non-positive elapsed time, {} implausible speed",
            path, stats.non_positive_elapsed, stats.implausible_speed
        );
    }

    Ok(outcome)
}

/// Reads AIS csv (with a header row) from `reader` and runs it through the
/// pipeline. Rows that fail to decode are counted as malformed; I/O errors
/// abort.
pub fn process_reader<R: Read>(reader: R, pipeline: &Pipeline) -> Result<Outcome> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut undecodable = 0;
    for result in rdr.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("skipping unreadable row: {e}");
                undecodable += 1;
                continue;
            }
        };
        match row.deserialize::<Record>(None) {
            Ok(record) => records.push(record),
            Err(e) => {
                trace!("record dropped: {e}");
                undecodable += 1;
            }
        }
    }

    let mut outcome = pipeline.run(records);
    outcome.stats.malformed += undecodable;
    Ok(outcome)
}
