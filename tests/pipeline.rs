use approx::assert_relative_eq;
use vessel_route::model::NavigationalStatus;
use vessel_route::motion::haversine_km;
use vessel_route::pipeline::{Outcome, Pipeline, PipelineConfig};
use vessel_route::process_reader;

const HEADER: &str = "# Timestamp,Type of mobile,MMSI,Latitude,Longitude,Navigational status,ROT,SOG,COG,Heading,IMO,Callsign,Name,Ship type,Cargo type,Width,Length,Type of position fixing device,Draught,Destination,ETA,Data source type,A,B,C,D";

fn row(ts: &str, mmsi: &str, lat: &str, lon: &str, status: &str, sog: &str) -> String {
    format!("{ts},Class A,{mmsi},{lat},{lon},{status},0.0,{sog},180.0,180,Unknown,,NAME,Cargo,,10,50,GPS,,,,AIS,,,,")
}

fn underway(minute: u32, mmsi: &str, lat: f64, lon: f64) -> String {
    row(
        &format!("04/05/2024 10:{minute:02}:00"),
        mmsi,
        &lat.to_string(),
        &lon.to_string(),
        "Under way using engine",
        "7.5",
    )
}

fn csv(rows: &[String]) -> String {
    let mut text = HEADER.to_string();
    for r in rows {
        text.push('\n');
        text.push_str(r);
    }
    text.push('\n');
    text
}

fn run_with(config: PipelineConfig, rows: &[String]) -> Outcome {
    let pipeline = Pipeline::new(config).unwrap();
    process_reader(csv(rows).as_bytes(), &pipeline).unwrap()
}

fn run(rows: &[String]) -> Outcome {
    run_with(PipelineConfig::default(), rows)
}

#[test]
fn longest_plausible_route_wins() {
    let outcome = run(&[
        underway(0, "219000001", 55.00, 11.0),
        underway(0, "219000002", 56.00, 11.0),
        underway(10, "219000001", 55.02, 11.0),
        // ten km in ten minutes: 60 km/h
        underway(10, "219000002", 56.09, 11.0),
        underway(20, "219000001", 55.04, 11.0),
    ]);

    let expected = haversine_km(55.00, 11.0, 55.02, 11.0) + haversine_km(55.02, 11.0, 55.04, 11.0);
    let top = outcome.leader().unwrap();
    assert_eq!(top.mmsi, "219000001");
    assert_relative_eq!(top.total_km, expected, max_relative = 1e-12);

    assert_eq!(outcome.totals.get("219000002"), None);
    assert_eq!(outcome.stats.vessels, 2);
    assert_eq!(outcome.stats.segments, 3);
    assert_eq!(outcome.stats.accepted_segments, 2);
    assert_eq!(outcome.stats.implausible_speed, 1);
}

#[test]
fn input_order_does_not_matter() {
    let forward = run(&[
        underway(0, "219000001", 55.00, 11.0),
        underway(10, "219000001", 55.01, 11.01),
        underway(20, "219000001", 55.03, 11.02),
    ]);
    let shuffled = run(&[
        underway(20, "219000001", 55.03, 11.02),
        underway(0, "219000001", 55.00, 11.0),
        underway(10, "219000001", 55.01, 11.01),
    ]);
    assert_eq!(forward.totals, shuffled.totals);
    assert_eq!(shuffled.stats.accepted_segments, 2);
}

#[test]
fn tie_goes_to_smaller_identifier() {
    let outcome = run(&[
        underway(0, "219000009", 55.00, 11.0),
        underway(10, "219000009", 55.02, 11.0),
        underway(0, "219000004", 55.00, 11.0),
        underway(10, "219000004", 55.02, 11.0),
    ]);
    assert_eq!(
        outcome.totals.get("219000004"),
        outcome.totals.get("219000009")
    );
    assert_eq!(outcome.leader().unwrap().mmsi, "219000004");

    let tied: Vec<String> = outcome.leaders().into_iter().map(|r| r.mmsi).collect();
    assert_eq!(tied, vec!["219000004", "219000009"]);
}

#[test]
fn bad_rows_are_dropped_not_fatal() {
    let outcome = run(&[
        "garbage".to_string(),
        row("04/05/2024 10:00:00", "219000003", "abc", "11.0", "Under way using engine", "5.0"),
        row("04/05/2024 10:00:00", "219000003", "55.0", "11.0", "Moored", "5.0"),
        row("04/05/2024 10:00:00", "219000003", "55.0", "11.0", "At anchor", "5.0"),
        row("04/05/2024 10:00:00", "219000003", "55.0", "11.0", "Reserved for future use", "5.0"),
        row("04/05/2024 10:00:00", "219000003", "55.0", "191.0", "Under way using engine", "5.0"),
        row("04/05/2024 10:00:00", "219000003", "55.0", "11.0", "Under way using engine", "0"),
        row("2024-05-04 10:00", "219000003", "55.0", "11.0", "Under way using engine", "5.0"),
        underway(0, "219000001", 55.00, 11.0),
        underway(10, "219000001", 55.02, 11.0),
    ]);

    let stats = outcome.stats;
    assert_eq!(stats.malformed, 3);
    assert_eq!(stats.not_underway, 3);
    assert_eq!(stats.out_of_range, 1);
    assert_eq!(stats.non_positive_speed, 1);
    assert_eq!(stats.accepted_records, 2);
    assert_eq!(outcome.leader().unwrap().mmsi, "219000001");
}

#[test]
fn header_only_gives_no_result() {
    let outcome = run(&[]);
    assert!(outcome.totals.is_empty());
    assert_eq!(outcome.leader(), None);
}

#[test]
fn all_segments_rejected_gives_no_result() {
    let outcome = run(&[
        underway(0, "219000002", 56.00, 11.0),
        underway(10, "219000002", 56.09, 11.0),
        underway(10, "219000005", 56.00, 11.0),
        underway(10, "219000005", 56.00, 11.0),
    ]);
    assert_eq!(outcome.stats.segments, 2);
    assert_eq!(outcome.stats.accepted_segments, 0);
    assert_eq!(outcome.stats.non_positive_elapsed, 1);
    assert_eq!(outcome.leader(), None);
}

#[test]
fn configured_thresholds_apply() {
    let rows = [
        underway(0, "219000002", 56.00, 11.0),
        underway(10, "219000002", 56.09, 11.0),
        row("04/05/2024 10:00:00", "219000006", "55.0", "11.0", "Moored", "0.1"),
        row("04/05/2024 10:10:00", "219000006", "55.01", "11.0", "Moored", "0.1"),
    ];

    let outcome = run_with(
        PipelineConfig {
            max_speed_kmh: 100.0,
            excluded_statuses: vec![NavigationalStatus::Anchor],
            threads: Some(1),
        },
        &rows,
    );
    assert_eq!(outcome.stats.accepted_segments, 2);
    assert_eq!(outcome.leader().unwrap().mmsi, "219000002");

    let outcome = run(&rows);
    assert_eq!(outcome.stats.not_underway, 2);
    assert_eq!(outcome.leader(), None);
}

#[test]
fn hsc_and_wig_amendment_statuses_are_underway() {
    let outcome = run(&[
        row("04/05/2024 10:00:00", "219000007", "55.0", "11.0", "Reserved for future amendment [HSC]", "20.0"),
        row("04/05/2024 10:10:00", "219000007", "55.02", "11.0", "Reserved for future amendment [HSC]", "20.0"),
        row("04/05/2024 10:00:00", "219000008", "56.0", "11.0", "Reserved for future amendment [WIG]", "20.0"),
        row("04/05/2024 10:10:00", "219000008", "56.01", "11.0", "Reserved for future amendment [WIG]", "20.0"),
        row("04/05/2024 10:00:00", "219000009", "57.0", "11.0", "Reserved for future use", "20.0"),
    ]);
    assert_eq!(outcome.stats.not_underway, 1);
    assert_eq!(outcome.stats.accepted_records, 4);
    assert_eq!(outcome.stats.accepted_segments, 2);
    assert_eq!(outcome.leader().unwrap().mmsi, "219000007");
}
