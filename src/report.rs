use crate::ranking::RankingResult;
use anyhow::{bail, Result};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};
use std::io::Write;
use std::str::FromStr;

const KM_PER_NAUTICAL_MILE: f64 = 1.852;
const KM_PER_STATUTE_MILE: f64 = 1.609344;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    NauticalMiles,
    StatuteMiles,
}

impl DistanceUnit {
    pub fn from_km(&self, km: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => km,
            DistanceUnit::NauticalMiles => km / KM_PER_NAUTICAL_MILE,
            DistanceUnit::StatuteMiles => km / KM_PER_STATUTE_MILE,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::NauticalMiles => "nm",
            DistanceUnit::StatuteMiles => "mi",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Kilometers),
            "nm" | "nmi" | "nautical" => Ok(DistanceUnit::NauticalMiles),
            "mi" | "miles" => Ok(DistanceUnit::StatuteMiles),
            other => bail!("unknown distance unit '{other}', expected km, nm or mi"),
        }
    }
}

/// Renders the first `top` rows as a boxed table.
pub fn render_table(ranking: &[RankingResult], unit: DistanceUnit, top: usize) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("MMSI").set_alignment(CellAlignment::Right),
        Cell::new(format!("total_distance_{}", unit.symbol())).set_alignment(CellAlignment::Right),
    ]);

    for r in ranking.iter().take(top) {
        table.add_row(Row::from(vec![
            Cell::new(&r.mmsi).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.3}", unit.from_km(r.total_km)))
                .set_alignment(CellAlignment::Right),
        ]));
    }

    format!("{table}\n")
}

/// Describes a shared first place, or `None` when one vessel leads alone.
pub fn describe_tie(leaders: &[RankingResult], unit: DistanceUnit) -> Option<String> {
    match leaders {
        [first, _, ..] => {
            let ids: Vec<&str> = leaders.iter().map(|r| r.mmsi.as_str()).collect();
            Some(format!(
                "tie at {:.3} {} between {}; reporting {}",
                unit.from_km(first.total_km),
                unit.symbol(),
                ids.join(", "),
                first.mmsi
            ))
        }
        _ => None,
    }
}

#[derive(Debug, serde::Serialize)]
struct ReportRow<'a> {
    source: &'a str,
    rank: usize,
    mmsi: &'a str,
    total_distance: f64,
    unit: &'static str,
}

/// Writes one CSV row per ranked vessel, for each source file.
pub fn write_csv<W: Write>(
    writer: W,
    results: &[(String, Vec<RankingResult>)],
    unit: DistanceUnit,
    top: usize,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (source, ranking) in results {
        for (i, r) in ranking.iter().take(top).enumerate() {
            wtr.serialize(ReportRow {
                source,
                rank: i + 1,
                mmsi: &r.mmsi,
                total_distance: unit.from_km(r.total_km),
                unit: unit.symbol(),
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ranking() -> Vec<RankingResult> {
        vec![
            RankingResult { mmsi: "219000001".to_string(), total_km: 18.52 },
            RankingResult { mmsi: "219000002".to_string(), total_km: 1.0 },
        ]
    }

    #[test]
    fn converts_units() {
        assert_eq!(DistanceUnit::Kilometers.from_km(12.5), 12.5);
        assert_relative_eq!(DistanceUnit::NauticalMiles.from_km(18.52), 10.0, max_relative = 1e-12);
        assert_relative_eq!(DistanceUnit::StatuteMiles.from_km(1.609344), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn parses_units() {
        assert_eq!("KM".parse::<DistanceUnit>().unwrap(), DistanceUnit::Kilometers);
        assert_eq!("nm".parse::<DistanceUnit>().unwrap(), DistanceUnit::NauticalMiles);
        assert_eq!("mi".parse::<DistanceUnit>().unwrap(), DistanceUnit::StatuteMiles);
        assert!("furlongs".parse::<DistanceUnit>().is_err());
    }

    #[test]
    fn table_shows_top_rows() {
        let table = render_table(&ranking(), DistanceUnit::NauticalMiles, 1);

        let header = table.lines().find(|l| l.contains("MMSI")).unwrap();
        assert!(header.contains("total_distance_nm"));

        let row = table.lines().find(|l| l.contains("219000001")).unwrap();
        assert!(row.contains("10.000"));
        assert!(!table.contains("219000002"));
    }

    #[test]
    fn table_rows_follow_ranking_order() {
        let table = render_table(&ranking(), DistanceUnit::Kilometers, 5);
        let first = table.find("219000001").unwrap();
        let second = table.find("219000002").unwrap();
        assert!(first < second);
        assert!(table.contains("18.520"));
        assert!(table.contains("1.000"));
    }

    #[test]
    fn tie_is_described() {
        let tied = vec![
            RankingResult { mmsi: "219000004".to_string(), total_km: 50.0 },
            RankingResult { mmsi: "219000009".to_string(), total_km: 50.0 },
        ];
        assert_eq!(
            describe_tie(&tied, DistanceUnit::Kilometers).as_deref(),
            Some("tie at 50.000 km between 219000004, 219000009; reporting 219000004")
        );
        assert_eq!(describe_tie(&tied[..1], DistanceUnit::Kilometers), None);
        assert_eq!(describe_tie(&[], DistanceUnit::Kilometers), None);
    }

    #[test]
    fn csv_export() {
        let mut buf = Vec::new();
        let results = vec![("day.csv".to_string(), ranking())];
        write_csv(&mut buf, &results, DistanceUnit::Kilometers, 5).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "source,rank,mmsi,total_distance,unit\n\
             day.csv,1,219000001,18.52,km\n\
             day.csv,2,219000002,1.0,km\n"
        );
    }
}
