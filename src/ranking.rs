use crate::aggregate::DistanceTotals;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RankingResult {
    pub mmsi: String,
    pub total_km: f64,
}

/// Longest distance first; equal distances go to the smaller MMSI.
fn by_distance_then_mmsi(a: &RankingResult, b: &RankingResult) -> Ordering {
    b.total_km
        .total_cmp(&a.total_km)
        .then_with(|| a.mmsi.cmp(&b.mmsi))
}

fn results(totals: &DistanceTotals) -> impl Iterator<Item = RankingResult> + '_ {
    totals.iter().map(|(mmsi, total_km)| RankingResult {
        mmsi: mmsi.to_string(),
        total_km,
    })
}

/// Every vessel, best first.
pub fn rank(totals: &DistanceTotals) -> Vec<RankingResult> {
    let mut ranked: Vec<RankingResult> = results(totals).collect();
    ranked.sort_by(by_distance_then_mmsi);
    ranked
}

/// The vessel with the greatest total, or `None` when nothing was accepted.
pub fn leader(totals: &DistanceTotals) -> Option<RankingResult> {
    results(totals).min_by(by_distance_then_mmsi)
}

/// All vessels sharing the maximal total, ordered by MMSI.
pub fn leaders(totals: &DistanceTotals) -> Vec<RankingResult> {
    let ranked = rank(totals);
    match ranked.first() {
        Some(first) => {
            let best = first.total_km;
            ranked
                .into_iter()
                .take_while(|r| r.total_km.total_cmp(&best) == Ordering::Equal)
                .collect()
        }
        None => Vec::new(),
    }
}
