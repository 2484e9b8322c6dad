use std::collections::HashMap;

/// Accepted distance per vessel, in km.
///
/// Partial totals built on separate workers combine with [`merge`], which sums
/// same-key entries, so the final map does not depend on combine order.
///
/// [`merge`]: DistanceTotals::merge
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DistanceTotals {
    totals: HashMap<String, f64>,
}

impl DistanceTotals {
    pub fn add(&mut self, mmsi: &str, distance_km: f64) {
        match self.totals.get_mut(mmsi) {
            Some(total) => *total += distance_km,
            None => {
                self.totals.insert(mmsi.to_string(), distance_km);
            }
        }
    }

    pub fn merge(mut self, other: DistanceTotals) -> DistanceTotals {
        // fold the smaller map into the larger one
        let (mut into, from) = if self.totals.len() >= other.totals.len() {
            (std::mem::take(&mut self), other)
        } else {
            (other, self)
        };
        for (mmsi, distance_km) in from.totals {
            *into.totals.entry(mmsi).or_insert(0.0) += distance_km;
        }
        into
    }

    pub fn get(&self, mmsi: &str) -> Option<f64> {
        self.totals.get(mmsi).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.totals.iter().map(|(mmsi, km)| (mmsi.as_str(), *km))
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for DistanceTotals {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut totals = DistanceTotals::default();
        for (mmsi, distance_km) in iter {
            totals.add(mmsi.as_ref(), distance_km);
        }
        totals
    }
}
