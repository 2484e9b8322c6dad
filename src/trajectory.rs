use crate::model::PositionReport;
use std::collections::HashMap;

/// One vessel's reports, ascending by timestamp.
#[derive(Debug)]
pub struct Trajectory {
    pub mmsi: String,
    pub trace: Vec<PositionReport>,
}

/// Two consecutive reports of one trajectory.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub prev: &'a PositionReport,
    pub curr: &'a PositionReport,
}

impl Segment<'_> {
    pub fn elapsed_secs(&self) -> i64 {
        self.curr
            .timestamp
            .signed_duration_since(self.prev.timestamp)
            .num_seconds()
    }
}

impl Trajectory {
    /// Sorts `trace` by timestamp. The sort is stable, so reports sharing a
    /// timestamp keep their input order.
    pub fn new(mmsi: String, mut trace: Vec<PositionReport>) -> Self {
        trace.sort_by_key(|r| r.timestamp);
        Trajectory { mmsi, trace }
    }

    /// Yields `len - 1` pairs `(trace[i-1], trace[i])`; nothing for fewer
    /// than two reports.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> + '_ {
        self.trace.windows(2).map(|pair| Segment {
            prev: &pair[0],
            curr: &pair[1],
        })
    }
}

/// Groups reports by MMSI. Input order is kept inside each group.
pub fn group_by_vessel<I>(reports: I) -> Vec<Trajectory>
where
    I: IntoIterator<Item = PositionReport>,
{
    let mut groups: HashMap<String, Vec<PositionReport>> = HashMap::new();
    for report in reports {
        groups.entry(report.mmsi.clone()).or_default().push(report);
    }

    groups
        .into_iter()
        .map(|(mmsi, trace)| Trajectory::new(mmsi, trace))
        .collect()
}
