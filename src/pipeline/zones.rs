use serde::Serialize;

use crate::types::activity::DerivedSample;
use crate::types::zone::{ZoneTable, ZoneTimeTotals, UNKNOWN_ZONE};

#[derive(Debug, Clone, Serialize)]
pub struct ZoneReport {
    /// Zone label per sample, aligned with the derived series.
    pub labels: Vec<&'static str>,
    pub totals: ZoneTimeTotals,
}

pub fn classify(pct: f64, table: &ZoneTable) -> &'static str {
    table.find(pct).map(|zone| zone.label).unwrap_or(UNKNOWN_ZONE)
}

/// Labels every sample and sums time-in-zone. The interval between sample
/// `i - 1` and `i` is credited entirely to the zone of sample `i`; the first
/// sample contributes nothing.
pub fn classify_series(pct: &[f64], elapsed_min: &[f64], table: &ZoneTable) -> ZoneReport {
    let zone_count = table.zones().len();
    // One slot per zone plus a trailing Unknown slot.
    let mut minutes = vec![0.0_f64; zone_count + 1];
    let mut observed = vec![false; zone_count + 1];
    let mut labels = Vec::with_capacity(pct.len());

    for (i, (&value, &elapsed)) in pct.iter().zip(elapsed_min).enumerate() {
        let slot = table
            .zones()
            .iter()
            .position(|zone| zone.contains(value))
            .unwrap_or(zone_count);
        if slot == zone_count {
            tracing::warn!("Sample {} at {:.1}% of max heart rate is outside every zone", i, value);
        }

        let delta = if i == 0 { 0.0 } else { elapsed - elapsed_min[i - 1] };
        minutes[slot] += delta;
        observed[slot] = true;

        labels.push(
            table
                .zones()
                .get(slot)
                .map(|zone| zone.label)
                .unwrap_or(UNKNOWN_ZONE),
        );
    }

    let entries = table
        .zones()
        .iter()
        .map(|zone| zone.label)
        .chain(std::iter::once(UNKNOWN_ZONE))
        .zip(minutes.into_iter().zip(observed))
        .filter(|(_, (_, seen))| *seen)
        .map(|(label, (total, _))| (label, total))
        .collect();

    ZoneReport {
        labels,
        totals: ZoneTimeTotals::from_entries(entries),
    }
}

pub fn classify_derived(derived: &[DerivedSample], table: &ZoneTable) -> ZoneReport {
    let pct: Vec<f64> = derived.iter().map(|sample| sample.hr_pct_max).collect();
    let elapsed: Vec<f64> = derived.iter().map(|sample| sample.elapsed_min).collect();
    classify_series(&pct, &elapsed, table)
}
