use crate::modules::shifts::core::shift::ShiftWithDetails;
use serde::Serialize;

/// Period totals shown above a shift listing. Income counts credit takings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ShiftSummary {
    pub shift_count: usize,
    pub income: f64,
    pub trips: i64,
    pub taxi_km: f64,
    pub paid_km: f64,
    pub wage_base: f64,
}

impl ShiftSummary {
    pub fn of(shifts: &[ShiftWithDetails]) -> Self {
        shifts
            .iter()
            .map(|listed| &listed.shift.shift)
            .fold(Self::default(), |acc, shift| Self {
                shift_count: acc.shift_count + 1,
                income: acc.income + shift.total_credit,
                trips: acc.trips + shift.trips,
                taxi_km: acc.taxi_km + shift.taxi_km,
                paid_km: acc.paid_km + shift.paid_km,
                wage_base: acc.wage_base + shift.wage_base,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftListing {
    pub shifts: Vec<ShiftWithDetails>,
    pub summary: ShiftSummary,
}

impl From<Vec<ShiftWithDetails>> for ShiftListing {
    fn from(shifts: Vec<ShiftWithDetails>) -> Self {
        let summary = ShiftSummary::of(&shifts);
        Self { shifts, summary }
    }
}
