//! Payroll allocation breakdown for the pie chart
//!
//! Amounts are summed per simplified classification and expressed as a share
//! of the team's total average payroll. Because "Other" is left out of the
//! pie, the shown percentages need not add up to 100.

use serde::Serialize;

use crate::data::csv_loader::PayrollRow;
use crate::data::parser::PayrollClass;

/// Share above which a non-active category raises a warning
pub const SIGNIFICANT_SHARE_PCT: f64 = 20.0;

/// Payroll type that never triggers the warning
pub const ACTIVE_ROSTER_LABEL: &str = "Active 26-Man Roster";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub class: PayrollClass,
    /// Raw payroll types rolled into this slice
    pub labels: Vec<String>,
    pub amount: f64,
    /// `amount / total_payroll * 100`
    pub percentage: f64,
    pub significant: bool,
    pub color: &'static str,
    pub description: &'static str,
}

impl CategorySlice {
    /// Legend text, e.g. `Injured (21.4%)`
    pub fn legend_label(&self) -> String {
        format!("{} ({:.1}%)", self.class, self.percentage)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationBreakdown {
    pub team: String,
    pub total_payroll: f64,
    /// Every class present, "Other" included, in order of first appearance
    pub slices: Vec<CategorySlice>,
}

impl AllocationBreakdown {
    /// Slices drawn in the pie
    pub fn displayed(&self) -> impl Iterator<Item = &CategorySlice> {
        self.slices.iter().filter(|s| s.class.is_displayed())
    }

    /// Displayed slices that carry the warning
    pub fn significant(&self) -> impl Iterator<Item = &CategorySlice> {
        self.displayed().filter(|s| s.significant)
    }

    /// Warning lines, one per significant slice
    pub fn alerts(&self) -> Vec<String> {
        self.significant()
            .map(|s| format!("{:.1}% on {} players", s.percentage, s.class))
            .collect()
    }

    pub fn slice(&self, class: PayrollClass) -> Option<&CategorySlice> {
        self.slices.iter().find(|s| s.class == class)
    }
}

/// Roll up a team's payroll classifications.
///
/// The total comes from the team's first row. Rows without a type or amount
/// are left out of the sums. Returns `None` when the team has no rows or no
/// positive total to divide by.
pub fn allocation_breakdown(rows: &[PayrollRow], abbr: &str) -> Option<AllocationBreakdown> {
    let wanted = abbr.trim();
    let team_rows: Vec<&PayrollRow> = rows.iter().filter(|r| r.team.trim() == wanted).collect();

    let total_payroll = team_rows.first()?.avg_total_payroll.filter(|t| *t > 0.0)?;

    let mut slices: Vec<CategorySlice> = Vec::new();
    for row in &team_rows {
        let (Some(label), Some(amount)) = (row.payroll_type.as_deref(), row.class_amount) else {
            continue;
        };

        let class = PayrollClass::classify(label);
        let slice = match slices.iter_mut().position(|s| s.class == class) {
            Some(pos) => &mut slices[pos],
            None => {
                slices.push(CategorySlice {
                    class,
                    labels: Vec::new(),
                    amount: 0.0,
                    percentage: 0.0,
                    significant: false,
                    color: class.color(),
                    description: class.description(),
                });
                let last = slices.len() - 1;
                &mut slices[last]
            }
        };
        slice.amount += amount;
        if !slice.labels.iter().any(|l| l == label) {
            slice.labels.push(label.to_string());
        }
    }

    for slice in &mut slices {
        slice.percentage = slice.amount / total_payroll * 100.0;
        slice.significant = slice.class.is_displayed()
            && !slice.labels.iter().any(|l| l.contains(ACTIVE_ROSTER_LABEL))
            && slice.percentage > SIGNIFICANT_SHARE_PCT;
    }

    Some(AllocationBreakdown {
        team: wanted.to_string(),
        total_payroll,
        slices,
    })
}
