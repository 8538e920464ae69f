//! Label Reconciliation Module
//! Aligns revenue labels with cost labels and classifies each business line.

use crate::data::BusinessTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Literal substring substitutions applied to revenue labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelAliases(pub Vec<(String, String)>);

impl Default for LabelAliases {
    fn default() -> Self {
        Self(vec![
            (
                "Company Signature Revenue".to_string(),
                "Company Signature".to_string(),
            ),
            (
                "Company Beyond Revenue".to_string(),
                "Company Beyond".to_string(),
            ),
        ])
    }
}

impl LabelAliases {
    /// Rewrite one label, applying every substitution in order.
    pub fn rewrite(&self, label: &str) -> String {
        self.0
            .iter()
            .fold(label.to_string(), |acc, (from, to)| {
                if from.is_empty() {
                    acc
                } else {
                    acc.replace(from.as_str(), to)
                }
            })
    }

    /// Rewrite every label of a table in place.
    pub fn apply(&self, table: &mut BusinessTable) {
        for line in &mut table.lines {
            line.label = self.rewrite(&line.label);
        }
    }
}

/// Where a label was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelCategory {
    Shared,
    RevenueOnly,
    CostOnly,
}

impl LabelCategory {
    pub const ALL: [LabelCategory; 3] = [
        LabelCategory::Shared,
        LabelCategory::RevenueOnly,
        LabelCategory::CostOnly,
    ];

    pub fn title(self) -> &'static str {
        match self {
            LabelCategory::Shared => "In both",
            LabelCategory::RevenueOnly => "Revenue only",
            LabelCategory::CostOnly => "Cost only",
        }
    }
}

/// Business lines split into shared, revenue-only and cost-only sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    pub shared: Vec<String>,
    pub revenue_only: Vec<String>,
    pub cost_only: Vec<String>,
}

impl Reconciliation {
    pub fn new<R, C>(revenue_labels: R, cost_labels: C) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let revenue: BTreeSet<String> = revenue_labels.into_iter().map(Into::into).collect();
        let cost: BTreeSet<String> = cost_labels.into_iter().map(Into::into).collect();

        Self {
            shared: revenue.intersection(&cost).cloned().collect(),
            revenue_only: revenue.difference(&cost).cloned().collect(),
            cost_only: cost.difference(&revenue).cloned().collect(),
        }
    }

    pub fn from_tables(revenue: &BusinessTable, cost: &BusinessTable) -> Self {
        Self::new(revenue.labels(), cost.labels())
    }

    /// Labels of one category, sorted.
    pub fn labels(&self, category: LabelCategory) -> &[String] {
        match category {
            LabelCategory::Shared => &self.shared,
            LabelCategory::RevenueOnly => &self.revenue_only,
            LabelCategory::CostOnly => &self.cost_only,
        }
    }

    /// All selectable labels: shared first, then revenue-only, then cost-only.
    pub fn options(&self) -> Vec<String> {
        LabelCategory::ALL
            .iter()
            .flat_map(|c| self.labels(*c).iter().cloned())
            .collect()
    }

    pub fn category(&self, label: &str) -> Option<LabelCategory> {
        LabelCategory::ALL
            .into_iter()
            .find(|c| self.labels(*c).iter().any(|l| l == label))
    }
}
