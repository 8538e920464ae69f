//! Dashboard state: both cleaned tables plus their reconciled label sets.

use crate::charts::{build_figure, ComparisonFigure};
use crate::data::{BusinessTable, DataLoader, LoaderError, TableKind};
use crate::reconcile::{LabelAliases, Reconciliation};
use std::path::Path;
use tracing::{info, warn};

pub struct Dashboard {
    pub revenue: BusinessTable,
    pub cost: BusinessTable,
    pub reconciliation: Reconciliation,
    aliases: LabelAliases,
}

impl Dashboard {
    /// Assemble from already-cleaned tables.
    pub fn new(revenue: BusinessTable, cost: BusinessTable, aliases: LabelAliases) -> Self {
        let mut dashboard = Self {
            revenue,
            cost,
            reconciliation: Reconciliation::default(),
            aliases,
        };
        dashboard.aliases.apply(&mut dashboard.revenue);
        dashboard.reconcile();
        dashboard
    }

    /// Load both CSV files and run the full cleaning pipeline.
    pub fn load(
        revenue_path: &Path,
        cost_path: &Path,
        aliases: LabelAliases,
    ) -> Result<Self, LoaderError> {
        let (revenue, cost) = rayon::join(
            || DataLoader::load_table(revenue_path, TableKind::Revenue),
            || DataLoader::load_table(cost_path, TableKind::Cost),
        );
        Ok(Self::new(revenue?, cost?, aliases))
    }

    /// Swap in a freshly loaded table and recompute the label sets.
    pub fn replace_table(&mut self, mut table: BusinessTable) {
        match table.kind {
            TableKind::Revenue => {
                self.aliases.apply(&mut table);
                self.revenue = table;
            }
            TableKind::Cost => self.cost = table,
        }
        self.reconcile();
    }

    fn reconcile(&mut self) {
        for table in [&self.revenue, &self.cost] {
            if table.is_empty() {
                warn!(table = %table.kind, "table has no business lines");
            }
        }
        self.reconciliation = Reconciliation::from_tables(&self.revenue, &self.cost);
        info!(
            shared = self.reconciliation.shared.len(),
            revenue_only = self.reconciliation.revenue_only.len(),
            cost_only = self.reconciliation.cost_only.len(),
            "labels reconciled"
        );
    }

    /// Recompute the comparison chart for a selection.
    pub fn figure(&self, selected: &[String]) -> ComparisonFigure {
        build_figure(selected, &self.revenue, &self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BusinessLine;
    use std::io::Write;

    const HEADER: &str = "Line Of Business,Jan,Feb,Mar,Apr,May,Jun,Jul,Aug,Sep,Oct,Nov,Dec,Total";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        writeln!(file, "{HEADER}").expect("write header");
        for row in rows {
            writeln!(file, "{row}").expect("write row");
        }
        file.flush().expect("flush csv");
        file
    }

    fn line(label: &str) -> BusinessLine {
        BusinessLine {
            label: label.to_string(),
            monthly: [1.0; 12],
            total: 1.0,
        }
    }

    #[test]
    fn applies_aliases_to_revenue_only() {
        let revenue = BusinessTable::new(TableKind::Revenue, vec![line("Company Beyond Revenue")]);
        let cost = BusinessTable::new(TableKind::Cost, vec![line("Company Beyond Revenue")]);
        let dashboard = Dashboard::new(revenue, cost, LabelAliases::default());

        assert_eq!(dashboard.revenue.lines[0].label, "Company Beyond");
        assert_eq!(dashboard.cost.lines[0].label, "Company Beyond Revenue");
        assert_eq!(dashboard.reconciliation.revenue_only, vec!["Company Beyond"]);
        assert_eq!(dashboard.reconciliation.cost_only, vec!["Company Beyond Revenue"]);
    }

    #[test]
    fn replacing_a_table_reclassifies_labels() {
        let revenue = BusinessTable::new(TableKind::Revenue, vec![line("Ads")]);
        let cost = BusinessTable::new(TableKind::Cost, vec![line("Hosting")]);
        let mut dashboard = Dashboard::new(revenue, cost, LabelAliases::default());
        assert!(dashboard.reconciliation.shared.is_empty());

        dashboard.replace_table(BusinessTable::new(TableKind::Cost, vec![line("Ads")]));
        assert_eq!(dashboard.reconciliation.shared, vec!["Ads"]);
        assert!(dashboard.reconciliation.cost_only.is_empty());
    }

    #[test]
    fn load_reconciles_aliased_revenue_labels_with_costs() {
        let revenue = write_csv(&[
            "Company Signature Revenue,$10,$20,$30,$40,$50,$60,$70,$80,$90,$100,$110,$120,$780",
            "Ads,$5,$5,$5,$5,$5,$5,$5,$5,$5,$5,$5,$5,$60",
        ]);
        let costs = write_csv(&[
            "Company Signature,$1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$78",
            "Hosting,$2,$2,$2,$2,$2,$2,$2,$2,$2,$2,$2,$2,$24",
        ]);

        let dashboard =
            Dashboard::load(revenue.path(), costs.path(), LabelAliases::default()).expect("load");

        assert_eq!(dashboard.reconciliation.shared, vec!["Company Signature"]);
        assert_eq!(dashboard.reconciliation.revenue_only, vec!["Ads"]);
        assert_eq!(dashboard.reconciliation.cost_only, vec!["Hosting"]);

        let figure = dashboard.figure(&["Company Signature".to_string()]);
        assert_eq!(figure.traces.len(), 2);
        assert_eq!(figure.traces[0].name, "Revenue - [Company Signature]");
        assert_eq!(figure.traces[1].name, "Cost - [Company Signature]");
    }
}
