//! Control Panel Widget
//! Left side panel with data sources, business-line selection and export.

use crate::data::TableKind;
use crate::reconcile::{LabelCategory, Reconciliation};
use egui::{Color32, RichText, ScrollArea};
use std::path::{Path, PathBuf};

/// Left side control panel.
pub struct ControlPanel {
    pub revenue_path: PathBuf,
    pub cost_path: PathBuf,
    /// Selectable labels with their category, in display order.
    pub options: Vec<(LabelCategory, String)>,
    pub selected: Vec<bool>,
    pub status: String,
    pub status_is_error: bool,
    pub is_busy: bool,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(revenue_path: PathBuf, cost_path: PathBuf) -> Self {
        Self {
            revenue_path,
            cost_path,
            options: Vec::new(),
            selected: Vec::new(),
            status: "Ready".to_string(),
            status_is_error: false,
            is_busy: false,
            export_enabled: false,
        }
    }

    /// Replace the selectable labels, keeping any selection still available.
    pub fn update_options(&mut self, reconciliation: &Reconciliation) {
        let previous = self.get_selected();

        self.options = LabelCategory::ALL
            .into_iter()
            .flat_map(|c| {
                reconciliation
                    .labels(c)
                    .iter()
                    .map(move |label| (c, label.clone()))
            })
            .collect();
        self.selected = self
            .options
            .iter()
            .map(|(_, label)| previous.contains(label))
            .collect();
    }

    /// Select exactly the given labels; unknown labels are ignored.
    pub fn set_selected(&mut self, labels: &[String]) {
        self.selected = self
            .options
            .iter()
            .map(|(_, label)| labels.contains(label))
            .collect();
    }

    /// Currently selected labels, in display order.
    pub fn get_selected(&self) -> Vec<String> {
        self.options
            .iter()
            .zip(self.selected.iter())
            .filter(|(_, &selected)| selected)
            .map(|((_, label), _)| label.clone())
            .collect()
    }

    pub fn set_path(&mut self, kind: TableKind, path: PathBuf) {
        match kind {
            TableKind::Revenue => self.revenue_path = path,
            TableKind::Cost => self.cost_path = path,
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: &str) {
        self.status = format!("Error: {}", message);
        self.status_is_error = true;
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "No file selected".to_string())
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Revenue vs Cost")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Sources").size(14.0).strong());
        ui.add_space(5.0);

        let sources = [
            (TableKind::Revenue, Self::file_name(&self.revenue_path)),
            (TableKind::Cost, Self::file_name(&self.cost_path)),
        ];
        for (kind, name) in sources {
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(format!("{}:", kind)).size(12.0).strong());
                        ui.label(RichText::new(&name).size(12.0));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.add_enabled_ui(!self.is_busy, |ui| {
                                if ui.button("📂 Browse").clicked() {
                                    action = ControlPanelAction::Browse(kind);
                                }
                            });
                        });
                    });
                });
            ui.add_space(4.0);
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Business Line Selection =====
        ui.label(
            RichText::new("🔧 Select business lines:")
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);

        let mut changed = false;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                    for category in LabelCategory::ALL {
                        if !self.options.iter().any(|(c, _)| *c == category) {
                            continue;
                        }
                        ui.label(
                            RichText::new(category.title())
                                .size(12.0)
                                .color(Color32::GRAY),
                        );
                        for (i, (c, label)) in self.options.iter().enumerate() {
                            if *c == category && i < self.selected.len() {
                                changed |= ui.checkbox(&mut self.selected[i], label).changed();
                            }
                        }
                        ui.add_space(4.0);
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selected.iter_mut().for_each(|v| *v = true);
                changed = true;
            }
            if ui.small_button("Clear All").clicked() {
                self.selected.iter_mut().for_each(|v| *v = false);
                changed = true;
            }
        });
        if changed {
            action = ControlPanelAction::SelectionChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled && !self.is_busy, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        ui.horizontal(|ui| {
            if self.is_busy {
                ui.spinner();
            }
            let status_color = if self.status_is_error {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Browse(TableKind),
    SelectionChanged,
    ExportPng,
}
