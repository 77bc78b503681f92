// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the upload, freeze and clear controls.

/// Button pressed on the toolbar this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Open,
    ToggleFreeze,
    Unfreeze,
    Clear,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, has_resource: bool, frozen: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("📂 Open Image...").clicked() {
            action = ToolbarAction::Open;
        }

        ui.separator();

        let freeze_label = if frozen { "▶ Resume" } else { "⏸ Freeze" };
        if ui
            .add_enabled(has_resource, egui::Button::new(freeze_label))
            .on_hover_text("Space, or click the image")
            .clicked()
        {
            action = ToolbarAction::ToggleFreeze;
        }

        if frozen && ui.button("Unfreeze").on_hover_text("Escape").clicked() {
            action = ToolbarAction::Unfreeze;
        }

        // Clear is only offered while an image is bound
        if has_resource {
            ui.separator();
            if ui.button("✖ Clear").clicked() {
                action = ToolbarAction::Clear;
            }
        }

        ui.separator();

        let hint = if !has_resource {
            "Open or drop an image to begin"
        } else if frozen {
            "Reading pinned, click the image to resume"
        } else {
            "Move over the image to read coordinates, click to freeze"
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
