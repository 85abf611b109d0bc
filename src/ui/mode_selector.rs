//! The control window: overlay mode radio buttons, the draw color field, the
//! center-to-cursor checkbox and the cursor readout.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{UpdateModeRequest, UpdateShowCenterToCursorRequest};
use crate::css_color::{parse_css_color, to_color32};
use crate::geo::{format_readout, to_lon_lat};
use crate::overlay::{MousePositionStore, OverlayMode, ShowCenterToCursor};
use crate::theme::{EDIT_BLUE, READOUT_TEXT, SWATCH_BORDER};

use super::color_input::DrawColorInput;

const SWATCH_SIZE: f32 = 16.0;

/// Open a variant's source file with the platform's default handler
fn open_source(mode: OverlayMode) {
    let path = mode.source_path();
    if let Err(e) = open::that(&path) {
        warn!("Failed to open {:?}: {}", path, e);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn mode_selector_ui(
    mut contexts: EguiContexts,
    mode: Res<State<OverlayMode>>,
    mut next_mode: ResMut<NextState<OverlayMode>>,
    mut color_input: ResMut<DrawColorInput>,
    mut show_center_to_cursor: ResMut<ShowCenterToCursor>,
    store: Res<MousePositionStore>,
    mut mode_events: MessageWriter<UpdateModeRequest>,
    mut show_events: MessageWriter<UpdateShowCenterToCursorRequest>,
) -> Result {
    let current = *mode.get();

    egui::Window::new("Leader Line")
        .collapsible(true)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .show(contexts.ctx_mut()?, |ui| {
            for &option in OverlayMode::all() {
                ui.horizontal(|ui| {
                    if ui.radio(current == option, option.display_name()).clicked()
                        && current != option
                    {
                        next_mode.set(option);
                        mode_events.write(UpdateModeRequest { mode: option });
                    }
                    if ui
                        .small_button("code")
                        .on_hover_text(option.source_path().to_string_lossy().into_owned())
                        .clicked()
                    {
                        open_source(option);
                    }
                });
            }

            ui.separator();

            match current {
                OverlayMode::DrawInteraction => {
                    ui.horizontal(|ui| {
                        ui.label("Color");

                        let mut text = color_input.text().to_string();
                        let response =
                            ui.add(egui::TextEdit::singleline(&mut text).desired_width(120.0));
                        if response.changed() {
                            color_input.set_text(text);
                        }

                        if ui.button("Reset").clicked() {
                            color_input.reset();
                        }

                        let swatch = parse_css_color(color_input.last_valid()).unwrap_or(EDIT_BLUE);
                        let (rect, _) = ui.allocate_exact_size(
                            egui::vec2(SWATCH_SIZE, SWATCH_SIZE),
                            egui::Sense::hover(),
                        );
                        ui.painter().rect(
                            rect,
                            2.0,
                            to_color32(swatch),
                            egui::Stroke::new(1.0, SWATCH_BORDER),
                            egui::StrokeKind::Inside,
                        );
                    });
                }
                OverlayMode::CustomVector => {
                    ui.label(egui::RichText::new("Line and point layers follow the cursor.").weak());
                }
                OverlayMode::CenterToCursor => {
                    let mut checked = show_center_to_cursor.0;
                    if ui
                        .checkbox(&mut checked, "Show center-to-cursor layer")
                        .changed()
                    {
                        show_center_to_cursor.0 = checked;
                        show_events.write(UpdateShowCenterToCursorRequest { show: checked });
                    }
                }
            }

            ui.separator();

            let readout = ui.label(
                egui::RichText::new(format_readout(store.position))
                    .monospace()
                    .color(READOUT_TEXT),
            );
            if let Some(position) = store.position {
                let [lon, lat] = to_lon_lat(position);
                readout.on_hover_text(format!("{:.5}°, {:.5}°", lon, lat));
            }
        });

    Ok(())
}
