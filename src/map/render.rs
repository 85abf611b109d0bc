//! Paints the map on egui's background layer: basemap tiles first, then vector
//! layers in z order, then interaction sketches on top.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::css_color::to_color32;
use crate::geo::{Coordinate, Feature, Geometry};
use crate::theme::{TILE_DARK, TILE_LABEL, TILE_LIGHT, TILE_OUTLINE};

use super::layer::LayerKind;
use super::style::Style;
use super::tiles::TileGrid;
use super::{MapInstance, MapView};

/// Tiles smaller than this on screen are drawn without a label.
const MIN_LABELED_TILE_SIZE: f32 = 64.0;

pub fn render_map(mut contexts: EguiContexts, map: Option<Res<MapInstance>>) -> Result {
    let Some(map) = map else {
        return Ok(());
    };
    if map.target().is_none() {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    let painter = ctx.layer_painter(egui::LayerId::background());
    let view = map.view();

    for layer in map.layers_by_z() {
        if !layer.visible {
            continue;
        }
        match &layer.kind {
            LayerKind::Tile(grid) => paint_tiles(&painter, view, grid),
            LayerKind::Vector(vector) => {
                for feature in vector.source.features() {
                    paint_feature(&painter, view, feature, &vector.style);
                }
            }
        }
    }

    for interaction in map.interactions() {
        for feature in interaction.sketch_features() {
            let styles = interaction.styles_for(feature.geometry().geometry_type());
            paint_feature(&painter, view, &feature, styles);
        }
    }

    Ok(())
}

fn to_pos(view: &MapView, coordinate: Coordinate) -> egui::Pos2 {
    let pixel = view.pixel_from_coordinate(coordinate);
    egui::pos2(pixel.x, pixel.y)
}

fn paint_tiles(painter: &egui::Painter, view: &MapView, grid: &TileGrid) {
    let outline = egui::Stroke::new(1.0, to_color32(TILE_OUTLINE));

    for tile in grid.visible_tiles(view) {
        let (min, max) = grid.tile_extent(tile);
        let rect = egui::Rect::from_min_max(
            to_pos(view, Coordinate::new(min.x, max.y)),
            to_pos(view, Coordinate::new(max.x, min.y)),
        );

        let fill = if (tile.x + tile.y) % 2 == 0 {
            TILE_LIGHT
        } else {
            TILE_DARK
        };
        painter.rect_filled(rect, 0.0, to_color32(fill));
        painter.line_segment([rect.right_top(), rect.right_bottom()], outline);
        painter.line_segment([rect.left_bottom(), rect.right_bottom()], outline);

        if rect.width() >= MIN_LABELED_TILE_SIZE {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                tile.to_string(),
                egui::FontId::monospace(12.0),
                to_color32(TILE_LABEL),
            );
        }
    }
}

fn paint_feature(painter: &egui::Painter, view: &MapView, feature: &Feature, styles: &[Style]) {
    let mut ordered: Vec<&Style> = styles.iter().collect();
    ordered.sort_by(|a, b| a.z_index.total_cmp(&b.z_index));

    match feature.geometry() {
        Geometry::Point(coordinate) => {
            let center = to_pos(view, *coordinate);
            for circle in ordered.iter().filter_map(|style| style.image) {
                let fill = circle
                    .fill
                    .map(|fill| to_color32(fill.color))
                    .unwrap_or(egui::Color32::TRANSPARENT);
                let stroke = circle
                    .stroke
                    .map(|stroke| egui::Stroke::new(stroke.width, to_color32(stroke.color)))
                    .unwrap_or(egui::Stroke::NONE);
                painter.circle(center, circle.radius, fill, stroke);
            }
        }
        Geometry::LineString(coordinates) => {
            let points: Vec<egui::Pos2> = coordinates.iter().map(|c| to_pos(view, *c)).collect();
            for stroke in ordered.iter().filter_map(|style| style.stroke) {
                painter.add(egui::Shape::line(
                    points.clone(),
                    egui::Stroke::new(stroke.width, to_color32(stroke.color)),
                ));
            }
        }
        Geometry::Polygon(coordinates) => {
            let points: Vec<egui::Pos2> = coordinates.iter().map(|c| to_pos(view, *c)).collect();
            for style in ordered {
                let fill = style
                    .fill
                    .map(|fill| to_color32(fill.color))
                    .unwrap_or(egui::Color32::TRANSPARENT);
                let stroke = style
                    .stroke
                    .map(|stroke| egui::Stroke::new(stroke.width, to_color32(stroke.color)))
                    .unwrap_or(egui::Stroke::NONE);
                painter.add(egui::Shape::convex_polygon(points.clone(), fill, stroke));
            }
        }
    }
}
