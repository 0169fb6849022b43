//! Bar and line charts over the per-user aggregate rows, painted directly
//! with egui shapes.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};

use crate::aggregate::AggregateRow;

const CHART_HEIGHT: f32 = 260.0;
const LEFT_GUTTER: f32 = 44.0;
const BOTTOM_GUTTER: f32 = 28.0;
const GRID_LINES: u64 = 4;

const POST_COUNT: Color32 = Color32::from_rgb(0x88, 0x84, 0xd8);
const MAX_LIKES: Color32 = Color32::from_rgb(0x82, 0xca, 0x9d);
const TOTAL_LIKES: Color32 = Color32::from_rgb(0xff, 0x3c, 0x3c);
const LINE_MAX_LIKES: Color32 = Color32::from_rgb(0xff, 0xc6, 0x58);
const BUSY_MAX_LIKES: Color32 = POST_COUNT;
const BUSY_TOTAL_LIKES: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

/// Users with more posts than this get the alternate likes colours.
const BUSY_POST_COUNT: u64 = 10;

pub fn series_values(row: &AggregateRow) -> [u64; 3] {
    [row.post_count, row.max_likes, row.total_likes]
}

pub fn bar_colors(row: &AggregateRow) -> [Color32; 3] {
    if row.post_count > BUSY_POST_COUNT {
        [POST_COUNT, BUSY_MAX_LIKES, BUSY_TOTAL_LIKES]
    } else {
        [POST_COUNT, MAX_LIKES, TOTAL_LIKES]
    }
}

/// Top of the value axis: the largest value rounded up to 1, 2 or 5 times
/// a power of ten. Never 0, so empty or all-zero data still has a scale.
pub fn axis_ceiling(rows: &[AggregateRow]) -> u64 {
    let max = rows
        .iter()
        .flat_map(|row| series_values(row))
        .max()
        .unwrap_or(0);
    if max == 0 {
        return 1;
    }
    let mut magnitude: u64 = 1;
    while let Some(next) = magnitude.checked_mul(10).filter(|next| *next <= max) {
        magnitude = next;
    }
    for step in [1, 2, 5, 10] {
        match magnitude.checked_mul(step) {
            Some(candidate) if candidate >= max => return candidate,
            Some(_) => {}
            // No nicer ceiling fits in u64.
            None => return max,
        }
    }
    max
}

/// Value of grid line `step` out of `GRID_LINES`, exact for any ceiling.
fn grid_value(ceiling: u64, step: u64) -> u64 {
    let value = u128::from(ceiling) * u128::from(step) / u128::from(GRID_LINES);
    u64::try_from(value).unwrap_or(ceiling)
}

struct ChartFrame {
    plot: Rect,
    ceiling: u64,
}

impl ChartFrame {
    fn y(&self, value: u64) -> f32 {
        let ratio = value as f32 / self.ceiling as f32;
        self.plot.bottom() - ratio * self.plot.height()
    }

    fn slot(&self, index: usize, count: usize) -> (f32, f32) {
        let width = self.plot.width() / count.max(1) as f32;
        (self.plot.left() + width * index as f32, width)
    }
}

fn paint_axes(ui: &mut egui::Ui, title: &str, rows: &[AggregateRow]) -> Option<(egui::Painter, ChartFrame)> {
    ui.label(egui::RichText::new(title).strong());
    if rows.is_empty() {
        ui.label("No data to chart yet.");
        return None;
    }

    let width = ui.available_width().max(240.0);
    let (response, painter) = ui.allocate_painter(egui::vec2(width, CHART_HEIGHT), Sense::hover());
    let outer = response.rect;
    let plot = Rect::from_min_max(
        Pos2::new(outer.left() + LEFT_GUTTER, outer.top() + 8.0),
        Pos2::new(outer.right() - 8.0, outer.bottom() - BOTTOM_GUTTER),
    );
    let frame = ChartFrame {
        plot,
        ceiling: axis_ceiling(rows),
    };

    let grid = ui.visuals().weak_text_color().gamma_multiply(0.4);
    let text = ui.visuals().text_color();
    for step in 0..=GRID_LINES {
        let value = grid_value(frame.ceiling, step);
        let y = frame.y(value);
        painter.line_segment(
            [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(1.0, grid),
        );
        painter.text(
            Pos2::new(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            value.to_string(),
            FontId::proportional(11.0),
            text,
        );
    }

    for (idx, row) in rows.iter().enumerate() {
        let (left, width) = frame.slot(idx, rows.len());
        painter.text(
            Pos2::new(left + width / 2.0, plot.bottom() + 6.0),
            Align2::CENTER_TOP,
            &row.username,
            FontId::proportional(11.0),
            text,
        );
    }

    Some((painter, frame))
}

fn legend(ui: &mut egui::Ui, entries: &[(&str, Color32)]) {
    ui.horizontal(|ui| {
        for (label, color) in entries {
            ui.colored_label(*color, "■");
            ui.label(*label);
            ui.add_space(8.0);
        }
    });
}

pub fn bar_chart(ui: &mut egui::Ui, rows: &[AggregateRow]) {
    let Some((painter, frame)) = paint_axes(ui, "User Posts and Likes Graph", rows) else {
        return;
    };

    for (idx, row) in rows.iter().enumerate() {
        let (left, width) = frame.slot(idx, rows.len());
        let bar_width = (width * 0.8) / 3.0;
        let start = left + width * 0.1;
        for (series, (value, color)) in series_values(row)
            .into_iter()
            .zip(bar_colors(row))
            .enumerate()
        {
            let x = start + bar_width * series as f32;
            let rect = Rect::from_min_max(
                Pos2::new(x + 1.0, frame.y(value)),
                Pos2::new(x + bar_width - 1.0, frame.plot.bottom()),
            );
            painter.rect_filled(rect, 2.0, color);
        }
    }

    legend(
        ui,
        &[
            ("Post Count", POST_COUNT),
            ("Max Likes", MAX_LIKES),
            ("Total Likes", TOTAL_LIKES),
        ],
    );
}

pub fn line_chart(ui: &mut egui::Ui, rows: &[AggregateRow]) {
    let Some((painter, frame)) = paint_axes(ui, "Posts and Likes per User", rows) else {
        return;
    };

    let series: [(fn(&AggregateRow) -> u64, Color32); 3] = [
        (|row: &AggregateRow| row.post_count, POST_COUNT),
        (|row: &AggregateRow| row.total_likes, MAX_LIKES),
        (|row: &AggregateRow| row.max_likes, LINE_MAX_LIKES),
    ];
    for (value_of, color) in series {
        let points: Vec<Pos2> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let (left, width) = frame.slot(idx, rows.len());
                Pos2::new(left + width / 2.0, frame.y(value_of(row)))
            })
            .collect();
        if points.len() > 1 {
            painter.add(egui::Shape::line(points.clone(), Stroke::new(2.0, color)));
        }
        for point in points {
            painter.circle_filled(point, 3.0, color);
        }
    }

    legend(
        ui,
        &[
            ("Post Count", POST_COUNT),
            ("Total Likes", MAX_LIKES),
            ("Max Likes", LINE_MAX_LIKES),
        ],
    );
}
