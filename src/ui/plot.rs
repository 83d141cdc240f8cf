use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, RichText, ScrollArea, Sense, Shape, Stroke, Ui,
    Vec2, pos2, vec2,
};
use egui_plot::{Bar, BarChart, GridMark, Plot, PlotPoint, Text};

use crate::color;
use crate::data::aggregate::{Share, ValueCount, shares};
use crate::state::AppState;
use crate::ui::panels::{self, display_value};

const CHART_HEIGHT: f32 = 320.0;

/// Inner radius of the gender donut, relative to the outer one.
const DONUT_HOLE: f32 = 0.3;

/// Axis labels longer than this are cut with an ellipsis.
const MAX_AXIS_LABEL: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Vertical,
    Horizontal,
}

// ---------------------------------------------------------------------------
// "Gráficos" page
// ---------------------------------------------------------------------------

pub fn charts_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Visualizações Gráficas");

    if state.table.is_none() {
        panels::no_data(ui);
        return;
    }

    panels::filter_bar(ui, state);
    ui.separator();

    let view = &state.view;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(2, |cols: &mut [Ui]| {
                bar_chart(
                    &mut cols[0],
                    "category_chart",
                    "Total por Categoria",
                    &view.by_category,
                    Orientation::Vertical,
                );
                bar_chart(
                    &mut cols[0],
                    "submitter_chart",
                    "Total por Usuários",
                    &view.by_submitter,
                    Orientation::Vertical,
                );
                gender_pie(&mut cols[1], &view.by_gender);
                bar_chart(
                    &mut cols[1],
                    "indication_chart",
                    "Total de Indicações",
                    &view.by_indication,
                    Orientation::Horizontal,
                );
            });
        });
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// One bar per value, placed at 0, 1, 2, … along the category axis, with
/// the count written past the end of each bar.
fn bar_chart(
    ui: &mut Ui,
    id: &str,
    title: &str,
    counts: &[ValueCount],
    orientation: Orientation,
) {
    ui.label(RichText::new(title).strong());
    if counts.is_empty() {
        empty_chart(ui);
        return;
    }

    let fill = color::bar_color();
    let labels: Vec<String> = counts
        .iter()
        .map(|c| display_value(&c.value).to_string())
        .collect();

    let bars: Vec<Bar> = counts
        .iter()
        .zip(&labels)
        .enumerate()
        .map(|(i, (c, label))| {
            Bar::new(i as f64, c.count as f64)
                .name(label)
                .fill(fill)
                .width(0.6)
        })
        .collect();

    let mut chart = BarChart::new(bars).color(fill).name(title);
    if orientation == Orientation::Horizontal {
        chart = chart.horizontal();
    }

    let axis_labels = move |mark: GridMark, _range: &RangeInclusive<f64>| -> String {
        axis_label(&labels, mark.value)
    };

    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .set_margin_fraction(vec2(0.08, 0.12));
    plot = match orientation {
        Orientation::Vertical => plot.x_axis_formatter(axis_labels).include_y(0.0),
        Orientation::Horizontal => plot.y_axis_formatter(axis_labels).include_x(0.0),
    };

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(chart);
        for (i, c) in counts.iter().enumerate() {
            let (position, anchor) = match orientation {
                Orientation::Vertical => (
                    PlotPoint::new(i as f64, c.count as f64),
                    Align2::CENTER_BOTTOM,
                ),
                Orientation::Horizontal => (
                    PlotPoint::new(c.count as f64, i as f64),
                    Align2::LEFT_CENTER,
                ),
            };
            plot_ui.text(
                Text::new(position, format!(" {} ", c.count))
                    .anchor(anchor)
                    .color(Color32::WHITE),
            );
        }
    });
}

/// Category name for a grid mark; blank between integer positions.
fn axis_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels
        .get(rounded as usize)
        .map(|l| shorten(l, MAX_AXIS_LABEL))
        .unwrap_or_default()
}

fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn empty_chart(ui: &mut Ui) {
    let (rect, _) = ui.allocate_exact_size(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        "Sem dados para a seleção atual",
        FontId::proportional(14.0),
        ui.visuals().weak_text_color(),
    );
}

// ---------------------------------------------------------------------------
// Gender donut
// ---------------------------------------------------------------------------

/// Percentage over count, as written inside each slice.
fn slice_label(share: &Share) -> String {
    format!("{:.1}%\n{}", share.percent, share.count)
}

fn gender_pie(ui: &mut Ui, counts: &[ValueCount]) {
    ui.label(RichText::new("Distribuição por Gênero").strong());
    let slices = shares(counts);
    if slices.is_empty() {
        empty_chart(ui);
        return;
    }

    let colors = color::pie_palette(slices.len());
    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let rect = response.rect;

    let legend_width = (rect.width() * 0.35).min(160.0);
    let pie_width = rect.width() - legend_width;
    let center = pos2(rect.left() + pie_width / 2.0, rect.center().y);
    let outer = (pie_width.min(rect.height()) / 2.0 - 8.0).max(16.0);
    let inner = outer * DONUT_HOLE;

    let mut start = -FRAC_PI_2;
    for (slice, &fill) in slices.iter().zip(&colors) {
        let sweep = TAU * slice.percent as f32 / 100.0;
        paint_ring_segment(&painter, center, inner, outer, start, sweep, fill);

        let middle = start + sweep / 2.0;
        painter.text(
            center + Vec2::angled(middle) * (inner + outer) / 2.0,
            Align2::CENTER_CENTER,
            slice_label(slice),
            FontId::proportional(12.0),
            Color32::WHITE,
        );
        start += sweep;
    }

    let text_color = ui.visuals().text_color();
    for (i, (slice, &fill)) in slices.iter().zip(&colors).enumerate() {
        let top_left = pos2(rect.right() - legend_width + 8.0, rect.top() + 8.0 + i as f32 * 18.0);
        painter.rect_filled(Rect::from_min_size(top_left, vec2(12.0, 12.0)), 2.0, fill);
        painter.text(
            top_left + vec2(18.0, 6.0),
            Align2::LEFT_CENTER,
            display_value(&slice.value),
            FontId::proportional(12.0),
            text_color,
        );
    }
}

/// Annular sector split into convex quads so the painter can fill it.
fn paint_ring_segment(
    painter: &Painter,
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f32,
    sweep: f32,
    fill: Color32,
) {
    let steps = ((sweep.abs() / TAU) * 96.0).ceil().max(1.0) as usize;
    let angle = |k: usize| start + sweep * k as f32 / steps as f32;
    for k in 0..steps {
        let (a0, a1) = (angle(k), angle(k + 1));
        let quad = vec![
            center + Vec2::angled(a0) * inner,
            center + Vec2::angled(a0) * outer,
            center + Vec2::angled(a1) * outer,
            center + Vec2::angled(a1) * inner,
        ];
        // thin same-colour stroke hides seams between quads
        painter.add(Shape::convex_polygon(quad, fill, Stroke::new(0.5, fill)));
    }
}
