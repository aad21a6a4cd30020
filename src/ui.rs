pub mod charting;
pub mod screen;

use std::rc::Rc;

use glam::Vec3;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
        Axis, Chart, Dataset, GraphType, Paragraph, Widget,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;
use webbrowser::Browser;

use plink::scene;
use plink::session::Phase;
use plink::stats::Summary;

use crate::ui::screen::{current_screen, Screen};
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Half-length of a crosshair arm, in canvas units.
const CROSSHAIR_ARM: f64 = 0.08;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

/// Single source of truth for the canvas rectangle. Click hit-testing in
/// the event loop must agree with rendering on this.
pub fn scene_viewport(area: Rect) -> Rect {
    layout_chunks(area)[1]
}

fn layout_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HUD
            Constraint::Min(0),    // scene canvas
            Constraint::Length(1), // key legend
            Constraint::Length(1), // notice / custom entry
        ])
        .split(area)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match current_screen(self.session.phase()) {
            Screen::Scene => render_scene(self, area, buf),
            Screen::Summary => {
                if let Phase::Ended(summary) = self.session.phase() {
                    render_summary(summary, area, buf);
                }
            }
        }
    }
}

fn render_scene(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = layout_chunks(area);

    render_hud(app, chunks[0], buf);

    let viewport = chunks[1];
    if viewport.width > 0 && viewport.height > 0 {
        render_canvas(app, viewport, buf);
    }

    render_footer(app, chunks[2], chunks[3], buf);
}

fn render_hud(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let mut spans = vec![Span::styled(
        format!("score {}", app.session.stats.score),
        bold_style,
    )];

    spans.push(Span::styled("  ·  ", dim_style));
    match app.session.remaining_secs() {
        Some(remaining) => spans.push(Span::styled(
            charting::format_mmss(remaining),
            bold_style.fg(Color::Yellow),
        )),
        None => spans.push(Span::styled(
            format!("{}s drill", app.duration_secs as u64),
            dim_style,
        )),
    }

    spans.push(Span::styled("  ·  ", dim_style));
    match app.session.tier() {
        Some(tier) => spans.push(Span::styled(tier.to_string(), bold_style)),
        None => spans.push(Span::styled(
            "free play",
            dim_style.add_modifier(Modifier::ITALIC),
        )),
    }

    Paragraph::new(Line::from(spans)).render(area, buf);
}

fn render_canvas(app: &App, viewport: Rect, buf: &mut Buffer) {
    let camera = App::camera_for(viewport);
    let aspect = camera.aspect as f64;

    let target_center = scene::world_to_ndc(&camera, app.target.position);
    let target_edge = scene::world_to_ndc(
        &camera,
        app.target.position + Vec3::X * app.target.radius(),
    );
    let crosshair = scene::world_to_ndc(&camera, app.crosshair);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-aspect, aspect])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            if let Some(center) = target_center {
                let radius = target_edge
                    .map(|edge| (edge.x - center.x).abs() as f64 * aspect)
                    .unwrap_or(0.05);
                ctx.draw(&Circle {
                    x: center.x as f64 * aspect,
                    y: center.y as f64,
                    radius,
                    color: Color::Red,
                });
            }

            let palette = [Color::Yellow, Color::LightRed, Color::White];
            for (index, color) in palette.into_iter().enumerate() {
                let coords: Vec<(f64, f64)> = app
                    .burst
                    .particles
                    .iter()
                    .filter(|p| p.color_index % palette.len() == index)
                    .map(|p| (p.x, p.y))
                    .collect();
                if !coords.is_empty() {
                    ctx.draw(&Points {
                        coords: &coords,
                        color,
                    });
                }
            }

            if let Some(cross) = crosshair {
                let (cx, cy) = (cross.x as f64 * aspect, cross.y as f64);
                ctx.draw(&CanvasLine {
                    x1: cx - CROSSHAIR_ARM,
                    y1: cy,
                    x2: cx + CROSSHAIR_ARM,
                    y2: cy,
                    color: Color::Cyan,
                });
                ctx.draw(&CanvasLine {
                    x1: cx,
                    y1: cy - CROSSHAIR_ARM,
                    x2: cx,
                    y2: cy + CROSSHAIR_ARM,
                    color: Color::Cyan,
                });
            }
        });

    canvas.render(viewport, buf);
}

fn render_footer(app: &App, legend_area: Rect, notice_area: Rect, buf: &mut Buffer) {
    let italic_style = Style::default()
        .add_modifier(Modifier::ITALIC)
        .add_modifier(Modifier::DIM);

    let full = if app.session.is_running() {
        "(r)eset  (q)uit"
    } else {
        "(e/m/h) difficulty  (1/2/3) 30/60/120s  (c)ustom  (s)tart  (r)eset  (q)uit"
    };
    let compact = if app.session.is_running() {
        "(r) (q)"
    } else {
        "(e/m/h) (1/2/3) (c) (s) (r) (q)"
    };
    let legend = if full.width() <= legend_area.width as usize {
        full
    } else {
        compact
    };
    Paragraph::new(Span::styled(legend, italic_style))
        .alignment(Alignment::Center)
        .render(legend_area, buf);

    let notice = if let Some(entry) = &app.entry {
        Span::styled(
            format!("drill seconds: {entry}_"),
            Style::default().fg(Color::Yellow),
        )
    } else if let Some(notice) = &app.notice {
        Span::styled(
            notice.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::raw("")
    };
    Paragraph::new(notice)
        .alignment(Alignment::Center)
        .render(notice_area, buf);
}

fn render_summary(summary: &Summary, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);
    let magenta_style = Style::default().fg(Color::Magenta);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // pace chart
            Constraint::Length(1), // stats strip
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let (overall_duration, highest_gap) =
        charting::compute_chart_params(&summary.pace, summary.duration_secs);

    let points: Vec<(f64, f64)> = summary.pace.iter().map(|p| (p.t, p.gap)).collect();
    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(magenta_style)
        .graph_type(GraphType::Line)
        .data(&points)];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([0.0, overall_duration])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(overall_duration), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("gap (s)")
                .bounds([0.0, highest_gap])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest_gap), bold_style),
                ]),
        );

    chart.render(chunks[0], buf);

    let stats = Paragraph::new(Span::styled(
        format!(
            "{} hits   {}% acc   {:.2}s avg gap   {:.0} shots/min   {:.2} sd",
            summary.final_score,
            summary.accuracy_percent.round(),
            summary.avg_hit_interval,
            summary.shots_per_minute,
            summary.interval_std_dev
        ),
        bold_style,
    ))
    .alignment(Alignment::Center);

    stats.render(chunks[1], buf);

    let legend = Paragraph::new(Span::styled(
        String::from(if Browser::is_available() {
            "(enter) free play / (a)gain / (t)weet / (q)uit"
        } else {
            "(enter) free play / (a)gain / (q)uit"
        }),
        italic_style,
    ));

    legend.render(chunks[3], buf);
}
