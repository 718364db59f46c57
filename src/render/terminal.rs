use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::chart::GeometryResult;
use crate::color::{ColorScheme, GRID_COLOR};
use crate::config::Config;
use crate::geometry::Point;

/// Interactive state for the terminal preview.
pub struct Preview {
    pub geometry: GeometryResult,
    pub labels: Vec<String>,
    pub series_names: Vec<String>,
    pub canvas_size: f64,
    pub color_scheme: ColorScheme,
    pub show_markers: bool,
    /// Where `w` writes preferences back to.
    pub config_path: Option<PathBuf>,
    message: Option<String>,
}

impl Preview {
    pub fn new(geometry: GeometryResult, labels: Vec<String>, config: &Config) -> Self {
        Self {
            geometry,
            labels,
            series_names: Vec::new(),
            canvas_size: config.chart.resolved_canvas_size(),
            color_scheme: config.style.color_scheme,
            show_markers: config.style.show_markers,
            config_path: None,
            message: None,
        }
    }

    pub fn with_series_names(mut self, names: Vec<String>) -> Self {
        self.series_names = names;
        self
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    fn save_preferences(&mut self) {
        let path = match self.config_path.clone().or_else(Config::default_path) {
            Some(p) => p,
            None => {
                self.message = Some("no config path".to_string());
                return;
            }
        };

        match Config::save_preferences(&path, self.color_scheme, self.show_markers) {
            Ok(()) => {
                info!("Saved preferences to {}", path.display());
                self.message = Some(format!("saved to {}", path.display()));
            }
            Err(e) => {
                warn!("Failed to save preferences: {}", e);
                self.message = Some(format!("save failed: {}", e));
            }
        }
    }

    /// Convert canvas space (y down) into ratatui canvas space (y up).
    fn flip(&self, p: Point) -> (f64, f64) {
        (p.x, self.canvas_size - p.y)
    }

    /// Where a label starts; left-side labels shift so the text ends at the anchor.
    fn label_origin(&self, anchor: Point, label: &str) -> (f64, f64) {
        let (x, y) = self.flip(anchor);
        if anchor.x < self.geometry.center.x {
            (x - Span::raw(label).width() as f64 * self.canvas_size / 80.0, y)
        } else {
            (x, y)
        }
    }

    fn draw_polygon(&self, ctx: &mut Context, points: &[Point], color: Color) {
        for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
            let (x1, y1) = self.flip(*a);
            let (x2, y2) = self.flip(*b);
            ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
        }
    }

    fn paint(&self, ctx: &mut Context) {
        let grid = Color::Rgb(GRID_COLOR.0, GRID_COLOR.1, GRID_COLOR.2);
        let (cx, cy) = self.flip(self.geometry.center);

        for ring in &self.geometry.grid_rings {
            self.draw_polygon(ctx, ring, grid);
        }
        for end in &self.geometry.axis_endpoints {
            let (x, y) = self.flip(*end);
            ctx.draw(&CanvasLine::new(cx, cy, x, y, grid));
        }

        ctx.layer();

        let count = self.geometry.series.len();
        for (i, series) in self.geometry.series.iter().enumerate() {
            let (r, g, b) = self.color_scheme.series_style(i, count).stroke;
            let color = Color::Rgb(r, g, b);
            self.draw_polygon(ctx, &series.data_polygon, color);

            if self.show_markers {
                let coords: Vec<(f64, f64)> =
                    series.vertex_markers.iter().map(|p| self.flip(*p)).collect();
                ctx.draw(&Points {
                    coords: &coords,
                    color,
                });
            }
        }

        for (anchor, label) in self.geometry.label_anchors.iter().zip(&self.labels) {
            let (x, y) = self.label_origin(*anchor, label);
            ctx.print(x, y, Span::styled(label.clone(), Style::default().fg(Color::Gray)));
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        render_status(frame, chunks[0], self);

        // terminal cells are about twice as tall as wide
        let chart_area = chunks[1];
        let height = chart_area.height;
        let width = (height.saturating_mul(2)).min(chart_area.width);
        let x = chart_area.x + (chart_area.width - width) / 2;
        let square = Rect::new(x, chart_area.y, width, height);

        let title = match self.series_names.as_slice() {
            [] => " moodweb ".to_string(),
            names => format!(" {} ", names.join(" / ")),
        };

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .marker(Marker::Braille)
            .x_bounds([0.0, self.canvas_size])
            .y_bounds([0.0, self.canvas_size])
            .paint(|ctx| self.paint(ctx));

        frame.render_widget(canvas, square);
    }
}

pub fn run(preview: Preview) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, preview);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut preview: Preview) -> Result<()> {
    let poll = Duration::from_millis(250);

    loop {
        terminal.draw(|frame| preview.render(frame))?;

        if !event::poll(poll)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            match key {
                KeyEvent {
                    code: KeyCode::Char('q'),
                    ..
                }
                | KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    ..
                } => {
                    break;
                }
                KeyEvent {
                    code: KeyCode::Char('c'),
                    ..
                } => {
                    preview.color_scheme = preview.color_scheme.next();
                    preview.message = None;
                }
                KeyEvent {
                    code: KeyCode::Char('m'),
                    ..
                } => {
                    preview.show_markers = !preview.show_markers;
                    preview.message = None;
                }
                KeyEvent {
                    code: KeyCode::Char('w'),
                    ..
                } => {
                    preview.save_preferences();
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn render_status(frame: &mut Frame, area: Rect, preview: &Preview) {
    let mut status = format!(
        " [c]olor: {} | [m]arkers: {} | [w]rite prefs | [q]uit ",
        preview.color_scheme.name(),
        if preview.show_markers { "on" } else { "off" }
    );
    if let Some(msg) = &preview.message {
        status.push_str(&format!("| {} ", msg));
    }

    for (i, ch) in status.chars().enumerate() {
        if i < area.width as usize {
            let cell = frame.buffer_mut().cell_mut((area.x + i as u16, area.y));
            if let Some(cell) = cell {
                cell.set_char(ch);
                cell.set_fg(Color::DarkGray);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartConfig, RadarChart};
    use ratatui::backend::TestBackend;

    fn preview() -> Preview {
        let labels = vec!["happy".to_string(), "sad".to_string(), "fear".to_string()];
        let chart = RadarChart::new(ChartConfig::default(), labels.clone());
        let geometry = chart.compute(&[vec![1.0, 0.5, 0.25]]);
        Preview::new(geometry, labels, &Config::default())
    }

    #[test]
    fn test_flip_y_axis() {
        let p = preview();
        assert_eq!(p.flip(Point::new(10.0, 30.0)), (10.0, 270.0));
    }

    #[test]
    fn test_label_shift_counts_columns_not_bytes() {
        let p = preview();
        let left = Point::new(100.0, 150.0);
        let (ascii_x, _) = p.label_origin(left, "fear");
        let (hangul_x, _) = p.label_origin(left, "기쁨");
        // two wide glyphs take four columns, same as four ascii letters
        assert!((ascii_x - hangul_x).abs() < 1e-9);
        assert!((ascii_x - (100.0 - 4.0 * 300.0 / 80.0)).abs() < 1e-9);

        let right = Point::new(200.0, 150.0);
        assert_eq!(p.label_origin(right, "기쁨"), (200.0, 150.0));
    }

    #[test]
    fn test_bad_canvas_size_is_resolved() {
        let config = Config {
            chart: ChartConfig {
                canvas_size: f64::NAN,
                ..Default::default()
            },
            ..Default::default()
        };
        let chart = RadarChart::new(config.chart.clone(), ["a", "b", "c"]);
        let p = Preview::new(chart.compute(&[vec![1.0, 1.0, 1.0]]), Vec::new(), &config);
        assert_eq!(p.canvas_size, 0.0);
        assert_eq!(p.flip(Point::new(0.0, 0.0)), (0.0, 0.0));
    }

    #[test]
    fn test_render_into_test_backend() {
        let p = preview().with_series_names(vec!["today".to_string()]);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| p.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("[c]olor: spectrum"));
        assert!(text.contains("today"));
    }
}
