//! Ratatui-based terminal dashboard.
//!
//! Renders the composed index table as interactive line charts: an indexed
//! comparison view (every series, 2012 = 100), a cumulative-return view
//! (comparison vs. investment convention side by side), and an annual
//! returns view. Series can be toggled, and a failed load can be retried
//! without restarting the process.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::app::pipeline::{self, Dashboard, LoadState, Loader};
use crate::domain::{ComposedRow, LoadConfig};
use crate::error::AppError;

mod line_chart;

use line_chart::{segments_from, ChartSeries, DashLineChart};

/// Colors per composed series, aligned with [`ComposedRow::SERIES_LABELS`].
const SERIES_COLORS: [(u8, u8, u8); 6] = [
    (0, 255, 255),  // S&P 500 TR index - cyan
    (0, 255, 0),    // PE AUM - green
    (255, 255, 0),  // G-Class sales - yellow
    (255, 0, 255),  // MSRP - magenta
    (255, 140, 0),  // ATP - orange
    (100, 160, 255), // net worth - blue
];

/// Start the TUI.
pub fn run(config: LoadConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.reload(true);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Indexed,
    Cumulative,
    Returns,
}

impl View {
    fn next(self) -> Self {
        match self {
            View::Indexed => View::Cumulative,
            View::Cumulative => View::Returns,
            View::Returns => View::Indexed,
        }
    }

    fn title(self) -> &'static str {
        match self {
            View::Indexed => "Indexed comparison (2012 = 100)",
            View::Cumulative => "Cumulative S&P 500 total return",
            View::Returns => "S&P 500 annual total return (%)",
        }
    }
}

struct App {
    config: LoadConfig,
    loader: Loader,
    /// Raw text of the last successful fetch, so setting changes recompute
    /// without refetching.
    last_text: Option<String>,
    view: View,
    visible: [bool; 6],
}

impl App {
    fn new(config: LoadConfig) -> Self {
        Self {
            config,
            loader: Loader::new(),
            last_text: None,
            view: View::Indexed,
            visible: [true; 6],
        }
    }

    /// Run one load cycle. `refetch = false` reuses the last fetched text
    /// (settings changed, data didn't). The generation ticket guarantees a
    /// stale cycle can never overwrite a newer one.
    fn reload(&mut self, refetch: bool) {
        let ticket = self.loader.begin();

        let result = if refetch || self.last_text.is_none() {
            match self.config.source.fetch_text() {
                Ok(text) => {
                    let out = pipeline::run_with_text(&self.config, &text);
                    if out.is_ok() {
                        self.last_text = Some(text);
                    }
                    out
                }
                Err(e) => Err(e),
            }
        } else {
            let text = self.last_text.as_deref().unwrap_or_default();
            pipeline::run_with_text(&self.config, text)
        };

        self.loader.finish(ticket, result);
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('r') => self.reload(true),
            KeyCode::Tab | KeyCode::Char('v') => self.view = self.view.next(),
            KeyCode::Char('b') => {
                self.config.base_year_included = !self.config.base_year_included;
                self.reload(false);
            }
            KeyCode::Char(c @ '1'..='6') => {
                let i = (c as usize) - ('1' as usize);
                self.visible[i] = !self.visible[i];
            }
            _ => {}
        }
        false
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(4),
            ])
            .split(f.area());

        self.draw_header(f, chunks[0]);
        self.draw_body(f, chunks[1]);
        self.draw_footer(f, chunks[2]);
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let status = match self.loader.state() {
            LoadState::Loading => Span::styled("loading...", Style::default().fg(Color::Yellow)),
            LoadState::Ready(d) => Span::styled(
                format!("{} ({} years)", d.source, d.composed.len()),
                Style::default().fg(Color::Green),
            ),
            LoadState::Failed(_) => Span::styled("load failed", Style::default().fg(Color::Red)),
        };

        let line = Line::from(vec![
            Span::styled(
                "wdash ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("| {} | ", self.view.title())),
            status,
        ]);

        f.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn draw_body(&self, f: &mut Frame, area: Rect) {
        match self.loader.state() {
            LoadState::Loading => {
                f.render_widget(Paragraph::new("Loading data..."), area);
            }
            LoadState::Failed(msg) => {
                let text = format!("Error: {msg}\n\nPress `r` to retry, `q` to quit.");
                f.render_widget(
                    Paragraph::new(text).style(Style::default().fg(Color::Red)),
                    area,
                );
            }
            LoadState::Ready(dashboard) => self.draw_chart(f, area, dashboard),
        }
    }

    fn draw_chart(&self, f: &mut Frame, area: Rect, dashboard: &Dashboard) {
        let x_labels: Vec<String> = dashboard.composed.iter().map(|r| r.year.clone()).collect();

        let series = match self.view {
            View::Indexed => indexed_series(&dashboard.composed, &self.visible),
            View::Cumulative => cumulative_series(dashboard),
            View::Returns => returns_series(dashboard),
        };

        if series.iter().all(|s| s.segments.is_empty()) {
            f.render_widget(Paragraph::new("No data points to chart."), area);
            return;
        }

        let y_bounds = y_bounds(&series);
        let y_label = match self.view {
            View::Returns => "%",
            _ => "index",
        };

        f.render_widget(
            DashLineChart {
                series: &series,
                x_labels: &x_labels,
                y_bounds,
                y_label,
            },
            area,
        );
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect) {
        let mut legend: Vec<Span> = Vec::new();
        if self.view == View::Indexed {
            for (i, label) in ComposedRow::SERIES_LABELS.iter().enumerate() {
                let (r, g, b) = SERIES_COLORS[i];
                let style = if self.visible[i] {
                    Style::default().fg(Color::Rgb(r, g, b))
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                legend.push(Span::styled(format!("[{}] {}  ", i + 1, short(label)), style));
            }
        }

        let keys = Line::from(
            "q quit | r reload | tab view | b base-year convention | 1-6 toggle series",
        );
        let text = vec![Line::from(legend), keys];
        f.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }
}

/// Legend-sized series name (full labels are too wide for a footer).
fn short(label: &str) -> &str {
    label.split(" (").next().unwrap_or(label)
}

fn indexed_series(composed: &[ComposedRow], visible: &[bool; 6]) -> Vec<ChartSeries> {
    let mut out = Vec::new();
    for (i, label) in ComposedRow::SERIES_LABELS.iter().enumerate() {
        if !visible[i] {
            continue;
        }
        let values: Vec<Option<f64>> = composed.iter().map(|r| r.series_values()[i]).collect();
        out.push(ChartSeries {
            label: (*label).to_string(),
            color: SERIES_COLORS[i],
            segments: segments_from(&values),
        });
    }
    out
}

fn cumulative_series(dashboard: &Dashboard) -> Vec<ChartSeries> {
    let by_year = |points: &[crate::domain::IndexPoint]| -> Vec<Option<f64>> {
        dashboard
            .years
            .iter()
            .map(|y| points.iter().find(|p| p.year == *y).map(|p| p.index))
            .collect()
    };

    vec![
        ChartSeries {
            label: "Comparison (2012 = 100)".to_string(),
            color: SERIES_COLORS[0],
            segments: segments_from(&by_year(&dashboard.spx_comparison)),
        },
        ChartSeries {
            label: "Investment ($100 at start of 2012)".to_string(),
            color: SERIES_COLORS[1],
            segments: segments_from(&by_year(&dashboard.spx_investment)),
        },
    ]
}

fn returns_series(dashboard: &Dashboard) -> Vec<ChartSeries> {
    let values: Vec<Option<f64>> = dashboard
        .rows
        .iter()
        .map(|r| {
            r.spx_total_return_pct
                .is_finite()
                .then_some(r.spx_total_return_pct)
        })
        .collect();

    vec![ChartSeries {
        label: "S&P 500 annual total return (%)".to_string(),
        color: SERIES_COLORS[0],
        segments: segments_from(&values),
    }]
}

/// Min/max over every drawn point, padded so lines don't hug the frame.
fn y_bounds(series: &[ChartSeries]) -> [f64; 2] {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for s in series {
        for seg in &s.segments {
            for &(_, y) in seg {
                lo = lo.min(y);
                hi = hi.max(y);
            }
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((hi - lo) * 0.05).max(1.0);
    [lo - pad, hi + pad]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSource;

    fn dashboard() -> Dashboard {
        let config = LoadConfig {
            source: DataSource::Sample,
            ..LoadConfig::default()
        };
        pipeline::run_load(&config).unwrap()
    }

    #[test]
    fn indexed_series_respects_visibility() {
        let d = dashboard();
        let all = indexed_series(&d.composed, &[true; 6]);
        assert_eq!(all.len(), 6);

        let mut visible = [true; 6];
        visible[2] = false;
        let some = indexed_series(&d.composed, &visible);
        assert_eq!(some.len(), 5);
        assert!(some.iter().all(|s| !s.label.contains("sales")));
    }

    #[test]
    fn cumulative_view_carries_both_conventions() {
        let d = dashboard();
        let series = cumulative_series(&d);
        assert_eq!(series.len(), 2);
        // Comparison anchors at 100; investment applies 2012's 16% return.
        assert_eq!(series[0].segments[0][0].1, 100.0);
        assert!((series[1].segments[0][0].1 - 116.0).abs() < 1e-9);
    }

    #[test]
    fn y_bounds_pad_the_extremes() {
        let series = vec![ChartSeries {
            label: "x".to_string(),
            color: (255, 255, 255),
            segments: vec![vec![(0.0, 100.0), (1.0, 200.0)]],
        }];
        let [lo, hi] = y_bounds(&series);
        assert!(lo < 100.0 && hi > 200.0);
    }
}
