//! Ratatui-based curve viewer.
//!
//! Shows the three envelope curves on one chart and blocks until the user
//! closes it. The caller continues (and writes the tables) afterwards.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::domain::{CurveKind, EnvelopeTables};
use crate::error::AppError;
use crate::plot::{TITLE, X_LABEL, Y_LABEL};

mod plotters_chart;

use plotters_chart::{ChartSeries, EnvelopeChart};

/// Show the viewer until the user quits.
pub fn run(tables: &EnvelopeTables) -> Result<(), AppError> {
    let mut session = TerminalSession::open()?;
    Viewer::new(tables).event_loop(&mut session.terminal)
}

/// Raw-mode alternate screen owned for the lifetime of the viewer.
///
/// Dropping the session puts the terminal back the way it was, including on
/// early returns from the event loop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn open() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Cannot switch terminal to raw mode: {e}")))?;

        let mut stdout = io::stdout();
        let entered = execute!(stdout, EnterAlternateScreen)
            .map_err(|e| format!("Cannot enter alternate screen: {e}"))
            .and_then(|()| {
                Terminal::new(CrosstermBackend::new(stdout))
                    .map_err(|e| format!("Cannot initialize terminal: {e}"))
            });

        match entered {
            Ok(terminal) => Ok(Self { terminal }),
            Err(message) => {
                restore_terminal();
                Err(AppError::terminal(message))
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

struct Viewer<'a> {
    tables: &'a EnvelopeTables,
    /// Visibility per curve, indexed like `CurveKind::ALL`.
    visible: [bool; 3],
    status: String,
}

impl<'a> Viewer<'a> {
    fn new(tables: &'a EnvelopeTables) -> Self {
        Self {
            tables,
            visible: [true; 3],
            status: format!("{} entries per curve", tables.size),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
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

    /// Returns `true` when the viewer should close.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(c @ '1'..='3') => {
                let idx = c as usize - '1' as usize;
                self.visible[idx] = !self.visible[idx];
                let kind = CurveKind::ALL[idx];
                let state = if self.visible[idx] { "shown" } else { "hidden" };
                self.status = format!("{} {state}", kind.display_name());
            }
            _ => {}
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("envlut", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | {TITLE}")),
        ]));

        let mut legend = Vec::new();
        for (idx, kind) in CurveKind::ALL.iter().enumerate() {
            let (r, g, b) = kind.rgb();
            let style = if self.visible[idx] {
                Style::default().fg(Color::Rgb(r, g, b))
            } else {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            };
            legend.push(Span::styled(format!("[{}] {}", idx + 1, kind.display_name()), style));
            legend.push(Span::raw("  "));
        }
        lines.push(Line::from(legend));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(TITLE).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (series, x_bounds, y_bounds) = chart_series(self.tables, self.visible);
        if series.is_empty() {
            let msg = Paragraph::new("All curves hidden (press 1-3).")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let widget = EnvelopeChart {
            series: &series,
            x_bounds,
            y_bounds,
            x_label: X_LABEL,
            y_label: Y_LABEL,
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "1/2/3 toggle curve  q/Esc close and write tables";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Build chart series for the visible curves, plus bounds over all curves so
/// toggling doesn't rescale the axes.
fn chart_series(tables: &EnvelopeTables, visible: [bool; 3]) -> (Vec<ChartSeries>, [f64; 2], [f64; 2]) {
    let x_bounds = [0.0, (tables.size.max(2) - 1) as f64];

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let mut series = Vec::new();
    for (idx, (kind, values)) in tables.iter().enumerate() {
        for &y in values {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !visible[idx] {
            continue;
        }
        let (r, g, b) = kind.rgb();
        series.push(ChartSeries {
            points: values.iter().enumerate().map(|(i, &y)| (i as f64, y)).collect(),
            color: RGBColor(r, g, b),
        });
    }

    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    (series, x_bounds, [y_min - pad, y_max + pad])
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.2}")
}
