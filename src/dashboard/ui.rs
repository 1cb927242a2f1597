//! Terminal UI for the hits dashboard
//!
//! This module implements the terminal user interface using ratatui: the
//! raw hits table, a client-family share chart and a per-address bar chart.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::dashboard::state::DashboardState;
use crate::hits::color::HexColor;

/// Fill used for the address bar chart
const ADDRESS_BAR_COLOR: Color = Color::Rgb(0x88, 0x84, 0xd8);

/// Label shown for the empty grouping key
const EMPTY_KEY_LABEL: &str = "(none)";

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Re-activate the view: fetch once more
    Reload,
    None,
}

impl KeyAction {
    pub fn from_key(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Reload,
            _ => KeyAction::None,
        }
    }
}

/// Application state for the dashboard
pub struct DashboardApp {
    pub state: DashboardState,
    pub source_url: String,
    /// Set while a fetch is in flight
    pub loading: bool,
}

impl DashboardApp {
    /// Create a new dashboard application
    pub fn new(source_url: String) -> Self {
        Self {
            state: DashboardState::new(),
            source_url,
            loading: false,
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&self, key: KeyEvent) -> KeyAction {
        KeyAction::from_key(key)
    }

    /// Render the UI
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),  // Header
                Constraint::Min(8),     // Hits table
                Constraint::Length(12), // Charts
                Constraint::Length(3),  // Footer
            ])
            .split(f.area());

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        self.render_header(f, chunks[0]);
        self.render_table(f, chunks[1]);
        self.render_client_families(f, charts[0]);
        self.render_addresses(f, charts[1]);
        self.render_footer(f, chunks[3]);
    }

    /// Render header with title and metadata
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let last_update = self
            .state
            .last_update()
            .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "Never".to_string());

        let mut status = vec![
            Span::styled(
                "API Tracking Dashboard",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - Source: "),
            Span::styled(self.source_url.as_str(), Style::default().fg(Color::Yellow)),
            Span::raw("  |  Last update: "),
            Span::styled(last_update, Style::default().fg(Color::Green)),
        ];
        if self.loading {
            status.push(Span::styled(
                "  Loading...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let title = vec![
            Line::from(status),
            Line::from(Span::styled(
                "Press 'q' to quit | 'r' to reload",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Render raw hits table
    fn render_table(&self, f: &mut Frame, area: Rect) {
        let header_cells = [
            "Request ID",
            "Request Type",
            "Request Time",
            "IP Address",
            "OS",
            "User Agent",
        ]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows: Vec<Row> = if self.state.is_empty() {
            vec![Row::new(vec![Cell::from("No API hits.")])]
        } else {
            self.state
                .hits()
                .iter()
                .map(|hit| {
                    let cells = vec![
                        Cell::from(hit.request_id.clone().unwrap_or_default()),
                        Cell::from(hit.request_type.clone().unwrap_or_default()),
                        Cell::from(hit.request_time_display()),
                        Cell::from(hit.address().to_string()),
                        Cell::from(hit.os.clone().unwrap_or_default()),
                        Cell::from(hit.user_agent.clone().unwrap_or_default()),
                    ];
                    Row::new(cells).height(1)
                })
                .collect()
        };

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(14),
                Constraint::Percentage(10),
                Constraint::Percentage(18),
                Constraint::Percentage(14),
                Constraint::Percentage(10),
                Constraint::Percentage(34),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("API Hits Table"),
        )
        .column_spacing(1);

        f.render_widget(table, area);
    }

    /// Render hits-per-client-family chart
    ///
    /// A terminal has no pie chart, so each family is a bar in its own
    /// color labelled with its share of all hits.
    fn render_client_families(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("API Hits by Browser");

        let summaries = self.state.by_client_family();
        if summaries.is_empty() {
            f.render_widget(Paragraph::new("No data").block(block), area);
            return;
        }

        let total: u64 = summaries.iter().map(|s| s.value).sum();
        let bars: Vec<Bar> = summaries
            .iter()
            .map(|s| {
                let color = terminal_color(s.color);
                Bar::default()
                    .label(Line::from(key_label(&s.name)))
                    .value(s.value)
                    .text_value(format!(
                        "{} ({:.1}%)",
                        format_number(s.value),
                        share_percent(s.value, total)
                    ))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Color::Black).bg(color))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .data(BarGroup::default().bars(&bars));

        f.render_widget(chart, area);
    }

    /// Render hits-per-address bar chart
    fn render_addresses(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("API Hits by IP Address");

        let summaries = self.state.by_address();
        if summaries.is_empty() {
            f.render_widget(Paragraph::new("No data").block(block), area);
            return;
        }

        let bars: Vec<Bar> = summaries
            .iter()
            .map(|s| {
                Bar::default()
                    .label(Line::from(key_label(&s.name)))
                    .value(s.count)
                    .text_value(format_number(s.count))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(ADDRESS_BAR_COLOR))
            .value_style(Style::default().fg(Color::Black).bg(ADDRESS_BAR_COLOR))
            .data(BarGroup::default().bars(&bars));

        f.render_widget(chart, area);
    }

    /// Render footer with totals
    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let content = if self.state.is_empty() {
            Line::from(Span::styled(
                "No API hits yet.",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(vec![
                Span::styled("Total: ", Style::default().fg(Color::Cyan)),
                Span::raw(format!(
                    "{} hits | {} client families | {} addresses",
                    format_number(self.state.total_hits() as u64),
                    self.state.by_client_family().len(),
                    self.state.by_address().len()
                )),
            ])
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

fn terminal_color(color: HexColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

fn key_label(key: &str) -> String {
    if key.is_empty() {
        EMPTY_KEY_LABEL.to_string()
    } else {
        key.to_string()
    }
}

/// Percentage of `total` that `value` represents
fn share_percent(value: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (value as f64 / total as f64) * 100.0
    }
}

/// Format number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let len = s.len();

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hits::record::{HitRecord, RequestTime};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_text(app: &DashboardApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_share_percent() {
        assert_eq!(share_percent(1, 4), 25.0);
        assert_eq!(share_percent(0, 0), 0.0);
    }

    #[test]
    fn test_key_label() {
        assert_eq!(key_label(""), "(none)");
        assert_eq!(key_label("curl/8.4.0"), "curl/8.4.0");
    }

    #[test]
    fn test_terminal_color() {
        let color = HexColor::new(0x12_3456).unwrap();
        assert_eq!(terminal_color(color), Color::Rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_handle_key() {
        let app = DashboardApp::new("http://localhost:5000/api/hits".to_string());
        let key = |c| KeyEvent::new(c, KeyModifiers::NONE);

        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(app.handle_key(key(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), KeyAction::Reload);
        assert_eq!(app.handle_key(key(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(KeyAction::from_key(key(KeyCode::Char('Q'))), KeyAction::Quit);
    }

    #[test]
    fn test_render_empty_state() {
        let app = DashboardApp::new("http://localhost:5000/api/hits".to_string());
        let text = rendered_text(&app);

        assert!(text.contains("API Hits Table"));
        assert!(text.contains("No API hits."));
        assert!(text.contains("Last update: Never"));
        assert!(!text.contains("Loading..."));
    }

    #[test]
    fn test_render_while_loading() {
        let mut app = DashboardApp::new("http://localhost:5000/api/hits".to_string());
        app.loading = true;
        let text = rendered_text(&app);

        assert!(text.contains("Last update: Never  Loading..."));
        assert!(text.contains("No API hits."));
    }

    #[test]
    fn test_render_with_hits() {
        let mut app = DashboardApp::new("http://localhost:5000/api/hits".to_string());
        app.state.apply(vec![
            HitRecord {
                request_id: Some("track_api".to_string()),
                request_type: Some("GET".to_string()),
                request_time: Some(RequestTime::Text("2026-10-19T00:00:00Z".to_string())),
                ip_address: Some("10.0.0.1".to_string()),
                user_agent: Some("curl/8.4.0".to_string()),
                ..HitRecord::new(1)
            },
            HitRecord {
                ip_address: Some("10.0.0.2".to_string()),
                user_agent: Some("curl/8.4.0".to_string()),
                ..HitRecord::new(2)
            },
        ]);

        let text = rendered_text(&app);
        assert!(text.contains("track_api"));
        assert!(text.contains("API Hits by Browser"));
        assert!(text.contains("API Hits by IP Address"));
        assert!(text.contains("2 hits | 1 client families | 2 addresses"));
    }
}
