use super::helper::*;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

use crate::app::{DomainStatus, FeedView};
use crate::feed::FeedKind;

const FEED_HELP_TABLE: &str =
    "↑↓ select • Enter open • Tab feed • n/p page • +/- size • r retry • b back • h home • Esc quit";
const FEED_HELP_SCROLL: &str =
    "↑↓ select • Enter open • Tab feed • +/- size • r retry • b back • h home • Esc quit";

pub fn draw_feed(frame: &mut Frame, view: &FeedView) {
    let area = frame.area();
    let padded = padded_rect(area, 1);

    let chunks = Layout::vertical([
        Constraint::Length(6), // Account header
        Constraint::Length(1), // Feed tabs
        Constraint::Min(5),    // Rows
        Constraint::Length(1), // Status
        Constraint::Length(1), // Help
    ])
    .split(padded);

    draw_account_header(frame, view, chunks[0]);
    draw_tabs(frame, view, chunks[1]);
    draw_rows(frame, view, chunks[2]);
    draw_status(frame, view, chunks[3]);

    let help = if view.is_table() {
        FEED_HELP_TABLE
    } else {
        FEED_HELP_SCROLL
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}

fn draw_account_header(frame: &mut Frame, view: &FeedView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 👤 Account ");

    let domain = match &view.domain {
        DomainStatus::Resolving => Span::styled("Resolving...", Style::default().fg(Color::Yellow)),
        DomainStatus::Registered(name) => {
            Span::styled(name.clone(), Style::default().fg(Color::Green).bold())
        }
        DomainStatus::NotRegistered => {
            Span::styled("Not registered", Style::default().fg(Color::DarkGray))
        }
    };

    let (balance, tx_count) = match &view.summary {
        Some(summary) => (format_ftm(summary.balance), summary.tx_count.to_string()),
        None => ("—".to_string(), "—".to_string()),
    };

    let lines = vec![
        format_kv("Address", view.account()),
        Line::from(vec![
            Span::styled("Domain: ", Style::default().fg(Color::DarkGray)),
            domain,
        ]),
        format_kv("Balance", &balance),
        format_kv("Transactions", &tx_count),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_tabs(frame: &mut Frame, view: &FeedView, area: Rect) {
    let titles: Vec<Line> = FeedKind::ALL
        .iter()
        .map(|kind| match view.totals.get(kind) {
            Some(total) => Line::from(format!("{} ({total})", kind.title())),
            None => Line::from(kind.title()),
        })
        .collect();

    let selected = FeedKind::ALL
        .iter()
        .position(|kind| *kind == view.kind())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .divider("│");

    frame.render_widget(tabs, area);
}

fn draw_rows(frame: &mut Frame, view: &FeedView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", view.kind().title()));

    let edges = view.state.edges();

    if edges.is_empty() {
        let text = if view.is_loading() {
            Line::from("Loading...").fg(Color::Yellow)
        } else if view.error.is_some() {
            Line::from("Nothing loaded. Press r to retry.").fg(Color::DarkGray)
        } else {
            Line::from("No transactions").fg(Color::DarkGray)
        };
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    // Header takes one row of the inner area
    let visible = area.height.saturating_sub(3) as usize;
    let scroll = if visible > 0 && view.selected_index >= visible {
        view.selected_index + 1 - visible
    } else {
        0
    };

    let mut items: Vec<ListItem> = vec![format_feed_header(view.kind())];
    items.extend(
        edges
            .iter()
            .enumerate()
            .skip(scroll)
            .take(visible)
            .map(|(i, edge)| {
                format_feed_row(i, edge, view.kind(), view.account(), i == view.selected_index)
            }),
    );

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_status(frame: &mut Frame, view: &FeedView, area: Rect) {
    let line = if let Some(err) = &view.error {
        Line::from(format!("⚠ {err}")).fg(Color::Red)
    } else {
        let position = if view.is_table() {
            format!(
                "Page {} of {} • {} per page • {} total",
                view.pager.page(),
                view.pager.page_count(view.state.total_count()),
                view.pager.per_page(),
                view.state.total_count()
            )
        } else {
            let more = if view.state.has_more() {
                ""
            } else {
                " • end of list"
            };
            format!(
                "Showing {} of {}{more}",
                view.state.len(),
                view.state.total_count()
            )
        };

        let mut spans = vec![Span::styled(position, Style::default().fg(Color::Gray))];
        if view.is_loading() && !view.state.is_empty() {
            spans.push(Span::styled(
                " • loading...",
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), area);
}
