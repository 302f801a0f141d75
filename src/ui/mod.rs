mod feed_page;
mod helper;

use feed_page::draw_feed;
use helper::*;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Screen};

const TITLE_ART: &str = r#"
████████╗██╗  ██╗███████╗███████╗███████╗██████╗
╚══██╔══╝╚██╗██╔╝██╔════╝██╔════╝██╔════╝██╔══██╗
   ██║    ╚███╔╝ █████╗  █████╗  █████╗  ██║  ██║
   ██║    ██╔██╗ ██╔══╝  ██╔══╝  ██╔══╝  ██║  ██║
   ██║   ██╔╝ ██╗██║     ███████╗███████╗██████╔╝
   ╚═╝   ╚═╝  ╚═╝╚═╝     ╚══════╝╚══════╝╚═════╝
"#;

const NAV_HELP_NO_LIST: &str = "b back • h home • Esc quit";

pub fn draw(frame: &mut Frame, app: &App) {
    match &app.screen {
        Screen::Home => draw_home(frame, app),
        Screen::Feed(view) => draw_feed(frame, view),
        Screen::Error(msg) => draw_error(frame, msg),
    }
}

fn draw_home(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.needs_setup() {
        draw_setup(frame, app, area);
    } else {
        draw_search_home(frame, app, area);
    }
}

fn draw_title(frame: &mut Frame, title_area: Rect, subtitle_area: Rect) {
    let title = Paragraph::new(TITLE_ART)
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, title_area);

    let subtitle = Paragraph::new("Account Transaction Feed")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, subtitle_area);
}

fn draw_setup(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(9), // Title
        Constraint::Length(1), // Subtitle
        Constraint::Length(3), // Spacing
        Constraint::Length(5), // Endpoint input box
        Constraint::Length(2), // Spacing
        Constraint::Length(1), // Help
        Constraint::Min(0),    // Padding
    ])
    .split(area);

    draw_title(frame, chunks[0], chunks[1]);

    let input_area = centered_rect(70, chunks[3]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" ⚡ Indexer Configuration Required ")
        .title_style(Style::default().fg(Color::Yellow));

    let inner_area = block.inner(input_area);
    frame.render_widget(block, input_area);

    let input_chunks = Layout::vertical([
        Constraint::Length(1), // Label
        Constraint::Length(1), // Input
    ])
    .split(inner_area);

    let label = Paragraph::new("Enter the GraphQL endpoint (e.g., https://xapi.fantom.network/):")
        .style(Style::default().fg(Color::White));
    frame.render_widget(label, input_chunks[0]);

    let inner_width = input_chunks[1].width as usize;
    let scroll = app.setup_input.visual_scroll(inner_width);

    let display_text = if app.setup_input.value().is_empty() {
        Span::styled("https://...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(app.setup_input.value(), Style::default().fg(Color::White))
    };

    let input = Paragraph::new(display_text).scroll((0, scroll as u16));
    frame.render_widget(input, input_chunks[1]);

    let cursor_x =
        input_chunks[1].x + (app.setup_input.visual_cursor().saturating_sub(scroll)) as u16;
    let cursor_y = input_chunks[1].y;
    if cursor_x < input_chunks[1].x + input_chunks[1].width {
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    let help = Paragraph::new("Press Enter to connect • Esc to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}

fn draw_search_home(frame: &mut Frame, app: &App, area: Rect) {
    let recent_searches = app.get_recent_searches();
    let has_history = !recent_searches.is_empty();

    // Max 5 items + 2 for border
    let history_height = if has_history {
        (recent_searches.len().min(5) + 2) as u16
    } else {
        0
    };

    let chunks = Layout::vertical([
        Constraint::Length(9),              // Title
        Constraint::Length(1),              // Subtitle
        Constraint::Length(2),              // Spacing
        Constraint::Length(3),              // Search bar
        Constraint::Length(1),              // Spacing
        Constraint::Length(history_height), // History
        Constraint::Length(1),              // Spacing
        Constraint::Length(1),              // Endpoint status
        Constraint::Length(1),              // Resolver status
        Constraint::Length(1),              // Help
        Constraint::Min(0),
    ])
    .split(area);

    draw_title(frame, chunks[0], chunks[1]);

    let search_area = centered_rect(60, chunks[3]);
    let search_selected = app.selected_history_index.is_none();
    draw_search_bar_with_selection(frame, app, search_area, search_selected);

    if has_history {
        let history_area = centered_rect(60, chunks[5]);
        draw_history_list(frame, app, history_area);
    }

    let endpoint = app.config.graphql_url.as_deref().unwrap_or("Not configured");
    let truncated = if endpoint.chars().count() > 50 {
        format!("{}...", endpoint.chars().take(47).collect::<String>())
    } else {
        endpoint.to_string()
    };
    let endpoint_status = Line::from(vec![
        Span::styled("GraphQL: ", Style::default().fg(Color::DarkGray)),
        Span::styled(truncated, Style::default().fg(Color::Green)),
    ]);
    frame.render_widget(
        Paragraph::new(endpoint_status).alignment(Alignment::Center),
        chunks[7],
    );

    let resolver_status = if app.resolver_enabled() {
        Span::styled("Enabled", Style::default().fg(Color::Green))
    } else {
        Span::styled("Disabled", Style::default().fg(Color::Yellow))
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Name resolution: ", Style::default().fg(Color::DarkGray)),
            resolver_status,
        ]))
        .alignment(Alignment::Center),
        chunks[8],
    );

    let help_text = if has_history {
        "Enter search • ↑↓ history • Del remove • Esc quit"
    } else {
        "Enter to search • Esc to quit"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[9]);
}

fn draw_search_bar_with_selection(frame: &mut Frame, app: &App, area: Rect, selected: bool) {
    let border_color = if selected {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" 🔍 Search ")
        .title_style(Style::default().fg(border_color));

    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll = app.search_input.visual_scroll(inner_width);

    let display_text = if app.search_input.value().is_empty() {
        Span::styled(
            "Search by Address (0x...)",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(app.search_input.value(), Style::default().fg(Color::White))
    };

    let input = Paragraph::new(display_text)
        .block(block)
        .scroll((0, scroll as u16));

    frame.render_widget(input, area);

    // Only show cursor if search bar is selected
    if selected {
        let cursor_x =
            area.x + 1 + (app.search_input.visual_cursor().saturating_sub(scroll)) as u16;
        let cursor_y = area.y + 1;

        if cursor_x < area.x + area.width - 1 {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

fn draw_history_list(frame: &mut Frame, app: &App, area: Rect) {
    let recent_searches = app.get_recent_searches();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Recent Searches ");

    let items: Vec<ListItem> = recent_searches
        .iter()
        .enumerate()
        .take(5)
        .map(|(i, query)| {
            let is_selected = app.selected_history_index == Some(i);
            let style = if is_selected {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };

            let display = if query.chars().count() > 60 {
                format!("{}...", query.chars().take(57).collect::<String>())
            } else {
                query.clone()
            };

            ListItem::new(format!(" {display}")).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn draw_error(frame: &mut Frame, msg: &str) {
    let area = frame.area();
    let padded = padded_rect(area, 1);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" ❌ Error ");

    // Split message into lines and format them
    let mut lines: Vec<Line> = msg
        .lines()
        .map(|line| Line::from(line.to_string()).fg(Color::Red))
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(NAV_HELP_NO_LIST).fg(Color::DarkGray));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: false });

    frame.render_widget(paragraph, padded);
}
