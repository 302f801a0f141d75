use alloy::primitives::U256;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::ListItem,
};

use crate::feed::{FeedKind, TransactionEdge};

/// Width of an address column: matches a truncated hash
pub const ADDR_WIDTH: usize = 19;

// ============================================================================
// Helper Functions
// ============================================================================

pub fn truncate_hash(hash: &str) -> String {
    if hash.len() > 20 && hash.is_ascii() {
        format!("{}...{}", &hash[..10], &hash[hash.len() - 6..])
    } else {
        hash.to_string()
    }
}

/// Format an address or domain name to a fixed width
pub fn format_addr_fixed_width(addr: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => {
            if name.chars().count() > ADDR_WIDTH {
                let head: String = name.chars().take(ADDR_WIDTH - 3).collect();
                format!("{head}...")
            } else {
                format!("{name:ADDR_WIDTH$}")
            }
        }
        None => truncate_hash(addr),
    }
}

/// Amount column for a row: native value for plain transactions, token
/// amount (or id for NFTs) for token feeds
pub fn format_edge_amount(edge: &TransactionEdge, kind: FeedKind) -> String {
    let tx = &edge.transaction;
    let symbol = tx
        .token
        .as_ref()
        .and_then(|t| t.symbol.clone())
        .unwrap_or_default();

    match kind {
        FeedKind::Transactions => format_ftm(tx.value),
        FeedKind::Erc20 => {
            let decimals = tx.token.as_ref().and_then(|t| t.decimals).unwrap_or(18);
            format!("{} {symbol}", format_token_amount(tx.value, decimals))
        }
        FeedKind::Erc721 => match &tx.token_id {
            Some(id) => format!("#{} {symbol}", format_token_id(id)),
            None => symbol,
        },
        FeedKind::Erc1155 => match &tx.token_id {
            Some(id) => format!("{} × #{}", tx.value, format_token_id(id)),
            None => tx.value.to_string(),
        },
    }
}

/// Width of the age column, so the detail columns line up
const AGE_WIDTH: usize = 14;

/// Trailing columns: block, gas used and token transfer count for plain
/// transactions, the transfer method for token feeds
pub fn format_edge_details(edge: &TransactionEdge, kind: FeedKind) -> String {
    let tx = &edge.transaction;
    match kind {
        FeedKind::Transactions => {
            let block = tx
                .block
                .number
                .map(|n| format!("#{n}"))
                .unwrap_or_else(|| "—".to_string());
            let gas = tx
                .gas_used
                .map(|g| g.to_string())
                .unwrap_or_else(|| "—".to_string());
            let transfers = match tx.token_transactions.len() {
                0 => String::new(),
                n => n.to_string(),
            };
            format!("{block:<10} │ {gas:>9} │ {transfers:>10}")
        }
        FeedKind::Erc20 | FeedKind::Erc721 | FeedKind::Erc1155 => {
            tx.method.clone().unwrap_or_else(|| "—".to_string())
        }
    }
}

/// Token ids arrive hex encoded; show them in decimal when they fit
pub fn format_token_id(id: &str) -> String {
    id.strip_prefix("0x")
        .and_then(|hex| U256::from_str_radix(hex, 16).ok())
        .map(|n| n.to_string())
        .unwrap_or_else(|| id.to_string())
}

pub fn format_feed_row<'a>(
    index: usize,
    edge: &TransactionEdge,
    kind: FeedKind,
    account: &str,
    selected: bool,
) -> ListItem<'a> {
    let tx = &edge.transaction;

    let from_display = format_addr_fixed_width(&tx.from, edge.from_name.as_deref());
    let to_display = match tx.to.as_deref() {
        Some(to) => format_addr_fixed_width(to, edge.to_name.as_deref()),
        None => format!("{:>19}", "[Contract Create]"),
    };

    let outgoing = tx.from.eq_ignore_ascii_case(account);
    let direction = if outgoing {
        Span::styled("OUT", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" IN", Style::default().fg(Color::Green))
    };

    let name_style = |named: bool| {
        if named {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Cyan)
        }
    };

    let amount = format_edge_amount(edge, kind);

    let line = Line::from(vec![
        Span::styled(
            format!("{:>4} ", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(truncate_hash(&tx.hash), Style::default().fg(Color::Gray)),
        Span::raw(" "),
        direction,
        Span::raw(" "),
        Span::styled(from_display, name_style(edge.from_name.is_some())),
        Span::styled(" → ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            to_display,
            if tx.to.is_none() {
                Style::default().fg(Color::Magenta)
            } else {
                name_style(edge.to_name.is_some())
            },
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{amount:>18}"), Style::default().fg(Color::Yellow)),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:<AGE_WIDTH$}", format_timestamp(tx.block.timestamp)),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format_edge_details(edge, kind),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let style = if selected {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else {
        Style::default()
    };

    ListItem::new(line).style(style)
}

pub fn format_feed_header<'a>(kind: FeedKind) -> ListItem<'a> {
    let amount_title = match kind {
        FeedKind::Transactions => "Value",
        FeedKind::Erc20 => "Amount",
        FeedKind::Erc721 | FeedKind::Erc1155 => "Token",
    };
    let details_title = match kind {
        FeedKind::Transactions => format!("{:<10} │ {:>9} │ {:>10}", "Block", "Gas Used", "Token Txns"),
        FeedKind::Erc20 | FeedKind::Erc721 | FeedKind::Erc1155 => "Method".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            format!("{:>4} {:<19}     ", "#", "Txn Hash"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:^19}", "From"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(
            format!("{:^19}", "To"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{amount_title:>18}"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{:<AGE_WIDTH$}", "Age"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(details_title, Style::default().fg(Color::DarkGray)),
    ]);

    ListItem::new(line).style(Style::default())
}

pub fn format_kv(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

pub fn format_timestamp(ts: u64) -> String {
    use std::time::{Duration, UNIX_EPOCH};
    if ts == 0 {
        return "—".to_string();
    }
    let datetime = UNIX_EPOCH + Duration::from_secs(ts);
    let secs_ago = std::time::SystemTime::now()
        .duration_since(datetime)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    if secs_ago < 60 {
        format!("{secs_ago} secs ago")
    } else if secs_ago < 3600 {
        format!("{} mins ago", secs_ago / 60)
    } else if secs_ago < 86400 {
        format!("{} hours ago", secs_ago / 3600)
    } else {
        format!("{} days ago", secs_ago / 86400)
    }
}

pub fn format_ftm(wei: U256) -> String {
    format!("{} FTM", format_token_amount(wei, 18))
}

pub fn format_token_amount(amount: U256, decimals: u8) -> String {
    let amount_str = amount.to_string();
    let dec = decimals as usize;

    if dec == 0 {
        return amount_str;
    }

    let padded = format!("{:0>width$}", amount_str, width = dec + 1);
    let (whole, frac) = padded.split_at(padded.len() - dec);
    if frac.trim_end_matches('0').is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, &frac[..4.min(frac.len())])
    }
}

pub fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let popup_layout = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(area);

    popup_layout[1]
}

pub fn padded_rect(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding,
        y: area.y + padding,
        width: area.width.saturating_sub(padding * 2),
        height: area.height.saturating_sub(padding * 2),
    }
}
