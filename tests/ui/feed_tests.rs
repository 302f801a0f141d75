//! Feed screen UI tests

use super::*;
use txfeed::app::{DomainStatus, Screen};
use txfeed::feed::{AccountSummary, FeedKind};

fn transactions_app() -> App {
    let view = mock_feed_view(FeedKind::Transactions, mock_transaction_edges(), 120, true);
    create_test_app(Screen::Feed(view), true)
}

#[test]
fn test_feed_header_shows_account() {
    let app = transactions_app();
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "Address: 0x1234567890abcdef1234567890abcdef12345678"));
}

#[test]
fn test_feed_header_domain_states() {
    let mut view = mock_feed_view(FeedKind::Transactions, mock_transaction_edges(), 120, true);

    view.domain = DomainStatus::Resolving;
    let app = create_test_app(Screen::Feed(view.clone()), true);
    assert!(buffer_contains(&render_to_buffer(&app, 140, 40), "Domain: Resolving..."));

    view.domain = DomainStatus::Registered("treasury.ftm".to_string());
    let app = create_test_app(Screen::Feed(view.clone()), true);
    assert!(buffer_contains(&render_to_buffer(&app, 140, 40), "Domain: treasury.ftm"));

    view.domain = DomainStatus::NotRegistered;
    let app = create_test_app(Screen::Feed(view), true);
    assert!(buffer_contains(&render_to_buffer(&app, 140, 40), "Domain: Not registered"));
}

#[test]
fn test_feed_rows_show_resolved_names() {
    let app = transactions_app();
    let buffer = render_to_buffer(&app, 140, 40);

    // Resolved sender shows its name, unresolved sides stay truncated addresses
    assert!(buffer_contains(&buffer, "alice.ftm"));
    assert!(buffer_contains(&buffer, "0xbbbbbbbb...bbbbbb"));
    assert!(!buffer_contains(&buffer, "0xaaaaaaaa...aaaaaa"));
}

#[test]
fn test_feed_rows_show_hash_value_and_direction() {
    let app = transactions_app();
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "0x5c504ed4...b22060"));
    assert!(buffer_contains(&buffer, "5 FTM"));
    assert!(buffer_contains(&buffer, "0.5000 FTM"));
    assert!(buffer_contains(&buffer, " IN "));
    assert!(buffer_contains(&buffer, "OUT"));
}

#[test]
fn test_transaction_rows_show_block_and_gas() {
    let app = transactions_app();
    let buffer = render_to_buffer(&app, 180, 40);

    assert!(buffer_contains(&buffer, "Block"));
    assert!(buffer_contains(&buffer, "Gas Used"));
    assert!(buffer_contains(&buffer, "#19000000"));
    assert!(buffer_contains(&buffer, "#18999900"));
    assert!(buffer_contains(&buffer, "1200000"));
}

#[test]
fn test_token_rows_show_method() {
    let view = mock_feed_view(FeedKind::Erc20, mock_token_edges(), 3, false);
    let app = create_test_app(Screen::Feed(view), true);
    let buffer = render_to_buffer(&app, 180, 40);

    assert!(buffer_contains(&buffer, "Method"));
    assert!(buffer_contains(&buffer, "TRANSFER"));
}

#[test]
fn test_feed_header_shows_balance() {
    let mut view = mock_feed_view(FeedKind::Transactions, mock_transaction_edges(), 120, true);
    let app = create_test_app(Screen::Feed(view.clone()), true);
    let buffer = render_to_buffer(&app, 140, 40);
    assert!(buffer_contains(&buffer, "Balance: —"));

    view.summary = Some(AccountSummary {
        balance: U256::from(2_000_000_000_000_000_000u64),
        tx_count: 120,
    });
    let app = create_test_app(Screen::Feed(view), true);
    let buffer = render_to_buffer(&app, 140, 40);
    assert!(buffer_contains(&buffer, "Balance: 2 FTM"));
    assert!(buffer_contains(&buffer, "Transactions: 120"));
}

#[test]
fn test_feed_rows_show_contract_creation() {
    let app = transactions_app();
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "[Contract Create]"));
}

#[test]
fn test_feed_tabs_show_kinds_and_totals() {
    let app = transactions_app();
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "Transactions (120)"));
    assert!(buffer_contains(&buffer, "ERC-20 Token Txns"));
    assert!(buffer_contains(&buffer, "ERC-1155 Token Txns"));
}

#[test]
fn test_feed_tabs_show_counts_of_unopened_kinds() {
    let mut view = mock_feed_view(FeedKind::Transactions, mock_transaction_edges(), 120, true);
    view.totals.insert(FeedKind::Erc20, 8);
    view.totals.insert(FeedKind::Erc721, 0);
    view.totals.insert(FeedKind::Erc1155, 3);
    let app = create_test_app(Screen::Feed(view), true);
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "ERC-20 Token Txns (8)"));
    assert!(buffer_contains(&buffer, "(0)"));
    assert!(buffer_contains(&buffer, "ERC-1155 Token Txns (3)"));
}

#[test]
fn test_table_status_shows_page_position() {
    let app = transactions_app();
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "Page 1 of 5 • 25 per page • 120 total"));
    assert!(buffer_contains(&buffer, "n/p page"));
}

#[test]
fn test_scroll_feed_status_shows_loaded_count() {
    let view = mock_feed_view(FeedKind::Erc20, mock_token_edges(), 3, false);
    let app = create_test_app(Screen::Feed(view), true);
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "Showing 3 of 3 • end of list"));
    assert!(buffer_contains(&buffer, "bob.ftm"));
    assert!(buffer_contains(&buffer, "1 USDC"));
    assert!(!buffer_contains(&buffer, "n/p page"));
}

#[test]
fn test_scroll_feed_with_more_pages() {
    let view = mock_feed_view(FeedKind::Erc20, mock_token_edges(), 40, true);
    let app = create_test_app(Screen::Feed(view), true);
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "Showing 3 of 40"));
    assert!(!buffer_contains(&buffer, "end of list"));
}

#[test]
fn test_feed_error_keeps_rows_visible() {
    let mut view = mock_feed_view(FeedKind::Transactions, mock_transaction_edges(), 120, true);
    view.error = Some("GraphQL errors: rate limited".to_string());
    let app = create_test_app(Screen::Feed(view), true);
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "rate limited"));
    assert!(buffer_contains(&buffer, "alice.ftm"));
}

#[test]
fn test_feed_loading_first_page() {
    let mut view = FeedView::new(7, ACCOUNT, 25);
    view.first_request();
    let app = create_test_app(Screen::Feed(view), true);
    let buffer = render_to_buffer(&app, 140, 40);

    assert!(buffer_contains(&buffer, "Loading..."));
}

#[test]
fn test_feed_selection_follows_long_lists() {
    let edges: Vec<TransactionEdge> = (0..60u64)
        .map(|i| {
            let mut edge = mock_token_edges()[0].clone();
            edge.cursor = format!("c{i}");
            edge.transaction.hash = format!("0x{:064x}", 1000 + i);
            edge
        })
        .collect();
    let mut view = mock_feed_view(FeedKind::Erc20, edges, 60, false);
    view.selected_index = 59;
    let app = create_test_app(Screen::Feed(view), true);
    let buffer = render_to_buffer(&app, 140, 30);

    // Row numbers are 1-based; the selected last row must be on screen
    assert!(buffer_contains(&buffer, "  60 "));
    assert!(!buffer_contains(&buffer, "   1 0x"));
}
