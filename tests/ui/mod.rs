//! UI rendering tests for txfeed
//!
//! These tests ensure the UI renders correctly by checking the buffer output.
//! Run with: cargo test --test ui_tests

pub mod common_tests;
pub mod feed_tests;
pub mod home_tests;

use txfeed::app::{App, FeedView, Screen};
use txfeed::config::Config;
use txfeed::feed::{
    BlockRef, FeedKind, FeedTransaction, PageInfo, PageResult, TokenRef, TransactionEdge,
};
use txfeed::ui::draw;

use alloy::primitives::U256;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

pub const ACCOUNT: &str = "0x1234567890abcdef1234567890abcdef12345678";
pub const ALICE: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const BOB: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

// ==================== Test Data Builders ====================

pub fn mock_config() -> Config {
    Config {
        graphql_url: Some("http://localhost:8000/graphql".to_string()),
        recent_searches: vec![
            ACCOUNT.to_string(),
            "0xfedcba9876543210fedcba9876543210fedcba98".to_string(),
        ],
        ..Config::default()
    }
}

pub fn mock_config_no_endpoint() -> Config {
    Config::default()
}

fn one_ftm() -> U256 {
    U256::from(10u64).pow(U256::from(18))
}

/// Plain transactions: alice sends to the account, the account pays bob,
/// then a contract creation
pub fn mock_transaction_edges() -> Vec<TransactionEdge> {
    vec![
        TransactionEdge {
            cursor: "0x3".to_string(),
            transaction: FeedTransaction {
                hash: "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060"
                    .to_string(),
                from: ALICE.to_string(),
                to: Some(ACCOUNT.to_string()),
                value: one_ftm() * U256::from(5u64),
                gas_used: Some(21000),
                block: BlockRef {
                    number: Some(19_000_000),
                    timestamp: 1_700_000_000,
                },
                token_transactions: vec![],
                token: None,
                token_id: None,
                method: None,
            },
            from_name: Some("alice.ftm".to_string()),
            to_name: None,
        },
        TransactionEdge {
            cursor: "0x2".to_string(),
            transaction: FeedTransaction {
                hash: "0x9f0a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8"
                    .to_string(),
                from: ACCOUNT.to_string(),
                to: Some(BOB.to_string()),
                value: one_ftm() / U256::from(2u64),
                gas_used: Some(21000),
                block: BlockRef {
                    number: Some(18_999_990),
                    timestamp: 1_699_999_000,
                },
                token_transactions: vec![],
                token: None,
                token_id: None,
                method: None,
            },
            from_name: None,
            to_name: None,
        },
        TransactionEdge {
            cursor: "0x1".to_string(),
            transaction: FeedTransaction {
                hash: "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef"
                    .to_string(),
                from: ACCOUNT.to_string(),
                to: None,
                value: U256::ZERO,
                gas_used: Some(1_200_000),
                block: BlockRef {
                    number: Some(18_999_900),
                    timestamp: 1_699_990_000,
                },
                token_transactions: vec![],
                token: None,
                token_id: None,
                method: None,
            },
            from_name: None,
            to_name: None,
        },
    ]
}

pub fn mock_token_edges() -> Vec<TransactionEdge> {
    (0..3u64)
        .map(|i| TransactionEdge {
            cursor: format!("t{i}"),
            transaction: FeedTransaction {
                hash: format!("0x{:064x}", i + 1),
                from: BOB.to_string(),
                to: Some(ACCOUNT.to_string()),
                value: U256::from((i + 1) * 1_000_000),
                gas_used: None,
                block: BlockRef {
                    number: None,
                    timestamp: 1_700_000_000 - i * 60,
                },
                token_transactions: vec![],
                token: Some(TokenRef {
                    address: "0x04068da6c83afcfa0e13ba15a6696662335d5b75".to_string(),
                    name: Some("USD Coin".to_string()),
                    symbol: Some("USDC".to_string()),
                    decimals: Some(6),
                }),
                token_id: None,
                method: Some("TRANSFER".to_string()),
            },
            from_name: Some("bob.ftm".to_string()),
            to_name: None,
        })
        .collect()
}

/// A feed view with one page of `kind` already applied
pub fn mock_feed_view(
    kind: FeedKind,
    edges: Vec<TransactionEdge>,
    total: u64,
    has_next: bool,
) -> FeedView {
    let mut view = FeedView::new(1, ACCOUNT, 25);
    let request = if kind == FeedKind::Transactions {
        view.first_request()
    } else {
        view.switch_kind(kind)
    }
    .unwrap();

    let page_info = PageInfo {
        has_next,
        has_previous: false,
        first: edges.first().map(|e| e.cursor.clone()),
        last: edges.last().map(|e| e.cursor.clone()),
    };
    view.state.apply(PageResult {
        edges,
        page_info,
        total_count: total,
        account: None,
        requested: request.cursor,
        generation: request.generation,
        merge: request.merge,
    });
    view.totals.insert(kind, total);
    view
}

pub fn create_test_app(screen: Screen, with_endpoint: bool) -> App {
    let config = if with_endpoint {
        mock_config()
    } else {
        mock_config_no_endpoint()
    };
    let mut app = App::new(config);
    app.screen = screen;
    app
}

// ==================== Helper Functions ====================

/// Render the app to a buffer and return it
pub fn render_to_buffer(app: &App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|frame| {
            draw(frame, app);
        })
        .unwrap();

    terminal.backend().buffer().clone()
}

/// Check if buffer contains a specific string anywhere
pub fn buffer_contains(buffer: &Buffer, needle: &str) -> bool {
    let content = buffer_to_string(buffer);
    content.contains(needle)
}

/// Convert buffer to a single string for searching
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut content = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            content.push(
                buffer
                    .cell((x, y))
                    .map(|c| c.symbol().chars().next().unwrap_or(' '))
                    .unwrap_or(' '),
            );
        }
        content.push('\n');
    }
    content
}

/// Get a specific line from the buffer
#[allow(dead_code)]
pub fn buffer_line(buffer: &Buffer, y: u16) -> String {
    let mut line = String::new();
    for x in 0..buffer.area.width {
        if let Some(cell) = buffer.cell((x, y)) {
            line.push_str(cell.symbol());
        }
    }
    line.trim_end().to_string()
}

/// Print buffer for debugging
#[allow(dead_code)]
pub fn print_buffer(buffer: &Buffer) {
    for y in 0..buffer.area.height {
        println!("{}", buffer_line(buffer, y));
    }
}
