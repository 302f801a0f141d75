//! Common UI tests - error screen, layout, and navigation help

use super::*;
use txfeed::app::Screen;
use txfeed::feed::FeedKind;

fn all_screens() -> Vec<Screen> {
    vec![
        Screen::Home,
        Screen::Feed(mock_feed_view(
            FeedKind::Transactions,
            mock_transaction_edges(),
            120,
            true,
        )),
        Screen::Feed(mock_feed_view(FeedKind::Erc20, mock_token_edges(), 3, false)),
        Screen::Feed(FeedView::new(2, ACCOUNT, 25)),
        Screen::Error("Error".to_string()),
    ]
}

// ==================== Error Screen Tests ====================

#[test]
fn test_error_screen_shows_message() {
    let screen = Screen::Error("Unrecognized format: 0x1234 (4 hex chars, expected 40)".to_string());
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Error"));
    assert!(buffer_contains(&buffer, "expected 40"));
    assert!(buffer_contains(&buffer, "b back"));
}

#[test]
fn test_error_screen_multiline() {
    let screen = Screen::Error("GraphQL errors: bad cursor\n\nEndpoint: http://x".to_string());
    let app = create_test_app(screen, true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "bad cursor"));
    assert!(buffer_contains(&buffer, "Endpoint: http://x"));
}

// ==================== Navigation Help Tests ====================

#[test]
fn test_screens_show_navigation_help() {
    for screen in all_screens() {
        let app = create_test_app(screen, true);
        let buffer = render_to_buffer(&app, 120, 40);

        assert!(buffer_contains(&buffer, "Esc"));
    }
}

// ==================== Layout Tests ====================

#[test]
fn test_small_terminal_renders_without_panic() {
    for screen in all_screens() {
        let app = create_test_app(screen, true);
        let _ = render_to_buffer(&app, 40, 10);
    }
}

#[test]
fn test_tiny_terminal_renders_without_panic() {
    for screen in all_screens() {
        let app = create_test_app(screen, true);
        let _ = render_to_buffer(&app, 5, 3);
    }
}

#[test]
fn test_large_terminal_renders_without_panic() {
    let app = create_test_app(Screen::Home, true);
    let _ = render_to_buffer(&app, 200, 100);
}
