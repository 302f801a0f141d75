//! Home screen UI tests

use super::*;
use txfeed::app::Screen;

#[test]
fn test_home_screen_shows_title() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "████"));
    assert!(buffer_contains(&buffer, "Account Transaction Feed"));
}

#[test]
fn test_home_screen_shows_search_bar() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Search by Address"));
}

#[test]
fn test_home_screen_shows_endpoint_and_resolver_status() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 100, 30);

    assert!(buffer_contains(&buffer, "GraphQL: http://localhost:8000/graphql"));
    assert!(buffer_contains(&buffer, "Name resolution: Disabled"));
}

#[test]
fn test_home_screen_shows_recent_searches() {
    let app = create_test_app(Screen::Home, true);
    let buffer = render_to_buffer(&app, 100, 30);

    assert!(buffer_contains(&buffer, "Recent Searches"));
    assert!(buffer_contains(&buffer, ACCOUNT));
}

#[test]
fn test_home_screen_no_endpoint_shows_setup() {
    let app = create_test_app(Screen::Home, false);
    let buffer = render_to_buffer(&app, 100, 30);

    assert!(buffer_contains(&buffer, "Indexer Configuration Required"));
    assert!(buffer_contains(&buffer, "GraphQL endpoint"));
}
