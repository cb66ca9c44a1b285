use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;
use std::time::Duration;

use hookboard::dashboard::{clipboard_path, DashboardApp, InputMode};
use hookboard::models::AppTab;
use hookboard::service::MockContentService;
use hookboard::shell::Shell;
use hookboard::ui;

fn app() -> DashboardApp {
    let shell = Shell::new(Arc::new(MockContentService::default()), Duration::from_secs(3));
    DashboardApp::new(shell, vec![("feeds".to_string(), "(mock feed)".to_string())])
}

fn press(app: &mut DashboardApp, c: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
}

async fn settle(app: &mut DashboardApp) {
    app.shell.next().await.unwrap();
    app.clamp_selection();
}

fn screen(app: &DashboardApp) -> String {
    let backend = TestBackend::new(100, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_scrape_save_and_generate_flow() {
    let mut app = app();

    press(&mut app, 'r');
    assert!(app.shell.state().is_loading);
    // A second press while loading does not start another scrape.
    press(&mut app, 'r');
    settle(&mut app).await;
    assert_eq!(app.shell.state().items.len(), 4);

    press(&mut app, 'j');
    assert_eq!(app.selected_feed_item().unwrap().id, "2");
    press(&mut app, 's');
    settle(&mut app).await;
    assert!(app.shell.state().is_saved("2"));

    press(&mut app, '2');
    assert_eq!(app.shell.state().active_tab, AppTab::Saved);
    assert_eq!(app.selected, 0);

    press(&mut app, 'g');
    assert!(app.selected_saved_item().unwrap().generating_hooks());
    settle(&mut app).await;
    assert_eq!(app.selected_saved_item().unwrap().hooks.as_ref().unwrap().len(), 3);

    press(&mut app, 'n');
    assert_eq!(app.hook_cursor, 1);
    press(&mut app, 'c');
    let expected = app.selected_saved_item().unwrap().hooks.as_ref().unwrap()[1].text.clone();
    assert_eq!(std::fs::read_to_string(clipboard_path()).unwrap(), expected);
    assert_eq!(
        app.shell.state().toast.as_ref().unwrap().message,
        format!("Copied to {}", clipboard_path().display())
    );

    press(&mut app, 'd');
    settle(&mut app).await;
    assert!(app.shell.state().saved_items.is_empty());
    assert_eq!(app.selected, 0);
}

#[tokio::test(start_paused = true)]
async fn test_search_mode_filters_library() {
    let mut app = app();
    press(&mut app, 'r');
    settle(&mut app).await;
    for _ in 0..4 {
        press(&mut app, 's');
        settle(&mut app).await;
        press(&mut app, 'j');
    }
    assert_eq!(app.shell.state().saved_items.len(), 4);

    press(&mut app, '/');
    assert_eq!(app.mode, InputMode::Search);
    assert_eq!(app.shell.state().active_tab, AppTab::Saved);
    for c in "SOLO".chars() {
        press(&mut app, c);
    }
    let filtered = app.shell.state().filtered_saved();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "The Rise of the Solopreneur");

    app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(app.mode, InputMode::Normal);
    assert!(!app.should_quit);
    assert_eq!(app.shell.state().search_query, "SOLO");
}

#[tokio::test(start_paused = true)]
async fn test_source_filter_narrows_feed() {
    let mut app = app();
    press(&mut app, 'r');
    settle(&mut app).await;

    press(&mut app, 'f');
    let visible = app.shell.state().visible_feed();
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|i| i.source.to_string() == "Reddit"));
}

#[tokio::test(start_paused = true)]
async fn test_render_feed_and_empty_library() {
    let mut app = app();
    assert!(screen(&app).contains("No content yet"));

    press(&mut app, 'r');
    settle(&mut app).await;
    let feed = screen(&app);
    assert!(feed.contains("Dashboard Feed"));
    assert!(feed.contains("Growth Hacking Strategies for 2024"));
    assert!(feed.contains("Successfully fetched latest content"));

    press(&mut app, '2');
    assert!(screen(&app).contains("Your library is empty"));

    press(&mut app, '3');
    assert!(screen(&app).contains("(mock feed)"));

    press(&mut app, 'q');
    assert!(app.should_quit);
}
