use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::dashboard::{DashboardApp, InputMode};
use crate::models::{AppTab, ContentItem, ContentSource};
use crate::state::ToastKind;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn draw(f: &mut Frame, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(1), // Toast
            Constraint::Min(6),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(f.size());

    render_tabs(f, chunks[0], app);
    render_toast(f, chunks[1], app);
    match app.shell.state().active_tab {
        AppTab::Feed => render_feed(f, chunks[2], app),
        AppTab::Saved => render_saved(f, chunks[2], app),
        AppTab::Settings => render_settings(f, chunks[2], app),
    }
    render_footer(f, chunks[3], app);
}

fn render_tabs(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let state = app.shell.state();
    let titles: Vec<Line> = AppTab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let label = match tab {
                AppTab::Saved => format!("{} {} ({})", i + 1, tab.title(), state.saved_items.len()),
                _ => format!("{} {}", i + 1, tab.title()),
            };
            Line::from(label)
        })
        .collect();
    let selected = AppTab::all()
        .iter()
        .position(|t| *t == state.active_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(" Hookboard ")
                .title_alignment(Alignment::Center),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn render_toast(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let Some(toast) = &app.shell.state().toast else {
        return;
    };
    let (mark, color) = match toast.kind {
        ToastKind::Success => ("✓", Color::Green),
        ToastKind::Error => ("✗", Color::Red),
    };
    let line = Line::from(Span::styled(
        format!(" {} {} ", mark, toast.message),
        Style::default().fg(Color::White).bg(color).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn source_style(source: ContentSource) -> Style {
    match source {
        ContentSource::Reddit => Style::default().fg(Color::LightRed),
        ContentSource::Newsletter => Style::default().fg(Color::LightBlue),
    }
}

/// Cuts `s` to at most `width` display columns, marking the cut with an ellipsis.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn card(item: &ContentItem, width: usize, badge: Option<Span<'static>>) -> ListItem<'static> {
    let mut header = vec![
        Span::styled(format!("[{}] ", item.source), source_style(item.source)),
        Span::styled(item.timestamp.clone(), Style::default().fg(Color::DarkGray)),
    ];
    if let Some(badge) = badge {
        header.push(Span::raw("  "));
        header.push(badge);
    }

    let mut lines = vec![
        Line::from(header),
        Line::from(Span::styled(
            truncate(&item.title, width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    // Two lines of snippet, like a clamped card body.
    let wrapped = textwrap::wrap(&item.snippet, width.max(10));
    for (i, l) in wrapped.iter().take(2).enumerate() {
        let text = if i == 1 && wrapped.len() > 2 {
            truncate(&format!("{}…", l), width)
        } else {
            l.to_string()
        };
        lines.push(Line::from(Span::styled(text, Style::default().fg(Color::Gray))));
    }
    lines.push(Line::from(""));

    ListItem::new(Text::from(lines))
}

fn render_list(f: &mut Frame, area: Rect, items: Vec<ListItem<'static>>, selected: usize, title: String) {
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray))
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::Rgb(30, 60, 45)))
        .highlight_symbol("▌ ");
    let mut list_state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_empty(f: &mut Frame, area: Rect, title: &str, body: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(body.to_string(), Style::default().fg(Color::Gray))),
    ];
    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Gray)));
    f.render_widget(p, area);
}

fn render_feed(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let state = app.shell.state();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let scrape_label = if state.is_loading {
        format!("{} Scraping...", SPINNER[app.spinner % SPINNER.len()])
    } else {
        "Scrape Now (r)".to_string()
    };
    let controls = Line::from(vec![
        Span::raw(" Source: "),
        Span::styled(state.source_filter.label(), Style::default().fg(Color::Green)),
        Span::raw(" (f)   "),
        Span::styled(scrape_label, Style::default().add_modifier(Modifier::BOLD)),
    ]);
    f.render_widget(Paragraph::new(controls), chunks[0]);

    let visible = state.visible_feed();
    if visible.is_empty() {
        if state.is_loading {
            render_empty(f, chunks[1], "Scraping...", "Pulling fresh content from Reddit and Newsletters.");
        } else {
            render_empty(
                f,
                chunks[1],
                "No content yet",
                "Press r to start pulling fresh content from Reddit and Newsletters.",
            );
        }
        return;
    }

    let width = chunks[1].width.saturating_sub(4) as usize;
    let items = visible
        .iter()
        .map(|item| {
            let badge = state
                .is_saved(&item.id)
                .then(|| Span::styled("saved", Style::default().fg(Color::Green)));
            card(item, width, badge)
        })
        .collect();
    render_list(f, chunks[1], items, app.selected, format!(" Feed · {} items ", visible.len()));
}

fn render_saved(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let state = app.shell.state();
    let filtered = state.filtered_saved();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(7)])
        .split(area);

    let cursor = if app.mode == InputMode::Search { "_" } else { "" };
    let search = Line::from(vec![
        Span::raw(" Search: "),
        Span::styled(
            format!("{}{}", state.search_query, cursor),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("   {} items found", filtered.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(search), chunks[0]);

    if filtered.is_empty() {
        render_empty(
            f,
            chunks[1],
            "Your library is empty",
            "Save items from your feed to see them here and generate viral hooks.",
        );
        return;
    }

    let width = chunks[1].width.saturating_sub(4) as usize;
    let items = filtered
        .iter()
        .map(|item| {
            let badge = if item.generating_hooks() {
                Some(Span::styled(
                    format!("{} generating hooks", SPINNER[app.spinner % SPINNER.len()]),
                    Style::default().fg(Color::Yellow),
                ))
            } else if item.hooks.is_some() {
                Some(Span::styled("✓ Hooks Ready", Style::default().fg(Color::Green)))
            } else {
                None
            };
            card(item, width, badge)
        })
        .collect();
    render_list(f, chunks[1], items, app.selected, " Your Saved Library ".to_string());

    render_hooks(f, chunks[2], app);
}

fn render_hooks(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let lines: Vec<Line> = match app.selected_saved_item().and_then(|i| i.hooks.as_ref()) {
        Some(hooks) => hooks
            .iter()
            .enumerate()
            .map(|(i, hook)| {
                let style = if i == app.hook_cursor {
                    Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC | Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::ITALIC)
                };
                Line::from(Span::styled(format!("\"{}\"", hook.text), style))
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "Press g to generate hooks for the selected item.",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" AI Suggested Hooks "),
    );
    f.render_widget(p, area);
}

fn render_settings(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let mut lines = vec![
        Line::from(Span::styled("Account Settings", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            "Managing sources, API keys and workspace members is coming soon.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("service: "),
            Span::styled(app.shell.service_name().to_string(), Style::default().fg(Color::Yellow)),
        ]),
    ];
    for (key, value) in &app.settings {
        lines.push(Line::from(vec![
            Span::raw(format!("{}: ", key)),
            Span::styled(value.clone(), Style::default().fg(Color::Yellow)),
        ]));
    }

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Gray)));
    f.render_widget(p, area);
}

fn key(k: &str) -> Span<'static> {
    Span::styled(format!(" {} ", k), Style::default().bg(Color::DarkGray).fg(Color::White))
}

fn render_footer(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let mut spans = vec![key("q"), Span::raw(" Quit  "), key("1-3"), Span::raw(" Tabs  ")];
    match (app.mode, app.shell.state().active_tab) {
        (InputMode::Search, _) => {
            spans = vec![key("Enter/Esc"), Span::raw(" Done  "), key("type"), Span::raw(" Filter  ")];
        }
        (_, AppTab::Feed) => spans.extend([
            key("r"),
            Span::raw(" Scrape  "),
            key("s"),
            Span::raw(" Save  "),
            key("f"),
            Span::raw(" Source  "),
        ]),
        (_, AppTab::Saved) => spans.extend([
            key("g"),
            Span::raw(" Hooks  "),
            key("n/c"),
            Span::raw(" Next/Copy  "),
            key("d"),
            Span::raw(" Delete  "),
            key("/"),
            Span::raw(" Search  "),
        ]),
        (_, AppTab::Settings) => {}
    }
    if app.mode == InputMode::Normal {
        spans.extend([key("j/k"), Span::raw(" Move  ")]);
    }

    let footer = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}
