// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nanostep-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nanostep and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, header, footer, and help helpers used by TUI rendering.
fn stack_panes_vertically(area: Rect) -> bool {
    area.width < 90
}

fn footer_uses_compact_mode(area: Rect) -> bool {
    area.width < 120
}

fn chain_title(app: &App) -> String {
    let Some(session) = app.state.session() else {
        return " Chain ".to_owned();
    };
    let visible = session.visible().nodes().len();
    let total = session.index().terms().len();
    let undo = session.visible().history().len();
    format!(" Chain: {visible}/{total} terms, {undo} undoable ")
}

/// Notice if there is one, else the evaluation outcome.
fn header_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    if let Some(notice) = app.state.notice() {
        return Line::styled(notice.message.clone(), theme.notice_style(notice.level));
    }
    if app.state.check_in_flight() {
        return Line::styled(
            format!("Checking {}…", app.state.function()),
            theme.notice_style(NoticeLevel::Info),
        );
    }

    let Some(session) = app.state.session() else {
        return Line::styled("No graph loaded", theme.dim_style());
    };
    let function = app.state.function();
    match session.terminal() {
        Outcome::Value(term) => {
            let value = session
                .index()
                .term(term)
                .map(|term| single_line(&term.plain_label()))
                .unwrap_or_else(|| term.to_string());
            Line::styled(format!("✓ {function} evaluates to {value}"), theme.outcome_style(false))
        }
        Outcome::Stuck { reason, .. } => {
            Line::styled(format!("✗ {function} gets stuck: {reason}"), theme.outcome_style(true))
        }
    }
}

fn footer_help_line(app: &App, compact: bool) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    let session = app.state.session();
    let armed = |kind: ActionKind| session.is_some_and(|session| session.targets().is_armed(kind));
    let can_undo = session.is_some_and(|session| session.can_undo());

    if compact {
        spans.push(Span::styled("Actions:", Style::default().fg(FOOTER_LABEL_COLOR)));
        for (kind, key, _) in ACTION_KEYS {
            spans.extend(footer_value_spans(&key.to_string(), !armed(kind)));
        }
        push_footer_entry_maybe_disabled(&mut spans, "UNDO", "u", !can_undo);
    } else {
        for (kind, key, label) in ACTION_KEYS {
            push_footer_entry_maybe_disabled(&mut spans, label, &key.to_string(), !armed(kind));
        }
        push_footer_entry_maybe_disabled(&mut spans, "UNDO", "u", !can_undo);
        push_footer_entry_maybe_disabled(&mut spans, "RESET", "R", session.is_none());
        push_footer_entry_maybe_disabled(&mut spans, "CHECK", "c", !app.can_check);
    }
    push_footer_entry(&mut spans, "HELP", "?");
    push_footer_entry(&mut spans, "QUIT", "q");

    if let Some(message) = app.active_toast() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::styled("Toast:".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::raw(message.to_owned()));
    }

    Line::from(spans)
}

fn help_key_style() -> Style {
    Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    const KEY_WIDTH: usize = 9;
    let key_style = help_key_style();
    let mut lines = vec![Line::styled("Selection", help_header_style())];
    for (key, desc) in [
        ("j / ↓", "select the next visible term"),
        ("k / ↑", "select the previous visible term"),
        ("g / G", "select the first / last term"),
        ("Enter", "reselect the term under the cursor"),
        ("Esc", "clear the selection"),
    ] {
        lines.push(help_kv(key, desc, KEY_WIDTH, key_style));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Navigation (greyed out when unavailable)", help_header_style()));
    for (kind, key, _) in ACTION_KEYS {
        lines.push(help_kv(&key.to_string(), kind.title(), KEY_WIDTH, key_style));
    }
    lines.push(help_kv("u", "Undo the last action", KEY_WIDTH, key_style));
    lines.push(help_kv("R", "Reset to the initial view", KEY_WIDTH, key_style));

    lines.push(Line::raw(""));
    lines.push(Line::styled("Program", help_header_style()));
    lines.push(help_kv("c", "Check the program again", KEY_WIDTH, key_style));
    lines.push(help_kv("?", "Toggle this help", KEY_WIDTH, key_style));
    lines.push(help_kv("q", "Quit", KEY_WIDTH, key_style));
    lines
}

fn render_help(frame: &mut Frame<'_>, app: &App, main_area: Rect) {
    let area = centered_rect(70, 80, main_area);
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(Text::from(help_lines()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(app.theme.panel_border_style(true)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.extend(footer_value_spans(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_spans(value: &str, disabled: bool) -> Vec<Span<'static>> {
    let color = if disabled { Color::DarkGray } else { FOOTER_KEY_COLOR };
    vec![Span::styled(value.to_owned(), Style::default().fg(color).add_modifier(Modifier::BOLD))]
}
