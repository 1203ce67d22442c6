use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use coursedesk_core::flows::{FormState, SignInField, SignUpField};
use coursedesk_core::router::View;

use crate::app::{App, AppState, FormFocus};

use super::styles;

/// Width of the text inside a form input box
const FIELD_WIDTH: usize = 28;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if matches!(app.state, AppState::EnteringPath) {
        render_path_overlay(frame, app);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Courses";

    let header: Vec<Span> = match app.store.session().user() {
        Some(user) => vec![
            Span::styled(format!("Welcome, {}!", user.full_name()), styles::highlight_style()),
            Span::styled("  [o] Sign Out", styles::muted_style()),
        ],
        None => vec![Span::styled("[u] Sign Up  [i] Sign In", styles::muted_style())],
    };
    let header_len: usize = header.iter().map(|s| s.content.chars().count()).sum();

    let mut spans = vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + header_len + 2),
        )),
    ];
    spans.extend(header);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.view {
        View::Home | View::SignOut => render_home(frame, app, area),
        View::Courses => render_courses(frame, app, area),
        View::Account => render_account(frame, app, area),
        View::SignIn => render_sign_in(frame, app, area),
        View::SignUp => render_sign_up(frame, app, area),
        View::NotFound => render_notice(
            frame,
            area,
            "Not Found",
            "Sorry! We couldn't find the page you're looking for.",
        ),
        View::Error => render_notice(
            frame,
            area,
            "Error",
            "Sorry! We just encountered an unexpected error.",
        ),
    }
}

fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Course Catalog", styles::title_style())),
        Line::from(""),
    ];

    if app.is_authenticated() {
        lines.push(Line::from(Span::styled(
            "  You are signed in. Press [a] to view your account.",
            styles::list_item_style(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  Sign in with [i] or create an account with [u].",
            styles::list_item_style(),
        )));
    }
    lines.push(Line::from(Span::styled(
        "  Press [c] to browse courses or [:] to go to a path.",
        styles::muted_style(),
    )));

    frame.render_widget(Paragraph::new(lines).block(content_block(View::Home)), area);
}

fn render_courses(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Course listings are served from {}/courses", app.api.base_url()),
            styles::list_item_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Signed-in users can manage their account with [a].",
            styles::muted_style(),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(content_block(View::Courses)), area);
}

fn render_account(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.store.session();
    let mut lines = vec![Line::from("")];

    if let Some(user) = session.user() {
        let rows = [
            ("Name", user.full_name()),
            ("Email", user.email_address.clone()),
            ("User ID", user.id.clone()),
        ];
        for (label, value) in rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", label), styles::muted_style()),
                Span::styled(value, styles::list_item_style()),
            ]));
        }
        if let Some(minutes) = session.minutes_signed_in() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  Signed in {}m ago", minutes),
                styles::success_style(),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(content_block(View::Account)), area);
}

fn render_notice(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", title), styles::error_style())),
        Line::from(""),
        Line::from(Span::styled(format!("  {}", message), styles::list_item_style())),
        Line::from(""),
        Line::from(Span::styled("  [b] back  [h] home", styles::muted_style())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn content_block(view: View) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false))
        .title(Span::styled(format!(" {} ", view.title()), styles::title_style()))
}

// ============================================================================
// Forms
// ============================================================================

struct FormField<'a> {
    label: &'static str,
    value: &'a str,
    secret: bool,
}

fn render_sign_in(frame: &mut Frame, app: &App, area: Rect) {
    let fields: Vec<FormField> = SignInField::ALL
        .iter()
        .map(|f| FormField {
            label: f.label(),
            value: app.sign_in.value(*f),
            secret: f.is_secret(),
        })
        .collect();

    render_form(
        frame,
        app,
        area,
        "Sign In",
        &fields,
        app.sign_in.state(),
        "Don't have a user account? [Ctrl-L] to sign up!",
    );
}

fn render_sign_up(frame: &mut Frame, app: &App, area: Rect) {
    let fields: Vec<FormField> = SignUpField::ALL
        .iter()
        .map(|f| FormField {
            label: f.label(),
            value: app.sign_up.value(*f),
            secret: f.is_secret(),
        })
        .collect();

    render_form(
        frame,
        app,
        area,
        "Sign Up",
        &fields,
        app.sign_up.state(),
        "Already have a user account? [Ctrl-L] to sign in!",
    );
}

fn render_form(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    fields: &[FormField],
    state: &FormState,
    link: &str,
) {
    let errors = state.errors();
    let error_rows = if errors.is_empty() { 0 } else { errors.len() + 2 };
    let height = (fields.len() + error_rows + 8) as u16;
    let form_area = centered_rect_fixed(56, height, area);

    frame.render_widget(Clear, form_area);

    let mut lines = vec![];

    if !errors.is_empty() {
        lines.push(Line::from(Span::styled("  Validation errors", styles::error_style())));
        for error in errors {
            lines.push(Line::from(Span::styled(format!("   • {}", error), styles::error_style())));
        }
        lines.push(Line::from(""));
    }

    for (i, field) in fields.iter().enumerate() {
        let focused = app.focus == FormFocus::Field(i);
        let style = if focused {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        let shown: String = if field.secret {
            "*".repeat(field.value.chars().count())
        } else {
            field.value.to_string()
        };
        let display = format!("{:<width$}", tail(&shown, FIELD_WIDTH), width = FIELD_WIDTH);
        let cursor = if focused { "▌" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>14}: [", field.label), styles::muted_style()),
            Span::styled(format!("{}{}", display, cursor), style),
            Span::styled("]", styles::muted_style()),
        ]));
    }

    lines.push(Line::from(""));
    let submit_label = if state.is_submitting() {
        format!(" {}... ", title)
    } else {
        format!(" {} ", title)
    };
    lines.push(Line::from(vec![
        Span::raw("          "),
        button(&submit_label, app.focus == FormFocus::Submit),
        Span::raw("   "),
        button(" Cancel ", app.focus == FormFocus::Cancel),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(format!("  {}", link), styles::muted_style())));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(Span::styled(format!(" {} ", title), styles::title_style()))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, form_area);
}

fn button(label: &str, focused: bool) -> Span<'static> {
    if focused {
        Span::styled(format!("[▶{}◀]", label), styles::selected_style())
    } else {
        Span::styled(format!("[ {} ]", label), styles::list_item_style())
    }
}

/// Last `width` characters, so the cursor end of a long value stays visible
fn tail(s: &str, width: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(width)).collect()
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.view {
        View::SignIn | View::SignUp => "[Tab] next | [Enter] select | [Esc] cancel",
        _ => "[h]ome [c]ourses [a]ccount [:]go [b]ack [q]uit",
    };

    let left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => format!(" {} ", app.nav.current()),
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_path_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(48, 3, frame.area());
    frame.render_widget(Clear, area);

    let line = Line::from(vec![
        Span::styled(" Go to: ", styles::muted_style()),
        Span::styled(format!("{}▌", app.path_input), styles::highlight_style()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_end() {
        assert_eq!(tail("abcdef", 3), "def");
        assert_eq!(tail("ab", 3), "ab");
        assert_eq!(tail("ééé", 2), "éé");
    }

    #[test]
    fn test_centered_rect_clamps() {
        let outer = Rect::new(0, 0, 40, 10);
        let inner = centered_rect_fixed(56, 12, outer);
        assert_eq!(inner.width, 40);
        assert_eq!(inner.height, 10);
        assert_eq!(inner.x, 0);

        let inner = centered_rect_fixed(20, 4, outer);
        assert_eq!((inner.x, inner.y), (10, 3));
    }
}
