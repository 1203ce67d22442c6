//! Keyboard input handling for the TUI.
//!
//! This module translates key events into navigation and form actions.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use coursedesk_core::router::{paths, View};

use crate::app::{App, AppState, FormFocus};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if matches!(app.state, AppState::EnteringPath) {
        handle_path_input(app, key);
        return Ok(false);
    }

    // Any key press clears the previous status message
    app.status_message = None;

    if matches!(app.view, View::SignIn | View::SignUp) {
        handle_form_input(app, key).await;
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Char('h') => app.navigate(paths::HOME),
        KeyCode::Char('c') => app.navigate(paths::COURSES),
        KeyCode::Char('a') => app.navigate(paths::ACCOUNT),
        KeyCode::Char('i') => app.navigate(paths::SIGN_IN),
        KeyCode::Char('u') => app.navigate(paths::SIGN_UP),
        KeyCode::Char('o') => app.navigate(paths::SIGN_OUT),
        KeyCode::Char('b') | KeyCode::Backspace => app.go_back(),
        KeyCode::Char(':') => app.start_path_prompt(),
        _ => {}
    }
    Ok(false)
}

fn handle_path_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.path_input.clear();
            app.state = AppState::Normal;
        }
        KeyCode::Enter => app.finish_path_prompt(),
        KeyCode::Backspace => {
            app.path_input.pop();
        }
        KeyCode::Char(c) => app.push_path_char(c),
        _ => {}
    }
}

async fn handle_form_input(app: &mut App, key: KeyEvent) {
    let field_count = app.form_field_count();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('l') {
            app.switch_form();
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Down | KeyCode::Tab => {
            app.focus = app.focus.next(field_count);
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.focus = app.focus.prev(field_count);
        }
        KeyCode::Enter => match app.focus {
            FormFocus::Field(i) if i + 1 < field_count => {
                app.focus = FormFocus::Field(i + 1);
            }
            // Enter on the last field submits, like a browser form
            FormFocus::Field(_) | FormFocus::Submit => {
                app.focus = FormFocus::Submit;
                app.submit_form().await;
            }
            FormFocus::Cancel => app.cancel_form(),
        },
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Char(c) => app.type_char(c),
        _ => {}
    }
}
