//! UI Rendering Logic

use ratatui::{prelude::*, widgets::*};

use crate::address::{AccountBadge, AddressView};
use crate::import::WizardStep;
use crate::tui::app::{App, Field};

/// Width of the card's actions menu
const MENU_WIDTH: u16 = 26;
/// Height of the card's actions menu
const MENU_HEIGHT: u16 = 3;

/// Render the whole wizard
pub fn render_ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(7), // Address card
            Constraint::Min(0),    // Step form
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app.step());
    render_address_card(frame, chunks[1], app.session.wizard().address_view());
    match app.step() {
        WizardStep::Credentials => render_credentials_step(frame, chunks[2], app),
        WizardStep::NamePassword => render_name_password_step(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    if app.session.wizard().address_view().is_actions_menu_open() {
        render_actions_menu(frame, chunks[1], app);
    }
}

/// Menu hangs below the card's right edge, or above it once flipped
fn render_actions_menu(frame: &mut Frame, card: Rect, app: &mut App) {
    let x = card.right().saturating_sub(MENU_WIDTH + 1);
    let below = Rect::new(x, card.bottom().saturating_sub(1), MENU_WIDTH, MENU_HEIGHT);
    app.session.on_menu_measured(below.bottom());

    let view = app.session.wizard().address_view();
    let area = if view.is_menu_moved_up() {
        Rect::new(x, card.y.saturating_sub(MENU_HEIGHT - 1), MENU_WIDTH, MENU_HEIGHT)
    } else {
        below
    }
    .intersection(frame.area());

    let label = if view.is_hidden() {
        "Enter: Show account"
    } else {
        "Enter: Hide account"
    };
    let menu = Paragraph::new(label).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(menu, area);
}

/// Small colour strip standing in for the identicon
fn identicon_spans(value: &str) -> Vec<Span<'static>> {
    value
        .bytes()
        .rev()
        .take(5)
        .map(|b| Span::styled("■", Style::default().fg(Color::Indexed(b.wrapping_mul(37)))))
        .collect()
}

fn render_header(frame: &mut Frame, area: Rect, step: WizardStep) {
    let (current, total) = step.step_number();
    let header = Paragraph::new(format!(
        "Import Cesium wallet - Step {} of {} - {}",
        current,
        total,
        step.title()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

fn render_address_card(frame: &mut Frame, area: Rect, view: &AddressView) {
    let recoded = view.recoded();

    let mut name_line = Vec::new();
    if let Some(value) = view.identicon_value() {
        name_line.extend(identicon_spans(value));
        name_line.push(Span::raw(" "));
    }
    match view.badge() {
        Some(AccountBadge::Hardware) => name_line.push(Span::raw("[hw] ")),
        Some(AccountBadge::External) => name_line.push(Span::raw("[ext] ")),
        None => {}
    }
    name_line.push(Span::styled(
        view.display_name(),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let address = recoded
        .formatted
        .clone()
        .or_else(|| view.props().address.clone())
        .unwrap_or_else(|| "<unknown>".to_string());

    let mut lines = vec![
        Line::from(name_line),
        Line::from(Span::styled(address, Style::default().fg(Color::White))),
    ];
    if let Some(legacy) = &recoded.legacy_encoding {
        lines.push(Line::from(Span::styled(
            format!("Ğ1v1: {}", legacy),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(parent) = view.parent_name_suri() {
        lines.push(Line::from(Span::styled(
            parent,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Account ({})", view.icon_theme()));
    if let Some(banner) = view.chain_banner() {
        let color = banner
            .color
            .as_deref()
            .and_then(|c| c.parse::<Color>().ok())
            .unwrap_or(Color::Magenta);
        block = block.title(
            Line::from(Span::styled(
                format!(" {} ", banner.name),
                Style::default().fg(Color::Black).bg(color),
            ))
            .right_aligned(),
        );
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App, field: Field, warning: Option<&str>) {
    let Some(input) = app.input(field) else {
        return;
    };
    let is_focused = app.focused_field() == field;

    let display_value = if field.is_secret() {
        "*".repeat(input.value().chars().count())
    } else {
        input.value().to_string()
    };

    let border_color = if warning.is_some() {
        Color::Red
    } else if is_focused {
        Color::Yellow
    } else {
        Color::Gray
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(field.label());
    if let Some(warning) = warning {
        block = block.title_bottom(Line::from(warning).style(Style::default().fg(Color::Red)));
    }

    frame.render_widget(Paragraph::new(display_value).block(block), area);

    if is_focused {
        frame.set_cursor_position(Position::new(
            area.x + 1 + input.visual_cursor() as u16,
            area.y + 1,
        ));
    }
}

fn render_credentials_step(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.session.wizard().credentials();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Cesium ID
            Constraint::Length(3), // Cesium password
            Constraint::Length(3), // Network
            Constraint::Length(2), // Error
            Constraint::Min(0),
        ])
        .split(area);

    render_input(frame, chunks[0], app, Field::CesiumId, form.id_warning());
    render_input(
        frame,
        chunks[1],
        app,
        Field::CesiumPassword,
        form.password_warning(),
    );

    let network = app
        .selected_network()
        .map(|option| option.text.clone())
        .unwrap_or_default();
    let network_color = if app.focused_field() == Field::Network {
        Color::Yellow
    } else {
        Color::Gray
    };
    let network_widget = Paragraph::new(format!("< {} >", network)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(network_color))
            .title(Field::Network.label()),
    );
    frame.render_widget(network_widget, chunks[2]);

    let message = if form.is_waiting() {
        Line::from(Span::styled(
            "Checking credentials...",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = form.error() {
        Line::from(Span::styled(error, Style::default().fg(Color::Red)))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(message), chunks[3]);

    let next_style = if form.can_proceed() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled("[ Enter: Next ]", next_style)))
            .alignment(Alignment::Center),
        chunks[4],
    );
}

fn render_name_password_step(frame: &mut Frame, area: Rect, app: &App) {
    let wizard = app.session.wizard();
    let form = wizard.name_password();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Password
            Constraint::Length(3), // Repeat
            Constraint::Min(0),
        ])
        .split(area);

    let name_warning = (!form.name().is_empty()).then(|| form.name_error()).flatten();
    render_input(frame, chunks[0], app, Field::Name, name_warning);
    render_input(
        frame,
        chunks[1],
        app,
        Field::NewPassword,
        form.password_error(),
    );
    render_input(
        frame,
        chunks[2],
        app,
        Field::RepeatPassword,
        form.repeat_error(),
    );

    let label = if wizard.is_busy() {
        "Adding the account..."
    } else {
        "[ Enter: Add the account with this Cesium ID ]  [ Esc: Back ]"
    };
    let style = if wizard.can_submit() {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label, style))).alignment(Alignment::Center),
        chunks[3],
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = app
        .status()
        .unwrap_or("Tab: next field | Up/Down: network | Ctrl+A: account actions | Ctrl+C: quit");
    let status = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}
