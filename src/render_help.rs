use crate::tui_mode::app::App;
use crate::tui_mode::*;

pub fn render_help(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" tapcalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let section = Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);

    let help_text = vec![
        Line::from(Span::styled("tapcalc - Keypad Calculator", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("Keys:", section)),
        Line::from("  0-9       : Digits (a leading 0 is ignored)"),
        Line::from("  .  ,      : Decimal point (3+. becomes 3+0.)"),
        Line::from("  +  -      : Addition, subtraction"),
        Line::from("  *  /      : Multiplication (×), division (÷)"),
        Line::from("  ( )       : Parentheses"),
        Line::from("  = / Enter : Evaluate, the result replaces the expression"),
        Line::from("  Backspace : Delete the last character"),
        Line::from("  Esc / Del : Clear the expression"),
        Line::from(""),
        Line::from(Span::styled("Rules:", section)),
        Line::from("  Pressing an operator after an operator replaces it (3+ - gives 3-)."),
        Line::from("  × and ÷ bind tighter than + and -, both left to right."),
        Line::from("  A minus at the start or after ( negates the next number."),
        Line::from("  Any failure shows Error; the next key starts over."),
        Line::from(""),
        Line::from(Span::styled("History:", section)),
        Line::from("  ↑ ↓       : Recall a previous expression"),
        Line::from("  PgUp/PgDn : Page through history"),
        Line::from("  Mouse wheel : Scroll through history"),
        Line::from("  F2        : Toggle step-by-step details with timing"),
        Line::from(""),
        Line::from(Span::styled("Examples:", section)),
        Line::from("  12+3×(4-1)   = 21"),
        Line::from("  7÷2          = 3.5"),
        Line::from("  (-2)×3       = -6"),
        Line::from("  5÷0          = Error"),
        Line::from(""),
        Line::from("  F1 / Esc : Close this help, q : Quit"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
