use crate::error::CliError;
use crate::output;
use crate::style::{Color, Style};
use crate::ui::Ui;

pub fn print(err: &CliError) {
    let style = Style::detect();
    for line in render(err, style) {
        output::error(line);
    }
}

pub fn render(err: &CliError, style: Style) -> Vec<String> {
    let ui = Ui::new(style);
    let mut lines = vec![ui.rule(), "Folio Error".to_string(), ui.rule()];

    lines.push(style.paint_stderr(Color::Red, err.title()));
    lines.push(String::new());

    let sections = [
        ("Reason:", err.reason()),
        ("What this means:", err.meaning()),
        ("Suggested action:", err.action()),
    ];
    for (heading, body) in sections {
        if let Some(body) = body {
            lines.push(heading.to_string());
            lines.push(body.to_string());
            lines.push(String::new());
        }
    }

    lines.push(ui.rule());
    lines
}
