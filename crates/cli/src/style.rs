use folio_migration::Status;
use std::io::IsTerminal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Green,
    Yellow,
    Red,
    Dim,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::Green => "32",
            Color::Yellow => "33",
            Color::Red => "31",
            Color::Dim => "2",
        }
    }

    pub fn for_status(status: Status) -> Self {
        match status {
            Status::Applied => Color::Green,
            Status::Pending => Color::Yellow,
            Status::Ignored => Color::Dim,
            Status::Error => Color::Red,
        }
    }
}

/// Colour decisions for stdout and stderr, made once per command.
#[derive(Clone, Copy, Debug)]
pub struct Style {
    use_color_stdout: bool,
    use_color_stderr: bool,
}

impl Style {
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();

        Self {
            use_color_stdout: !no_color && std::io::stdout().is_terminal(),
            use_color_stderr: !no_color && std::io::stderr().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self {
            use_color_stdout: false,
            use_color_stderr: false,
        }
    }

    pub fn ok(&self) -> String {
        self.paint_stdout(Color::Green, "✔")
    }

    pub fn fail(&self) -> String {
        self.paint_stdout(Color::Red, "✘")
    }

    pub fn bullet(&self) -> String {
        "•".to_string()
    }

    pub fn arrow(&self) -> String {
        self.paint_stdout(Color::Yellow, "→")
    }

    pub fn status(&self, status: Status) -> String {
        self.paint_stdout(Color::for_status(status), status.as_str())
    }

    pub fn paint_stdout(&self, color: Color, text: &str) -> String {
        if self.use_color_stdout {
            paint(color, text)
        } else {
            text.to_string()
        }
    }

    pub fn paint_stderr(&self, color: Color, text: &str) -> String {
        if self.use_color_stderr {
            paint(color, text)
        } else {
            text.to_string()
        }
    }
}

fn paint(color: Color, text: &str) -> String {
    format!("\u{1b}[{}m{text}\u{1b}[0m", color.code())
}
