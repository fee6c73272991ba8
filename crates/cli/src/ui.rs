use crate::style::Style;
use folio_migration::{Info, Notification};

#[derive(Clone, Copy, Debug)]
pub struct Ui {
    style: Style,
    width: usize,
}

impl Ui {
    pub fn new(style: Style) -> Self {
        Self { style, width: 40 }
    }

    pub fn rule(&self) -> String {
        "-".repeat(self.width)
    }

    pub fn header(&self, title: &str) -> Vec<String> {
        vec![self.rule(), title.to_string(), self.rule()]
    }

    pub fn kv(&self, key: &str, value: &str) -> String {
        let key_pad = 18usize;
        format!("{key:<key_pad$}: {value}")
    }

    pub fn ok_line(&self, message: &str) -> String {
        format!("{} {}", self.style.ok(), message)
    }

    pub fn info_line(&self, message: &str) -> String {
        format!("{} {}", self.style.arrow(), message)
    }

    /// One line per attempted migration while `migrate` runs.
    pub fn progress_line(&self, n: &Notification) -> String {
        let mark = if n.success {
            self.style.ok()
        } else {
            self.style.fail()
        };
        let ms = n.execution_time.as_millis();
        format!("{mark} {} {} ({ms} ms)", n.version, n.description)
    }

    pub fn info_row(&self, info: &Info) -> String {
        let label = format!("{} {}", info.migration.version, info.migration.description);
        let applied_at = info
            .record
            .as_ref()
            .map(|r| r.applied_at.format("%Y-%m-%d %H:%M:%S").to_string());

        self.list_item_with_suffix(&label, &self.style.status(info.status), applied_at.as_deref())
    }

    pub fn list_item_with_suffix(&self, label: &str, status: &str, suffix: Option<&str>) -> String {
        let label_width = 30usize;
        let dots = if label.chars().count() >= label_width {
            String::new()
        } else {
            ".".repeat(label_width - label.chars().count())
        };

        match suffix {
            Some(suffix) if !suffix.is_empty() => {
                format!("  {} {label}{dots} {status} {suffix}", self.style.bullet())
            }
            _ => format!("  {} {label}{dots} {status}", self.style.bullet()),
        }
    }
}
