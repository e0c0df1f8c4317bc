use colored::Colorize;

/// Sink for everything a command reports to the user.
pub trait Output {
    fn success(&mut self, message: &str);
    fn error(&mut self, message: &str);
    fn info(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]);

    /// Visual separator between blocks of output.
    fn blank(&mut self) {}
}

/// Writes colored messages to stdout.
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl Output for ConsoleOutput {
    fn success(&mut self, message: &str) {
        println!("{}", message.green());
    }

    fn error(&mut self, message: &str) {
        println!("{}", message.red());
    }

    fn info(&mut self, message: &str) {
        println!("{}", message.cyan());
    }

    fn warning(&mut self, message: &str) {
        println!("{}", message.yellow());
    }

    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        let mut lines = render_table(headers, rows).into_iter();
        if let Some(header) = lines.next() {
            println!("{}", header.bold());
        }
        for line in lines {
            println!("{}", line);
        }
    }

    fn blank(&mut self) {
        println!();
    }
}

/// One captured message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Success(String),
    Error(String),
    Info(String),
    Warning(String),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Keeps messages in memory instead of printing them.
#[derive(Debug, Default)]
pub struct BufferedOutput {
    messages: Vec<Message>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn errors(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Error(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<&[Vec<String>]> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Table { rows, .. } => Some(rows.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl Output for BufferedOutput {
    fn success(&mut self, message: &str) {
        self.messages.push(Message::Success(message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.messages.push(Message::Error(message.to_string()));
    }

    fn info(&mut self, message: &str) {
        self.messages.push(Message::Info(message.to_string()));
    }

    fn warning(&mut self, message: &str) {
        self.messages.push(Message::Warning(message.to_string()));
    }

    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        self.messages.push(Message::Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows.to_vec(),
        });
    }
}

/// Lay out a table as plain text lines: header, rule, then one line per row.
/// Columns are left-aligned and padded to their widest cell plus two spaces.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(pad_row(headers.iter(), &widths));
    lines.push("-".repeat(widths.iter().map(|w| w + 2).sum()));
    for row in rows {
        lines.push(pad_row(row.iter(), &widths));
    }
    lines
}

fn pad_row<S: AsRef<str>>(cells: impl Iterator<Item = S>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = width + 2))
        .collect()
}
