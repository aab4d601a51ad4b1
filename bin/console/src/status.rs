/// Single-line status area.
///
/// Each message replaces the previous one. When echo is on, messages are also
/// printed to stdout as they are set.
#[derive(Debug, Default)]
pub struct StatusLine {
    latest: Option<String>,
    echo: bool,
}

impl StatusLine {
    pub const fn new(echo: bool) -> Self {
        Self { latest: None, echo }
    }

    pub fn set(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.echo {
            println!("{message}");
        }
        self.latest = Some(message);
    }

    /// Most recent message, if any was set.
    pub fn latest(&self) -> Option<&str> {
        self.latest.as_deref()
    }
}
