use tracing::{debug, error};

use crate::domain_name::DomainName;
use crate::logging::LogSink;
use crate::resolver::{ARecord, Lookup};

// Event is everything the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Char(char),
    Backspace,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    // Accepting keystrokes, nothing submitted yet.
    Editing,
    // Showing the results of the last submit, still accepting keystrokes.
    Displayed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// Session is the state of one interactive run: the input being typed and
// the outcome of the last submit. The log sink lives as long as the session.
pub struct Session<L: Lookup> {
    lookup: L,
    _sink: LogSink,
    input_char_limit: usize,
    mode: Mode,
    input: String,
    a_records: Vec<ARecord>,
    cnames: Vec<DomainName>,
    error: String,
}

impl<L: Lookup> Session<L> {
    pub fn new(lookup: L, sink: LogSink, input_char_limit: usize) -> Session<L> {
        Session {
            lookup,
            _sink: sink,
            input_char_limit,
            mode: Mode::Editing,
            input: String::new(),
            a_records: vec![],
            cnames: vec![],
            error: String::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn a_records(&self) -> &[ARecord] {
        &self.a_records
    }

    pub fn cnames(&self) -> &[DomainName] {
        &self.cnames
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn apply(&mut self, event: Event) -> Flow {
        match event {
            Event::Cancel => return Flow::Quit,
            Event::Char(c) => {
                if !c.is_control() && self.input.chars().count() < self.input_char_limit {
                    self.input.push(c);
                }
            }
            Event::Backspace => {
                self.input.pop();
            }
            Event::Submit => self.submit(),
        }
        Flow::Continue
    }

    // Runs both lookups for the current input and replaces everything the
    // previous submit left behind.
    fn submit(&mut self) {
        let mut errors = vec![];

        self.a_records = self.lookup.lookup_a(&self.input).unwrap_or_else(|e| {
            errors.push(e.to_string());
            vec![]
        });
        self.cnames = self.lookup.lookup_cname(&self.input).unwrap_or_else(|e| {
            errors.push(e.to_string());
            vec![]
        });

        for message in &errors {
            error!("{}", message);
        }
        debug!(
            a_records = self.a_records.len(),
            cnames = self.cnames.len(),
            "submitted `{}`",
            self.input
        );

        self.error = errors.join("\n");
        self.mode = Mode::Displayed;
    }
}
