//! Line-oriented terminal front end.
//!
//! Stands in for a graphical UI: it only renders what the services return and
//! forwards user actions back to them.

use std::io::{self, BufRead, Write};

use services::{AppServices, TopicCard};
use storage::repository::ProgressRepository;
use thiserror::Error;
use topic_core::model::{MAX_PER_CATEGORY, SelectionSettings};
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs a topic number")]
    MissingIndex(&'static str),
    #[error("`{0}` is not a topic number")]
    InvalidIndex(String),
    #[error("`per` needs a number between 1 and 5")]
    InvalidCount,
    #[error("`stable` takes `on` or `off`")]
    InvalidToggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Learn(usize),
    Unlearn(usize),
    Note(usize, String),
    Reset,
    Summary,
    Categories(Option<Vec<String>>),
    PerCategory(u32),
    Stable(bool),
    Export,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` for unknown commands or malformed arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let cmd = match word {
            "show" | "s" => Self::Show,
            "learn" => Self::Learn(parse_index("learn", rest)?),
            "unlearn" => Self::Unlearn(parse_index("unlearn", rest)?),
            "note" => {
                let (index, text) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(i, t)| (i, t.trim()));
                Self::Note(parse_index("note", index)?, text.to_owned())
            }
            "reset" => Self::Reset,
            "summary" => Self::Summary,
            "categories" | "cats" => {
                if rest.is_empty() {
                    Self::Categories(None)
                } else {
                    Self::Categories(Some(
                        rest.split(',')
                            .map(str::trim)
                            .filter(|c| !c.is_empty())
                            .map(str::to_owned)
                            .collect(),
                    ))
                }
            }
            "per" => Self::PerCategory(rest.parse().map_err(|_| CommandError::InvalidCount)?),
            "stable" => match rest {
                "on" | "true" | "yes" => Self::Stable(true),
                "off" | "false" | "no" => Self::Stable(false),
                _ => return Err(CommandError::InvalidToggle),
            },
            "export" => Self::Export,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(Some(cmd))
    }
}

fn parse_index(command: &'static str, raw: &str) -> Result<usize, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingIndex(command));
    }
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidIndex(raw.to_owned())),
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Interactive session over any reader/writer pair.
pub struct Shell<'a, R> {
    app: &'a mut AppServices<R>,
    settings: SelectionSettings,
    board: Vec<TopicCard>,
}

impl<'a, R: ProgressRepository> Shell<'a, R> {
    #[must_use]
    pub fn new(app: &'a mut AppServices<R>, settings: SelectionSettings) -> Self {
        Self {
            app,
            settings,
            board: Vec::new(),
        }
    }

    /// Render the board once, then process commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading input or writing output fails.
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, out: &mut O) -> io::Result<()> {
        self.show(out)?;
        for line in input.lines() {
            let line = line?;
            let flow = match Command::parse(&line) {
                Ok(Some(cmd)) => {
                    debug!(?cmd, "shell command");
                    self.execute(cmd, out)?
                }
                Ok(None) => Flow::Continue,
                Err(err) => {
                    writeln!(out, "{err}")?;
                    Flow::Continue
                }
            };
            out.flush()?;
            if matches!(flow, Flow::Quit) {
                break;
            }
        }
        Ok(())
    }

    fn execute<O: Write>(&mut self, cmd: Command, out: &mut O) -> io::Result<Flow> {
        match cmd {
            Command::Show => self.show(out)?,
            Command::Learn(n) => {
                if let Some(card) = self.card(n, out)? {
                    let entry = self.app.progress_mut().mark_learned(&card.key());
                    writeln!(
                        out,
                        "Marked \"{}\" as learned on {}",
                        card.topic.title, entry.learned_on
                    )?;
                    self.refresh(n);
                }
            }
            Command::Unlearn(n) => {
                if let Some(card) = self.card(n, out)? {
                    if self.app.progress_mut().unmark_learned(&card.key()) {
                        writeln!(out, "Unmarked \"{}\"", card.topic.title)?;
                    } else {
                        writeln!(out, "\"{}\" was not marked as learned", card.topic.title)?;
                    }
                    self.refresh(n);
                }
            }
            Command::Note(n, text) => {
                if let Some(card) = self.card(n, out)? {
                    self.app.progress_mut().save_note(&card.key(), text);
                    writeln!(out, "Note saved")?;
                    self.refresh(n);
                }
            }
            Command::Reset => {
                self.app.progress_mut().reset_progress();
                for n in 1..=self.board.len() {
                    self.refresh(n);
                }
                writeln!(out, "Progress cleared")?;
            }
            Command::Summary => self.summary(out)?,
            Command::Categories(None) => {
                for name in self.app.topics().categories() {
                    let mark = if self.settings.categories().contains(&name) {
                        "*"
                    } else {
                        " "
                    };
                    writeln!(out, "{mark} {name}")?;
                }
            }
            Command::Categories(Some(categories)) => self.update_settings(
                categories,
                self.settings.per_category(),
                self.settings.stable(),
                out,
            )?,
            Command::PerCategory(n) => self.update_settings(
                self.settings.categories().to_vec(),
                n,
                self.settings.stable(),
                out,
            )?,
            Command::Stable(stable) => self.update_settings(
                self.settings.categories().to_vec(),
                self.settings.per_category(),
                stable,
                out,
            )?,
            Command::Export => match self.app.progress().export_json() {
                Ok(json) => writeln!(out, "{json}")?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::Help => print_help(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show<O: Write>(&mut self, out: &mut O) -> io::Result<()> {
        match self.app.daily_board(&self.settings) {
            Ok(board) => self.present(board, out),
            Err(err) => writeln!(out, "{err}"),
        }
    }

    fn present<O: Write>(&mut self, board: Vec<TopicCard>, out: &mut O) -> io::Result<()> {
        self.board = board;
        if self.board.is_empty() {
            writeln!(out, "Please select at least one category.")?;
        } else {
            if self.settings.stable() {
                writeln!(
                    out,
                    "Topics for {}",
                    self.app.topics().seed_for_today()
                )?;
            } else {
                writeln!(out, "Topics (shuffled)")?;
            }
            writeln!(out)?;
            for (i, card) in self.board.iter().enumerate() {
                write_card(out, i + 1, card)?;
            }
        }
        writeln!(out, "---")?;
        self.summary(out)
    }

    fn summary<O: Write>(&self, out: &mut O) -> io::Result<()> {
        let summary = self.app.progress().summary();
        writeln!(out, "Total topics seen: {}", summary.distinct_seen)?;
        writeln!(out, "Total learned: {}", summary.learned)
    }

    fn card<O: Write>(&self, n: usize, out: &mut O) -> io::Result<Option<TopicCard>> {
        match self.board.get(n - 1) {
            Some(card) => Ok(Some(card.clone())),
            None => {
                writeln!(out, "No topic #{n} on the board; run `show` first")?;
                Ok(None)
            }
        }
    }

    fn refresh(&mut self, n: usize) {
        if let Some(slot) = self.board.get_mut(n - 1) {
            *slot = self.app.progress().card_for(&slot.topic);
        }
    }

    fn update_settings<O: Write>(
        &mut self,
        categories: Vec<String>,
        per_category: u32,
        stable: bool,
        out: &mut O,
    ) -> io::Result<()> {
        match self.app.board_for(&categories, per_category, stable) {
            Ok((settings, board)) => {
                self.settings = settings;
                self.present(board, out)
            }
            Err(err) => writeln!(out, "{err}"),
        }
    }
}

fn write_card<O: Write>(out: &mut O, index: usize, card: &TopicCard) -> io::Result<()> {
    writeln!(out, "[{index}] {}", card.topic.title)?;
    writeln!(out, "    Category: {}", card.topic.category)?;
    writeln!(out, "    {}", card.topic.description)?;
    match &card.learned {
        Some(entry) => writeln!(out, "    Learned on {}", entry.learned_on)?,
        None => writeln!(out, "    Not learned yet")?,
    }
    if !card.note.is_empty() {
        writeln!(out, "    Note: {}", card.note)?;
    }
    writeln!(out)
}

fn print_help<O: Write>(out: &mut O) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  show                   render today's topics")?;
    writeln!(out, "  learn <n>              mark topic n as learned")?;
    writeln!(out, "  unlearn <n>            unmark topic n")?;
    writeln!(out, "  note <n> [text]        save a note for topic n")?;
    writeln!(out, "  categories [a,b,...]   list or select categories")?;
    writeln!(out, "  per <n>                topics per category (1-{MAX_PER_CATEGORY})")?;
    writeln!(out, "  stable on|off          keep today's pick stable")?;
    writeln!(out, "  summary                seen and learned counts")?;
    writeln!(out, "  export                 dump progress as JSON")?;
    writeln!(out, "  reset                  clear all progress")?;
    writeln!(out, "  quit")
}
