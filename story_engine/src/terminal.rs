//! Line-based terminal front end: the session I/O for the play loop and the
//! main menu wrapped around it.

use std::fmt::Display;
use std::io::{self, BufRead, ErrorKind, Write};

use story_graph::{ChoiceInput, SessionIo, StepOutcome, StoryError, StoryNode};

use crate::error::ManagerError;
use crate::manager::StoryManager;

/// Reads answers from `input` line by line and writes story text to `output`.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Show a prompt and read one line. `None` once the input is closed.
    ///
    /// Bytes that are not UTF-8 are replaced rather than rejected, so they
    /// reach the caller as ordinary non-numeric input.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> SessionIo for Terminal<R, W> {
    fn present(&mut self, node: &StoryNode) -> io::Result<()> {
        writeln!(self.output, "\n{}\n", node.text())?;
        for (number, option) in node.options() {
            writeln!(self.output, "{number}. {}", option.label)?;
        }
        Ok(())
    }

    fn read_choice(&mut self, node: &StoryNode) -> io::Result<ChoiceInput> {
        let prompt = format!("\nYour choice (1-{}): ", node.option_count());
        match self.prompt(&prompt)? {
            Some(line) => Ok(ChoiceInput::parse(&line)),
            None => Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed")),
        }
    }

    fn report(&mut self, error: &StoryError) -> io::Result<()> {
        match error {
            StoryError::ParseError { .. } => self.say("Please enter a number."),
            other => self.say(format!("{other}. Please try again.")),
        }
    }

    fn announce_end(&mut self, _node: &StoryNode) -> io::Result<()> {
        self.say("\n[The End]")
    }
}

enum Flow {
    Continue,
    Quit,
}

/// The main menu: list, start, resume, save, exit.
///
/// Expected failures such as a bad story number or a missing save file are
/// printed and the menu keeps going. The menu only stops on "exit", on end
/// of input, or when the terminal itself fails.
pub struct Menu<'a, R, W> {
    manager: &'a mut StoryManager,
    terminal: Terminal<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(manager: &'a mut StoryManager, terminal: Terminal<R, W>) -> Self {
        Self { manager, terminal }
    }

    pub fn into_terminal(self) -> Terminal<R, W> {
        self.terminal
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.say("Interactive Story Engine")?;
        self.terminal.say("------------------------")?;

        loop {
            self.terminal.say("\nMain Menu:")?;
            self.terminal.say("1. List available stories")?;
            self.terminal.say("2. Start a new story")?;
            self.terminal.say("3. Load saved progress")?;
            self.terminal.say("4. Save progress")?;
            self.terminal.say("5. Exit")?;

            let Some(line) = self.terminal.prompt("Your choice (1-5): ")? else {
                break;
            };
            let flow = match ChoiceInput::parse(&line) {
                ChoiceInput::Number(1) => self.list_stories().map(|()| Flow::Continue)?,
                ChoiceInput::Number(2) => self.start_story()?,
                ChoiceInput::Number(3) => self.resume()?,
                ChoiceInput::Number(4) => self.save().map(|()| Flow::Continue)?,
                ChoiceInput::Number(5) => Flow::Quit,
                ChoiceInput::Number(_) => {
                    self.terminal.say("Invalid choice. Please try again.")?;
                    Flow::Continue
                }
                ChoiceInput::NotANumber(_) => {
                    self.terminal.say("Please enter a number.")?;
                    Flow::Continue
                }
            };
            if let Flow::Quit = flow {
                break;
            }
        }

        self.terminal.say("Goodbye!")
    }

    fn list_stories(&mut self) -> io::Result<()> {
        if self.manager.story_count() == 0 {
            return self.terminal.say("\nNo stories available.");
        }
        self.terminal.say("\nAvailable Stories:")?;
        for (number, title) in self.manager.list_stories().enumerate() {
            self.terminal.say(format!("{}. {title}", number + 1))?;
        }
        Ok(())
    }

    fn start_story(&mut self) -> io::Result<Flow> {
        self.list_stories()?;
        if self.manager.story_count() == 0 {
            return Ok(Flow::Continue);
        }

        let Some(line) = self.terminal.prompt("Select a story (number): ")? else {
            return Ok(Flow::Quit);
        };
        let index = match ChoiceInput::parse(&line) {
            ChoiceInput::Number(index) => index,
            ChoiceInput::NotANumber(_) => {
                self.terminal.say("Please enter a number.")?;
                return Ok(Flow::Continue);
            }
        };

        if let Err(err) = self.manager.select_story(index) {
            return self.report(err);
        }
        let result = self.manager.start_active(&mut self.terminal);
        self.finish_session(result)
    }

    fn resume(&mut self) -> io::Result<Flow> {
        if let Err(err) = self.manager.load_progress() {
            return self.report(err);
        }
        self.terminal.say("Progress loaded!")?;
        let result = self.manager.play_active(&mut self.terminal);
        self.finish_session(result)
    }

    fn save(&mut self) -> io::Result<()> {
        match self.manager.save_progress() {
            Ok(()) => self.terminal.say("Progress saved!"),
            Err(err) => self.report(err).map(|_| ()),
        }
    }

    fn finish_session(&mut self, result: Result<StepOutcome, ManagerError>) -> io::Result<Flow> {
        match result {
            Ok(StepOutcome::NotStarted) => {
                self.terminal.say("That story has not been started yet.")?;
                Ok(Flow::Continue)
            }
            Ok(_) => Ok(Flow::Continue),
            Err(err) if err.is_end_of_input() => Ok(Flow::Quit),
            Err(err) => self.report(err),
        }
    }

    fn report(&mut self, err: ManagerError) -> io::Result<Flow> {
        if !err.is_expected() {
            tracing::warn!(error = %err, "operation failed");
        }
        self.terminal.say(format!("Error: {err}"))?;
        Ok(Flow::Continue)
    }
}
