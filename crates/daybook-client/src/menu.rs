//! Interactive menu session.
//!
//! [`Menu`] owns the [`EventStore`] for the lifetime of one session and talks
//! to the user over any `BufRead`/`Write` pair, so tests can drive it with a
//! scripted transcript.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use daybook_core::{CalendarSpan, Event, EventStore, OutputFormat, OutputFormatter, StoreError};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::input;

const MENU: &str = "\nCalendar Manager
1. Add Event
2. Edit Event
3. Delete Event
4. View Events on Specific Date
5. View Events for the Week
6. View Events for the Month
7. View Events for the Year
8. View All Events
9. Exit
Select an option: ";

const DATETIME_HINT: &str = "(yyyy-MM-dd HH:mm)";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Add,
    Edit,
    Delete,
    ViewDate,
    ViewWeek,
    ViewMonth,
    ViewYear,
    ViewAll,
    Exit,
}

impl MenuOption {
    /// Maps the number typed by the user to an option.
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Self::Add),
            2 => Some(Self::Edit),
            3 => Some(Self::Delete),
            4 => Some(Self::ViewDate),
            5 => Some(Self::ViewWeek),
            6 => Some(Self::ViewMonth),
            7 => Some(Self::ViewYear),
            8 => Some(Self::ViewAll),
            9 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// An interactive session over a store.
pub struct Menu<R, W> {
    store: EventStore,
    formatter: OutputFormatter,
    output_format: OutputFormat,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(
        store: EventStore,
        formatter: OutputFormatter,
        output_format: OutputFormat,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            formatter,
            output_format,
            input,
            output,
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Ends the session, handing back the store and the output sink.
    pub fn into_parts(self) -> (EventStore, W) {
        (self.store, self.output)
    }

    /// Runs the menu loop until the user picks Exit or input ends.
    ///
    /// # Errors
    ///
    /// Only I/O and serialization failures end the session with an error;
    /// bad user input is reported and the menu is shown again.
    pub fn run(&mut self) -> ClientResult<()> {
        loop {
            self.output.write_all(MENU.as_bytes())?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                debug!("Input closed, leaving menu");
                return Ok(());
            };

            let Some(choice) = input::parse_choice(&line) else {
                self.say("Invalid input. Please enter a number.")?;
                continue;
            };
            let Some(option) = MenuOption::from_choice(choice) else {
                self.say("Invalid option. Please try again.")?;
                continue;
            };
            if option == MenuOption::Exit {
                info!(events = self.store.len(), "Leaving menu");
                return Ok(());
            }

            match self.dispatch(option) {
                Ok(()) => {}
                Err(ClientError::Input(message)) => {
                    warn!(?option, %message, "Rejected input");
                    self.say(&format!("Invalid input: {message}"))?;
                }
                Err(ClientError::EndOfInput) => {
                    debug!(?option, "Input closed mid-prompt, leaving menu");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Runs a single menu option.
    pub fn dispatch(&mut self, option: MenuOption) -> ClientResult<()> {
        debug!(?option, "Menu option selected");
        match option {
            MenuOption::Add => self.add_event(),
            MenuOption::Edit => self.edit_event(),
            MenuOption::Delete => self.delete_event(),
            MenuOption::ViewDate => {
                let date = input::parse_date(&self.prompt("Enter the date to view events (yyyy-MM-dd): ")?)?;
                self.show_day(date)
            }
            MenuOption::ViewWeek => {
                let date = input::parse_date(&self.prompt("Enter a date to view the week (yyyy-MM-dd): ")?)?;
                self.show_span(CalendarSpan::week_of(date))
            }
            MenuOption::ViewMonth => {
                let (year, month) = input::parse_year_month(
                    &self.prompt("Enter the year and month to view events (yyyy-MM): ")?,
                )?;
                self.show_span(CalendarSpan::month(year, month))
            }
            MenuOption::ViewYear => {
                let year = input::parse_year(&self.prompt("Enter the year to view events: ")?)?;
                self.show_span(CalendarSpan::year(year))
            }
            MenuOption::ViewAll => self.show_all(),
            MenuOption::Exit => Ok(()),
        }
    }

    fn add_event(&mut self) -> ClientResult<()> {
        let event = self.read_event(
            "Enter event title: ",
            &format!("Enter start date and time {DATETIME_HINT}: "),
            &format!("Enter end date and time {DATETIME_HINT}: "),
            "Enter description: ",
        )?;
        self.store.add(event);
        self.say("Event successfully added.")
    }

    fn edit_event(&mut self) -> ClientResult<()> {
        let title = self.prompt("Enter the title of the event to edit: ")?;
        let updated = self.read_event(
            "Enter new title: ",
            &format!("Enter new start date and time {DATETIME_HINT}: "),
            &format!("Enter new end date and time {DATETIME_HINT}: "),
            "Enter new description: ",
        )?;
        match self.store.edit(&title, updated) {
            Ok(()) => self.say("Event updated successfully."),
            Err(StoreError::NotFound { .. }) => self.say("Event not found."),
            Err(e) => Err(e.into()),
        }
    }

    fn delete_event(&mut self) -> ClientResult<()> {
        let title = self.prompt("Enter the title of the event to delete: ")?;
        match self.store.delete(&title) {
            Ok(_) => self.say("Event deleted successfully."),
            Err(StoreError::NotFound { .. }) => self.say("Event not found."),
            Err(e) => Err(e.into()),
        }
    }

    fn read_event(
        &mut self,
        title_prompt: &str,
        start_prompt: &str,
        end_prompt: &str,
        description_prompt: &str,
    ) -> ClientResult<Event> {
        let title = self.prompt(title_prompt)?;
        let start_time = input::parse_datetime(&self.prompt(start_prompt)?)?;
        let end_time = input::parse_datetime(&self.prompt(end_prompt)?)?;
        let description = self.prompt(description_prompt)?;
        Ok(Event::new(title, start_time, end_time, description))
    }

    fn show_day(&mut self, date: NaiveDate) -> ClientResult<()> {
        let text = match self.output_format {
            OutputFormat::Tty => self.formatter.format_day(date, self.store.events_on(date)),
            OutputFormat::Json => json_line(&self.formatter.format_json_day(date, self.store.events_on(date)))?,
        };
        self.write(&text)
    }

    fn show_span(&mut self, span: CalendarSpan) -> ClientResult<()> {
        let text = match self.output_format {
            OutputFormat::Tty => self.formatter.format_span(span, self.store.events_in(span)),
            OutputFormat::Json => json_line(&self.formatter.format_json_span(span, self.store.events_in(span)))?,
        };
        self.write(&text)
    }

    fn show_all(&mut self) -> ClientResult<()> {
        let text = match self.output_format {
            OutputFormat::Tty => self.formatter.format_all(self.store.all_events()),
            OutputFormat::Json => json_line(&self.formatter.format_json_all(self.store.all_events()))?,
        };
        self.write(&text)
    }

    /// Prints `text` without a newline and reads the answer.
    fn prompt(&mut self, text: &str) -> ClientResult<String> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        self.read_line()?.ok_or(ClientError::EndOfInput)
    }

    /// Reads one line without its line ending. `None` at end of input.
    fn read_line(&mut self) -> ClientResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn say(&mut self, message: &str) -> ClientResult<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn write(&mut self, text: &str) -> ClientResult<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}

fn json_line<T: serde::Serialize>(value: &T) -> ClientResult<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}
