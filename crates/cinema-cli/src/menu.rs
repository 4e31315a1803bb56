//! The interactive booking session.

use std::io::{BufRead, Write};

use cinema_booking::application::command_handlers::{
    handle_book_tickets, handle_change_seats, handle_confirm_booking, handle_schedule_screening,
};
use cinema_booking::application::query_handlers::{get_screening_summary, get_seating_map};
use cinema_booking::domain::aggregates::Screening;
use cinema_booking::domain::commands::{
    BookTickets, ChangeSeats, ConfirmBooking, ScheduleScreening,
};
use cinema_booking::domain::identifier::BookingId;
use cinema_booking::domain::render::MapRenderer;
use cinema_booking::domain::seat::Seat;
use cinema_core::clock::Clock;
use cinema_core::error::DomainError;
use cinema_core::sink::EventSink;
use uuid::Uuid;

use crate::error::AppError;
use crate::input::{
    MenuCommand, parse_booking_id, parse_movie_definition, parse_seat_position,
    parse_ticket_count,
};

const MOVIE_PROMPT: &str =
    "Please define movie title and seating map in [Title] [Row] [SeatsPerRow] format:";
const TICKETS_PROMPT: &str =
    "Enter number of tickets to book, or enter blank to go back to main menu:";
const RESEAT_PROMPT: &str =
    "Enter blank to accept seat selection, or enter new seating position:";
const BOOKING_ID_PROMPT: &str = "Please enter your booking ID:";
const FAREWELL: &str = "Thank you for using GIC Cinemas system. Bye!";

/// Whether the session keeps going after a menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One operator at the counter: reads commands from `input` and writes
/// prompts, maps and messages to `output`.
pub struct Session<'a, R, W> {
    input: R,
    output: W,
    clock: &'a dyn Clock,
    sink: &'a dyn EventSink,
    renderer: MapRenderer,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Creates a session over the given terminal streams.
    #[must_use]
    pub fn new(input: R, output: W, clock: &'a dyn Clock, sink: &'a dyn EventSink) -> Self {
        Self {
            input,
            output,
            clock,
            sink,
            renderer: MapRenderer::default(),
        }
    }

    /// Runs the session: asks for the movie, then serves the main menu until
    /// the operator exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the terminal cannot be read or written, and
    /// `AppError::Domain` for booking failures the session cannot report
    /// back to the operator.
    pub fn run(mut self) -> Result<(), AppError> {
        let Some(mut screening) = self.define_movie()? else {
            return Ok(());
        };

        loop {
            let summary = get_screening_summary(&screening);
            let menu = format!(
                "Welcome to GIC Cinemas\n\
                 [1] Book tickets for {} ({} seats available)\n\
                 [2] Check bookings\n\
                 [3] Exit\n\
                 Please enter your selection:",
                summary.title, summary.available_seats
            );
            let Some(selection) = self.prompt(&menu)? else {
                return Ok(());
            };

            let flow = match MenuCommand::parse(&selection) {
                MenuCommand::BookTickets => self.book_tickets(&mut screening)?,
                MenuCommand::CheckBookings => self.check_bookings(&screening)?,
                MenuCommand::Exit => {
                    writeln!(self.output, "{FAREWELL}")?;
                    tracing::info!("exiting the program");
                    Flow::Exit
                }
                MenuCommand::Invalid => {
                    writeln!(
                        self.output,
                        "Invalid selection, Please refer the instructions again.\n"
                    )?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                self.output.flush()?;
                return Ok(());
            }
        }
    }

    fn define_movie(&mut self) -> Result<Option<Screening>, AppError> {
        loop {
            let Some(line) = self.prompt(MOVIE_PROMPT)? else {
                return Ok(None);
            };
            let movie = match parse_movie_definition(&line) {
                Ok(movie) => movie,
                Err(err) => {
                    tracing::error!(input = %line, error = %err, "invalid movie definition");
                    writeln!(self.output, "{err}\n")?;
                    continue;
                }
            };

            let command = ScheduleScreening {
                correlation_id: Uuid::new_v4(),
                screening_id: Uuid::new_v4(),
                title: movie.title,
                rows: movie.rows,
                seats_per_row: movie.seats_per_row,
            };
            match handle_schedule_screening(&command, self.clock, self.sink) {
                Ok(result) => {
                    writeln!(self.output)?;
                    return Ok(Some(result.outcome));
                }
                Err(DomainError::Validation(_)) => {
                    writeln!(
                        self.output,
                        "Invalid input format, {MOVIE_PROMPT}\n"
                    )?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn book_tickets(&mut self, screening: &mut Screening) -> Result<Flow, AppError> {
        loop {
            let Some(line) = self.prompt(TICKETS_PROMPT)? else {
                return Ok(Flow::Exit);
            };
            let tickets = match parse_ticket_count(&line) {
                Ok(Some(tickets)) => tickets,
                Ok(None) => {
                    writeln!(self.output)?;
                    return Ok(Flow::Continue);
                }
                Err(err) => {
                    writeln!(self.output, "{err}\n")?;
                    continue;
                }
            };

            let command = BookTickets {
                correlation_id: Uuid::new_v4(),
                tickets,
            };
            let placed = match handle_book_tickets(&command, screening, self.clock, self.sink) {
                Ok(result) => result.outcome,
                Err(DomainError::CapacityExhausted { requested, .. })
                    if requested > screening.available_seats() =>
                {
                    writeln!(
                        self.output,
                        "Sorry, there are only {} seats available.\n",
                        screening.available_seats()
                    )?;
                    continue;
                }
                Err(DomainError::CapacityExhausted { requested, .. }) => {
                    writeln!(
                        self.output,
                        "Sorry, {requested} tickets cannot be placed with the default seating.\n"
                    )?;
                    continue;
                }
                Err(err @ DomainError::CorruptedState(_)) => {
                    writeln!(self.output, "Unable to create booking, {err}\n")?;
                    return Ok(Flow::Continue);
                }
                Err(err) => return Err(err.into()),
            };

            writeln!(
                self.output,
                "\nSuccessfully reserved {tickets} {} tickets.",
                screening.config().title()
            )?;
            self.print_map(screening, &placed.booking_id)?;
            return self.choose_seats(screening, &placed.booking_id);
        }
    }

    fn choose_seats(
        &mut self,
        screening: &mut Screening,
        booking_id: &BookingId,
    ) -> Result<Flow, AppError> {
        loop {
            let Some(line) = self.prompt(RESEAT_PROMPT)? else {
                return Ok(Flow::Exit);
            };
            match parse_seat_position(&line) {
                Ok(None) => break,
                Ok(Some(start)) => self.change_seats(screening, booking_id, start)?,
                Err(err) => writeln!(self.output, "{err}\n")?,
            }
        }

        let command = ConfirmBooking {
            correlation_id: Uuid::new_v4(),
            booking_id: booking_id.clone(),
        };
        handle_confirm_booking(&command, screening, self.clock, self.sink)?;
        writeln!(self.output, "\nBooking id: {booking_id} confirmed.\n")?;
        Ok(Flow::Continue)
    }

    fn change_seats(
        &mut self,
        screening: &mut Screening,
        booking_id: &BookingId,
        start: Seat,
    ) -> Result<(), AppError> {
        let command = ChangeSeats {
            correlation_id: Uuid::new_v4(),
            booking_id: booking_id.clone(),
            start,
        };
        match handle_change_seats(&command, screening, self.clock, self.sink) {
            Ok(_) => {}
            Err(DomainError::Validation(_)) => {
                writeln!(self.output, "Invalid seat number: {start}")?;
            }
            Err(DomainError::CapacityExhausted { .. }) => {
                writeln!(
                    self.output,
                    "Unable to change booking due to insufficient seats."
                )?;
            }
            Err(err) => return Err(err.into()),
        }
        self.print_map(screening, booking_id)
    }

    fn check_bookings(&mut self, screening: &Screening) -> Result<Flow, AppError> {
        let Some(line) = self.prompt(BOOKING_ID_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        match parse_booking_id(&line) {
            Some(booking_id) => self.print_map(screening, &booking_id)?,
            None => writeln!(self.output)?,
        }
        Ok(Flow::Continue)
    }

    fn print_map(&mut self, screening: &Screening, booking_id: &BookingId) -> Result<(), AppError> {
        match get_seating_map(screening, booking_id, &self.renderer) {
            Ok(view) => {
                writeln!(self.output, "\nBooking id: {}", view.booking_id)?;
                writeln!(self.output, "Selected seats:\n")?;
                writeln!(self.output, "{}", view.map)?;
            }
            Err(DomainError::NotFound(_)) => {
                writeln!(self.output, "\nBooking ID {booking_id} not found.\n")?;
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    /// Writes `text` and the `> ` marker, then reads one line. Returns
    /// `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{text}\n> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}
