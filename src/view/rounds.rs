use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, html};

use crate::error::TrackerError;
use crate::model::{ActiveRoundView, DATE_FORMAT, Round, format_clock};
use crate::view::index::render_head;

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[must_use]
pub fn render_active_board(board: &[ActiveRoundView]) -> Markup {
    html! {
        @if board.is_empty() {
            p class="empty" { "No golfers are currently on the course." }
        } @else {
            table class="styled-table" id="active-rounds" {
                thead {
                    tr {
                        th { "Name" }
                        th { "Group Size" }
                        th { "Transport" }
                        th { "Holes" }
                        th { "Start Time" }
                        th { "Time Elapsed" }
                    }
                }
                tbody {
                    @for entry in board {
                        @let round = &entry.round;
                        tr class=[entry.overdue.then_some("overdue")] {
                            td { (round.golfer_name) }
                            td { (round.attributes.group_size) }
                            td { (round.attributes.transport) }
                            td { (optional_cell(round.attributes.holes)) }
                            td { (format_clock(&round.start_time)) }
                            td { (entry.elapsed) }
                        }
                    }
                }
            }
        }
    }
}

/// `<option>` list for the end-round picker.
#[must_use]
pub fn render_name_options(names: &[String]) -> Markup {
    html! {
        @if names.is_empty() {
            option value="" disabled selected { "No active golfers" }
        }
        @for name in names {
            option value=(name) { (name) }
        }
    }
}

#[must_use]
pub fn render_history_table(rounds: &[Round]) -> Markup {
    html! {
        @if rounds.is_empty() {
            p class="empty" { "No records yet for this day." }
        } @else {
            table class="styled-table" id="round-history" {
                thead {
                    tr {
                        th { "Name" }
                        th { "Group Size" }
                        th { "Transport" }
                        th { "Holes" }
                        th { "Busyness" }
                        th { "Start" }
                        th { "End" }
                        th { "Time on Course" }
                    }
                }
                tbody {
                    @for round in rounds {
                        tr {
                            td { (round.golfer_name) }
                            td { (round.attributes.group_size) }
                            td { (round.attributes.transport) }
                            td { (optional_cell(round.attributes.holes)) }
                            td { (optional_cell(round.attributes.busyness)) }
                            td { (format_clock(&round.start_time)) }
                            td { (optional_cell(round.end_time.as_ref().map(format_clock))) }
                            td { (optional_cell(round.elapsed)) }
                        }
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn render_history_page(date: NaiveDate, rounds: &[Round]) -> Markup {
    let day = date.format(DATE_FORMAT).to_string();
    let title = format!("Golf Round Log {day}");
    html! {
        (DOCTYPE)
        html lang="en" {
            (render_head(&title))
            body {
                h1 { (title) }
                form method="get" action="history" {
                    input type="date" name="date" value=(day);
                    button type="submit" { "Show" }
                }
                (render_history_table(rounds))
                p {
                    a href=(format!("history.csv?date={day}")) { "Export to CSV" }
                    " | "
                    a href="./" { "Back to tracker" }
                }
            }
        }
    }
}

/// Status line shown after a start or end action.
#[must_use]
pub fn render_status(outcome: &Result<String, TrackerError>) -> Markup {
    html! {
        @match outcome {
            Ok(message) => { p class="status ok" { (message) } }
            Err(e) => { p class="status error" { (e) } }
        }
    }
}
