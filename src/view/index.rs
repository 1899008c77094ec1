use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, html};

use crate::{HTMX_CONFIG, HTMX_PATH};
use crate::model::{Busyness, DATE_FORMAT, Holes, MAX_GROUP_SIZE, MIN_GROUP_SIZE, TransportMode};

pub const INDEX_TITLE: &str = "Golf Round Tracker";

/// Shared `<head>` for every full page.
#[must_use]
pub fn render_head(title: &str) -> Markup {
    html! {
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            meta name="htmx-config" content=(HTMX_CONFIG);
            link rel="stylesheet" type="text/css" href="static/styles.css";
            title { (title) }
            script src=(HTMX_PATH) defer {}
        }
    }
}

fn render_manual_time(prefix: &str) -> Markup {
    html! {
        span class="manual-time" {
            input type="text" name=(format!("{prefix}_hour")) size="2" placeholder="hh" inputmode="numeric";
            ":"
            input type="text" name=(format!("{prefix}_minute")) size="2" placeholder="mm" inputmode="numeric";
            select name=(format!("{prefix}_ampm")) {
                option value="AM" { "AM" }
                option value="PM" { "PM" }
            }
        }
        small { " leave blank to use the current time" }
    }
}

fn render_start_form() -> Markup {
    html! {
        form id="start-form" hx-post="rounds/start" hx-target="#status" hx-swap="innerHTML" {
            h2 { "Start Round" }
            label { "Golfer Name " input type="text" name="name" required; }
            label {
                "Group Size "
                select name="group_size" {
                    @for n in MIN_GROUP_SIZE..=MAX_GROUP_SIZE {
                        option value=(n) { (n) }
                    }
                }
            }
            fieldset {
                legend { "Transport" }
                @for mode in TransportMode::ALL {
                    label {
                        input type="radio" name="transport" value=(mode) checked[mode == TransportMode::default()];
                        (mode)
                    }
                }
            }
            label {
                "Holes "
                select name="holes" {
                    option value="" { "-" }
                    @for holes in Holes::ALL {
                        option value=(holes) { (holes) }
                    }
                }
            }
            label {
                "Busyness "
                select name="busyness" {
                    option value="" { "-" }
                    @for level in Busyness::ALL {
                        option value=(level) { (level) }
                    }
                }
            }
            label { "Start Time " (render_manual_time("start")) }
            button type="submit" { "Start Round" }
        }
    }
}

fn render_end_form() -> Markup {
    html! {
        form id="end-form" hx-post="rounds/end" hx-target="#status" hx-swap="innerHTML" {
            h2 { "End Round" }
            label {
                "Golfer "
                select name="name" hx-get="active/names" hx-trigger="load, roundsChanged from:body" hx-swap="innerHTML" {}
            }
            label { "End Time " (render_manual_time("end")) }
            button type="submit" { "End Round" }
        }
    }
}

#[must_use]
pub fn render_index_template(refresh_secs: u64, today: NaiveDate) -> Markup {
    let day = today.format(DATE_FORMAT).to_string();
    html! {
        (DOCTYPE)
        html lang="en" {
            (render_head(INDEX_TITLE))
            body {
                h1 { (INDEX_TITLE) }
                div id="status" role="status" {}
                div class="forms" {
                    (render_start_form())
                    (render_end_form())
                }
                h2 { "Currently On Course" }
                div id="active"
                    hx-get="active"
                    hx-trigger=(format!("load, every {refresh_secs}s, roundsChanged from:body"))
                    hx-swap="innerHTML" {
                    p { "Loading..." }
                }
                p {
                    a href=(format!("history?date={day}")) { "View today's log" }
                    " | "
                    a href=(format!("history.csv?date={day}")) { "Export today's log (CSV)" }
                }
            }
        }
    }
}
