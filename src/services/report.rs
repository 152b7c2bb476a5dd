// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain-text tables and the HTML report page.

use crate::models::UserReport;
use crate::time_utils::{format_hours_minutes, format_week_date};

const HEADER: [&str; 4] = ["Date", "Count", "Distance", "Duration"];

/// Render one user's weeks as a boxed text table.
pub fn render_table(report: &UserReport) -> String {
    let rows: Vec<[String; 4]> = report
        .weeks
        .iter()
        .map(|w| {
            [
                format_week_date(w.week_start),
                w.count.to_string(),
                format!("{:.1}km", w.distance / 1000.0),
                format_hours_minutes(w.elapsed),
            ]
        })
        .collect();

    let mut widths = HEADER.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let border = {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line
    };

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    push_row(&mut out, &HEADER.map(str::to_uppercase), &widths);
    out.push_str(&border);
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    if !rows.is_empty() {
        out.push_str(&border);
        out.push('\n');
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str(&format!(" {:<width$} |", cell, width = *width));
    }
    out.push('\n');
}

/// Render the report page: one table per user plus a link to register.
pub fn render_page(reports: &[UserReport], client_id: &str, redirect_uri: &str) -> String {
    let mut tables = String::new();
    for report in reports {
        tables.push_str(&format!(
            "    <div style=\"padding: 0 1em\">\n      <pre>{}</pre>\n      <pre>\n{}</pre>\n    </div>\n",
            html_escape::encode_text(&report.name),
            html_escape::encode_text(&render_table(report)),
        ));
    }

    let authorize_url = format!(
        "https://www.strava.com/oauth/authorize?client_id={}&redirect_uri={}&response_type=code",
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
    );

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Marathon training</title></head>\n<body>\n<div>\n  <div style=\"display: flex; justify-content: center\">\n{}  </div>\n  <a href=\"{}\">Register</a>\n</div>\n</body>\n</html>\n",
        tables,
        html_escape::encode_double_quoted_attribute(&authorize_url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekSummary;
    use chrono::DateTime;
    use std::time::Duration;

    fn report(name: &str) -> UserReport {
        UserReport {
            name: name.to_string(),
            weeks: vec![
                WeekSummary {
                    week_start: DateTime::parse_from_rfc3339("2018-03-03T00:00:00Z").unwrap(),
                    count: 3,
                    elapsed: Duration::from_secs(52 * 60),
                    distance: 12_345.0,
                },
                WeekSummary {
                    week_start: DateTime::parse_from_rfc3339("2018-03-10T00:00:00Z").unwrap(),
                    count: 1,
                    elapsed: Duration::from_secs(2 * 3600 + 5 * 60),
                    distance: 30_000.0,
                },
            ],
        }
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&report("james"));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "| DATE       | COUNT | DISTANCE | DURATION |");
        assert_eq!(lines[3], "| 2018/03/03 | 3     | 12.3km   | 0h 52m   |");
        assert_eq!(lines[4], "| 2018/03/10 | 1     | 30.0km   | 2h 5m    |");
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_render_table_without_weeks() {
        let empty = UserReport {
            name: "nobody".to_string(),
            weeks: vec![],
        };
        assert_eq!(render_table(&empty).lines().count(), 3);
    }

    #[test]
    fn test_render_page_escapes_and_links() {
        let page = render_page(
            &[report("<script>")],
            "1234",
            "http://localhost:8080/oauth_callback",
        );

        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("client_id=1234"));
        assert!(page.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Foauth_callback"));
        assert!(page.contains("2018/03/03"));
    }
}
