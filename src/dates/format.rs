//! Custom date patterns in the `yyyyMMdd` family.

use chrono::{Datelike, NaiveDateTime, Timelike};
use std::fmt::Write as _;

/// Render `instant` with a custom pattern such as `yyyy-MM-dd HH:mm:ss.fff`.
///
/// Runs of the same pattern letter form one field. Text inside single or
/// double quotes and characters after a backslash are copied literally, as is
/// every character that is not a pattern letter.
pub fn format_date(instant: NaiveDateTime, pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' | '"' => {
                i += 1;
                while i < chars.len() && chars[i] != c {
                    out.push(chars[i]);
                    i += 1;
                }
                i += 1;
            }
            '\\' => {
                if let Some(next) = chars.get(i + 1) {
                    out.push(*next);
                }
                i += 2;
            }
            '%' => i += 1,
            'y' | 'M' | 'd' | 'H' | 'h' | 'm' | 's' | 'f' | 'F' | 't' => {
                let run = chars[i..].iter().take_while(|&&x| x == c).count();
                write_field(&mut out, instant, c, run);
                i += run;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn write_field(out: &mut String, instant: NaiveDateTime, letter: char, run: usize) {
    match letter {
        'y' => {
            let year = instant.year();
            match run {
                1 => push_num(out, year.rem_euclid(100), 1),
                2 => push_num(out, year.rem_euclid(100), 2),
                _ => push_num(out, year, run),
            }
        }
        'M' => match run {
            1 | 2 => push_num(out, instant.month(), run),
            3 => push_chrono(out, instant, "%b"),
            _ => push_chrono(out, instant, "%B"),
        },
        'd' => match run {
            1 | 2 => push_num(out, instant.day(), run),
            3 => push_chrono(out, instant, "%a"),
            _ => push_chrono(out, instant, "%A"),
        },
        'H' => push_num(out, instant.hour(), run.min(2)),
        'h' => {
            let (_, hour12) = instant.hour12();
            push_num(out, hour12, run.min(2));
        }
        'm' => push_num(out, instant.minute(), run.min(2)),
        's' => push_num(out, instant.second(), run.min(2)),
        'f' | 'F' => {
            let digits = run.min(7);
            let nanos = instant.nanosecond() % 1_000_000_000;
            let scaled = nanos / 10_u32.pow(9 - u32::try_from(digits).unwrap_or(7));
            let mut fraction = format!("{scaled:0digits$}");
            if letter == 'F' {
                let trimmed = fraction.trim_end_matches('0').len();
                fraction.truncate(trimmed);
            }
            out.push_str(&fraction);
        }
        't' => {
            let designator = if instant.hour12().0 { "PM" } else { "AM" };
            if run == 1 {
                out.push_str(&designator[..1]);
            } else {
                out.push_str(designator);
            }
        }
        _ => {}
    }
}

fn push_num<T: std::fmt::Display>(out: &mut String, value: T, width: usize) {
    let _ = write!(out, "{value:0width$}");
}

fn push_chrono(out: &mut String, instant: NaiveDateTime, pattern: &str) {
    let _ = write!(out, "{}", instant.format(pattern));
}
