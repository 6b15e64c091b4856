use chrono::{Local, NaiveDate};
use std::io::{self, Write};

pub fn parse_due(s: &str) -> Result<NaiveDate, String> {
    parse_due_from(s, Local::now().date_naive())
}

/// Accepts `today`, `tomorrow`, `YYYY-MM-DD` or `DDMMYYYY`, relative to `today`.
pub fn parse_due_from(s: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    let s = s.trim().to_lowercase();

    if s == "today" {
        return Ok(today);
    }
    if s == "tomorrow" {
        return Ok(today.succ_opt().ok_or("date overflow")?);
    }

    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(d);
    }

    // DDMMYYYY (e.g. 18022026)
    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        return NaiveDate::parse_from_str(&s, "%d%m%Y")
            .map_err(|_| "expected DDMMYYYY like 18022026".to_string());
    }

    Err("expected today|tomorrow|YYYY-MM-DD|DDMMYYYY".into())
}

pub fn prompt_input(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    let _ = io::stdin().read_line(&mut input);
    input.trim_end().to_string()
}

pub fn confirm(prompt: &str) -> bool {
    let input = prompt_input(&format!("{prompt} [y/N]: "));
    matches!(input.trim(), "y" | "Y" | "yes" | "YES" | "Yes")
}
