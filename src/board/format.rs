use chrono::{DateTime, NaiveDate, Utc};

const DESCRIPTION_PREVIEW_CHARS: usize = 100;
pub(crate) const SKILL_PREVIEW_COUNT: usize = 6;

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Relative posting age: "Today", "Yesterday", "N days ago", then the plain date.
pub fn format_posted(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - created_at).num_days();
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        _ => format_date(created_at.date_naive()),
    }
}

pub fn format_deadline(deadline: NaiveDate) -> String {
    format!("Deadline: {}", format_date(deadline))
}

/// Card preview of a description, cut at a character boundary.
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{preview}...")
    } else {
        description.to_string()
    }
}

pub fn format_salary(salary: &str) -> String {
    format!("₹ {salary} Salary")
}

/// Upper-cased first character used when no logo is available.
pub fn avatar_initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

pub fn skill_match_label(count: usize) -> String {
    if count == 1 {
        "1 skill match".to_string()
    } else {
        format!("{count} skill matches")
    }
}
