use crate::language::Language;

const RANGE_SEPARATORS: [char; 3] = ['–', '—', '-'];

const MONTHS_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

const MONTHS_EN: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Rewrite "Month Year – Month Year" ranges as "MM/yyyy - MM/yyyy".
///
/// Strings without a range separator are returned unchanged. Unknown month
/// words are kept (lowercased) rather than rejected.
pub fn format_period(period: &str, language: Language) -> String {
    let Some(separator) = RANGE_SEPARATORS
        .into_iter()
        .find(|sep| period.contains(*sep))
    else {
        return period.to_string();
    };

    let mut parts = period.split(separator).map(str::trim);
    let from = parts.next().unwrap_or("");
    let to = parts.next().unwrap_or("");
    format!(
        "{} - {}",
        format_part(from, language),
        format_part(to, language)
    )
}

fn format_part(part: &str, language: Language) -> String {
    let present = language.present_label();
    let lowered = part.to_lowercase();
    if lowered == present.to_lowercase() {
        return present.to_string();
    }

    let words: Vec<&str> = lowered.split(' ').collect();
    if words.len() >= 2 {
        let month = month_number(words[0], language)
            .map(|number| format!("{number:02}"))
            .unwrap_or_else(|| words[0].to_string());
        return format!("{month}/{}", words[1]);
    }
    part.to_string()
}

fn month_number(word: &str, language: Language) -> Option<usize> {
    let table = match language {
        Language::Pt => &MONTHS_PT,
        Language::En => &MONTHS_EN,
    };
    table.iter().position(|month| *month == word).map(|idx| idx + 1)
}
