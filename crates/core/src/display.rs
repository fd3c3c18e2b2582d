//! Display-only derivations of search state: titles, subtitles and counts

use serde::{Deserialize, Serialize};

/// Which count a subtitle reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleCount {
    /// Overall total for the current search
    #[default]
    Total,
    /// Exclusive items among those loaded
    Exclusive,
}

/// Format a number with `,` thousand separators
pub fn format_number(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

fn query_prefix(query: &str) -> String {
    if query.is_empty() {
        String::new()
    } else {
        format!("{} ", query)
    }
}

/// Header title for a result list.
///
/// While the first page is loading the count is unknown, so the title reads
/// `Searching for {query }{asset_label}...`.
pub fn search_title(query: &str, total_items: usize, asset_label: &str, is_loading: bool) -> String {
    let query = query_prefix(query);
    if is_loading {
        format!("Searching for {}{}...", query, asset_label)
    } else {
        format!("{} {}{}", format_number(total_items), query, asset_label)
    }
}

pub fn search_subtitle(count: usize, asset_label: &str) -> String {
    format!(
        "{} {} exclusively selected by our designer community.",
        format_number(count),
        asset_label
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(100000), "100,000");
    }

    #[test]
    fn test_title_without_query() {
        assert_eq!(search_title("", 100, "Icon", false), "100 Icon");
    }

    #[test]
    fn test_title_with_query() {
        assert_eq!(search_title("arrow", 50, "Icon", false), "50 arrow Icon");
        assert_eq!(
            search_title("landscape", 25_000, "Illustrations", false),
            "25,000 landscape Illustrations"
        );
    }

    #[test]
    fn test_title_while_loading() {
        assert_eq!(
            search_title("arrow", 0, "Icons", true),
            "Searching for arrow Icons..."
        );
        assert_eq!(search_title("", 0, "Icons", true), "Searching for Icons...");
    }

    #[test]
    fn test_subtitle() {
        assert_eq!(
            search_subtitle(1500, "3D Illustrations"),
            "1,500 3D Illustrations exclusively selected by our designer community."
        );
    }
}
