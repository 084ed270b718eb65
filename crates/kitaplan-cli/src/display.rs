//! Terminal rendering for schedule pairs, split reports, and directory listings.

use kitaplan_core::{
    SchedulePair, Side, SplitReport, Weekday, WeeklySchedule, compute_custody_percentage,
};
use kitaplan_store::Kindergarten;

const LABEL_WIDTH: usize = 12;
const ASSIGNED: &str = "x";
const FREE: &str = ".";

// ── Public API ──

/// Render the pair as a week grid with one row per kindergarten.
///
/// ```text
///              Mon Tue Wed Thu Fri     %
/// primary       x   x   .   .   x     60
/// secondary     .   .   x   x   .     40
/// ```
pub fn week_grid(pair: &SchedulePair, labels: (&str, &str)) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:LABEL_WIDTH$}", ""));
    for day in Weekday::ALL {
        out.push_str(&format!(" {:>3}", title_case(day.abbrev())));
    }
    out.push_str(&format!(" {:>5}\n", "%"));

    for (side, label) in [(Side::Primary, labels.0), (Side::Secondary, labels.1)] {
        out.push_str(&schedule_row(label, pair.side(side)));
    }
    out
}

/// One-paragraph summary of a split, suitable for a status banner.
pub fn report_banner(report: &SplitReport) -> String {
    if report.is_valid() {
        return format!(
            "OK: {}% + {}% = 100%",
            report.primary_percentage, report.secondary_percentage
        );
    }

    let mut lines = vec![format!(
        "INVALID: {}% + {}% = {}% (must be 100%)",
        report.primary_percentage, report.secondary_percentage, report.combined
    )];
    if !report.unassigned_days.is_empty() {
        lines.push(format!("  unassigned: {}", day_list(&report.unassigned_days)));
    }
    if !report.conflicting_days.is_empty() {
        lines.push(format!("  assigned twice: {}", day_list(&report.conflicting_days)));
    }
    lines.join("\n")
}

/// Fixed-width table of kindergartens.
pub fn kindergarten_table(entries: &[Kindergarten]) -> String {
    if entries.is_empty() {
        return "(no kindergartens)\n".to_string();
    }

    let id_w = column_width(entries.iter().map(|k| k.id.as_str()), "ID");
    let name_w = column_width(entries.iter().map(|k| k.name.as_str()), "NAME");
    let district_w = column_width(entries.iter().map(|k| k.district.as_str()), "DISTRICT");

    let mut out = format!(
        "{:id_w$}  {:name_w$}  {:district_w$}  {:>5}\n",
        "ID", "NAME", "DISTRICT", "SPOTS"
    );
    for k in entries {
        out.push_str(&format!(
            "{:id_w$}  {:name_w$}  {:district_w$}  {:>5}\n",
            k.id, k.name, k.district, k.available_spots
        ));
    }
    out
}

// ── Helpers ──

fn schedule_row(label: &str, schedule: &WeeklySchedule) -> String {
    let mut row = format!("{:LABEL_WIDTH$}", truncate(label, LABEL_WIDTH));
    for day in Weekday::ALL {
        let mark = if schedule.get(day) { ASSIGNED } else { FREE };
        row.push_str(&format!(" {mark:>3}"));
    }
    row.push_str(&format!(" {:>5}\n", compute_custody_percentage(schedule)));
    row
}

fn day_list(days: &[Weekday]) -> String {
    days.iter()
        .map(|d| d.abbrev())
        .collect::<Vec<_>>()
        .join(", ")
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max - 1).collect();
        t.push('…');
        t
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitaplan_core::split_report;

    fn sixty_forty() -> SchedulePair {
        SchedulePair::new("MT--F".parse().unwrap(), "--WT-".parse().unwrap())
    }

    #[test]
    fn grid_has_header_and_two_rows() {
        let grid = week_grid(&sixty_forty(), ("primary", "secondary"));
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Mon") && lines[0].contains("Fri"));
        assert!(lines[1].starts_with("primary"));
        assert!(lines[1].trim_end().ends_with("60"));
        assert!(lines[2].trim_end().ends_with("40"));
    }

    #[test]
    fn valid_banner() {
        let banner = report_banner(&split_report(&sixty_forty()));
        assert_eq!(banner, "OK: 60% + 40% = 100%");
    }

    #[test]
    fn invalid_banner_lists_unassigned_days() {
        let pair = SchedulePair::new("MT---".parse().unwrap(), "--W--".parse().unwrap());
        let banner = report_banner(&split_report(&pair));
        assert!(banner.starts_with("INVALID: 40% + 20% = 60%"));
        assert!(banner.contains("unassigned: thu, fri"));
    }

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!(truncate("Kita Sonnenschein", 8), "Kita So…");
        assert_eq!(truncate("short", 8), "short");
    }

    #[test]
    fn table_aligns_columns() {
        let table = kindergarten_table(&[
            Kindergarten {
                id: "kg-1".into(),
                name: "Kita Eins".into(),
                district: "Mitte".into(),
                available_spots: 3,
            },
            Kindergarten {
                id: "kg-10".into(),
                name: "Kita Zehn".into(),
                district: "Nord".into(),
                available_spots: 12,
            },
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), lines[2].len());
    }

    #[test]
    fn empty_table() {
        assert_eq!(kindergarten_table(&[]), "(no kindergartens)\n");
    }
}
