//! Subcommand implementations. Each returns whether the command succeeded
//! so `main` can map validation failures to a non-zero exit status.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use kitaplan_core::{
    ChangeRequestInput, PlacementInput, Policy, RequestType, SchedulePair, Side, Weekday,
    WeeklySchedule, compute_custody_percentage, create_change_request, create_dual_placement,
    split_report,
};
use kitaplan_store::{
    Confirmation, Kindergarten, KindergartenDirectory, MemoryDirectory, SubmissionService,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::display;

/// A single resolver edit given on the command line.
///
/// Syntax: `<side>:<day>[=<value>]`, e.g. `p:mon=1`, `secondary:fri=off`,
/// `s:wed` (toggle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub side: Side,
    pub day: Weekday,
    /// `None` toggles the current flag.
    pub value: Option<bool>,
}

impl std::str::FromStr for Edit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (side, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("edit {s:?} must look like p:mon=1"))?;
        let side = match side.trim().to_ascii_lowercase().as_str() {
            "p" | "primary" => Side::Primary,
            "s" | "secondary" => Side::Secondary,
            other => return Err(format!("unknown side {other:?} (expected p or s)")),
        };
        let (day, value) = match rest.split_once('=') {
            Some((day, value)) => (day, Some(parse_flag(value)?)),
            None => (rest, None),
        };
        let day = day.parse::<Weekday>().map_err(|e| e.to_string())?;
        Ok(Edit { side, day, value })
    }
}

fn parse_flag(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => Err(format!("invalid flag {other:?} (expected 1/0, on/off)")),
    }
}

pub fn custody(schedule: &WeeklySchedule) -> bool {
    println!("{schedule}  {}%", compute_custody_percentage(schedule));
    true
}

pub fn validate(pair: &SchedulePair, json: bool) -> anyhow::Result<bool> {
    let report = split_report(pair);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", display::week_grid(pair, ("primary", "secondary")));
        println!("{}", display::report_banner(&report));
    }
    Ok(report.is_valid())
}

pub fn resolve(mut pair: SchedulePair, edits: &[Edit]) -> bool {
    for edit in edits {
        match edit.value {
            Some(value) => pair.apply(edit.side, edit.day, value),
            None => pair.toggle(edit.side, edit.day),
        }
    }
    let report = split_report(&pair);
    print!("{}", display::week_grid(&pair, ("primary", "secondary")));
    println!("{}", display::report_banner(&report));
    println!("primary={} secondary={}", pair.primary, pair.secondary);
    report.is_valid()
}

pub struct RequestArgs {
    pub placement: String,
    pub request_type: RequestType,
    pub pair: SchedulePair,
    pub reason: String,
    pub requested_by: String,
}

/// Validate a draft change request and hand it to `backend`.
pub async fn request(
    args: RequestArgs,
    policy: &Policy,
    backend: &dyn SubmissionService,
) -> anyhow::Result<bool> {
    let input = ChangeRequestInput {
        dual_placement_id: args.placement,
        request_type: args.request_type,
        proposed_primary: args.pair.primary,
        proposed_secondary: args.pair.secondary,
        reason: args.reason,
        requested_by: args.requested_by,
    };

    let request = match create_change_request(input, policy) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{}", display::report_banner(&split_report(&args.pair)));
            return Ok(false);
        }
    };

    match backend.submit_change_request(&request).await {
        Ok(confirmation) => {
            info!(reference = %confirmation.reference, "change request submitted");
            print_submitted(&confirmation, "request", &request)?;
            Ok(true)
        }
        Err(e) => {
            warn!(detail = %e.detail, "change request submission failed");
            eprintln!("error: {e}");
            Ok(false)
        }
    }
}

pub struct PlacementArgs {
    pub child: String,
    pub primary_kindergarten: String,
    pub secondary_kindergarten: String,
    pub pair: SchedulePair,
    pub justification: String,
    pub documents: Vec<String>,
}

/// Build a placement from directory entries, validate it, and hand it to `backend`.
pub async fn placement(
    args: PlacementArgs,
    directory: &dyn KindergartenDirectory,
    policy: &Policy,
    backend: &dyn SubmissionService,
) -> anyhow::Result<bool> {
    let primary = directory
        .placement_slot(&args.primary_kindergarten, args.pair.primary)
        .await
        .context("looking up primary kindergarten")?;
    let secondary = directory
        .placement_slot(&args.secondary_kindergarten, args.pair.secondary)
        .await
        .context("looking up secondary kindergarten")?;

    let input = PlacementInput {
        child_id: args.child,
        primary_kindergarten_id: primary.kindergarten_id,
        primary_kindergarten_name: primary.kindergarten_name,
        secondary_kindergarten_id: secondary.kindergarten_id,
        secondary_kindergarten_name: secondary.kindergarten_name,
        schedules: args.pair,
        justification: args.justification,
        documents: args.documents,
    };

    let placement = match create_dual_placement(input, policy) {
        Ok(placement) => placement,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{}", display::report_banner(&split_report(&args.pair)));
            return Ok(false);
        }
    };

    match backend.submit_placement(&placement).await {
        Ok(confirmation) => {
            info!(reference = %confirmation.reference, "placement submitted");
            eprint!(
                "{}",
                display::week_grid(
                    &placement.schedules(),
                    (
                        &placement.primary.kindergarten_name,
                        &placement.secondary.kindergarten_name
                    )
                )
            );
            print_submitted(&confirmation, "placement", &placement)?;
            Ok(true)
        }
        Err(e) => {
            warn!(detail = %e.detail, "placement submission failed");
            eprintln!("error: {e}");
            Ok(false)
        }
    }
}

/// Print the backend receipt together with the submitted record as one JSON document.
fn print_submitted<T: Serialize>(
    confirmation: &Confirmation,
    key: &str,
    record: &T,
) -> anyhow::Result<()> {
    let mut doc = serde_json::Map::new();
    doc.insert("confirmation".into(), serde_json::to_value(confirmation)?);
    doc.insert(key.into(), serde_json::to_value(record)?);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

pub async fn kindergartens(
    directory: &dyn KindergartenDirectory,
    district: Option<&str>,
    available_only: bool,
) -> anyhow::Result<bool> {
    let entries = select_kindergartens(directory, district, available_only).await?;
    print!("{}", display::kindergarten_table(&entries));
    Ok(true)
}

async fn select_kindergartens(
    directory: &dyn KindergartenDirectory,
    district: Option<&str>,
    available_only: bool,
) -> anyhow::Result<Vec<Kindergarten>> {
    let mut entries = if available_only {
        directory.with_available_spots().await?
    } else {
        directory.list().await?
    };
    if let Some(d) = district {
        let in_district: HashSet<String> = directory
            .in_district(d)
            .await?
            .into_iter()
            .map(|k| k.id)
            .collect();
        entries.retain(|k| in_district.contains(&k.id));
    }
    Ok(entries)
}

/// Load the directory file named on the command line.
pub fn load_directory(path: &Path) -> anyhow::Result<MemoryDirectory> {
    MemoryDirectory::from_json_file(path)
        .with_context(|| format!("loading directory {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitaplan_store::{MemorySubmissions, Submitted};

    #[test]
    fn parse_edit_with_value() {
        let e: Edit = "p:mon=1".parse().unwrap();
        assert_eq!(
            e,
            Edit {
                side: Side::Primary,
                day: Weekday::Monday,
                value: Some(true)
            }
        );
        let e: Edit = "secondary:Friday=off".parse().unwrap();
        assert_eq!(e.side, Side::Secondary);
        assert_eq!(e.day, Weekday::Friday);
        assert_eq!(e.value, Some(false));
    }

    #[test]
    fn parse_toggle_edit() {
        let e: Edit = "s:wed".parse().unwrap();
        assert_eq!(e.value, None);
    }

    #[test]
    fn parse_edit_errors() {
        assert!("mon=1".parse::<Edit>().is_err());
        assert!("x:mon=1".parse::<Edit>().is_err());
        assert!("p:sun=1".parse::<Edit>().is_err());
        assert!("p:mon=maybe".parse::<Edit>().is_err());
    }

    #[test]
    fn resolve_applies_edits_in_order() {
        let pair = SchedulePair::new(WeeklySchedule::full(), WeeklySchedule::empty());
        let edits: Vec<Edit> = ["s:wed=1", "s:thu=1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert!(resolve(pair, &edits));
    }

    #[test]
    fn resolve_reports_incomplete_week() {
        let edits: Vec<Edit> = ["p:mon=1", "s:tue"].iter().map(|s| s.parse().unwrap()).collect();
        assert!(!resolve(SchedulePair::default(), &edits));
    }

    fn request_args(reason: &str) -> RequestArgs {
        RequestArgs {
            placement: "dp-1".into(),
            request_type: RequestType::Temporary,
            pair: SchedulePair::new("MT--F".parse().unwrap(), "--WT-".parse().unwrap()),
            reason: reason.into(),
            requested_by: "guardian-1".into(),
        }
    }

    fn kg(id: &str, name: &str, district: &str, spots: u32) -> Kindergarten {
        Kindergarten {
            id: id.into(),
            name: name.into(),
            district: district.into(),
            available_spots: spots,
        }
    }

    fn directory() -> MemoryDirectory {
        MemoryDirectory::new(vec![
            kg("kg-1", "Kita Eins", "Mitte", 3),
            kg("kg-2", "Kita Zwei", "Nord", 1),
            kg("kg-3", "Kita Drei", "Mitte", 0),
        ])
    }

    fn placement_args(primary: &str, secondary: &str) -> PlacementArgs {
        PlacementArgs {
            child: "child-1".into(),
            primary_kindergarten: primary.into(),
            secondary_kindergarten: secondary.into(),
            pair: SchedulePair::new("MTW--".parse().unwrap(), "---TF".parse().unwrap()),
            justification: "Guardians share custody across districts".into(),
            documents: vec![],
        }
    }

    #[tokio::test]
    async fn request_with_short_reason_fails() {
        let backend = MemorySubmissions::new();
        let ok = request(request_args("short"), &Policy::default(), &backend)
            .await
            .unwrap();
        assert!(!ok);
        assert!(backend.submissions().is_empty());
    }

    #[tokio::test]
    async fn request_with_valid_input_reaches_backend() {
        let backend = MemorySubmissions::new();
        let args = RequestArgs {
            request_type: RequestType::Permanent,
            ..request_args("Change in custody arrangement due to new work schedule")
        };
        assert!(request(args, &Policy::default(), &backend).await.unwrap());
        let requests = backend.change_requests_for("dp-1");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].request_type, RequestType::Permanent);
    }

    #[tokio::test]
    async fn request_fails_when_backend_rejects() {
        let backend = MemorySubmissions::new();
        backend.set_failing(true);
        let args = request_args("Change in custody arrangement due to new work schedule");
        assert!(!request(args, &Policy::default(), &backend).await.unwrap());
        assert!(backend.submissions().is_empty());
    }

    #[tokio::test]
    async fn placement_takes_names_from_directory() {
        let backend = MemorySubmissions::new();
        let ok = placement(
            placement_args("kg-1", "kg-2"),
            &directory(),
            &Policy::default(),
            &backend,
        )
        .await
        .unwrap();
        assert!(ok);
        match backend.submissions().as_slice() {
            [Submitted::Placement(p)] => {
                assert_eq!(p.primary.kindergarten_name, "Kita Eins");
                assert_eq!(p.secondary.kindergarten_name, "Kita Zwei");
                assert_eq!(p.primary.custody_percentage, 60);
                assert_eq!(p.secondary.custody_percentage, 40);
            }
            other => panic!("expected one placement, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn placement_fails_when_backend_rejects() {
        let backend = MemorySubmissions::new();
        backend.set_failing(true);
        let ok = placement(
            placement_args("kg-1", "kg-2"),
            &directory(),
            &Policy::default(),
            &backend,
        )
        .await
        .unwrap();
        assert!(!ok);
        assert!(backend.submissions().is_empty());
    }

    #[tokio::test]
    async fn placement_with_unknown_kindergarten_errors() {
        let backend = MemorySubmissions::new();
        let result = placement(
            placement_args("kg-1", "kg-9"),
            &directory(),
            &Policy::default(),
            &backend,
        )
        .await;
        assert!(result.is_err());
        assert!(backend.submissions().is_empty());
    }

    #[tokio::test]
    async fn kindergartens_combines_district_and_availability() {
        let dir = directory();
        let ids = |entries: Vec<Kindergarten>| -> Vec<String> {
            entries.into_iter().map(|k| k.id).collect()
        };

        let open_in_mitte = select_kindergartens(&dir, Some("mitte"), true).await.unwrap();
        assert_eq!(ids(open_in_mitte), vec!["kg-1"]);

        let all_in_mitte = select_kindergartens(&dir, Some("Mitte"), false).await.unwrap();
        assert_eq!(ids(all_in_mitte), vec!["kg-3", "kg-1"]);

        let open = select_kindergartens(&dir, None, true).await.unwrap();
        assert_eq!(ids(open), vec!["kg-1", "kg-2"]);

        assert!(kindergartens(&dir, None, false).await.unwrap());
    }

    #[test]
    fn load_directory_reads_json_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "kg-1", "name": "Kita Eins", "district": "Mitte", "availableSpots": 3}}]"#
        )
        .unwrap();
        assert_eq!(load_directory(file.path()).unwrap().len(), 1);
        assert!(load_directory(Path::new("/nonexistent/kitas.json")).is_err());
    }
}
