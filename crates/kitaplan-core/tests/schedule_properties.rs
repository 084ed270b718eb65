use kitaplan_core::{
    ChangeRequestInput, Policy, RequestStatus, RequestType, SchedulePair, Side, ValidationError,
    Weekday, WeeklySchedule, compute_custody_percentage, create_change_request, is_valid_split,
    resolve_conflict,
};
use proptest::prelude::*;

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Primary), Just(Side::Secondary)]
}

fn weekday() -> impl Strategy<Value = Weekday> {
    (0usize..5).prop_map(|i| Weekday::ALL[i])
}

fn schedule() -> impl Strategy<Value = WeeklySchedule> {
    proptest::array::uniform5(any::<bool>()).prop_map(|flags| {
        let mut s = WeeklySchedule::empty();
        for (day, on) in Weekday::ALL.into_iter().zip(flags) {
            s.set(day, on);
        }
        s
    })
}

fn edits() -> impl Strategy<Value = Vec<(Side, Weekday, bool)>> {
    proptest::collection::vec((side(), weekday(), any::<bool>()), 0..40)
}

fn apply_all(edits: &[(Side, Weekday, bool)]) -> SchedulePair {
    edits
        .iter()
        .fold(SchedulePair::default(), |pair, &(side, day, value)| {
            resolve_conflict(&pair, side, day, value)
        })
}

proptest! {
    #[test]
    fn resolver_keeps_days_mutually_exclusive(edits in edits()) {
        let pair = apply_all(&edits);
        for day in Weekday::ALL {
            prop_assert!(!(pair.primary.get(day) && pair.secondary.get(day)));
        }
    }

    #[test]
    fn resolved_pair_never_exceeds_full_week(edits in edits()) {
        let pair = apply_all(&edits);
        let total = u16::from(compute_custody_percentage(&pair.primary))
            + u16::from(compute_custody_percentage(&pair.secondary));
        prop_assert!(total <= 100);
        prop_assert_eq!(total == 100, pair.unassigned_days().is_empty());
        prop_assert_eq!(is_valid_split(&pair.primary, &pair.secondary), total == 100);
    }

    #[test]
    fn last_edit_wins(edits in edits(), side in side(), day in weekday(), value in any::<bool>()) {
        let mut pair = apply_all(&edits);
        pair = resolve_conflict(&pair, side, day, value);
        prop_assert_eq!(pair.side(side).get(day), value);
    }

    #[test]
    fn calculator_is_pure(s in schedule()) {
        let first = compute_custody_percentage(&s);
        prop_assert_eq!(first, compute_custody_percentage(&s));
        prop_assert!(first <= 100);
        prop_assert_eq!(first % 20, 0);
    }

    #[test]
    fn resolver_only_touches_the_edited_day(
        p in schedule(), s in schedule(), side in side(), day in weekday(), value in any::<bool>()
    ) {
        let before = SchedulePair::new(p, s);
        let after = resolve_conflict(&before, side, day, value);
        for other in Weekday::ALL.into_iter().filter(|&d| d != day) {
            prop_assert_eq!(after.primary.get(other), before.primary.get(other));
            prop_assert_eq!(after.secondary.get(other), before.secondary.get(other));
        }
    }
}

fn draft(primary: WeeklySchedule, secondary: WeeklySchedule, reason: &str) -> ChangeRequestInput {
    ChangeRequestInput {
        dual_placement_id: "dp-2024-0193".into(),
        request_type: RequestType::Temporary,
        proposed_primary: primary,
        proposed_secondary: secondary,
        reason: reason.into(),
        requested_by: "guardian@example.org".into(),
    }
}

#[test]
fn both_sides_empty_is_zero_and_invalid() {
    let empty = WeeklySchedule::empty();
    assert_eq!(compute_custody_percentage(&empty), 0);
    assert!(!is_valid_split(&empty, &empty));
}

#[test]
fn full_primary_is_a_valid_split() {
    assert_eq!(compute_custody_percentage(&WeeklySchedule::full()), 100);
    assert!(is_valid_split(&WeeklySchedule::full(), &WeeklySchedule::empty()));
}

#[test]
fn editing_session_reaches_sixty_forty_and_submits() {
    let mut pair = SchedulePair::default();
    for day in Weekday::ALL {
        pair.assign(day, Side::Primary);
    }
    pair.assign(Weekday::Wednesday, Side::Secondary);
    pair.assign(Weekday::Thursday, Side::Secondary);

    assert_eq!(pair.primary.to_string(), "MT--F");
    assert!(is_valid_split(&pair.primary, &pair.secondary));

    let request = create_change_request(
        draft(
            pair.primary,
            pair.secondary,
            "Change in custody arrangement due to new work schedule",
        ),
        &Policy::default(),
    )
    .unwrap();
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.proposed_primary_percentage, 60);
    assert_eq!(request.proposed_secondary_percentage, 40);
}

#[test]
fn short_reason_fails_validation() {
    let primary: WeeklySchedule = "MT--F".parse().unwrap();
    let secondary: WeeklySchedule = "--WT-".parse().unwrap();
    let err = create_change_request(draft(primary, secondary, "short"), &Policy::default())
        .unwrap_err();
    assert!(matches!(err, ValidationError::ReasonTooShort { .. }));
}

#[test]
fn sixty_percent_total_fails_regardless_of_reason() {
    let primary: WeeklySchedule = "MT---".parse().unwrap();
    let secondary: WeeklySchedule = "--W--".parse().unwrap();
    assert!(!is_valid_split(&primary, &secondary));
    for reason in ["short", "A long and detailed reason for the requested change"] {
        let err = create_change_request(draft(primary, secondary, reason), &Policy::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidSplit { combined: 60 });
    }
}
