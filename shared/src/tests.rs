#[cfg(test)]
mod tests {
    use crate::models::{CastVoteRequest, NewVote, TallySnapshot, TallyView, Team, VoteFilter, ANONYMOUS};
    use crate::tally::{leader, project, Leader, NEUTRAL};
    use crate::validation::{validate_nickname, ValidationError};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_no_votes_is_neutral() {
        assert_eq!(project(0, 0, 0), NEUTRAL);
    }

    #[test]
    fn test_tie_is_neutral() {
        assert_eq!(project(5, 5, 10), 0.5);
        assert_eq!(project(1, 1, 2), 0.5);
        assert_eq!(project(0, 0, 3), 0.5);
    }

    #[test]
    fn test_red_lead_moves_left() {
        // gap of 0.6 moves the bar 0.3 from the centre
        assert_close(project(8, 2, 10), 0.2);
        assert_close(project(6, 4, 10), 0.4);
    }

    #[test]
    fn test_blue_lead_moves_right() {
        assert_close(project(2, 8, 10), 0.8);
        assert_close(project(4, 6, 10), 0.6);
    }

    #[test]
    fn test_sweeps_hit_the_edges() {
        assert_eq!(project(10, 0, 10), 0.0);
        assert_eq!(project(0, 10, 10), 1.0);
        assert_eq!(project(1, 0, 1), 0.0);
    }

    #[test]
    fn test_stays_in_range() {
        for total in 0..=25u64 {
            for red in 0..=total {
                for blue in 0..=total {
                    let progress = project(red, blue, total);
                    assert!((0.0..=1.0).contains(&progress), "{red}/{blue}/{total} -> {progress}");
                }
            }
        }
    }

    #[test]
    fn test_neutral_iff_equal_counts() {
        for total in 1..=12u64 {
            for red in 0..=total {
                for blue in 0..=(total - red) {
                    assert_eq!(project(red, blue, total) == NEUTRAL, red == blue);
                }
            }
        }
    }

    #[test]
    fn test_monotonic_in_leading_share() {
        let mut previous = NEUTRAL;
        for red in 1..=20u64 {
            let progress = project(red, 0, 20);
            assert!(progress < previous);
            previous = progress;
        }

        let mut previous = NEUTRAL;
        for blue in 1..=20u64 {
            let progress = project(0, blue, 20);
            assert!(progress > previous);
            previous = progress;
        }
    }

    #[test]
    fn test_idempotent() {
        for (r, b, t) in [(0, 0, 0), (3, 7, 10), (9, 1, 12), (4, 4, 8)] {
            assert_eq!(project(r, b, t).to_bits(), project(r, b, t).to_bits());
        }
    }

    #[test]
    fn test_skewed_counts_are_clamped() {
        // total has not caught up with the team counts yet
        assert_eq!(project(3, 0, 2), 0.0);
        assert_eq!(project(0, 5, 1), 1.0);
    }

    #[test]
    fn test_leader() {
        assert_eq!(leader(3, 1), Leader::Red);
        assert_eq!(leader(1, 3), Leader::Blue);
        assert_eq!(leader(0, 0), Leader::Tie);
    }

    #[test]
    fn test_snapshot_view() {
        let view = TallyView::from(TallySnapshot::new(2, 8, 10));
        assert_eq!(view.leader, Some(Team::Blue));
        assert_close(view.progress, 0.8);

        let view = TallyView::default();
        assert_eq!(view.total_count, 0);
        assert_eq!(view.progress, 0.5);
        assert_eq!(view.leader, None);
    }

    #[test]
    fn test_snapshot_counts_by_filter() {
        let snapshot = TallySnapshot::default()
            .with_count(VoteFilter::All, 7)
            .with_count(VoteFilter::Team(Team::Red), 4)
            .with_count(VoteFilter::Team(Team::Blue), 2);

        assert_eq!(snapshot, TallySnapshot::new(4, 2, 7));
        assert_eq!(snapshot.count(VoteFilter::Team(Team::Red)), 4);
        assert_eq!(snapshot.unclassified(), 1);
        assert!(snapshot.is_consistent());

        let skewed = TallySnapshot::new(4, 3, 6);
        assert!(!skewed.is_consistent());
        assert_eq!(skewed.unclassified(), 0);

        let overflowing = TallySnapshot::new(u64::MAX, 1, u64::MAX);
        assert!(!overflowing.is_consistent());
        assert_eq!(overflowing.unclassified(), 0);
    }

    #[test]
    fn test_nickname_validation() {
        assert_eq!(validate_nickname("  ada "), Ok("ada"));
        assert_eq!(validate_nickname(""), Err(ValidationError::BlankNickname));
        assert_eq!(validate_nickname(" \t\n"), Err(ValidationError::BlankNickname));
    }

    #[test]
    fn test_display_name_defaults_to_anonymous() {
        assert_eq!(NewVote::new(Team::Red, None).display_name.as_deref(), Some(ANONYMOUS));
        assert_eq!(NewVote::new(Team::Red, Some("   ")).display_name.as_deref(), Some(ANONYMOUS));
        assert_eq!(NewVote::new(Team::Blue, Some(" ada ")).display_name.as_deref(), Some("ada"));
    }

    #[test]
    fn test_team_and_filter_parsing() {
        assert_eq!("red".parse::<Team>(), Ok(Team::Red));
        assert_eq!("BLUE".parse::<Team>(), Ok(Team::Blue));
        assert!("green".parse::<Team>().is_err());
        assert_eq!("all".parse::<VoteFilter>(), Ok(VoteFilter::All));
        assert_eq!("red".parse::<VoteFilter>(), Ok(VoteFilter::Team(Team::Red)));
        assert_eq!(VoteFilter::Team(Team::Blue).to_string(), "blue");
    }

    #[test]
    fn test_wire_format() {
        let request: CastVoteRequest =
            serde_json::from_str(r#"{"team":"blue","displayName":"ada"}"#).unwrap();
        assert_eq!(request.team, Team::Blue);
        assert_eq!(request.display_name.as_deref(), Some("ada"));

        let request: CastVoteRequest = serde_json::from_str(r#"{"team":"red"}"#).unwrap();
        assert_eq!(request.display_name, None);

        assert!(serde_json::from_str::<CastVoteRequest>(r#"{"team":"green"}"#).is_err());

        let json = serde_json::to_value(TallyView::from(TallySnapshot::new(1, 0, 1))).unwrap();
        assert_eq!(json["redCount"], 1);
        assert_eq!(json["leader"], "red");
        assert_eq!(json["progress"], 0.0);
    }
}
