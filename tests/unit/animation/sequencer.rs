use super::*;

fn values(v: &[f64]) -> Vec<PropValue> {
    v.iter().map(|n| PropValue::Number(*n)).collect()
}

#[test]
fn single_cycle_walks_values_then_finishes() {
    let mut s = Sequencer::new(ObjectId(0), "left", values(&[0.0, 10.0, 20.0]), 1.0, RepeatCount::Count(1));
    assert_eq!(s.state(), SequenceState::Playing);
    assert_eq!(s.current_value(), Some(&PropValue::Number(10.0)));
    assert_eq!(s.advance(), SequenceStep::Next(PropValue::Number(20.0)));
    assert_eq!(s.advance(), SequenceStep::Finished);
    assert_eq!(s.state(), SequenceState::Done);
    assert_eq!(s.advance(), SequenceStep::Finished);
}

#[test]
fn repeats_restart_from_first_value() {
    let mut s = Sequencer::new(ObjectId(0), "left", values(&[0.0, 5.0]), 1.0, RepeatCount::Count(2));
    assert_eq!(s.advance(), SequenceStep::Restart);
    assert_eq!(s.state(), SequenceState::AwaitingRestart);
    assert_eq!(s.remaining(), Some(1));
    assert_eq!(
        s.restart(),
        Some((PropValue::Number(0.0), PropValue::Number(5.0)))
    );
    assert_eq!(s.state(), SequenceState::Playing);
    assert_eq!(s.advance(), SequenceStep::Finished);
}

#[test]
fn indefinite_never_finishes() {
    let mut s = Sequencer::new(ObjectId(0), "left", values(&[0.0, 5.0, 9.0]), 1.0, RepeatCount::Indefinite);
    for _ in 0..50 {
        assert!(matches!(s.advance(), SequenceStep::Next(_)));
        assert_eq!(s.advance(), SequenceStep::Restart);
        assert!(s.restart().is_some());
    }
    assert_eq!(s.remaining(), None);
}

#[test]
fn cancel_and_short_lists_are_done() {
    let mut s = Sequencer::new(ObjectId(0), "left", values(&[0.0, 5.0]), 1.0, RepeatCount::Indefinite);
    s.cancel();
    assert_eq!(s.advance(), SequenceStep::Finished);
    assert_eq!(s.restart(), None);

    let short = Sequencer::new(ObjectId(0), "left", values(&[1.0]), 1.0, RepeatCount::Count(1));
    assert_eq!(short.state(), SequenceState::Done);
    assert_eq!(short.current_value(), None);
}

#[test]
fn step_start_counts_from_the_anchor() {
    let mut s = Sequencer::new(ObjectId(0), "left", values(&[0.0, 1.0, 2.0]), 0.1, RepeatCount::Count(2))
        .starting_at(3.0);
    assert_eq!(s.step_start(), 3.0);
    s.advance();
    assert_eq!(s.step_start(), 3.0 + 0.1);
    assert_eq!(s.advance(), SequenceStep::Restart);
    s.restart();
    assert_eq!(s.step_start(), 3.0 + 2.0 * 0.1);
}

#[test]
fn catch_up_keeps_the_last_counted_cycle() {
    let mut s = Sequencer::new(ObjectId(0), "left", values(&[0.0, 1.0]), 1.0, RepeatCount::Count(5));
    assert_eq!(s.advance(), SequenceStep::Restart);
    s.restart();
    s.catch_up(100.5);
    assert_eq!(s.remaining(), Some(1));
    assert_eq!(s.step_start(), 4.0);
    assert_eq!(s.advance(), SequenceStep::Finished);

    let mut forever = Sequencer::new(ObjectId(0), "left", values(&[0.0, 1.0]), 1.0, RepeatCount::Indefinite);
    forever.advance();
    forever.restart();
    forever.catch_up(0.5);
    assert_eq!(forever.step_start(), 1.0);
    forever.catch_up(100.5);
    assert_eq!(forever.step_start(), 100.0);
}
