//! Property-based tests for the PracticeSession state machine.
//!
//! Generates random action sequences via proptest and verifies that
//! structural invariants hold after every action.

use proptest::prelude::*;

use super::*;
use crate::SessionState;

// ---------------------------------------------------------------------------
// Action enum: every user-facing operation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Action {
    Start,
    TogglePause,
    Reset,
    TypeCorrect,
    /// Strict prefix of the current keys.
    TypePrefix,
    TypeWrong(String),
    PushKey(char),
    Backspace,
    /// Let time pass without input.
    Wait(u64),
}

// ---------------------------------------------------------------------------
// Strategy: weighted random Action generation
// ---------------------------------------------------------------------------

fn arb_key() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        'v', 's', 'g', 'o', 'n', 'i', 'h', 'c', 'a', 'x', ';', 'Q',
    ])
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        5 => Just(Action::Start),
        3 => Just(Action::TogglePause),
        1 => Just(Action::Reset),
        30 => Just(Action::TypeCorrect),
        5 => Just(Action::TypePrefix),
        8 => "[a-z;]{0,4}".prop_map(Action::TypeWrong),
        15 => arb_key().prop_map(Action::PushKey),
        4 => Just(Action::Backspace),
        5 => (1u64..5_000).prop_map(Action::Wait),
    ]
}

// ---------------------------------------------------------------------------
// Execute an Action against the session
// ---------------------------------------------------------------------------

fn execute_action(session: &mut PracticeSession, action: &Action, now: &mut u64) {
    *now += 10;
    match action {
        Action::Start => {
            let _ = session.start(*now);
        }
        Action::TogglePause => {
            session.toggle_pause(*now);
        }
        Action::Reset => session.reset(),
        Action::TypeCorrect => {
            type_current(session, *now);
        }
        Action::TypePrefix => {
            let keys = current_keys(session);
            let prefix: String = keys.chars().take(keys.chars().count().saturating_sub(1)).collect();
            session.submit_input(&prefix, *now);
        }
        Action::TypeWrong(s) => {
            session.submit_input(s, *now);
        }
        Action::PushKey(c) => {
            session.push_key(*c, *now);
        }
        Action::Backspace => {
            session.backspace();
        }
        Action::Wait(ms) => *now += ms,
    }
}

// ---------------------------------------------------------------------------
// Invariant checks: run after every action
// ---------------------------------------------------------------------------

fn assert_invariants(session: &PracticeSession, action: &Action, now: u64) {
    let stats = session.stats();

    // 1. Cursor never passes the end
    assert!(
        session.cursor() <= session.units().len(),
        "cursor {} beyond {} units after {:?}",
        session.cursor(),
        session.units().len(),
        action,
    );

    // 2. While running, the cursor sits on a unit that needs input
    if session.state() == SessionState::Running {
        assert!(
            session.current_unit().is_some_and(|u| u.requires_input()),
            "running session must rest on a typeable unit, after {:?}",
            action,
        );
    }

    // 3. Completed ⇔ cursor at the end with every unit typed
    if session.state() == SessionState::Completed {
        assert_eq!(session.cursor(), session.units().len(), "after {:?}", action);
        assert_eq!(stats.completed(), stats.total_valid(), "after {:?}", action);
    }

    // 4. Counters are consistent
    assert!(stats.completed() <= stats.total_valid(), "after {:?}", action);
    let recorded: usize = stats.errors().values().map(Vec::len).sum();
    assert_eq!(recorded, stats.error_count(), "after {:?}", action);
    assert!(stats.progress() <= 100, "after {:?}", action);

    // 5. Elapsed time never exceeds the wall clock
    if let Some(start) = stats.start_time() {
        assert!(
            stats.elapsed_ms(now) <= now - start,
            "elapsed exceeds wall clock after {:?}",
            action,
        );
    } else {
        assert_eq!(stats.elapsed_ms(now), 0);
    }

    // 6. Clock frozen exactly when paused or completed
    let frozen = matches!(
        session.state(),
        SessionState::Paused | SessionState::Completed
    );
    assert_eq!(
        stats.is_clock_paused(),
        frozen,
        "clock pause flag mismatch in {:?} after {:?}",
        session.state(),
        action,
    );

    // 7. Pending input is a strict prefix candidate: shorter than the keys
    if let Some(unit) = session.current_unit() {
        let keys_len = unit.keys.as_deref().map_or(0, |k| k.chars().count());
        assert!(
            session.pending_input().chars().count() < keys_len.max(1),
            "pending {:?} not shorter than keys after {:?}",
            session.pending_input(),
            action,
        );
    }

    // 8. Not started ⇒ nothing measured
    if session.state() == SessionState::NotStarted {
        assert!(stats.start_time().is_none(), "after {:?}", action);
        assert_eq!(stats.error_count(), 0, "after {:?}", action);
    }
}

// ---------------------------------------------------------------------------
// proptest entry point
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn sentence_invariants_hold(actions in prop::collection::vec(arb_action(), 1..120)) {
        let mut session = make_session(
            corpus(&["中国，你好", "春风。天安", "a1中"], &[]),
            SessionConfig::default(),
        );
        let mut now = 0;
        for action in &actions {
            execute_action(&mut session, action, &mut now);
            assert_invariants(&session, action, now);
        }
    }

    #[test]
    fn word_invariants_hold(actions in prop::collection::vec(arb_action(), 1..120)) {
        let mut session = word_session("中国，你好春风");
        let mut now = 0;
        for action in &actions {
            execute_action(&mut session, action, &mut now);
            assert_invariants(&session, action, now);
            prop_assert_ne!(session.state(), SessionState::Completed);
            prop_assert_eq!(session.stats().completed(), 0);
        }
    }

    #[test]
    fn short_input_never_records(prefix_len in 0usize..2, seed in 0u64..64) {
        let mut session = make_session(
            corpus(&["中国你好春风天安"], &[]),
            SessionConfig::default(),
        );
        session.set_seed(seed);
        session.start(0).unwrap();
        let keys = current_keys(&session);
        let prefix: String = keys.chars().take(prefix_len).collect();
        let timing_before = session.stats().timing(session.cursor()).cloned();
        prop_assert_eq!(session.submit_input(&prefix, 10), InputOutcome::Waiting);
        prop_assert_eq!(session.stats().error_count(), 0);
        prop_assert_eq!(session.stats().timing(session.cursor()).cloned(), timing_before);
    }
}
