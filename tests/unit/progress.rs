use super::*;

#[test]
fn percent_is_clamped_and_monotonic() {
    let mut seen = Vec::new();
    let mut cb = |e: &ProgressEvent| seen.push(e.percent);
    let mut p = Progress::new(&mut cb);
    p.emit(-5.0, "a");
    p.emit(40.0, "b");
    p.emit(30.0, "c");
    p.emit(140.0, "d");
    drop(p);
    assert_eq!(seen, vec![0.0, 40.0, 40.0, 100.0]);
}

#[test]
fn steps_map_to_percentages() {
    let mut seen = Vec::new();
    let mut cb = |e: &ProgressEvent| seen.push((e.percent, e.message.clone()));
    let mut p = Progress::new(&mut cb);
    p.step(0, 3, MSG_QUESTION);
    p.step(1, 3, MSG_COUNTDOWN);
    p.step(0, 0, "empty");
    drop(p);
    assert_eq!(seen[0], (0.0, MSG_QUESTION.to_string()));
    assert!((seen[1].0 - 100.0 / 3.0).abs() < 1e-9);
    // A zero total does not produce NaN and cannot go backwards.
    assert!((seen[2].0 - 100.0 / 3.0).abs() < 1e-9);
}
