use scuffle::battle::Battle;

/// Asserts that the new logs in the battle are equal to the given logs.
#[track_caller]
pub fn assert_new_logs_eq(battle: &mut Battle, want: &[&str]) {
    let got = battle.new_logs();
    let got = got.iter().map(|log| log.as_str()).collect::<Vec<_>>();
    pretty_assertions::assert_eq!(got, want);
}

/// Asserts that the given logs appear in the battle log in order, possibly with other logs in
/// between.
#[track_caller]
pub fn assert_logs_contain(battle: &Battle, want: &[&str]) {
    let got = battle.all_logs();
    let mut remaining = got.iter();
    for log in want {
        if !remaining.any(|got| got == log) {
            panic!("missing {log} in order, battle logged: {got:#?}");
        }
    }
}
