mod common;

use cmdhandler_core::commands::CommandSender;
use common::{TestPlayer, args, builder, defaults};

#[test]
fn permission_hides_candidates() {
    let command = builder(&[])
        .one_completion(1, None, "build", &[])
        .one_completion(1, Some("admin"), "ban", &[])
        .seal()
        .unwrap();

    let mut player = TestPlayer::new("Steve");
    let sender = CommandSender::Player(&mut player);
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&["x", "b"])),
        ["build"]
    );
}

#[test]
fn granted_permission_shows_candidates() {
    let command = builder(&["admin"])
        .one_completion(1, None, "build", &[])
        .one_completion(1, Some("admin"), "ban", &[])
        .seal()
        .unwrap();

    let mut player = TestPlayer::new("Steve");
    let sender = CommandSender::Player(&mut player);
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&["x", "b"])),
        ["build", "ban"]
    );
}

#[test]
fn wrong_preceding_word_falls_back() {
    let command = builder(&[])
        .one_completion(1, None, "confirm", &["remove"])
        .seal()
        .unwrap();

    let mut player = TestPlayer::new("Steve");
    let sender = CommandSender::Player(&mut player);
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&["add", "c"])),
        defaults()
    );
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&["remove", "c"])),
        ["confirm"]
    );
}

#[test]
fn insertion_order_is_kept() {
    let command = builder(&[])
        .list_completion(2, None, &[], &["zeta", "alpha", "mid"])
        .seal()
        .unwrap();

    let mut player = TestPlayer::new("Steve");
    let sender = CommandSender::Player(&mut player);
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&["a", "b", ""])),
        ["zeta", "alpha", "mid"]
    );
}

#[test]
fn duplicates_are_kept() {
    let command = builder(&[])
        .one_completion(0, None, "spin", &[])
        .one_completion(0, None, "spin", &[])
        .seal()
        .unwrap();

    let mut player = TestPlayer::new("Steve");
    let sender = CommandSender::Player(&mut player);
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&["s"])),
        ["spin", "spin"]
    );
}

#[test]
fn every_suggestion_starts_with_the_typed_prefix() {
    let command = builder(&["troll.admin"])
        .list_completion(0, None, &[], &["spin", "spawn", "freeze", "fly", "launch"])
        .one_completion(0, Some("troll.admin"), "smite", &[])
        .one_completion(0, Some("other"), "secret", &[])
        .seal()
        .unwrap();

    let mut player = TestPlayer::new("Steve");
    let sender = CommandSender::Player(&mut player);
    for prefix in ["", "s", "sp", "f", "fl", "l", "sm", "se"] {
        let suggestions = command.tab_complete(&sender, "troll", &args(&[prefix]));
        if suggestions == defaults() {
            continue;
        }
        assert!(!suggestions.is_empty());
        for suggestion in &suggestions {
            assert!(suggestion.starts_with(prefix), "{suggestion} for {prefix}");
            assert_ne!(suggestion, "secret");
        }
    }
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&["se"])),
        defaults()
    );
}

#[test]
fn no_bucket_at_index_falls_back() {
    let command = builder(&[])
        .one_completion(0, None, "spin", &[])
        .seal()
        .unwrap();

    let mut player = TestPlayer::new("Steve");
    let sender = CommandSender::Player(&mut player);
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&["spin", ""])),
        defaults()
    );
}

#[test]
fn empty_index_falls_back() {
    let command = builder(&[]).seal().unwrap();

    let mut player = TestPlayer::new("Steve");
    let sender = CommandSender::Player(&mut player);
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&[""])),
        defaults()
    );
}

#[test]
fn console_gets_default_completions() {
    let command = builder(&[])
        .one_completion(0, None, "spin", &[])
        .seal()
        .unwrap();

    assert_eq!(
        command.tab_complete(&CommandSender::Console, "troll", &args(&[""])),
        defaults()
    );
}

#[test]
fn missing_command_permission_falls_back() {
    let command = builder(&[])
        .permission("troll.use")
        .one_completion(0, None, "spin", &[])
        .seal()
        .unwrap();

    let mut player = TestPlayer::new("Steve");
    let sender = CommandSender::Player(&mut player);
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&[""])),
        defaults()
    );
}

#[test]
fn completing_sends_no_messages() {
    let command = builder(&[])
        .permission("troll.use")
        .one_completion(0, None, "spin", &[])
        .seal()
        .unwrap();

    let mut player = TestPlayer::new("Steve");
    {
        let sender = CommandSender::Player(&mut player);
        command.tab_complete(&sender, "troll", &args(&["s"]));
    }
    assert!(player.messages.is_empty());
}

#[test]
fn list_completion_shares_permission_and_preceding_words() {
    let command = builder(&[])
        .list_completion(1, Some("admin"), &["remove"], &["all", "", "alpha"])
        .list_completion(1, None, &["remove", "clear"], &["any"])
        .seal()
        .unwrap();
    assert_eq!(command.completions().len(), 3);

    let mut player = TestPlayer::new("Steve");
    let sender = CommandSender::Player(&mut player);
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&["remove", "a"])),
        ["any"]
    );
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&["clear", "a"])),
        ["any"]
    );
    assert_eq!(
        command.tab_complete(&sender, "troll", &args(&["add", "a"])),
        defaults()
    );

    let admin = builder(&["admin"])
        .list_completion(1, Some("admin"), &["remove"], &["all", "", "alpha"])
        .seal()
        .unwrap();
    assert_eq!(admin.completions().len(), 2);
    assert_eq!(
        admin.tab_complete(&sender, "troll", &args(&["remove", "a"])),
        ["all", "alpha"]
    );
    assert_eq!(
        admin.tab_complete(&sender, "troll", &args(&["add", "a"])),
        defaults()
    );
}
