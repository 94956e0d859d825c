//! Definition section scenarios.

use crate::common::{acl_of, run_script};

#[test]
fn test_first_mention_rules() {
    let script = "\
ana.ops /home/ana
ana.devs
bob.ops
ana.qa /home/other
bob.ops /home/bob
.
";
    let (lines, session) = run_script(script);
    assert_eq!(
        lines,
        vec![
            "1\tY",
            "2\tY",
            "3\tX\tFirst mention of user 'bob' must name a file",
            "4\tX\tOnly the first mention of user 'ana' may name a file",
            "5\tY",
        ]
    );

    let registry = &session.world().registry;
    let ana = registry.find_user("ana").unwrap();
    assert!(registry.belongs(ana, registry.find_group("ops").unwrap()));
    assert!(registry.belongs(ana, registry.find_group("devs").unwrap()));
    assert!(registry.find_group("qa").is_none());
    let other = session.world().namespace.resolve("/home/other").unwrap();
    assert_eq!(other, None);
}

#[test]
fn test_definition_syntax_errors() {
    let script = "\
Ana.ops /home/ana
ana.ops home/ana
ana.ops /home/ana/
ana
.
";
    let (lines, _) = run_script(script);
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| l.contains("\tX\t")), "{lines:?}");
    assert_eq!(
        lines[1],
        "2\tX\tInvalid path 'home/ana': path must start with /"
    );
}

#[test]
fn test_duplicate_file_is_rejected() {
    let script = "\
ana.ops /tmp/shared
bob.ops /tmp/shared
bob.ops
.
";
    let (lines, session) = run_script(script);
    assert_eq!(
        lines,
        vec!["1\tY", "2\tX\tFile already exists: /tmp/shared", "3\tY"]
    );
    // Only the owner's entry and the world read entry.
    assert_eq!(acl_of(&session, "/tmp/shared"), "ana.* rw, *.* r");
}

#[test]
fn test_intermediate_directories_are_world_readable() {
    let script = "\
carl.qa /tmp/deep/er/carl
.
READ carl.qa /tmp/deep/er/carl
CREATE carl.qa /tmp/deep/er/other
.
";
    let (lines, session) = run_script(script);
    assert_eq!(acl_of(&session, "/tmp/deep"), "*.* r");
    assert_eq!(acl_of(&session, "/tmp/deep/er"), "*.* r");
    assert_eq!(acl_of(&session, "/tmp/deep/er/carl"), "carl.* rw, *.* r");
    assert_eq!(lines[1], "3\tY\tREAD carl.qa /tmp/deep/er/carl");
    assert_eq!(
        lines[2],
        "4\tN\tCREATE carl.qa /tmp/deep/er/other\tNo write permission on /tmp/deep/er"
    );
}

#[test]
fn test_overlong_component() {
    let script = "ana.ops /home/abcdefghijklmnopq\n.\n";
    let (lines, session) = run_script(script);
    assert_eq!(
        lines,
        vec![
            "1\tX\tInvalid path '/home/abcdefghijklmnopq': \
             component 'abcdefghijklmnopq' is longer than 16 characters"
        ]
    );
    assert!(session.world().registry.find_user("ana").is_none());
}
