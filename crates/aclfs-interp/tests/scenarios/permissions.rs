//! ACL replacement, entry ordering, and ancestor checks.

use crate::common::{acl_of, run_script};

#[test]
fn test_first_matching_entry_wins() {
    let script = "\
ana.ops /home/ana
ana.devs
bob.devs /tmp/bob
.
ACL ana.ops /home/ana
*.* r
ana.* rw
.
WRITE ana.ops /home/ana
READ bob.devs /home/ana
ACL ana.ops /home/ana
ana.* rw
.
";
    let (lines, session) = run_script(script);
    assert_eq!(
        lines,
        vec![
            "1\tY",
            "2\tY",
            "3\tY",
            "5\tY\tACL ana.ops /home/ana",
            "9\tN\tWRITE ana.ops /home/ana\tNo write permission on /home/ana",
            "10\tY\tREAD bob.devs /home/ana",
            "11\tN\tACL ana.ops /home/ana\tNo write permission on /home/ana",
        ]
    );
    assert_eq!(acl_of(&session, "/home/ana"), "*.* r, ana.* rw");
}

#[test]
fn test_group_entries() {
    let script = "\
ana.ops /home/ana
ana.devs
bob.devs /tmp/bob
.
ACL bob.devs /tmp/bob
*.devs rw
.
WRITE ana.devs /tmp/bob
WRITE ana.ops /tmp/bob
READ ana.ops /tmp/bob
";
    let (lines, _) = run_script(script);
    assert_eq!(
        lines[3..],
        [
            "5\tY\tACL bob.devs /tmp/bob".to_string(),
            "8\tY\tWRITE ana.devs /tmp/bob".to_string(),
            "9\tN\tWRITE ana.ops /tmp/bob\tNo write permission on /tmp/bob".to_string(),
            "10\tN\tREAD ana.ops /tmp/bob\tNo read permission on /tmp/bob".to_string(),
        ]
    );
}

#[test]
fn test_explicit_no_access_entry_shadows_later_grants() {
    let script = "\
ana.ops /tmp/ana
bob.ops /tmp/bob
.
ACL ana.ops /tmp/ana
bob.* -
*.ops rw
.
READ bob.ops /tmp/ana
WRITE ana.ops /tmp/ana
";
    let (lines, session) = run_script(script);
    assert_eq!(
        lines[2..],
        [
            "4\tY\tACL ana.ops /tmp/ana".to_string(),
            "8\tN\tREAD bob.ops /tmp/ana\tNo read permission on /tmp/ana".to_string(),
            "9\tY\tWRITE ana.ops /tmp/ana".to_string(),
        ]
    );
    assert_eq!(acl_of(&session, "/tmp/ana"), "bob.* -, *.ops rw");
}

#[test]
fn test_read_requires_every_ancestor() {
    let script = "\
bob.devs /tmp/bob
ana.ops /tmp/ana
.
CREATE bob.devs /tmp/bob/notes
*.* r
.
ACL bob.devs /tmp/bob
bob.* rw
.
READ ana.ops /tmp/bob/notes
READ bob.devs /tmp/bob/notes
WRITE bob.devs /tmp/bob/notes
";
    let (lines, _) = run_script(script);
    assert_eq!(
        lines[2..],
        [
            "4\tY\tCREATE bob.devs /tmp/bob/notes".to_string(),
            "7\tY\tACL bob.devs /tmp/bob".to_string(),
            "10\tN\tREAD ana.ops /tmp/bob/notes\tNo read permission on /tmp/bob".to_string(),
            "11\tY\tREAD bob.devs /tmp/bob/notes".to_string(),
            "12\tN\tWRITE bob.devs /tmp/bob/notes\tNo write permission on /tmp/bob/notes"
                .to_string(),
        ]
    );
}

#[test]
fn test_empty_and_unterminated_blocks() {
    let script = "\
ana.ops /tmp/ana
.
ACL ana.ops /tmp/ana
.
ACL ana.ops /tmp/ana
zoe.qa r
.
CREATE ana.ops /tmp/ana/f
ana.* rw";
    let (lines, session) = run_script(script);
    assert_eq!(
        lines[1..],
        [
            "3\tX\tACL ana.ops /tmp/ana\tACL can't be empty".to_string(),
            "5\tY\tACL ana.ops /tmp/ana".to_string(),
            "8\tX\tCREATE ana.ops /tmp/ana/f\tACL block is not terminated".to_string(),
        ]
    );
    assert_eq!(acl_of(&session, "/tmp/ana"), "zoe.qa r");
    assert!(session.world().registry.find_user("zoe").is_some());
    let file = session.world().namespace.resolve("/tmp/ana/f").unwrap();
    assert_eq!(file, None);
}

#[test]
fn test_denied_acl_registers_nobody() {
    let script = "\
ana.ops /home/ana
bob.ops /tmp/bob
.
ACL bob.ops /home/ana
carl.qa rw
.
";
    let (lines, session) = run_script(script);
    assert_eq!(
        lines[2],
        "4\tN\tACL bob.ops /home/ana\tNo write permission on /home/ana"
    );
    let registry = &session.world().registry;
    assert!(registry.find_user("carl").is_none());
    assert!(registry.find_group("qa").is_none());
}
