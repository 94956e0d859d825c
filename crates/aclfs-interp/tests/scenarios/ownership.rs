//! File ownership, inheritance, and deletion scenarios.

use crate::common::{acl_of, run_script};

#[test]
fn test_home_directory_walkthrough() {
    let script = "\
nicolas.devs /home/nicolas
.
READ nicolas.devs /home/nicolas
WRITE nicolas.devs /home
CREATE nicolas.devs /home/nicolas/file1
.
DELETE nicolas.devs /home/nicolas
";
    let (lines, session) = run_script(script);
    assert_eq!(
        lines,
        vec![
            "1\tY",
            "3\tY\tREAD nicolas.devs /home/nicolas",
            "4\tN\tWRITE nicolas.devs /home\tNo write permission on /home",
            "5\tY\tCREATE nicolas.devs /home/nicolas/file1",
            "7\tN\tDELETE nicolas.devs /home/nicolas\t\
             Cannot delete /home/nicolas: directory is not empty",
        ]
    );
    assert_eq!(
        acl_of(&session, "/home/nicolas/file1"),
        "nicolas.* rw, *.* r"
    );
}

#[test]
fn test_nested_ownership() {
    let script = "\
ana.ops /home/ana
bob.ops /home/ana/bob
.
READ bob.ops /home/ana/bob
WRITE bob.ops /home/ana/bob
WRITE bob.ops /home/ana
WRITE ana.ops /home/ana/bob
";
    let (lines, _) = run_script(script);
    assert_eq!(
        lines,
        vec![
            "1\tY",
            "2\tY",
            "4\tY\tREAD bob.ops /home/ana/bob",
            "5\tY\tWRITE bob.ops /home/ana/bob",
            "6\tN\tWRITE bob.ops /home/ana\tNo write permission on /home/ana",
            "7\tN\tWRITE ana.ops /home/ana/bob\tNo write permission on /home/ana/bob",
        ]
    );
}

#[test]
fn test_create_with_explicit_acl_and_delete() {
    let script = "\
ana.ops /tmp/ana
bob.devs /tmp/bob
.
CREATE ana.ops /tmp/ana/shared
ana.* rw
bob.* rw
.
CREATE bob.devs /tmp/ana/shared/inbox
.
DELETE bob.devs /tmp/ana/shared/inbox
DELETE bob.devs /tmp/ana/shared
DELETE ana.ops /tmp/ana/shared
READ ana.ops /tmp/ana/shared
";
    let (lines, session) = run_script(script);
    assert_eq!(
        lines,
        vec![
            "1\tY",
            "2\tY",
            "4\tY\tCREATE ana.ops /tmp/ana/shared",
            "8\tY\tCREATE bob.devs /tmp/ana/shared/inbox",
            "10\tY\tDELETE bob.devs /tmp/ana/shared/inbox",
            "11\tN\tDELETE bob.devs /tmp/ana/shared\tNo write permission on /tmp/ana",
            "12\tY\tDELETE ana.ops /tmp/ana/shared",
            "13\tX\tREAD ana.ops /tmp/ana/shared\tFile not found: /tmp/ana/shared",
        ]
    );
    assert_eq!(
        session.world().namespace.resolve("/tmp/ana/shared").unwrap(),
        None
    );
}

#[test]
fn test_create_in_tmp_inherits_world_write() {
    let script = "\
ana.ops /home/ana
.
CREATE ana.ops /tmp/scratch
.
";
    let (lines, session) = run_script(script);
    assert_eq!(lines[1], "3\tY\tCREATE ana.ops /tmp/scratch");
    assert_eq!(acl_of(&session, "/tmp/scratch"), "*.* rw");
}
