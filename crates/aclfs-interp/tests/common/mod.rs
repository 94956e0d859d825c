//! Common helpers for interpreter integration tests.

use aclfs_core::PathLimits;
use aclfs_interp::{Report, Session};

/// Runs a whole input script through a fresh session.
///
/// Returns the rendered report lines and the finished session.
pub fn run_script(script: &str) -> (Vec<String>, Session) {
    let mut session = Session::with_limits(PathLimits::default()).unwrap();
    let reports = session.run(script.lines());
    (render(&reports), session)
}

/// Renders reports in their tab-separated text form.
pub fn render(reports: &[Report]) -> Vec<String> {
    reports.iter().map(ToString::to_string).collect()
}

/// Renders the ACL of `path` in the finished session.
pub fn acl_of(session: &Session, path: &str) -> String {
    let world = session.world();
    let id = world.namespace.resolve(path).unwrap().unwrap();
    world.namespace.node(id).unwrap().acl.render(&world.registry)
}
