//! Session driver: feeds input lines through both sections.
//!
//! A [`Session`] owns the [`World`] and consumes the input one line at a
//! time. Definition lines are reported as soon as they are read. CREATE and
//! ACL commands are held until their ACL block is closed, so the block is
//! always drained whatever the outcome of the command.

use aclfs_core::{PathLimits, Result as CoreResult};
use aclfs_namespace::World;

use crate::error::Error;
use crate::executor::{self, Outcome};
use crate::grammar::{self, AclSpec, Command, SECTION_END};
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Definitions,
    Commands,
    Done,
}

/// A CREATE or ACL command waiting for the end of its ACL block.
#[derive(Debug)]
struct Pending {
    line: usize,
    text: String,
    command: Result<Command, Error>,
    block: Vec<AclSpec>,
    block_error: Option<Error>,
}

impl Pending {
    fn into_outcome(self, world: &mut World) -> Outcome {
        let command = match self.command {
            Ok(command) => command,
            Err(e) => return Outcome::from_result(Err(e)),
        };
        if let Some(e) = self.block_error {
            return Outcome::from_result(Err(e));
        }
        executor::execute(world, &command, &self.block)
    }
}

/// Line-at-a-time interpreter over one [`World`].
#[derive(Debug)]
pub struct Session {
    world: World,
    phase: Phase,
    line: usize,
    pending: Option<Pending>,
}

impl Session {
    /// Creates a session over an existing world.
    pub fn new(world: World) -> Self {
        Self {
            world,
            phase: Phase::Definitions,
            line: 0,
            pending: None,
        }
    }

    /// Creates a session over a freshly bootstrapped world.
    pub fn with_limits(limits: PathLimits) -> CoreResult<Self> {
        Ok(Self::new(World::new(limits)?))
    }

    /// The world as mutated so far.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns `true` once the command section has ended.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Feeds one input line (without its newline).
    ///
    /// Returns a report when the line completes a reportable unit.
    pub fn feed(&mut self, raw: &str) -> Option<Report> {
        self.line += 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        match self.phase {
            Phase::Definitions => self.feed_definition(line),
            Phase::Commands => match self.pending.take() {
                Some(pending) => self.feed_block(pending, line),
                None => self.feed_command(line),
            },
            Phase::Done => {
                tracing::trace!(line = self.line, "Ignoring input after command section");
                None
            }
        }
    }

    /// Signals end of input. Returns a report if an ACL block was left open.
    pub fn finish(&mut self) -> Option<Report> {
        if self.phase == Phase::Definitions {
            executor::end_definitions(&mut self.world);
        }
        self.phase = Phase::Done;
        self.pending.take().map(Self::unterminated)
    }

    /// Feeds every line then finishes, collecting the reports.
    pub fn run<I, S>(&mut self, lines: I) -> Vec<Report>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut reports = Vec::new();
        for line in lines {
            if self.is_done() {
                break;
            }
            reports.extend(self.feed(line.as_ref()));
        }
        reports.extend(self.finish());
        reports
    }

    fn feed_definition(&mut self, line: &str) -> Option<Report> {
        if line == SECTION_END {
            executor::end_definitions(&mut self.world);
            self.phase = Phase::Commands;
            tracing::debug!(line = self.line, "Definition section closed");
            return None;
        }
        let result = grammar::parse_definition(line, self.world.namespace.limits())
            .and_then(|definition| executor::define(&mut self.world, &definition));
        if let Err(e) = &result {
            tracing::debug!(line = self.line, error = %e, "Rejected definition");
        }
        Some(Report::definition(self.line, &result))
    }

    fn feed_command(&mut self, line: &str) -> Option<Report> {
        if line.is_empty() {
            self.phase = Phase::Done;
            tracing::debug!(line = self.line, "Command section closed");
            return None;
        }

        let parsed = grammar::parse_command(line, self.world.namespace.limits());
        if grammar::command_kind(line).is_some_and(|kind| kind.takes_acl_block()) {
            self.pending = Some(Pending {
                line: self.line,
                text: line.to_string(),
                command: parsed,
                block: Vec::new(),
                block_error: None,
            });
            return None;
        }

        let outcome = match parsed {
            Ok(command) => executor::execute(&mut self.world, &command, &[]),
            Err(e) => Outcome::from_result(Err(e)),
        };
        Some(Report::command(self.line, line, outcome))
    }

    fn feed_block(&mut self, mut pending: Pending, line: &str) -> Option<Report> {
        if line == SECTION_END {
            let (number, text) = (pending.line, pending.text.clone());
            let outcome = pending.into_outcome(&mut self.world);
            return Some(Report::command(number, &text, outcome));
        }
        if line.is_empty() {
            self.phase = Phase::Done;
            return Some(Self::unterminated(pending));
        }

        match grammar::parse_acl_line(line) {
            Ok(spec) => pending.block.push(spec),
            Err(e) => {
                tracing::debug!(line = self.line, error = %e, "Malformed ACL line");
                pending.block_error.get_or_insert(e);
            }
        }
        self.pending = Some(pending);
        None
    }

    fn unterminated(pending: Pending) -> Report {
        Report::command(
            pending.line,
            &pending.text,
            Outcome::from_result(Err(Error::UnterminatedBlock)),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::report::Status;

    fn session() -> Session {
        Session::with_limits(PathLimits::default()).unwrap()
    }

    fn render(reports: &[Report]) -> Vec<String> {
        reports.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_definitions_then_commands() {
        let mut s = session();
        let reports = s.run([
            "nicolas.devs /home/nicolas",
            ".",
            "READ nicolas.devs /home/nicolas",
        ]);
        assert_eq!(
            render(&reports),
            vec!["1\tY", "3\tY\tREAD nicolas.devs /home/nicolas"]
        );
    }

    #[test]
    fn test_block_lines_are_counted_but_not_reported() {
        let mut s = session();
        let reports = s.run([
            "ana.ops /tmp/ana",
            ".",
            "CREATE ana.ops /tmp/ana/notes",
            "ana.* rw",
            "*.* r",
            ".",
            "READ ana.ops /tmp/ana/notes",
        ]);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[1].line, 3);
        assert_eq!(reports[1].status, Status::Allowed);
        assert_eq!(reports[2].line, 7);
    }

    #[test]
    fn test_failed_create_still_drains_block() {
        let mut s = session();
        let reports = s.run([
            "ana.ops /tmp/ana",
            ".",
            "CREATE ana.ops /home/x",
            "*.* rw",
            ".",
            "READ ana.ops /tmp",
        ]);
        assert_eq!(
            render(&reports)[1..],
            [
                "3\tN\tCREATE ana.ops /home/x\tNo write permission on /home".to_string(),
                "6\tY\tREAD ana.ops /tmp".to_string(),
            ]
        );
    }

    #[test]
    fn test_malformed_block_line_invalidates_command() {
        let mut s = session();
        let reports = s.run([
            "ana.ops /tmp/ana",
            ".",
            "CREATE ana.ops /tmp/ana/f",
            "*.* rwx",
            ".",
        ]);
        assert_eq!(reports[1].status, Status::Invalid);
        assert_eq!(s.world().namespace.resolve("/tmp/ana/f").unwrap(), None);
    }

    #[test]
    fn test_malformed_create_line_still_drains_block() {
        let mut s = session();
        let reports = s.run([".", "CREATE ana /tmp/x", "*.* r", ".", "READ a.b /tmp"]);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].line, 2);
        assert_eq!(reports[0].status, Status::Invalid);
        assert_eq!(reports[1].line, 5);
    }

    #[test]
    fn test_unterminated_block_at_eof() {
        let mut s = session();
        let reports = s.run(["ana.ops /tmp/ana", ".", "ACL ana.ops /tmp/ana", "*.* r"]);
        assert_eq!(
            reports.last().unwrap().to_string(),
            "3\tX\tACL ana.ops /tmp/ana\tACL block is not terminated"
        );
        assert!(s.is_done());
    }

    #[test]
    fn test_blank_line_ends_command_section() {
        let mut s = session();
        let reports = s.run([".", "", "READ a.b /tmp"]);
        assert!(reports.is_empty());
        assert!(s.is_done());
        assert!(s.feed("READ a.b /tmp").is_none());
    }

    #[test]
    fn test_blank_line_inside_block() {
        let mut s = session();
        let reports = s.run([
            "ana.ops /tmp/ana",
            ".",
            "CREATE ana.ops /tmp/ana/f",
            "",
            "READ ana.ops /tmp",
        ]);
        assert_eq!(reports.len(), 2);
        assert_eq!(
            reports[1].reason.as_deref(),
            Some("ACL block is not terminated")
        );
    }

    #[test]
    fn test_eof_in_definitions_publishes_homes() {
        let mut s = session();
        let reports = s.run(["ana.ops /home/ana"]);
        assert_eq!(render(&reports), vec!["1\tY"]);
        let home = s.world().namespace.resolve("/home/ana").unwrap().unwrap();
        let acl = &s.world().namespace.node(home).unwrap().acl;
        assert_eq!(acl.render(&s.world().registry), "ana.* rw, *.* r");
    }

    #[test]
    fn test_carriage_returns_are_ignored() {
        let mut s = session();
        let reports = s.run(["ana.ops /tmp/ana\r", ".\r", "READ ana.ops /tmp/ana\r"]);
        assert_eq!(
            render(&reports),
            vec!["1\tY", "3\tY\tREAD ana.ops /tmp/ana"]
        );
    }
}
