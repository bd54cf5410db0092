//! Structural debug text for command trees.
//!
//! Unlike [`Node::render`], the output here is meant for logs and test
//! assertions, never for a shell.

use super::types::{Command, Node};

fn describe_list(commands: &[Command]) -> String {
    commands
        .iter()
        .map(Command::describe)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Command {
    /// Raw text describes as a quoted literal, nodes recurse.
    pub fn describe(&self) -> String {
        match self {
            Command::Raw(text) => format!("{text:?}"),
            Command::Node(node) => node.describe(),
        }
    }
}

impl Node {
    pub fn describe(&self) -> String {
        let kind = self.kind();
        match self {
            Node::Shell(c)
            | Node::Group(c)
            | Node::Test(c)
            | Node::Not(c)
            | Node::Background(c)
            | Node::Subshell(c)
            | Node::Capture(c)
            | Node::Silent(c)
            | Node::Login(c)
            | Node::Sudo(c) => format!("{kind}({})", c.describe()),
            Node::And(cs) | Node::Or(cs) | Node::Chain(cs) | Node::Pipe(cs) => {
                format!("{kind}({})", describe_list(cs))
            }
            Node::If { cond, success, .. } => match self.failure_branch() {
                Some(failure) => format!(
                    "{kind}(IF({}) THEN({}) ELSE({}))",
                    cond.describe(),
                    success.describe(),
                    failure.describe()
                ),
                None => format!("{kind}(IF({}) THEN({}))", cond.describe(), success.describe()),
            },
            Node::Redirect(r) => {
                let verb = kind.to_uppercase();
                let stderr = if r.include_stderr { " AND STDERR" } else { "" };
                format!(
                    "{kind}({verb}({}){stderr} TO ({:?}))",
                    r.command.describe(),
                    r.target
                )
            }
            Node::Advertised {
                advertised,
                actual: Some(actual),
            } => format!("{kind}({}, ACTUAL({}))", advertised.describe(), actual.describe()),
            Node::Advertised {
                advertised,
                actual: None,
            } => format!("{kind}({})", advertised.describe()),
        }
    }
}
