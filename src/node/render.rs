//! Rendering a command tree into shell text.
//!
//! Rendering is a pure recursive walk: raw text is used verbatim, nodes
//! apply their transformation to the rendered form of their children.

use std::fmt;

use super::types::{Command, Node, RedirectMode};
use crate::quote::{quote, transcript};

/// Target of [`Node::Silent`].
pub const NULL_DEVICE: &str = "/dev/null";

/// `{\n<text>\n}` with only the outer whitespace of `text` trimmed.
fn group(text: &str) -> String {
    format!("{{\n{}\n}}", text.trim())
}

fn redirect(command: &Command, mode: RedirectMode, target: &str, include_stderr: bool) -> String {
    let redirected = format!("{} {} {target}", group(&command.render()), mode.as_str());
    if include_stderr {
        format!("{redirected} 2>&1")
    } else {
        redirected
    }
}

fn join_grouped(commands: &[Command], separator: &str) -> String {
    commands
        .iter()
        .map(|command| group(&command.render()))
        .collect::<Vec<_>>()
        .join(separator)
}

fn join_plain(commands: &[Command], separator: &str) -> String {
    commands
        .iter()
        .map(Command::render)
        .collect::<Vec<_>>()
        .join(separator)
}

impl Command {
    /// Render this slot as shell text.
    pub fn render(&self) -> String {
        match self {
            Command::Raw(text) => text.clone(),
            Command::Node(node) => node.render(),
        }
    }
}

impl Node {
    /// Render this node as shell text suitable for `bash -c`.
    ///
    /// No trailing newline is guaranteed.
    pub fn render(&self) -> String {
        match self {
            Node::Shell(command) => command.render(),
            Node::Group(command) => group(&command.render()),
            Node::Test(command) => format!("[ {} ]", command.render()),
            Node::Not(command) => format!("! {}", group(&command.render())),
            Node::Background(command) => format!("{} &", command.render()),
            Node::Subshell(command) => format!("({})", command.render()),
            Node::Capture(command) => format!("$({})", command.render()),
            Node::Silent(command) => redirect(command, RedirectMode::Overwrite, NULL_DEVICE, true),
            Node::Login(command) => format!("bash --login -c {}", quote(&command.render())),
            Node::Sudo(command) => format!(
                "sudo -E HOME=\"$HOME\" PATH=\"$PATH\" bash -c {}",
                quote(&command.render())
            ),
            Node::And(commands) => join_grouped(commands, " && "),
            Node::Or(commands) => join_grouped(commands, " || "),
            Node::Chain(commands) => join_plain(commands, "\n"),
            Node::Pipe(commands) => join_plain(commands, " | "),
            Node::If { cond, success, .. } => {
                let lines = [
                    format!("if {}; then", cond.render()),
                    success.render(),
                    self.failure_branch()
                        .map(|f| format!("else\n{}", f.render()))
                        .unwrap_or_default(),
                    "fi".to_string(),
                ];
                lines
                    .into_iter()
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Node::Redirect(r) => redirect(&r.command, r.mode, &r.target, r.include_stderr),
            Node::Advertised { advertised, actual } => {
                let print = format!("printf {}", quote(&transcript(&advertised.render())));
                let run = actual.as_ref().unwrap_or(advertised);
                format!("{} && {}", group(&print), group(&run.render()))
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
