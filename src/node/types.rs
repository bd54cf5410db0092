//! The command tree: child slots, node variants, and their constructors.

use crate::error::CommandError;

/// A child slot: literal shell text or a nested node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Shell text used verbatim.
    Raw(String),
    /// A nested node, rendered recursively.
    Node(Box<Node>),
}

impl Command {
    /// True when this slot contributes no shell text at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Command::Raw(text) => text.is_empty(),
            Command::Node(node) => node.render().is_empty(),
        }
    }
}

impl From<&str> for Command {
    fn from(text: &str) -> Self {
        Command::Raw(text.to_string())
    }
}

impl From<String> for Command {
    fn from(text: String) -> Self {
        Command::Raw(text)
    }
}

impl From<Node> for Command {
    fn from(node: Node) -> Self {
        Command::Node(Box::new(node))
    }
}

/// Which redirection operator a [`Redirect`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// `>` — truncate the target
    Overwrite,
    /// `>>` — append to the target
    Append,
}

impl RedirectMode {
    /// The operator's shell syntax.
    pub fn as_str(self) -> &'static str {
        match self {
            RedirectMode::Overwrite => ">",
            RedirectMode::Append => ">>",
        }
    }
}

/// Output redirection of a grouped command into a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub command: Command,
    /// File path, emitted as-is. Paths are never sub-commands.
    pub target: String,
    /// Merge stderr into the redirected stream (`2>&1`).
    pub include_stderr: bool,
    pub mode: RedirectMode,
}

/// One composition node.
///
/// Nodes are immutable once built. Build n-ary operators with the checked
/// constructors ([`Node::and`], [`Node::pipe`], ...), which reject operand
/// lists too short to mean anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Plain command, rendered as its child.
    Shell(Command),
    /// `{ ... }` block forcing the child to act as one unit.
    Group(Command),
    /// `[ ... ]` test expression.
    Test(Command),
    /// `! { ... }`
    Not(Command),
    /// `cmd &`
    Background(Command),
    /// `(cmd)`
    Subshell(Command),
    /// `$(cmd)`
    Capture(Command),
    /// Discard stdout and stderr.
    Silent(Command),
    /// `bash --login -c '...'`
    Login(Command),
    /// `sudo ... bash -c '...'` keeping the caller's HOME and PATH.
    Sudo(Command),
    /// Operands joined by `&&`, each grouped.
    And(Vec<Command>),
    /// Operands joined by `||`, each grouped.
    Or(Vec<Command>),
    /// Statements joined by newlines.
    Chain(Vec<Command>),
    /// Stages joined by `|`.
    Pipe(Vec<Command>),
    /// `if cond; then ... else ... fi`; an empty failure branch is dropped.
    If {
        cond: Command,
        success: Command,
        failure: Option<Command>,
    },
    /// `{ cmd } > file` or `{ cmd } >> file`.
    Redirect(Redirect),
    /// Echo `advertised` as a transcript, then run `actual`.
    ///
    /// `actual` is `None` when it aliases `advertised`.
    Advertised {
        advertised: Command,
        actual: Option<Command>,
    },
}

/// Collect commands for an n-ary node, rejecting lists shorter than `min`.
fn collect_commands<I, C>(
    node: &'static str,
    min: usize,
    commands: I,
) -> Result<Vec<Command>, CommandError>
where
    I: IntoIterator<Item = C>,
    C: Into<Command>,
{
    let commands: Vec<Command> = commands.into_iter().map(Into::into).collect();
    if commands.len() < min {
        return Err(CommandError::TooFewCommands {
            node,
            min,
            given: commands.len(),
        });
    }
    log::trace!("built {node} with {} command(s)", commands.len());
    Ok(commands)
}

impl Node {
    pub fn shell(command: impl Into<Command>) -> Self {
        Node::Shell(command.into())
    }

    pub fn group(command: impl Into<Command>) -> Self {
        Node::Group(command.into())
    }

    pub fn test(command: impl Into<Command>) -> Self {
        Node::Test(command.into())
    }

    pub fn not(command: impl Into<Command>) -> Self {
        Node::Not(command.into())
    }

    pub fn background(command: impl Into<Command>) -> Self {
        Node::Background(command.into())
    }

    pub fn subshell(command: impl Into<Command>) -> Self {
        Node::Subshell(command.into())
    }

    pub fn capture(command: impl Into<Command>) -> Self {
        Node::Capture(command.into())
    }

    pub fn silent(command: impl Into<Command>) -> Self {
        Node::Silent(command.into())
    }

    pub fn login(command: impl Into<Command>) -> Self {
        Node::Login(command.into())
    }

    pub fn sudo(command: impl Into<Command>) -> Self {
        Node::Sudo(command.into())
    }

    /// `a && b && ...`; needs at least one command.
    pub fn and<I, C>(commands: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Command>,
    {
        collect_commands("And", 1, commands).map(Node::And)
    }

    /// `a || b || ...`; needs at least one command.
    pub fn or<I, C>(commands: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Command>,
    {
        collect_commands("Or", 1, commands).map(Node::Or)
    }

    /// Sequential statements; needs at least one command.
    pub fn chain<I, C>(commands: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Command>,
    {
        collect_commands("Chain", 1, commands).map(Node::Chain)
    }

    /// `a | b | ...`; a pipeline needs at least two stages.
    pub fn pipe<I, C>(commands: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Command>,
    {
        collect_commands("Pipe", 2, commands).map(Node::Pipe)
    }

    pub fn if_then(cond: impl Into<Command>, success: impl Into<Command>) -> Self {
        Node::If {
            cond: cond.into(),
            success: success.into(),
            failure: None,
        }
    }

    pub fn if_then_else(
        cond: impl Into<Command>,
        success: impl Into<Command>,
        failure: impl Into<Command>,
    ) -> Self {
        Node::If {
            cond: cond.into(),
            success: success.into(),
            failure: Some(failure.into()),
        }
    }

    /// `{ cmd } > target`, optionally followed by `2>&1`.
    pub fn redirect(
        command: impl Into<Command>,
        target: impl Into<String>,
        include_stderr: bool,
    ) -> Self {
        Node::Redirect(Redirect {
            command: command.into(),
            target: target.into(),
            include_stderr,
            mode: RedirectMode::Overwrite,
        })
    }

    /// `{ cmd } >> target`, optionally followed by `2>&1`.
    pub fn append(
        command: impl Into<Command>,
        target: impl Into<String>,
        include_stderr: bool,
    ) -> Self {
        Node::Redirect(Redirect {
            command: command.into(),
            target: target.into(),
            include_stderr,
            mode: RedirectMode::Append,
        })
    }

    /// Advertise and run the same command.
    pub fn advertised(command: impl Into<Command>) -> Self {
        Node::Advertised {
            advertised: command.into(),
            actual: None,
        }
    }

    /// Advertise one command but run another.
    ///
    /// Empty raw text for `actual` falls back to running `advertised`.
    pub fn advertised_as(advertised: impl Into<Command>, actual: impl Into<Command>) -> Self {
        let actual = match actual.into() {
            Command::Raw(text) if text.is_empty() => None,
            actual => Some(actual),
        };
        Node::Advertised {
            advertised: advertised.into(),
            actual,
        }
    }

    /// The failure branch of an [`Node::If`] node, unless it renders to nothing.
    pub fn failure_branch(&self) -> Option<&Command> {
        match self {
            Node::If { failure, .. } => failure.as_ref().filter(|f| !f.is_empty()),
            _ => None,
        }
    }

    /// The command shown to the user by an [`Node::Advertised`] node.
    pub fn advertised_command(&self) -> Option<&Command> {
        match self {
            Node::Advertised { advertised, .. } => Some(advertised),
            _ => None,
        }
    }

    /// The command an [`Node::Advertised`] node executes.
    ///
    /// Without an explicit actual command this is the advertised command
    /// itself, not a copy of it.
    pub fn actual_command(&self) -> Option<&Command> {
        match self {
            Node::Advertised { advertised, actual } => Some(actual.as_ref().unwrap_or(advertised)),
            _ => None,
        }
    }

    /// Variant name, as used by `describe`.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Shell(_) => "Shell",
            Node::Group(_) => "Group",
            Node::Test(_) => "Test",
            Node::Not(_) => "Not",
            Node::Background(_) => "Background",
            Node::Subshell(_) => "Subshell",
            Node::Capture(_) => "Capture",
            Node::Silent(_) => "Silent",
            Node::Login(_) => "Login",
            Node::Sudo(_) => "Sudo",
            Node::And(_) => "And",
            Node::Or(_) => "Or",
            Node::Chain(_) => "Chain",
            Node::Pipe(_) => "Pipe",
            Node::If { .. } => "If",
            Node::Redirect(r) => match r.mode {
                RedirectMode::Overwrite => "Redirect",
                RedirectMode::Append => "Append",
            },
            Node::Advertised { .. } => "Advertised",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_rejects_empty() {
        let err = Node::and(Vec::<Command>::new()).unwrap_err();
        assert_eq!(
            err,
            CommandError::TooFewCommands {
                node: "And",
                min: 1,
                given: 0
            }
        );
    }

    #[test]
    fn or_and_chain_accept_one() {
        assert!(Node::or(["a"]).is_ok());
        assert!(Node::chain(["a"]).is_ok());
        assert!(Node::or(Vec::<&str>::new()).is_err());
        assert!(Node::chain(Vec::<&str>::new()).is_err());
    }

    #[test]
    fn pipe_needs_two_stages() {
        let err = Node::pipe(["a"]).unwrap_err();
        assert_eq!(
            err,
            CommandError::TooFewCommands {
                node: "Pipe",
                min: 2,
                given: 1
            }
        );
        assert!(Node::pipe(["a", "b"]).is_ok());
    }

    #[test]
    fn n_ary_preserves_order() {
        let node = Node::chain(["one", "two", "three"]).unwrap();
        assert_eq!(
            node,
            Node::Chain(vec!["one".into(), "two".into(), "three".into()])
        );
    }

    #[test]
    fn advertised_default_actual_is_same_reference() {
        let node = Node::advertised("make");
        let advertised = node.advertised_command().unwrap();
        let actual = node.actual_command().unwrap();
        assert!(std::ptr::eq(advertised, actual));
    }

    #[test]
    fn advertised_explicit_actual_is_distinct() {
        let node = Node::advertised_as("make", "make -j8");
        let advertised = node.advertised_command().unwrap();
        let actual = node.actual_command().unwrap();
        assert!(!std::ptr::eq(advertised, actual));
        assert_eq!(actual, &Command::from("make -j8"));
    }

    #[test]
    fn advertised_empty_actual_falls_back_to_advertised() {
        let node = Node::advertised_as("make", "");
        assert_eq!(node, Node::advertised("make"));
        let advertised = node.advertised_command().unwrap();
        assert!(std::ptr::eq(advertised, node.actual_command().unwrap()));
    }

    #[test]
    fn failure_branch_skips_empty() {
        assert!(Node::if_then_else("true", "a", "").failure_branch().is_none());
        assert!(
            Node::if_then_else("true", "a", Node::shell(""))
                .failure_branch()
                .is_none()
        );
        assert_eq!(
            Node::if_then_else("true", "a", "b").failure_branch(),
            Some(&Command::from("b"))
        );
        assert!(Node::if_then("true", "a").failure_branch().is_none());
    }

    #[test]
    fn actual_command_on_other_variant_is_none() {
        assert!(Node::shell("ls").actual_command().is_none());
        assert!(Node::shell("ls").advertised_command().is_none());
    }

    #[test]
    fn redirect_kinds() {
        assert_eq!(Node::redirect("ls", "out", false).kind(), "Redirect");
        assert_eq!(Node::append("ls", "out", false).kind(), "Append");
    }

    #[test]
    fn nested_node_converts_into_child_slot() {
        let inner = Node::test("-f x");
        let outer = Node::not(inner.clone());
        assert_eq!(outer, Node::Not(Command::Node(Box::new(inner))));
    }
}
