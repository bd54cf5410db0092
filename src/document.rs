//! Tree documents: command trees written as JSON or TOML data.
//!
//! A string is raw shell text; a single-key table names a node variant.
//!
//! ```json
//! {"and": ["make", {"silent": "rm -rf /tmp/x"}]}
//! ```
//!
//! Documents are converted through the [`Node`] constructors, so a document
//! can never produce a tree the constructors would reject.

use serde::Deserialize;

use crate::error::{CommandError, DocumentError};
use crate::node::{Command, Node};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocCommand {
    Raw(String),
    Node(Box<DocNode>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DocNode {
    Shell(DocCommand),
    Group(DocCommand),
    Test(DocCommand),
    Not(DocCommand),
    Background(DocCommand),
    Subshell(DocCommand),
    Capture(DocCommand),
    Silent(DocCommand),
    Login(DocCommand),
    Sudo(DocCommand),
    And(Vec<DocCommand>),
    Or(Vec<DocCommand>),
    Chain(Vec<DocCommand>),
    Pipe(Vec<DocCommand>),
    If {
        cond: DocCommand,
        then: DocCommand,
        #[serde(default, rename = "else")]
        otherwise: Option<DocCommand>,
    },
    Redirect(DocRedirect),
    Append(DocRedirect),
    Advertised {
        advertised: DocCommand,
        #[serde(default)]
        actual: Option<DocCommand>,
    },
}

#[derive(Debug, Deserialize)]
struct DocRedirect {
    command: DocCommand,
    target: String,
    #[serde(default)]
    include_stderr: bool,
}

fn build_command(doc: DocCommand) -> Result<Command, CommandError> {
    match doc {
        DocCommand::Raw(text) => Ok(Command::Raw(text)),
        DocCommand::Node(node) => build_node(*node).map(Command::from),
    }
}

fn build_list(docs: Vec<DocCommand>) -> Result<Vec<Command>, CommandError> {
    docs.into_iter().map(build_command).collect()
}

fn build_node(doc: DocNode) -> Result<Node, CommandError> {
    let node = match doc {
        DocNode::Shell(c) => Node::shell(build_command(c)?),
        DocNode::Group(c) => Node::group(build_command(c)?),
        DocNode::Test(c) => Node::test(build_command(c)?),
        DocNode::Not(c) => Node::not(build_command(c)?),
        DocNode::Background(c) => Node::background(build_command(c)?),
        DocNode::Subshell(c) => Node::subshell(build_command(c)?),
        DocNode::Capture(c) => Node::capture(build_command(c)?),
        DocNode::Silent(c) => Node::silent(build_command(c)?),
        DocNode::Login(c) => Node::login(build_command(c)?),
        DocNode::Sudo(c) => Node::sudo(build_command(c)?),
        DocNode::And(cs) => Node::and(build_list(cs)?)?,
        DocNode::Or(cs) => Node::or(build_list(cs)?)?,
        DocNode::Chain(cs) => Node::chain(build_list(cs)?)?,
        DocNode::Pipe(cs) => Node::pipe(build_list(cs)?)?,
        DocNode::If {
            cond,
            then,
            otherwise: Some(otherwise),
        } => Node::if_then_else(
            build_command(cond)?,
            build_command(then)?,
            build_command(otherwise)?,
        ),
        DocNode::If {
            cond,
            then,
            otherwise: None,
        } => Node::if_then(build_command(cond)?, build_command(then)?),
        DocNode::Redirect(r) => Node::redirect(build_command(r.command)?, r.target, r.include_stderr),
        DocNode::Append(r) => Node::append(build_command(r.command)?, r.target, r.include_stderr),
        DocNode::Advertised {
            advertised,
            actual: Some(actual),
        } => Node::advertised_as(build_command(advertised)?, build_command(actual)?),
        DocNode::Advertised {
            advertised,
            actual: None,
        } => Node::advertised(build_command(advertised)?),
    };
    Ok(node)
}

/// Load a tree from JSON. A bare string document becomes a [`Node::Shell`].
pub fn from_json(text: &str) -> Result<Node, DocumentError> {
    let doc: DocCommand = serde_json::from_str(text)?;
    let node = match build_command(doc)? {
        Command::Node(node) => *node,
        raw @ Command::Raw(_) => Node::shell(raw),
    };
    log::debug!("loaded JSON document: {}", node.describe());
    Ok(node)
}

/// Load a tree from TOML. The document root must be a single-key table.
pub fn from_toml(text: &str) -> Result<Node, DocumentError> {
    let doc: DocNode = toml::from_str(text)?;
    let node = build_node(doc)?;
    log::debug!("loaded TOML document: {}", node.describe());
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_nested_tree() {
        let node = from_json(r#"{"and": ["make", {"silent": "rm -rf /tmp/x"}]}"#).unwrap();
        assert_eq!(
            node,
            Node::and([Command::from("make"), Node::silent("rm -rf /tmp/x").into()]).unwrap()
        );
    }

    #[test]
    fn json_bare_string_is_shell() {
        assert_eq!(from_json(r#""ls -la""#).unwrap(), Node::shell("ls -la"));
    }

    #[test]
    fn json_if_with_else() {
        let node = from_json(r#"{"if": {"cond": {"test": "-f x"}, "then": "a", "else": "b"}}"#).unwrap();
        assert_eq!(node, Node::if_then_else(Node::test("-f x"), "a", "b"));
    }

    #[test]
    fn json_if_without_else() {
        let node = from_json(r#"{"if": {"cond": "true", "then": "a"}}"#).unwrap();
        assert_eq!(node, Node::if_then("true", "a"));
    }

    #[test]
    fn json_redirect_defaults_stderr_off() {
        let node = from_json(r#"{"append": {"command": "ls", "target": "log"}}"#).unwrap();
        assert_eq!(node, Node::append("ls", "log", false));
    }

    #[test]
    fn json_advertised_alias_and_actual() {
        let node = from_json(r#"{"advertised": {"advertised": "make"}}"#).unwrap();
        assert_eq!(node, Node::advertised("make"));
        let node = from_json(r#"{"advertised": {"advertised": "make", "actual": "make -j8"}}"#).unwrap();
        assert_eq!(node, Node::advertised_as("make", "make -j8"));
    }

    #[test]
    fn json_empty_else_is_dropped() {
        let node = from_json(r#"{"if": {"cond": "true", "then": "a", "else": ""}}"#).unwrap();
        assert_eq!(node.render(), "if true; then\na\nfi");
        assert_eq!(node.describe(), "If(IF(\"true\") THEN(\"a\"))");
    }

    #[test]
    fn json_empty_actual_aliases_advertised() {
        let node = from_json(r#"{"advertised": {"advertised": "make", "actual": ""}}"#).unwrap();
        assert_eq!(node, Node::advertised("make"));
    }

    #[test]
    fn json_short_pipe_is_rejected() {
        let err = from_json(r#"{"pipe": ["a"]}"#).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Command(CommandError::TooFewCommands { node: "Pipe", .. })
        ));
    }

    #[test]
    fn json_nested_empty_and_is_rejected() {
        let err = from_json(r#"{"not": {"and": []}}"#).unwrap_err();
        assert!(matches!(err, DocumentError::Command(_)));
    }

    #[test]
    fn json_syntax_error() {
        assert!(matches!(from_json("{"), Err(DocumentError::Json(_))));
    }

    #[test]
    fn toml_single_key_root() {
        assert_eq!(from_toml(r#"sudo = "id""#).unwrap(), Node::sudo("id"));
    }

    #[test]
    fn toml_n_ary() {
        let node = from_toml(r#"pipe = ["ps aux", "grep ssh"]"#).unwrap();
        assert_eq!(node, Node::pipe(["ps aux", "grep ssh"]).unwrap());
    }

    #[test]
    fn toml_table_variant() {
        let node = from_toml(
            r#"
            [redirect]
            command = "make"
            target = "build.log"
            include_stderr = true
        "#,
        )
        .unwrap();
        assert_eq!(node, Node::redirect("make", "build.log", true));
    }
}
