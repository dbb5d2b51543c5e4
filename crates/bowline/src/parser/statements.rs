//! Statement parser
//!
//! Parses individual diagram statements (edge chains, fan-outs, class
//! definitions) into AST structures using chumsky.

use anyhow::Result;
use chumsky::prelude::*;
use chumsky::text::ident;

use super::whitespace::optional_whitespace;
use crate::core::StyleClass;

/// Chumsky-based statement parser.
pub struct StatementParser;

impl StatementParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a single statement.
    pub fn parse_statement(&self, input: &str) -> Result<Statement> {
        let parser = Self::statement_parser().then_ignore(end());

        parser
            .parse(input.trim())
            .into_result()
            .map_err(|errors| anyhow::anyhow!("parse errors: {:?}", errors))
    }

    fn statement_parser<'src>() -> impl Parser<'src, &'src str, Statement> + Clone {
        Self::classdef_parser().or(Self::chain_parser())
    }

    /// Parse `classDef className color:#f00,fill:#900`
    fn classdef_parser<'src>() -> impl Parser<'src, &'src str, Statement> + Clone {
        just("classDef")
            .then(optional_whitespace())
            .ignore_then(ident().map(|s: &str| s.to_string()))
            .then_ignore(optional_whitespace())
            .then(Self::attr_string_parser())
            .map(|(name, attrs)| {
                let class = StyleClass::parse(&name, &attrs);
                Statement::ClassDef(name, class)
            })
    }

    /// Parse the raw attribute string of a classDef: everything up to a
    /// statement separator.
    fn attr_string_parser<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        none_of("\n\r;")
            .repeated()
            .at_least(1)
            .collect::<String>()
            .map(|s| s.trim().to_string())
    }

    /// Parse `:::className` suffix for inline class application
    fn class_suffix_parser<'src>() -> impl Parser<'src, &'src str, String> + Clone {
        just(":::").ignore_then(ident().map(|s: &str| s.to_string()))
    }

    /// Parse a node reference: `id`, `id[Display label]`, `id:::class`.
    fn node_ref<'src>() -> impl Parser<'src, &'src str, NodeRef> + Clone {
        let display_label = just('[')
            .ignore_then(
                none_of("[]\n\r")
                    .repeated()
                    .at_least(1)
                    .collect::<String>()
                    .map(|s| s.trim().to_string()),
            )
            .then_ignore(just(']'));

        ident()
            .map(|s: &str| s.to_string())
            .then(display_label.or_not())
            .then(Self::class_suffix_parser().or_not())
            .map(|((name, label), class)| NodeRef { name, label, class })
            .then_ignore(optional_whitespace())
            .labelled("node reference")
    }

    /// Parse an edge chain with optional `&` fan-outs and `|label|`s:
    /// `A & B -->|yes| C --> D`.
    fn chain_parser<'src>() -> impl Parser<'src, &'src str, Statement> + Clone {
        let group = Self::node_ref()
            .separated_by(just('&').padded_by(optional_whitespace()))
            .at_least(1)
            .collect::<Vec<_>>();

        let edge_label = just('|')
            .ignore_then(
                none_of("|\n\r")
                    .repeated()
                    .at_least(1)
                    .collect::<String>()
                    .map(|s| s.trim().to_string()),
            )
            .then_ignore(just('|'))
            .then_ignore(optional_whitespace());

        let link = just("-->")
            .then_ignore(optional_whitespace())
            .ignore_then(edge_label.or_not())
            .then(group.clone());

        group
            .then(link.repeated().collect::<Vec<_>>())
            .map(|(head, links)| Statement::Chain(ChainStmt { head, links }))
            .labelled("edge chain")
    }
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A node reference inside a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRef {
    pub name: String,
    /// Display label from `name[label]`; defaults to the name itself.
    pub label: Option<String>,
    /// Style class applied via `:::className`.
    pub class: Option<String>,
}

/// An edge chain: a head group followed by zero or more labeled links.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStmt {
    pub head: Vec<NodeRef>,
    pub links: Vec<(Option<String>, Vec<NodeRef>)>,
}

/// A parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Chain(ChainStmt),
    ClassDef(String, StyleClass),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Statement {
        StatementParser::new().parse_statement(input).unwrap()
    }

    #[test]
    fn test_single_node() {
        let stmt = parse("A");
        if let Statement::Chain(chain) = stmt {
            assert_eq!(chain.head.len(), 1);
            assert_eq!(chain.head[0].name, "A");
            assert_eq!(chain.head[0].label, None);
            assert!(chain.links.is_empty());
        } else {
            panic!("expected chain statement");
        }
    }

    #[test]
    fn test_simple_edge() {
        let stmt = parse("A --> B");
        if let Statement::Chain(chain) = stmt {
            assert_eq!(chain.head[0].name, "A");
            assert_eq!(chain.links.len(), 1);
            let (label, group) = &chain.links[0];
            assert_eq!(*label, None);
            assert_eq!(group[0].name, "B");
        } else {
            panic!("expected chain statement");
        }
    }

    #[test]
    fn test_edge_without_spaces() {
        let stmt = parse("A-->B");
        if let Statement::Chain(chain) = stmt {
            assert_eq!(chain.links.len(), 1);
        } else {
            panic!("expected chain statement");
        }
    }

    #[test]
    fn test_labeled_edge() {
        let stmt = parse("A -->|Yes| B");
        if let Statement::Chain(chain) = stmt {
            let (label, group) = &chain.links[0];
            assert_eq!(label.as_deref(), Some("Yes"));
            assert_eq!(group[0].name, "B");
        } else {
            panic!("expected chain statement");
        }
    }

    #[test]
    fn test_chained_edges() {
        let stmt = parse("A --> B --> C");
        if let Statement::Chain(chain) = stmt {
            assert_eq!(chain.links.len(), 2);
            assert_eq!(chain.links[1].1[0].name, "C");
        } else {
            panic!("expected chain statement");
        }
    }

    #[test]
    fn test_fan_out() {
        let stmt = parse("A & B --> C");
        if let Statement::Chain(chain) = stmt {
            assert_eq!(chain.head.len(), 2);
            assert_eq!(chain.head[1].name, "B");
            assert_eq!(chain.links[0].1.len(), 1);
        } else {
            panic!("expected chain statement");
        }
    }

    #[test]
    fn test_display_label() {
        let stmt = parse("A[Start here] --> B");
        if let Statement::Chain(chain) = stmt {
            assert_eq!(chain.head[0].label.as_deref(), Some("Start here"));
        } else {
            panic!("expected chain statement");
        }
    }

    #[test]
    fn test_class_suffix() {
        let stmt = parse("A:::hot --> B[End]:::cold");
        if let Statement::Chain(chain) = stmt {
            assert_eq!(chain.head[0].class.as_deref(), Some("hot"));
            let target = &chain.links[0].1[0];
            assert_eq!(target.class.as_deref(), Some("cold"));
            assert_eq!(target.label.as_deref(), Some("End"));
        } else {
            panic!("expected chain statement");
        }
    }

    #[test]
    fn test_classdef() {
        let stmt = parse("classDef hot color:#f00,fill:#900");
        if let Statement::ClassDef(name, class) = stmt {
            assert_eq!(name, "hot");
            assert_eq!(class.attrs.get("color"), Some(&"#f00".to_string()));
        } else {
            panic!("expected classDef statement");
        }
    }

    #[test]
    fn test_malformed_statements() {
        let parser = StatementParser::new();
        assert!(parser.parse_statement("A -->").is_err());
        assert!(parser.parse_statement("--> B").is_err());
        assert!(parser.parse_statement("A[unclosed --> B").is_err());
        assert!(parser.parse_statement("A -->|label B").is_err());
    }

    #[test]
    fn test_labels_are_trimmed() {
        let stmt = parse("A -->| padded | B");
        if let Statement::Chain(chain) = stmt {
            assert_eq!(chain.links[0].0.as_deref(), Some("padded"));
        } else {
            panic!("expected chain statement");
        }
    }
}
