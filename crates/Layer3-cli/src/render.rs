//! 출력 포맷 - 트리 및 lookup 결과

use nametree_core::LdapDirContext;
use nametree_foundation::{BoundValue, Node, Resolved};
use std::fmt::Write;

/// 디렉토리 트리를 들여쓰기 텍스트로
pub fn render_tree(root: &Node) -> String {
    let mut out = String::from("/\n");
    if let Some(children) = root.children() {
        for (segment, child) in children {
            render_node(&mut out, segment, child, 1);
        }
    }
    out
}

fn render_node(out: &mut String, segment: &str, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Context { children } => {
            let _ = writeln!(out, "{}{}/", indent, segment);
            for (child_segment, child) in children {
                render_node(out, child_segment, child, depth + 1);
            }
        }
        Node::Leaf { value } => {
            let _ = writeln!(out, "{}{} = {}", indent, segment, render_value(value));
        }
    }
}

/// 값 한 줄 표현
pub fn render_value(value: &BoundValue) -> String {
    match value {
        BoundValue::String(s) => format!("\"{}\"", s),
        BoundValue::Properties(props) => props.to_string(),
        BoundValue::Reference(reference) => format!(
            "<reference {} via {}>",
            reference.class_name, reference.factory
        ),
    }
}

/// lookup 결과 표현
pub fn render_resolved(resolved: Resolved) -> String {
    match resolved {
        Resolved::Context => "<context>".to_string(),
        Resolved::Value(value) => render_value(&value),
        Resolved::Object(handle) => match handle.downcast::<LdapDirContext>() {
            Ok(ldap) => ldap.to_string(),
            Err(_) => "<object>".to_string(),
        },
    }
}
