//! Block dialect (ClrMamePro/RomVault) to canonical tree conversion.
//!
//! The dialect is line-oriented: `game (` opens a block, `)` closes it,
//! `key value` lines inside a block are leaves, and `rom ( ... )` lines are
//! inline single-line records. Parsing is deliberately permissive: these
//! files are community-authored and not validated upstream, so unrecognized
//! lines are skipped rather than failing the whole file.

use std::io::BufRead;

use crate::error::DatError;
use crate::tree::DatNode;

/// Convert block-dialect text into the canonical tree.
///
/// The returned root is named `datafile`; `clrmamepro`/`romvault` header
/// blocks appear under it renamed to `header`, other blocks keep their tag.
/// A `name` leaf inside a non-header block is projected onto the block node
/// as a `name` attribute and duplicated as a `description` leaf, since the
/// dialect has no separate description field for the tree to carry.
pub fn convert_block_dialect<R: BufRead>(reader: R) -> Result<DatNode, DatError> {
    let mut root = DatNode::new("datafile");
    let mut open: Vec<DatNode> = Vec::new();

    for line_result in reader.lines() {
        let line = line_result?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // Block close: ")"
        if trimmed == ")" {
            if let Some(done) = open.pop() {
                match open.last_mut() {
                    Some(parent) => parent.push(done),
                    None => root.push(done),
                }
            }
            continue;
        }

        // Inline single-line record: `rom ( ... )` / `disk ( ... )`
        if let Some(current) = open.last_mut() {
            if let Some(record) = parse_inline_record(trimmed) {
                current.push(record);
                continue;
            }
        }

        // Block open: `<tag> (`
        if let Some(tag) = detect_block_start(trimmed) {
            let name = if tag == "clrmamepro" || tag == "romvault" {
                "header".to_string()
            } else {
                tag
            };
            open.push(DatNode::new(name));
            continue;
        }

        // Leaf: `<key> <value...>`
        if let Some(current) = open.last_mut() {
            if let Some((key, value)) = parse_leaf(trimmed) {
                if key == "name" && current.name != "header" {
                    current.set_attr("name", value.clone());
                    current.push(DatNode::leaf("description", value));
                } else {
                    current.push(DatNode::leaf(key, value));
                }
                continue;
            }
        }

        log::debug!("skipping unrecognized line: {trimmed}");
    }

    // Unclosed blocks still attach, innermost first
    while let Some(done) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.push(done),
            None => root.push(done),
        }
    }

    Ok(root)
}

/// Detect a block start like `clrmamepro (` or `game (`.
fn detect_block_start(line: &str) -> Option<String> {
    let stripped = line.trim_end();
    if stripped.ends_with('(') {
        let tag = stripped[..stripped.len() - 1].trim();
        if !tag.is_empty() && tag.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Some(tag.to_lowercase());
        }
    }
    None
}

/// Parse an inline record like `rom ( name "a.bin" size 10 crc ab12cd34 )`
/// into a node whose attributes are the key/value pairs.
fn parse_inline_record(line: &str) -> Option<DatNode> {
    let kind = if line.starts_with("rom") {
        "rom"
    } else if line.starts_with("disk") {
        "disk"
    } else {
        return None;
    };

    let rest = line[kind.len()..].trim_start();
    let inner = rest.strip_prefix('(')?.trim_end().strip_suffix(')')?.trim();

    let tokens = reassemble_tokens(inner);
    let mut node = DatNode::new(kind);
    let mut i = 0;
    while i + 1 < tokens.len() {
        node.set_attr(tokens[i].clone(), tokens[i + 1].clone());
        i += 2;
    }
    Some(node)
}

/// Split on whitespace, then rejoin tokens by quote parity: a token with an
/// odd number of `"` characters toggles the in-quoted-value state, and the
/// pieces of a quoted value are rejoined with single spaces. Only values are
/// ever quoted, never keys, so balanced tokens pass straight through.
fn reassemble_tokens(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut acc = String::new();
    let mut in_quote = false;

    for raw in input.split_whitespace() {
        let odd = raw.matches('"').count() % 2 == 1;
        if in_quote {
            acc.push(' ');
            acc.push_str(raw);
            if odd {
                tokens.push(std::mem::take(&mut acc).replace('"', ""));
                in_quote = false;
            }
        } else if odd {
            acc = raw.to_string();
            in_quote = true;
        } else {
            tokens.push(raw.replace('"', ""));
        }
    }

    // Unterminated quote: keep what accumulated
    if in_quote {
        tokens.push(acc.replace('"', ""));
    }

    tokens
}

/// Parse a leaf line like `name "Some Value"` or `version 20240101`.
fn parse_leaf(line: &str) -> Option<(String, String)> {
    let mut parts = line.splitn(2, |c: char| c.is_ascii_whitespace());
    let key = parts.next()?.to_string();
    let raw = parts.next()?.trim();
    if raw.is_empty() {
        return None;
    }
    Some((key, strip_quotes(raw).to_string()))
}

fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"clrmamepro (
	name "Nintendo - Nintendo Entertainment System"
	description "Nintendo - Nintendo Entertainment System"
	version 20141025-064058
)

game (
	name "10-Yard Fight (USA, Europe)"
	rom ( name "10-Yard Fight (USA, Europe).nes" size 40960 crc 3D564757 md5 BD2C15391B0641D43A35E83F5FCE073A )
)
"#;

    #[test]
    fn test_header_block_is_renamed() {
        let tree = convert_block_dialect(SAMPLE.as_bytes()).unwrap();
        assert_eq!(tree.name, "datafile");

        let header = tree.find_child("header").unwrap();
        assert_eq!(
            header.child_text("name"),
            Some("Nintendo - Nintendo Entertainment System")
        );
        assert_eq!(header.child_text("version"), Some("20141025-064058"));
        // Inside the header, `name` stays a plain leaf
        assert_eq!(header.attr("name"), None);
    }

    #[test]
    fn test_name_projection() {
        // name becomes an attribute plus a projected description leaf
        let input = "game (\n  name \"Foo\"\n  rom ( name \"a.bin\" size 10 crc ab12cd34 )\n)";
        let tree = convert_block_dialect(input.as_bytes()).unwrap();

        let game = tree.find_child("game").unwrap();
        assert_eq!(game.attr("name"), Some("Foo"));
        assert_eq!(game.child_text("description"), Some("Foo"));

        let rom = game.find_child("rom").unwrap();
        assert_eq!(rom.attr("name"), Some("a.bin"));
        assert_eq!(rom.attr("size"), Some("10"));
        assert_eq!(rom.attr("crc"), Some("ab12cd34"));
    }

    #[test]
    fn test_quoted_value_with_spaces_and_parens() {
        let tree = convert_block_dialect(SAMPLE.as_bytes()).unwrap();
        let game = tree.find_child("game").unwrap();
        assert_eq!(game.attr("name"), Some("10-Yard Fight (USA, Europe)"));

        let rom = game.find_child("rom").unwrap();
        assert_eq!(rom.attr("name"), Some("10-Yard Fight (USA, Europe).nes"));
        assert_eq!(rom.attr("size"), Some("40960"));
        assert_eq!(rom.attr("md5"), Some("BD2C15391B0641D43A35E83F5FCE073A"));
    }

    #[test]
    fn test_romvault_block_is_renamed() {
        let input = "romvault (\n  name \"Test\"\n)\n";
        let tree = convert_block_dialect(input.as_bytes()).unwrap();
        let header = tree.find_child("header").unwrap();
        assert_eq!(header.child_text("name"), Some("Test"));
    }

    #[test]
    fn test_disk_inline_record() {
        let input = "game (\n  name \"Area 51\"\n  disk ( name \"area51\" sha1 9ea749404c9a5d44f407cdb8803293ec0d61410d )\n)";
        let tree = convert_block_dialect(input.as_bytes()).unwrap();
        let disk = tree.find_child("game").unwrap().find_child("disk").unwrap();
        assert_eq!(disk.attr("name"), Some("area51"));
        assert_eq!(
            disk.attr("sha1"),
            Some("9ea749404c9a5d44f407cdb8803293ec0d61410d")
        );
    }

    #[test]
    fn test_unrecognized_lines_are_skipped() {
        let input = "game (\n  name \"Foo\"\n  ???\n  rom ( name \"a.bin\" size 1 )\n)\nnoise outside any block\n";
        let tree = convert_block_dialect(input.as_bytes()).unwrap();
        assert_eq!(tree.children.len(), 1);

        let game = tree.find_child("game").unwrap();
        // name projection + rom record; the `???` line contributed nothing
        assert_eq!(game.children.len(), 2);
    }

    #[test]
    fn test_romof_leaf_is_not_an_inline_record() {
        let input = "game (\n  name \"pacman\"\n  romof puckman\n)";
        let tree = convert_block_dialect(input.as_bytes()).unwrap();
        let game = tree.find_child("game").unwrap();
        assert_eq!(game.child_text("romof"), Some("puckman"));
    }

    #[test]
    fn test_unclosed_block_still_attaches() {
        let input = "game (\n  name \"Foo\"\n";
        let tree = convert_block_dialect(input.as_bytes()).unwrap();
        assert_eq!(tree.find_child("game").unwrap().attr("name"), Some("Foo"));
    }

    #[test]
    fn test_reassemble_tokens() {
        let tokens = reassemble_tokens(r#"name "Game (USA, Europe).sfc" size 524288 crc ABCD1234"#);
        assert_eq!(
            tokens,
            vec![
                "name",
                "Game (USA, Europe).sfc",
                "size",
                "524288",
                "crc",
                "ABCD1234",
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_bare_root() {
        let tree = convert_block_dialect("".as_bytes()).unwrap();
        assert_eq!(tree.name, "datafile");
        assert!(tree.children.is_empty());
    }
}
