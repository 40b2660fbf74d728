//! Command-bar classification.
//!
//! The bar always starts with `:` or `/`. Parsing is pure; the dispatcher
//! performs the side effects.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Write,
    Quit,
    WriteQuit,
    /// Literal text after a leading `/`.
    Search(String),
    Unknown(String),
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        if let Some(pattern) = raw.strip_prefix('/') {
            if pattern.is_empty() {
                return ParsedCommand::Unknown(raw.to_string());
            }
            return ParsedCommand::Search(pattern.to_string());
        }
        let Some(body) = raw.strip_prefix(':') else {
            return ParsedCommand::Unknown(raw.to_string());
        };
        match body.trim() {
            "w" => ParsedCommand::Write,
            "q" => ParsedCommand::Quit,
            "wq" => ParsedCommand::WriteQuit,
            other => ParsedCommand::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_write_quit_variants() {
        assert_eq!(CommandParser::parse(":w"), ParsedCommand::Write);
        assert_eq!(CommandParser::parse(":q"), ParsedCommand::Quit);
        assert_eq!(CommandParser::parse(":wq"), ParsedCommand::WriteQuit);
        assert_eq!(CommandParser::parse(": wq "), ParsedCommand::WriteQuit);
    }

    #[test]
    fn parse_search_keeps_text_verbatim() {
        assert_eq!(
            CommandParser::parse("/a.b "),
            ParsedCommand::Search("a.b ".into())
        );
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(CommandParser::parse(":e foo"), ParsedCommand::Unknown("e foo".into()));
        assert_eq!(CommandParser::parse("/"), ParsedCommand::Unknown("/".into()));
        assert_eq!(CommandParser::parse(":"), ParsedCommand::Unknown(String::new()));
    }
}
