//! Zone file text parser
//!
//! Reads the RFC 1035 §5 master file format into `hickory-proto` records,
//! keeping records in file order. Supported syntax:
//! - `$ORIGIN` and `$TTL` directives (`$INCLUDE` is rejected)
//! - `;` comments, blank lines
//! - owner inheritance when a line starts with whitespace, `@` for the origin
//! - relative owner names, completed with the current origin
//! - optional TTL and class, in either order
//! - parentheses spanning several lines, quoted character strings
//!
//! Rdata is handed to hickory's `RDataParser`, so every type hickory can read
//! from text is accepted.

use dnsd_domain::DomainError;
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use hickory_proto::serialize::txt::{Parser, RDataParser};
use std::str::FromStr;

/// TTL applied when neither `$TTL` nor an earlier record states one.
const DEFAULT_TTL: u32 = 3600;

/// One logical entry: a directive or a record, possibly spanning lines.
#[derive(Debug, PartialEq)]
struct Entry {
    line: usize,
    inherits_owner: bool,
    tokens: Vec<String>,
}

/// Parse zone file text into records, in file order.
///
/// `source_id` names the source in error messages.
pub fn parse_zone(text: &str, source_id: &str) -> Result<Vec<Record>, DomainError> {
    let entries = tokenize(text).map_err(|(line, reason)| parse_error(source_id, line, reason))?;

    let mut state = ParserState::default();
    let mut records = Vec::with_capacity(entries.len());

    for entry in entries {
        let line = entry.line;
        if let Some(record) = state
            .apply(entry)
            .map_err(|reason| parse_error(source_id, line, reason))?
        {
            records.push(record);
        }
    }

    Ok(records)
}

fn parse_error(source_id: &str, line: usize, reason: String) -> DomainError {
    DomainError::ZoneParse {
        source_id: source_id.to_string(),
        line,
        reason,
    }
}

#[derive(Default)]
struct ParserState {
    origin: Option<Name>,
    default_ttl: Option<u32>,
    last_owner: Option<Name>,
    last_ttl: Option<u32>,
    last_class: Option<DNSClass>,
}

impl ParserState {
    fn apply(&mut self, entry: Entry) -> Result<Option<Record>, String> {
        let Entry {
            inherits_owner,
            tokens,
            ..
        } = entry;

        match tokens.first() {
            Some(first) if !inherits_owner && first.starts_with('$') => {
                self.apply_directive(&tokens)?;
                Ok(None)
            }
            Some(_) => self.parse_record(inherits_owner, &tokens).map(Some),
            None => Ok(None),
        }
    }

    fn apply_directive(&mut self, tokens: &[String]) -> Result<(), String> {
        let directive = tokens[0].to_ascii_uppercase();
        match directive.as_str() {
            "$ORIGIN" => {
                let value = tokens
                    .get(1)
                    .ok_or_else(|| "$ORIGIN requires a domain name".to_string())?;
                let origin = self.parse_name(value)?;
                self.origin = Some(origin);
                Ok(())
            }
            "$TTL" => {
                let value = tokens
                    .get(1)
                    .ok_or_else(|| "$TTL requires a value".to_string())?;
                let ttl = parse_ttl(value).ok_or_else(|| format!("invalid $TTL '{}'", value))?;
                self.default_ttl = Some(ttl);
                Ok(())
            }
            "$INCLUDE" => Err("$INCLUDE is not supported".to_string()),
            other => Err(format!("unknown directive {}", other)),
        }
    }

    fn parse_record(&mut self, inherits_owner: bool, tokens: &[String]) -> Result<Record, String> {
        let mut rest = tokens;

        let owner = if inherits_owner {
            self.last_owner
                .clone()
                .ok_or_else(|| "record has no owner and no previous owner".to_string())?
        } else {
            let owner = self.parse_name(&rest[0])?;
            rest = &rest[1..];
            owner
        };

        let mut ttl = None;
        let mut class = None;
        while let Some(token) = rest.first() {
            if ttl.is_none() {
                if let Some(value) = parse_ttl(token) {
                    ttl = Some(value);
                    rest = &rest[1..];
                    continue;
                }
            }
            if class.is_none() {
                if let Some(value) = parse_class(token) {
                    class = Some(value);
                    rest = &rest[1..];
                    continue;
                }
            }
            break;
        }

        let type_token = rest
            .first()
            .ok_or_else(|| format!("missing record type for {}", owner))?;
        let record_type = RecordType::from_str(&type_token.to_ascii_uppercase())
            .map_err(|e| format!("unknown record type '{}': {}", type_token, e))?;
        let rdata_tokens = &rest[1..];

        let rdata = <RData as RDataParser>::parse(
            record_type,
            rdata_tokens.iter().map(String::as_str),
            self.origin.as_ref(),
        )
        .map_err(|e| format!("invalid {} rdata for {}: {}", record_type, owner, e))?;

        let ttl = match ttl {
            Some(explicit) => {
                self.last_ttl = Some(explicit);
                explicit
            }
            None => self.default_ttl.or(self.last_ttl).unwrap_or(DEFAULT_TTL),
        };

        let class = class.or(self.last_class).unwrap_or(DNSClass::IN);
        self.last_class = Some(class);
        self.last_owner = Some(owner.clone());

        let mut record = Record::from_rdata(owner, ttl, rdata);
        record.set_dns_class(class);
        Ok(record)
    }

    /// Owner and `$ORIGIN` names: `@` is the origin, relative names are
    /// completed with it, and the result must be fully qualified.
    fn parse_name(&self, token: &str) -> Result<Name, String> {
        if token == "@" {
            return self
                .origin
                .clone()
                .ok_or_else(|| "'@' used before $ORIGIN".to_string());
        }

        let name = Name::parse(token, self.origin.as_ref())
            .map_err(|e| format!("invalid domain name '{}': {}", token, e))?;

        if !name.is_fqdn() {
            return Err(format!("relative name '{}' without $ORIGIN", token));
        }

        Ok(name)
    }
}

fn parse_class(token: &str) -> Option<DNSClass> {
    match token.to_ascii_uppercase().as_str() {
        "IN" => Some(DNSClass::IN),
        "CH" => Some(DNSClass::CH),
        "HS" => Some(DNSClass::HS),
        "NONE" => Some(DNSClass::NONE),
        "ANY" => Some(DNSClass::ANY),
        _ => None,
    }
}

/// Plain seconds, or BIND-style unit groups such as `1h30m` or `2W`.
/// Tokens not starting with a digit are never a TTL, so class and type
/// mnemonics fall through.
pub(crate) fn parse_ttl(token: &str) -> Option<u32> {
    if !token.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Parser::parse_time(token).ok()
}

/// Split zone text into logical entries, resolving comments, quotes and
/// parentheses. Errors carry the line number they were found on.
fn tokenize(text: &str) -> Result<Vec<Entry>, (usize, String)> {
    let mut entries = Vec::new();
    let mut tokens: Vec<String> = Vec::new();
    let mut token = String::new();
    let mut token_open = false;

    let mut line = 1;
    let mut entry_line = 1;
    let mut at_line_start = true;
    let mut inherits_owner = false;
    let mut paren_depth = 0usize;
    let mut quote_line = 0;
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => in_quotes = false,
                '\\' => match chars.next() {
                    Some(escaped) => token.push(escaped),
                    None => return Err((line, "dangling escape".to_string())),
                },
                '\n' => {
                    line += 1;
                    token.push(c);
                }
                _ => token.push(c),
            }
            continue;
        }

        let line_start = at_line_start;
        at_line_start = false;

        match c {
            '\n' => {
                flush_token(&mut tokens, &mut token, &mut token_open);
                if paren_depth == 0 {
                    if !tokens.is_empty() {
                        entries.push(Entry {
                            line: entry_line,
                            inherits_owner,
                            tokens: std::mem::take(&mut tokens),
                        });
                    }
                    inherits_owner = false;
                    at_line_start = true;
                }
                line += 1;
            }
            ' ' | '\t' | '\r' => {
                if line_start && tokens.is_empty() && paren_depth == 0 && c != '\r' {
                    inherits_owner = true;
                }
                flush_token(&mut tokens, &mut token, &mut token_open);
            }
            ';' => {
                flush_token(&mut tokens, &mut token, &mut token_open);
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '(' => {
                flush_token(&mut tokens, &mut token, &mut token_open);
                paren_depth += 1;
            }
            ')' => {
                flush_token(&mut tokens, &mut token, &mut token_open);
                if paren_depth == 0 {
                    return Err((line, "unbalanced ')'".to_string()));
                }
                paren_depth -= 1;
            }
            '"' => {
                if tokens.is_empty() && !token_open {
                    entry_line = line;
                }
                in_quotes = true;
                quote_line = line;
                token_open = true;
            }
            '\\' => {
                if tokens.is_empty() && !token_open {
                    entry_line = line;
                }
                token.push(c);
                if let Some(escaped) = chars.next() {
                    token.push(escaped);
                }
                token_open = true;
            }
            _ => {
                if tokens.is_empty() && !token_open {
                    entry_line = line;
                }
                token.push(c);
                token_open = true;
            }
        }
    }

    if in_quotes {
        return Err((quote_line, "unterminated quoted string".to_string()));
    }
    if paren_depth != 0 {
        return Err((line, "unbalanced '('".to_string()));
    }

    flush_token(&mut tokens, &mut token, &mut token_open);
    if !tokens.is_empty() {
        entries.push(Entry {
            line: entry_line,
            inherits_owner,
            tokens,
        });
    }

    Ok(entries)
}

fn flush_token(tokens: &mut Vec<String>, token: &mut String, token_open: &mut bool) {
    if *token_open {
        tokens.push(std::mem::take(token));
        *token_open = false;
    }
}
