// Minimal pipeline template engine for the row templates built in `template.rs`.
//
// Syntax: text outside `{{ }}` is copied as-is; an action is a pipeline of
// commands separated by `|`, each later command receiving the previous value
// as its last argument, e.g. `{{ repeat 10 " " | print .Context | trunc 10 | bold }}`.

use crate::prompt::template::{FuncMap, TemplateFunc};
use crate::store::Metadata;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed action starting at byte {0}")]
    UnclosedAction(usize),
    #[error("empty command in pipeline")]
    EmptyCommand,
    #[error("unterminated quoted string")]
    UnterminatedString,
    #[error("function {0:?} not defined")]
    UnknownFunction(String),
    #[error("can't evaluate field {0}")]
    UnknownField(String),
    #[error("wrong arguments for {name}: {reason}")]
    BadArguments { name: String, reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Int(i64),
    Str(String),
    Field(String),
    Ident(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Value {
    Int(i64),
    Str(String),
}

impl Value {
    fn into_string(self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Str(s) => s,
        }
    }
}

/// Renders `template` for one record using the helpers in `funcs`.
pub fn execute(template: &str, item: &Metadata, funcs: &FuncMap) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0usize;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let body_start = start + 2;
        let end = find_action_end(&rest[body_start..])?
            .ok_or(TemplateError::UnclosedAction(offset + start))?;
        let action = &rest[body_start..body_start + end];
        out.push_str(&eval_pipeline(action, item, funcs)?.into_string());
        let consumed = body_start + end + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    Ok(out)
}

// byte offset of the first `}}` outside of quoted strings
fn find_action_end(body: &str) -> Result<Option<usize>, TemplateError> {
    let mut in_str = false;
    let mut escaped = false;
    let mut prev_brace = false;
    for (i, ch) in body.char_indices() {
        if in_str {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_str = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_str = true,
            '}' if prev_brace => return Ok(Some(i - 1)),
            _ => {}
        }
        prev_brace = ch == '}';
    }
    if in_str {
        return Err(TemplateError::UnterminatedString);
    }
    Ok(None)
}

fn eval_pipeline(action: &str, item: &Metadata, funcs: &FuncMap) -> Result<Value, TemplateError> {
    let mut piped: Option<Value> = None;
    for command in split_commands(action)? {
        let tokens = tokenize(command)?;
        piped = Some(eval_command(tokens, piped, item, funcs)?);
    }
    piped.ok_or(TemplateError::EmptyCommand)
}

// split on `|` outside of quoted strings
fn split_commands(action: &str) -> Result<Vec<&str>, TemplateError> {
    let mut commands = Vec::new();
    let mut in_str = false;
    let mut escaped = false;
    let mut start = 0usize;
    for (i, ch) in action.char_indices() {
        if in_str {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_str = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_str = true,
            '|' => {
                commands.push(&action[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if in_str {
        return Err(TemplateError::UnterminatedString);
    }
    commands.push(&action[start..]);
    Ok(commands)
}

fn tokenize(command: &str) -> Result<Vec<Token>, TemplateError> {
    let mut tokens = Vec::new();
    let mut chars = command.chars().peekable();
    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        if ch == '"' {
            chars.next();
            let mut s = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some('n') => s.push('\n'),
                        Some('t') => s.push('\t'),
                        Some(other) => s.push(other),
                        None => break,
                    },
                    _ => s.push(c),
                }
            }
            if !closed {
                return Err(TemplateError::UnterminatedString);
            }
            tokens.push(Token::Str(s));
            continue;
        }
        let mut word = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '"' {
                break;
            }
            word.push(c);
            chars.next();
        }
        tokens.push(classify(word));
    }
    Ok(tokens)
}

fn classify(word: String) -> Token {
    if let Some(field) = word.strip_prefix('.') {
        return Token::Field(field.to_string());
    }
    match word.parse::<i64>() {
        Ok(n) => Token::Int(n),
        Err(_) => Token::Ident(word),
    }
}

fn eval_command(
    tokens: Vec<Token>,
    piped: Option<Value>,
    item: &Metadata,
    funcs: &FuncMap,
) -> Result<Value, TemplateError> {
    let mut iter = tokens.into_iter();
    let head = iter.next().ok_or(TemplateError::EmptyCommand)?;
    let name = match head {
        Token::Ident(name) => name,
        operand => {
            // a bare operand only makes sense as the first command of a pipeline
            if piped.is_some() || iter.len() > 0 {
                return Err(TemplateError::BadArguments {
                    name: "operand".to_string(),
                    reason: "operand cannot take arguments".to_string(),
                });
            }
            return operand_value(operand, item);
        }
    };

    let mut args = iter
        .map(|t| operand_value(t, item))
        .collect::<Result<Vec<Value>, TemplateError>>()?;
    args.extend(piped);

    if name == "print" {
        return Ok(Value::Str(print(args)));
    }
    let func = funcs
        .get(name.as_str())
        .ok_or_else(|| TemplateError::UnknownFunction(name.clone()))?;
    call(&name, *func, args)
}

fn operand_value(token: Token, item: &Metadata) -> Result<Value, TemplateError> {
    match token {
        Token::Int(n) => Ok(Value::Int(n)),
        Token::Str(s) => Ok(Value::Str(s)),
        Token::Field(f) => field(&f, item).map(|s| Value::Str(s.to_string())),
        Token::Ident(name) => Err(TemplateError::BadArguments {
            name,
            reason: "functions cannot be used as arguments".to_string(),
        }),
    }
}

fn field<'a>(name: &str, item: &'a Metadata) -> Result<&'a str, TemplateError> {
    match name {
        "Context" => Ok(&item.context),
        "Cluster" => Ok(&item.cluster),
        "File" => Ok(&item.file),
        _ => Err(TemplateError::UnknownField(format!(".{name}"))),
    }
}

// operands are joined directly, with a space only between two non-strings
fn print(args: Vec<Value>) -> String {
    let mut out = String::new();
    let mut prev_was_str = true;
    for (i, arg) in args.into_iter().enumerate() {
        let is_str = matches!(arg, Value::Str(_));
        if i > 0 && !is_str && !prev_was_str {
            out.push(' ');
        }
        out.push_str(&arg.into_string());
        prev_was_str = is_str;
    }
    out
}

fn call(name: &str, func: TemplateFunc, args: Vec<Value>) -> Result<Value, TemplateError> {
    let bad = |reason: &str| TemplateError::BadArguments {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    match func {
        TemplateFunc::Counted(f) => match args.as_slice() {
            [Value::Int(n), Value::Str(s)] => Ok(Value::Str(f(*n, s.as_str()))),
            [_, _] => Err(bad("want (int, string)")),
            _ => Err(bad(&format!("want 2 arguments, got {}", args.len()))),
        },
        TemplateFunc::Styled(f) => match args.as_slice() {
            [Value::Str(s)] => Ok(Value::Str(f(s.as_str()))),
            [Value::Int(n)] => Ok(Value::Str(f(&n.to_string()))),
            _ => Err(bad(&format!("want 1 argument, got {}", args.len()))),
        },
    }
}
