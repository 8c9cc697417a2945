//! Line-oriented `.tws` parser built from nom combinators.
//!
//! Each non-empty line is one statement: a declaration opener, a closing
//! brace, an `include` arm, or a member. Statements never span lines.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, satisfy, space0, space1},
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
};
use tagwire_core::{
    DataFormat, KnownSubtype, MemberDescriptor, PrimitiveKind, TypeDescriptor, TypeExpr,
    TypeShape,
};

use crate::{
    error::SchemaParseError,
    lex::{is_ident_continue, is_ident_start, strip_line_comment},
};

/// Parse schema text into type descriptors, in declaration order.
///
/// Only syntax is checked here; duplicate names, tag conflicts and
/// unresolved types are reported when the descriptors are compiled.
pub fn parse_schema(text: &str) -> Result<Vec<TypeDescriptor>, SchemaParseError> {
    let mut types = Vec::new();
    let mut current: Option<(usize, TypeDescriptor)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_line_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Ok((_, decl)) = all_consuming(type_open)(line) {
            if let Some((open_line, outer)) = &current {
                return Err(SchemaParseError::new(
                    line_no,
                    format!(
                        "nested declaration inside '{}' (opened at line {open_line})",
                        outer.name
                    ),
                ));
            }
            let descriptor = decl.descriptor();
            if decl.closed {
                types.push(descriptor);
            } else {
                current = Some((line_no, descriptor));
            }
            continue;
        }
        if starts_with_keyword(line, &["abstract", "message", "struct"]) {
            return Err(SchemaParseError::new(
                line_no,
                format!("invalid type declaration: {line}"),
            ));
        }

        if matches!(line, "}" | "};") {
            match current.take() {
                Some((_, descriptor)) => types.push(descriptor),
                None => return Err(SchemaParseError::new(line_no, "unmatched closing brace")),
            }
            continue;
        }

        let Some((_, descriptor)) = current.as_mut() else {
            return Err(SchemaParseError::new(
                line_no,
                format!("unexpected top-level statement: {line}"),
            ));
        };

        if starts_with_keyword(line, &["include"]) {
            let (_, (tag, name)) = all_consuming(include_decl)(line).map_err(|_| {
                SchemaParseError::new(line_no, format!("invalid include: {line}"))
            })?;
            descriptor.subtypes.push(KnownSubtype::new(tag, name));
            continue;
        }

        let member = parse_member(line).map_err(|detail| SchemaParseError::new(line_no, detail))?;
        descriptor.members.push(member);
    }

    if let Some((open_line, descriptor)) = current {
        return Err(SchemaParseError::new(
            open_line,
            format!("unclosed declaration '{}'", descriptor.name),
        ));
    }
    Ok(types)
}

fn starts_with_keyword(line: &str, keywords: &[&str]) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|first| keywords.contains(&first))
}

struct TypeOpen<'a> {
    name: &'a str,
    shape: TypeShape,
    is_abstract: bool,
    /// `message Name {}` on a single line.
    closed: bool,
}

impl TypeOpen<'_> {
    fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor {
            shape: self.shape,
            is_abstract: self.is_abstract,
            ..TypeDescriptor::message(self.name)
        }
    }
}

/// `[abstract] message|struct Name {` with an optional `}` on the same line.
fn type_open(input: &str) -> IResult<&str, TypeOpen<'_>> {
    map(
        tuple((
            opt(terminated(tag("abstract"), space1)),
            alt((
                value(TypeShape::Reference, tag("message")),
                value(TypeShape::Value, tag("struct")),
            )),
            space1,
            identifier,
            space0,
            char('{'),
            space0,
            opt(pair(char('}'), opt(preceded(space0, char(';'))))),
        )),
        |(is_abstract, shape, _, name, _, _, _, closed)| TypeOpen {
            name,
            shape,
            is_abstract: is_abstract.is_some(),
            closed: closed.is_some(),
        },
    )(input)
}

/// `include <tag> <Type>;`
fn include_decl(input: &str) -> IResult<&str, (u32, &str)> {
    map(
        tuple((
            tag("include"),
            space1,
            field_tag,
            space1,
            identifier,
            space0,
            char(';'),
        )),
        |(_, _, tag, _, name, _, _)| (tag, name),
    )(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_ident_start), take_while(is_ident_continue)))(input)
}

fn field_tag(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>())(input)
}

/// A type followed by any number of `[]` suffixes.
fn type_expr(input: &str) -> IResult<&str, TypeExpr> {
    map(
        pair(
            base_type,
            many0(tuple((space0, char('['), space0, char(']')))),
        ),
        |(ty, dims)| dims.into_iter().fold(ty, |ty, _| TypeExpr::array(ty)),
    )(input)
}

fn base_type(input: &str) -> IResult<&str, TypeExpr> {
    alt((
        container("list", TypeExpr::list),
        container("set", TypeExpr::set),
        map(identifier, |name| match PrimitiveKind::from_type_name(name) {
            Some(kind) => TypeExpr::Primitive(kind),
            None => TypeExpr::named(name),
        }),
    ))(input)
}

fn container<'a>(
    keyword: &'static str,
    wrap: fn(TypeExpr) -> TypeExpr,
) -> impl FnMut(&'a str) -> IResult<&'a str, TypeExpr> {
    map(
        delimited(
            tuple((tag(keyword), space0, char('<'), space0)),
            type_expr,
            pair(space0, char('>')),
        ),
        wrap,
    )
}

type Attr<'a> = (&'a str, Option<&'a str>);

struct MemberDecl<'a> {
    skip: bool,
    tag: Option<u32>,
    ty: TypeExpr,
    name: &'a str,
    attrs: Vec<Attr<'a>>,
}

/// `[skip] [<tag>:] <type> <name> [attrs];`
fn member_decl(input: &str) -> IResult<&str, MemberDecl<'_>> {
    map(
        tuple((
            opt(terminated(tag("skip"), space1)),
            opt(terminated(field_tag, tuple((space0, char(':'), space0)))),
            type_expr,
            space1,
            identifier,
            space0,
            opt(terminated(attrs, space0)),
            char(';'),
        )),
        |(skip, tag, ty, _, name, _, attrs, _)| MemberDecl {
            skip: skip.is_some(),
            tag,
            ty,
            name,
            attrs: attrs.unwrap_or_default(),
        },
    )(input)
}

/// `[key, key=value, ...]`
fn attrs(input: &str) -> IResult<&str, Vec<Attr<'_>>> {
    delimited(
        pair(char('['), space0),
        separated_list1(
            tuple((space0, char(','), space0)),
            pair(
                identifier,
                opt(preceded(tuple((space0, char('='), space0)), identifier)),
            ),
        ),
        pair(space0, char(']')),
    )(input)
}

fn parse_member(line: &str) -> Result<MemberDescriptor, String> {
    let (_, decl) = all_consuming(member_decl)(line)
        .map_err(|_| format!("invalid member declaration: {line}"))?;

    let mut member = MemberDescriptor::new(decl.name, decl.ty);
    member.tag = decl.tag;
    member.skip = decl.skip;

    let mut format: Option<DataFormat> = None;
    for (key, arg) in decl.attrs {
        match (key, arg) {
            ("zigzag" | "fixed", None) => {
                let requested = if key == "zigzag" {
                    DataFormat::ZigZag
                } else {
                    DataFormat::Fixed
                };
                if let Some(previous) = format.replace(requested) {
                    return Err(format!(
                        "conflicting data formats '{}' and '{key}' on '{}'",
                        previous.name(),
                        decl.name
                    ));
                }
            }
            ("get", Some(accessor)) => {
                if member.getter.replace(accessor.to_string()).is_some() {
                    return Err(format!("duplicate getter on '{}'", decl.name));
                }
            }
            ("set", Some(accessor)) => {
                if member.setter.replace(accessor.to_string()).is_some() {
                    return Err(format!("duplicate setter on '{}'", decl.name));
                }
            }
            ("zigzag" | "fixed", Some(_)) => {
                return Err(format!("attribute '{key}' takes no value"));
            }
            ("get" | "set", None) => {
                return Err(format!("attribute '{key}' requires an accessor name"));
            }
            (other, _) => return Err(format!("unknown attribute '{other}'")),
        }
    }
    member.format = format.unwrap_or_default();
    Ok(member)
}
