use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_till1, take_until, take_while, take_while1},
    character::complete::{char, i64 as integer, multispace0, multispace1},
    combinator::{all_consuming, cut, map, recognize, value, verify},
    multi::{many0, many0_count, separated_list0},
    sequence::{delimited, pair, preceded, separated_pair, tuple},
    Finish, IResult,
};

use super::document::{Element, Node};
use crate::Error;

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_' || c == ':'),
        take_while(|c: char| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')),
    ))(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
    ))(input)
}

fn attribute(input: &str) -> IResult<&str, (String, String)> {
    map(
        separated_pair(
            preceded(multispace1, name),
            tuple((multispace0, char('='), multispace0)),
            quoted,
        ),
        |(key, value): (&str, &str)| (key.to_owned(), unescape(value)),
    )(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    delimited(tag("<!--"), take_until("-->"), tag("-->"))(input)
}

fn prolog(input: &str) -> IResult<&str, &str> {
    delimited(tag("<?"), take_until("?>"), tag("?>"))(input)
}

/// Whitespace, comments and processing instructions around the root element
fn misc(input: &str) -> IResult<&str, usize> {
    many0_count(alt((multispace1, comment, prolog)))(input)
}

fn content(input: &str) -> IResult<&str, Vec<Node>> {
    let (input, nodes) = many0(alt((
        map(element, |element| Some(Node::Element(element))),
        map(comment, |_| None),
        map(take_till1(|c: char| c == '<'), |text: &str| {
            (!text.trim().is_empty()).then(|| Node::Text(unescape(text)))
        }),
    )))(input)?;
    Ok((input, nodes.into_iter().flatten().collect()))
}

fn element(input: &str) -> IResult<&str, Element> {
    let (input, (tag_name, attributes)) = pair(preceded(char('<'), name), many0(attribute))(input)?;
    let (input, self_closing) = preceded(
        multispace0,
        alt((value(true, tag("/>")), value(false, char('>')))),
    )(input)?;
    if self_closing {
        return Ok((
            input,
            Element::from_parts(tag_name.to_owned(), attributes, Vec::new()),
        ));
    }
    let (input, children) = content(input)?;
    let (input, _) = cut(verify(
        delimited(tag("</"), name, pair(multispace0, char('>'))),
        |closing: &str| closing == tag_name,
    ))(input)?;
    Ok((
        input,
        Element::from_parts(tag_name.to_owned(), attributes, children),
    ))
}

/// Parses a document holding a single root element
pub(crate) fn parse_document(input: &str) -> Result<Element, Error> {
    all_consuming(delimited(misc, element, misc))(input)
        .finish()
        .map(|(_, root)| root)
        .map_err(|e| {
            Error::Parse(format!(
                "{:?} at offset {}",
                e.code,
                input.len() - e.input.len()
            ))
        })
}

fn integer_list(input: &str) -> IResult<&str, Vec<i64>> {
    all_consuming(delimited(
        multispace0,
        separated_list0(multispace1, integer),
        multispace0,
    ))(input)
}

/// Parses whitespace separated integers, `None` if anything else is present
pub(crate) fn parse_integers(input: &str) -> Option<Vec<i64>> {
    integer_list(input).finish().ok().map(|(_, values)| values)
}
