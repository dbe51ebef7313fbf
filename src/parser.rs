use winnow::ascii::Caseless;
use winnow::combinator::{alt, eof, opt, preceded, trace};
use winnow::error::StrContext;
use winnow::token::{literal, rest, take_while};
use winnow::{ModalResult, Parser};

use crate::tokens::FooterSeparator;

/// `type`, optional `(scope, closed)`, bang, optional description
pub(crate) type SummaryDetails<'a> = (&'a str, Option<(&'a str, bool)>, bool, Option<&'a str>);

/// Footer key, then the separator and description when present
pub(crate) type FooterDetails<'a> = (FooterKey<'a>, Option<(FooterSeparator, &'a str)>);

/// Which alternative of the footer grammar matched the key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FooterKey<'a> {
    /// `[\w-]+`
    Token(&'a str),
    /// `\w+ ?\w*` or `!`, tolerated for misspelled breaking changes
    Phrase(&'a str),
}

impl<'a> FooterKey<'a> {
    pub(crate) fn as_str(self) -> &'a str {
        match self {
            FooterKey::Token(s) | FooterKey::Phrase(s) => s,
        }
    }
}

pub(crate) const BREAKING_PHRASE: &str = "BREAKING CHANGE";
pub(crate) const BREAKING_ARROW: &str = "BREAKING-CHANGE";

// <word>            ::= "A".."Z" | "a".."z" | "0".."9" | "_"
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// <token-char>      ::= <word> | "-"
fn is_token_char(c: char) -> bool {
    is_word_char(c) || c == '-'
}

// <scope-char>      ::= <word> | "-" | "."
fn is_scope_char(c: char) -> bool {
    is_token_char(c) || c == '.'
}

fn end_of_line<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    eof.parse_next(i)
}

// <summary>         ::= <type>, ["(", <scope>, [")"]], ["!"], [<description>]
pub(crate) fn summary<'i>(i: &mut &'i str) -> ModalResult<SummaryDetails<'i>> {
    let type_ = trace("type", type_).parse_next(i)?;
    let scope = opt(trace("scope", scope_block)).parse_next(i)?;
    let breaking = trace("breaking", exclamation_mark).parse_next(i)?;
    let description = opt(trace("description", description)).parse_next(i)?;
    if description.is_none() {
        trace("eol", end_of_line).parse_next(i)?;
    }

    Ok((type_, scope, breaking, description))
}

// <type>            ::= <word>+
pub(crate) fn type_<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_word_char)
        .context(StrContext::Label(TYPE))
        .parse_next(i)
}

pub(crate) const TYPE: &str = "type";

// <scope-block>     ::= "(", <scope>, [")"]
fn scope_block<'i>(i: &mut &'i str) -> ModalResult<(&'i str, bool)> {
    preceded('(', (scope, opt(')').map(|p| p.is_some())))
        .context(StrContext::Label(SCOPE))
        .parse_next(i)
}

// <scope>           ::= ["$"], <scope-char>*
pub(crate) fn scope<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    (opt('$'), take_while(0.., is_scope_char))
        .take()
        .parse_next(i)
}

pub(crate) const SCOPE: &str = "scope";

// <scope-token>     ::= ["$"], <scope-char>+
pub(crate) fn scope_token<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    (opt('$'), take_while(1.., is_scope_char), end_of_line)
        .take()
        .parse_next(i)
}

fn exclamation_mark(i: &mut &str) -> ModalResult<bool> {
    opt('!').map(|b| b.is_some()).parse_next(i)
}

// /* A lone ":" is the separator being typed */
// <description>     ::= ":", " ", <text>
//                    |  ":", <eol>
fn description<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    preceded(':', alt((preceded(' ', rest), end_of_line)))
        .context(StrContext::Label(DESCRIPTION))
        .parse_next(i)
}

pub(crate) const DESCRIPTION: &str = "description";

// <footer>          ::= <token>, [<separator>, <text>]
//                    |  <breaking-phrase>, [<separator>, <text>]
pub(crate) fn footer<'i>(i: &mut &'i str) -> ModalResult<FooterDetails<'i>> {
    alt((
        (token.map(FooterKey::Token), footer_tail),
        (breaking_phrase.map(FooterKey::Phrase), footer_tail),
    ))
    .parse_next(i)
}

fn footer_tail<'i>(i: &mut &'i str) -> ModalResult<Option<(FooterSeparator, &'i str)>> {
    alt(((separator, rest).map(Some), end_of_line.value(None))).parse_next(i)
}

// <token>           ::= <token-char>+
pub(crate) fn token<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_token_char)
        .context(StrContext::Label(TOKEN))
        .parse_next(i)
}

pub(crate) const TOKEN: &str = "token";

// <breaking-phrase> ::= <word>+, [" "], <word>*
//                    |  "!"
fn breaking_phrase<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    alt((
        (
            take_while(1.., is_word_char),
            opt(' '),
            take_while(0.., is_word_char),
        )
            .take(),
        "!",
    ))
    .parse_next(i)
}

// <separator>       ::= ": " | " #"
fn separator(i: &mut &str) -> ModalResult<FooterSeparator> {
    alt((
        ": ".value(FooterSeparator::ColonSpace),
        " #".value(FooterSeparator::SpacePound),
    ))
    .parse_next(i)
}

// <footer-line>     ::= ("BREAKING CHANGE" | "!"), ": ", <text>
//                    |  <token>, <separator>, <text>
fn footer_line(i: &mut &str) -> ModalResult<()> {
    alt((
        (alt((literal(Caseless(BREAKING_PHRASE)), "!")), ": ", rest).void(),
        (token, separator, rest).void(),
    ))
    .parse_next(i)
}

/// Whether the whole line is unmistakably a footer.
pub(crate) fn is_footer_line(line: &str) -> bool {
    let mut i = line;
    footer_line(&mut i).is_ok()
}

fn separator_chars<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    (':', take_while(0.., |c: char| c == ':' || c == ' '))
        .take()
        .parse_next(i)
}

/// Length of the `:[: ]*` run at the start of `i`.
pub(crate) fn separator_run(i: &str) -> Option<usize> {
    let mut input = i;
    separator_chars(&mut input).ok().map(str::len)
}
