//! Token classification of a single line prefix.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::parser::{self, FooterKey, BREAKING_ARROW, BREAKING_PHRASE};
use crate::{Error, ErrorKind};

/// How far a line prefix was parsed into grammar elements.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The input text is empty.
    #[default]
    Empty,

    /// The input text does not conform to the grammar.
    Error,

    /// A summary scope was opened but not closed yet.
    Partial,

    /// The type (or footer token) is the last element parsed.
    Type,

    /// A closed summary scope is the last element parsed.
    Scope,

    /// The separator was reached; everything after it is the description.
    Description,
}

/// The tokens of one line prefix, as recognized by [`parse_summary`] or
/// [`parse_footer`].
///
/// All string fields borrow from the parsed text. When the stage is
/// [`Stage::Empty`] or [`Stage::Error`] they are all empty.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tokens<'a> {
    ty: &'a str,
    scope: &'a str,
    description: &'a str,
    separator: Option<FooterSeparator>,
    breaking: bool,
    stage: Stage,
}

impl<'a> Tokens<'a> {
    fn error() -> Self {
        Self {
            stage: Stage::Error,
            ..Self::default()
        }
    }

    /// The type of a summary, or the token of a footer.
    pub fn type_(&self) -> &'a str {
        self.ty
    }

    /// The summary type, compared case-insensitively.
    pub fn summary_type(&self) -> Type<'a> {
        Type::new_unchecked(self.ty)
    }

    /// The footer token, compared case-insensitively.
    pub fn footer_token(&self) -> FooterToken<'a> {
        FooterToken::new_unchecked(self.ty)
    }

    /// The scope of a summary, including a leading `$` when present.
    pub fn scope(&self) -> &'a str {
        self.scope
    }

    /// Everything after the separator.
    pub fn description(&self) -> &'a str {
        self.description
    }

    /// The separator between a footer token and its description, if typed.
    pub fn separator(&self) -> Option<FooterSeparator> {
        self.separator
    }

    /// A flag to signal that the line announces a breaking change.
    ///
    /// For a summary this is the `!` after the type and scope:
    /// ```text
    /// feat(scope)!: this is a breaking change
    /// ```
    ///
    /// For a footer it is the `BREAKING CHANGE` token, or one of its
    /// tolerated spellings:
    /// ```text
    /// BREAKING CHANGE: this is a breaking change
    /// ```
    pub fn breaking(&self) -> bool {
        self.breaking
    }

    /// How far the text was parsed.
    pub fn stage(&self) -> Stage {
        self.stage
    }
}

/// Tokenize the leading text of a summary line.
///
/// ```rust
/// use commit_frame::{parse_summary, Stage};
///
/// let tokens = parse_summary("feat(api");
/// assert_eq!(tokens.stage(), Stage::Partial);
/// assert_eq!(tokens.scope(), "api");
///
/// let tokens = parse_summary("feat(api)!: drop v1");
/// assert_eq!(tokens.stage(), Stage::Description);
/// assert!(tokens.breaking());
/// assert_eq!(tokens.description(), "drop v1");
/// ```
pub fn parse_summary(text: &str) -> Tokens<'_> {
    if text.is_empty() {
        return Tokens::default();
    }

    let mut i = text;
    let Ok((ty, scope, breaking, description)) = parser::summary(&mut i) else {
        return Tokens::error();
    };
    debug_assert!(i.is_empty(), "{i:?} remaining");

    let stage = match (scope, description) {
        (_, Some(_)) => Stage::Description,
        (Some((_, false)), None) => Stage::Partial,
        (Some((_, true)), None) => Stage::Scope,
        (None, None) => Stage::Type,
    };

    Tokens {
        ty,
        scope: scope.map_or("", |(s, _)| s),
        description: description.unwrap_or(""),
        separator: None,
        breaking,
        stage,
    }
}

/// Tokenize the leading text of a footer line.
///
/// `BREAKING CHANGE` only accepts the `": "` separator, whichever spelling
/// is used:
///
/// ```rust
/// use commit_frame::{parse_footer, Stage};
///
/// let tokens = parse_footer("Closes #42");
/// assert_eq!(tokens.stage(), Stage::Description);
/// assert_eq!(tokens.type_(), "Closes");
/// assert_eq!(tokens.description(), "42");
///
/// assert_eq!(parse_footer("BREAKING CHANGE #5").stage(), Stage::Error);
/// ```
pub fn parse_footer(text: &str) -> Tokens<'_> {
    if text.is_empty() {
        return Tokens::default();
    }

    let mut i = text;
    let Ok((key, tail)) = parser::footer(&mut i) else {
        return Tokens::error();
    };
    debug_assert!(i.is_empty(), "{i:?} remaining");

    let separator = tail.map_or(FooterSeparator::ColonSpace, |(sep, _)| sep);
    let breaking = match key {
        FooterKey::Token(token) => FooterToken::new_unchecked(token) == BREAKING_ARROW,
        FooterKey::Phrase(phrase) => {
            if !is_breaking_phrase(phrase) {
                return Tokens::error();
            }
            true
        }
    };
    if breaking && separator != FooterSeparator::ColonSpace {
        return Tokens::error();
    }

    Tokens {
        ty: key.as_str(),
        scope: "",
        description: tail.map_or("", |(_, desc)| desc),
        separator: tail.map(|(sep, _)| sep),
        breaking,
        stage: if tail.is_some() {
            Stage::Description
        } else {
            Stage::Type
        },
    }
}

/// `!`, or anything starting with `BREAKING ` (`BREAKING C`, `breaking chnage`, ...)
fn is_breaking_phrase(phrase: &str) -> bool {
    const PREFIX: &str = "BREAKING ";

    phrase == "!"
        || phrase
            .get(..PREFIX.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(PREFIX))
}

/// The type of separator between the footer token and value.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum FooterSeparator {
    /// ": "
    ColonSpace,

    /// " #"
    SpacePound,
}

impl FooterSeparator {
    /// Access `str` representation of `FooterSeparator`
    pub fn as_str(self) -> &'static str {
        match self {
            FooterSeparator::ColonSpace => ": ",
            FooterSeparator::SpacePound => " #",
        }
    }
}

impl Deref for FooterSeparator {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<&'_ str> for FooterSeparator {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for FooterSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl FromStr for FooterSeparator {
    type Err = Error;

    fn from_str(sep: &str) -> Result<Self, Self::Err> {
        match sep {
            ": " => Ok(FooterSeparator::ColonSpace),
            " #" => Ok(FooterSeparator::SpacePound),
            _ => Err(Error::new(ErrorKind::InvalidSeparator).set_context(format!("{sep:?}"))),
        }
    }
}

macro_rules! unicase_components {
    ($($ty:ident),+) => (
        $(
            /// A case-insensitive component of a commit message line.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $ty<'a>(unicase::UniCase<&'a str>);

            impl<'a> $ty<'a> {
                /// Wrap `value` without checking it against the grammar.
                pub const fn new_unchecked(value: &'a str) -> Self {
                    $ty(unicase::UniCase::unicode(value))
                }

                /// Access `str` representation
                pub fn as_str(&self) -> &'a str {
                    self.0.into_inner()
                }
            }

            impl Deref for $ty<'_> {
                type Target = str;

                fn deref(&self) -> &Self::Target {
                    self.as_str()
                }
            }

            impl PartialEq<&'_ str> for $ty<'_> {
                fn eq(&self, other: &&str) -> bool {
                    *self == $ty::new_unchecked(*other)
                }
            }

            impl fmt::Display for $ty<'_> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(&self.0, f)
                }
            }
        )+
    )
}

unicase_components![Type, FooterToken];

/// Common commit types
impl Type<'static> {
    /// Commit type when introducing new features (correlates with `minor` in semver)
    pub const FEAT: Type<'static> = Type::new_unchecked("feat");
    /// Commit type when patching a bug (correlates with `patch` in semver)
    pub const FIX: Type<'static> = Type::new_unchecked("fix");
    /// Possible commit type for changing documentation.
    pub const DOCS: Type<'static> = Type::new_unchecked("docs");
    /// Possible commit type for changing code style.
    pub const STYLE: Type<'static> = Type::new_unchecked("style");
    /// Possible commit type for refactoring code structure.
    pub const REFACTOR: Type<'static> = Type::new_unchecked("refactor");
    /// Possible commit type for performance optimizations.
    pub const PERF: Type<'static> = Type::new_unchecked("perf");
    /// Possible commit type for addressing tests.
    pub const TEST: Type<'static> = Type::new_unchecked("test");
    /// Possible commit type for the build system or dependencies.
    pub const BUILD: Type<'static> = Type::new_unchecked("build");
    /// Possible commit type for CI configuration.
    pub const CI: Type<'static> = Type::new_unchecked("ci");
    /// Possible commit type for other things.
    pub const CHORE: Type<'static> = Type::new_unchecked("chore");
    /// Possible commit type when reverting changes.
    pub const REVERT: Type<'static> = Type::new_unchecked("revert");

    /// All of the above, in their usual order of appearance.
    pub const COMMON: &'static [Type<'static>] = &[
        Self::FEAT,
        Self::FIX,
        Self::DOCS,
        Self::STYLE,
        Self::REFACTOR,
        Self::PERF,
        Self::TEST,
        Self::BUILD,
        Self::CI,
        Self::CHORE,
        Self::REVERT,
    ];
}

impl Type<'_> {
    /// Whether this is one of [`Type::COMMON`].
    pub fn is_common(&self) -> bool {
        Type::COMMON.iter().any(|common| common == self)
    }
}

/// What a footer's value points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Reference {
    /// An issue or pull request number, e.g. `Closes #42`.
    Issue,

    /// One or more commit hashes, e.g. `Refs: 676104e, a215868`.
    Commit,
}

/// Common footer tokens
impl FooterToken<'static> {
    /// Closes the referenced issues.
    pub const CLOSES: FooterToken<'static> = FooterToken::new_unchecked("Closes");
    /// References other commits.
    pub const REFS: FooterToken<'static> = FooterToken::new_unchecked("Refs");
    /// Describes a breaking change.
    pub const BREAKING_CHANGE: FooterToken<'static> = FooterToken::new_unchecked(BREAKING_PHRASE);
}

impl FooterToken<'_> {
    /// A flag to signal that the footer describes a breaking change.
    pub fn breaking(&self) -> bool {
        self == &BREAKING_PHRASE || self == &BREAKING_ARROW
    }

    /// The separator this token is usually written with.
    pub fn separator(&self) -> FooterSeparator {
        if *self == FooterToken::CLOSES {
            FooterSeparator::SpacePound
        } else {
            FooterSeparator::ColonSpace
        }
    }

    /// What the value of this footer refers to, if anything.
    pub fn reference(&self) -> Option<Reference> {
        if *self == FooterToken::CLOSES {
            Some(Reference::Issue)
        } else if *self == FooterToken::REFS {
            Some(Reference::Commit)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tokens<'a>(
        ty: &'a str,
        scope: &'a str,
        description: &'a str,
        breaking: bool,
        stage: Stage,
    ) -> Tokens<'a> {
        Tokens {
            ty,
            scope,
            description,
            separator: None,
            breaking,
            stage,
        }
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(parse_summary(""), Tokens::default());
        assert_eq!(parse_summary("").stage(), Stage::Empty);
        assert!(!parse_summary("").breaking());
    }

    #[test]
    fn test_summary_type() {
        assert_eq!(
            parse_summary("feat"),
            tokens("feat", "", "", false, Stage::Type)
        );
        assert_eq!(parse_summary("feat").summary_type(), Type::FEAT);
        assert_eq!(
            parse_summary("feat!"),
            tokens("feat", "", "", true, Stage::Type)
        );
    }

    #[test]
    fn test_summary_partial_scope() {
        assert_eq!(
            parse_summary("feat(api"),
            tokens("feat", "api", "", false, Stage::Partial)
        );
        assert_eq!(
            parse_summary("feat("),
            tokens("feat", "", "", false, Stage::Partial)
        );
        assert_eq!(
            parse_summary("feat($user.v2"),
            tokens("feat", "$user.v2", "", false, Stage::Partial)
        );
    }

    #[test]
    fn test_summary_scope() {
        assert_eq!(
            parse_summary("feat(api)"),
            tokens("feat", "api", "", false, Stage::Scope)
        );
        assert_eq!(
            parse_summary("feat()"),
            tokens("feat", "", "", false, Stage::Scope)
        );
        assert_eq!(
            parse_summary("feat(api)!"),
            tokens("feat", "api", "", true, Stage::Scope)
        );
    }

    #[test]
    fn test_summary_description() {
        assert_eq!(
            parse_summary("feat(api):"),
            tokens("feat", "api", "", false, Stage::Description)
        );
        assert_eq!(
            parse_summary("feat(api): "),
            tokens("feat", "api", "", false, Stage::Description)
        );
        assert_eq!(
            parse_summary("feat!: add x"),
            tokens("feat", "", "add x", true, Stage::Description)
        );
        assert_eq!(
            parse_summary("fix(parser)!: handle (nested) parens: yes"),
            tokens(
                "fix",
                "parser",
                "handle (nested) parens: yes",
                true,
                Stage::Description
            )
        );
        assert_eq!(
            parse_summary("feat(api: typo"),
            tokens("feat", "api", "typo", false, Stage::Description)
        );
    }

    #[test]
    fn test_summary_error() {
        for text in [
            " ",
            " feat",
            "feat ",
            "feat:add",
            "feat (api): x",
            "feat(api)x",
            "feat(a b): x",
            "feat!!: x",
            "Merge branch 'main'",
            "ünïcode: x",
        ] {
            assert_eq!(parse_summary(text), Tokens::error(), "{text:?}");
        }
    }

    #[test]
    fn test_footer_empty() {
        assert_eq!(parse_footer(""), Tokens::default());
    }

    #[test]
    fn test_footer_type() {
        let t = parse_footer("Closes");
        assert_eq!(t.stage(), Stage::Type);
        assert_eq!(t.type_(), "Closes");
        assert_eq!(t.separator(), None);
        assert!(!t.breaking());

        let t = parse_footer("Co-Authored-By");
        assert_eq!(t.stage(), Stage::Type);
        assert_eq!(t.type_(), "Co-Authored-By");
    }

    #[test]
    fn test_footer_description() {
        let t = parse_footer("Closes #42");
        assert_eq!(t.stage(), Stage::Description);
        assert_eq!(t.type_(), "Closes");
        assert_eq!(t.description(), "42");
        assert_eq!(t.separator(), Some(FooterSeparator::SpacePound));
        assert_eq!(t.footer_token().reference(), Some(Reference::Issue));

        let t = parse_footer("Refs: 676104e, a215868");
        assert_eq!(t.stage(), Stage::Description);
        assert_eq!(t.description(), "676104e, a215868");
        assert_eq!(t.separator(), Some(FooterSeparator::ColonSpace));
        assert_eq!(t.footer_token().reference(), Some(Reference::Commit));

        let t = parse_footer("Closes #");
        assert_eq!(t.stage(), Stage::Description);
        assert_eq!(t.description(), "");
    }

    #[test]
    fn test_footer_breaking_change() {
        let t = parse_footer("BREAKING CHANGE: oops");
        assert_eq!(t.stage(), Stage::Description);
        assert!(t.breaking());
        assert_eq!(t.type_(), "BREAKING CHANGE");
        assert_eq!(t.description(), "oops");
        assert!(t.footer_token().breaking());

        let t = parse_footer("breaking-change: oops");
        assert_eq!(t.stage(), Stage::Description);
        assert!(t.breaking());

        let t = parse_footer("!: oops");
        assert_eq!(t.stage(), Stage::Description);
        assert!(t.breaking());

        let t = parse_footer("BREAKING CHNAGE: typo");
        assert_eq!(t.stage(), Stage::Description);
        assert!(t.breaking());

        let t = parse_footer("BREAKING CHANGE");
        assert_eq!(t.stage(), Stage::Type);
        assert!(t.breaking());

        let t = parse_footer("BREAKING ");
        assert_eq!(t.stage(), Stage::Type);
        assert!(t.breaking());

        let t = parse_footer("BREAKING-CHANGE");
        assert_eq!(t.stage(), Stage::Type);
        assert!(t.breaking());
    }

    #[test]
    fn test_footer_error() {
        for text in [
            " ",
            "BREAKING CHANGE #5",
            "BREAKING-CHANGE #5",
            "! #5",
            "Signed off: me",
            "Closes:",
            "Some prose that goes on",
        ] {
            assert_eq!(parse_footer(text), Tokens::error(), "{text:?}");
        }
    }

    #[test]
    fn test_footer_tolerates_trailing_text() {
        let t = parse_footer("Fixes #1 and #2 (trailing");
        assert_eq!(t.stage(), Stage::Description);
        assert_eq!(t.description(), "1 and #2 (trailing");
    }

    #[test]
    fn test_separator_from_str() {
        assert_eq!(
            ": ".parse::<FooterSeparator>().unwrap(),
            FooterSeparator::ColonSpace
        );
        assert_eq!(
            " #".parse::<FooterSeparator>().unwrap(),
            FooterSeparator::SpacePound
        );
        let err = ":".parse::<FooterSeparator>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSeparator);
        assert_eq!(FooterSeparator::SpacePound, " #");
    }

    #[test]
    fn test_well_known_tokens() {
        assert!(Type::new_unchecked("FEAT").is_common());
        assert!(!Type::new_unchecked("wip").is_common());
        assert_eq!(FooterToken::new_unchecked("closes"), FooterToken::CLOSES);
        assert_eq!(FooterToken::CLOSES.separator(), FooterSeparator::SpacePound);
        assert_eq!(FooterToken::REFS.separator(), FooterSeparator::ColonSpace);
        assert!(FooterToken::BREAKING_CHANGE.breaking());
        assert_eq!(FooterToken::BREAKING_CHANGE.reference(), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn summary_is_pure(text in "\\PC{0,24}") {
                prop_assert_eq!(parse_summary(&text), parse_summary(&text));
            }

            #[test]
            fn footer_is_pure(text in "\\PC{0,24}") {
                prop_assert_eq!(parse_footer(&text), parse_footer(&text));
            }

            #[test]
            fn empty_stage_iff_empty_text(text in "[a-z(): !#$.-]{0,12}") {
                prop_assert_eq!(parse_summary(&text).stage() == Stage::Empty, text.is_empty());
                prop_assert_eq!(parse_footer(&text).stage() == Stage::Empty, text.is_empty());
            }

            #[test]
            fn errors_carry_no_tokens(text in "[a-zA-Z(): !#-]{1,12}") {
                for t in [parse_summary(&text), parse_footer(&text)] {
                    if t.stage() == Stage::Error {
                        prop_assert_eq!(t, Tokens::error());
                    }
                }
            }
        }
    }
}
