//! CFML scopes and the textual qualifiers that select them.

use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;
use regex::Regex;
use rustc_hash::FxHashMap;

/// A named namespace for identifier lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Application,
    Arguments,
    Cgi,
    Client,
    Cookie,
    Form,
    Local,
    Request,
    Server,
    Session,
    Super,
    This,
    Url,
    Variables,
    Unknown,
}

impl Scope {
    /// Every scope with a textual qualifier.
    pub const ALL: [Scope; 14] = [
        Scope::Application,
        Scope::Arguments,
        Scope::Cgi,
        Scope::Client,
        Scope::Cookie,
        Scope::Form,
        Scope::Local,
        Scope::Request,
        Scope::Server,
        Scope::Session,
        Scope::Super,
        Scope::This,
        Scope::Url,
        Scope::Variables,
    ];

    /// The qualifier keyword, as written in source.
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Application => "application",
            Scope::Arguments => "arguments",
            Scope::Cgi => "cgi",
            Scope::Client => "client",
            Scope::Cookie => "cookie",
            Scope::Form => "form",
            Scope::Local => "local",
            Scope::Request => "request",
            Scope::Server => "server",
            Scope::Session => "session",
            Scope::Super => "super",
            Scope::This => "this",
            Scope::Url => "url",
            Scope::Variables => "variables",
            Scope::Unknown => "unknown",
        }
    }

    /// Parse a qualifier keyword, case-insensitively.
    pub fn parse(value: &str) -> Scope {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(value))
            .unwrap_or(Scope::Unknown)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matches the doc prefix (the text right before the cursor's word) against
/// a set of allowed scope qualifiers.
///
/// The qualifier may be written `scope.` or `scope["`. It must not itself be
/// a member access, so `foo.variables.` never counts as a `variables` prefix.
/// When the qualifier is optional the pattern also accepts a bare reference,
/// but still rejects any other member access such as `foo.`.
#[derive(Clone, Debug)]
pub struct ScopePrefix {
    regex: Regex,
}

type PrefixKey = (Vec<Scope>, bool);

/// Compiled prefix patterns, shared across requests.
fn prefix_cache() -> &'static Mutex<FxHashMap<PrefixKey, Regex>> {
    static CACHE: OnceLock<Mutex<FxHashMap<PrefixKey, Regex>>> = OnceLock::new();
    CACHE.get_or_init(Default::default)
}

fn prefix_pattern(scopes: &[Scope], optional: bool) -> String {
    let names = scopes
        .iter()
        .map(|scope| scope.as_str())
        .collect::<Vec<_>>()
        .join("|");
    let qualifier = format!(r#"\b(?:{names})\s*(?:\.\s*|\[\s*['"])"#);
    if optional {
        format!(r"(?i)(?:^|[^.\s])\s*(?:{qualifier})?$")
    } else {
        format!(r"(?i)(?:^|[^.\s])\s*{qualifier}$")
    }
}

impl ScopePrefix {
    /// The prefix pattern for `scopes`, compiled once per scope set.
    pub fn new(scopes: &[Scope], optional: bool) -> Self {
        let regex = prefix_cache()
            .lock()
            .entry((scopes.to_vec(), optional))
            .or_insert_with(|| {
                Regex::new(&prefix_pattern(scopes, optional))
                    .expect("scope prefix pattern is built from fixed keywords")
            })
            .clone();
        Self { regex }
    }

    /// A prefix pattern requiring one of `scopes`.
    pub fn required(scopes: &[Scope]) -> Self {
        Self::new(scopes, false)
    }

    /// A prefix pattern accepting one of `scopes` or no qualifier at all.
    pub fn optional(scopes: &[Scope]) -> Self {
        Self::new(scopes, true)
    }

    pub fn is_match(&self, doc_prefix: &str) -> bool {
        self.regex.is_match(doc_prefix)
    }
}
