// ─── Argument Extraction ───
// Splits the user's compiler arguments into the flags the launcher consumes
// and the ones passed through to the compiler untouched.

use std::ffi::{OsStr, OsString};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

/// Boot class path prepends, with or without the `-J` prefix.
const BOOT_CLASSPATH_PATTERN: &str = r"^(?:-J)?-Xbootclasspath/p:(.*)$";

/// Any option meant for the JVM running the compiler.
const JVM_OPTS_PATTERN: &str = r"^-J(.*)$";

const CLASSPATH_FLAGS: [&str; 2] = ["-cp", "-classpath"];

static BOOT_CLASSPATH_RULE: LazyLock<ExtractionRule> =
    LazyLock::new(|| ExtractionRule::new(BOOT_CLASSPATH_PATTERN, false));

static JVM_OPTS_RULE: LazyLock<ExtractionRule> =
    LazyLock::new(|| ExtractionRule::new(JVM_OPTS_PATTERN, false));

/// Tokens matched by a rule and everything else, both in input order.
///
/// The remainder is kept as raw OS strings so pass-through arguments reach
/// the compiler byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction<T = String> {
    pub matched: Vec<T>,
    pub remainder: Vec<OsString>,
}

/// Whole-token pattern with one capture group.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    pattern: Regex,
    allow_empty: bool,
}

impl ExtractionRule {
    /// Panics if `pattern` is not a valid regex; rules are built from constants.
    pub fn new(pattern: &str, allow_empty: bool) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("extraction pattern is valid"),
            allow_empty,
        }
    }

    /// Partition `args` into trimmed captures and the untouched rest.
    ///
    /// Matching tokens are always removed; an empty capture is only kept when
    /// the rule allows it. Tokens that are not valid Unicode never match.
    pub fn extract(&self, args: Vec<OsString>) -> Extraction {
        let mut extraction = Extraction::default();

        for arg in args {
            let captured = arg.to_str().and_then(|text| {
                self.pattern
                    .captures(text)
                    .map(|captures| captures.get(1).map_or("", |m| m.as_str()).trim().to_string())
            });

            match captured {
                Some(value) => {
                    if !value.is_empty() || self.allow_empty {
                        extraction.matched.push(value);
                    }
                }
                None => extraction.remainder.push(arg),
            }
        }

        extraction
    }
}

/// The user's arguments after every launcher-consumed flag was taken out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// `-Xbootclasspath/p:` values, first come first.
    pub boot_classpath: Vec<String>,
    /// `-J` options without the prefix.
    pub jvm_opts: Vec<String>,
    /// Classpath entries for the compiler (before the launcher's own archive).
    pub classpath: Vec<OsString>,
    /// Everything else, in original order.
    pub tool_opts: Vec<OsString>,
}

/// Remove `-Xbootclasspath/p:` and `-J-Xbootclasspath/p:` arguments.
pub fn extract_boot_classpath(args: Vec<OsString>) -> Extraction {
    BOOT_CLASSPATH_RULE.extract(args)
}

/// Remove all `-J` arguments, keeping what follows the prefix.
pub fn extract_jvm_opts(args: Vec<OsString>) -> Extraction {
    JVM_OPTS_RULE.extract(args)
}

fn is_classpath_flag(arg: &OsStr) -> bool {
    arg.to_str().is_some_and(|flag| CLASSPATH_FLAGS.contains(&flag))
}

/// Remove `-cp`/`-classpath` flags together with their value.
///
/// Each classpath flag overrides the previous one, so only the last value is
/// kept. Without any flag the classpath is `$CLASSPATH` followed by the
/// current directory. A trailing flag with no value is left in place.
pub fn extract_classpath(
    args: Vec<OsString>,
    env_classpath: Option<&OsStr>,
) -> Extraction<OsString> {
    let mut remainder = Vec::with_capacity(args.len());
    let mut path: Option<OsString> = None;

    let mut iter = args.into_iter().peekable();
    while let Some(arg) = iter.next() {
        if is_classpath_flag(&arg) && iter.peek().is_some() {
            path = iter.next();
        } else {
            remainder.push(arg);
        }
    }

    let matched = match path {
        Some(path) => vec![path],
        None => {
            info!(
                "No -cp/-classpath given, using $CLASSPATH ({:?}) and the current directory",
                env_classpath
            );
            let mut fallback = Vec::with_capacity(2);
            if let Some(env) = env_classpath {
                fallback.push(env.to_os_string());
            }
            fallback.push(OsString::from("."));
            fallback
        }
    };

    Extraction { matched, remainder }
}

/// Run every extraction in order: boot class path, JVM options, classpath.
pub fn parse_args(args: Vec<OsString>, env_classpath: Option<&OsStr>) -> ParsedArgs {
    let boot = extract_boot_classpath(args);
    let jvm = extract_jvm_opts(boot.remainder);
    let classpath = extract_classpath(jvm.remainder, env_classpath);

    let parsed = ParsedArgs {
        boot_classpath: boot.matched,
        jvm_opts: jvm.matched,
        classpath: classpath.matched,
        tool_opts: classpath.remainder,
    };
    debug!("Parsed arguments: {:?}", parsed);
    parsed
}
