//! Semantic version parsing and constraint matching.
//!
//! Versions are strict semver (`1.2.3`, `1.0.0-rc.1+build.5`). Constraints
//! accept the following forms:
//!
//! - comparators joined by commas or whitespace: `>=1.0.0, <2.0.0`, `>=1.0.0 <2.0.0`
//! - caret, tilde and wildcard requirements: `^1.2`, `~1.2.3`, `1.x`, `*`
//! - hyphen ranges: `1.2.0 - 1.4.5` (inclusive on both ends)
//! - alternatives: `^1.0.0 || ^3.0.0`
//! - exclusions: `!=1.2.0`, `>=1.0.0, !=1.3.0`
//!
//! `=>`, `=<` and `~>` are accepted as spellings of `>=`, `<=` and `~`, and
//! versions may carry a leading `v` (`v1.2.3`).
//!
//! A bare version such as `1.2.3` means exactly that version (a partial one
//! like `1.2` means any `1.2.x`).
//!
//! Pre-release versions only satisfy a comparator that names a pre-release
//! of the same `major.minor.patch`.

use std::fmt;

use airdep_util::errors::AirdepError;
use semver::{Version, VersionReq};

/// Parse a catalog version key for `package`.
pub fn parse_version(package: &str, version: &str) -> Result<Version, AirdepError> {
    Version::parse(version).map_err(|e| AirdepError::MalformedVersion {
        package: package.to_string(),
        version: version.to_string(),
        reason: e.to_string(),
    })
}

/// A parsed constraint: satisfied when any alternative matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    source: String,
    alternatives: Vec<Alternative>,
}

/// One `||`-separated alternative: the requirement must hold and no
/// excluded version may match.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Alternative {
    req: VersionReq,
    excluded: Vec<VersionReq>,
}

impl Alternative {
    fn matches(&self, version: &Version) -> bool {
        self.req.matches(version) && !self.excluded.iter().any(|ex| ex.matches(version))
    }
}

impl Constraint {
    pub fn parse(constraint: &str) -> Result<Self, AirdepError> {
        let malformed = |reason: String| AirdepError::MalformedConstraint {
            constraint: constraint.to_string(),
            reason,
        };

        if constraint.trim().is_empty() {
            return Err(malformed("empty constraint".to_string()));
        }

        let mut alternatives = Vec::new();
        for alt in constraint.split("||") {
            let parts = normalize_alternative(alt).map_err(&malformed)?;
            let req = if parts.required.is_empty() {
                VersionReq::STAR
            } else {
                VersionReq::parse(&parts.required.join(", "))
                    .map_err(|e| malformed(e.to_string()))?
            };
            let mut excluded = Vec::with_capacity(parts.excluded.len());
            for version in &parts.excluded {
                excluded.push(VersionReq::parse(version).map_err(|e| malformed(e.to_string()))?);
            }
            alternatives.push(Alternative { req, excluded });
        }

        Ok(Self {
            source: constraint.to_string(),
            alternatives,
        })
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|alt| alt.matches(version))
    }

    /// The constraint text as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Comparator strings of one alternative, ready for `VersionReq::parse`.
#[derive(Debug, Default)]
struct Comparators {
    required: Vec<String>,
    excluded: Vec<String>,
}

/// Turn one `||`-free alternative into comparator strings.
fn normalize_alternative(alt: &str) -> Result<Comparators, String> {
    let tokens: Vec<&str> = alt
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.is_empty() {
        return Err("empty alternative".to_string());
    }

    // `A - B` hyphen range.
    if let [lower, "-", upper] = tokens.as_slice() {
        return Ok(Comparators {
            required: vec![
                format!(">={}", strip_v(lower)),
                format!("<={}", strip_v(upper)),
            ],
            excluded: Vec::new(),
        });
    }

    let mut out = Comparators::default();
    let mut pending_op: Option<&str> = None;
    for token in tokens {
        if token.chars().all(is_operator_char) {
            if let Some(op) = pending_op {
                return Err(format!("operator '{op}' is missing a version"));
            }
            pending_op = Some(token);
            continue;
        }
        let (op, version) = match pending_op.take() {
            Some(op) => (op, token),
            None => split_operator(token),
        };
        let version = strip_v(version);
        match canonical_operator(op)? {
            "!=" => out.excluded.push(exact_if_bare(version)),
            "" => out.required.push(exact_if_bare(version)),
            op => out.required.push(format!("{op}{version}")),
        }
    }
    if let Some(op) = pending_op {
        return Err(format!("operator '{op}' is missing a version"));
    }
    Ok(out)
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '~' | '^' | '!')
}

fn split_operator(token: &str) -> (&str, &str) {
    let at = token
        .find(|c: char| !is_operator_char(c))
        .unwrap_or(token.len());
    token.split_at(at)
}

/// Map accepted operator spellings onto the ones `semver` understands.
fn canonical_operator(op: &str) -> Result<&'static str, String> {
    Ok(match op {
        "" => "",
        "=" => "=",
        "!=" => "!=",
        ">" => ">",
        "<" => "<",
        ">=" | "=>" => ">=",
        "<=" | "=<" => "<=",
        "~" | "~>" => "~",
        "^" => "^",
        other => return Err(format!("unknown operator '{other}'")),
    })
}

fn strip_v(version: &str) -> &str {
    match version.strip_prefix(['v', 'V']) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => version,
    }
}

/// A version without an operator pins the version it names.
fn exact_if_bare(version: &str) -> String {
    let starts_with_digit = version.starts_with(|c: char| c.is_ascii_digit());
    if starts_with_digit && !has_wildcard(version) {
        format!("={version}")
    } else {
        version.to_string()
    }
}

fn has_wildcard(version: &str) -> bool {
    let core = version.split(['-', '+']).next().unwrap_or(version);
    core.split('.').any(|part| matches!(part, "x" | "X" | "*"))
}
