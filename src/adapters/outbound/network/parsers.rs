//! Parsers for scraped Felix console output.
//!
//! Every function returns a [`ParseOutcome`]: either the captured value or
//! the reason the entry was dropped. None of them fail.

use crate::bundle_graph::domain::{BundleName, BundleRef};
use crate::bundle_graph::policies::NamespaceFilter;
use crate::ports::outbound::{ParseOutcome, SkipReason};
use regex::Regex;
use std::sync::LazyLock;

/// `[  12] [Active     ] [    1] org.sakaiproject.nakamura.api (1.0.0)`
static LISTING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[\s*(\d+)\s*\]\s*\[[^\]]*\]\s*\[\s*\d+\s*\]\s*(\S+)")
        .expect("listing pattern is valid")
});

/// `org.foo; version="1.0.0" -> org.sakaiproject.nakamura.core [42]`
static REQUIREMENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:->|\bfrom)\s+(\S+)\s+\[\s*(\d+)\s*\]\s*$")
        .expect("requirement pattern is valid")
});

/// Parses one line of the shell's `ps -s` listing
pub fn parse_listing_line(line: &str, filter: &NamespaceFilter) -> ParseOutcome<BundleRef> {
    let Some(caps) = LISTING_LINE.captures(line) else {
        return ParseOutcome::Skipped(SkipReason::NoMatch {
            expected: "a bundle listing line",
        });
    };

    let id = caps[1].parse::<u64>().ok();
    accept_listed(&caps[2], id, filter)
}

/// Parses one line of `inspect package requirement <id>` output
pub fn parse_requirement_line(line: &str, filter: &NamespaceFilter) -> ParseOutcome<BundleName> {
    let Some(caps) = REQUIREMENT_LINE.captures(line) else {
        return ParseOutcome::Skipped(SkipReason::NoMatch {
            expected: "a package requirement line",
        });
    };

    accept_import(&caps[1], filter)
}

/// Parses one bundle of the console's JSON bundle list
pub fn parse_listing_entry(
    symbolic_name: Option<&str>,
    id: Option<u64>,
    filter: &NamespaceFilter,
) -> ParseOutcome<BundleRef> {
    match symbolic_name {
        Some(name) => accept_listed(name, id, filter),
        None => ParseOutcome::Skipped(SkipReason::NoMatch {
            expected: "a bundle with a symbolic name",
        }),
    }
}

/// Parses one "Imported Packages" value of the console's bundle detail
///
/// Two shapes are understood: the HTML form, where the exporting bundle
/// sits between the last `>` (ignoring a trailing one) and the last `<`,
/// and the plain `package; version=... -> bundle [id]` form.
pub fn parse_imported_package(value: &str, filter: &NamespaceFilter) -> ParseOutcome<BundleName> {
    let target = match (html_target(value), value.rfind("->")) {
        (Some(target), _) => target,
        (None, Some(arrow)) => &value[arrow + 2..],
        (None, None) => {
            return ParseOutcome::Skipped(SkipReason::NoMatch {
                expected: "an imported package entry",
            })
        }
    };

    let target = target.trim();
    if !filter.in_namespace(target) {
        return ParseOutcome::Skipped(SkipReason::OutOfNamespace {
            name: target.to_string(),
        });
    }

    // "name (12)" or "name [12]"
    let name = target.split_whitespace().next().unwrap_or(target);
    to_bundle_name(name)
}

fn html_target(value: &str) -> Option<&str> {
    if !value.contains('>') || !value.contains('<') {
        return None;
    }

    let (last_char_start, _) = value.char_indices().last()?;
    let start = value[..last_char_start].rfind('>')? + 1;
    let end = value.rfind('<')?;
    (start <= end).then(|| &value[start..end])
}

fn accept_listed(name: &str, id: Option<u64>, filter: &NamespaceFilter) -> ParseOutcome<BundleRef> {
    if !filter.in_namespace(name) {
        return ParseOutcome::Skipped(SkipReason::OutOfNamespace {
            name: name.to_string(),
        });
    }
    if filter.is_excluded(name) {
        return ParseOutcome::Skipped(SkipReason::Excluded {
            name: name.to_string(),
        });
    }

    match to_bundle_name(name) {
        ParseOutcome::Parsed(name) => ParseOutcome::Parsed(BundleRef::new(name, id)),
        ParseOutcome::Skipped(reason) => ParseOutcome::Skipped(reason),
    }
}

fn accept_import(name: &str, filter: &NamespaceFilter) -> ParseOutcome<BundleName> {
    if !filter.in_namespace(name) {
        return ParseOutcome::Skipped(SkipReason::OutOfNamespace {
            name: name.to_string(),
        });
    }
    to_bundle_name(name)
}

fn to_bundle_name(name: &str) -> ParseOutcome<BundleName> {
    match BundleName::new(name) {
        Ok(name) => ParseOutcome::Parsed(name),
        Err(e) => ParseOutcome::Skipped(SkipReason::InvalidName {
            name: name.to_string(),
            details: e.to_string(),
        }),
    }
}
