//! Numeric-suffix naming convention
//!
//! `Device5` is version 5 of family `Device`; `Device` itself is version 0.

use crate::error::MalformedGraph;

/// Interface name split into family base and version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionedName<'a> {
    /// Name with the trailing digit run removed
    pub base: &'a str,
    /// Trailing number, `None` for unversioned names
    pub version: Option<u32>,
}

/// Split `name` at its longest trailing digit run
///
/// A name without trailing digits, or made only of digits, is unversioned.
///
/// # Errors
/// Returns [`MalformedGraph::InvalidVersion`] when the suffix is zero, has a
/// leading zero, or does not fit in `u32`; such a suffix cannot be
/// synthesized back into the same name.
pub fn split_version(name: &str) -> Result<VersionedName<'_>, MalformedGraph> {
    let base = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if base.len() == name.len() || base.is_empty() {
        return Ok(VersionedName { base: name, version: None });
    }

    let digits = &name[base.len()..];
    let invalid = |reason: &str| MalformedGraph::InvalidVersion {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if digits.starts_with('0') {
        return Err(invalid("zero or zero-padded version"));
    }
    let version = digits.parse::<u32>().map_err(|_| invalid("version out of range"))?;

    Ok(VersionedName { base, version: Some(version) })
}

/// Name of version `version` of family `base`
#[must_use]
pub fn versioned_name(base: &str, version: u32) -> String {
    if version == 0 {
        base.to_string()
    } else {
        format!("{base}{version}")
    }
}

/// Synthesize the ascending family chain for a leaf name
///
/// `Device5` gives `Device, Device1, Device2, Device3, Device4, Device5`.
/// Names are produced on demand; a leaf suffix only bounds the walk. They are
/// checked against the graph by [`crate::FamilyResolver`].
///
/// # Errors
/// Propagates [`split_version`] errors
pub fn family_chain(leaf: &str) -> Result<impl DoubleEndedIterator<Item = String> + '_, MalformedGraph> {
    let split = split_version(leaf)?;
    let base = split.base;
    Ok((0..=split.version.unwrap_or(0)).map(move |n| versioned_name(base, n)))
}
