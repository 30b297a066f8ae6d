//! Numeric version keys.
//!
//! File names like `git-2.10.1.tar.xz` encode versions that must be
//! compared numerically: `10 > 9` even though `"10" < "9"` as strings.
//! The key of a name is the sequence of its purely numeric tokens after
//! splitting on `.` and `-`, compared as an integer tuple.

/// Numeric comparison key for a version-bearing file name or tag.
pub fn numeric_key(name: &str) -> Vec<u64> {
    name.split(['.', '-'])
        .filter_map(|token| token.parse::<u64>().ok())
        .collect()
}

/// Reassemble the dotted version encoded in a file name.
///
/// `git-2.10.1.tar.xz` becomes `2.10.1`.
pub fn version_from_name(name: &str) -> String {
    name.split(['.', '-'])
        .filter(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()))
        .collect::<Vec<_>>()
        .join(".")
}
