use std::cmp::Ordering;

use semver::Prerelease;

/// A dotted numeric version such as `9.5.0`, `v10.0.0` or `1.2.3.4`.
///
/// Components are compared numerically and shorter sequences are padded with
/// zeros, so `1.2` equals `1.2.0`. A pre-release suffix (`-beta.1`) orders
/// below the plain release; build metadata (`+sha`) is ignored.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    components: Vec<u64>,
    pre: Prerelease,
}

impl SemanticVersion {
    /// Parse a version string, accepting an optional leading `v` or `V`.
    ///
    /// Examples:
    /// - "9.5.0" -> [9, 5, 0]
    /// - "v10.0.0" -> [10, 0, 0]
    /// - "1.2.3.4" -> [1, 2, 3, 4]
    /// - "Not Found" -> None
    pub fn parse(version: &str) -> Option<Self> {
        let trimmed = version.trim();
        let stripped = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
        let without_build = stripped
            .split_once('+')
            .map_or(stripped, |(core, _build)| core);

        let (core, pre) = match without_build.split_once('-') {
            Some((_, "")) => return None,
            Some((core, pre)) => (core, Prerelease::new(pre).ok()?),
            None => (without_build, Prerelease::EMPTY),
        };

        let components = core
            .split('.')
            .map(|part| {
                if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
                    part.parse::<u64>().ok()
                } else {
                    None
                }
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self { components, pre })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for idx in 0..len {
            let lhs = self.components.get(idx).copied().unwrap_or(0);
            let rhs = other.components.get(idx).copied().unwrap_or(0);
            match lhs.cmp(&rhs) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        self.pre.cmp(&other.pre)
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

/// Order the current version against the latest one.
///
/// Byte-identical strings are equal without parsing. Returns `None` when
/// either side is not a valid version.
pub fn compare_versions(current: &str, latest: &str) -> Option<Ordering> {
    if current == latest {
        return Some(Ordering::Equal);
    }
    let current = SemanticVersion::parse(current)?;
    let latest = SemanticVersion::parse(latest)?;
    Some(current.cmp(&latest))
}
