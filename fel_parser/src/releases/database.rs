//! Release database implementation
//!
//! A process-wide, immutable mapping from (vendor, os, arch, install method)
//! to a release family: the known builds of that distribution channel, each
//! carrying a build date, a monotonically increasing sequence number, and a
//! canonical version string. The sentinel key "LATEST" resolves to the
//! newest entry of a family. Initialized once, shared read-only across
//! concurrent analyses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// FAMILY KEY COMPONENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    Temurin,
    AdoptOpenJdk,
    RedHat,
    Oracle,
    Azul,
    Amazon,
    Microsoft,
    Unknown,
}

impl Vendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Temurin => "Eclipse Temurin",
            Vendor::AdoptOpenJdk => "AdoptOpenJDK",
            Vendor::RedHat => "Red Hat",
            Vendor::Oracle => "Oracle",
            Vendor::Azul => "Azul",
            Vendor::Amazon => "Amazon Corretto",
            Vendor::Microsoft => "Microsoft",
            Vendor::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Os {
    Linux,
    Windows,
    MacOs,
    Unknown,
}

impl Os {
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "Linux",
            Os::Windows => "Windows",
            Os::MacOs => "macOS",
            Os::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    X86_64,
    Aarch64,
    Ppc64le,
    Unknown,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::Ppc64le => "ppc64le",
            Arch::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallMethod {
    Rpm,
    Tarball,
    Installer,
    Unknown,
}

impl InstallMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallMethod::Rpm => "rpm",
            InstallMethod::Tarball => "tarball",
            InstallMethod::Installer => "installer",
            InstallMethod::Unknown => "Unknown",
        }
    }
}

/// A full family key
pub type FamilyKey = (Vendor, Os, Arch, InstallMethod);

// ============================================================================
// ENTRIES AND FAMILIES
// ============================================================================

/// One known build of a release family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    /// Canonical version string, e.g. "21.0.1+12-LTS"
    pub version: String,
    /// Position in the family's total order; newer builds sort higher even
    /// when two releases share a build date
    pub sequence: u32,
    /// Build date at day granularity
    pub build_date: NaiveDate,
}

/// Database errors; every variant is a configuration defect, not an input
/// property, and aborts the file being processed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DatabaseError {
    #[error("Release family {family} has no LATEST entry")]
    MissingLatest { family: String },
}

impl DatabaseError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            DatabaseError::MissingLatest { .. } => {
                crate::logging::codes::releases::MISSING_LATEST_ENTRY
            }
        }
    }
}

/// The known builds of one (vendor, os, arch, method) combination
#[derive(Debug, Clone)]
pub struct ReleaseFamily {
    name: String,
    entries: Vec<ReleaseEntry>,
    by_version: HashMap<String, usize>,
    latest: Option<usize>,
}

impl ReleaseFamily {
    /// Build a family from entries; the newest entry (highest sequence)
    /// becomes the LATEST sentinel target.
    pub fn new(name: &str, entries: Vec<ReleaseEntry>) -> Self {
        let mut by_version = HashMap::new();
        let mut latest: Option<usize> = None;

        for (idx, entry) in entries.iter().enumerate() {
            // First insert wins: a respin reuses its version string and the
            // original stays the lookup target.
            by_version.entry(entry.version.clone()).or_insert(idx);

            match latest {
                Some(current) if entries[current].sequence >= entry.sequence => {}
                _ => latest = Some(idx),
            }
        }

        Self {
            name: name.to_string(),
            entries,
            by_version,
            latest,
        }
    }

    /// Build a family without a LATEST target (used to exercise the
    /// configuration-defect path)
    pub fn without_latest(name: &str, entries: Vec<ReleaseEntry>) -> Self {
        let mut family = Self::new(name, entries);
        family.latest = None;
        family
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a key; the sentinel "LATEST" resolves to the newest entry.
    pub fn get(&self, version_key: &str) -> Option<&ReleaseEntry> {
        if version_key == "LATEST" {
            return self.latest.map(|idx| &self.entries[idx]);
        }
        self.by_version.get(version_key).map(|&idx| &self.entries[idx])
    }

    /// The newest entry; a family without one is a fatal configuration error.
    pub fn latest(&self) -> Result<&ReleaseEntry, DatabaseError> {
        self.latest
            .map(|idx| &self.entries[idx])
            .ok_or_else(|| DatabaseError::MissingLatest {
                family: self.name.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// THE DATABASE
// ============================================================================

/// The full release database
#[derive(Debug, Clone)]
pub struct ReleaseDatabase {
    families: HashMap<FamilyKey, ReleaseFamily>,
}

impl ReleaseDatabase {
    pub fn new(families: HashMap<FamilyKey, ReleaseFamily>) -> Self {
        Self { families }
    }

    /// Resolve a family by its key components
    pub fn family(
        &self,
        vendor: Vendor,
        os: Os,
        arch: Arch,
        method: InstallMethod,
    ) -> Option<&ReleaseFamily> {
        self.families.get(&(vendor, os, arch, method))
    }

    /// Look up one entry by family key and version key
    pub fn lookup(
        &self,
        vendor: Vendor,
        os: Os,
        arch: Arch,
        method: InstallMethod,
        version_key: &str,
    ) -> Option<&ReleaseEntry> {
        self.family(vendor, os, arch, method)
            .and_then(|f| f.get(version_key))
    }

    /// The newest entry of a family
    pub fn latest(
        &self,
        vendor: Vendor,
        os: Os,
        arch: Arch,
        method: InstallMethod,
    ) -> Option<Result<&ReleaseEntry, DatabaseError>> {
        self.family(vendor, os, arch, method).map(|f| f.latest())
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }
}

// ============================================================================
// STATIC DATA
// ============================================================================

static GLOBAL_DATABASE: OnceLock<ReleaseDatabase> = OnceLock::new();

/// The process-wide database, built on first use
pub fn global() -> &'static ReleaseDatabase {
    GLOBAL_DATABASE.get_or_init(build_database)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("invalid built-in release date")
}

fn entry(version: &str, sequence: u32, build_date: NaiveDate) -> ReleaseEntry {
    ReleaseEntry {
        version: version.to_string(),
        sequence,
        build_date,
    }
}

/// Known builds per shipped family. Population of a fuller table is a data
/// maintenance task, not an engine concern.
fn build_database() -> ReleaseDatabase {
    let mut families = HashMap::new();

    families.insert(
        (Vendor::RedHat, Os::Linux, Arch::X86_64, InstallMethod::Rpm),
        ReleaseFamily::new(
            "Red Hat Linux x86_64 rpm",
            vec![
                entry("21.0.0+35-LTS", 1, date(2023, 9, 19)),
                entry("21.0.0+36-LTS", 2, date(2023, 9, 26)),
                entry("21.0.1+12-LTS", 3, date(2023, 10, 17)),
            ],
        ),
    );

    families.insert(
        (
            Vendor::Temurin,
            Os::Linux,
            Arch::X86_64,
            InstallMethod::Tarball,
        ),
        ReleaseFamily::new(
            "Eclipse Temurin Linux x86_64 tarball",
            vec![
                entry("17.0.6+10", 1, date(2023, 1, 17)),
                entry("17.0.7+7", 2, date(2023, 4, 18)),
                entry("17.0.8+7", 3, date(2023, 7, 18)),
                entry("17.0.9+9", 4, date(2023, 10, 17)),
                entry("21.0.1+12-LTS", 5, date(2023, 10, 30)),
            ],
        ),
    );

    families.insert(
        (
            Vendor::Temurin,
            Os::Linux,
            Arch::Aarch64,
            InstallMethod::Tarball,
        ),
        ReleaseFamily::new(
            "Eclipse Temurin Linux aarch64 tarball",
            vec![
                entry("17.0.8+7", 1, date(2023, 7, 19)),
                entry("17.0.9+9", 2, date(2023, 10, 18)),
            ],
        ),
    );

    families.insert(
        (Vendor::Oracle, Os::Linux, Arch::X86_64, InstallMethod::Rpm),
        ReleaseFamily::new(
            "Oracle Linux x86_64 rpm",
            vec![
                entry("1.8.0_371-b11", 1, date(2023, 4, 18)),
                entry("1.8.0_381-b09", 2, date(2023, 7, 18)),
            ],
        ),
    );

    families.insert(
        (
            Vendor::Temurin,
            Os::Windows,
            Arch::X86_64,
            InstallMethod::Installer,
        ),
        ReleaseFamily::new(
            "Eclipse Temurin Windows x86_64 installer",
            vec![
                entry("11.0.20+8", 1, date(2023, 7, 18)),
                entry("11.0.21+9", 2, date(2023, 10, 17)),
            ],
        ),
    );

    ReleaseDatabase::new(families)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_database_initializes() {
        let db = global();
        assert!(db.family_count() >= 4);
    }

    #[test]
    fn test_lookup_and_latest() {
        let db = global();
        let entry = db
            .lookup(
                Vendor::RedHat,
                Os::Linux,
                Arch::X86_64,
                InstallMethod::Rpm,
                "21.0.0+35-LTS",
            )
            .unwrap();
        assert_eq!(entry.sequence, 1);

        let latest = db
            .latest(Vendor::RedHat, Os::Linux, Arch::X86_64, InstallMethod::Rpm)
            .unwrap()
            .unwrap();
        assert_eq!(latest.version, "21.0.1+12-LTS");
        assert_eq!(latest.sequence, 3);
    }

    #[test]
    fn test_latest_sentinel_key() {
        let db = global();
        let family = db
            .family(Vendor::RedHat, Os::Linux, Arch::X86_64, InstallMethod::Rpm)
            .unwrap();
        let via_sentinel = family.get("LATEST").unwrap();
        let via_method = family.latest().unwrap();
        assert_eq!(via_sentinel, via_method);
    }

    #[test]
    fn test_unknown_key_is_absent() {
        let db = global();
        assert!(db
            .lookup(
                Vendor::RedHat,
                Os::Linux,
                Arch::X86_64,
                InstallMethod::Rpm,
                "22.0.0+1",
            )
            .is_none());
        assert!(db
            .family(Vendor::Azul, Os::Linux, Arch::X86_64, InstallMethod::Rpm)
            .is_none());
    }

    #[test]
    fn test_missing_latest_is_configuration_error() {
        let family = ReleaseFamily::without_latest(
            "broken",
            vec![entry("17.0.8+7", 1, date(2023, 7, 18))],
        );
        let err = family.latest().unwrap_err();
        assert!(matches!(err, DatabaseError::MissingLatest { .. }));
        assert_eq!(err.error_code().as_str(), "E030");
    }

    #[test]
    fn test_respin_keeps_first_version_key() {
        let family = ReleaseFamily::new(
            "respin",
            vec![
                entry("17.0.8+7", 1, date(2023, 7, 18)),
                entry("17.0.8+7", 2, date(2023, 7, 25)),
            ],
        );
        // Key resolves to the original; LATEST resolves to the respin.
        assert_eq!(family.get("17.0.8+7").unwrap().sequence, 1);
        assert_eq!(family.latest().unwrap().sequence, 2);
    }

    #[test]
    fn test_sequences_are_monotonic_per_family() {
        let db = global();
        for key in [
            (Vendor::RedHat, Os::Linux, Arch::X86_64, InstallMethod::Rpm),
            (
                Vendor::Temurin,
                Os::Linux,
                Arch::X86_64,
                InstallMethod::Tarball,
            ),
        ] {
            let family = db.family(key.0, key.1, key.2, key.3).unwrap();
            let latest = family.latest().unwrap();
            assert!(family.len() > 0);
            assert_eq!(latest.sequence as usize, family.len());
        }
    }
}
