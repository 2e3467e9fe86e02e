use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entry::CatalogEntry;

/// Merge policy a DAT declares for rebuild tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceMerging {
    #[default]
    None,
    Split,
    Full,
}

/// Nodump policy a DAT declares for rebuild tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceNodump {
    #[default]
    None,
    Obsolete,
    Required,
    Ignore,
}

/// Packing policy a DAT declares for rebuild tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForcePacking {
    #[default]
    None,
    Zip,
    Unzip,
}

/// Output dialect a catalog is declared to serialize to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Logiqx-style XML (`datafile` root).
    #[default]
    Xml,
    /// ClrMamePro block dialect.
    ClrMamePro,
    /// RomVault block dialect.
    RomVault,
}

/// Header metadata of a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogHeader {
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub version: String,
    pub date: Option<String>,
    pub author: Option<String>,
    pub email: Option<String>,
    pub homepage: Option<String>,
    pub url: Option<String>,
    pub comment: Option<String>,
    pub force_merging: ForceMerging,
    pub force_nodump: ForceNodump,
    pub force_packing: ForcePacking,
    pub output_format: OutputFormat,
    /// Whether equal entries should be collapsed when bucketing.
    pub merge_roms: bool,
}

/// Running aggregate counters over a catalog's entries.
///
/// Maintained incrementally by [`Catalog::add_entry`] and rebuilt wholesale
/// by [`Catalog::recompute_counters`]; both paths go through
/// [`Counters::record`] so they agree bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counters {
    /// Sum of declared Rom sizes. Disks and unknown (-1) sizes contribute
    /// nothing.
    pub total_size: i64,
    pub rom_count: u64,
    pub disk_count: u64,
    /// Entries with a non-empty CRC32. An entry with all three hashes
    /// increments all three counters.
    pub crc_count: u64,
    pub md5_count: u64,
    pub sha1_count: u64,
    pub nodump_count: u64,
}

impl Counters {
    /// Fold one entry into the counters.
    pub fn record(&mut self, entry: &CatalogEntry) {
        match entry {
            CatalogEntry::Rom(rom) => {
                self.rom_count += 1;
                if rom.size > 0 {
                    self.total_size += rom.size;
                }
                if !rom.crc.is_empty() {
                    self.crc_count += 1;
                }
                if !rom.md5.is_empty() {
                    self.md5_count += 1;
                }
                if !rom.sha1.is_empty() {
                    self.sha1_count += 1;
                }
                if rom.status == crate::entry::DumpStatus::Nodump {
                    self.nodump_count += 1;
                }
            }
            CatalogEntry::Disk(disk) => {
                self.disk_count += 1;
                if !disk.md5.is_empty() {
                    self.md5_count += 1;
                }
                if !disk.sha1.is_empty() {
                    self.sha1_count += 1;
                }
                if disk.status == crate::entry::DumpStatus::Nodump {
                    self.nodump_count += 1;
                }
            }
            _ => {}
        }
    }
}

/// An ordered mapping from bucket key to entry sequence, plus header
/// metadata and running counters.
///
/// Bucket keys start out as machine names during population; the bucketing
/// engine regroups them (by case-folded machine name or by best hash) into
/// new catalogs. Entries are values, never shared: operations that derive
/// one catalog from another clone entries rather than aliasing them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub header: CatalogHeader,
    buckets: BTreeMap<String, Vec<CatalogEntry>>,
    counters: Counters,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(header: CatalogHeader) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    /// Append an entry to a bucket, updating counters incrementally.
    pub fn add_entry(&mut self, key: impl Into<String>, entry: CatalogEntry) {
        self.counters.record(&entry);
        self.buckets.entry(key.into()).or_default().push(entry);
    }

    pub fn buckets(&self) -> &BTreeMap<String, Vec<CatalogEntry>> {
        &self.buckets
    }

    pub fn bucket(&self, key: &str) -> Option<&[CatalogEntry]> {
        self.buckets.get(key).map(|v| v.as_slice())
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterate every entry in bucket-key order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.buckets.values().flatten()
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Zero and rebuild all seven counters in one pass.
    pub fn recompute_counters(&mut self) {
        let mut counters = Counters::default();
        for entry in self.buckets.values().flatten() {
            counters.record(entry);
        }
        self.counters = counters;
    }
}
