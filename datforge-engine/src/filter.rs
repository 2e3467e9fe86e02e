//! Conjunctive attribute filtering over catalog entries.

use datforge_core::{Catalog, CatalogEntry, DumpStatus, ItemKind};

/// Case-insensitive wildcard match.
///
/// `*s*` contains, `s*` starts-with, `*s` ends-with, anything else is an
/// exact (case-folded) comparison.
pub fn wildcard_match(pattern: &str, value: &str) -> bool {
    let pattern = pattern.to_lowercase();
    let value = value.to_lowercase();

    if let Some(inner) = pattern
        .strip_prefix('*')
        .and_then(|p| p.strip_suffix('*'))
    {
        value.contains(inner)
    } else if let Some(suffix) = pattern.strip_prefix('*') {
        value.ends_with(suffix)
    } else if let Some(prefix) = pattern.strip_suffix('*') {
        value.starts_with(prefix)
    } else {
        value == pattern
    }
}

/// An optional predicate per entry field; an entry survives only if every
/// configured predicate passes. With nothing configured, everything
/// survives.
///
/// Hash and dump-status predicates are satisfiable only by the variants
/// that carry the field: asking for a CRC means only entries that have
/// one can match. Size predicates constrain Rom entries and ignore the
/// rest; an exact size takes precedence over min/max.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub machine_name: Option<String>,
    pub name: Option<String>,
    pub kind: Option<ItemKind>,
    pub crc: Option<String>,
    pub md5: Option<String>,
    pub sha1: Option<String>,
    /// `None` means "don't care"; a value keeps only entries whose dump
    /// status equals it.
    pub status: Option<DumpStatus>,
    pub size_exact: Option<i64>,
    pub size_min: Option<i64>,
    pub size_max: Option<i64>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn machine_name(mut self, pattern: impl Into<String>) -> Self {
        self.machine_name = Some(pattern.into());
        self
    }

    pub fn name(mut self, pattern: impl Into<String>) -> Self {
        self.name = Some(pattern.into());
        self
    }

    pub fn kind(mut self, kind: ItemKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Test a single entry against every configured predicate.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if let Some(ref pattern) = self.machine_name {
            if !wildcard_match(pattern, &entry.meta().machine_name) {
                return false;
            }
        }
        if let Some(ref pattern) = self.name {
            if !wildcard_match(pattern, entry.name()) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if entry.kind() != kind {
                return false;
            }
        }

        if let Some(ref pattern) = self.crc {
            let ok = match entry {
                CatalogEntry::Rom(rom) => wildcard_match(pattern, &rom.crc),
                _ => false,
            };
            if !ok {
                return false;
            }
        }
        if let Some(ref pattern) = self.md5 {
            let ok = match entry {
                CatalogEntry::Rom(rom) => wildcard_match(pattern, &rom.md5),
                CatalogEntry::Disk(disk) => wildcard_match(pattern, &disk.md5),
                _ => false,
            };
            if !ok {
                return false;
            }
        }
        if let Some(ref pattern) = self.sha1 {
            let ok = match entry {
                CatalogEntry::Rom(rom) => wildcard_match(pattern, &rom.sha1),
                CatalogEntry::Disk(disk) => wildcard_match(pattern, &disk.sha1),
                _ => false,
            };
            if !ok {
                return false;
            }
        }

        if let Some(status) = self.status {
            let ok = match entry {
                CatalogEntry::Rom(rom) => rom.status == status,
                CatalogEntry::Disk(disk) => disk.status == status,
                _ => false,
            };
            if !ok {
                return false;
            }
        }

        if let CatalogEntry::Rom(rom) = entry {
            if let Some(exact) = self.size_exact {
                // Exact size wins; min/max are ignored when it's set
                if rom.size != exact {
                    return false;
                }
            } else {
                if let Some(min) = self.size_min {
                    if rom.size < min {
                        return false;
                    }
                }
                if let Some(max) = self.size_max {
                    if rom.size > max {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Produce a new catalog holding only the surviving entries, with
    /// counters recomputed from scratch.
    pub fn apply(&self, catalog: &Catalog) -> Catalog {
        let mut out = Catalog::with_header(catalog.header.clone());
        for (key, entries) in catalog.buckets() {
            for entry in entries {
                if self.matches(entry) {
                    out.add_entry(key.clone(), entry.clone());
                }
            }
        }
        log::debug!(
            "filter kept {} of {} entries",
            out.entry_count(),
            catalog.entry_count()
        );
        out.recompute_counters();
        out
    }
}
