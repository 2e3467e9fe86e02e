//! Regrouping catalogs by machine name or by best available hash.

use datforge_core::{Catalog, CatalogEntry, DupeStatus};

/// Options for [`bucket_by_machine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BucketOptions {
    /// Case-fold bucket keys to lower case.
    pub lowercase_keys: bool,
    /// Mark entries that duplicate an earlier entry in the same bucket.
    /// Duplicates are kept, not dropped; downstream callers decide.
    pub mark_dupes: bool,
}

/// Regroup a catalog's entries by owning-machine name.
///
/// The first occurrence of an identity keeps [`DupeStatus::None`]; later
/// equal entries are tagged [`DupeStatus::Exact`] when they come from the
/// same source collection and [`DupeStatus::External`] otherwise.
pub fn bucket_by_machine(catalog: &Catalog, options: &BucketOptions) -> Catalog {
    let mut out = Catalog::with_header(catalog.header.clone());
    let mut dupes = 0usize;

    for entry in catalog.entries() {
        let mut key = entry.meta().machine_name.clone();
        if options.lowercase_keys {
            key = key.to_lowercase();
        }

        let mut entry = entry.clone();
        if options.mark_dupes {
            let earlier_source = out
                .bucket(&key)
                .and_then(|b| b.iter().find(|e| **e == entry))
                .map(|e| e.meta().source_id);
            if let Some(source_id) = earlier_source {
                let dupe = if source_id == entry.meta().source_id {
                    DupeStatus::Exact
                } else {
                    DupeStatus::External
                };
                entry.meta_mut().dupe = dupe;
                dupes += 1;
            }
        }
        out.add_entry(key, entry);
    }

    if dupes > 0 {
        log::debug!("marked {dupes} duplicate entries across {} buckets", out.bucket_count());
    }
    out.recompute_counters();
    out
}

/// The hash class an entry is split under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashBucket {
    Sha1,
    Md5,
    /// CRC32 present, or no hash at all. Also receives the variants that
    /// carry no hashes (releases, bios sets, samples, archives), so the
    /// partition stays total.
    CrcOrNone,
}

impl HashBucket {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
            Self::CrcOrNone => "crc",
        }
    }

    /// Classify an entry by its best available hash: SHA1 beats MD5 beats
    /// CRC-or-none. Every entry lands in exactly one class.
    pub fn classify(entry: &CatalogEntry) -> HashBucket {
        match entry {
            CatalogEntry::Rom(rom) => {
                if !rom.sha1.is_empty() {
                    Self::Sha1
                } else if !rom.md5.is_empty() {
                    Self::Md5
                } else {
                    Self::CrcOrNone
                }
            }
            CatalogEntry::Disk(disk) => {
                if !disk.sha1.is_empty() {
                    Self::Sha1
                } else if !disk.md5.is_empty() {
                    Self::Md5
                } else {
                    Self::CrcOrNone
                }
            }
            _ => Self::CrcOrNone,
        }
    }
}

/// Regroup a catalog into the three hash-class buckets, for splitting a DAT
/// by the strongest hash its entries carry.
pub fn bucket_by_best_hash(catalog: &Catalog) -> Catalog {
    let mut out = Catalog::with_header(catalog.header.clone());
    for entry in catalog.entries() {
        out.add_entry(HashBucket::classify(entry).key(), entry.clone());
    }
    out.recompute_counters();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use datforge_core::{BiosSet, Disk, Rom};

    fn rom(name: &str, machine: &str, source: i64, sha1: &str, md5: &str) -> CatalogEntry {
        let mut entry = CatalogEntry::Rom(Rom {
            name: name.into(),
            size: 128,
            crc: "ab12cd34".into(),
            md5: md5.into(),
            sha1: sha1.into(),
            ..Rom::default()
        });
        entry.set_machine(0, machine);
        entry.set_source(source, "src");
        entry
    }

    #[test]
    fn test_bucket_by_machine_groups_and_folds_case() {
        let mut catalog = Catalog::new();
        catalog.add_entry("in", rom("a.bin", "Pac-Man", 0, "", ""));
        catalog.add_entry("in", rom("b.bin", "pac-man", 0, "", ""));
        catalog.add_entry("in", rom("c.bin", "Galaga", 0, "", ""));

        let plain = bucket_by_machine(&catalog, &BucketOptions::default());
        assert_eq!(plain.bucket_count(), 3);

        let folded = bucket_by_machine(
            &catalog,
            &BucketOptions {
                lowercase_keys: true,
                ..BucketOptions::default()
            },
        );
        assert_eq!(folded.bucket_count(), 2);
        assert_eq!(folded.bucket("pac-man").unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_marking_keeps_entries() {
        let mut catalog = Catalog::new();
        catalog.add_entry("in", rom("a.bin", "Pac-Man", 0, "ff", ""));
        catalog.add_entry("in", rom("a.bin", "Pac-Man", 0, "ff", ""));
        catalog.add_entry("in", rom("a.bin", "Pac-Man", 5, "ff", ""));

        let out = bucket_by_machine(
            &catalog,
            &BucketOptions {
                mark_dupes: true,
                ..BucketOptions::default()
            },
        );
        let bucket = out.bucket("Pac-Man").unwrap();
        assert_eq!(bucket.len(), 3);
        assert_eq!(bucket[0].meta().dupe, DupeStatus::None);
        assert_eq!(bucket[1].meta().dupe, DupeStatus::Exact);
        // Same identity from another source collection
        assert_eq!(bucket[2].meta().dupe, DupeStatus::External);
    }

    #[test]
    fn test_source_catalog_is_untouched() {
        let mut catalog = Catalog::new();
        catalog.add_entry("in", rom("a.bin", "Pac-Man", 0, "ff", ""));
        catalog.add_entry("in", rom("a.bin", "Pac-Man", 0, "ff", ""));

        let _ = bucket_by_machine(
            &catalog,
            &BucketOptions {
                mark_dupes: true,
                ..BucketOptions::default()
            },
        );
        for entry in catalog.entries() {
            assert_eq!(entry.meta().dupe, DupeStatus::None);
        }
    }

    #[test]
    fn test_hash_priority_is_total_and_exclusive() {
        let mut catalog = Catalog::new();
        catalog.add_entry("in", rom("all.bin", "m", 0, "aa", "bb"));
        catalog.add_entry("in", rom("md5only.bin", "m", 0, "", "bb"));
        catalog.add_entry("in", rom("crconly.bin", "m", 0, "", ""));
        catalog.add_entry(
            "in",
            CatalogEntry::Disk(Disk {
                name: "d.chd".into(),
                sha1: "cc".into(),
                ..Disk::default()
            }),
        );
        catalog.add_entry(
            "in",
            CatalogEntry::BiosSet(BiosSet {
                name: "default".into(),
                ..BiosSet::default()
            }),
        );

        let out = bucket_by_best_hash(&catalog);
        assert_eq!(out.entry_count(), catalog.entry_count());
        assert_eq!(out.bucket("sha1").unwrap().len(), 2);
        assert_eq!(out.bucket("md5").unwrap().len(), 1);
        assert_eq!(out.bucket("crc").unwrap().len(), 2);
    }

    #[test]
    fn test_entry_with_no_hashes_and_no_size_is_retained() {
        let mut catalog = Catalog::new();
        let mut bare = Rom::new("mystery.bin");
        bare.crc.clear();
        let mut entry = CatalogEntry::Rom(bare);
        entry.set_machine(0, "m");
        catalog.add_entry("in", entry);

        let out = bucket_by_best_hash(&catalog);
        assert_eq!(out.bucket("crc").unwrap().len(), 1);
    }
}
