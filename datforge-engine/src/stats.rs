//! Aggregate statistics over one or more catalogs.

use serde::{Deserialize, Serialize};

use datforge_core::Catalog;

use crate::bucket::{bucket_by_machine, BucketOptions};

/// The fixed-shape statistics record handed to an external formatter.
///
/// Only the values are guaranteed here; layout is the formatter's problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Total uncompressed byte size: Rom sizes only, disks excluded.
    pub total_size: i64,
    /// Distinct machine names, case-insensitive.
    pub machine_count: u64,
    pub rom_count: u64,
    pub disk_count: u64,
    pub crc_count: u64,
    pub md5_count: u64,
    pub sha1_count: u64,
    pub nodump_count: u64,
}

impl CatalogStats {
    /// Compute statistics for one catalog.
    ///
    /// `dedupe_machines` routes the machine grouping through duplicate
    /// marking before counting, mirroring how callers that collapse
    /// duplicates see the catalog.
    pub fn from_catalog(catalog: &Catalog, dedupe_machines: bool) -> Self {
        let grouped = bucket_by_machine(
            catalog,
            &BucketOptions {
                lowercase_keys: true,
                mark_dupes: dedupe_machines,
            },
        );

        let counters = catalog.counters();
        Self {
            total_size: counters.total_size,
            machine_count: grouped.bucket_count() as u64,
            rom_count: counters.rom_count,
            disk_count: counters.disk_count,
            crc_count: counters.crc_count,
            md5_count: counters.md5_count,
            sha1_count: counters.sha1_count,
            nodump_count: counters.nodump_count,
        }
    }

    /// Field-wise sum over many catalogs' stats.
    ///
    /// Machine counts are summed as-is: the same machine name appearing in
    /// two catalogs counts twice, since each catalog was counted
    /// independently.
    pub fn aggregate<'a>(stats: impl IntoIterator<Item = &'a CatalogStats>) -> Self {
        let mut total = Self::default();
        for s in stats {
            total.total_size += s.total_size;
            total.machine_count += s.machine_count;
            total.rom_count += s.rom_count;
            total.disk_count += s.disk_count;
            total.crc_count += s.crc_count;
            total.md5_count += s.md5_count;
            total.sha1_count += s.sha1_count;
            total.nodump_count += s.nodump_count;
        }
        total
    }
}
